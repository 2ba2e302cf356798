//! I2S configuration

use crate::format::WordLength;

/// Clock divider used when none is given
pub const DEFAULT_CLOCK_DIVIDER: u16 = 512;

/// Configuration applied by [`I2sDriver::init`](crate::driver::I2sDriver::init)
///
/// ```
/// # use xheep_i2s::config::I2sConfig;
/// # use xheep_i2s::format::WordLength;
/// let config = I2sConfig::new()
///     .clock_divider(8)
///     .word_length(WordLength::Bits16);
/// assert_eq!(config.divider(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2sConfig {
    /// Division between the peripheral clock and the serial clock, written to CLKDIVIDX
    pub(crate) clock_divider: u16,
    /// Width of each received word
    pub(crate) word_length: WordLength,
}

impl I2sConfig {
    /// Create a configuration with a divider of 512 and 32 bit words.
    pub const fn new() -> Self {
        I2sConfig {
            clock_divider: DEFAULT_CLOCK_DIVIDER,
            word_length: WordLength::Bits32,
        }
    }

    /// Select the clock divider
    pub const fn clock_divider(mut self, divider: u16) -> Self {
        self.clock_divider = divider;
        self
    }

    /// Select the received word width
    pub const fn word_length(mut self, length: WordLength) -> Self {
        self.word_length = length;
        self
    }

    /// The configured clock divider
    pub const fn divider(&self) -> u16 {
        self.clock_divider
    }

    /// The configured word width
    pub const fn length(&self) -> WordLength {
        self.word_length
    }
}

impl Default for I2sConfig {
    fn default() -> Self {
        Self::new()
    }
}
