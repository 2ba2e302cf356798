//! Encodings of the two bit fields of the I2S control register
//!
//! Both fields are two bits wide and every bit pattern has a meaning, so the conversions from raw
//! bits are total: they only look at the two least significant bits.

/// Width of one received word (DATA_WIDTH field of CONTROL)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordLength {
    /// 8 bit words
    Bits8,
    /// 16 bit words
    Bits16,
    /// 24 bit words
    Bits24,
    /// 32 bit words
    Bits32,
}

impl WordLength {
    /// Field encoding
    #[inline]
    pub const fn bits(self) -> u8 {
        match self {
            WordLength::Bits8 => 0,
            WordLength::Bits16 => 1,
            WordLength::Bits24 => 2,
            WordLength::Bits32 => 3,
        }
    }

    /// Decode the field. Only the two least significant bits are used.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => WordLength::Bits8,
            1 => WordLength::Bits16,
            2 => WordLength::Bits24,
            _ => WordLength::Bits32,
        }
    }

    /// Number of significant bits in each word
    pub const fn bits_per_word(self) -> u32 {
        match self {
            WordLength::Bits8 => 8,
            WordLength::Bits16 => 16,
            WordLength::Bits24 => 24,
            WordLength::Bits32 => 32,
        }
    }
}

impl Default for WordLength {
    fn default() -> Self {
        WordLength::Bits32
    }
}

/// Receive channels selection (EN_RX field of CONTROL)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxChannels {
    /// No channel, the receiver is stopped
    Disabled,
    /// Left channel only
    Left,
    /// Right channel only
    Right,
    /// Left and right channels
    Both,
}

impl RxChannels {
    /// Field encoding
    #[inline]
    pub const fn bits(self) -> u8 {
        match self {
            RxChannels::Disabled => 0,
            RxChannels::Left => 1,
            RxChannels::Right => 2,
            RxChannels::Both => 3,
        }
    }

    /// Decode the field. Only the two least significant bits are used.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => RxChannels::Disabled,
            1 => RxChannels::Left,
            2 => RxChannels::Right,
            _ => RxChannels::Both,
        }
    }

    /// `true` unless this is [`RxChannels::Disabled`]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, RxChannels::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodings_match_the_register_map() {
        assert_eq!(WordLength::Bits8.bits(), 0);
        assert_eq!(WordLength::Bits32.bits(), 3);
        assert_eq!(RxChannels::Left.bits(), 1);
        assert_eq!(RxChannels::Right.bits(), 2);
        assert_eq!(RxChannels::Both.bits(), 3);
    }

    #[test]
    fn decoding_ignores_upper_bits() {
        assert_eq!(RxChannels::from_bits(0b110), RxChannels::Right);
        assert_eq!(WordLength::from_bits(0xfd), WordLength::Bits16);
        assert!(!RxChannels::from_bits(0b100).is_enabled());
    }

    #[test]
    fn word_widths() {
        let widths = [
            WordLength::Bits8,
            WordLength::Bits16,
            WordLength::Bits24,
            WordLength::Bits32,
        ]
        .map(WordLength::bits_per_word);
        assert_eq!(widths, [8, 16, 24, 32]);
        assert_eq!(WordLength::default(), WordLength::Bits32);
    }
}
