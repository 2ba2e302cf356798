//! I2S receive controller.
//!
//! API of this module provides thin abstractions over the I2S receiver registers. The job is done
//! by [`I2sDriver`], a handle owning the register block.
//!
//! # Life cycle
//!
//! ```ignore
//! let mut i2s = I2sDriver::new(bus);
//! i2s.init(&I2sConfig::new())?;          // clock, word select and pads on
//! i2s.rx_start(RxChannels::Both)?;       // flush the FIFO, then enable the channels
//! let word = nb::block!(i2s.read())?;    // poll one word
//! i2s.rx_stop();
//! i2s.terminate();
//! ```
//!
//! # Overflow
//!
//! The RX_OVERFLOW status flag is sticky. Software cannot clear it: it is cleared by the receiver
//! on the next serial clock edge after the channels were stopped and started again. This is why
//! [`I2sDriver::rx_start`] may have to wait, and why it can block forever when the serial clock is
//! not running. [`I2sDriver::rx_start_timeout`] bounds that wait.
//!
//! # Watermark
//!
//! The watermark counter is independent from the receive channels. It counts received words and,
//! when enabled together with the interrupt, raises the I2S interrupt line once it reaches the
//! configured threshold. It is only reset by [`I2sDriver::rx_reset_waterlevel`].
use core::convert::Infallible;

use ehal1::delay::DelayNs;
use nb::Error::WouldBlock;

use crate::config::I2sConfig;
use crate::format::RxChannels;
use crate::pac::i2s::RegisterBlock;
use crate::Mmio;

/// I2S driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `init` was called while the peripheral was already enabled
    AlreadyInitialized,
    /// The operation needs the peripheral to be initialized first
    NotInitialized,
    /// The overflow flag did not clear in time
    Timeout,
    /// The capture buffer is larger than one DMA transfer can fill
    BufferTooLarge,
}

/// Content of the status register.
#[derive(Debug, Clone, Copy)]
pub struct Status {
    rx_data_ready: bool,
    rx_overflow: bool,
}

impl Status {
    /// Get the RX_DATA_READY flag. If `true` the receive FIFO holds at least one word.
    pub fn rx_data_ready(&self) -> bool {
        self.rx_data_ready
    }

    /// Get the RX_OVERFLOW flag. If `true` at least one word was dropped since the channels were
    /// last started.
    pub fn rx_overflow(&self) -> bool {
        self.rx_overflow
    }
}

/// Driver of the I2S receiver.
pub struct I2sDriver<M> {
    registers: RegisterBlock<M>,
}

/// Constructors and Destructors
impl<M: Mmio> I2sDriver<M> {
    /// Instantiate a driver around the I2S register block. The hardware is not touched.
    pub fn new(bus: M) -> Self {
        I2sDriver {
            registers: RegisterBlock::new(bus),
        }
    }

    /// Destroy the driver and give back the register block, leaving the hardware as it is.
    pub fn release(self) -> M {
        self.registers.free()
    }
}

impl<M: Mmio> I2sDriver<M> {
    /// Program the clock divider and the word width, then enable the serial clock, the word
    /// select generator and the pads.
    ///
    /// Fails with [`Error::AlreadyInitialized`] without writing anything if the peripheral is
    /// already enabled.
    pub fn init(&mut self, config: &I2sConfig) -> Result<(), Error> {
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized);
        }
        log::debug!(
            "i2s: init, divider {}, {:?}",
            config.clock_divider,
            config.word_length
        );
        self.registers
            .clkdividx()
            .write(|w| w.count().bits(u32::from(config.clock_divider)));
        // The three enable bits go out in the same write
        self.registers.control().modify(|_, w| {
            w.data_width()
                .variant(config.word_length)
                .en_ws()
                .set_bit()
                .en()
                .set_bit()
                .en_io()
                .set_bit()
        });
        Ok(())
    }

    /// Disable the serial clock, the word select generator and the pads.
    ///
    /// Always succeeds, calling it on a terminated peripheral has no effect.
    pub fn terminate(&mut self) {
        log::debug!("i2s: terminate");
        self.registers
            .control()
            .modify(|_, w| w.en_ws().clear_bit().en().clear_bit().en_io().clear_bit());
    }

    /// Return `true` if the serial clock is enabled.
    pub fn is_initialized(&self) -> bool {
        self.registers.control().read().en().bit_is_set()
    }

    /// Start receiving on `channels`.
    ///
    /// Any running channel is stopped first. With [`RxChannels::Disabled`] this is all that
    /// happens. Otherwise:
    /// 1. if the overflow flag was set when this function was called, wait for the receiver to
    ///    clear it (this needs the serial clock to run and never times out),
    /// 2. read the receive FIFO until it is empty, as it has no clear command,
    /// 3. enable the channels.
    ///
    /// The first word read afterwards is the first word of the new session.
    ///
    /// Fails with [`Error::NotInitialized`] without writing anything if the peripheral is off.
    pub fn rx_start(&mut self, channels: RxChannels) -> Result<(), Error> {
        self.rx_start_inner(channels, |i2s| {
            while i2s.rx_overflow() {
                core::hint::spin_loop();
            }
            Ok(())
        })
    }

    /// Same as [`rx_start`](I2sDriver::rx_start), but gives up waiting for the overflow flag to
    /// clear after `timeout_us` microseconds.
    ///
    /// On [`Error::Timeout`] the channels are left stopped and the FIFO is not flushed.
    pub fn rx_start_timeout<D: DelayNs>(
        &mut self,
        channels: RxChannels,
        delay: &mut D,
        timeout_us: u32,
    ) -> Result<(), Error> {
        self.rx_start_inner(channels, |i2s| {
            let mut waited = 0;
            while i2s.rx_overflow() {
                if waited >= timeout_us {
                    log::warn!("i2s: overflow flag still set after {} us", timeout_us);
                    return Err(Error::Timeout);
                }
                delay.delay_us(1);
                waited += 1;
            }
            Ok(())
        })
    }

    fn rx_start_inner<F>(&mut self, channels: RxChannels, wait_overflow: F) -> Result<(), Error>
    where
        F: FnOnce(&Self) -> Result<(), Error>,
    {
        if !self.is_initialized() {
            return Err(Error::NotInitialized);
        }
        // The flag describes the previous session, sample it before touching anything
        let overflow = self.rx_overflow();

        self.rx_stop();
        if !channels.is_enabled() {
            return Ok(());
        }

        if overflow {
            log::debug!("i2s: waiting for the overflow flag to clear");
            wait_overflow(self)?;
        }

        let mut flushed = 0usize;
        while self.rx_data_available() {
            self.rx_read_data();
            flushed += 1;
        }
        if flushed != 0 {
            log::debug!("i2s: dropped {} stale words", flushed);
        }

        self.registers
            .control()
            .modify(|r, w| w.en_rx().bits(u32::from(r.en_rx().bits() | channels.bits())));
        log::debug!("i2s: rx started, {:?}", channels);
        Ok(())
    }

    /// Stop the receive channels. Clock, word select and pads are left as they are.
    pub fn rx_stop(&mut self) {
        self.registers
            .control()
            .modify(|_, w| w.en_rx().variant(RxChannels::Disabled));
    }

    /// Get the channels currently receiving.
    pub fn rx_channels(&self) -> RxChannels {
        self.registers.control().read().en_rx()
    }

    /// Get the content of the status register.
    pub fn status(&self) -> Status {
        let status = self.registers.status().read();
        Status {
            rx_data_ready: status.rx_data_ready().bit(),
            rx_overflow: status.rx_overflow().bit(),
        }
    }

    /// Return `true` if the receive FIFO holds at least one word.
    pub fn rx_data_available(&self) -> bool {
        self.registers.status().read().rx_data_ready().bit_is_set()
    }

    /// Read a raw word from the receive FIFO.
    ///
    /// It's up to the caller to read only when [`rx_data_available`](I2sDriver::rx_data_available)
    /// returns `true`, otherwise the last latched word is returned again.
    pub fn rx_read_data(&mut self) -> u32 {
        self.registers.rxdata().read().bits()
    }

    /// Read a word if one is available.
    pub fn read(&mut self) -> nb::Result<u32, Infallible> {
        if !self.rx_data_available() {
            return Err(WouldBlock);
        }
        Ok(self.rx_read_data())
    }

    /// Return `true` if at least one word was dropped since the channels were last started.
    pub fn rx_overflow(&self) -> bool {
        self.registers.status().read().rx_overflow().bit_is_set()
    }

    /// Get the bus address of the receive data register, to be used as a DMA read pointer.
    pub fn rx_data_address(&self) -> u32 {
        self.registers.rxdata().address() as u32
    }

    /// Set the watermark threshold and enable the watermark counter. With `interrupt` set, the
    /// I2S interrupt line is raised when the counter reaches `watermark`.
    ///
    /// The receive channels are not affected.
    pub fn rx_enable_watermark(&mut self, watermark: u16, interrupt: bool) {
        self.registers
            .watermark()
            .write(|w| w.watermark().bits(u32::from(watermark)));
        self.registers
            .control()
            .modify(|_, w| w.intr_en().bit(interrupt).en_watermark().set_bit());
    }

    /// Disable the watermark counter and its interrupt.
    pub fn rx_disable_watermark(&mut self) {
        self.registers
            .control()
            .modify(|_, w| w.intr_en().clear_bit().en_watermark().clear_bit());
    }

    /// Get the current value of the watermark counter.
    pub fn rx_read_waterlevel(&self) -> u16 {
        self.registers.waterlevel().read().waterlevel()
    }

    /// Reset the watermark counter to zero. The counter does not reset itself when it fires.
    pub fn rx_reset_waterlevel(&mut self) {
        self.registers
            .control()
            .modify(|_, w| w.reset_watermark().set_bit());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::WordLength;
    use crate::mock::{
        Access, I2sModel, MockBus, I2S_CONTROL, I2S_RXDATA, I2S_STATUS, I2S_WATERLEVEL,
    };

    const BASE: usize = 0x3008_0000;

    fn bus(model: I2sModel) -> MockBus<I2sModel> {
        MockBus::with_model(BASE, 0x18, model)
    }

    fn initialized(bus: &MockBus<I2sModel>) -> I2sDriver<&MockBus<I2sModel>> {
        let mut i2s = I2sDriver::new(bus);
        i2s.init(&I2sConfig::new()).unwrap();
        bus.clear_log();
        i2s
    }

    struct CountingDelay(u32);

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.0 += ns;
        }
    }

    #[test]
    fn init_programs_divider_width_and_enables() {
        let bus = bus(I2sModel::default());
        let mut i2s = I2sDriver::new(&bus);
        let config = I2sConfig::new()
            .clock_divider(8)
            .word_length(WordLength::Bits16);
        assert_eq!(i2s.init(&config), Ok(()));
        assert_eq!(bus.peek(0x00), 8);
        // EN, EN_WS, EN_IO and DATA_WIDTH = 1
        assert_eq!(bus.peek(I2S_CONTROL), 0b01_1000_0011);
        assert!(i2s.is_initialized());
    }

    #[test]
    fn init_twice_fails_without_writing() {
        let bus = bus(I2sModel::default());
        let mut i2s = initialized(&bus);
        let control = bus.peek(I2S_CONTROL);
        assert_eq!(
            i2s.init(&I2sConfig::new().clock_divider(3)),
            Err(Error::AlreadyInitialized)
        );
        assert!(bus.writes().is_empty());
        assert_eq!(bus.peek(I2S_CONTROL), control);
        assert_eq!(bus.peek(0x00), 512);
    }

    #[test]
    fn init_terminate_sequences_leave_no_state() {
        let bus = bus(I2sModel::default());
        let mut i2s = I2sDriver::new(&bus);
        for _ in 0..3 {
            i2s.init(&I2sConfig::new()).unwrap();
            assert!(i2s.is_initialized());
            i2s.terminate();
            assert!(!i2s.is_initialized());
            assert_eq!(bus.peek(I2S_CONTROL) & 0b1000_0011, 0);
        }
        i2s.terminate();
        assert!(!i2s.is_initialized());
        assert_eq!(i2s.init(&I2sConfig::new()), Ok(()));
    }

    #[test]
    fn rx_start_requires_init_and_writes_nothing() {
        let bus = bus(I2sModel {
            fifo: [7, 8].into_iter().collect(),
            overflow: true,
            ..Default::default()
        });
        let mut i2s = I2sDriver::new(&bus);
        for channels in [RxChannels::Disabled, RxChannels::Left, RxChannels::Both] {
            assert_eq!(i2s.rx_start(channels), Err(Error::NotInitialized));
        }
        assert!(bus.writes().is_empty());
        assert_eq!(bus.model(|m| m.fifo.len()), 2);
    }

    #[test]
    fn rx_start_disabled_stops_without_waiting() {
        let bus = bus(I2sModel {
            overflow: true,
            overflow_polls: None,
            fifo: [1, 2, 3].into_iter().collect(),
            ..Default::default()
        });
        let mut i2s = initialized(&bus);
        bus.poke(I2S_CONTROL, bus.peek(I2S_CONTROL) | (0b11 << 2));

        assert_eq!(i2s.rx_start(RxChannels::Disabled), Ok(()));
        assert_eq!(i2s.rx_channels(), RxChannels::Disabled);
        // Only the overflow snapshot, no spinning and no flush
        let polls = bus
            .log()
            .iter()
            .filter(|a| matches!(a, Access::Read(I2S_STATUS, _)))
            .count();
        assert_eq!(polls, 1);
        assert_eq!(bus.model(|m| m.fifo.len()), 3);
    }

    #[test]
    fn rx_start_waits_for_overflow_to_clear() {
        let bus = bus(I2sModel {
            overflow: true,
            overflow_polls: Some(5),
            ..Default::default()
        });
        let mut i2s = initialized(&bus);
        assert_eq!(i2s.rx_start(RxChannels::Right), Ok(()));
        assert_eq!(i2s.rx_channels(), RxChannels::Right);
        assert!(!bus.model(|m| m.enabled_during_overflow));
        assert!(bus.model(|m| m.status_polls) >= 6);
        assert!(!i2s.rx_overflow());
    }

    #[test]
    fn rx_start_without_previous_overflow_does_not_wait() {
        let bus = bus(I2sModel::default());
        let mut i2s = initialized(&bus);
        assert_eq!(i2s.rx_start(RxChannels::Left), Ok(()));
        // Overflow snapshot and one empty FIFO check
        assert_eq!(bus.model(|m| m.status_polls), 2);
    }

    #[test]
    fn rx_start_flushes_every_stale_word() {
        let bus = bus(I2sModel {
            fifo: [10, 11, 12, 13].into_iter().collect(),
            incoming: [100].into_iter().collect(),
            ..Default::default()
        });
        let mut i2s = initialized(&bus);
        assert_eq!(i2s.rx_start(RxChannels::Both), Ok(()));
        assert!(bus.model(|m| m.fifo.is_empty()));
        let flushed = bus
            .log()
            .iter()
            .filter(|a| matches!(a, Access::Read(I2S_RXDATA, _)))
            .count();
        assert_eq!(flushed, 4);
        // The first word read is the first new one
        assert_eq!(nb::block!(i2s.read()), Ok(100));
    }

    #[test]
    fn rx_start_timeout_gives_up_with_stalled_clock() {
        let bus = bus(I2sModel {
            overflow: true,
            overflow_polls: None,
            fifo: [5].into_iter().collect(),
            ..Default::default()
        });
        let mut i2s = initialized(&bus);
        let mut delay = CountingDelay(0);
        assert_eq!(
            i2s.rx_start_timeout(RxChannels::Both, &mut delay, 50),
            Err(Error::Timeout)
        );
        assert_eq!(delay.0, 50_000);
        assert_eq!(i2s.rx_channels(), RxChannels::Disabled);
        assert!(!bus.model(|m| m.enabled_during_overflow));
    }

    #[test]
    fn rx_start_timeout_succeeds_when_clock_runs() {
        let bus = bus(I2sModel {
            overflow: true,
            overflow_polls: Some(3),
            ..Default::default()
        });
        let mut i2s = initialized(&bus);
        let mut delay = CountingDelay(0);
        assert_eq!(
            i2s.rx_start_timeout(RxChannels::Left, &mut delay, 50),
            Ok(())
        );
        assert_eq!(i2s.rx_channels(), RxChannels::Left);
    }

    #[test]
    fn rx_stop_only_clears_channels() {
        let bus = bus(I2sModel::default());
        let mut i2s = initialized(&bus);
        i2s.rx_enable_watermark(4, true);
        i2s.rx_start(RxChannels::Both).unwrap();
        let before = bus.peek(I2S_CONTROL);
        i2s.rx_stop();
        assert_eq!(bus.peek(I2S_CONTROL), before & !(0b11 << 2));
        assert!(i2s.is_initialized());
    }

    #[test]
    fn read_would_block_on_empty_fifo() {
        let bus = bus(I2sModel::default());
        let mut i2s = initialized(&bus);
        assert_eq!(i2s.read(), Err(WouldBlock));
        bus.model(|m| m.fifo.push_back(0xabcd));
        assert_eq!(i2s.read(), Ok(0xabcd));
        // The latched value stays readable, reads must be gated on availability
        assert_eq!(i2s.rx_read_data(), 0xabcd);
    }

    #[test]
    fn watermark_does_not_touch_channels() {
        let bus = bus(I2sModel::default());
        let mut i2s = initialized(&bus);
        i2s.rx_start(RxChannels::Left).unwrap();
        i2s.rx_enable_watermark(10, false);
        assert_eq!(i2s.rx_channels(), RxChannels::Left);
        assert_eq!(bus.peek(0x08), 10);
        let control = bus.peek(I2S_CONTROL);
        assert_eq!(control & (1 << 4), 0);
        assert_ne!(control & (1 << 5), 0);
        i2s.rx_disable_watermark();
        assert_eq!(bus.peek(I2S_CONTROL) & 0b11_0000, 0);
        assert_eq!(i2s.rx_channels(), RxChannels::Left);
    }

    #[test]
    fn watermark_reached_keeps_configuration_until_reset() {
        let bus = bus(I2sModel::default());
        let mut i2s = initialized(&bus);
        i2s.rx_enable_watermark(10, true);
        // Counter reaches the threshold
        bus.poke(I2S_WATERLEVEL, 10);
        let control = bus.peek(I2S_CONTROL);
        assert_ne!(control & (1 << 4), 0);
        assert_ne!(control & (1 << 5), 0);
        assert_eq!(i2s.rx_read_waterlevel(), 10);

        i2s.rx_reset_waterlevel();
        assert_eq!(i2s.rx_read_waterlevel(), 0);
        assert_ne!(bus.peek(I2S_CONTROL) & (1 << 5), 0);
    }

    #[test]
    fn rx_data_address_points_at_rxdata() {
        let bus = bus(I2sModel::default());
        let i2s = I2sDriver::new(&bus);
        assert_eq!(i2s.rx_data_address(), (BASE + 0x14) as u32);
    }

    #[test]
    fn status_snapshot_reports_both_flags() {
        let bus = bus(I2sModel {
            fifo: [1].into_iter().collect(),
            overflow: true,
            overflow_polls: None,
            ..Default::default()
        });
        let mut i2s = initialized(&bus);
        let status = i2s.status();
        assert!(status.rx_data_ready());
        assert!(status.rx_overflow());
        assert_eq!(bus.model(|m| m.status_polls), 1);

        i2s.rx_read_data();
        bus.model(|m| m.overflow = false);
        let status = i2s.status();
        assert!(!status.rx_data_ready());
        assert!(!status.rx_overflow());
    }
}
