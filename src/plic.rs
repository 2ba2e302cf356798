//! Platform level interrupt controller
//!
//! The controller routes 63 interrupt lines to one target, the core. A line reaches the core
//! when it is enabled and its priority is strictly above the target threshold.
//!
//! # Claim and complete
//!
//! Servicing an interrupt is a two step handshake. [`Plic::claim`] reads the highest priority
//! pending source and hides it until [`Plic::complete`] writes its ID back. Different sources can
//! be claimed and completed in any order, but one source must be completed before it can be
//! claimed again.
//!
//! The handle tracks outstanding claims and hands out a [`ClaimToken`] for each of them. The token
//! is the only way to call `complete`, which consumes it: a source cannot be completed twice or
//! completed without having been claimed.
//!
//! Source 0 is reserved and means "no interrupt". Operations taking a source ID reject 0 and IDs
//! above 63 with [`Error::BadArgument`], without touching any register.

use crate::irq::{IrqFlag, IrqHandler};
use crate::pac::plic::{bit_position, RegisterBlock, NUM_BIT_REGS, NUM_SRC, PRIO_MASK};
use crate::Mmio;

pub const UART_ID_START: u32 = 1;
pub const UART_ID_END: u32 = 8;
pub const GPIO_ID_START: u32 = 9;
pub const GPIO_ID_END: u32 = 32;
pub const I2C_ID_START: u32 = 33;
pub const I2C_ID_END: u32 = 48;
pub const SPI_ID: u32 = 49;
pub const I2S_ID: u32 = 50;
pub const EXT_ID_START: u32 = 51;
pub const EXT_ID_END: u32 = 63;

/// Highest priority, and highest threshold
pub const MAX_PRIORITY: u8 = PRIO_MASK as u8;

/// PLIC errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Source ID out of `1..=63`, or priority above [`MAX_PRIORITY`]
    BadArgument,
    /// The controller handed out a source that was claimed and not completed yet
    AlreadyClaimed,
}

/// Interrupt detection mode of a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Pending while the line is high
    Level,
    /// Pending on a rising edge
    Edge,
}

/// Class of an interrupt source, with the line ID where a class has several lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqSource {
    /// UART line, 1 to 8
    Uart(u32),
    /// GPIO line, 9 to 32
    Gpio(u32),
    /// I2C line, 33 to 48
    I2c(u32),
    /// SPI, line 49
    Spi,
    /// I2S watermark, line 50
    I2s,
    /// Generic external line, 51 to 63
    External(u32),
}

impl IrqSource {
    /// Classify a source ID. `None` for the reserved ID 0 and IDs above 63.
    pub const fn from_id(id: u32) -> Option<IrqSource> {
        Some(match id {
            UART_ID_START..=UART_ID_END => IrqSource::Uart(id),
            GPIO_ID_START..=GPIO_ID_END => IrqSource::Gpio(id),
            I2C_ID_START..=I2C_ID_END => IrqSource::I2c(id),
            SPI_ID => IrqSource::Spi,
            I2S_ID => IrqSource::I2s,
            EXT_ID_START..=EXT_ID_END => IrqSource::External(id),
            _ => return None,
        })
    }

    /// Source ID of the line
    pub const fn id(self) -> u32 {
        match self {
            IrqSource::Uart(id) | IrqSource::Gpio(id) | IrqSource::I2c(id) => id,
            IrqSource::External(id) => id,
            IrqSource::Spi => SPI_ID,
            IrqSource::I2s => I2S_ID,
        }
    }

    fn dispatch<H: IrqHandler + ?Sized>(self, handler: &mut H) {
        match self {
            IrqSource::Uart(id) => handler.uart(id),
            IrqSource::Gpio(id) => handler.gpio(id),
            IrqSource::I2c(id) => handler.i2c(id),
            IrqSource::Spi => handler.spi(),
            IrqSource::I2s => handler.i2s(),
            IrqSource::External(id) => handler.external(id),
        }
    }
}

/// A claimed interrupt, to be given back to [`Plic::complete`].
#[must_use = "a claimed interrupt must be completed before it can be claimed again"]
#[derive(Debug, PartialEq, Eq)]
pub struct ClaimToken {
    id: u32,
}

impl ClaimToken {
    /// ID of the claimed source
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Class of the claimed source
    pub fn source(&self) -> Option<IrqSource> {
        IrqSource::from_id(self.id)
    }
}

fn check_source(source: u32) -> Result<(), Error> {
    if source == 0 || source as usize >= NUM_SRC {
        Err(Error::BadArgument)
    } else {
        Ok(())
    }
}

/// Driver of the PLIC, target 0
pub struct Plic<M> {
    registers: RegisterBlock<M>,
    /// Outstanding claims, one bit per source ID
    claimed: u64,
}

impl<M: Mmio> Plic<M> {
    /// Wrap the register block. [`init`](Plic::init) must be called before anything else.
    pub fn new(bus: M) -> Self {
        Plic {
            registers: RegisterBlock::new(bus),
            claimed: 0,
        }
    }

    /// Destroy the driver and give back the register block. Outstanding claims are forgotten.
    pub fn release(self) -> M {
        self.registers.free()
    }

    /// Disable every source, set every priority to 0 and every trigger to level, set the
    /// threshold to 0 and clear the software interrupt.
    pub fn init(&mut self) {
        log::debug!("plic: init");
        for n in 0..NUM_BIT_REGS {
            self.registers.ie0(n).reset();
        }
        for n in 0..NUM_SRC {
            self.registers.prio(n).reset();
        }
        for n in 0..NUM_BIT_REGS {
            self.registers.le(n).reset();
        }
        self.registers.threshold0().reset();
        self.registers.msip0().reset();
        self.claimed = 0;
    }

    /// Enable or disable the delivery of `source` to the core.
    pub fn set_enabled(&mut self, source: u32, enabled: bool) -> Result<(), Error> {
        check_source(source)?;
        let (n, bit) = bit_position(source);
        self.registers.ie0(n).modify(|_, w| w.set(bit, enabled));
        Ok(())
    }

    /// Return `true` if `source` is delivered to the core.
    pub fn is_enabled(&self, source: u32) -> Result<bool, Error> {
        check_source(source)?;
        let (n, bit) = bit_position(source);
        Ok(self.registers.ie0(n).read().bit(bit).bit_is_set())
    }

    /// Select how `source` is detected. Should be done while the source is disabled.
    pub fn set_trigger(&mut self, source: u32, trigger: Trigger) -> Result<(), Error> {
        check_source(source)?;
        let (n, bit) = bit_position(source);
        self.registers
            .le(n)
            .modify(|_, w| w.set(bit, trigger == Trigger::Edge));
        Ok(())
    }

    /// Set the priority of `source`, from 0 (never delivered) to [`MAX_PRIORITY`].
    pub fn set_priority(&mut self, source: u32, priority: u8) -> Result<(), Error> {
        check_source(source)?;
        if priority > MAX_PRIORITY {
            return Err(Error::BadArgument);
        }
        self.registers
            .prio(source as usize)
            .write(|w| w.prio().bits(u32::from(priority)));
        Ok(())
    }

    /// Only sources with a priority strictly above `threshold` reach the core.
    pub fn set_threshold(&mut self, threshold: u8) -> Result<(), Error> {
        if threshold > MAX_PRIORITY {
            return Err(Error::BadArgument);
        }
        self.registers
            .threshold0()
            .write(|w| w.threshold0().bits(u32::from(threshold)));
        Ok(())
    }

    /// Pending state of `source`. Claims are not affected.
    pub fn is_pending(&self, source: u32) -> Result<bool, Error> {
        check_source(source)?;
        let (n, bit) = bit_position(source);
        Ok(self.registers.ip(n).read().bit(bit).bit_is_set())
    }

    /// Claim the highest priority pending interrupt.
    ///
    /// Returns `Ok(None)` if nothing is pending. The returned token must be given back to
    /// [`complete`](Plic::complete).
    pub fn claim(&mut self) -> Result<Option<ClaimToken>, Error> {
        let id = self.registers.cc0().read().cc0();
        if id == 0 {
            return Ok(None);
        }
        let mask = 1u64 << id;
        if self.claimed & mask != 0 {
            log::warn!("plic: source {} claimed twice", id);
            return Err(Error::AlreadyClaimed);
        }
        self.claimed |= mask;
        log::trace!("plic: claimed {}", id);
        Ok(Some(ClaimToken { id }))
    }

    /// Signal that the interrupt of `token` was serviced. Its source can be claimed again.
    pub fn complete(&mut self, token: ClaimToken) {
        self.registers.cc0().write(|w| w.cc0().bits(token.id));
        self.claimed &= !(1u64 << token.id);
        log::trace!("plic: completed {}", token.id);
    }

    /// Return `true` if `source` is claimed and not completed yet.
    pub fn is_claimed(&self, source: u32) -> bool {
        (source as usize) < NUM_SRC && self.claimed & (1u64 << source) != 0
    }

    /// Service one external interrupt: claim it, call the `handler` method of its class, raise
    /// `handled` and complete it.
    ///
    /// This is the body of the machine external interrupt handler. When nothing is pending,
    /// nothing is called and `Ok(None)` is returned.
    pub fn dispatch<H: IrqHandler + ?Sized>(
        &mut self,
        handler: &mut H,
        handled: &IrqFlag,
    ) -> Result<Option<IrqSource>, Error> {
        let token = match self.claim()? {
            Some(token) => token,
            None => return Ok(None),
        };
        let source = token.source();
        if let Some(source) = source {
            source.dispatch(handler);
        }
        handled.signal();
        self.complete(token);
        Ok(source)
    }

    /// Raise the software interrupt.
    pub fn software_irq_force(&mut self) {
        self.registers.msip0().write(|w| w.msip0().set_bit());
    }

    /// Clear the software interrupt, meant to be called by its handler.
    pub fn software_irq_acknowledge(&mut self) {
        self.registers.msip0().write(|w| w.msip0().clear_bit());
    }

    /// Return `true` if the software interrupt is raised.
    pub fn software_irq_is_pending(&self) -> bool {
        self.registers.msip0().read().msip0().bit_is_set()
    }
}
