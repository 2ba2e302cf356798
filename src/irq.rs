//! Communication between interrupt handlers and the main program
//!
//! Interrupt handlers never call back into application code directly. They raise an
//! [`IrqFlag`], and the main program polls it, usually sleeping with [`wait_for_interrupt`]
//! between two polls:
//!
//! ```
//! # use xheep_i2s::irq::IrqFlag;
//! static DMA_DONE: IrqFlag = IrqFlag::new();
//!
//! // In the DMA fast interrupt handler
//! DMA_DONE.signal();
//!
//! // In the main program
//! DMA_DONE.wait(xheep_i2s::irq::wait_for_interrupt);
//! assert!(!DMA_DONE.is_set());
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

/// A flag raised by an interrupt handler and consumed by the main program.
///
/// Only single word loads and stores are used, so this works on cores without atomic
/// read-modify-write instructions. There must be a single consumer: the flag is cleared by the
/// code that observed it set.
#[derive(Debug)]
pub struct IrqFlag(AtomicBool);

impl IrqFlag {
    pub const fn new() -> Self {
        IrqFlag(AtomicBool::new(false))
    }

    /// Raise the flag. Meant to be called from interrupt context.
    #[inline]
    pub fn signal(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// `true` if the flag is raised. The flag is left untouched.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Lower the flag.
    #[inline]
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Return `true` and lower the flag if it was raised.
    pub fn take(&self) -> bool {
        if self.is_set() {
            self.clear();
            true
        } else {
            false
        }
    }

    /// Poll until the flag is raised, calling `idle` between polls, then lower it.
    ///
    /// There is no way out of this loop other than the flag being raised.
    pub fn wait<F: FnMut()>(&self, mut idle: F) {
        while !self.take() {
            idle();
        }
    }
}

impl Default for IrqFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Halt the core until an enabled interrupt arrives.
///
/// Outside of RISC-V targets this is only a spin loop hint.
#[inline]
pub fn wait_for_interrupt() {
    #[cfg(target_arch = "riscv32")]
    #[allow(unused_unsafe)]
    unsafe {
        riscv::asm::wfi();
    }
    #[cfg(not(target_arch = "riscv32"))]
    core::hint::spin_loop();
}

/// Handlers for each class of external interrupt source.
///
/// Called by [`Plic::dispatch`](crate::plic::Plic::dispatch) while the interrupt is claimed.
/// Every method does nothing by default, implement the ones the application needs.
pub trait IrqHandler {
    /// UART lines, `id` in `1..=8`
    fn uart(&mut self, _id: u32) {}
    /// GPIO lines, `id` in `9..=32`
    fn gpio(&mut self, _id: u32) {}
    /// I2C lines, `id` in `33..=48`
    fn i2c(&mut self, _id: u32) {}
    /// The SPI line, 49
    fn spi(&mut self) {}
    /// The I2S line, 50 (receive watermark reached)
    fn i2s(&mut self) {}
    /// Generic external lines, `id` in `51..=63`
    fn external(&mut self, _id: u32) {}
}
