//! This library supports audio capture on the X-HEEP RISC-V microcontroller: the I2S receiver,
//! the single channel DMA engine that moves samples from the I2S FIFO to memory, and the
//! platform level interrupt controller (PLIC) that signals when something happened.
//!
//! Each peripheral is driven through an owned handle wrapping its register block:
//! [`I2sDriver`](driver::I2sDriver), [`Dma`](dma::Dma) and [`Plic`](plic::Plic). A handle is
//! built around anything implementing [`Mmio`], normally a [`MmioRegion`] created from the
//! peripheral base address.
//!
//! # For application writers
//!
//! For fine control, look at the [driver], [dma] and [plic] modules. For capturing a batch of
//! samples without caring about the register level details, look at the [transfer] module.
//!
//! ```ignore
//! let mut i2s = I2sDriver::new(unsafe { MmioRegion::from_addr(I2S_START_ADDRESS) });
//! i2s.init(&I2sConfig::new().clock_divider(512).word_length(WordLength::Bits32))?;
//!
//! let mut audio = [0i32; 256];
//! let batch = PolledCapture::new(&mut i2s, RxChannels::Right).capture(&mut audio)?;
//! ```
//!
//! # Execution model
//!
//! There are no threads. The main program and the interrupt context share a few
//! [`IrqFlag`](irq::IrqFlag)s, set by interrupt handlers and consumed by the main program.
//! Waiting is always a busy poll, optionally combined with `wfi`.
//!
//! # Issues and limitations
//! - Only one I2S receiver, one DMA channel and one PLIC target are supported.
//! - `rx_start` may block forever when it finds the overflow flag set and the I2S clock is not
//!   running, see [`I2sDriver::rx_start`](driver::I2sDriver::rx_start).
//!
#![cfg_attr(not(test), no_std)]

use vcell::VolatileCell;

mod pac;

pub mod config;
pub mod dma;
pub mod driver;
pub mod format;
pub mod irq;
pub mod plic;
pub mod transfer;

#[cfg(test)]
pub(crate) mod mock;

/// A byte addressed region of memory mapped registers.
///
/// This is the only way drivers of this crate touch the hardware. All accesses are 32 bits
/// wide and `offset` is a byte offset from [`base_addr`](Mmio::base_addr).
///
/// # Safety
///
/// It is only safe to implement this trait when:
///
/// * The implementing type has ownership of the register block, preventing any other accesses
///   to it, or is a borrow of such a type.
/// * Reads and writes are performed at word granularity, without caching, at
///   `base_addr() + offset`.
pub unsafe trait Mmio {
    /// Bus address of the first register of the block
    fn base_addr(&self) -> usize;
    /// Read the 32-bit register at `offset`.
    fn read32(&self, offset: usize) -> u32;
    /// Write the 32-bit register at `offset`.
    fn write32(&self, offset: usize, value: u32);
}

unsafe impl<T: Mmio + ?Sized> Mmio for &T {
    #[inline(always)]
    fn base_addr(&self) -> usize {
        (**self).base_addr()
    }
    #[inline(always)]
    fn read32(&self, offset: usize) -> u32 {
        (**self).read32(offset)
    }
    #[inline(always)]
    fn write32(&self, offset: usize, value: u32) {
        (**self).write32(offset, value)
    }
}

/// A register block at a fixed bus address, accessed with volatile loads and stores.
#[derive(Debug)]
pub struct MmioRegion {
    base: usize,
}

impl MmioRegion {
    /// Create a region starting at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the word aligned address of a peripheral register block, and the returned
    /// value must be the only handle used to access that block.
    pub const unsafe fn from_addr(base: usize) -> Self {
        MmioRegion { base }
    }

    #[inline(always)]
    fn cell(&self, offset: usize) -> &VolatileCell<u32> {
        // Safety: guaranteed by the contract of `from_addr`.
        unsafe { &*((self.base + offset) as *const VolatileCell<u32>) }
    }
}

unsafe impl Mmio for MmioRegion {
    #[inline(always)]
    fn base_addr(&self) -> usize {
        self.base
    }
    #[inline(always)]
    fn read32(&self, offset: usize) -> u32 {
        self.cell(offset).get()
    }
    #[inline(always)]
    fn write32(&self, offset: usize, value: u32) {
        self.cell(offset).set(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mmio_region_reads_and_writes_words() {
        let mut block = [0u32; 4];
        let region = unsafe { MmioRegion::from_addr(block.as_mut_ptr() as usize) };
        region.write32(0x8, 0xdead_beef);
        assert_eq!(region.read32(0x8), 0xdead_beef);
        assert_eq!(region.read32(0x4), 0);
        assert_eq!(block[2], 0xdead_beef);
    }
}
