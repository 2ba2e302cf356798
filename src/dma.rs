//! Single channel DMA engine
//!
//! Each setter writes one register and nothing else. The engine does not check that the fields
//! make sense together: a wrong descriptor copies wrong data or never completes. Writing the byte
//! count with [`Dma::start`] is what starts a transfer, every other register is inert until then
//! and keeps its value across transfers.

use core::convert::Infallible;
use core::ops::{BitOr, BitOrAssign};

use nb::Error::WouldBlock;

use crate::pac::dma::RegisterBlock;
use crate::Mmio;

/// Width of each copied item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 32 bits
    Word,
    /// 16 bits
    HalfWord,
    /// 8 bits
    Byte,
}

impl DataType {
    /// Field encoding
    pub const fn bits(self) -> u8 {
        match self {
            DataType::Word => 0,
            DataType::HalfWord => 1,
            DataType::Byte => 2,
        }
    }

    /// Size of one item in bytes
    pub const fn size(self) -> u32 {
        match self {
            DataType::Word => 4,
            DataType::HalfWord => 2,
            DataType::Byte => 1,
        }
    }
}

/// Peripherals whose "ready" signal gates each copied item.
///
/// ```
/// # use xheep_i2s::dma::WaitMode;
/// let mode = WaitMode::SPI | WaitMode::I2S;
/// assert!(mode.contains(WaitMode::I2S));
/// assert!(!mode.contains(WaitMode::SPI_FLASH));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WaitMode(u32);

impl WaitMode {
    /// Copy as fast as possible
    pub const NONE: WaitMode = WaitMode(0);
    /// SPI receive FIFO not empty
    pub const SPI: WaitMode = WaitMode(1 << 0);
    /// SPI flash receive FIFO not empty
    pub const SPI_FLASH: WaitMode = WaitMode(1 << 1);
    /// I2S receive FIFO not empty
    pub const I2S: WaitMode = WaitMode(1 << 2);

    /// Register encoding
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// `true` if every peripheral of `other` is in `self`
    pub const fn contains(self, other: WaitMode) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for WaitMode {
    type Output = WaitMode;

    fn bitor(self, rhs: WaitMode) -> WaitMode {
        WaitMode(self.0 | rhs.0)
    }
}

impl BitOrAssign for WaitMode {
    fn bitor_assign(&mut self, rhs: WaitMode) {
        self.0 |= rhs.0;
    }
}

/// Every register of a transfer except the byte count.
///
/// Applied with [`Dma::configure`]. The default is a word copy between two incrementing
/// pointers at address 0, without wait condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    read_ptr: u32,
    write_ptr: u32,
    read_ptr_inc: u32,
    write_ptr_inc: u32,
    data_type: DataType,
    rx_wait_mode: WaitMode,
    tx_wait_mode: WaitMode,
    circular: bool,
}

impl Descriptor {
    /// Create the default descriptor.
    pub const fn new() -> Self {
        Descriptor {
            read_ptr: 0,
            write_ptr: 0,
            read_ptr_inc: 4,
            write_ptr_inc: 4,
            data_type: DataType::Word,
            rx_wait_mode: WaitMode::NONE,
            tx_wait_mode: WaitMode::NONE,
            circular: false,
        }
    }

    /// Pop words from the peripheral FIFO at `src` into consecutive words at `dst`, one word
    /// each time the peripherals in `wait` are ready.
    pub const fn fifo_to_memory(src: u32, dst: u32, wait: WaitMode) -> Self {
        Descriptor::new()
            .read_ptr(src)
            .write_ptr(dst)
            .read_ptr_increment(0)
            .write_ptr_increment(4)
            .rx_wait_mode(wait)
    }

    /// Address items are read from
    pub const fn read_ptr(mut self, address: u32) -> Self {
        self.read_ptr = address;
        self
    }

    /// Address items are written to
    pub const fn write_ptr(mut self, address: u32) -> Self {
        self.write_ptr = address;
        self
    }

    /// Bytes added to the read pointer after each item, 0 for a FIFO
    pub const fn read_ptr_increment(mut self, increment: u32) -> Self {
        self.read_ptr_inc = increment;
        self
    }

    /// Bytes added to the write pointer after each item
    pub const fn write_ptr_increment(mut self, increment: u32) -> Self {
        self.write_ptr_inc = increment;
        self
    }

    /// Width of each item
    pub const fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    /// Peripherals gating reads
    pub const fn rx_wait_mode(mut self, mode: WaitMode) -> Self {
        self.rx_wait_mode = mode;
        self
    }

    /// Peripherals gating writes
    pub const fn tx_wait_mode(mut self, mode: WaitMode) -> Self {
        self.tx_wait_mode = mode;
        self
    }

    /// Restart from the initial pointers when the transfer completes
    pub const fn circular(mut self, circular: bool) -> Self {
        self.circular = circular;
        self
    }
}

impl Default for Descriptor {
    fn default() -> Self {
        Self::new()
    }
}

/// Driver of the DMA engine
pub struct Dma<M> {
    registers: RegisterBlock<M>,
}

impl<M: Mmio> Dma<M> {
    /// Instantiate a driver around the DMA register block. The hardware is not touched.
    pub fn new(bus: M) -> Self {
        Dma {
            registers: RegisterBlock::new(bus),
        }
    }

    /// Destroy the driver and give back the register block.
    pub fn release(self) -> M {
        self.registers.free()
    }

    /// Set the address items are read from.
    pub fn set_read_ptr(&mut self, address: u32) {
        self.registers.ptr_in().write(|w| w.ptr_in().bits(address));
    }

    /// Set the address items are written to.
    pub fn set_write_ptr(&mut self, address: u32) {
        self.registers.ptr_out().write(|w| w.ptr_out().bits(address));
    }

    /// Set the bytes added to the read pointer after each item, 0 to pop a FIFO.
    pub fn set_read_ptr_increment(&mut self, increment: u32) {
        self.registers
            .src_ptr_inc()
            .write(|w| w.src_ptr_inc().bits(increment));
    }

    /// Set the bytes added to the write pointer after each item.
    pub fn set_write_ptr_increment(&mut self, increment: u32) {
        self.registers
            .dst_ptr_inc()
            .write(|w| w.dst_ptr_inc().bits(increment));
    }

    /// Set the width of each copied item.
    pub fn set_data_type(&mut self, data_type: DataType) {
        self.registers
            .data_type()
            .write(|w| w.data_type().bits(u32::from(data_type.bits())));
    }

    /// Select the peripherals that must be ready before each read.
    pub fn set_rx_wait_mode(&mut self, mode: WaitMode) {
        self.registers
            .rx_wait_mode()
            .write(|w| w.rx_wait_mode().bits(mode.bits()));
    }

    /// Select the peripherals that must be ready before each write.
    pub fn set_tx_wait_mode(&mut self, mode: WaitMode) {
        self.registers
            .tx_wait_mode()
            .write(|w| w.tx_wait_mode().bits(mode.bits()));
    }

    /// Restart the transfer from the initial pointers each time it completes.
    pub fn enable_circular_mode(&mut self, enable: bool) {
        self.registers
            .circular_mode()
            .write(|w| w.circular_mode().bit(enable));
    }

    /// Write every register of `descriptor`. No transfer is started.
    pub fn configure(&mut self, descriptor: &Descriptor) {
        self.set_read_ptr(descriptor.read_ptr);
        self.set_write_ptr(descriptor.write_ptr);
        self.set_read_ptr_increment(descriptor.read_ptr_inc);
        self.set_write_ptr_increment(descriptor.write_ptr_inc);
        self.set_data_type(descriptor.data_type);
        self.set_rx_wait_mode(descriptor.rx_wait_mode);
        self.set_tx_wait_mode(descriptor.tx_wait_mode);
        self.enable_circular_mode(descriptor.circular);
    }

    /// Start copying `bytes` bytes with the current configuration.
    pub fn start(&mut self, bytes: u32) {
        log::debug!("dma: start, {} bytes", bytes);
        self.registers.dma_start().write(|w| w.dma_start().bits(bytes));
    }

    /// Return `true` if the last transfer completed.
    pub fn is_done(&self) -> bool {
        self.registers.done().read().done().bit_is_set()
    }

    /// Return `true` if the running transfer copied at least half of its bytes.
    pub fn is_halfway(&self) -> bool {
        self.registers.done().read().halfway().bit_is_set()
    }

    /// Check for completion without blocking.
    pub fn poll_done(&self) -> nb::Result<(), Infallible> {
        if self.is_done() {
            Ok(())
        } else {
            Err(WouldBlock)
        }
    }
}
