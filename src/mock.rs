//! Simulated register blocks for host tests
//!
//! A [`MockBus`] is a small register file implementing [`Mmio`]. Every access goes through a
//! [`Model`], which decides what reads return and how writes change the hardware state, and is
//! recorded in an access log.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::vec::Vec;

use crate::irq::IrqFlag;
use crate::Mmio;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(usize, u32),
    Write(usize, u32),
}

/// Hardware behavior behind a register file
pub trait Model {
    fn read(&mut self, regs: &mut [u32], offset: usize) -> u32 {
        regs[offset / 4]
    }
    fn write(&mut self, regs: &mut [u32], offset: usize, value: u32) {
        regs[offset / 4] = value;
    }
    /// Let time pass
    fn tick(&mut self, _regs: &mut [u32]) {}
}

pub struct MockBus<D> {
    base: usize,
    regs: RefCell<Vec<u32>>,
    model: RefCell<D>,
    log: RefCell<Vec<Access>>,
}

impl<D: Model> MockBus<D> {
    pub fn with_model(base: usize, size: usize, model: D) -> Self {
        MockBus {
            base,
            regs: RefCell::new(vec![0; size / 4]),
            model: RefCell::new(model),
            log: RefCell::new(Vec::new()),
        }
    }

    /// Register value, bypassing the model and the log
    pub fn peek(&self, offset: usize) -> u32 {
        self.regs.borrow()[offset / 4]
    }

    /// Set a register value, bypassing the model and the log
    pub fn poke(&self, offset: usize, value: u32) {
        self.regs.borrow_mut()[offset / 4] = value;
    }

    pub fn log(&self) -> Vec<Access> {
        self.log.borrow().clone()
    }

    pub fn writes(&self) -> Vec<(usize, u32)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|access| match *access {
                Access::Write(offset, value) => Some((offset, value)),
                Access::Read(..) => None,
            })
            .collect()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn model<T>(&self, f: impl FnOnce(&mut D) -> T) -> T {
        f(&mut self.model.borrow_mut())
    }

    pub fn tick(&self) {
        let mut regs = self.regs.borrow_mut();
        self.model.borrow_mut().tick(&mut regs);
    }
}

unsafe impl<D: Model> Mmio for MockBus<D> {
    fn base_addr(&self) -> usize {
        self.base
    }

    fn read32(&self, offset: usize) -> u32 {
        let mut regs = self.regs.borrow_mut();
        let value = self.model.borrow_mut().read(&mut regs, offset);
        self.log.borrow_mut().push(Access::Read(offset, value));
        value
    }

    fn write32(&self, offset: usize, value: u32) {
        let mut regs = self.regs.borrow_mut();
        self.model.borrow_mut().write(&mut regs, offset, value);
        self.log.borrow_mut().push(Access::Write(offset, value));
    }
}

pub const I2S_CONTROL: usize = 0x04;
pub const I2S_WATERLEVEL: usize = 0x0c;
pub const I2S_STATUS: usize = 0x10;
pub const I2S_RXDATA: usize = 0x14;

/// I2S receiver: a FIFO fed while channels are enabled, and a sticky overflow flag
#[derive(Debug, Default)]
pub struct I2sModel {
    /// Words waiting in the receive FIFO
    pub fifo: VecDeque<u32>,
    /// Words arriving on the line, one per status poll while channels are enabled
    pub incoming: VecDeque<u32>,
    pub overflow: bool,
    /// Status polls before a set overflow flag clears, `None` when the clock is stopped
    pub overflow_polls: Option<usize>,
    pub status_polls: usize,
    /// Channels were enabled while the overflow flag was still set
    pub enabled_during_overflow: bool,
    pub(crate) latched: u32,
}

impl I2sModel {
    fn rx_enabled(regs: &[u32]) -> bool {
        (regs[I2S_CONTROL / 4] >> 2) & 0b11 != 0
    }
}

impl Model for I2sModel {
    fn read(&mut self, regs: &mut [u32], offset: usize) -> u32 {
        match offset {
            I2S_STATUS => {
                self.status_polls += 1;
                if self.overflow {
                    match self.overflow_polls {
                        Some(0) => self.overflow = false,
                        Some(n) => self.overflow_polls = Some(n - 1),
                        None => {}
                    }
                }
                if Self::rx_enabled(regs) && self.fifo.is_empty() {
                    if let Some(word) = self.incoming.pop_front() {
                        self.fifo.push_back(word);
                    }
                }
                u32::from(!self.fifo.is_empty()) | (u32::from(self.overflow) << 1)
            }
            I2S_RXDATA => {
                if let Some(word) = self.fifo.pop_front() {
                    self.latched = word;
                }
                self.latched
            }
            _ => regs[offset / 4],
        }
    }

    fn write(&mut self, regs: &mut [u32], offset: usize, value: u32) {
        match offset {
            I2S_CONTROL => {
                let mut value = value;
                if (value >> 2) & 0b11 != 0 && self.overflow {
                    self.enabled_during_overflow = true;
                }
                if value & (1 << 6) != 0 {
                    // Counter reset, the bit clears itself
                    regs[I2S_WATERLEVEL / 4] = 0;
                    value &= !(1 << 6);
                }
                regs[offset / 4] = value;
            }
            I2S_STATUS | I2S_RXDATA | I2S_WATERLEVEL => {}
            _ => regs[offset / 4] = value,
        }
    }
}

pub const DMA_PTR_IN: usize = 0x00;
pub const DMA_PTR_OUT: usize = 0x04;
pub const DMA_START: usize = 0x08;
pub const DMA_DONE: usize = 0x0c;
pub const DMA_SRC_PTR_INC: usize = 0x10;
pub const DMA_DST_PTR_INC: usize = 0x14;
pub const DMA_RX_WAIT_MODE: usize = 0x18;
pub const DMA_TX_WAIT_MODE: usize = 0x1c;
pub const DMA_DATA_TYPE: usize = 0x20;
pub const DMA_CIRCULAR_MODE: usize = 0x24;

/// DMA engine copying into a simulated address space
#[derive(Debug, Default)]
pub struct DmaModel {
    /// Words handed out by the peripheral behind a non incrementing read pointer
    pub source: VecDeque<u32>,
    /// Simulated memory, by address
    pub memory: BTreeMap<u32, u32>,
    /// Byte counts written to DMA_START
    pub starts: Vec<u32>,
    /// Complete transfers on `tick` instead of immediately
    pub deferred: bool,
    /// Raised when a transfer completes, like the fast interrupt line
    pub done_irq: Option<&'static IrqFlag>,
    pub(crate) pending: Option<u32>,
}

impl DmaModel {
    fn run(&mut self, regs: &mut [u32], count: u32) {
        let item = match regs[DMA_DATA_TYPE / 4] & 0b11 {
            0 => 4,
            1 => 2,
            _ => 1,
        };
        let read_ptr = regs[DMA_PTR_IN / 4];
        let write_ptr = regs[DMA_PTR_OUT / 4];
        let read_inc = regs[DMA_SRC_PTR_INC / 4];
        let write_inc = regs[DMA_DST_PTR_INC / 4];
        for i in 0..count / item {
            let value = if read_inc == 0 {
                self.source.pop_front().unwrap_or(0)
            } else {
                let address = read_ptr.wrapping_add(i.wrapping_mul(read_inc));
                self.memory.get(&address).copied().unwrap_or(0)
            };
            self.memory
                .insert(write_ptr.wrapping_add(i.wrapping_mul(write_inc)), value);
        }
        regs[DMA_DONE / 4] = 0b11;
        if let Some(flag) = self.done_irq {
            flag.signal();
        }
    }
}

impl Model for DmaModel {
    fn write(&mut self, regs: &mut [u32], offset: usize, value: u32) {
        match offset {
            DMA_START => {
                regs[offset / 4] = value;
                regs[DMA_DONE / 4] = 0;
                self.starts.push(value);
                if self.deferred {
                    self.pending = Some(value);
                } else {
                    self.run(regs, value);
                }
            }
            DMA_DONE => {}
            _ => regs[offset / 4] = value,
        }
    }

    fn tick(&mut self, regs: &mut [u32]) {
        if let Some(count) = self.pending.take() {
            self.run(regs, count);
        }
    }
}

pub const PLIC_IP0: usize = 0x100;
pub const PLIC_LE0: usize = 0x108;
pub const PLIC_IE0: usize = 0x200;
pub const PLIC_THRESHOLD0: usize = 0x208;
pub const PLIC_CC0: usize = 0x20c;
pub const PLIC_MSIP0: usize = 0x210;
pub const PLIC_SIZE: usize = 0x214;

/// Claim/complete register of one target. Claims hand out `pending` in order.
#[derive(Debug, Default)]
pub struct PlicModel {
    pub pending: VecDeque<u32>,
    /// IDs claimed and not completed yet, in claim order
    pub in_service: Vec<u32>,
    /// IDs written back, in completion order
    pub completed: Vec<u32>,
}

impl Model for PlicModel {
    fn read(&mut self, regs: &mut [u32], offset: usize) -> u32 {
        match offset {
            PLIC_CC0 => match self.pending.pop_front() {
                Some(id) => {
                    self.in_service.push(id);
                    id
                }
                None => 0,
            },
            _ => regs[offset / 4],
        }
    }

    fn write(&mut self, regs: &mut [u32], offset: usize, value: u32) {
        match offset {
            PLIC_CC0 => {
                self.completed.push(value);
                self.in_service.retain(|&id| id != value);
            }
            PLIC_IP0 | 0x104 => {}
            _ => regs[offset / 4] = value,
        }
    }
}
