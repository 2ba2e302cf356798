//! Capture of sample batches.
//!
//! API of this module sequences the I2S receiver, and optionally the DMA engine, to fill a buffer
//! of samples while hiding the register level details. A capture always runs the same steps:
//! start the receive channels (flushing stale words), move exactly one buffer worth of words,
//! stop the channels. Calling `capture` again captures the next batch.
//!
//! # Polling
//!
//! [`PolledCapture`] reads each word with the CPU, waiting on the RX_DATA_READY flag.
//! ```ignore
//! let mut audio = [0i32; 256];
//! let batch = PolledCapture::new(&mut i2s, RxChannels::Right).capture(&mut audio)?;
//! if batch.overflow {
//!     // samples were dropped, the capture is not continuous
//! }
//! ```
//!
//! # DMA
//!
//! [`DmaCapture`] lets the DMA engine pop the I2S FIFO, gated by the I2S ready signal, and sleeps
//! until the DMA completion interrupt raises a flag. The read side of the transfer is programmed
//! once when the capture is created; only the write pointer and the byte count are written for
//! each batch.
//! ```ignore
//! static DMA_DONE: IrqFlag = IrqFlag::new();
//!
//! // DMA fast interrupt handler
//! fn dma_irq() {
//!     DMA_DONE.signal();
//! }
//!
//! let mut capture = DmaCapture::new(&mut i2s, &mut dma, &DMA_DONE, RxChannels::Both);
//! loop {
//!     let batch = capture.capture(&mut audio, wait_for_interrupt)?;
//!     process(&audio[..batch.samples]);
//! }
//! ```
use core::sync::atomic::{compiler_fence, Ordering};

use crate::dma::{DataType, Descriptor, Dma, WaitMode};
use crate::driver::{Error, I2sDriver};
use crate::format::RxChannels;
use crate::irq::IrqFlag;
use crate::Mmio;

const SAMPLE_SIZE: u32 = DataType::Word.size();

/// Byte count of a DMA transfer of `samples` words
fn transfer_bytes(samples: usize) -> Result<u32, Error> {
    u32::try_from(samples)
        .ok()
        .and_then(|samples| samples.checked_mul(SAMPLE_SIZE))
        .ok_or(Error::BufferTooLarge)
}

/// Outcome of one capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    /// Number of samples written to the buffer
    pub samples: usize,
    /// At least one word was dropped by the receiver during the capture
    pub overflow: bool,
}

impl Batch {
    const EMPTY: Batch = Batch {
        samples: 0,
        overflow: false,
    };
}

/// Capture with the CPU reading every word.
pub struct PolledCapture<'a, M> {
    i2s: &'a mut I2sDriver<M>,
    channels: RxChannels,
}

impl<'a, M: Mmio> PolledCapture<'a, M> {
    /// Capture from `channels`. Nothing is written until [`capture`](PolledCapture::capture).
    pub fn new(i2s: &'a mut I2sDriver<M>, channels: RxChannels) -> Self {
        PolledCapture { i2s, channels }
    }

    /// Fill `buffer` with new samples. Blocks until every slot is written.
    ///
    /// An empty buffer returns at once, without touching the receiver.
    pub fn capture(&mut self, buffer: &mut [i32]) -> Result<Batch, Error> {
        if buffer.is_empty() {
            return Ok(Batch::EMPTY);
        }
        self.i2s.rx_start(self.channels)?;
        for slot in buffer.iter_mut() {
            let word = match nb::block!(self.i2s.read()) {
                Ok(word) => word,
                Err(never) => match never {},
            };
            *slot = word as i32;
        }
        self.i2s.rx_stop();
        Ok(Batch {
            samples: buffer.len(),
            overflow: self.i2s.rx_overflow(),
        })
    }
}

/// Capture with the DMA engine moving words from the I2S FIFO to memory.
pub struct DmaCapture<'a, M, N> {
    i2s: &'a mut I2sDriver<M>,
    dma: &'a mut Dma<N>,
    done: &'a IrqFlag,
    channels: RxChannels,
}

impl<'a, M: Mmio, N: Mmio> DmaCapture<'a, M, N> {
    /// Program the read side of the DMA descriptor.
    ///
    /// `done` must be raised by the DMA completion interrupt handler.
    pub fn new(
        i2s: &'a mut I2sDriver<M>,
        dma: &'a mut Dma<N>,
        done: &'a IrqFlag,
        channels: RxChannels,
    ) -> Self {
        dma.configure(&Descriptor::fifo_to_memory(
            i2s.rx_data_address(),
            0,
            WaitMode::I2S,
        ));
        DmaCapture {
            i2s,
            dma,
            done,
            channels,
        }
    }

    /// Fill `buffer` with new samples, calling `idle` while the transfer runs.
    ///
    /// Nothing but the completion flag ends the wait. With a stopped serial clock, this never
    /// returns. An empty buffer returns at once, without touching the receiver or the DMA engine.
    ///
    /// Fails with [`Error::BufferTooLarge`] if `buffer` holds more than `u32::MAX` bytes.
    pub fn capture<F: FnMut()>(&mut self, buffer: &mut [i32], idle: F) -> Result<Batch, Error> {
        if buffer.is_empty() {
            return Ok(Batch::EMPTY);
        }
        let bytes = transfer_bytes(buffer.len())?;
        self.dma.set_write_ptr(buffer.as_mut_ptr() as usize as u32);
        self.i2s.rx_start(self.channels)?;

        self.done.clear();
        compiler_fence(Ordering::Release);
        self.dma.start(bytes);
        self.done.wait(idle);
        // The buffer was written behind the compiler's back
        compiler_fence(Ordering::Acquire);

        self.i2s.rx_stop();
        let overflow = self.i2s.rx_overflow();
        if overflow {
            log::warn!("i2s: overflow during capture");
        }
        Ok(Batch {
            samples: buffer.len(),
            overflow,
        })
    }
}
