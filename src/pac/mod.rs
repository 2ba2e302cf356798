//! I2S, DMA and PLIC register definitions
//!
//! This module follows the register maps generated for the X-HEEP peripherals. Offsets and
//! field positions must not change, they are what the hardware decodes.
//!

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(unused)]

pub mod generic;
#[doc = "Direct memory access engine"]
pub mod dma;
#[doc = "Inter-IC sound receiver"]
pub mod i2s;
#[doc = "Platform level interrupt controller"]
pub mod plic;

pub use self::generic::*;
