use super::generic::*;
use crate::Mmio;

#[doc = r"Register block"]
pub struct RegisterBlock<M> {
    bus: M,
}

impl<M> RegisterBlock<M> {
    pub const fn new(bus: M) -> Self {
        RegisterBlock { bus }
    }
    pub fn free(self) -> M {
        self.bus
    }
}

impl<M: Mmio> RegisterBlock<M> {
    #[doc = "0x00 - Read pointer"]
    #[inline(always)]
    pub fn ptr_in(&self) -> Reg<'_, M, PTR_IN_SPEC> {
        Reg::new(&self.bus, 0x00)
    }
    #[doc = "0x04 - Write pointer"]
    #[inline(always)]
    pub fn ptr_out(&self) -> Reg<'_, M, PTR_OUT_SPEC> {
        Reg::new(&self.bus, 0x04)
    }
    #[doc = "0x08 - Number of bytes to copy, writing it starts the transfer"]
    #[inline(always)]
    pub fn dma_start(&self) -> Reg<'_, M, DMA_START_SPEC> {
        Reg::new(&self.bus, 0x08)
    }
    #[doc = "0x0c - Transfer status"]
    #[inline(always)]
    pub fn done(&self) -> Reg<'_, M, DONE_SPEC> {
        Reg::new(&self.bus, 0x0c)
    }
    #[doc = "0x10 - Read pointer increment"]
    #[inline(always)]
    pub fn src_ptr_inc(&self) -> Reg<'_, M, SRC_PTR_INC_SPEC> {
        Reg::new(&self.bus, 0x10)
    }
    #[doc = "0x14 - Write pointer increment"]
    #[inline(always)]
    pub fn dst_ptr_inc(&self) -> Reg<'_, M, DST_PTR_INC_SPEC> {
        Reg::new(&self.bus, 0x14)
    }
    #[doc = "0x18 - Peripherals gating reads"]
    #[inline(always)]
    pub fn rx_wait_mode(&self) -> Reg<'_, M, RX_WAIT_MODE_SPEC> {
        Reg::new(&self.bus, 0x18)
    }
    #[doc = "0x1c - Peripherals gating writes"]
    #[inline(always)]
    pub fn tx_wait_mode(&self) -> Reg<'_, M, TX_WAIT_MODE_SPEC> {
        Reg::new(&self.bus, 0x1c)
    }
    #[doc = "0x20 - Width of each copied item"]
    #[inline(always)]
    pub fn data_type(&self) -> Reg<'_, M, DATA_TYPE_SPEC> {
        Reg::new(&self.bus, 0x20)
    }
    #[doc = "0x24 - Restart the transfer when it completes"]
    #[inline(always)]
    pub fn circular_mode(&self) -> Reg<'_, M, CIRCULAR_MODE_SPEC> {
        Reg::new(&self.bus, 0x24)
    }
}

macro_rules! value_register {
    ($(#[$doc:meta] $spec:ident, $writer:ident, $field:ident;)*) => {
        $(
            #[$doc]
            pub struct $spec;
            impl RegisterSpec for $spec {}
            impl Readable for $spec {}
            impl Writable for $spec {}
            pub type $writer<'a> = FieldWriter<'a, $spec, 32, 0>;
            impl R<$spec> {
                #[inline(always)]
                pub fn $field(&self) -> u32 {
                    self.bits
                }
            }
            impl W<$spec> {
                #[inline(always)]
                pub fn $field(&mut self) -> $writer<'_> {
                    $writer::new(self)
                }
            }
        )*
    };
}

value_register! {
    #[doc = "PTR_IN register"] PTR_IN_SPEC, PTR_IN_W, ptr_in;
    #[doc = "PTR_OUT register"] PTR_OUT_SPEC, PTR_OUT_W, ptr_out;
    #[doc = "DMA_START register"] DMA_START_SPEC, DMA_START_W, dma_start;
    #[doc = "SRC_PTR_INC register"] SRC_PTR_INC_SPEC, SRC_PTR_INC_W, src_ptr_inc;
    #[doc = "DST_PTR_INC register"] DST_PTR_INC_SPEC, DST_PTR_INC_W, dst_ptr_inc;
    #[doc = "RX_WAIT_MODE register"] RX_WAIT_MODE_SPEC, RX_WAIT_MODE_W, rx_wait_mode;
    #[doc = "TX_WAIT_MODE register"] TX_WAIT_MODE_SPEC, TX_WAIT_MODE_W, tx_wait_mode;
}

#[doc = "DONE register"]
pub struct DONE_SPEC;
impl RegisterSpec for DONE_SPEC {}
impl Readable for DONE_SPEC {}
impl R<DONE_SPEC> {
    #[doc = "Bit 0 - The last transfer completed"]
    #[inline(always)]
    pub fn done(&self) -> BitReader {
        BitReader::new(self.bits & (1 << 0) != 0)
    }
    #[doc = "Bit 1 - The running transfer is past its middle"]
    #[inline(always)]
    pub fn halfway(&self) -> BitReader {
        BitReader::new(self.bits & (1 << 1) != 0)
    }
}

#[doc = "DATA_TYPE register"]
pub struct DATA_TYPE_SPEC;
impl RegisterSpec for DATA_TYPE_SPEC {}
impl Readable for DATA_TYPE_SPEC {}
impl Writable for DATA_TYPE_SPEC {}
#[doc = "Field `DATA_TYPE` writer - Bits 0:1"]
pub type DATA_TYPE_W<'a> = FieldWriter<'a, DATA_TYPE_SPEC, 2, 0>;
impl R<DATA_TYPE_SPEC> {
    #[doc = "Bits 0:1 - 0 word, 1 half word, 2 and 3 byte"]
    #[inline(always)]
    pub fn data_type(&self) -> u8 {
        (self.bits & 0b11) as u8
    }
}
impl W<DATA_TYPE_SPEC> {
    #[doc = "Bits 0:1 - 0 word, 1 half word, 2 and 3 byte"]
    #[inline(always)]
    pub fn data_type(&mut self) -> DATA_TYPE_W<'_> {
        DATA_TYPE_W::new(self)
    }
}

#[doc = "CIRCULAR_MODE register"]
pub struct CIRCULAR_MODE_SPEC;
impl RegisterSpec for CIRCULAR_MODE_SPEC {}
impl Readable for CIRCULAR_MODE_SPEC {}
impl Writable for CIRCULAR_MODE_SPEC {}
#[doc = "Field `CIRCULAR_MODE` writer - Bit 0"]
pub type CIRCULAR_MODE_W<'a> = BitWriter<'a, CIRCULAR_MODE_SPEC, 0>;
impl R<CIRCULAR_MODE_SPEC> {
    #[inline(always)]
    pub fn circular_mode(&self) -> BitReader {
        BitReader::new(self.bits & 1 != 0)
    }
}
impl W<CIRCULAR_MODE_SPEC> {
    #[inline(always)]
    pub fn circular_mode(&mut self) -> CIRCULAR_MODE_W<'_> {
        CIRCULAR_MODE_W::new(self)
    }
}
