use super::generic::*;
use crate::format::{RxChannels, WordLength};
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
    #[doc = "0x00 - Clock divider"]
    #[inline(always)]
    pub fn clkdividx(&self) -> Reg<'_, M, CLKDIVIDX_SPEC> {
        Reg::new(&self.bus, 0x00)
    }
    #[doc = "0x04 - Control register"]
    #[inline(always)]
    pub fn control(&self) -> Reg<'_, M, CONTROL_SPEC> {
        Reg::new(&self.bus, 0x04)
    }
    #[doc = "0x08 - Watermark counter threshold"]
    #[inline(always)]
    pub fn watermark(&self) -> Reg<'_, M, WATERMARK_SPEC> {
        Reg::new(&self.bus, 0x08)
    }
    #[doc = "0x0c - Watermark counter value"]
    #[inline(always)]
    pub fn waterlevel(&self) -> Reg<'_, M, WATERLEVEL_SPEC> {
        Reg::new(&self.bus, 0x0c)
    }
    #[doc = "0x10 - Status register"]
    #[inline(always)]
    pub fn status(&self) -> Reg<'_, M, STATUS_SPEC> {
        Reg::new(&self.bus, 0x10)
    }
    #[doc = "0x14 - Received data, head of the receive FIFO"]
    #[inline(always)]
    pub fn rxdata(&self) -> Reg<'_, M, RXDATA_SPEC> {
        Reg::new(&self.bus, 0x14)
    }
}

#[doc = "CLKDIVIDX register"]
pub struct CLKDIVIDX_SPEC;
impl RegisterSpec for CLKDIVIDX_SPEC {}
impl Readable for CLKDIVIDX_SPEC {}
impl Writable for CLKDIVIDX_SPEC {}
#[doc = "Field `COUNT` writer - Bits 0:15"]
pub type COUNT_W<'a> = FieldWriter<'a, CLKDIVIDX_SPEC, 16, 0>;
impl R<CLKDIVIDX_SPEC> {
    #[doc = "Bits 0:15 - Clock divider count"]
    #[inline(always)]
    pub fn count(&self) -> u16 {
        (self.bits & 0xffff) as u16
    }
}
impl W<CLKDIVIDX_SPEC> {
    #[doc = "Bits 0:15 - Clock divider count"]
    #[inline(always)]
    pub fn count(&mut self) -> COUNT_W<'_> {
        COUNT_W::new(self)
    }
}

#[doc = "CONTROL register"]
pub struct CONTROL_SPEC;
impl RegisterSpec for CONTROL_SPEC {}
impl Readable for CONTROL_SPEC {}
impl Writable for CONTROL_SPEC {}
#[doc = "Field `EN` writer - Enable the serial clock"]
pub type EN_W<'a> = BitWriter<'a, CONTROL_SPEC, 0>;
#[doc = "Field `EN_WS` writer - Enable the word select generator"]
pub type EN_WS_W<'a> = BitWriter<'a, CONTROL_SPEC, 1>;
#[doc = "Field `EN_RX` writer - Receive channels"]
pub type EN_RX_W<'a> = FieldWriter<'a, CONTROL_SPEC, 2, 2>;
#[doc = "Field `INTR_EN` writer - Watermark interrupt enable"]
pub type INTR_EN_W<'a> = BitWriter<'a, CONTROL_SPEC, 4>;
#[doc = "Field `EN_WATERMARK` writer - Watermark counter enable"]
pub type EN_WATERMARK_W<'a> = BitWriter<'a, CONTROL_SPEC, 5>;
#[doc = "Field `RESET_WATERMARK` writer - Watermark counter reset"]
pub type RESET_WATERMARK_W<'a> = BitWriter<'a, CONTROL_SPEC, 6>;
#[doc = "Field `EN_IO` writer - Connect the signals to the pads"]
pub type EN_IO_W<'a> = BitWriter<'a, CONTROL_SPEC, 7>;
#[doc = "Field `DATA_WIDTH` writer - Received word width"]
pub type DATA_WIDTH_W<'a> = FieldWriter<'a, CONTROL_SPEC, 2, 8>;

impl<'a> EN_RX_W<'a> {
    #[inline(always)]
    pub fn variant(self, channels: RxChannels) -> &'a mut W<CONTROL_SPEC> {
        self.bits(u32::from(channels.bits()))
    }
}
impl<'a> DATA_WIDTH_W<'a> {
    #[inline(always)]
    pub fn variant(self, length: WordLength) -> &'a mut W<CONTROL_SPEC> {
        self.bits(u32::from(length.bits()))
    }
}

impl R<CONTROL_SPEC> {
    #[doc = "Bit 0 - Enable the serial clock"]
    #[inline(always)]
    pub fn en(&self) -> BitReader {
        BitReader::new(self.bits & (1 << 0) != 0)
    }
    #[doc = "Bit 1 - Enable the word select generator"]
    #[inline(always)]
    pub fn en_ws(&self) -> BitReader {
        BitReader::new(self.bits & (1 << 1) != 0)
    }
    #[doc = "Bits 2:3 - Receive channels"]
    #[inline(always)]
    pub fn en_rx(&self) -> RxChannels {
        RxChannels::from_bits(((self.bits >> 2) & 0b11) as u8)
    }
    #[doc = "Bit 4 - Watermark interrupt enable"]
    #[inline(always)]
    pub fn intr_en(&self) -> BitReader {
        BitReader::new(self.bits & (1 << 4) != 0)
    }
    #[doc = "Bit 5 - Watermark counter enable"]
    #[inline(always)]
    pub fn en_watermark(&self) -> BitReader {
        BitReader::new(self.bits & (1 << 5) != 0)
    }
    #[doc = "Bit 6 - Watermark counter reset"]
    #[inline(always)]
    pub fn reset_watermark(&self) -> BitReader {
        BitReader::new(self.bits & (1 << 6) != 0)
    }
    #[doc = "Bit 7 - Connect the signals to the pads"]
    #[inline(always)]
    pub fn en_io(&self) -> BitReader {
        BitReader::new(self.bits & (1 << 7) != 0)
    }
    #[doc = "Bits 8:9 - Received word width"]
    #[inline(always)]
    pub fn data_width(&self) -> WordLength {
        WordLength::from_bits(((self.bits >> 8) & 0b11) as u8)
    }
}
impl W<CONTROL_SPEC> {
    #[doc = "Bit 0 - Enable the serial clock"]
    #[inline(always)]
    pub fn en(&mut self) -> EN_W<'_> {
        EN_W::new(self)
    }
    #[doc = "Bit 1 - Enable the word select generator"]
    #[inline(always)]
    pub fn en_ws(&mut self) -> EN_WS_W<'_> {
        EN_WS_W::new(self)
    }
    #[doc = "Bits 2:3 - Receive channels"]
    #[inline(always)]
    pub fn en_rx(&mut self) -> EN_RX_W<'_> {
        EN_RX_W::new(self)
    }
    #[doc = "Bit 4 - Watermark interrupt enable"]
    #[inline(always)]
    pub fn intr_en(&mut self) -> INTR_EN_W<'_> {
        INTR_EN_W::new(self)
    }
    #[doc = "Bit 5 - Watermark counter enable"]
    #[inline(always)]
    pub fn en_watermark(&mut self) -> EN_WATERMARK_W<'_> {
        EN_WATERMARK_W::new(self)
    }
    #[doc = "Bit 6 - Watermark counter reset"]
    #[inline(always)]
    pub fn reset_watermark(&mut self) -> RESET_WATERMARK_W<'_> {
        RESET_WATERMARK_W::new(self)
    }
    #[doc = "Bit 7 - Connect the signals to the pads"]
    #[inline(always)]
    pub fn en_io(&mut self) -> EN_IO_W<'_> {
        EN_IO_W::new(self)
    }
    #[doc = "Bits 8:9 - Received word width"]
    #[inline(always)]
    pub fn data_width(&mut self) -> DATA_WIDTH_W<'_> {
        DATA_WIDTH_W::new(self)
    }
}

#[doc = "WATERMARK register"]
pub struct WATERMARK_SPEC;
impl RegisterSpec for WATERMARK_SPEC {}
impl Readable for WATERMARK_SPEC {}
impl Writable for WATERMARK_SPEC {}
#[doc = "Field `WATERMARK` writer - Counter threshold"]
pub type WATERMARK_W<'a> = FieldWriter<'a, WATERMARK_SPEC, 16, 0>;
impl R<WATERMARK_SPEC> {
    #[doc = "Bits 0:15 - Counter threshold"]
    #[inline(always)]
    pub fn watermark(&self) -> u16 {
        self.bits as u16
    }
}
impl W<WATERMARK_SPEC> {
    #[doc = "Bits 0:15 - Counter threshold"]
    #[inline(always)]
    pub fn watermark(&mut self) -> WATERMARK_W<'_> {
        WATERMARK_W::new(self)
    }
}

#[doc = "WATERLEVEL register"]
pub struct WATERLEVEL_SPEC;
impl RegisterSpec for WATERLEVEL_SPEC {}
impl Readable for WATERLEVEL_SPEC {}
impl R<WATERLEVEL_SPEC> {
    #[doc = "Bits 0:15 - Counter value"]
    #[inline(always)]
    pub fn waterlevel(&self) -> u16 {
        self.bits as u16
    }
}

#[doc = "STATUS register"]
pub struct STATUS_SPEC;
impl RegisterSpec for STATUS_SPEC {}
impl Readable for STATUS_SPEC {}
impl R<STATUS_SPEC> {
    #[doc = "Bit 0 - The receive FIFO holds at least one word"]
    #[inline(always)]
    pub fn rx_data_ready(&self) -> BitReader {
        BitReader::new(self.bits & (1 << 0) != 0)
    }
    #[doc = "Bit 1 - At least one word was dropped"]
    #[inline(always)]
    pub fn rx_overflow(&self) -> BitReader {
        BitReader::new(self.bits & (1 << 1) != 0)
    }
}

#[doc = "RXDATA register"]
pub struct RXDATA_SPEC;
impl RegisterSpec for RXDATA_SPEC {}
impl Readable for RXDATA_SPEC {}
