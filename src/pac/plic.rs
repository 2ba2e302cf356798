use super::generic::*;
use crate::Mmio;

/// Number of interrupt sources, including the reserved source 0
pub const NUM_SRC: usize = 64;
/// Number of bit coded registers (one bit per source)
pub const NUM_BIT_REGS: usize = NUM_SRC / 32;
/// Largest value of a priority or threshold field
pub const PRIO_MASK: u32 = 0x7;

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
    #[doc = "0x000 + 4 * n - Priority of source n"]
    #[inline(always)]
    pub fn prio(&self, n: usize) -> Reg<'_, M, PRIO_SPEC> {
        debug_assert!(n < NUM_SRC);
        Reg::new(&self.bus, 4 * n)
    }
    #[doc = "0x100 + 4 * n - Pending bits of sources 32n to 32n + 31"]
    #[inline(always)]
    pub fn ip(&self, n: usize) -> Reg<'_, M, IP_SPEC> {
        debug_assert!(n < NUM_BIT_REGS);
        Reg::new(&self.bus, 0x100 + 4 * n)
    }
    #[doc = "0x108 + 4 * n - Trigger type bits of sources 32n to 32n + 31, 1 is edge"]
    #[inline(always)]
    pub fn le(&self, n: usize) -> Reg<'_, M, LE_SPEC> {
        debug_assert!(n < NUM_BIT_REGS);
        Reg::new(&self.bus, 0x108 + 4 * n)
    }
    #[doc = "0x200 + 4 * n - Target 0 enable bits of sources 32n to 32n + 31"]
    #[inline(always)]
    pub fn ie0(&self, n: usize) -> Reg<'_, M, IE0_SPEC> {
        debug_assert!(n < NUM_BIT_REGS);
        Reg::new(&self.bus, 0x200 + 4 * n)
    }
    #[doc = "0x208 - Target 0 priority threshold"]
    #[inline(always)]
    pub fn threshold0(&self) -> Reg<'_, M, THRESHOLD0_SPEC> {
        Reg::new(&self.bus, 0x208)
    }
    #[doc = "0x20c - Target 0 claim/complete"]
    #[inline(always)]
    pub fn cc0(&self) -> Reg<'_, M, CC0_SPEC> {
        Reg::new(&self.bus, 0x20c)
    }
    #[doc = "0x210 - Target 0 software interrupt"]
    #[inline(always)]
    pub fn msip0(&self) -> Reg<'_, M, MSIP0_SPEC> {
        Reg::new(&self.bus, 0x210)
    }
}

/// Register index and bit position of `source` in a bit coded register array
#[inline(always)]
pub const fn bit_position(source: u32) -> (usize, u32) {
    ((source / 32) as usize, source % 32)
}

#[doc = "PRIOn register"]
pub struct PRIO_SPEC;
impl RegisterSpec for PRIO_SPEC {}
impl Readable for PRIO_SPEC {}
impl Writable for PRIO_SPEC {}
#[doc = "Field `PRIO` writer - Bits 0:2"]
pub type PRIO_W<'a> = FieldWriter<'a, PRIO_SPEC, 3, 0>;
impl R<PRIO_SPEC> {
    #[inline(always)]
    pub fn prio(&self) -> u32 {
        self.bits & PRIO_MASK
    }
}
impl W<PRIO_SPEC> {
    #[inline(always)]
    pub fn prio(&mut self) -> PRIO_W<'_> {
        PRIO_W::new(self)
    }
}

#[doc = "THRESHOLD0 register"]
pub struct THRESHOLD0_SPEC;
impl RegisterSpec for THRESHOLD0_SPEC {}
impl Readable for THRESHOLD0_SPEC {}
impl Writable for THRESHOLD0_SPEC {}
#[doc = "Field `THRESHOLD0` writer - Bits 0:2"]
pub type THRESHOLD0_W<'a> = FieldWriter<'a, THRESHOLD0_SPEC, 3, 0>;
impl R<THRESHOLD0_SPEC> {
    #[inline(always)]
    pub fn threshold0(&self) -> u32 {
        self.bits & PRIO_MASK
    }
}
impl W<THRESHOLD0_SPEC> {
    #[inline(always)]
    pub fn threshold0(&mut self) -> THRESHOLD0_W<'_> {
        THRESHOLD0_W::new(self)
    }
}

/// Bit coded registers: one bit per source
macro_rules! bit_array_register {
    ($(#[$doc:meta] $spec:ident, writable: $writable:tt;)*) => {
        $(
            #[$doc]
            pub struct $spec;
            impl RegisterSpec for $spec {}
            impl Readable for $spec {}
            bit_array_register!(@writable $spec, $writable);
            impl R<$spec> {
                /// State of bit `n`
                #[inline(always)]
                pub fn bit(&self, n: u32) -> BitReader {
                    BitReader::new(self.bits & (1 << n) != 0)
                }
            }
        )*
    };
    (@writable $spec:ident, true) => {
        impl Writable for $spec {}
        impl W<$spec> {
            /// Writer of bit `n`
            #[inline(always)]
            pub fn set(&mut self, n: u32, value: bool) -> &mut Self {
                self.bits = (self.bits & !(1 << n)) | (u32::from(value) << n);
                self
            }
        }
    };
    (@writable $spec:ident, false) => {};
}

bit_array_register! {
    #[doc = "IP_n register"] IP_SPEC, writable: false;
    #[doc = "LE_n register"] LE_SPEC, writable: true;
    #[doc = "IE0_n register"] IE0_SPEC, writable: true;
}

#[doc = "CC0 register"]
pub struct CC0_SPEC;
impl RegisterSpec for CC0_SPEC {}
impl Readable for CC0_SPEC {}
impl Writable for CC0_SPEC {}
#[doc = "Field `CC0` writer - Bits 0:5"]
pub type CC0_W<'a> = FieldWriter<'a, CC0_SPEC, 6, 0>;
impl R<CC0_SPEC> {
    #[doc = "Bits 0:5 - Highest priority pending source, 0 when there is none"]
    #[inline(always)]
    pub fn cc0(&self) -> u32 {
        self.bits & 0x3f
    }
}
impl W<CC0_SPEC> {
    #[doc = "Bits 0:5 - Source whose servicing is complete"]
    #[inline(always)]
    pub fn cc0(&mut self) -> CC0_W<'_> {
        CC0_W::new(self)
    }
}

#[doc = "MSIP0 register"]
pub struct MSIP0_SPEC;
impl RegisterSpec for MSIP0_SPEC {}
impl Readable for MSIP0_SPEC {}
impl Writable for MSIP0_SPEC {}
#[doc = "Field `MSIP0` writer - Bit 0"]
pub type MSIP0_W<'a> = BitWriter<'a, MSIP0_SPEC, 0>;
impl R<MSIP0_SPEC> {
    #[inline(always)]
    pub fn msip0(&self) -> BitReader {
        BitReader::new(self.bits & 1 != 0)
    }
}
impl W<MSIP0_SPEC> {
    #[inline(always)]
    pub fn msip0(&mut self) -> MSIP0_W<'_> {
        MSIP0_W::new(self)
    }
}
