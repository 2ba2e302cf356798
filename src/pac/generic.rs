use core::marker::PhantomData;

use crate::Mmio;

/// Raw register type
pub trait RegisterSpec {
    /// Value a `write` starts from
    const RESET_VALUE: u32 = 0;
}

/// Trait implemented by readable registers to enable the `read` method.
pub trait Readable: RegisterSpec {}

/// Trait implemented by writeable registers to enable the `write` and `reset` methods.
pub trait Writable: RegisterSpec {}

/// One register of a block, identified by its byte offset on the bus.
pub struct Reg<'a, M: ?Sized, REG> {
    bus: &'a M,
    offset: usize,
    _reg: PhantomData<REG>,
}

impl<'a, M, REG> Reg<'a, M, REG>
where
    M: Mmio + ?Sized,
    REG: RegisterSpec,
{
    #[inline(always)]
    pub(crate) fn new(bus: &'a M, offset: usize) -> Self {
        Reg {
            bus,
            offset,
            _reg: PhantomData,
        }
    }

    /// Byte offset of the register inside its block
    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bus address of the register
    #[inline(always)]
    pub fn address(&self) -> usize {
        self.bus.base_addr() + self.offset
    }
}

impl<'a, M, REG> Reg<'a, M, REG>
where
    M: Mmio + ?Sized,
    REG: Readable,
{
    /// Reads the contents of the register.
    #[inline(always)]
    pub fn read(&self) -> R<REG> {
        R::new(self.bus.read32(self.offset))
    }
}

impl<'a, M, REG> Reg<'a, M, REG>
where
    M: Mmio + ?Sized,
    REG: Writable,
{
    /// Writes the reset value to the register.
    #[inline(always)]
    pub fn reset(&self) {
        self.bus.write32(self.offset, REG::RESET_VALUE)
    }

    /// Writes bits to the register, starting from the reset value.
    #[inline(always)]
    pub fn write<F>(&self, f: F)
    where
        F: FnOnce(&mut W<REG>) -> &mut W<REG>,
    {
        let mut w = W::new(REG::RESET_VALUE);
        f(&mut w);
        self.bus.write32(self.offset, w.bits);
    }
}

impl<'a, M, REG> Reg<'a, M, REG>
where
    M: Mmio + ?Sized,
    REG: Readable + Writable,
{
    /// Reads the register once, lets the closure change the snapshot, and writes it back.
    ///
    /// Bits not touched by the closure are written back with the value that was read.
    #[inline(always)]
    pub fn modify<F>(&self, f: F)
    where
        for<'w> F: FnOnce(&R<REG>, &'w mut W<REG>) -> &'w mut W<REG>,
    {
        let bits = self.bus.read32(self.offset);
        let r = R::new(bits);
        let mut w = W::new(bits);
        f(&r, &mut w);
        self.bus.write32(self.offset, w.bits);
    }
}

/// Register reader, a snapshot of the register value
pub struct R<REG> {
    pub(crate) bits: u32,
    _reg: PhantomData<REG>,
}

impl<REG> R<REG> {
    #[inline(always)]
    pub(crate) fn new(bits: u32) -> Self {
        R {
            bits,
            _reg: PhantomData,
        }
    }

    /// Reads raw bits from register.
    #[inline(always)]
    pub fn bits(&self) -> u32 {
        self.bits
    }
}

/// Register writer, the value that will be written
pub struct W<REG> {
    pub(crate) bits: u32,
    _reg: PhantomData<REG>,
}

impl<REG> W<REG> {
    #[inline(always)]
    pub(crate) fn new(bits: u32) -> Self {
        W {
            bits,
            _reg: PhantomData,
        }
    }

    /// Writes raw bits to the register.
    ///
    /// # Safety
    ///
    /// Every field of the register is overwritten, including the ones with encoded values.
    #[inline(always)]
    pub unsafe fn bits(&mut self, bits: u32) -> &mut Self {
        self.bits = bits;
        self
    }
}

/// Single bit read from a register snapshot
pub struct BitReader {
    bits: bool,
}

impl BitReader {
    #[inline(always)]
    pub(crate) fn new(bits: bool) -> Self {
        BitReader { bits }
    }
    #[inline(always)]
    pub fn bit(&self) -> bool {
        self.bits
    }
    #[inline(always)]
    pub fn bit_is_set(&self) -> bool {
        self.bits
    }
    #[inline(always)]
    pub fn bit_is_clear(&self) -> bool {
        !self.bits
    }
}

/// Writer of the single bit at offset `O`
pub struct BitWriter<'a, REG, const O: u8> {
    w: &'a mut W<REG>,
}

impl<'a, REG, const O: u8> BitWriter<'a, REG, O> {
    #[inline(always)]
    pub(crate) fn new(w: &'a mut W<REG>) -> Self {
        BitWriter { w }
    }

    /// Writes bit to the field
    #[inline(always)]
    pub fn bit(self, value: bool) -> &'a mut W<REG> {
        self.w.bits = (self.w.bits & !(1u32 << O)) | ((value as u32) << O);
        self.w
    }
    /// Sets the field bit
    #[inline(always)]
    pub fn set_bit(self) -> &'a mut W<REG> {
        self.bit(true)
    }
    /// Clears the field bit
    #[inline(always)]
    pub fn clear_bit(self) -> &'a mut W<REG> {
        self.bit(false)
    }
}

/// Writer of the `WI` bits wide field at offset `O`
pub struct FieldWriter<'a, REG, const WI: u8, const O: u8> {
    w: &'a mut W<REG>,
}

impl<'a, REG, const WI: u8, const O: u8> FieldWriter<'a, REG, WI, O> {
    /// Mask of the field, before shifting
    pub const MASK: u32 = u32::MAX >> (32 - WI as u32);

    #[inline(always)]
    pub(crate) fn new(w: &'a mut W<REG>) -> Self {
        FieldWriter { w }
    }

    /// Writes raw bits to the field. Bits above the field width are dropped.
    #[inline(always)]
    pub fn bits(self, value: u32) -> &'a mut W<REG> {
        self.w.bits = (self.w.bits & !(Self::MASK << O)) | ((value & Self::MASK) << O);
        self.w
    }
}
