use super::{Bus8080, Cpu8080};

impl Cpu8080 {
    /// Helper to read an 8-bit register or M by index.
    ///
    /// The encoding matches the 8080 opcode tables:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=M (memory at HL), 7=A.
    #[inline]
    pub(super) fn read_reg8<B: Bus8080>(&mut self, bus: &mut B, index: u8) -> u8 {
        match index & 0x07 {
            0 => self.regs.b,
            1 => self.regs.c,
            2 => self.regs.d,
            3 => self.regs.e,
            4 => self.regs.h,
            5 => self.regs.l,
            6 => bus.read_byte(self.regs.hl()),
            _ => self.regs.a,
        }
    }

    /// Helper to write an 8-bit register or M by index.
    ///
    /// The encoding matches `read_reg8`.
    #[inline]
    pub(super) fn write_reg8<B: Bus8080>(&mut self, bus: &mut B, index: u8, value: u8) {
        match index & 0x07 {
            0 => self.regs.b = value,
            1 => self.regs.c = value,
            2 => self.regs.d = value,
            3 => self.regs.e = value,
            4 => self.regs.h = value,
            5 => self.regs.l = value,
            6 => bus.write_byte(self.regs.hl(), value),
            _ => self.regs.a = value,
        }
    }

    /// Read a register pair by its opcode index: 0=BC, 1=DE, 2=HL, 3=SP.
    #[inline]
    pub(super) fn read_pair_sp(&self, index: u8) -> u16 {
        match index & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.regs.hl(),
            _ => self.regs.sp,
        }
    }

    #[inline]
    pub(super) fn write_pair_sp(&mut self, index: u8, value: u16) {
        match index & 0x03 {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.regs.set_hl(value),
            _ => self.regs.sp = value,
        }
    }

    #[inline]
    pub(super) fn fetch_byte<B: Bus8080>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read_byte(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    #[inline]
    pub(super) fn fetch_word<B: Bus8080>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch_byte(bus);
        let hi = self.fetch_byte(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Read a little-endian word at `addr` (low byte first).
    #[inline]
    pub(super) fn read_word<B: Bus8080>(&self, bus: &mut B, addr: u16) -> u16 {
        let lo = bus.read_byte(addr);
        let hi = bus.read_byte(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn write_word<B: Bus8080>(&self, bus: &mut B, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        bus.write_byte(addr, lo);
        bus.write_byte(addr.wrapping_add(1), hi);
    }

    #[inline]
    pub(super) fn push_u16<B: Bus8080>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        // Stack grows downward: memory[SP-1] = high, memory[SP-2] = low.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write_byte(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write_byte(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus8080>(&mut self, bus: &mut B) -> u16 {
        let value = self.read_word(bus, self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    /// Evaluate the condition encoded in bits 3–5 of a conditional opcode.
    #[inline]
    pub(super) fn condition(&self, cc: u8) -> bool {
        match cc & 0x07 {
            0 => !self.flags.z,  // NZ
            1 => self.flags.z,   // Z
            2 => !self.flags.cy, // NC
            3 => self.flags.cy,  // C
            4 => !self.flags.p,  // PO
            5 => self.flags.p,   // PE
            6 => !self.flags.s,  // P
            _ => self.flags.s,   // M
        }
    }

    /// Absolute jump helper used by JMP and Jcc.
    ///
    /// The address is always consumed so that a jump not taken falls through
    /// to the next instruction.
    pub(super) fn jump_cond<B: Bus8080>(&mut self, bus: &mut B, cond: bool) {
        let addr = self.fetch_word(bus);
        if cond {
            self.regs.pc = addr;
        }
    }

    /// Conditional call helper used by CALL and Ccc.
    pub(super) fn call_cond<B: Bus8080>(&mut self, bus: &mut B, cond: bool) {
        let addr = self.fetch_word(bus);
        if cond {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
        }
    }

    /// Conditional return helper used by RET and Rcc.
    pub(super) fn ret_cond<B: Bus8080>(&mut self, bus: &mut B, cond: bool) {
        if cond {
            self.regs.pc = self.pop_u16(bus);
        }
    }
}
