use crate::cpu::{Bus8080, Cpu8080};

impl Cpu8080 {
    pub(super) fn exec_lxi<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!(matches!(opcode, 0x01 | 0x11 | 0x21 | 0x31));
        let value = self.fetch_word(bus);
        self.write_pair_sp(opcode >> 4, value);
    }

    pub(super) fn exec_mvi<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        let value = self.fetch_byte(bus);
        self.write_reg8(bus, opcode >> 3, value);
    }

    pub(super) fn exec_mov<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!((0x40..=0x7F).contains(&opcode) && opcode != 0x76);
        let value = self.read_reg8(bus, opcode);
        self.write_reg8(bus, opcode >> 3, value);
    }

    pub(super) fn exec_stax<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        let addr = match opcode {
            0x02 => self.regs.bc(),
            0x12 => self.regs.de(),
            _ => unreachable!(),
        };
        bus.write_byte(addr, self.regs.a);
    }

    pub(super) fn exec_ldax<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        let addr = match opcode {
            0x0A => self.regs.bc(),
            0x1A => self.regs.de(),
            _ => unreachable!(),
        };
        self.regs.a = bus.read_byte(addr);
    }

    pub(super) fn exec_sta<B: Bus8080>(&mut self, bus: &mut B) {
        let addr = self.fetch_word(bus);
        bus.write_byte(addr, self.regs.a);
    }

    pub(super) fn exec_lda<B: Bus8080>(&mut self, bus: &mut B) {
        let addr = self.fetch_word(bus);
        self.regs.a = bus.read_byte(addr);
    }

    /// SHLD a16: L goes to the lower address, H to the next one.
    pub(super) fn exec_shld<B: Bus8080>(&mut self, bus: &mut B) {
        let addr = self.fetch_word(bus);
        self.write_word(bus, addr, self.regs.hl());
    }

    pub(super) fn exec_lhld<B: Bus8080>(&mut self, bus: &mut B) {
        let addr = self.fetch_word(bus);
        let value = self.read_word(bus, addr);
        self.regs.set_hl(value);
    }

    pub(super) fn exec_xchg(&mut self) {
        std::mem::swap(&mut self.regs.d, &mut self.regs.h);
        std::mem::swap(&mut self.regs.e, &mut self.regs.l);
    }
}
