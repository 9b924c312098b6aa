use crate::cpu::{Bus8080, Cpu8080};

impl Cpu8080 {
    pub(super) fn exec_push<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!(matches!(opcode, 0xC5 | 0xD5 | 0xE5 | 0xF5));

        let value = match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.regs.hl(),
            _ => self.psw(),
        };

        self.push_u16(bus, value);
    }

    pub(super) fn exec_pop<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!(matches!(opcode, 0xC1 | 0xD1 | 0xE1 | 0xF1));

        let value = self.pop_u16(bus);
        match (opcode >> 4) & 0x03 {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.regs.set_hl(value),
            _ => self.set_psw(value),
        }
    }

    /// RST n: call the fixed vector 8 * n.
    pub(super) fn exec_rst<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert_eq!(opcode & 0xC7, 0xC7);

        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = (opcode & 0x38) as u16;
    }

    /// XTHL: swap HL with the word at the top of the stack.
    pub(super) fn exec_xthl<B: Bus8080>(&mut self, bus: &mut B) {
        let sp = self.regs.sp;
        let top = self.read_word(bus, sp);
        self.write_word(bus, sp, self.regs.hl());
        self.regs.set_hl(top);
    }

    pub(super) fn exec_sphl(&mut self) {
        self.regs.sp = self.regs.hl();
    }
}
