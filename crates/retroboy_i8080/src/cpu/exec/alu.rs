use crate::cpu::{Bus8080, Cpu8080};

impl Cpu8080 {
    pub(super) fn exec_alu_reg_group<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!((0x80..=0xBF).contains(&opcode));
        let value = self.read_reg8(bus, opcode);
        self.alu_dispatch(opcode >> 3, value);
    }

    pub(super) fn exec_alu_imm<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!(matches!(
            opcode,
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE
        ));
        let value = self.fetch_byte(bus);
        self.alu_dispatch(opcode >> 3, value);
    }

    /// Both ALU groups encode the operation in bits 3–5.
    fn alu_dispatch(&mut self, operation: u8, value: u8) {
        match operation & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cmp(value),
        }
    }

    pub(super) fn exec_rotate_a(&mut self, opcode: u8) {
        match opcode {
            0x07 => self.alu_rlc(),
            0x0F => self.alu_rrc(),
            0x17 => self.alu_ral(),
            0x1F => self.alu_rar(),
            _ => unreachable!(),
        }
    }

    pub(super) fn exec_dad(&mut self, opcode: u8) {
        debug_assert!(matches!(opcode, 0x09 | 0x19 | 0x29 | 0x39));
        let value = self.read_pair_sp(opcode >> 4);
        self.alu_dad(value);
    }

    pub(super) fn exec_daa(&mut self) {
        self.alu_daa();
    }

    pub(super) fn exec_cma(&mut self) {
        self.regs.a = !self.regs.a;
    }

    pub(super) fn exec_stc(&mut self) {
        self.flags.cy = true;
    }

    pub(super) fn exec_cmc(&mut self) {
        self.flags.cy = !self.flags.cy;
    }
}
