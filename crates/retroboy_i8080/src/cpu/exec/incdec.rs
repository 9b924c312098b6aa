use crate::cpu::{Bus8080, Cpu8080};

impl Cpu8080 {
    pub(super) fn exec_inr<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        let index = opcode >> 3;
        let value = self.read_reg8(bus, index);
        let result = self.alu_inr(value);
        self.write_reg8(bus, index, result);
    }

    pub(super) fn exec_dcr<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        let index = opcode >> 3;
        let value = self.read_reg8(bus, index);
        let result = self.alu_dcr(value);
        self.write_reg8(bus, index, result);
    }

    /// INX rp. Unlike INR, no flags are touched.
    pub(super) fn exec_inx(&mut self, opcode: u8) {
        debug_assert!(matches!(opcode, 0x03 | 0x13 | 0x23 | 0x33));
        let index = opcode >> 4;
        let value = self.read_pair_sp(index).wrapping_add(1);
        self.write_pair_sp(index, value);
    }

    /// DCX rp. Unlike DCR, no flags are touched.
    pub(super) fn exec_dcx(&mut self, opcode: u8) {
        debug_assert!(matches!(opcode, 0x0B | 0x1B | 0x2B | 0x3B));
        let index = opcode >> 4;
        let value = self.read_pair_sp(index).wrapping_sub(1);
        self.write_pair_sp(index, value);
    }
}
