use crate::cpu::{Bus8080, Cpu8080};

impl Cpu8080 {
    pub(super) fn exec_jump<B: Bus8080>(&mut self, bus: &mut B) {
        self.jump_cond(bus, true);
    }

    pub(super) fn exec_jump_cc<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert_eq!(opcode & 0xC7, 0xC2);
        let taken = self.condition(opcode >> 3);
        self.jump_cond(bus, taken);
    }

    pub(super) fn exec_call<B: Bus8080>(&mut self, bus: &mut B) {
        self.call_cond(bus, true);
    }

    pub(super) fn exec_call_cc<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert_eq!(opcode & 0xC7, 0xC4);
        let taken = self.condition(opcode >> 3);
        self.call_cond(bus, taken);
    }

    pub(super) fn exec_ret<B: Bus8080>(&mut self, bus: &mut B) {
        self.ret_cond(bus, true);
    }

    pub(super) fn exec_ret_cc<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert_eq!(opcode & 0xC7, 0xC0);
        let taken = self.condition(opcode >> 3);
        self.ret_cond(bus, taken);
    }

    pub(super) fn exec_pchl(&mut self) {
        self.regs.pc = self.regs.hl();
    }
}
