use crate::cpu::{Bus8080, Cpu8080};

impl Cpu8080 {
    /// HLT: park PC back on the HLT opcode.
    ///
    /// Every later step fetches HLT again, so PC stays put until the host
    /// moves it. Interrupt delivery, which would resume a real 8080, is not
    /// modelled.
    pub(super) fn exec_hlt(&mut self) {
        self.regs.pc = self.regs.pc.wrapping_sub(1);
        if !self.halted {
            log::debug!("HLT at {:04X}", self.regs.pc);
        }
        self.halted = true;
    }

    pub(super) fn exec_di(&mut self) {
        self.interrupts_enabled = false;
    }

    pub(super) fn exec_ei(&mut self) {
        self.interrupts_enabled = true;
    }

    /// IN port. Without a device on the port, A is left unchanged.
    pub(super) fn exec_in<B: Bus8080>(&mut self, bus: &mut B) {
        let port = self.fetch_byte(bus);
        if let Some(value) = bus.port_in(port) {
            self.regs.a = value;
        }
    }

    pub(super) fn exec_out<B: Bus8080>(&mut self, bus: &mut B) {
        let port = self.fetch_byte(bus);
        bus.port_out(port, self.regs.a);
    }
}
