mod alu;
mod bus;
mod exec;
mod helpers;
mod regs;


pub use bus::{Bus8080, FnBus};
pub use regs::{Flags, PswBits, Registers};

use crate::disasm;

/// Opcode of HLT.
pub const HLT: u8 = 0x76;

/// Intel 8080 CPU core.
///
/// Holds the visible architectural state only. Memory and IO ports are
/// reached through a [`Bus8080`] passed to [`Cpu8080::step`], so one core can
/// be driven against any host memory without owning it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cpu8080 {
    pub regs: Registers,
    pub flags: Flags,
    /// Interrupt enable flip-flop, toggled by EI/DI.
    pub interrupts_enabled: bool,
    /// Set while PC is parked on an executed HLT.
    pub halted: bool,
}

impl Cpu8080 {
    /// Create a CPU in reset state that starts fetching at `reset_pc`.
    pub fn new(reset_pc: u16) -> Self {
        let mut cpu = Self::default();
        cpu.regs.pc = reset_pc;
        cpu
    }

    /// Reset all registers and flags, then point PC at `reset_pc`.
    pub fn reset(&mut self, reset_pc: u16) {
        *self = Self::new(reset_pc);
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Accumulator and packed flags as a single word (A in the high byte).
    #[inline]
    pub fn psw(&self) -> u16 {
        u16::from_be_bytes([self.regs.a, self.flags.to_psw()])
    }

    #[inline]
    pub fn set_psw(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.regs.a = a;
        self.flags = Flags::from_psw(f);
    }

    /// Fetch, decode and execute exactly one instruction.
    pub fn step<B: Bus8080>(&mut self, bus: &mut B) {
        if log::log_enabled!(log::Level::Trace) {
            let pc = self.regs.pc;
            let instruction = disasm::decode(bus, pc);
            log::trace!("{:04X}  {:<14} {}", pc, instruction.to_string(), self);
        }

        let opcode = self.fetch_byte(bus);
        if opcode != HLT {
            self.halted = false;
        }
        self.exec_opcode(bus, opcode);
    }
}

impl std::fmt::Display for Cpu8080 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = &self.regs;
        write!(
            f,
            "A={:02X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} PC={:04X} {}",
            r.a,
            r.bc(),
            r.de(),
            r.hl(),
            r.sp,
            r.pc,
            self.flags
        )
    }
}
