use crate::cpu::{Bus8080, Cpu8080, FnBus};
use crate::disasm::{self, Instruction};

/// Per-step observer. Sees the CPU state and the instruction about to run.
pub type TraceHook = Box<dyn FnMut(&Cpu8080, &Instruction)>;

/// Why [`Machine::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The CPU executed HLT.
    Halted,
    /// The host stop condition returned true.
    Stopped,
    /// The step budget ran out first.
    StepLimit,
}

/// An 8080 core bound to the bus it executes against.
pub struct Machine<B: Bus8080> {
    cpu: Cpu8080,
    bus: B,
    trace: Option<TraceHook>,
}

impl<B: Bus8080> Machine<B> {
    /// Construct a machine in reset state that starts fetching at `reset_pc`.
    pub fn new(reset_pc: u16, bus: B) -> Self {
        Self {
            cpu: Cpu8080::new(reset_pc),
            bus,
            trace: None,
        }
    }

    /// Execute one instruction.
    pub fn step(&mut self) {
        if let Some(trace) = self.trace.as_mut() {
            let instruction = disasm::decode(&mut self.bus, self.cpu.regs.pc);
            trace(&self.cpu, &instruction);
        }
        self.cpu.step(&mut self.bus);
    }

    /// Step until an instruction executes HLT, `stop` returns true, or
    /// `max_steps` instructions have run. `stop` is checked before every
    /// instruction.
    ///
    /// A CPU that is already halted is stepped like any other, so a host that
    /// moved PC off the HLT resumes there. Left on the HLT, the next step
    /// executes it again and the run returns `Halted` after one step.
    ///
    /// Returns why execution ended and how many instructions ran.
    pub fn run<F>(&mut self, max_steps: u64, mut stop: F) -> (RunOutcome, u64)
    where
        F: FnMut(&Cpu8080) -> bool,
    {
        let mut steps = 0u64;
        loop {
            if stop(&self.cpu) {
                return (RunOutcome::Stopped, steps);
            }
            if steps >= max_steps {
                return (RunOutcome::StepLimit, steps);
            }
            self.step();
            steps += 1;
            if self.cpu.is_halted() {
                return (RunOutcome::Halted, steps);
            }
        }
    }

    /// Install a hook called before every instruction.
    ///
    /// The hook only observes. Decoding for it goes through
    /// [`Bus8080::peek_byte`], never `read_byte`, so a bus that overrides
    /// `peek_byte` sees exactly the accesses of an untraced run.
    pub fn set_trace_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&Cpu8080, &Instruction) + 'static,
    {
        self.trace = Some(Box::new(hook));
    }

    pub fn clear_trace_hook(&mut self) {
        self.trace = None;
    }

    pub fn cpu(&self) -> &Cpu8080 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu8080 {
        &mut self.cpu
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Reset the CPU to `reset_pc`, keeping the bus contents.
    pub fn reset(&mut self, reset_pc: u16) {
        self.cpu.reset(reset_pc);
    }

    pub fn into_parts(self) -> (Cpu8080, B) {
        (self.cpu, self.bus)
    }
}

impl<R, W> Machine<FnBus<R, W>>
where
    R: FnMut(u16) -> u8,
    W: FnMut(u16, u8),
{
    /// Construct a machine from a pair of memory callbacks.
    pub fn with_callbacks(reset_pc: u16, read_byte: R, write_byte: W) -> Self {
        Self::new(reset_pc, FnBus::new(read_byte, write_byte))
    }
}
