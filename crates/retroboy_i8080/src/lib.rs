pub mod cpu;
pub mod disasm;
pub mod machine;
pub mod memory;

pub use cpu::{Bus8080, Cpu8080, Flags, FnBus, Registers};
pub use disasm::{Instruction, Operand};
pub use machine::{Machine, RunOutcome};
pub use memory::{FlatMemory, LoadError};

/// Size of the 8080 address space in bytes (64 KiB).
pub const ADDRESS_SPACE: usize = 0x10000;
/// Number of addressable IO ports.
pub const NUM_PORTS: usize = 0x100;
