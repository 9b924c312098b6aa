//! Intel 8080 disassembler.
//!
//! Decodes instructions without executing them. The length table here is the
//! same one the engine follows implicitly when it consumes operand bytes, so a
//! linear sweep lands on the same instruction boundaries as execution does.

use std::fmt;

use lazy_static::lazy_static;

use crate::cpu::Bus8080;

/// Instruction length in bytes (opcode plus operands) for every opcode.
#[rustfmt::skip]
const OPCODE_LENGTHS: [u8; 256] = [
//  0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F
    1, 3, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 0
    1, 3, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 1
    1, 3, 3, 1, 1, 1, 2, 1, 1, 1, 3, 1, 1, 1, 2, 1, // 2
    1, 3, 3, 1, 1, 1, 2, 1, 1, 1, 3, 1, 1, 1, 2, 1, // 3
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 4
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 5
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 6
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 7
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 8
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 9
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // A
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // B
    1, 1, 3, 3, 3, 1, 2, 1, 1, 1, 3, 3, 3, 3, 2, 1, // C
    1, 1, 3, 2, 3, 1, 2, 1, 1, 1, 3, 2, 3, 1, 2, 1, // D
    1, 1, 3, 1, 3, 1, 2, 1, 1, 1, 3, 1, 3, 1, 2, 1, // E
    1, 1, 3, 1, 3, 1, 2, 1, 1, 1, 3, 1, 3, 1, 2, 1, // F
];

const REG: [&str; 8] = ["B", "C", "D", "E", "H", "L", "M", "A"];
const PAIR_SP: [&str; 4] = ["B", "D", "H", "SP"];
const PAIR_PSW: [&str; 4] = ["B", "D", "H", "PSW"];
const COND: [&str; 8] = ["NZ", "Z", "NC", "C", "PO", "PE", "P", "M"];
const ALU: [&str; 8] = ["ADD", "ADC", "SUB", "SBB", "ANA", "XRA", "ORA", "CMP"];
const ALU_IMM: [&str; 8] = ["ADI", "ACI", "SUI", "SBI", "ANI", "XRI", "ORI", "CPI"];
const ACC_MISC: [&str; 8] = ["RLC", "RRC", "RAL", "RAR", "DAA", "CMA", "STC", "CMC"];

lazy_static! {
    static ref MNEMONICS: Vec<String> = (0..=u8::MAX).map(build_mnemonic).collect();
}

/// Build the mnemonic for `opcode` from its encoding fields.
///
/// Undocumented opcodes are prefixed with `*` and named after the
/// instruction they behave like.
fn build_mnemonic(opcode: u8) -> String {
    let dst = ((opcode >> 3) & 0x07) as usize;
    let src = (opcode & 0x07) as usize;
    let rp = ((opcode >> 4) & 0x03) as usize;
    let odd = (opcode & 0x08) != 0;

    match opcode {
        0x00 => "NOP".into(),
        0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 | 0xDD | 0xED | 0xFD => "*NOP".into(),
        0xCB => "*JMP".into(),
        0xD9 => "*RET".into(),
        0x76 => "HLT".into(),
        0x40..=0x7F => format!("MOV {},{}", REG[dst], REG[src]),
        0x80..=0xBF => format!("{} {}", ALU[dst], REG[src]),
        0x00..=0x3F => match src {
            1 if odd => format!("DAD {}", PAIR_SP[rp]),
            1 => format!("LXI {}", PAIR_SP[rp]),
            2 => match opcode {
                0x02 => "STAX B".into(),
                0x12 => "STAX D".into(),
                0x22 => "SHLD".into(),
                0x32 => "STA".into(),
                0x0A => "LDAX B".into(),
                0x1A => "LDAX D".into(),
                0x2A => "LHLD".into(),
                _ => "LDA".into(),
            },
            3 if odd => format!("DCX {}", PAIR_SP[rp]),
            3 => format!("INX {}", PAIR_SP[rp]),
            4 => format!("INR {}", REG[dst]),
            5 => format!("DCR {}", REG[dst]),
            6 => format!("MVI {}", REG[dst]),
            _ => ACC_MISC[dst].into(),
        },
        _ => match src {
            0 => format!("R{}", COND[dst]),
            1 if !odd => format!("POP {}", PAIR_PSW[rp]),
            1 => match opcode {
                0xC9 => "RET".into(),
                0xE9 => "PCHL".into(),
                _ => "SPHL".into(),
            },
            2 => format!("J{}", COND[dst]),
            3 => match opcode {
                0xC3 => "JMP".into(),
                0xD3 => "OUT".into(),
                0xDB => "IN".into(),
                0xE3 => "XTHL".into(),
                0xEB => "XCHG".into(),
                0xF3 => "DI".into(),
                _ => "EI".into(),
            },
            4 => format!("C{}", COND[dst]),
            5 if !odd => format!("PUSH {}", PAIR_PSW[rp]),
            5 => "CALL".into(),
            6 => ALU_IMM[dst].into(),
            _ => format!("RST {}", dst),
        },
    }
}

/// Length in bytes of the instruction starting with `opcode`.
#[inline]
pub fn opcode_length(opcode: u8) -> u8 {
    OPCODE_LENGTHS[opcode as usize]
}

/// Mnemonic (with register operands, without immediates) for `opcode`.
pub fn mnemonic(opcode: u8) -> &'static str {
    let table: &'static [String] = &MNEMONICS;
    table[opcode as usize].as_str()
}

/// Immediate operand carried by an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    None,
    Byte(u8),
    Word(u16),
}

/// A single decoded instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Address of the opcode byte.
    pub address: u16,
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub operand: Operand,
}

impl Instruction {
    /// Total size in bytes (1–3).
    #[inline]
    pub fn size(&self) -> u8 {
        opcode_length(self.opcode)
    }

    /// Address of the instruction that follows this one in memory.
    #[inline]
    pub fn next_address(&self) -> u16 {
        self.address.wrapping_add(self.size() as u16)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Register operands are already part of the mnemonic; an immediate
        // follows them after a comma, or stands alone after a space.
        let sep = if self.mnemonic.contains(' ') { ',' } else { ' ' };
        match self.operand {
            Operand::None => f.write_str(self.mnemonic),
            Operand::Byte(value) => write!(f, "{}{}{:02X}h", self.mnemonic, sep, value),
            Operand::Word(value) => write!(f, "{}{}{:04X}h", self.mnemonic, sep, value),
        }
    }
}

/// Decode the instruction at `addr` without executing it.
///
/// Bytes are fetched with [`Bus8080::peek_byte`].
pub fn decode<B: Bus8080 + ?Sized>(bus: &mut B, addr: u16) -> Instruction {
    let opcode = bus.peek_byte(addr);
    let operand = match opcode_length(opcode) {
        2 => Operand::Byte(bus.peek_byte(addr.wrapping_add(1))),
        3 => {
            let lo = bus.peek_byte(addr.wrapping_add(1));
            let hi = bus.peek_byte(addr.wrapping_add(2));
            Operand::Word(u16::from_le_bytes([lo, hi]))
        }
        _ => Operand::None,
    };

    Instruction {
        address: addr,
        opcode,
        mnemonic: mnemonic(opcode),
        operand,
    }
}

/// Read-only view of a byte slice placed at `origin`. Bytes outside the
/// slice read as 0.
struct SliceBus<'a> {
    bytes: &'a [u8],
    origin: u16,
}

impl Bus8080 for SliceBus<'_> {
    fn read_byte(&mut self, addr: u16) -> u8 {
        let offset = addr.wrapping_sub(self.origin) as usize;
        self.bytes.get(offset).copied().unwrap_or(0)
    }

    fn write_byte(&mut self, _addr: u16, _value: u8) {}
}

/// Disassemble `bytes` as if loaded at `origin`, using a linear sweep.
pub fn disassemble(bytes: &[u8], origin: u16) -> Vec<Instruction> {
    let mut bus = SliceBus { bytes, origin };
    let mut instructions = Vec::new();
    let mut offset = 0usize;

    while offset < bytes.len() {
        let instruction = decode(&mut bus, origin.wrapping_add(offset as u16));
        offset += instruction.size() as usize;
        instructions.push(instruction);
    }

    instructions
}
