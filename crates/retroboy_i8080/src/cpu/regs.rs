use bitflags::bitflags;

/// Registers for the Intel 8080.
///
/// Only the 8-bit registers are stored. BC, DE and HL are views computed
/// from their halves (high register first), so a pair can never drift from
/// the registers it is made of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }
}

bitflags! {
    /// Bit layout of the flag byte pushed and popped with the PSW.
    ///
    /// Bits 5 and 3 always read as 0, bit 1 always reads as 1.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PswBits: u8 {
        const S = 0x80;
        const Z = 0x40;
        const AC = 0x10;
        const P = 0x04;
        const ONE = 0x02;
        const CY = 0x01;
    }
}

/// CPU condition flags.
///
/// Kept as named booleans while executing; packing into the PSW byte only
/// happens at PUSH PSW / POP PSW.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub s: bool,  // sign
    pub z: bool,  // zero
    pub ac: bool, // auxiliary carry
    pub p: bool,  // parity (even)
    pub cy: bool, // carry
}

impl Flags {
    pub fn to_psw(self) -> u8 {
        let mut bits = PswBits::ONE;
        bits.set(PswBits::S, self.s);
        bits.set(PswBits::Z, self.z);
        bits.set(PswBits::AC, self.ac);
        bits.set(PswBits::P, self.p);
        bits.set(PswBits::CY, self.cy);
        bits.bits()
    }

    pub fn from_psw(value: u8) -> Self {
        let bits = PswBits::from_bits_truncate(value);
        Self {
            s: bits.contains(PswBits::S),
            z: bits.contains(PswBits::Z),
            ac: bits.contains(PswBits::AC),
            p: bits.contains(PswBits::P),
            cy: bits.contains(PswBits::CY),
        }
    }
}

impl std::fmt::Display for Flags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flag = |set: bool, name: char| if set { name } else { '.' };
        write!(
            f,
            "{}{}{}{}{}",
            flag(self.s, 'S'),
            flag(self.z, 'Z'),
            flag(self.ac, 'A'),
            flag(self.p, 'P'),
            flag(self.cy, 'C')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_pairs_round_trip() {
        let mut regs = Registers::default();
        for hi in 0..=0xFFu8 {
            for lo in 0..=0xFFu8 {
                let value = u16::from_be_bytes([hi, lo]);

                regs.set_bc(value);
                assert_eq!((regs.b, regs.c), (hi, lo));
                assert_eq!(regs.bc(), value);

                regs.set_de(value);
                assert_eq!((regs.d, regs.e), (hi, lo));
                assert_eq!(regs.de(), value);

                regs.set_hl(value);
                assert_eq!((regs.h, regs.l), (hi, lo));
                assert_eq!(regs.hl(), value);
            }
        }
    }

    #[test]
    fn writing_a_half_is_visible_through_the_pair() {
        let mut regs = Registers::default();
        regs.set_hl(0x1234);
        regs.l = 0xFF;
        assert_eq!(regs.hl(), 0x12FF);
        regs.h = 0x00;
        assert_eq!(regs.hl(), 0x00FF);
    }

    #[test]
    fn psw_packing_uses_fixed_layout() {
        assert_eq!(Flags::default().to_psw(), 0x02);

        let all = Flags {
            s: true,
            z: true,
            ac: true,
            p: true,
            cy: true,
        };
        assert_eq!(all.to_psw(), 0xD7);

        let only_ac = Flags {
            ac: true,
            ..Flags::default()
        };
        assert_eq!(only_ac.to_psw(), 0x12);
    }

    #[test]
    fn psw_unpacking_ignores_fixed_bits() {
        // Bits 5, 3 and 1 carry no flag state.
        assert_eq!(Flags::from_psw(0x2A), Flags::default());
        assert_eq!(Flags::from_psw(0xFF).to_psw(), 0xD7);

        let flags = Flags::from_psw(0x85);
        assert!(flags.s && flags.p && flags.cy);
        assert!(!flags.z && !flags.ac);
    }
}
