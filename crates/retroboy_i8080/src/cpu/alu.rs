use super::Cpu8080;

/// Even parity: true when `value` has an even number of set bits.
#[inline]
pub(crate) fn parity(value: u8) -> bool {
    value.count_ones() % 2 == 0
}

impl Cpu8080 {
    /// Update S, Z and P from an 8-bit result.
    #[inline]
    pub(super) fn set_szp(&mut self, value: u8) {
        self.flags.s = (value & 0x80) != 0;
        self.flags.z = value == 0;
        self.flags.p = parity(value);
    }

    /// Core 8-bit ADD/ADC operation on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true).
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = u8::from(use_carry && self.flags.cy);

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = (a as u16) + (value as u16) + (carry_in as u16);
        let result = full as u8;

        self.flags.ac = (half & 0x10) != 0;
        self.flags.cy = full > 0xFF;
        self.set_szp(result);
        self.regs.a = result;
    }

    /// Flags for `A - value - borrow`, returning the 8-bit difference.
    ///
    /// CY is the borrow out of bit 7, AC the borrow out of the low nibble.
    /// Both include the incoming borrow.
    fn sub_flags(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a;
        let borrow_in = i16::from(use_carry && self.flags.cy);

        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow_in;
        let full = a as i16 - value as i16 - borrow_in;
        let result = full as u8;

        self.flags.ac = half < 0;
        self.flags.cy = full < 0;
        self.set_szp(result);
        result
    }

    /// Core 8-bit SUB/SBB operation on A.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        self.regs.a = self.sub_flags(value, use_carry);
    }

    /// Compare A with `value`, setting flags as if `A - value` was performed.
    /// A itself is not modified.
    #[inline]
    pub(super) fn alu_cmp(&mut self, value: u8) {
        self.sub_flags(value, false);
    }

    /// AND on A.
    ///
    /// The 8080 sets AC from bit 3 of the OR of both operands.
    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.flags.cy = false;
        self.flags.ac = ((self.regs.a | value) & 0x08) != 0;
        self.set_szp(result);
        self.regs.a = result;
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.flags.cy = false;
        self.flags.ac = false;
        self.set_szp(result);
        self.regs.a = result;
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.flags.cy = false;
        self.flags.ac = false;
        self.set_szp(result);
        self.regs.a = result;
    }

    /// 8-bit increment used by INR r and INR M.
    ///
    /// Updates S, Z, P and AC; CY is not affected.
    #[inline]
    pub(super) fn alu_inr(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.flags.ac = (result & 0x0F) == 0;
        self.set_szp(result);
        result
    }

    /// 8-bit decrement used by DCR r and DCR M.
    ///
    /// AC is set when the low nibble borrows from bit 4. CY is not affected.
    #[inline]
    pub(super) fn alu_dcr(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.flags.ac = (value & 0x0F) == 0;
        self.set_szp(result);
        result
    }

    /// 16-bit add for `DAD rp`. Only CY is affected.
    #[inline]
    pub(super) fn alu_dad(&mut self, value: u16) {
        let hl = self.regs.hl();
        let full = (hl as u32) + (value as u32);
        self.flags.cy = full > 0xFFFF;
        self.regs.set_hl(full as u16);
    }

    /// Decimal adjust accumulator after a BCD addition.
    ///
    /// Phase one corrects the low nibble (+0x06) when it exceeds 9 or AC is
    /// set; phase two corrects the high nibble of the updated value (+0x60)
    /// when it exceeds 9 or CY is set. The updated value keeps any carry out
    /// of bit 7 from phase one, so 0xFA adjusts to 0x60 with CY. CY is never
    /// cleared here.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a as u16;

        let low_fix = (a & 0x0F) > 9 || self.flags.ac;
        self.flags.ac = low_fix && (a & 0x0F) + 0x06 > 0x0F;
        if low_fix {
            a += 0x06;
        }

        if (a >> 4) > 9 || self.flags.cy {
            a += 0x60;
        }
        self.flags.cy |= a > 0xFF;

        let result = a as u8;
        self.set_szp(result);
        self.regs.a = result;
    }

    /// RLC: rotate A left, bit 7 into both bit 0 and CY.
    pub(super) fn alu_rlc(&mut self) {
        let a = self.regs.a;
        self.regs.a = a.rotate_left(1);
        self.flags.cy = (a & 0x80) != 0;
    }

    /// RRC: rotate A right, bit 0 into both bit 7 and CY.
    pub(super) fn alu_rrc(&mut self) {
        let a = self.regs.a;
        self.regs.a = a.rotate_right(1);
        self.flags.cy = (a & 0x01) != 0;
    }

    /// RAL: rotate A left through CY.
    pub(super) fn alu_ral(&mut self) {
        let a = self.regs.a;
        let carry_in = u8::from(self.flags.cy);
        self.regs.a = (a << 1) | carry_in;
        self.flags.cy = (a & 0x80) != 0;
    }

    /// RAR: rotate A right through CY.
    pub(super) fn alu_rar(&mut self) {
        let a = self.regs.a;
        let carry_in = if self.flags.cy { 0x80 } else { 0 };
        self.regs.a = (a >> 1) | carry_in;
        self.flags.cy = (a & 0x01) != 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_is_even_parity() {
        assert!(parity(0x00));
        assert!(parity(0x03));
        assert!(parity(0xFF));
        assert!(!parity(0x01));
        assert!(!parity(0x10));
        assert!(!parity(0x08));
        assert!(!parity(0x7F));
    }

    #[test]
    fn add_sets_auxiliary_carry_from_low_nibble() {
        let mut cpu = Cpu8080::new(0);
        cpu.regs.a = 0x0F;
        cpu.alu_add(0x01, false);
        assert_eq!(cpu.regs.a, 0x10);
        assert!(cpu.flags.ac);
        assert!(!cpu.flags.cy);
        assert!(!cpu.flags.z);
        assert!(!cpu.flags.s);
        // 0x10 has a single set bit.
        assert!(!cpu.flags.p);
    }

    #[test]
    fn add_wraps_and_sets_carry() {
        let mut cpu = Cpu8080::new(0);
        cpu.regs.a = 0xFF;
        cpu.alu_add(0x01, false);
        assert_eq!(cpu.regs.a, 0x00);
        assert!(cpu.flags.cy);
        assert!(cpu.flags.z);
        assert!(cpu.flags.ac);
        assert!(cpu.flags.p);
    }

    #[test]
    fn adc_includes_incoming_carry_in_both_carries() {
        let mut cpu = Cpu8080::new(0);
        cpu.regs.a = 0x0E;
        cpu.flags.cy = true;
        cpu.alu_add(0x01, true);
        assert_eq!(cpu.regs.a, 0x10);
        assert!(cpu.flags.ac);
        assert!(!cpu.flags.cy);

        cpu.regs.a = 0xFE;
        cpu.flags.cy = true;
        cpu.alu_add(0x01, true);
        assert_eq!(cpu.regs.a, 0x00);
        assert!(cpu.flags.cy);
        assert!(cpu.flags.z);

        // ADD ignores CY even when it is set.
        cpu.regs.a = 0x01;
        cpu.flags.cy = true;
        cpu.alu_add(0x01, false);
        assert_eq!(cpu.regs.a, 0x02);
    }

    #[test]
    fn sub_reports_borrows() {
        let mut cpu = Cpu8080::new(0);
        cpu.regs.a = 0x10;
        cpu.alu_sub(0x01, false);
        assert_eq!(cpu.regs.a, 0x0F);
        assert!(cpu.flags.ac);
        assert!(!cpu.flags.cy);

        cpu.regs.a = 0x00;
        cpu.alu_sub(0x01, false);
        assert_eq!(cpu.regs.a, 0xFF);
        assert!(cpu.flags.cy);
        assert!(cpu.flags.s);
        assert!(cpu.flags.p);

        cpu.regs.a = 0x3E;
        cpu.alu_sub(0x3E, false);
        assert_eq!(cpu.regs.a, 0x00);
        assert!(cpu.flags.z);
        assert!(!cpu.flags.cy);
        assert!(!cpu.flags.ac);
    }

    #[test]
    fn sbb_borrow_in_reaches_the_low_nibble() {
        let mut cpu = Cpu8080::new(0);
        cpu.regs.a = 0x10;
        cpu.flags.cy = true;
        cpu.alu_sub(0x00, true);
        assert_eq!(cpu.regs.a, 0x0F);
        assert!(cpu.flags.ac);
        assert!(!cpu.flags.cy);

        cpu.regs.a = 0x00;
        cpu.flags.cy = true;
        cpu.alu_sub(0xFF, true);
        assert_eq!(cpu.regs.a, 0x00);
        assert!(cpu.flags.cy);
        assert!(cpu.flags.z);
    }

    #[test]
    fn cmp_leaves_accumulator_untouched() {
        let mut cpu = Cpu8080::new(0);
        cpu.regs.a = 0x05;
        cpu.alu_cmp(0x06);
        assert_eq!(cpu.regs.a, 0x05);
        assert!(cpu.flags.cy);
        assert!(!cpu.flags.z);

        cpu.alu_cmp(0x05);
        assert!(cpu.flags.z);
        assert!(!cpu.flags.cy);
    }

    #[test]
    fn logical_ops_clear_carry() {
        let mut cpu = Cpu8080::new(0);
        cpu.regs.a = 0xF0;
        cpu.flags.cy = true;
        cpu.alu_and(0x0F);
        assert_eq!(cpu.regs.a, 0x00);
        assert!(cpu.flags.z);
        assert!(!cpu.flags.cy);

        cpu.regs.a = 0x0F;
        cpu.flags.cy = true;
        cpu.flags.ac = true;
        cpu.alu_xor(0xFF);
        assert_eq!(cpu.regs.a, 0xF0);
        assert!(cpu.flags.s);
        assert!(!cpu.flags.cy);
        assert!(!cpu.flags.ac);

        cpu.flags.cy = true;
        cpu.flags.ac = true;
        cpu.alu_or(0x01);
        assert_eq!(cpu.regs.a, 0xF1);
        assert!(!cpu.flags.cy);
        assert!(!cpu.flags.ac);
        assert!(!cpu.flags.p);
    }

    #[test]
    fn and_takes_auxiliary_carry_from_bit_three_of_operands() {
        let mut cpu = Cpu8080::new(0);
        cpu.regs.a = 0x08;
        cpu.alu_and(0x00);
        assert!(cpu.flags.ac);

        cpu.regs.a = 0x00;
        cpu.alu_and(0x08);
        assert!(cpu.flags.ac);

        cpu.regs.a = 0xF7;
        cpu.alu_and(0xF7);
        assert!(!cpu.flags.ac);
    }

    #[test]
    fn inr_and_dcr_leave_carry_alone() {
        let mut cpu = Cpu8080::new(0);
        cpu.flags.cy = true;
        assert_eq!(cpu.alu_inr(0xFF), 0x00);
        assert!(cpu.flags.z);
        assert!(cpu.flags.ac);
        assert!(cpu.flags.cy);

        cpu.flags.cy = false;
        assert_eq!(cpu.alu_dcr(0x00), 0xFF);
        assert!(cpu.flags.s);
        assert!(cpu.flags.ac);
        assert!(!cpu.flags.cy);
    }

    #[test]
    fn inr_dcr_auxiliary_carry_tracks_the_low_nibble() {
        let mut cpu = Cpu8080::new(0);
        assert_eq!(cpu.alu_inr(0x0F), 0x10);
        assert!(cpu.flags.ac);
        assert_eq!(cpu.alu_inr(0x10), 0x11);
        assert!(!cpu.flags.ac);

        assert_eq!(cpu.alu_dcr(0x10), 0x0F);
        assert!(cpu.flags.ac);
        assert_eq!(cpu.alu_dcr(0x11), 0x10);
        assert!(!cpu.flags.ac);
    }

    #[test]
    fn dad_only_touches_carry() {
        let mut cpu = Cpu8080::new(0);
        cpu.regs.set_hl(0xFFFF);
        cpu.flags.z = true;
        cpu.alu_dad(0x0001);
        assert_eq!(cpu.regs.hl(), 0x0000);
        assert!(cpu.flags.cy);
        assert!(cpu.flags.z);

        cpu.regs.set_hl(0x1234);
        cpu.alu_dad(0x1111);
        assert_eq!(cpu.regs.hl(), 0x2345);
        assert!(!cpu.flags.cy);
    }

    #[test]
    fn daa_corrects_both_nibbles() {
        let mut cpu = Cpu8080::new(0);
        cpu.regs.a = 0x9A;
        cpu.alu_daa();
        assert_eq!(cpu.regs.a, 0x00);
        assert!(cpu.flags.cy);
        assert!(cpu.flags.ac);
        assert!(cpu.flags.z);
    }

    #[test]
    fn daa_after_bcd_addition() {
        let mut cpu = Cpu8080::new(0);
        // 38 + 45 = 83
        cpu.regs.a = 0x38;
        cpu.alu_add(0x45, false);
        assert_eq!(cpu.regs.a, 0x7D);
        cpu.alu_daa();
        assert_eq!(cpu.regs.a, 0x83);
        assert!(!cpu.flags.cy);

        // 29 + 19 = 48 (AC set by the binary add, low nibble already valid)
        cpu.regs.a = 0x29;
        cpu.alu_add(0x19, false);
        assert_eq!(cpu.regs.a, 0x42);
        assert!(cpu.flags.ac);
        cpu.alu_daa();
        assert_eq!(cpu.regs.a, 0x48);
        assert!(!cpu.flags.ac);

        // 99 + 01 = 100
        cpu.regs.a = 0x99;
        cpu.alu_add(0x01, false);
        cpu.alu_daa();
        assert_eq!(cpu.regs.a, 0x00);
        assert!(cpu.flags.cy);
    }

    #[test]
    fn daa_keeps_valid_bcd_and_existing_carry() {
        let mut cpu = Cpu8080::new(0);
        cpu.regs.a = 0x42;
        cpu.alu_daa();
        assert_eq!(cpu.regs.a, 0x42);
        assert!(!cpu.flags.cy);
        assert!(!cpu.flags.ac);

        cpu.regs.a = 0x12;
        cpu.flags.cy = true;
        cpu.alu_daa();
        assert_eq!(cpu.regs.a, 0x72);
        assert!(cpu.flags.cy);
    }

    #[test]
    fn daa_low_correction_carries_into_high_correction() {
        for (before, after) in [(0xFA, 0x60), (0xFB, 0x61), (0xFF, 0x65)] {
            let mut cpu = Cpu8080::new(0);
            cpu.regs.a = before;
            cpu.alu_daa();
            assert_eq!(cpu.regs.a, after, "A={:02X}", before);
            assert!(cpu.flags.cy, "A={:02X}", before);
            assert!(cpu.flags.ac, "A={:02X}", before);
        }
    }

    #[test]
    fn rotates_through_and_around_carry() {
        let mut cpu = Cpu8080::new(0);
        cpu.regs.a = 0x80;
        cpu.alu_rlc();
        assert_eq!(cpu.regs.a, 0x01);
        assert!(cpu.flags.cy);

        cpu.regs.a = 0x01;
        cpu.flags.cy = false;
        cpu.alu_rrc();
        assert_eq!(cpu.regs.a, 0x80);
        assert!(cpu.flags.cy);

        cpu.regs.a = 0x80;
        cpu.flags.cy = false;
        cpu.alu_ral();
        assert_eq!(cpu.regs.a, 0x00);
        assert!(cpu.flags.cy);
        cpu.alu_ral();
        assert_eq!(cpu.regs.a, 0x01);
        assert!(!cpu.flags.cy);

        cpu.regs.a = 0x01;
        cpu.flags.cy = false;
        cpu.alu_rar();
        assert_eq!(cpu.regs.a, 0x00);
        assert!(cpu.flags.cy);
        cpu.alu_rar();
        assert_eq!(cpu.regs.a, 0x80);
        assert!(!cpu.flags.cy);
    }

    #[test]
    fn rotates_do_not_touch_other_flags() {
        let mut cpu = Cpu8080::new(0);
        cpu.flags.z = true;
        cpu.flags.s = true;
        cpu.flags.p = true;
        cpu.flags.ac = true;
        cpu.regs.a = 0x55;
        cpu.alu_rlc();
        cpu.alu_rrc();
        cpu.alu_ral();
        cpu.alu_rar();
        assert!(cpu.flags.z && cpu.flags.s && cpu.flags.p && cpu.flags.ac);
    }
}
