/// ARM-style packed immediate: an 8-bit value plus a 4-bit shift
/// count, stored as `value | (shift << 8)`. The shift here is a plain
/// right shift, not ARM's rotate-by-even-amounts, so some constants a
/// real ARM assembler accepts are rejected and low bits shifted out
/// are dropped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotImm(u32);

impl RotImm {
    pub const ZERO: RotImm = RotImm(0);

    /// Packs a non-negative integer into the 12-bit field. Returns
    /// `None` for negative values and for values whose high bits
    /// would need a shift above 15.
    pub fn encode(value: i32) -> Option<RotImm> {
        if value < 0 {
            return None;
        }
        let v = value as u32;
        let high = v >> 8;
        if high == 0 {
            return Some(RotImm(v));
        }
        let shift = 32 - high.leading_zeros();
        if shift > 15 {
            return None;
        }
        Some(RotImm((v >> shift) | (shift << 8)))
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

/// 24-bit branch displacement in words, relative to the branch site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchOffset(u32);

impl BranchOffset {
    /// The PC a branch observes is two instructions past its own
    /// slot, hence the -2. Back-branches wrap as two's-complement in
    /// the low 24 bits.
    pub fn relative(site: u32, target: u32) -> BranchOffset {
        let off = target as i64 - site as i64 - 2;
        BranchOffset((off as u32) & 0x00FF_FFFF)
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}
