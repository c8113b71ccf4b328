use color_print::cformat;

use crate::{
    cond::Cond,
    imm::{BranchOffset, RotImm},
    op::Opcode,
    reg::Reg,
};

/// Second operand of a data-processing instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand2 {
    Reg(Reg),
    Imm(RotImm),
}

impl Operand2 {
    fn i_bit(self) -> u32 {
        match self {
            Operand2::Reg(_) => 0,
            Operand2::Imm(_) => 1 << 25,
        }
    }

    fn bits(self) -> u32 {
        match self {
            Operand2::Reg(r) => r.index(),
            Operand2::Imm(imm) => imm.bits(),
        }
    }

    fn cformat(self) -> String {
        match self {
            Operand2::Reg(r) => cformat!("<blue>{}</>", r),
            Operand2::Imm(imm) => cformat!("<yellow>#0x{:X}</>", imm.bits()),
        }
    }
}

/// A fully resolved instruction: every operand parsed, every label
/// replaced by its displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// rd, op2 (mov / mvn)
    Mov(Opcode, Reg, Operand2),
    /// rd, rn, op2
    Dp3(Opcode, Reg, Reg, Operand2),
    /// rn, op2; sets flags, writes no destination
    Cmp(Opcode, Reg, Operand2),
    /// rt, base, offset
    Ldr(Reg, Reg, RotImm),
    Str(Reg, Reg, RotImm),
    B(BranchOffset),
    Bl(BranchOffset),
    Bx(Reg),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inst {
    pub cond: Cond,
    pub op: Op,
}

fn dp(op: Opcode, s: bool, rn: Reg, rd: Reg, op2: Operand2) -> u32 {
    op2.i_bit()
        | (u8::from(op) as u32) << 21
        | (s as u32) << 20
        | rn.index() << 16
        | rd.index() << 12
        | op2.bits()
}

fn xfer(load: bool, rn: Reg, rt: Reg, off: RotImm) -> u32 {
    0x0580_0000 | (load as u32) << 20 | rn.index() << 16 | rt.index() << 12 | off.bits()
}

impl Inst {
    pub fn to_bin(&self) -> u32 {
        let cond = (u8::from(self.cond) as u32) << 28;
        cond | match self.op {
            Op::Mov(op, rd, op2) => dp(op, false, Reg::R0, rd, op2),
            Op::Dp3(op, rd, rn, op2) => dp(op, false, rn, rd, op2),
            Op::Cmp(op, rn, op2) => dp(op, true, rn, Reg::R0, op2),
            Op::Ldr(rt, rn, off) => xfer(true, rn, rt, off),
            Op::Str(rt, rn, off) => xfer(false, rn, rt, off),
            Op::B(off) => 0x0A00_0000 | off.bits(),
            Op::Bl(off) => 0x0B00_0000 | off.bits(),
            Op::Bx(rm) => 0x012F_FF10 | rm.index(),
        }
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        let mn = |base: &str| match self.cond {
            Cond::AL => base.to_string(),
            c => format!("{base}{c}"),
        };
        match self.op {
            Op::Mov(op, rd, op2) => {
                cformat!("<red>{:<6}</><blue>{}</>, {}", mn(&op.to_string()), rd, op2.cformat())
            }
            Op::Dp3(op, rd, rn, op2) => cformat!(
                "<red>{:<6}</><blue>{}</>, <blue>{}</>, {}",
                mn(&op.to_string()),
                rd,
                rn,
                op2.cformat()
            ),
            Op::Cmp(op, rn, op2) => {
                cformat!("<red>{:<6}</><blue>{}</>, {}", mn(&op.to_string()), rn, op2.cformat())
            }
            Op::Ldr(rt, rn, off) => cformat!(
                "<red>{:<6}</><blue>{}</>, [<blue>{}</>, <yellow>#0x{:X}</>]",
                mn("ldr"),
                rt,
                rn,
                off.bits()
            ),
            Op::Str(rt, rn, off) => cformat!(
                "<red>{:<6}</><blue>{}</>, [<blue>{}</>, <yellow>#0x{:X}</>]",
                mn("str"),
                rt,
                rn,
                off.bits()
            ),
            Op::B(off) => cformat!("<red>{:<6}</><yellow>0x{:06X}</>", mn("b"), off.bits()),
            Op::Bl(off) => cformat!("<red>{:<6}</><yellow>0x{:06X}</>", mn("bl"), off.bits()),
            Op::Bx(rm) => cformat!("<red>{:<6}</><blue>{}</>", mn("bx"), rm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imm(v: i32) -> Operand2 {
        Operand2::Imm(RotImm::encode(v).unwrap())
    }

    fn al(op: Op) -> Inst {
        Inst { cond: Cond::AL, op }
    }

    macro_rules! test_bin {
        ($($name:ident: $inst:expr => $word:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!($inst.to_bin(), $word, "got {:#010X}", $inst.to_bin());
                }
            )*
        }
    }

    test_bin! {
        mov_imm: al(Op::Mov(Opcode::MOV, Reg::R1, imm(0x41))) => 0xE3A01041,
        mov_reg: al(Op::Mov(Opcode::MOV, Reg::R1, Operand2::Reg(Reg::R2))) => 0xE1A01002,
        mvn_imm: al(Op::Mov(Opcode::MVN, Reg::R0, imm(0))) => 0xE3E00000,
        add_imm: al(Op::Dp3(Opcode::ADD, Reg::R3, Reg::R2, imm(2))) => 0xE2823002,
        sub_reg: al(Op::Dp3(Opcode::SUB, Reg::R4, Reg::R3, Operand2::Reg(Reg::R2))) => 0xE0434002,
        eor_reg: al(Op::Dp3(Opcode::EOR, Reg::R1, Reg::R2, Operand2::Reg(Reg::R3))) => 0xE0221003,
        orr_imm: al(Op::Dp3(Opcode::ORR, Reg::R0, Reg::R0, imm(1))) => 0xE3800001,
        adc_reg: al(Op::Dp3(Opcode::ADC, Reg::R1, Reg::R2, Operand2::Reg(Reg::R3))) => 0xE0A21003,
        cmp_reg: al(Op::Cmp(Opcode::CMP, Reg::R0, Operand2::Reg(Reg::R1))) => 0xE1500001,
        cmp_imm: al(Op::Cmp(Opcode::CMP, Reg::R1, imm(5))) => 0xE3510005,
        tst_reg: al(Op::Cmp(Opcode::TST, Reg::R1, Operand2::Reg(Reg::R2))) => 0xE1120002,
        cmn_imm: al(Op::Cmp(Opcode::CMN, Reg::R0, imm(4))) => 0xE3700004,
        str_off: al(Op::Str(Reg::R1, Reg::R2, RotImm::encode(4).unwrap())) => 0xE5821004,
        ldr_off: al(Op::Ldr(Reg::R3, Reg::R3, RotImm::encode(8).unwrap())) => 0xE5933008,
        b_fwd: al(Op::B(BranchOffset::relative(0, 2))) => 0xEA000000,
        b_back: al(Op::B(BranchOffset::relative(1, 0))) => 0xEAFFFFFD,
        bl_fwd: al(Op::Bl(BranchOffset::relative(0, 2))) => 0xEB000000,
        bge_fwd: Inst { cond: Cond::GE, op: Op::B(BranchOffset::relative(3, 10)) } => 0xAA000005,
        bx_r2: al(Op::Bx(Reg::R2)) => 0xE12FFF12,
        bx_lr: al(Op::Bx(Reg::LR)) => 0xE12FFF1E,
        moveq_imm: Inst { cond: Cond::EQ, op: Op::Mov(Opcode::MOV, Reg::R7, imm(1)) } => 0x03A07001,
    }
}
