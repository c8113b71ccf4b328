use arch::{
    imm::{BranchOffset, RotImm},
    inst::{Inst, Op, Operand2},
    op::Mnemonic,
    reg::Reg,
};

use crate::{error::Error, label::Labels};

// ----------------------------------------------------------------------------
// Statement

/// One classified source line. Only `Code` advances the instruction
/// counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Blank,
    Comment,
    Directive(String),
    Label(String),
    Code(Code),
}

/// An instruction line split into its mnemonic token (condition
/// suffix still attached) and operand tail. Operands are parsed in
/// pass 2, once the label table is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    pub head: String,
    pub args: String,
}

impl Stmt {
    /// Normalizes one raw line and decides what it is. Source is
    /// case-insensitive, so everything downstream sees lowercase.
    pub fn classify(raw: &str) -> Result<Stmt, Error> {
        let line = raw.trim().to_ascii_lowercase();
        if line.is_empty() {
            return Ok(Stmt::Blank);
        }
        if line.starts_with('@') {
            return Ok(Stmt::Comment);
        }
        if line.starts_with('.') {
            return Ok(Stmt::Directive(line));
        }
        if let Some(name) = line.strip_suffix(':') {
            return Ok(Stmt::Label(name.trim_end().to_string()));
        }
        match line.split_once(char::is_whitespace) {
            Some((head, tail)) if !tail.trim().is_empty() => Ok(Stmt::Code(Code {
                head: head.to_string(),
                args: tail.trim().to_string(),
            })),
            _ => Err(Error::MalformedInstruction(line)),
        }
    }
}

// ----------------------------------------------------------------------------
// Operand parsing

/// Parses register syntax. `Ok(None)` means "not a register", which
/// is distinct from `Ok(Some(Reg::R0))`: text that merely starts with
/// `r` but has no digit tail may still be a label reference.
fn register(s: &str) -> Result<Option<Reg>, Error> {
    if let Some(digits) = s.strip_prefix('r') {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            let reg = digits
                .parse::<u8>()
                .ok()
                .and_then(|n| Reg::try_from(n).ok())
                .ok_or_else(|| Error::InvalidRegister(s.to_string()))?;
            return Ok(Some(reg));
        }
        return Ok(None);
    }
    Ok(match s {
        "lr" => Some(Reg::LR),
        "sp" => Some(Reg::SP),
        _ => None,
    })
}

fn require_reg(s: &str) -> Result<Reg, Error> {
    register(s)?.ok_or_else(|| Error::InvalidRegister(s.to_string()))
}

/// Integer literal: any number of leading `#` marks, then hex with a
/// `0x` prefix or signed decimal.
fn int_literal(s: &str) -> Result<i32, Error> {
    let mut t = s;
    while let Some(rest) = t.strip_prefix('#') {
        t = rest;
    }
    let parsed = match t.strip_prefix("0x") {
        Some(hex) => i32::from_str_radix(hex, 16),
        None => t.parse::<i32>(),
    };
    parsed.map_err(|_| Error::InvalidImmediate(s.to_string()))
}

fn operand2(s: &str) -> Result<Operand2, Error> {
    if let Some(reg) = register(s)? {
        return Ok(Operand2::Reg(reg));
    }
    let value = int_literal(s)?;
    let imm = RotImm::encode(value).ok_or_else(|| Error::InvalidImmediate(s.to_string()))?;
    Ok(Operand2::Imm(imm))
}

/// `[base]` or `[base, offset]`; the offset defaults to 0. Anything
/// else in the brackets is rejected: no post-indexing, no register
/// offsets, no writeback.
fn mem_operand(s: &str) -> Result<(Reg, RotImm), Error> {
    let syntax = || Error::InvalidAddressingSyntax(s.to_string());
    let inner = s
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(syntax)?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let (base, offset) = match parts.as_slice() {
        [base] => (*base, None),
        [base, offset] => (*base, Some(*offset)),
        _ => return Err(syntax()),
    };
    let base = register(base)?.ok_or_else(syntax)?;
    let offset = match offset {
        None => RotImm::ZERO,
        Some(text) => {
            let value = int_literal(text).map_err(|_| syntax())?;
            RotImm::encode(value).ok_or_else(|| Error::InvalidImmediate(text.to_string()))?
        }
    };
    Ok((base, offset))
}

// ----------------------------------------------------------------------------
// Instruction encoding

impl Code {
    /// Resolves the mnemonic, parses the operand tail for its shape,
    /// and produces the encoded instruction. `index` is this
    /// instruction's own position, needed for branch displacement.
    pub fn encode(&self, index: u32, labels: &Labels) -> Result<Inst, Error> {
        let (mnemonic, cond) = Mnemonic::lookup(&self.head)
            .ok_or_else(|| Error::UnknownMnemonic(self.head.clone()))?;
        let op = match mnemonic {
            Mnemonic::Mov(code) => {
                let [rd, op2] = self.fields()?;
                Op::Mov(code, require_reg(rd)?, operand2(op2)?)
            }
            Mnemonic::Dp3(code) => {
                let [rd, rn, op2] = self.fields()?;
                Op::Dp3(code, require_reg(rd)?, require_reg(rn)?, operand2(op2)?)
            }
            Mnemonic::Cmp(code) => {
                let [rn, op2] = self.fields()?;
                Op::Cmp(code, require_reg(rn)?, operand2(op2)?)
            }
            Mnemonic::Ldr | Mnemonic::Str => {
                let (rt, mem) = self
                    .args
                    .split_once(',')
                    .ok_or_else(|| Error::MalformedInstruction(self.args.clone()))?;
                let rt = require_reg(rt.trim())?;
                let (base, offset) = mem_operand(mem.trim())?;
                match mnemonic {
                    Mnemonic::Ldr => Op::Ldr(rt, base, offset),
                    _ => Op::Str(rt, base, offset),
                }
            }
            Mnemonic::B | Mnemonic::Bl => {
                let target = labels
                    .get(&self.args)
                    .ok_or_else(|| Error::UndefinedLabel(self.args.clone()))?;
                let offset = BranchOffset::relative(index, target);
                match mnemonic {
                    Mnemonic::B => Op::B(offset),
                    _ => Op::Bl(offset),
                }
            }
            Mnemonic::Bx => Op::Bx(require_reg(&self.args)?),
        };
        Ok(Inst { cond, op })
    }

    fn fields<const N: usize>(&self) -> Result<[&str; N], Error> {
        let parts: Vec<&str> = self.args.split(',').map(str::trim).collect();
        parts
            .try_into()
            .map_err(|_| Error::MalformedInstruction(self.args.clone()))
    }
}
