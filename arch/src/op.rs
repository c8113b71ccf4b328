use std::collections::HashMap;

use num_enum::IntoPrimitive;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::cond::Cond;

/// Data-processing opcode field (bits 24-21).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase")]
pub enum Opcode {
    AND = 0,
    EOR = 1,
    SUB = 2,
    RSB = 3,
    ADD = 4,
    ADC = 5,
    SBC = 6,
    RSC = 7,
    TST = 8,
    TEQ = 9,
    CMP = 10,
    CMN = 11,
    ORR = 12,
    MOV = 13,
    BIC = 14,
    MVN = 15,
}

/// Instruction class selected by the leading mnemonic token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    /// rd, op2 (mov / mvn)
    Mov(Opcode),
    /// rd, rn, op2 (add, sub, and the other three-operand forms)
    Dp3(Opcode),
    /// rn, op2 with the S bit set and no destination (cmp / cmn / tst / teq)
    Cmp(Opcode),
    Ldr,
    Str,
    B,
    Bl,
    Bx,
}

static MNEMONICS: Lazy<HashMap<&'static str, Mnemonic>> = Lazy::new(|| {
    use Mnemonic::*;
    HashMap::from([
        ("mov", Mov(Opcode::MOV)),
        ("mvn", Mov(Opcode::MVN)),
        ("and", Dp3(Opcode::AND)),
        ("eor", Dp3(Opcode::EOR)),
        ("sub", Dp3(Opcode::SUB)),
        ("rsb", Dp3(Opcode::RSB)),
        ("add", Dp3(Opcode::ADD)),
        ("adc", Dp3(Opcode::ADC)),
        ("sbc", Dp3(Opcode::SBC)),
        ("rsc", Dp3(Opcode::RSC)),
        ("orr", Dp3(Opcode::ORR)),
        ("bic", Dp3(Opcode::BIC)),
        ("tst", Cmp(Opcode::TST)),
        ("teq", Cmp(Opcode::TEQ)),
        ("cmp", Cmp(Opcode::CMP)),
        ("cmn", Cmp(Opcode::CMN)),
        ("ldr", Ldr),
        ("str", Str),
        ("b", B),
        ("bl", Bl),
        ("bx", Bx),
    ])
});

impl Mnemonic {
    /// Looks a mnemonic token up, splitting an optional two-letter
    /// condition suffix. The bare token is tried first so that `ble`
    /// stays a conditional `b` and `bllt` a conditional `bl`. A known
    /// mnemonic with an unrecognized suffix falls back to `al`.
    pub fn lookup(token: &str) -> Option<(Mnemonic, Cond)> {
        if let Some(&m) = MNEMONICS.get(token) {
            return Some((m, Cond::default()));
        }
        if token.len() > 2 && token.is_ascii() {
            let (base, suffix) = token.split_at(token.len() - 2);
            if let Some(&m) = MNEMONICS.get(base) {
                return Some((m, Cond::parse(suffix).unwrap_or_default()));
            }
        }
        None
    }
}
