use std::str::FromStr;

use strum_macros::{Display, EnumString};

use liblmc::digits::{encode_decimal, MAX_ADDR, MAX_VALUE};
use liblmc::op::{Opcode, INPUT, OUTPUT};

use crate::AsmError;

/// Mnemonics are exactly this many characters in source text.
pub const MNEMONIC_LEN: usize = 3;

/// The static instruction catalog shared by both passes.
#[derive(Debug, Display, EnumString, Clone, Copy, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum Mnemonic {
    DAT,
    HLT,
    COB,
    ADD,
    SUB,
    STA,
    LDA,
    BRA,
    BRZ,
    BRP,
    INP,
    OUT,
}

/// How many operands a mnemonic takes. Only DAT's operand is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    None,
    Required,
    Optional,
}

impl Mnemonic {
    pub fn lookup(token: &str) -> Option<Self> {
        Self::from_str(token).ok()
    }

    pub fn arity(self) -> Arity {
        match self {
            Mnemonic::DAT => Arity::Optional,
            Mnemonic::HLT | Mnemonic::COB | Mnemonic::INP | Mnemonic::OUT => Arity::None,
            _ => Arity::Required,
        }
    }

    /// Append this instruction's digits to the image. `value` is the
    /// resolved operand (zero when there is none).
    pub fn encode(self, value: u64, image: &mut Vec<u8>) -> Result<(), AsmError> {
        match self {
            Mnemonic::DAT => {
                if value > u64::from(MAX_VALUE) {
                    return Err(AsmError::DatOutOfRange { value });
                }
                image.extend_from_slice(&encode_decimal(value as u32));
                Ok(())
            }
            Mnemonic::HLT | Mnemonic::COB => encode_op(self, Opcode::Halt, 0, image),
            Mnemonic::ADD => encode_op(self, Opcode::Add, value, image),
            Mnemonic::SUB => encode_op(self, Opcode::Sub, value, image),
            Mnemonic::STA => encode_op(self, Opcode::Store, value, image),
            Mnemonic::LDA => encode_op(self, Opcode::Load, value, image),
            Mnemonic::BRA => encode_op(self, Opcode::Branch, value, image),
            Mnemonic::BRZ => encode_op(self, Opcode::BranchZero, value, image),
            Mnemonic::BRP => encode_op(self, Opcode::BranchPositive, value, image),
            // Both I/O ops are machine code 9xx: the sub-operation number
            // goes in the address field.
            Mnemonic::INP => encode_op(self, Opcode::Io, INPUT as u64, image),
            Mnemonic::OUT => encode_op(self, Opcode::Io, OUTPUT as u64, image),
        }
    }
}

fn encode_op(
    mnemonic: Mnemonic,
    opcode: Opcode,
    addr: u64,
    image: &mut Vec<u8>,
) -> Result<(), AsmError> {
    if addr > u64::from(MAX_ADDR) {
        return Err(AsmError::AddrOutOfRange {
            mnemonic: mnemonic.to_string(),
            addr,
        });
    }

    let digits = encode_decimal(addr as u32);
    image.push(opcode as u8);
    image.extend_from_slice(&digits[1..]);
    Ok(())
}
