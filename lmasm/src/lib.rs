use thiserror::Error;

use liblmc::digits::NUM_MAILBOXES;

use crate::scanner::MAX_LABEL_LEN;

mod labels;
mod opcodes;
mod pass_one;
mod pass_two;
mod scanner;

/// Everything that can stop an assembly run. All variants are fatal; the
/// first error aborts the run.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AsmError {
    #[error("Syntax error on line {line}: {message}")]
    Syntax { line: usize, message: &'static str },
    #[error("Label on line {line} exceeds max length of {max}", max = MAX_LABEL_LEN)]
    LabelTooLong { line: usize },
    #[error("Unexpected EOF reading instruction")]
    UnexpectedEof,
    #[error("Opcode on line {line} is too long")]
    OpcodeTooLong { line: usize },
    #[error("Error on line {line}: No such instruction {mnemonic}")]
    UnknownOpcode { line: usize, mnemonic: String },
    #[error("On line {line}: no such label {label}")]
    UndefinedLabel { line: usize, label: String },
    #[error("DAT value {value} out of range")]
    DatOutOfRange { value: u64 },
    #[error("{mnemonic} mailbox {addr} out of range")]
    AddrOutOfRange { mnemonic: String, addr: u64 },
    #[error("Program is too long. {mailboxes} mailboxes, max {max}", max = NUM_MAILBOXES)]
    ProgramTooLong { mailboxes: usize },
}

/// Assemble a Little Man Computer program from text into a flat image of
/// decimal digit bytes, `NUM_DIGITS` per mailbox.
///
/// # Errors
///
/// If there's an error in the assembly code
pub fn assemble_program(source: &str) -> Result<Vec<u8>, AsmError> {
    let pass_one = pass_one::pass_one(source)?;
    pass_two::pass_two(source, &pass_one.labels)
}
