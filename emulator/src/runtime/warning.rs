use thiserror::Error;

use super::registers::RegisterParseError;
use super::syscall::Syscall;
use crate::constants::{Address, Word};
use crate::parser::{Opcode, ParseNumberError};

/// Recoverable problem reported while executing an instruction
///
/// None of these stop the program: the faulty part is skipped or replaced by a fallback value, and
/// execution goes on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Warning {
    #[error("unsupported instruction {mnemonic:?}")]
    UnsupportedInstruction { mnemonic: String },

    #[error("{opcode} expects at least {expected} operands, got {got}")]
    MissingOperand {
        opcode: Opcode,
        expected: usize,
        got: usize,
    },

    #[error("invalid register {token:?}, using $zero")]
    InvalidRegister {
        token: String,
        source: RegisterParseError,
    },

    #[error("invalid immediate value {:?}", .source.token)]
    InvalidImmediate { source: ParseNumberError },

    #[error("label {label:?} not found, using the current address {fallback:#010x}")]
    UnresolvedLabel { label: String, fallback: Address },

    #[error("unsupported syscall {code}")]
    UnsupportedSyscall { code: Word },

    #[error("no input available for {syscall}")]
    MissingInput { syscall: Syscall },

    #[error("console error: {message}")]
    Console { message: String },
}
