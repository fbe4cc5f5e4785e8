//! Operand decoding
//!
//! Operands are decoded from their source text when an instruction executes. Problems are
//! reported as [`Warning`]s: some are recoverable and only recorded (an invalid register becomes
//! `$zero`, an unknown label becomes the current address), others abort the instruction.

use super::{Reg, Registers, Warning};
use crate::assembler::Labels;
use crate::constants::{Address, Word};
use crate::parser::{is_identifier, parse_number, Opcode};

/// Destination of a branch or a jump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    /// Resolved label, or the fallback address of an unknown one
    Label(Address),

    /// Numeric operand: a word offset for branches, a word index for jumps
    Literal(Word),
}

impl Target {
    /// Destination of a taken branch
    pub(crate) fn branch_address(self, pc: Address) -> Address {
        match self {
            Self::Label(address) => address,
            Self::Literal(offset) => pc.wrapping_add(4).wrapping_add(offset << 2),
        }
    }

    /// Destination of a jump
    pub(crate) fn jump_address(self, pc: Address) -> Address {
        match self {
            Self::Label(address) => address,
            Self::Literal(index) => (pc & 0xF000_0000) | ((index & 0x03FF_FFFF) << 2),
        }
    }

    /// The target as a plain address, for `la` and absolute memory operands
    pub(crate) fn address(self) -> Address {
        match self {
            Self::Label(address) | Self::Literal(address) => address,
        }
    }
}

/// Memory operand, `offset(base)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MemoryOperand {
    pub base: Reg,
    pub offset: Word,
}

impl MemoryOperand {
    /// Effective address, `base + offset`
    pub(crate) fn resolve(self, registers: &Registers) -> Address {
        registers.get(self.base).wrapping_add(self.offset)
    }
}

pub(crate) struct Operands<'a> {
    opcode: Opcode,
    tokens: &'a [String],
    labels: &'a Labels,
    pc: Address,
    warnings: Vec<Warning>,
}

impl<'a> Operands<'a> {
    pub(crate) fn new(
        opcode: Opcode,
        tokens: &'a [String],
        labels: &'a Labels,
        pc: Address,
    ) -> Self {
        Self {
            opcode,
            tokens,
            labels,
            pc,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub(crate) fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Recoverable warnings raised while decoding
    pub(crate) fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    fn token(&self, index: usize) -> Result<&'a str, Warning> {
        self.tokens
            .get(index)
            .map(String::as_str)
            .ok_or(Warning::MissingOperand {
                opcode: self.opcode,
                expected: index + 1,
                got: self.tokens.len(),
            })
    }

    /// Decode a register. An invalid one is replaced by `$zero`.
    pub(crate) fn register(&mut self, index: usize) -> Result<Reg, Warning> {
        let token = self.token(index)?;
        Ok(token.parse().unwrap_or_else(|source| {
            self.warnings.push(Warning::InvalidRegister {
                token: token.to_owned(),
                source,
            });
            Reg::ZERO
        }))
    }

    /// Decode an immediate value, either a label or a number
    pub(crate) fn immediate(&self, index: usize) -> Result<Word, Warning> {
        let token = self.token(index)?;
        self.labels
            .resolve(token)
            .map_err(|source| Warning::InvalidImmediate { source })
    }

    /// Decode a branch or jump target. An unknown label falls back to the current address.
    pub(crate) fn target(&mut self, index: usize) -> Result<Target, Warning> {
        let token = self.token(index)?;
        if let Some(address) = self.labels.get(token) {
            return Ok(Target::Label(address));
        }

        match parse_number(token) {
            Ok(value) => Ok(Target::Literal(value)),
            Err(_) if is_identifier(token) => {
                self.warnings.push(Warning::UnresolvedLabel {
                    label: token.to_owned(),
                    fallback: self.pc,
                });
                Ok(Target::Label(self.pc))
            }
            Err(source) => Err(Warning::InvalidImmediate { source }),
        }
    }

    /// Decode a memory operand: `offset($base)`, `($base)`, or an absolute label or address
    pub(crate) fn memory(&mut self, index: usize) -> Result<MemoryOperand, Warning> {
        if self.len() > index + 1 {
            return Ok(MemoryOperand {
                offset: self.immediate(index)?,
                base: self.register(index + 1)?,
            });
        }

        let token = self.token(index)?;
        if token.starts_with('$') {
            Ok(MemoryOperand {
                base: self.register(index)?,
                offset: 0,
            })
        } else {
            Ok(MemoryOperand {
                base: Reg::ZERO,
                offset: self.target(index)?.address(),
            })
        }
    }
}
