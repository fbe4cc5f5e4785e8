use thiserror::Error;
use tracing::error;

use crate::constants::{Word, STACK_BASE};

/// Conventional names of the general purpose registers, by index
pub const REGISTER_NAMES: [&str; 32] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", //
    "t0", "t1", "t2", "t3", "t4", "t5", "t6", "t7", //
    "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", //
    "t8", "t9", "k0", "k1", "gp", "sp", "fp", "ra",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterParseError {
    #[error("unknown register name {0:?}")]
    UnknownName(String),

    #[error("register number {0} is out of range")]
    OutOfRange(String),
}

/// A general purpose register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reg(u8);

impl Reg {
    /// Hardwired to zero
    pub const ZERO: Reg = Reg(0);

    /// Syscall number and return value
    pub const V0: Reg = Reg(2);

    /// First argument
    pub const A0: Reg = Reg(4);

    /// Second argument
    pub const A1: Reg = Reg(5);

    /// Stack pointer
    pub const SP: Reg = Reg(29);

    /// Return address
    pub const RA: Reg = Reg(31);

    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .filter(|&index| usize::from(index) < REGISTER_NAMES.len())
            .map(Self)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn name(self) -> &'static str {
        REGISTER_NAMES[self.index()]
    }

    pub fn all() -> impl Iterator<Item = Reg> {
        (0..32).map(Reg)
    }
}

impl std::fmt::Display for Reg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}", self.name())
    }
}

impl std::str::FromStr for Reg {
    type Err = RegisterParseError;

    /// Parse a register from either its number or its name, with an optional `$` prefix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix('$').unwrap_or(s);

        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return name
                .parse::<usize>()
                .ok()
                .and_then(Self::from_index)
                .ok_or_else(|| RegisterParseError::OutOfRange(s.to_owned()));
        }

        REGISTER_NAMES
            .iter()
            .position(|&candidate| candidate == name)
            .and_then(Self::from_index)
            .ok_or_else(|| RegisterParseError::UnknownName(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    /// General purpose registers
    gpr: [Word; 32],

    /// High half of a multiplication, remainder of a division
    pub hi: Word,

    /// Low half of a multiplication, quotient of a division
    pub lo: Word,
}

impl Default for Registers {
    fn default() -> Self {
        let mut registers = Self {
            gpr: [0; 32],
            hi: 0,
            lo: 0,
        };
        registers.set(Reg::SP, STACK_BASE);
        registers
    }
}

impl Registers {
    pub fn get(&self, reg: Reg) -> Word {
        self.gpr[reg.index()]
    }

    /// Set a register value. Writes to `$zero` are discarded.
    pub fn set(&mut self, reg: Reg, value: Word) {
        if reg != Reg::ZERO {
            self.gpr[reg.index()] = value;
        }
    }

    /// Get a register by number, reading 0 if the number is out of range
    pub fn get_index(&self, index: usize) -> Word {
        if let Some(reg) = Reg::from_index(index) {
            self.get(reg)
        } else {
            error!(index, "Invalid register number");
            0
        }
    }

    /// Set a register by number, ignoring the write if the number is out of range
    pub fn set_index(&mut self, index: usize, value: Word) {
        if let Some(reg) = Reg::from_index(index) {
            self.set(reg, value);
        } else {
            error!(index, "Invalid register number");
        }
    }

    /// Get a register by name, reading 0 if the name is invalid
    pub fn get_by_name(&self, name: &str) -> Word {
        match name.parse() {
            Ok(reg) => self.get(reg),
            Err(e) => {
                error!(error = %e, "Invalid register");
                0
            }
        }
    }

    /// Set a register by name, ignoring the write if the name is invalid
    pub fn set_by_name(&mut self, name: &str, value: Word) {
        match name.parse() {
            Ok(reg) => self.set(reg, value),
            Err(e) => error!(error = %e, "Invalid register"),
        }
    }

    pub fn general_purpose(&self) -> [Word; 32] {
        self.gpr
    }
}
