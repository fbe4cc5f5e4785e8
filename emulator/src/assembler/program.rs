use std::collections::BTreeMap;

use crate::constants::{Address, Word, INSTRUCTION_SIZE, TEXT_BASE};
use crate::parser::{parse_number, Opcode, ParseNumberError};

/// Symbol table, mapping label names to addresses
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Labels(BTreeMap<String, Address>);

impl Labels {
    pub fn get(&self, label: &str) -> Option<Address> {
        self.0.get(label).copied()
    }

    /// Define a label. Returns `false` if the label already existed, in which case it is left as
    /// is.
    pub(crate) fn insert(&mut self, label: &str, address: Address) -> bool {
        if self.0.contains_key(label) {
            return false;
        }

        self.0.insert(label.to_owned(), address);
        true
    }

    /// Resolve a token as a label, or else as a number literal
    ///
    /// # Errors
    ///
    /// Fails if the token is neither a known label nor a number literal
    pub fn resolve(&self, token: &str) -> Result<Word, ParseNumberError> {
        self.get(token).map_or_else(|| parse_number(token), Ok)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Address)> {
        self.0.iter().map(|(label, address)| (label.as_str(), *address))
    }
}

/// A line of the text section, kept as source text until it gets executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Address of the instruction slot
    pub address: Address,

    /// Line number in the source, starting at 1
    pub line: usize,

    /// Cleaned source text, without labels and comment
    pub text: String,

    /// First token of the line
    pub mnemonic: String,

    /// The parsed mnemonic, if the interpreter knows about it
    pub opcode: Option<Opcode>,

    pub operands: Vec<String>,
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}: {}", self.address, self.text)
    }
}

/// Instructions of the text section, stored contiguously from [`TEXT_BASE`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Program {
    pub(crate) statements: Vec<Statement>,
    pub(crate) labels: Labels,
}

impl Program {
    /// Address of the next instruction slot
    pub(crate) fn next_address(&self) -> Address {
        let count = self.statements.len() as Address;
        TEXT_BASE.wrapping_add(count.wrapping_mul(INSTRUCTION_SIZE))
    }

    /// Get the statement stored at an address
    pub fn fetch(&self, address: Address) -> Option<&Statement> {
        let offset = address.checked_sub(TEXT_BASE)?;
        if offset % INSTRUCTION_SIZE != 0 {
            return None;
        }

        self.statements.get((offset / INSTRUCTION_SIZE) as usize)
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn statement(address: Address, text: &str) -> Statement {
        Statement {
            address,
            line: 1,
            text: text.to_owned(),
            mnemonic: "nop".to_owned(),
            opcode: Some(Opcode::Nop),
            operands: Vec::new(),
        }
    }

    #[test]
    fn labels_test() {
        let mut labels = Labels::default();
        assert!(labels.insert("main", 0x0040_0000));
        assert!(labels.insert("msg", 0x1001_0000));
        assert!(!labels.insert("main", 0x0040_0010));

        assert_eq!(labels.get("main"), Some(0x0040_0000));
        assert_eq!(labels.get("missing"), None);
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn resolve_test() {
        let mut labels = Labels::default();
        labels.insert("msg", 0x1001_0000);
        labels.insert("10", 0x1234);

        assert_eq!(labels.resolve("msg"), Ok(0x1001_0000));
        assert_eq!(labels.resolve("-4"), Ok(0xffff_fffc));
        // Labels win over number literals
        assert_eq!(labels.resolve("10"), Ok(0x1234));
        assert!(labels.resolve("nothing").is_err());
    }

    #[test]
    fn fetch_test() {
        let program = Program {
            statements: vec![statement(0x0040_0000, "nop"), statement(0x0040_0004, "nop")],
            labels: Labels::default(),
        };

        assert_eq!(program.next_address(), 0x0040_0008);
        assert_eq!(program.fetch(0x0040_0004).map(|s| s.address), Some(0x0040_0004));
        assert_eq!(program.fetch(0x0040_0008), None);
        assert_eq!(program.fetch(0x0040_0002), None);
        assert_eq!(program.fetch(0x003f_fffc), None);
    }
}
