//! Single-pass assembler and loader
//!
//! The source is read once, line by line. Data directives are laid out in memory as they are
//! seen, text lines are stored as [`Statement`]s in contiguous instruction slots, and label
//! definitions are recorded with the current location of their section. Operands are kept as
//! text and only decoded when executed, so forward references resolve naturally.

use miette::{Diagnostic, SourceSpan};
use nom::Offset;
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::{Address, Word, DATA_BASE};
use crate::parser::{clean_line, split_labels, tokenize, ParseNumberError};
use crate::runtime::Memory;

mod data;
mod program;

pub use self::program::{Labels, Program, Statement};

#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("invalid value {token:?} on line {line}")]
    #[diagnostic(code(mips::load::invalid_number))]
    InvalidNumber {
        token: String,
        line: usize,

        #[label("not a number or a label defined so far")]
        span: SourceSpan,

        #[source]
        source: ParseNumberError,
    },

    #[error("label {label:?} redefined on line {line}")]
    #[diagnostic(code(mips::load::duplicate_label))]
    DuplicateLabel {
        label: String,
        line: usize,

        #[label("already defined")]
        span: SourceSpan,
    },
}

impl LoadError {
    /// Line number where the error occured
    pub fn line(&self) -> usize {
        match self {
            Self::InvalidNumber { line, .. } | Self::DuplicateLabel { line, .. } => *line,
        }
    }
}

/// Section the assembler is currently emitting into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Text,
    Data,
}

/// Result of the assembly of a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub program: Program,

    /// Memory with the data section laid out
    pub memory: Memory,

    /// First address after the data section
    pub data_end: Address,
}

struct Assembler<'a> {
    source: &'a str,
    section: Section,
    data_cursor: Address,
    program: Program,
    memory: Memory,
}

impl<'a> Assembler<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            section: Section::Text,
            data_cursor: DATA_BASE,
            program: Program::default(),
            memory: Memory::default(),
        }
    }

    /// Span of a token, which must be a slice of the source
    fn span(&self, token: &str) -> SourceSpan {
        (self.source.offset(token), token.len()).into()
    }

    /// Resolve a data operand as a label or a number
    fn resolve(&self, line: usize, token: &str) -> Result<Word, LoadError> {
        self.program
            .labels
            .resolve(token)
            .map_err(|source| LoadError::InvalidNumber {
                token: token.to_owned(),
                line,
                span: self.span(token),
                source,
            })
    }

    fn define_label(&mut self, line: usize, label: &str) -> Result<(), LoadError> {
        let address = match self.section {
            Section::Text => self.program.next_address(),
            Section::Data => self.data_cursor,
        };

        if !self.program.labels.insert(label, address) {
            return Err(LoadError::DuplicateLabel {
                label: label.to_owned(),
                line,
                span: self.span(label),
            });
        }

        debug!(label, line, "Label defined at {:#010x}", address);
        Ok(())
    }

    fn push_statement(&mut self, line: usize, text: &str, tokens: &[&str]) {
        let Some((mnemonic, operands)) = tokens.split_first() else {
            return;
        };

        let statement = Statement {
            address: self.program.next_address(),
            line,
            text: text.to_owned(),
            mnemonic: (*mnemonic).to_owned(),
            opcode: mnemonic.parse().ok(),
            operands: operands.iter().map(|&operand| operand.to_owned()).collect(),
        };
        self.program.statements.push(statement);
    }

    fn assemble_line(&mut self, number: usize, line: &'a str) -> Result<(), LoadError> {
        let line = clean_line(line);
        if line.is_empty() {
            return Ok(());
        }

        let (labels, rest) = split_labels(line);
        for label in labels {
            self.define_label(number, label)?;
        }

        if rest.is_empty() {
            return Ok(());
        }

        let tokens = tokenize(rest);
        match tokens.first().copied() {
            Some(".text") => self.section = Section::Text,
            Some(".data") => self.section = Section::Data,
            Some(".globl" | ".global") => {}
            _ => match self.section {
                Section::Text => self.push_statement(number, rest, &tokens),
                Section::Data => self.data_directive(number, rest, &tokens)?,
            },
        }

        Ok(())
    }

    fn finish(self) -> Assembly {
        Assembly {
            program: self.program,
            memory: self.memory,
            data_end: self.data_cursor,
        }
    }
}

/// Assemble a program
///
/// # Errors
///
/// Fails on an invalid numeric value in the data section, or when a label is defined twice
#[tracing::instrument(skip(source))]
pub fn assemble(source: &str) -> Result<Assembly, LoadError> {
    let mut assembler = Assembler::new(source);

    for (index, line) in source.lines().enumerate() {
        assembler.assemble_line(index + 1, line)?;
    }

    let assembly = assembler.finish();
    info!(
        instructions = assembly.program.len(),
        labels = assembly.program.labels.len(),
        "Program assembled"
    );
    Ok(assembly)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::constants::TEXT_BASE;
    use crate::parser::Opcode;

    #[test]
    fn assemble_text_test() {
        let assembly = assemble(indoc! {"
            .text
            .globl main
            main:
                li $t0, 5       # five
                addi $t1, $t0, 7
            done: syscall
        "})
        .unwrap();

        let program = &assembly.program;
        assert_eq!(program.len(), 3);
        assert_eq!(program.labels.get("main"), Some(TEXT_BASE));
        assert_eq!(program.labels.get("done"), Some(TEXT_BASE + 8));

        let statement = program.fetch(TEXT_BASE + 4).unwrap();
        assert_eq!(statement.line, 5);
        assert_eq!(statement.text, "addi $t1, $t0, 7");
        assert_eq!(statement.opcode, Some(Opcode::Addi));
        assert_eq!(statement.operands, vec!["$t1", "$t0", "7"]);
    }

    #[test]
    fn text_is_the_default_section_test() {
        let assembly = assemble("nop\nnop").unwrap();
        assert_eq!(assembly.program.len(), 2);
        assert_eq!(assembly.data_end, DATA_BASE);
    }

    #[test]
    fn unknown_mnemonic_is_kept_test() {
        let assembly = assemble("frobnicate $t0").unwrap();
        let statement = assembly.program.fetch(TEXT_BASE).unwrap();
        assert_eq!(statement.mnemonic, "frobnicate");
        assert_eq!(statement.opcode, None);
    }

    #[test]
    fn labels_follow_their_section_test() {
        let assembly = assemble(indoc! {"
            .data
            first: .word 1, 2
            second: .byte 3
            .text
            main: nop
            .data
            third: .word 4
        "})
        .unwrap();

        let labels = &assembly.program.labels;
        assert_eq!(labels.get("first"), Some(DATA_BASE));
        assert_eq!(labels.get("second"), Some(DATA_BASE + 8));
        assert_eq!(labels.get("main"), Some(TEXT_BASE));
        assert_eq!(labels.get("third"), Some(DATA_BASE + 9));
        assert_eq!(assembly.data_end, DATA_BASE + 13);
    }

    #[test]
    fn several_labels_on_one_line_test() {
        let assembly = assemble("a: b: li $v0, 10").unwrap();
        let labels = &assembly.program.labels;
        assert_eq!(labels.get("a"), Some(TEXT_BASE));
        assert_eq!(labels.get("b"), Some(TEXT_BASE));
        assert_eq!(assembly.program.len(), 1);
    }

    #[test]
    fn duplicate_label_test() {
        let source = "main: nop\nmain: nop";
        let error = assemble(source).unwrap_err();
        assert_eq!(
            error,
            LoadError::DuplicateLabel {
                label: "main".to_owned(),
                line: 2,
                span: (10, 4).into(),
            }
        );
        assert_eq!(error.line(), 2);
    }

    #[test]
    fn invalid_number_test() {
        let source = ".data\nvalues: .word 1, two, 3";
        let error = assemble(source).unwrap_err();
        assert_eq!(
            error,
            LoadError::InvalidNumber {
                token: "two".to_owned(),
                line: 2,
                span: (23, 3).into(),
                source: ParseNumberError {
                    token: "two".to_owned()
                },
            }
        );
    }

    #[test]
    fn invalid_instruction_operand_is_not_a_load_error_test() {
        // Instruction operands are only decoded on execution
        assert!(assemble("addi $t0, $t0, two").is_ok());
    }
}
