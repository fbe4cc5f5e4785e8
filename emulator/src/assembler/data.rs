//! Data section directives

use tracing::{debug, warn};

use super::{Assembler, LoadError};
use crate::constants::Address;
use crate::parser::parse_string_literal;

impl Assembler<'_> {
    /// Lay out a data directive at the current data location
    pub(super) fn data_directive(
        &mut self,
        line: usize,
        text: &str,
        tokens: &[&str],
    ) -> Result<(), LoadError> {
        let Some((&directive, values)) = tokens.split_first() else {
            return Ok(());
        };

        match directive {
            ".word" => {
                for value in values {
                    let value = self.resolve(line, value)?;
                    self.memory.store_word(self.data_cursor, value);
                    self.data_cursor = self.data_cursor.wrapping_add(4);
                }
            }

            ".half" => {
                for value in values {
                    let value = self.resolve(line, value)?;
                    self.memory.store_half(self.data_cursor, value as u16);
                    self.data_cursor = self.data_cursor.wrapping_add(2);
                }
            }

            ".byte" => {
                for value in values {
                    let value = self.resolve(line, value)?;
                    self.memory.store_byte(self.data_cursor, value as u8);
                    self.data_cursor = self.data_cursor.wrapping_add(1);
                }
            }

            ".ascii" | ".asciiz" => {
                // The literal is rebuilt from its tokens: whitespace runs collapse to a single
                // space and trailing commas are dropped, even inside the quotes
                let argument = text.strip_prefix(directive).unwrap_or(text);
                let argument = argument
                    .split_whitespace()
                    .map(|token| token.trim_end_matches(','))
                    .filter(|token| !token.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");

                let Some(mut bytes) = parse_string_literal(&argument) else {
                    warn!(line, "Unterminated string literal, nothing stored");
                    return Ok(());
                };

                if directive == ".asciiz" {
                    bytes.push(0);
                }

                for byte in bytes {
                    self.memory.store_byte(self.data_cursor, byte);
                    self.data_cursor = self.data_cursor.wrapping_add(1);
                }
            }

            ".space" => {
                if let Some(size) = values.first() {
                    let size = self.resolve(line, size)?;
                    self.data_cursor = self.data_cursor.wrapping_add(size);
                }
            }

            ".align" => {
                if let Some(power) = values.first() {
                    let power = self.resolve(line, power)?;
                    match Address::checked_pow(2, power) {
                        Some(alignment) => {
                            self.data_cursor = self
                                .data_cursor
                                .checked_next_multiple_of(alignment)
                                .unwrap_or(self.data_cursor);
                        }
                        None => warn!(line, power, "Alignment too large, ignored"),
                    }
                }
            }

            _ => {
                warn!(line, directive, "Unsupported data directive, skipping");
                return Ok(());
            }
        }

        debug!(line, directive, "Data laid out up to {:#010x}", self.data_cursor);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use crate::assembler::assemble;
    use crate::constants::DATA_BASE;

    #[test]
    fn word_test() {
        let assembly = assemble(".data\n.word 1, -1, 0x12345678").unwrap();
        let memory = &assembly.memory;
        assert_eq!(memory.fetch_word(DATA_BASE), 1);
        assert_eq!(memory.fetch_word(DATA_BASE + 4), 0xffff_ffff);
        assert_eq!(memory.fetch_word(DATA_BASE + 8), 0x1234_5678);
        // Little-endian layout
        assert_eq!(memory.fetch_byte(DATA_BASE + 8), 0x78);
        assert_eq!(assembly.data_end, DATA_BASE + 12);
    }

    #[test]
    fn word_with_label_test() {
        let assembly = assemble(indoc! {"
            .data
            value: .word 7
            pointer: .word value
        "})
        .unwrap();
        assert_eq!(assembly.memory.fetch_word(DATA_BASE + 4), DATA_BASE);
    }

    #[test]
    fn half_and_byte_test() {
        let assembly = assemble(".data\n.half 0x1234, -2\n.byte 255, -1, 0x141").unwrap();
        let memory = &assembly.memory;
        assert_eq!(memory.fetch_half(DATA_BASE), 0x1234);
        assert_eq!(memory.fetch_half(DATA_BASE + 2), 0xfffe);
        assert_eq!(memory.fetch_byte(DATA_BASE + 4), 0xff);
        assert_eq!(memory.fetch_byte(DATA_BASE + 5), 0xff);
        // Truncated to the low byte
        assert_eq!(memory.fetch_byte(DATA_BASE + 6), 0x41);
        assert_eq!(assembly.data_end, DATA_BASE + 7);
    }

    #[test]
    fn ascii_test() {
        let assembly = assemble(indoc! {r#"
            .data
            a: .ascii "hi"
            b: .asciiz "hey\n"
        "#})
        .unwrap();
        let memory = &assembly.memory;
        let labels = &assembly.program.labels;

        assert_eq!(labels.get("b"), Some(DATA_BASE + 2));
        let bytes: Vec<u8> = (DATA_BASE..DATA_BASE + 7)
            .map(|address| memory.fetch_byte(address))
            .collect();
        assert_eq!(bytes, b"hihey\n\0".to_vec());
        assert_eq!(assembly.data_end, DATA_BASE + 7);
    }

    #[test]
    fn ascii_whitespace_is_collapsed_test() {
        let assembly = assemble(".data\n.ascii \"a    b\"").unwrap();
        assert_eq!(assembly.memory.fetch_byte(DATA_BASE + 1), b' ');
        assert_eq!(assembly.memory.fetch_byte(DATA_BASE + 2), b'b');
        assert_eq!(assembly.data_end, DATA_BASE + 3);
    }

    #[test]
    fn ascii_drops_trailing_commas_test() {
        let assembly = assemble(indoc! {r#"
            .data
            msg: .asciiz "Hello, world"
            after: .byte 1
        "#})
        .unwrap();
        let bytes: Vec<u8> = (DATA_BASE..DATA_BASE + 12)
            .map(|address| assembly.memory.fetch_byte(address))
            .collect();
        assert_eq!(bytes, b"Hello world\0".to_vec());
        assert_eq!(assembly.program.labels.get("after"), Some(DATA_BASE + 12));

        // Only commas ending a token are dropped
        let assembly = assemble(".data\n.ascii \"a,b, f(x)\"").unwrap();
        let bytes: Vec<u8> = (DATA_BASE..assembly.data_end)
            .map(|address| assembly.memory.fetch_byte(address))
            .collect();
        assert_eq!(bytes, b"a,b f(x)".to_vec());
    }

    #[test]
    fn unterminated_string_test() {
        let assembly = assemble(".data\n.asciiz \"oops\nafter: .byte 1").unwrap();
        assert_eq!(assembly.program.labels.get("after"), Some(DATA_BASE));
        assert_eq!(assembly.data_end, DATA_BASE + 1);
    }

    #[test]
    fn space_and_align_test() {
        let assembly = assemble(indoc! {"
            .data
            .byte 1
            .space 5
            buffer: .byte 2
            .align 2
            aligned: .word 3
            .align 2
            still: .word 4
        "})
        .unwrap();
        let labels = &assembly.program.labels;
        assert_eq!(labels.get("buffer"), Some(DATA_BASE + 6));
        assert_eq!(labels.get("aligned"), Some(DATA_BASE + 8));
        assert_eq!(labels.get("still"), Some(DATA_BASE + 12));
        assert_eq!(assembly.memory.fetch_word(DATA_BASE + 8), 3);
    }

    #[test]
    fn unknown_directive_is_skipped_test() {
        let assembly = assemble(".data\n.float 1.5\nx: .byte 1").unwrap();
        assert_eq!(assembly.program.labels.get("x"), Some(DATA_BASE));
    }
}
