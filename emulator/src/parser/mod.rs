//! Source line parsing
//!
//! The assembler works line by line on cleaned source text: the comment is stripped, the line is
//! trimmed, label definitions are split off and the rest is cut into tokens.
//!
//! Everything here is zero copy over the input. Returned slices point into the source,
//! which lets the assembler compute the offset of any token for error reporting.

use nom::bytes::complete::take_while1;
use nom::character::complete::{char, space0};
use nom::combinator::{all_consuming, verify};
use nom::multi::many0;
use nom::sequence::terminated;
use nom::IResult;

pub(crate) mod literal;
pub(crate) mod opcode;

pub use self::literal::{parse_number, parse_string_literal, ParseNumberError};
pub use self::opcode::{InstructionClass, Opcode};

fn is_identifier_char(c: char) -> bool {
    is_start_identifier_char(c) || c.is_ascii_digit()
}

fn is_start_identifier_char(c: char) -> bool {
    c == '_' || c == '.' || c.is_ascii_alphabetic()
}

/// Parse a label-like identifier
pub(crate) fn parse_identifier(input: &str) -> IResult<&str, &str> {
    verify(take_while1(is_identifier_char), |f: &str| {
        f.chars().next().is_some_and(is_start_identifier_char)
    })(input)
}

/// Checks if the whole token could name a label
pub(crate) fn is_identifier(token: &str) -> bool {
    all_consuming(parse_identifier)(token).is_ok()
}

/// Parses a label definition, `name:`
fn parse_label_definition(input: &str) -> IResult<&str, &str> {
    let (input, label) = parse_identifier(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = char(':')(input)?;
    Ok((input, label))
}

/// Removes the comment and the surrounding whitespace of a line
pub fn clean_line(line: &str) -> &str {
    let code = line.split_once('#').map_or(line, |(code, _comment)| code);
    code.trim()
}

/// Splits the label definitions at the start of a cleaned line from the rest of it
pub fn split_labels(line: &str) -> (Vec<&str>, &str) {
    let parsed: IResult<&str, Vec<&str>> =
        many0(terminated(parse_label_definition, space0))(line);

    match parsed {
        Ok((rest, labels)) => (labels, rest.trim()),
        Err(_) => (Vec::new(), line),
    }
}

/// Cuts a line in tokens
///
/// Tokens are separated by whitespace and commas. A memory operand `offset($reg)` becomes two
/// tokens, the offset and the register. The offset is omitted when empty, so `($reg)` becomes a
/// single token.
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();

    for token in line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
    {
        if let Some((offset, rest)) = token.split_once('(') {
            let register = rest.split_once(')').map_or(rest, |(register, _)| register);
            if !offset.is_empty() {
                tokens.push(offset);
            }
            tokens.push(register);
        } else {
            tokens.push(token);
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_identifier_test() {
        assert_eq!(parse_identifier("hello"), Ok(("", "hello")));
        assert_eq!(parse_identifier("loop_1:"), Ok((":", "loop_1")));
        assert_eq!(parse_identifier(".asciiz \"x\""), Ok((" \"x\"", ".asciiz")));
        assert!(parse_identifier("1abc").is_err());
        assert!(parse_identifier("$t0").is_err());
    }

    #[test]
    fn is_identifier_test() {
        assert!(is_identifier("main"));
        assert!(is_identifier("_start"));
        assert!(!is_identifier("12"));
        assert!(!is_identifier("0x10"));
        assert!(!is_identifier("foo-bar"));
    }

    #[test]
    fn clean_line_test() {
        assert_eq!(clean_line("  add $t0, $t1, $t2   # sum"), "add $t0, $t1, $t2");
        assert_eq!(clean_line("# only a comment"), "");
        assert_eq!(clean_line("\t\r\n"), "");
        assert_eq!(clean_line("nop\r"), "nop");
    }

    #[test]
    fn split_labels_test() {
        assert_eq!(split_labels("main:"), (vec!["main"], ""));
        assert_eq!(
            split_labels("loop: addi $t0, $t0, 1"),
            (vec!["loop"], "addi $t0, $t0, 1")
        );
        assert_eq!(split_labels("a: b :nop"), (vec!["a", "b"], "nop"));
        assert_eq!(
            split_labels("msg: .asciiz \"a: b\""),
            (vec!["msg"], ".asciiz \"a: b\"")
        );
        assert_eq!(
            split_labels(".asciiz \"key: value\""),
            (vec![], ".asciiz \"key: value\"")
        );
        assert_eq!(split_labels("li $v0, 10"), (vec![], "li $v0, 10"));
    }

    #[test]
    fn tokenize_test() {
        assert_eq!(
            tokenize("add $t2, $t0, $t1"),
            vec!["add", "$t2", "$t0", "$t1"]
        );
        assert_eq!(tokenize("la $a0,msg"), vec!["la", "$a0", "msg"]);
        assert_eq!(tokenize(".word 1,2, 3"), vec![".word", "1", "2", "3"]);
        assert_eq!(tokenize("add $t0 , $t1"), vec!["add", "$t0", "$t1"]);
    }

    #[test]
    fn tokenize_memory_operand_test() {
        assert_eq!(tokenize("lw $t0, 4($sp)"), vec!["lw", "$t0", "4", "$sp"]);
        assert_eq!(tokenize("sw $ra, -8($fp)"), vec!["sw", "$ra", "-8", "$fp"]);
        assert_eq!(tokenize("lb $t1, ($a0)"), vec!["lb", "$t1", "$a0"]);
        assert_eq!(
            tokenize("lw $t0, 0x10($t1)"),
            vec!["lw", "$t0", "0x10", "$t1"]
        );
    }

    #[test]
    fn tokens_point_into_the_input_test() {
        use nom::Offset;

        let line = "sw $ra, 12($sp)";
        let tokens = tokenize(line);
        let offsets: Vec<_> = tokens.iter().map(|t| line.offset(t)).collect();
        assert_eq!(offsets, vec![0, 3, 8, 11]);
    }
}
