//! Tokens and a tokenizer for one line of assembly source.

use logos::{Lexer, Logos};

/// Enumeration of all tokens that can appear on a source line.
///
/// Whitespace and `#` comments are skipped by the lexer, so a blank or
/// comment-only line produces no tokens at all.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token<'a> {
    /// Errorneous token that could not be interpreted as any of the other variants.
    #[error]
    #[regex(r"[ \t\r\f]+", logos::skip)]
    #[regex(r"#[^\n]*", logos::skip)]
    Error,

    /// An identifier: a mnemonic, a register or a label name.
    #[regex("[A-Za-z_][A-Za-z0-9_]*", Lexer::slice)]
    Symbol(&'a str),

    /// A signed decimal or `0x`-prefixed hexadecimal literal.
    #[regex(r"-?[0-9]+|-?0x[0-9a-fA-F]+", Lexer::slice)]
    Literal(&'a str),

    /// A composite memory operand of the form `offset(base)`, kept as a
    /// single token. (Eg. `-8(x2)`.)
    #[regex(r"-?(0x[0-9a-fA-F]+|[0-9]+)\([A-Za-z0-9]+\)", Lexer::slice)]
    Memory(&'a str),

    /// Token (`,`) that separates the operands of a single instruction.
    #[token(",")]
    Separator,

    /// Token (`:`) that binds the preceding symbol as a label.
    #[token(":")]
    LabelMarker,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(line: &str) -> Vec<Token> {
        Token::lexer(line).collect()
    }

    #[test]
    fn lexes_an_instruction_line() {
        assert_eq!(
            lex("addi x1, x0, 10"),
            vec![
                Token::Symbol("addi"),
                Token::Symbol("x1"),
                Token::Separator,
                Token::Symbol("x0"),
                Token::Separator,
                Token::Literal("10"),
            ],
        );
    }

    #[test]
    fn keeps_memory_operands_as_one_token() {
        assert_eq!(
            lex("lw x3, -8(x2)"),
            vec![
                Token::Symbol("lw"),
                Token::Symbol("x3"),
                Token::Separator,
                Token::Memory("-8(x2)"),
            ],
        );
    }

    #[test]
    fn lexes_labels_and_hex_literals() {
        assert_eq!(
            lex("loop: addi x1, x1, -0x1"),
            vec![
                Token::Symbol("loop"),
                Token::LabelMarker,
                Token::Symbol("addi"),
                Token::Symbol("x1"),
                Token::Separator,
                Token::Symbol("x1"),
                Token::Separator,
                Token::Literal("-0x1"),
            ],
        );
    }

    #[test]
    fn skips_comments_and_whitespace() {
        assert_eq!(lex("   # just a comment"), vec![]);
        assert_eq!(lex(""), vec![]);
        assert_eq!(
            lex("sub x1, x1, x2 # decrement"),
            vec![
                Token::Symbol("sub"),
                Token::Symbol("x1"),
                Token::Separator,
                Token::Symbol("x1"),
                Token::Separator,
                Token::Symbol("x2"),
            ],
        );
    }
}
