//! Parsing a tokenized line into its label, mnemonic and operand parts.

use logos::Logos;

use crate::error::ErrorKind;
use crate::program::SourceLine;
use crate::token::Token;

/// Parses one line of source.
///
/// Returns `Ok(None)` for blank and comment-only lines. The accepted line
/// grammar is `[label:] [mnemonic [operand [, operand]*]]`; operand
/// separators are optional, matching the whitespace-or-comma splitting of
/// the source format.
pub fn parse_line(number: usize, source: &str) -> Result<Option<SourceLine>, ErrorKind> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        if token == Token::Error {
            return Err(ErrorKind::UnexpectedToken {
                column: lexer.span().start + 1,
            });
        }

        tokens.push((token, lexer.span()));
    }

    if tokens.is_empty() {
        return Ok(None);
    }

    let mut line = SourceLine {
        number,
        label: None,
        mnemonic: None,
        operands: Vec::new(),
    };

    let mut cursor = 0;

    if let (Token::Symbol(label), _) = &tokens[0] {
        if let Some((Token::LabelMarker, _)) = tokens.get(1) {
            line.label = Some((*label).to_string());
            cursor = 2;
        }
    }

    if cursor < tokens.len() {
        match &tokens[cursor] {
            (Token::Symbol(mnemonic), _) => {
                line.mnemonic = Some((*mnemonic).to_string());
                cursor += 1;
            }
            (_, span) => {
                return Err(ErrorKind::UnexpectedToken {
                    column: span.start + 1,
                });
            }
        }
    }

    for (token, span) in &tokens[cursor..] {
        match token {
            Token::Symbol(operand) => line.operands.push((*operand).to_string()),
            Token::Literal(operand) => line.operands.push((*operand).to_string()),
            Token::Memory(operand) => line.operands.push((*operand).to_string()),
            Token::Separator => (),
            _ => {
                return Err(ErrorKind::UnexpectedToken {
                    column: span.start + 1,
                });
            }
        }
    }

    Ok(Some(line))
}
