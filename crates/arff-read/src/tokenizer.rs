//! Character-level ARFF tokenizer.
//!
//! Yields one lexical token at a time from a character stream: quoted or
//! unquoted words, end-of-line markers, and a final end-of-file marker.
//! Comments (`%` to end of line), whitespace, and the escape alphabet from
//! [`arff_model::escape`] are handled here.
//!
//! The tokenizer holds exactly one character of pushback in an explicit
//! field, so a peeked line-terminator or structural character is never
//! double-consumed and token order never depends on hidden state.

use std::str::Chars;

use arff_model::escape::UNIT_SEPARATOR;

use crate::error::{ReadError, Result};

/// One lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A word: quoted text with escapes decoded, or a bare unquoted token.
    /// Structural characters (`,`, `{`, `}`) outside quotes are single
    /// unquoted words.
    Word { text: String, quoted: bool },
    /// A line terminator (`\r`, `\r\n`, or `\n`), or a discarded comment line.
    EndOfLine,
    /// End of input with no pending partial token.
    EndOfFile,
}

impl Token {
    /// Human-readable rendering for error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Word { text, .. } => text.clone(),
            Token::EndOfLine => "end of line".to_string(),
            Token::EndOfFile => "end of file".to_string(),
        }
    }

    /// Whether this is the unquoted structural word `symbol`.
    pub fn is_structural(&self, symbol: &str) -> bool {
        matches!(self, Token::Word { text, quoted: false } if text == symbol)
    }
}

/// Tokenizer over a borrowed source string.
///
/// Mutable, single-consumer state: one tokenizer per stream, used by one
/// logical thread of control for its whole lifetime.
pub struct Tokenizer<'a> {
    chars: Chars<'a>,
    pushback: Option<char>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars(),
            pushback: None,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        self.pushback.take().or_else(|| self.chars.next())
    }

    fn push_back(&mut self, ch: char) {
        debug_assert!(self.pushback.is_none(), "pushback already occupied");
        self.pushback = Some(ch);
    }

    /// Read the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            let Some(ch) = self.next_char() else {
                return Ok(Token::EndOfFile);
            };
            match ch {
                '\n' => return Ok(Token::EndOfLine),
                '\r' => {
                    self.consume_linefeed();
                    return Ok(Token::EndOfLine);
                }
                '%' => return self.skip_comment(),
                ',' | '{' | '}' => {
                    return Ok(Token::Word {
                        text: ch.to_string(),
                        quoted: false,
                    });
                }
                '\'' | '"' => return self.read_quoted(ch),
                ch if ch.is_whitespace() => continue,
                ch => return self.read_unquoted(ch),
            }
        }
    }

    /// After a `\r`: swallow a following `\n` so `\r\n` is one terminator.
    fn consume_linefeed(&mut self) {
        if let Some(next) = self.next_char()
            && next != '\n'
        {
            self.push_back(next);
        }
    }

    /// Discard the rest of a comment line and report the line terminator.
    fn skip_comment(&mut self) -> Result<Token> {
        loop {
            match self.next_char() {
                None | Some('\n') => return Ok(Token::EndOfLine),
                Some('\r') => {
                    self.consume_linefeed();
                    return Ok(Token::EndOfLine);
                }
                Some(_) => continue,
            }
        }
    }

    /// Read a quoted word, decoding escapes, until the matching quote.
    fn read_quoted(&mut self, quote: char) -> Result<Token> {
        let mut text = String::new();
        loop {
            match self.next_char() {
                None | Some('\n') | Some('\r') => return Err(ReadError::UnterminatedQuote),
                Some('\\') => self.read_escape(&mut text)?,
                Some(ch) if ch == quote => break,
                Some(ch) => text.push(ch),
            }
        }
        Ok(Token::Word { text, quoted: true })
    }

    /// Decode one escape sequence into `text`.
    ///
    /// An unrecognized escape keeps the backslash and character verbatim.
    fn read_escape(&mut self, text: &mut String) -> Result<()> {
        match self.next_char() {
            None => Err(ReadError::UnterminatedQuote),
            Some('"') => {
                text.push('"');
                Ok(())
            }
            Some('\'') => {
                text.push('\'');
                Ok(())
            }
            Some('%') => {
                text.push('%');
                Ok(())
            }
            Some('\\') => {
                text.push('\\');
                Ok(())
            }
            Some('r') => {
                text.push('\r');
                Ok(())
            }
            Some('n') => {
                text.push('\n');
                Ok(())
            }
            Some('t') => {
                text.push('\t');
                Ok(())
            }
            Some('u') => {
                // Exactly the four hex digits 001E are accepted.
                let mut digits = String::with_capacity(4);
                for _ in 0..4 {
                    match self.next_char() {
                        Some(ch) if ch != '\n' && ch != '\r' => digits.push(ch),
                        _ => {
                            return Err(ReadError::InvalidEscape {
                                sequence: format!("\\u{digits}"),
                            });
                        }
                    }
                }
                if digits.eq_ignore_ascii_case("001e") {
                    text.push(UNIT_SEPARATOR);
                    Ok(())
                } else {
                    Err(ReadError::InvalidEscape {
                        sequence: format!("\\u{digits}"),
                    })
                }
            }
            Some(other) => {
                text.push('\\');
                text.push(other);
                Ok(())
            }
        }
    }

    /// Read an unquoted word starting with `first`.
    ///
    /// The word ends at whitespace, a structural character, `%`, a line
    /// terminator, or end of file; a non-whitespace terminator is pushed back
    /// for the next call.
    fn read_unquoted(&mut self, first: char) -> Result<Token> {
        let mut text = String::new();
        text.push(first);
        loop {
            match self.next_char() {
                None => break,
                Some(ch @ (',' | '{' | '}' | '%' | '\n' | '\r')) => {
                    self.push_back(ch);
                    break;
                }
                Some(ch) if ch.is_whitespace() => break,
                Some(ch) => text.push(ch),
            }
        }
        Ok(Token::Word {
            text,
            quoted: false,
        })
    }
}
