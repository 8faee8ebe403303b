//! Tokenizer for Python source.
//!
//! Produces logical lines: physical lines joined across open brackets and
//! backslash continuations, with comments dropped. Only the shape needed to
//! find top-level statements is kept; literal values are not decoded.

use crate::InspectError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Name,
    Number,
    String,
    Op,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based physical line the token starts on.
    pub line: usize,
    /// 0-based character column on that line.
    pub column: usize,
}

impl Token {
    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Op && self.text == op
    }

    pub fn is_name(&self, name: &str) -> bool {
        self.kind == TokenKind::Name && self.text == name
    }
}

/// One logical line of source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Column of the first token; `0` means the line is not indented.
    pub indent: usize,
    pub tokens: Vec<Token>,
}

impl LogicalLine {
    pub fn line(&self) -> usize {
        self.tokens.first().map_or(0, |t| t.line)
    }
}

const THREE_CHAR_OPS: &[&str] = &["**=", "//=", ">>=", "<<=", "..."];
const TWO_CHAR_OPS: &[&str] = &[
    "**", "//", "<<", ">>", "<=", ">=", "==", "!=", "->", ":=", "+=", "-=", "*=", "/=", "%=",
    "&=", "|=", "^=", "@=",
];
const STRING_PREFIXES: &[&str] = &[
    "r", "u", "b", "f", "t", "br", "rb", "fr", "rf", "tr", "rt",
];

pub struct PythonLexer;

impl PythonLexer {
    /// Splits `source` into logical lines.
    ///
    /// # Errors
    ///
    /// Fails on unterminated strings, unbalanced brackets, and stray
    /// characters after a line-continuation backslash.
    pub fn tokenize(source: &str) -> Result<Vec<LogicalLine>, InspectError> {
        let normalized = source
            .strip_prefix('\u{feff}')
            .unwrap_or(source)
            .replace("\r\n", "\n")
            .replace('\r', "\n");
        Scanner::new(&normalized).run()
    }
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    brackets: Vec<(char, usize)>,
    current: Vec<Token>,
    lines: Vec<LogicalLine>,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 0,
            brackets: Vec::new(),
            current: Vec::new(),
            lines: Vec::new(),
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek(0)?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn run(mut self) -> Result<Vec<LogicalLine>, InspectError> {
        while let Some(ch) = self.peek(0) {
            match ch {
                '\n' => {
                    self.advance();
                    if self.brackets.is_empty() {
                        self.flush();
                    }
                }
                ' ' | '\t' => {
                    self.advance();
                }
                '\x0c' => {
                    self.advance();
                    // A leading form feed resets the indentation count.
                    if self.current.is_empty() {
                        self.column = 0;
                    }
                }
                '#' => {
                    while self.peek(0).is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                '\\' => {
                    if self.peek(1) != Some('\n') {
                        return Err(InspectError::InvalidContinuation { line: self.line });
                    }
                    self.advance();
                    self.advance();
                }
                '\'' | '"' => self.string(self.pos)?,
                c if is_identifier_start(c) => self.name()?,
                c if c.is_ascii_digit() => self.number(),
                '.' if self.peek(1).is_some_and(|c| c.is_ascii_digit()) => self.number(),
                _ => self.operator()?,
            }
        }

        if let Some((bracket, line)) = self.brackets.pop() {
            return Err(InspectError::UnbalancedBracket { bracket, line });
        }
        self.flush();
        Ok(self.lines)
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let tokens = std::mem::take(&mut self.current);
        self.lines.push(LogicalLine {
            indent: tokens[0].column,
            tokens,
        });
    }

    fn push(&mut self, kind: TokenKind, start: usize, line: usize, column: usize) {
        let text = self.chars[start..self.pos].iter().collect();
        self.current.push(Token {
            kind,
            text,
            line,
            column,
        });
    }

    fn name(&mut self) -> Result<(), InspectError> {
        let (start, line, column) = (self.pos, self.line, self.column);
        while self.peek(0).is_some_and(is_identifier_continue) {
            self.advance();
        }

        let is_prefix = {
            let word: String = self.chars[start..self.pos].iter().collect();
            STRING_PREFIXES.contains(&word.to_ascii_lowercase().as_str())
        };
        if is_prefix && matches!(self.peek(0), Some('\'' | '"')) {
            // Rewind so the string token includes its prefix.
            self.pos = start;
            self.column = column;
            return self.string(start);
        }

        self.push(TokenKind::Name, start, line, column);
        Ok(())
    }

    fn string(&mut self, start: usize) -> Result<(), InspectError> {
        let (line, column) = (self.line, self.column);
        while self.peek(0).is_some_and(|c| c != '\'' && c != '"') {
            self.advance();
        }
        let Some(quote) = self.advance() else {
            return Err(InspectError::UnterminatedString { line });
        };
        let triple = self.peek(0) == Some(quote) && self.peek(1) == Some(quote);
        if triple {
            self.advance();
            self.advance();
        }

        loop {
            let Some(ch) = self.advance() else {
                return Err(InspectError::UnterminatedString { line });
            };
            match ch {
                '\\' => {
                    if self.advance().is_none() {
                        return Err(InspectError::UnterminatedString { line });
                    }
                }
                '\n' if !triple => return Err(InspectError::UnterminatedString { line }),
                c if c == quote && !triple => break,
                c if c == quote && self.peek(0) == Some(quote) && self.peek(1) == Some(quote) => {
                    self.advance();
                    self.advance();
                    break;
                }
                _ => {}
            }
        }

        self.push(TokenKind::String, start, line, column);
        Ok(())
    }

    fn number(&mut self) {
        let (start, line, column) = (self.pos, self.line, self.column);
        let mut prev = '\0';
        while let Some(ch) = self.peek(0) {
            let exponent_sign = matches!(ch, '+' | '-')
                && matches!(prev, 'e' | 'E')
                && !matches!(self.chars.get(start + 1), Some('x' | 'X'));
            if !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' || exponent_sign) {
                break;
            }
            prev = ch;
            self.advance();
        }
        self.push(TokenKind::Number, start, line, column);
    }

    fn operator(&mut self) -> Result<(), InspectError> {
        let (start, line, column) = (self.pos, self.line, self.column);
        let ahead: String = self.chars[start..(start + 3).min(self.chars.len())]
            .iter()
            .collect();

        let width = if THREE_CHAR_OPS.iter().any(|op| ahead.starts_with(op)) {
            3
        } else if TWO_CHAR_OPS.iter().any(|op| ahead.starts_with(op)) {
            2
        } else {
            1
        };
        for _ in 0..width {
            self.advance();
        }

        let ch = self.chars[start];
        match ch {
            '(' | '[' | '{' => self.brackets.push((ch, line)),
            ')' | ']' | '}' => {
                let expected = match ch {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match self.brackets.pop() {
                    Some((open, _)) if open == expected => {}
                    _ => return Err(InspectError::UnbalancedBracket { bracket: ch, line }),
                }
            }
            _ => {}
        }

        self.push(TokenKind::Op, start, line, column);
        Ok(())
    }
}

pub fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

pub fn is_identifier_continue(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &LogicalLine) -> Vec<&str> {
        line.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_splits_physical_lines() {
        let lines = PythonLexer::tokenize("x = 1\ny += 2\n").expect("tokenize");
        assert_eq!(lines.len(), 2);
        assert_eq!(texts(&lines[0]), vec!["x", "=", "1"]);
        assert_eq!(texts(&lines[1]), vec!["y", "+=", "2"]);
    }

    #[test]
    fn test_tokenize_joins_bracketed_lines() {
        let src = "CONFIG = {\n    'a': 1,\n}\nafter = 2\n";
        let lines = PythonLexer::tokenize(src).expect("tokenize");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].indent, 0);
        assert_eq!(lines[1].tokens[0].text, "after");
        assert_eq!(lines[1].line(), 4);
    }

    #[test]
    fn test_tokenize_joins_backslash_continuation() {
        let lines = PythonLexer::tokenize("total = 1 + \\\n    2\n").expect("tokenize");
        assert_eq!(lines.len(), 1);
        assert_eq!(texts(&lines[0]), vec!["total", "=", "1", "+", "2"]);
    }

    #[test]
    fn test_tokenize_keeps_triple_quoted_string_as_one_token() {
        let src = "DOC = \"\"\"\nthing = 1\n\"\"\"\n";
        let lines = PythonLexer::tokenize(src).expect("tokenize");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].tokens[2].kind, TokenKind::String);
    }

    #[test]
    fn test_tokenize_handles_prefixed_and_escaped_strings() {
        let lines = PythonLexer::tokenize("p = rb'\\'' + f\"{x}\"\n").expect("tokenize");
        let kinds: Vec<TokenKind> = lines[0].tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Name,
                TokenKind::Op,
                TokenKind::String,
                TokenKind::Op,
                TokenKind::String
            ]
        );
    }

    #[test]
    fn test_tokenize_drops_comments_and_records_indent() {
        let src = "def f():  # entry\n    return 1\n";
        let lines = PythonLexer::tokenize(src).expect("tokenize");
        assert_eq!(lines.len(), 2);
        assert_eq!(texts(&lines[0]), vec!["def", "f", "(", ")", ":"]);
        assert_eq!(lines[1].indent, 4);
    }

    #[test]
    fn test_tokenize_multi_char_operators() {
        let lines = PythonLexer::tokenize("a == b != c := d ** e\n").expect("tokenize");
        assert_eq!(
            texts(&lines[0]),
            vec!["a", "==", "b", "!=", "c", ":=", "d", "**", "e"]
        );
    }

    #[test]
    fn test_tokenize_numbers_with_exponent() {
        let lines = PythonLexer::tokenize("x = 1.5e-3 + 0xFF\n").expect("tokenize");
        assert_eq!(texts(&lines[0]), vec!["x", "=", "1.5e-3", "+", "0xFF"]);
    }

    #[test]
    fn test_tokenize_rejects_unterminated_string() {
        let err = PythonLexer::tokenize("x = 'abc\n").unwrap_err();
        assert_eq!(err, InspectError::UnterminatedString { line: 1 });
    }

    #[test]
    fn test_tokenize_rejects_unclosed_bracket() {
        let err = PythonLexer::tokenize("x = [1,\n2\n").unwrap_err();
        assert_eq!(
            err,
            InspectError::UnbalancedBracket {
                bracket: '[',
                line: 1
            }
        );
    }

    #[test]
    fn test_tokenize_rejects_mismatched_bracket() {
        let err = PythonLexer::tokenize("x = (1]\n").unwrap_err();
        assert_eq!(
            err,
            InspectError::UnbalancedBracket {
                bracket: ']',
                line: 1
            }
        );
    }

    #[test]
    fn test_tokenize_leading_form_feed_resets_indent() {
        let lines = PythonLexer::tokenize("\x0cdef f(): pass\n  \x0cx = 1\n").expect("tokenize");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].indent, 0);
        assert_eq!(lines[1].indent, 0);
    }

    #[test]
    fn test_tokenize_accepts_crlf_and_bom() {
        let lines = PythonLexer::tokenize("\u{feff}a = 1\r\nb = 2\r\n").expect("tokenize");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].indent, 0);
    }
}
