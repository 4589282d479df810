//! The three-mode scanner.
//!
//! Text mode collects verbatim characters until `{@` or `{:`. Statement
//! mode runs until `@}` and expression mode until `:}`; both produce the
//! same token grammar and differ only in which blanks they skip and in
//! their closing delimiter.

use cap_ir::{Span, Token, TokenKind, TokenList};

use crate::cursor::Cursor;
use crate::{LexError, LexErrorKind};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Mode {
    Text,
    /// Inside `{@ ... @}`.
    Stmt,
    /// Inside `{: ... :}`.
    Expr,
}

pub(crate) struct Scanner<'a> {
    cursor: Cursor<'a>,
    tokens: &'a mut TokenList,
    mode: Mode,
    /// Pending text run and the offset where it began.
    text: String,
    text_start: usize,
    /// Offset of the delimiter that opened the current region.
    region_start: usize,
}

type ScanResult = Result<(), LexError>;

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str, tokens: &'a mut TokenList) -> Self {
        Scanner {
            cursor: Cursor::new(source),
            tokens,
            mode: Mode::Text,
            text: String::new(),
            text_start: 0,
            region_start: 0,
        }
    }

    pub(crate) fn run(mut self) -> ScanResult {
        while !self.cursor.is_eof() {
            match self.mode {
                Mode::Text => self.scan_text(),
                Mode::Stmt | Mode::Expr => self.scan_region_token()?,
            }
        }
        self.flush_text();

        if self.mode == Mode::Text {
            Ok(())
        } else {
            Err(LexError::new(
                LexErrorKind::UnclosedRegion,
                Span::from_range(self.region_start..self.cursor.pos()),
            ))
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let span = Span::from_range(start..self.cursor.pos());
        self.tokens.push(Token::new(kind, span));
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        let span = Span::from_range(self.text_start..self.cursor.pos());
        self.tokens.push(Token::new(TokenKind::Text(text), span));
    }

    /// Consume one character (or delimiter) in text mode.
    fn scan_text(&mut self) {
        let start = self.cursor.pos();
        if self.text.is_empty() {
            self.text_start = start;
        }

        let Some(c) = self.cursor.bump() else {
            return;
        };
        match c {
            '{' if matches!(self.cursor.peek(), Some('@' | ':')) => {
                let is_stmt = self.cursor.bump() == Some('@');
                let text = std::mem::take(&mut self.text);
                if !text.is_empty() {
                    self.tokens.push(Token::new(
                        TokenKind::Text(text),
                        Span::from_range(self.text_start..start),
                    ));
                }
                if is_stmt {
                    self.push(TokenKind::StmtOpen, start);
                    self.mode = Mode::Stmt;
                } else {
                    self.push(TokenKind::ExprOpen, start);
                    self.mode = Mode::Expr;
                }
                self.region_start = start;
            }
            '\r' if self.cursor.peek() == Some('\n') => {
                self.cursor.bump();
                // A newline right before end of input is dropped.
                if !self.cursor.is_eof() {
                    self.text.push_str("\r\n");
                }
            }
            '\r' | '\n' => {
                if !self.cursor.is_eof() {
                    self.text.push(c);
                }
            }
            _ => self.text.push(c),
        }
    }

    fn is_blank(&self, c: char) -> bool {
        match self.mode {
            Mode::Stmt => matches!(c, ' ' | '\t' | '\x0b' | '\x0c'),
            _ => matches!(c, ' ' | '\t'),
        }
    }

    /// Scan one token (or skip one blank or comment) inside a region.
    fn scan_region_token(&mut self) -> ScanResult {
        let start = self.cursor.pos();
        let Some(c) = self.cursor.bump() else {
            return Ok(());
        };

        match c {
            c if self.is_blank(c) => {}
            '\r' => {
                self.cursor.eat('\n');
                self.push(TokenKind::Newline, start);
            }
            '\n' => self.push(TokenKind::Newline, start),
            '"' => self.scan_string(start)?,
            '0'..='9' => self.scan_integer(start)?,
            c if c == '_' || c.is_ascii_alphabetic() => self.scan_ident(start),
            '/' if self.cursor.peek() == Some('/') => {
                self.cursor.eat_while(|c| c != '\r' && c != '\n');
            }
            '/' if self.cursor.peek() == Some('*') => self.skip_block_comment()?,
            '@' if self.mode == Mode::Stmt => {
                if self.cursor.eat('}') {
                    self.push(TokenKind::StmtClose, start);
                    self.mode = Mode::Text;
                } else {
                    return Err(LexError::new(
                        LexErrorKind::SingleAt,
                        Span::from_range(start..self.cursor.pos()),
                    ));
                }
            }
            ':' if self.mode == Mode::Expr && self.cursor.peek() == Some('}') => {
                self.cursor.bump();
                self.push(TokenKind::ExprClose, start);
                self.mode = Mode::Text;
            }
            '=' => self.push_with_assign(start, TokenKind::Assign, TokenKind::EqEq),
            '+' => self.push_with_assign(start, TokenKind::Plus, TokenKind::PlusAssign),
            '-' => self.push_with_assign(start, TokenKind::Minus, TokenKind::MinusAssign),
            '*' => self.push_with_assign(start, TokenKind::Star, TokenKind::StarAssign),
            '/' => self.push_with_assign(start, TokenKind::Slash, TokenKind::SlashAssign),
            '%' => self.push_with_assign(start, TokenKind::Percent, TokenKind::PercentAssign),
            '<' => self.push_with_assign(start, TokenKind::Lt, TokenKind::LtEq),
            '>' => self.push_with_assign(start, TokenKind::Gt, TokenKind::GtEq),
            '!' => {
                if !self.cursor.eat('=') {
                    return Err(LexError::new(
                        LexErrorKind::UnsupportedChar('!'),
                        Span::from_range(start..self.cursor.pos()),
                    ));
                }
                self.push(TokenKind::NotEq, start);
            }
            '.' => self.push(TokenKind::Dot, start),
            ',' => self.push(TokenKind::Comma, start),
            ':' => self.push(TokenKind::Colon, start),
            ';' => self.push(TokenKind::Semicolon, start),
            '(' => self.push(TokenKind::LParen, start),
            ')' => self.push(TokenKind::RParen, start),
            '[' => self.push(TokenKind::LBracket, start),
            ']' => self.push(TokenKind::RBracket, start),
            '{' => self.push(TokenKind::LBrace, start),
            '}' => self.push(TokenKind::RBrace, start),
            other => {
                return Err(LexError::new(
                    LexErrorKind::UnsupportedChar(other),
                    Span::from_range(start..self.cursor.pos()),
                ));
            }
        }
        Ok(())
    }

    /// Push `plain`, or `with_eq` when the operator is followed by `=`.
    fn push_with_assign(&mut self, start: usize, plain: TokenKind, with_eq: TokenKind) {
        if self.cursor.eat('=') {
            self.push(with_eq, start);
        } else {
            self.push(plain, start);
        }
    }

    fn skip_block_comment(&mut self) -> ScanResult {
        self.cursor.bump();
        loop {
            match self.cursor.bump() {
                Some('*') if self.cursor.eat('/') => return Ok(()),
                Some(_) => {}
                None => {
                    return Err(LexError::new(
                        LexErrorKind::UnclosedRegion,
                        Span::from_range(self.region_start..self.cursor.pos()),
                    ))
                }
            }
        }
    }

    fn scan_ident(&mut self, start: usize) {
        self.cursor
            .eat_while(|c| c == '_' || c.is_ascii_alphanumeric());
        let word = self.slice(start);
        let kind = TokenKind::keyword(word).unwrap_or_else(|| TokenKind::Ident(word.to_string()));
        self.push(kind, start);
    }

    fn scan_integer(&mut self, start: usize) -> ScanResult {
        self.cursor.eat_while(|c| c.is_ascii_digit());
        let Ok(value) = self.slice(start).parse::<i64>() else {
            return Err(LexError::new(
                LexErrorKind::IntegerTooLarge,
                Span::from_range(start..self.cursor.pos()),
            ));
        };
        self.push(TokenKind::Int(value), start);
        Ok(())
    }

    /// Scan a double-quoted string. The opening quote is already consumed.
    fn scan_string(&mut self, start: usize) -> ScanResult {
        let mut value = String::new();
        loop {
            match self.cursor.bump() {
                Some('"') => break,
                Some('\\') => match self.cursor.bump() {
                    Some(escaped) => match unescape(escaped) {
                        Some(c) => value.push(c),
                        None => {
                            value.push('\\');
                            value.push(escaped);
                        }
                    },
                    None => return Err(self.unterminated_string(start)),
                },
                Some(c) => value.push(c),
                None => return Err(self.unterminated_string(start)),
            }
        }
        self.push(TokenKind::Str(value), start);
        Ok(())
    }

    fn unterminated_string(&self, start: usize) -> LexError {
        LexError::new(
            LexErrorKind::UnterminatedString,
            Span::from_range(start..self.cursor.pos()),
        )
    }

    fn slice(&self, start: usize) -> &'a str {
        self.cursor.slice_from(start)
    }
}

/// Resolve the character after a backslash. `None` keeps the escape as
/// written.
fn unescape(c: char) -> Option<char> {
    let resolved = match c {
        '0' => '\0',
        'a' => '\x07',
        'b' => '\x08',
        'f' => '\x0c',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '\\' => '\\',
        '\'' => '\'',
        '"' => '"',
        _ => return None,
    };
    Some(resolved)
}
