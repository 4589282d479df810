//! Token types produced by the scanner.
//!
//! A token is a kind plus the span it covers. Literal payloads (text runs,
//! identifiers, integers, string literals) live inside the kind.

use super::Span;
use std::fmt;
use std::ops::Index;

/// A token with its span in the source.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Create a dummy token for tests.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Token kinds.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Verbatim text between code regions.
    Text(String),
    /// Identifier.
    Ident(String),
    /// Integer literal. Always non-negative; `-` is a separate token.
    Int(i64),
    /// Double-quoted string literal with escapes already resolved.
    Str(String),

    // Region delimiters
    /// `{@`
    StmtOpen,
    /// `@}`
    StmtClose,
    /// `{:`
    ExprOpen,
    /// `:}`
    ExprClose,
    /// CR, LF or CRLF inside a code region.
    Newline,

    // Keywords
    End,
    Import,
    As,
    From,
    If,
    Elif,
    Else,
    For,
    Or,
    And,
    Not,
    Nil,
    Break,
    Continue,
    Return,
    Def,
    Met,
    True,
    False,
    Block,
    Inject,
    Extends,
    Struct,
    Global,
    Nonlocal,

    // Operators
    /// `=`
    Assign,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `+`
    Plus,
    /// `+=`
    PlusAssign,
    /// `-`
    Minus,
    /// `-=`
    MinusAssign,
    /// `*`
    Star,
    /// `*=`
    StarAssign,
    /// `/`
    Slash,
    /// `/=`
    SlashAssign,
    /// `%`
    Percent,
    /// `%=`
    PercentAssign,

    // Punctuation
    Dot,
    Comma,
    Colon,
    Semicolon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

impl TokenKind {
    /// Look up the keyword spelled by `ident`, if any.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "end" => TokenKind::End,
            "import" => TokenKind::Import,
            "as" => TokenKind::As,
            "from" => TokenKind::From,
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "or" => TokenKind::Or,
            "and" => TokenKind::And,
            "not" => TokenKind::Not,
            "nil" => TokenKind::Nil,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "return" => TokenKind::Return,
            "def" => TokenKind::Def,
            "met" => TokenKind::Met,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "block" => TokenKind::Block,
            "inject" => TokenKind::Inject,
            "extends" => TokenKind::Extends,
            "struct" => TokenKind::Struct,
            "global" => TokenKind::Global,
            "nonlocal" => TokenKind::Nonlocal,
            _ => return None,
        };
        Some(kind)
    }

    /// Short human-readable name used by the `lex` dump and diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Text(_) => "text",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Int(_) => "integer",
            TokenKind::Str(_) => "string",
            TokenKind::StmtOpen => "{@",
            TokenKind::StmtClose => "@}",
            TokenKind::ExprOpen => "{:",
            TokenKind::ExprClose => ":}",
            TokenKind::Newline => "newline",
            TokenKind::End => "end",
            TokenKind::Import => "import",
            TokenKind::As => "as",
            TokenKind::From => "from",
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::Or => "or",
            TokenKind::And => "and",
            TokenKind::Not => "not",
            TokenKind::Nil => "nil",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::Def => "def",
            TokenKind::Met => "met",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Block => "block",
            TokenKind::Inject => "inject",
            TokenKind::Extends => "extends",
            TokenKind::Struct => "struct",
            TokenKind::Global => "global",
            TokenKind::Nonlocal => "nonlocal",
            TokenKind::Assign => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Plus => "+",
            TokenKind::PlusAssign => "+=",
            TokenKind::Minus => "-",
            TokenKind::MinusAssign => "-=",
            TokenKind::Star => "*",
            TokenKind::StarAssign => "*=",
            TokenKind::Slash => "/",
            TokenKind::SlashAssign => "/=",
            TokenKind::Percent => "%",
            TokenKind::PercentAssign => "%=",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Text(text) => write!(f, "text {text:?}"),
            TokenKind::Ident(name) => write!(f, "identifier `{name}`"),
            TokenKind::Int(value) => write!(f, "integer {value}"),
            TokenKind::Str(value) => write!(f, "string {value:?}"),
            other => write!(f, "`{}`", other.display_name()),
        }
    }
}

/// Ordered token sequence produced by one scan.
///
/// Re-scanning into an existing list clears and repopulates it in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Drop every token, keeping the allocation.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Token kinds only, mostly for assertions.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind.clone()).collect()
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
