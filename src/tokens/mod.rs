//! Token model consumed by call detection.
//!
//! A [`TokenStream`] is an immutable, randomly indexable sequence of
//! [`Token`]s plus a bracket index built once at construction. Producers
//! (such as [`php::PhpTokenizer`]) only need to emit kinds and texts.

pub mod php;
pub mod stream;

pub use php::PhpTokenizer;
pub use stream::TokenStream;

use crate::types::{CompactString, compact_string};
use bitflags::bitflags;

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    OpenParenthesis,
    CloseParenthesis,
    OpenSquareBracket,
    CloseSquareBracket,
    OpenCurlyBracket,
    CloseCurlyBracket,
    Comma,
    /// The `function` keyword
    Function,
    Keyword,
    /// `->` and `?->`
    ObjectOperator,
    /// `::`
    DoubleColon,
    /// `&`, also used as the by-reference marker
    BitwiseAnd,
    Operator,
    /// Single-quoted strings, nowdocs, and double-quoted strings or heredocs
    /// without embedded expressions
    StringLiteral,
    /// Double-quoted string or heredoc with embedded variables or expressions
    InterpolatedString,
    NumberLiteral,
    Variable,
    Whitespace,
    Comment,
    Other,
}

bitflags! {
    /// Set of token kinds used by stream searches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenKinds: u32 {
        const IDENTIFIER = 1 << 0;
        const OPEN_PARENTHESIS = 1 << 1;
        const CLOSE_PARENTHESIS = 1 << 2;
        const OPEN_SQUARE_BRACKET = 1 << 3;
        const CLOSE_SQUARE_BRACKET = 1 << 4;
        const OPEN_CURLY_BRACKET = 1 << 5;
        const CLOSE_CURLY_BRACKET = 1 << 6;
        const COMMA = 1 << 7;
        const FUNCTION = 1 << 8;
        const KEYWORD = 1 << 9;
        const OBJECT_OPERATOR = 1 << 10;
        const DOUBLE_COLON = 1 << 11;
        const BITWISE_AND = 1 << 12;
        const OPERATOR = 1 << 13;
        const STRING_LITERAL = 1 << 14;
        const NUMBER_LITERAL = 1 << 15;
        const VARIABLE = 1 << 16;
        const WHITESPACE = 1 << 17;
        const COMMENT = 1 << 18;
        const OTHER = 1 << 19;
        const INTERPOLATED_STRING = 1 << 20;

        /// Tokens that carry no meaning for call analysis
        const EMPTY = Self::WHITESPACE.bits() | Self::COMMENT.bits();
        const OPENERS = Self::OPEN_PARENTHESIS.bits()
            | Self::OPEN_SQUARE_BRACKET.bits()
            | Self::OPEN_CURLY_BRACKET.bits();
        const CLOSERS = Self::CLOSE_PARENTHESIS.bits()
            | Self::CLOSE_SQUARE_BRACKET.bits()
            | Self::CLOSE_CURLY_BRACKET.bits();
    }
}

impl TokenKind {
    /// The single-member set for this kind.
    pub fn flag(self) -> TokenKinds {
        match self {
            TokenKind::Identifier => TokenKinds::IDENTIFIER,
            TokenKind::OpenParenthesis => TokenKinds::OPEN_PARENTHESIS,
            TokenKind::CloseParenthesis => TokenKinds::CLOSE_PARENTHESIS,
            TokenKind::OpenSquareBracket => TokenKinds::OPEN_SQUARE_BRACKET,
            TokenKind::CloseSquareBracket => TokenKinds::CLOSE_SQUARE_BRACKET,
            TokenKind::OpenCurlyBracket => TokenKinds::OPEN_CURLY_BRACKET,
            TokenKind::CloseCurlyBracket => TokenKinds::CLOSE_CURLY_BRACKET,
            TokenKind::Comma => TokenKinds::COMMA,
            TokenKind::Function => TokenKinds::FUNCTION,
            TokenKind::Keyword => TokenKinds::KEYWORD,
            TokenKind::ObjectOperator => TokenKinds::OBJECT_OPERATOR,
            TokenKind::DoubleColon => TokenKinds::DOUBLE_COLON,
            TokenKind::BitwiseAnd => TokenKinds::BITWISE_AND,
            TokenKind::Operator => TokenKinds::OPERATOR,
            TokenKind::StringLiteral => TokenKinds::STRING_LITERAL,
            TokenKind::InterpolatedString => TokenKinds::INTERPOLATED_STRING,
            TokenKind::NumberLiteral => TokenKinds::NUMBER_LITERAL,
            TokenKind::Variable => TokenKinds::VARIABLE,
            TokenKind::Whitespace => TokenKinds::WHITESPACE,
            TokenKind::Comment => TokenKinds::COMMENT,
            TokenKind::Other => TokenKinds::OTHER,
        }
    }

    /// Whitespace and comments are not substantive.
    pub fn is_empty(self) -> bool {
        TokenKinds::EMPTY.contains(self.flag())
    }

    /// The closing kind paired with an opening bracket kind.
    pub fn closer(self) -> Option<TokenKind> {
        match self {
            TokenKind::OpenParenthesis => Some(TokenKind::CloseParenthesis),
            TokenKind::OpenSquareBracket => Some(TokenKind::CloseSquareBracket),
            TokenKind::OpenCurlyBracket => Some(TokenKind::CloseCurlyBracket),
            _ => None,
        }
    }

    pub fn is_opener(self) -> bool {
        TokenKinds::OPENERS.contains(self.flag())
    }

    pub fn is_closer(self) -> bool {
        TokenKinds::CLOSERS.contains(self.flag())
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::OpenParenthesis => "open_parenthesis",
            TokenKind::CloseParenthesis => "close_parenthesis",
            TokenKind::OpenSquareBracket => "open_square_bracket",
            TokenKind::CloseSquareBracket => "close_square_bracket",
            TokenKind::OpenCurlyBracket => "open_curly_bracket",
            TokenKind::CloseCurlyBracket => "close_curly_bracket",
            TokenKind::Comma => "comma",
            TokenKind::Function => "function",
            TokenKind::Keyword => "keyword",
            TokenKind::ObjectOperator => "object_operator",
            TokenKind::DoubleColon => "double_colon",
            TokenKind::BitwiseAnd => "bitwise_and",
            TokenKind::Operator => "operator",
            TokenKind::StringLiteral => "string",
            TokenKind::InterpolatedString => "interpolated_string",
            TokenKind::NumberLiteral => "number",
            TokenKind::Variable => "variable",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Other => "other",
        }
    }
}

/// One lexical unit of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: CompactString,
    /// Index of this token in its stream, assigned by [`TokenStream::new`]
    pub position: usize,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: &str, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: compact_string(text),
            position: 0,
            line,
            column,
        }
    }

    pub fn is_substantive(&self) -> bool {
        !self.kind.is_empty()
    }
}
