//! PHP token stream producer backed by tree-sitter.
//!
//! The syntax tree is only used as a lexer: its leaves are flattened into
//! tokens in document order and the gaps between them become whitespace
//! tokens, so the stream is lossless.

use super::{Token, TokenKind, TokenStream};
use crate::error::{ScanError, ScanResult};
use std::path::Path;
use tree_sitter::{Node, Parser, Point};

/// Node kinds emitted as one token without descending into children.
const ATOMIC_KINDS: &[&str] = &[
    "comment",
    "string",
    "encapsed_string",
    "heredoc",
    "nowdoc",
    "shell_command_expression",
    "variable_name",
    "integer",
    "float",
    "text",
    "php_tag",
];

/// Named children of a string node that are plain text rather than
/// embedded expressions.
const STRING_PARTS: &[&str] = &[
    "string_content",
    "string_value",
    "escape_sequence",
    "heredoc_start",
    "heredoc_end",
    "heredoc_body",
    "nowdoc_body",
    "nowdoc_string",
];

pub struct PhpTokenizer {
    parser: Parser,
}

impl std::fmt::Debug for PhpTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhpTokenizer")
            .field("language", &"PHP")
            .finish()
    }
}

impl PhpTokenizer {
    pub fn new() -> ScanResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
            .map_err(|e| ScanError::Tokenizer {
                reason: format!("Failed to set PHP language: {e}"),
            })?;

        Ok(Self { parser })
    }

    /// Tokenize PHP source. `path` is only used for error reporting.
    pub fn tokenize(&mut self, code: &str, path: &Path) -> ScanResult<TokenStream> {
        let tree = self
            .parser
            .parse(code, None)
            .ok_or_else(|| ScanError::Parse {
                path: path.to_path_buf(),
            })?;

        let mut builder = LeafCollector {
            code,
            offset: 0,
            point: Point::new(0, 0),
            tokens: Vec::new(),
        };
        builder.visit(tree.root_node());
        builder.finish();

        Ok(TokenStream::new(builder.tokens))
    }
}

struct LeafCollector<'a> {
    code: &'a str,
    /// Byte offset up to which tokens have been emitted
    offset: usize,
    point: Point,
    tokens: Vec<Token>,
}

impl LeafCollector<'_> {
    fn visit(&mut self, node: Node) {
        if node.start_byte() == node.end_byte() {
            return;
        }

        if node.child_count() == 0 || ATOMIC_KINDS.contains(&node.kind()) {
            self.emit(node);
            return;
        }

        for child in node.children(&mut node.walk()) {
            self.visit(child);
        }
    }

    fn emit(&mut self, node: Node) {
        let start = node.start_byte();
        // Leaves never overlap; guard anyway so a malformed tree cannot
        // make us slice backwards.
        if start < self.offset {
            return;
        }
        self.gap(start);

        let text = &self.code[start..node.end_byte()];
        let kind = classify(node);
        self.tokens.push(Token::new(
            kind,
            text,
            node.start_position().row as u32 + 1,
            node.start_position().column as u32 + 1,
        ));
        self.offset = node.end_byte();
        self.point = node.end_position();
    }

    /// Emit the untokenized bytes before `until` as one token.
    fn gap(&mut self, until: usize) {
        if until <= self.offset {
            return;
        }
        let text = &self.code[self.offset..until];
        let kind = if text.chars().all(char::is_whitespace) {
            TokenKind::Whitespace
        } else {
            TokenKind::Other
        };
        self.tokens.push(Token::new(
            kind,
            text,
            self.point.row as u32 + 1,
            self.point.column as u32 + 1,
        ));
        self.offset = until;
    }

    fn finish(&mut self) {
        self.gap(self.code.len());
    }
}

fn classify(node: Node) -> TokenKind {
    match node.kind() {
        "name" => TokenKind::Identifier,
        "(" => TokenKind::OpenParenthesis,
        ")" => TokenKind::CloseParenthesis,
        "[" => TokenKind::OpenSquareBracket,
        "]" => TokenKind::CloseSquareBracket,
        "{" => TokenKind::OpenCurlyBracket,
        "}" => TokenKind::CloseCurlyBracket,
        "," => TokenKind::Comma,
        "function" => TokenKind::Function,
        "->" | "?->" => TokenKind::ObjectOperator,
        "::" => TokenKind::DoubleColon,
        "&" => TokenKind::BitwiseAnd,
        "comment" => TokenKind::Comment,
        "variable_name" => TokenKind::Variable,
        "encapsed_string" | "heredoc" if has_interpolation(node) => {
            TokenKind::InterpolatedString
        }
        "string" | "encapsed_string" | "heredoc" | "nowdoc" => TokenKind::StringLiteral,
        "integer" | "float" => TokenKind::NumberLiteral,
        kind if !node.is_named() && is_word(kind) => TokenKind::Keyword,
        _ if !node.is_named() => TokenKind::Operator,
        _ => TokenKind::Other,
    }
}

/// True when a double-quoted string or heredoc embeds `$var`, `{$expr}` or
/// `${expr}` somewhere below `node`.
fn has_interpolation(node: Node) -> bool {
    node.named_children(&mut node.walk()).any(|child| {
        !STRING_PARTS.contains(&child.kind()) || has_interpolation(child)
    })
}

fn is_word(kind: &str) -> bool {
    kind.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && kind.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
