//! Test-only helpers shared by the call analysis tests.

use crate::tokens::TokenKind::{self, *};
use crate::tokens::TokenStream;

/// Minimal PHP-ish lexer so call analysis can be tested without a parser.
/// Understands words, `$vars`, quoted strings (double-quoted ones containing
/// `$` count as interpolated), brackets, `->`, `::` and `/* */` comments;
/// everything else is a one-char operator.
pub(crate) fn lex(code: &str) -> TokenStream {
    let mut parts: Vec<(TokenKind, &str)> = Vec::new();
    let bytes = code.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        let start = i;
        let kind = if c.is_whitespace() {
            while i < bytes.len() && (bytes[i] as char).is_whitespace() {
                i += 1;
            }
            Whitespace
        } else if code[i..].starts_with("/*") {
            i += code[i..].find("*/").map_or(code.len() - i, |e| e + 2);
            Comment
        } else if c == '\'' {
            i += 1 + code[i + 1..].find('\'').map_or(code.len() - i - 1, |e| e + 1);
            StringLiteral
        } else if c == '"' {
            i += 1 + code[i + 1..].find('"').map_or(code.len() - i - 1, |e| e + 1);
            if code[start..i].contains('$') {
                InterpolatedString
            } else {
                StringLiteral
            }
        } else if c.is_ascii_alphabetic() || c == '_' || c == '$' || c.is_ascii_digit() {
            i += 1;
            while i < bytes.len()
                && ((bytes[i] as char).is_ascii_alphanumeric() || bytes[i] == b'_')
            {
                i += 1;
            }
            match &code[start..i] {
                "function" => Function,
                "array" => Keyword,
                w if w.starts_with('$') => Variable,
                w if w.as_bytes()[0].is_ascii_digit() => NumberLiteral,
                _ => Identifier,
            }
        } else if code[i..].starts_with("->") || code[i..].starts_with("::") {
            i += 2;
            if c == '-' { ObjectOperator } else { DoubleColon }
        } else {
            i += 1;
            match c {
                '(' => OpenParenthesis,
                ')' => CloseParenthesis,
                '[' => OpenSquareBracket,
                ']' => CloseSquareBracket,
                '{' => OpenCurlyBracket,
                '}' => CloseCurlyBracket,
                ',' => Comma,
                '&' => BitwiseAnd,
                _ => Operator,
            }
        };
        parts.push((kind, &code[start..i]));
    }
    TokenStream::from_parts(parts)
}
