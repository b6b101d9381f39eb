//! Immutable token sequence with navigation queries.
//!
//! Bracket matching is precomputed in one linear pass with a stack of open
//! positions, so every bracket lookup below is constant time.

use super::{Token, TokenKind, TokenKinds};

#[derive(Debug, Default)]
struct BracketIndex {
    /// Counterpart of each matched bracket token
    matching: Vec<Option<usize>>,
    /// Opener of the innermost bracket pair enclosing each token
    enclosing: Vec<Option<usize>>,
}

impl BracketIndex {
    fn build(tokens: &[Token]) -> Self {
        let mut matching = vec![None; tokens.len()];
        let mut enclosing = vec![None; tokens.len()];
        let mut open: Vec<usize> = Vec::new();

        for (pos, token) in tokens.iter().enumerate() {
            if token.kind.is_closer() {
                // Close the nearest opener of the same shape; anything opened
                // after it is left unmatched.
                if let Some(depth) = open
                    .iter()
                    .rposition(|&o| tokens[o].kind.closer() == Some(token.kind))
                {
                    let opener = open[depth];
                    open.truncate(depth);
                    matching[opener] = Some(pos);
                    matching[pos] = Some(opener);
                }
                enclosing[pos] = open.last().copied();
            } else {
                enclosing[pos] = open.last().copied();
                if token.kind.is_opener() {
                    open.push(pos);
                }
            }
        }

        Self {
            matching,
            enclosing,
        }
    }
}

/// Ordered tokens of one source file.
#[derive(Debug, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    brackets: BracketIndex,
}

impl TokenStream {
    /// Build a stream, assigning positions and indexing brackets.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        for (pos, token) in tokens.iter_mut().enumerate() {
            token.position = pos;
        }
        let brackets = BracketIndex::build(&tokens);
        Self { tokens, brackets }
    }

    /// Build a stream from kinds and texts, deriving lines and columns
    /// from the concatenated text.
    pub fn from_parts<'a>(parts: impl IntoIterator<Item = (TokenKind, &'a str)>) -> Self {
        let mut line = 1;
        let mut column = 1;
        let tokens = parts
            .into_iter()
            .map(|(kind, text)| {
                let token = Token::new(kind, text, line, column);
                for ch in text.chars() {
                    if ch == '\n' {
                        line += 1;
                        column = 1;
                    } else {
                        column += 1;
                    }
                }
                token
            })
            .collect();
        Self::new(tokens)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Token> {
        self.tokens.get(position)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    fn matches(&self, position: usize, kinds: TokenKinds, exclude: bool) -> bool {
        kinds.contains(self.tokens[position].kind.flag()) != exclude
    }

    /// First position in `[from, to)` whose kind is in `kinds`, or with
    /// `exclude` set, whose kind is not. `to` defaults to the stream end.
    pub fn find_next(
        &self,
        kinds: TokenKinds,
        from: usize,
        to: Option<usize>,
        exclude: bool,
    ) -> Option<usize> {
        let end = to.map_or(self.len(), |to| to.min(self.len()));
        (from..end).find(|&pos| self.matches(pos, kinds, exclude))
    }

    /// Last position searching backwards from `from` down to `to`
    /// (inclusive, defaults to 0) whose kind is in `kinds`, or with
    /// `exclude` set, whose kind is not.
    pub fn find_previous(
        &self,
        kinds: TokenKinds,
        from: usize,
        to: Option<usize>,
        exclude: bool,
    ) -> Option<usize> {
        let last = self.len().checked_sub(1)?;
        let start = from.min(last);
        let end = to.unwrap_or(0);
        if start < end {
            return None;
        }
        (end..=start)
            .rev()
            .find(|&pos| self.matches(pos, kinds, exclude))
    }

    /// First non-whitespace, non-comment position at or after `from`.
    pub fn next_substantive(&self, from: usize) -> Option<usize> {
        self.find_next(TokenKinds::EMPTY, from, None, true)
    }

    /// Last non-whitespace, non-comment position at or before `from`.
    pub fn previous_substantive(&self, from: usize) -> Option<usize> {
        self.find_previous(TokenKinds::EMPTY, from, None, true)
    }

    /// Counterpart of the bracket at `position`, if it is a matched bracket.
    pub fn matching_bracket(&self, position: usize) -> Option<usize> {
        self.brackets.matching.get(position).copied().flatten()
    }

    /// Opener of the innermost bracket pair enclosing `position`.
    pub fn enclosing_opener(&self, position: usize) -> Option<usize> {
        self.brackets.enclosing.get(position).copied().flatten()
    }

    /// Closer of the innermost bracket pair enclosing `position`.
    pub fn enclosing_closer(&self, position: usize) -> Option<usize> {
        self.enclosing_opener(position)
            .and_then(|opener| self.matching_bracket(opener))
    }

    /// Concatenated text of the tokens in `start..=end`.
    pub fn text(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len().saturating_sub(1));
        if self.is_empty() || start > end {
            return String::new();
        }
        self.tokens[start..=end]
            .iter()
            .map(|t| t.text.as_ref())
            .collect()
    }

    /// The full source text the stream was built from.
    pub fn source(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_ref()).collect()
    }
}

impl std::ops::Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, position: usize) -> &Token {
        &self.tokens[position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    // foo ( [ 1 , 2 ] , $x )
    fn sample() -> TokenStream {
        TokenStream::from_parts([
            (Identifier, "foo"),
            (OpenParenthesis, "("),
            (OpenSquareBracket, "["),
            (NumberLiteral, "1"),
            (Comma, ","),
            (Whitespace, " "),
            (NumberLiteral, "2"),
            (CloseSquareBracket, "]"),
            (Comma, ","),
            (Whitespace, " "),
            (Comment, "/* x */"),
            (Variable, "$x"),
            (CloseParenthesis, ")"),
        ])
    }

    #[test]
    fn test_positions_assigned() {
        let stream = sample();
        for (pos, token) in stream.iter().enumerate() {
            assert_eq!(token.position, pos);
        }
        assert_eq!(stream[11].text.as_ref(), "$x");
    }

    #[test]
    fn test_matching_brackets() {
        let stream = sample();
        assert_eq!(stream.matching_bracket(1), Some(12));
        assert_eq!(stream.matching_bracket(12), Some(1));
        assert_eq!(stream.matching_bracket(2), Some(7));
        assert_eq!(stream.matching_bracket(0), None);
    }

    #[test]
    fn test_enclosing_is_innermost() {
        let stream = sample();
        // comma inside the array
        assert_eq!(stream.enclosing_closer(4), Some(7));
        // comma directly inside the call
        assert_eq!(stream.enclosing_closer(8), Some(12));
        // the array opener itself belongs to the call
        assert_eq!(stream.enclosing_closer(2), Some(12));
        // the call name is outside any bracket
        assert_eq!(stream.enclosing_closer(0), None);
    }

    #[test]
    fn test_unmatched_opener() {
        let stream = TokenStream::from_parts([
            (Identifier, "foo"),
            (OpenParenthesis, "("),
            (NumberLiteral, "1"),
        ]);
        assert_eq!(stream.matching_bracket(1), None);
        assert_eq!(stream.enclosing_opener(2), Some(1));
        assert_eq!(stream.enclosing_closer(2), None);
    }

    #[test]
    fn test_mismatched_closer_leaves_inner_unmatched() {
        // ( [ )
        let stream = TokenStream::from_parts([
            (OpenParenthesis, "("),
            (OpenSquareBracket, "["),
            (CloseParenthesis, ")"),
        ]);
        assert_eq!(stream.matching_bracket(0), Some(2));
        assert_eq!(stream.matching_bracket(1), None);
    }

    #[test]
    fn test_find_next_and_previous() {
        let stream = sample();
        assert_eq!(stream.find_next(TokenKinds::COMMA, 0, None, false), Some(4));
        assert_eq!(stream.find_next(TokenKinds::COMMA, 5, Some(8), false), None);
        assert_eq!(stream.next_substantive(9), Some(11));
        assert_eq!(stream.previous_substantive(10), Some(8));
        assert_eq!(
            stream.find_previous(TokenKinds::IDENTIFIER, 12, None, false),
            Some(0)
        );
        assert_eq!(
            stream.find_previous(TokenKinds::IDENTIFIER, 12, Some(1), false),
            None
        );
        assert_eq!(stream.find_previous(TokenKinds::COMMA, 100, None, false), Some(8));
    }

    #[test]
    fn test_text_and_lines() {
        let stream = TokenStream::from_parts([
            (Identifier, "a"),
            (Whitespace, "\n  "),
            (Identifier, "b"),
        ]);
        assert_eq!(stream.source(), "a\n  b");
        assert_eq!(stream.text(1, 2), "\n  b");
        assert_eq!(stream[2].line, 2);
        assert_eq!(stream[2].column, 3);
    }

    #[test]
    fn test_empty_stream() {
        let stream = TokenStream::default();
        assert!(stream.is_empty());
        assert_eq!(stream.previous_substantive(0), None);
        assert_eq!(stream.next_substantive(0), None);
        assert_eq!(stream.text(0, 3), "");
    }
}
