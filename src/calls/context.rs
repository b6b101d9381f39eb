//! Per-occurrence call state and argument boundary resolution.

use crate::tokens::{Token, TokenKinds, TokenStream};
use std::collections::BTreeMap;

/// Inclusive token range of one argument expression.
///
/// `start` and `end` are the first and last substantive tokens of the
/// argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArgumentBoundary {
    pub start: usize,
    pub end: usize,
}

impl ArgumentBoundary {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// True when the argument is a single token.
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

/// A detected function call, handed to every listener for its name.
///
/// Built fresh for each occurrence and dropped once dispatch returns;
/// resolved arguments are cached here and never recomputed.
#[derive(Debug)]
pub struct FunctionCall<'a> {
    tokens: &'a TokenStream,
    name: usize,
    open: usize,
    close: usize,
    arguments: BTreeMap<usize, ArgumentBoundary>,
}

impl<'a> FunctionCall<'a> {
    pub fn new(tokens: &'a TokenStream, name: usize, open: usize, close: usize) -> Self {
        Self {
            tokens,
            name,
            open,
            close,
            arguments: BTreeMap::new(),
        }
    }

    pub fn tokens(&self) -> &'a TokenStream {
        self.tokens
    }

    /// Position of the function name token.
    pub fn name_position(&self) -> usize {
        self.name
    }

    pub fn name_token(&self) -> &'a Token {
        let tokens = self.tokens;
        &tokens[self.name]
    }

    pub fn function_name(&self) -> &'a str {
        &self.name_token().text
    }

    pub fn open_bracket(&self) -> usize {
        self.open
    }

    pub fn close_bracket(&self) -> usize {
        self.close
    }

    /// Boundary of argument `number` (1-based), or `None` when the call has
    /// no such argument.
    ///
    /// Resolution walks the call's own commas left to right, caching each
    /// argument it passes and stopping at the requested one.
    pub fn argument(&mut self, number: usize) -> Option<ArgumentBoundary> {
        if let Some(boundary) = self.arguments.get(&number) {
            return Some(*boundary);
        }
        if number == 0 {
            return None;
        }

        let tokens = self.tokens;
        let mut start = tokens.next_substantive(self.open + 1)?;
        if start == self.close {
            return None;
        }

        let last_end = tokens.previous_substantive(self.close - 1)?;
        let mut counter = 1;
        let mut cursor = self.open;

        while let Some(comma) =
            tokens.find_next(TokenKinds::COMMA, cursor + 1, Some(self.close), false)
        {
            cursor = comma;
            // Commas of nested calls, arrays and closures belong to an
            // inner bracket pair.
            if tokens.enclosing_closer(comma) != Some(self.close) {
                continue;
            }

            let end = tokens.previous_substantive(comma - 1)?;
            let boundary = ArgumentBoundary::new(start, end);
            self.arguments.insert(counter, boundary);
            if counter == number {
                return Some(boundary);
            }

            counter += 1;
            start = tokens.next_substantive(comma + 1)?;
        }

        // A trailing comma leaves nothing between it and the closer.
        if start == self.close {
            return None;
        }

        let boundary = ArgumentBoundary::new(start, last_end);
        self.arguments.insert(counter, boundary);
        (counter == number).then_some(boundary)
    }

    /// Number of arguments the call was written with.
    pub fn argument_count(&mut self) -> usize {
        self.argument(usize::MAX);
        self.arguments.len()
    }

    /// Source text of argument `number`, comments and inner whitespace
    /// included.
    pub fn argument_text(&mut self, number: usize) -> Option<String> {
        let boundary = self.argument(number)?;
        Some(self.tokens.text(boundary.start, boundary.end))
    }

    /// Substantive tokens of argument `number`.
    pub fn argument_tokens(&mut self, number: usize) -> Vec<&'a Token> {
        let tokens = self.tokens;
        match self.argument(number) {
            Some(b) => tokens.tokens()[b.start..=b.end]
                .iter()
                .filter(|t| t.is_substantive())
                .collect(),
            None => Vec::new(),
        }
    }
}
