//! Call-site detection.
//!
//! An identifier is a call site when the next substantive token is a matched
//! `(` and the previous one (ignoring a by-reference `&`) is not `function`,
//! `->`/`?->` or `::`. Definitions, method calls and static calls are
//! therefore never reported.

use super::context::FunctionCall;
use super::registry::ListenerRegistry;
use crate::tokens::{TokenKind, TokenKinds, TokenStream};
use crate::types::FileReport;

/// Token positions of one call occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub name: usize,
    pub open: usize,
    pub close: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct CallSiteDetector<'r> {
    registry: &'r ListenerRegistry,
}

impl<'r> CallSiteDetector<'r> {
    pub fn new(registry: &'r ListenerRegistry) -> Self {
        Self { registry }
    }

    /// Locate the call whose name token is at `position`, regardless of
    /// listener interest.
    pub fn locate(tokens: &TokenStream, position: usize) -> Option<CallSite> {
        if tokens.get(position)?.kind != TokenKind::Identifier {
            return None;
        }

        let open = tokens.next_substantive(position + 1)?;
        if tokens[open].kind != TokenKind::OpenParenthesis {
            return None;
        }
        let close = tokens.matching_bracket(open)?;

        let skipped = TokenKinds::EMPTY | TokenKinds::BITWISE_AND;
        let previous = position
            .checked_sub(1)
            .and_then(|from| tokens.find_previous(skipped, from, None, true));
        if let Some(previous) = previous {
            match tokens[previous].kind {
                // definition, method call, static method call
                TokenKind::Function | TokenKind::ObjectOperator | TokenKind::DoubleColon => {
                    return None;
                }
                _ => {}
            }
        }

        Some(CallSite {
            name: position,
            open,
            close,
        })
    }

    /// Handle one identifier occurrence: detect the call and dispatch it to
    /// the registered listeners. Returns true when listeners were invoked.
    pub fn process(&self, tokens: &TokenStream, position: usize, report: &mut FileReport) -> bool {
        let Some(token) = tokens.get(position) else {
            return false;
        };
        if !self.registry.is_interested(&token.text) {
            return false;
        }

        let Some(site) = Self::locate(tokens, position) else {
            tracing::trace!(
                target: "detector",
                "{} at {}:{} is not a function call",
                token.text,
                token.line,
                token.column
            );
            return false;
        };

        crate::debug_event!(
            "detector",
            "call",
            "{}() at {}:{}",
            token.text,
            token.line,
            token.column
        );
        let mut call = FunctionCall::new(tokens, site.name, site.open, site.close);
        let invoked = self.registry.dispatch(&mut call, report);
        report.calls += 1;
        invoked > 0
    }
}
