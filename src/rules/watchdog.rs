//! Message check for `watchdog()`-style logging calls.
//!
//! The message (argument 2) is translated when the log is displayed, so it
//! must never be pre-translated with `t()` or another configured
//! translation function.

use super::finding_at;
use crate::calls::{ArgumentBoundary, CallListener, FunctionCall};
use crate::tokens::{TokenKind, TokenStream};
use crate::types::{FileReport, Severity};

pub const RULE_ID: &str = "watchdog";

const MESSAGE_ARGUMENT: usize = 2;

#[derive(Debug, Clone)]
pub struct WatchdogRule {
    functions: Vec<String>,
    /// Translation functions the message must not be wrapped in
    translators: Vec<String>,
}

impl WatchdogRule {
    pub fn new(functions: Vec<String>, translators: Vec<String>) -> Self {
        Self {
            functions,
            translators,
        }
    }

    /// Name of the translation call spanning the whole `argument`, if any.
    fn wrapping_translator<'a>(
        &self,
        tokens: &'a TokenStream,
        argument: ArgumentBoundary,
    ) -> Option<&'a str> {
        let first = &tokens[argument.start];
        if first.kind != TokenKind::Identifier
            || !self.translators.iter().any(|t| t.as_str() == first.text.as_ref())
        {
            return None;
        }
        let open = tokens.next_substantive(argument.start + 1)?;
        if tokens[open].kind != TokenKind::OpenParenthesis {
            return None;
        }
        // `t('a') . $x` is a concatenation, not a wrapped message
        (tokens.matching_bracket(open)? == argument.end).then_some(first.text.as_ref())
    }
}

impl CallListener for WatchdogRule {
    fn function_names(&self) -> &[String] {
        &self.functions
    }

    fn process_function_call(&self, call: &mut FunctionCall<'_>, report: &mut FileReport) {
        let Some(message) = call.argument(MESSAGE_ARGUMENT) else {
            return;
        };
        let tokens = call.tokens();

        if let Some(translator) = self.wrapping_translator(tokens, message) {
            report.add(finding_at(
                &tokens[message.start],
                RULE_ID,
                Severity::Error,
                format!(
                    "The second argument to {}() should not be enclosed with {translator}()",
                    call.function_name()
                ),
            ));
        }
    }
}
