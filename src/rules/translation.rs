//! Literal-string check for translation functions such as `t()`.
//!
//! Translation extractors only see string literals, so the first argument
//! must be exactly one non-empty literal.

use super::{finding_at, is_empty_string_literal};
use crate::calls::{CallListener, FunctionCall};
use crate::tokens::TokenKind;
use crate::types::{FileReport, Severity};

pub const RULE_ID: &str = "translatable_strings";

#[derive(Debug, Clone)]
pub struct TranslatableStringRule {
    functions: Vec<String>,
}

impl TranslatableStringRule {
    pub fn new(functions: Vec<String>) -> Self {
        Self { functions }
    }
}

impl CallListener for TranslatableStringRule {
    fn function_names(&self) -> &[String] {
        &self.functions
    }

    fn process_function_call(&self, call: &mut FunctionCall<'_>, report: &mut FileReport) {
        // t() without arguments is somebody else's problem
        let Some(argument) = call.argument(1) else {
            return;
        };
        let tokens = call.tokens();
        let name = call.function_name();
        let first = &tokens[argument.start];

        if argument.is_single() && first.kind == TokenKind::StringLiteral {
            if is_empty_string_literal(&first.text) {
                report.add(finding_at(
                    first,
                    RULE_ID,
                    Severity::Error,
                    format!("Do not pass empty strings to {name}()"),
                ));
            }
            return;
        }

        let close = call.close_bracket();
        let concatenated = (argument.start..=argument.end).any(|pos| {
            let token = &tokens[pos];
            token.kind == TokenKind::Operator
                && token.text.as_ref() == "."
                && tokens.enclosing_closer(pos) == Some(close)
        });

        if concatenated {
            report.add(finding_at(
                first,
                RULE_ID,
                Severity::Error,
                "Concatenating translatable strings is not allowed, use placeholders instead and only one string literal",
            ));
        } else {
            report.add(finding_at(
                first,
                RULE_ID,
                Severity::Warning,
                format!("Only string literals should be passed to {name}() where possible"),
            ));
        }
    }
}
