//! Built-in call listeners.
//!
//! Each rule is a [`CallListener`] whose function names come from
//! configuration, so projects can point a rule at their own wrappers
//! (e.g. `st()` or `get_t()` for translation).

pub mod translation;
pub mod watchdog;

pub use translation::TranslatableStringRule;
pub use watchdog::WatchdogRule;

use crate::calls::{CallListener, ListenerRegistry};
use crate::config::RulesConfig;
use crate::tokens::Token;
use crate::types::{Finding, Severity};
use std::sync::Arc;

/// Registry with every enabled built-in rule, in a fixed order.
pub fn builtin_registry(config: &RulesConfig) -> ListenerRegistry {
    let mut registry = ListenerRegistry::new();

    let rules: [(bool, Arc<dyn CallListener>); 2] = [
        (
            config.translatable_strings.enabled,
            Arc::new(TranslatableStringRule::new(
                config.translatable_strings.functions.clone(),
            )),
        ),
        (
            config.watchdog.enabled,
            Arc::new(WatchdogRule::new(
                config.watchdog.functions.clone(),
                config.translatable_strings.functions.clone(),
            )),
        ),
    ];

    for (enabled, rule) in rules {
        if enabled {
            registry.register(rule);
        }
    }

    tracing::debug!(target: "rules", "registered {registry:?}");
    registry
}

/// Finding located at `token`.
pub(crate) fn finding_at(
    token: &Token,
    rule: &str,
    severity: Severity,
    message: impl Into<String>,
) -> Finding {
    Finding {
        rule: rule.to_string(),
        severity,
        line: token.line,
        column: token.column,
        message: message.into(),
    }
}

/// True for `''` and `""`.
pub(crate) fn is_empty_string_literal(text: &str) -> bool {
    matches!(text, "''" | "\"\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_builtin_registry_defaults() {
        let registry = builtin_registry(&Settings::default().rules);
        assert_eq!(registry.len(), 2);
        assert!(registry.is_interested("t"));
        assert!(registry.is_interested("watchdog"));
    }

    #[test]
    fn test_disabled_rule_not_registered() {
        let mut rules = Settings::default().rules;
        rules.watchdog.enabled = false;
        rules.translatable_strings.functions = vec!["st".to_string(), "get_t".to_string()];

        let registry = builtin_registry(&rules);
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_interested("watchdog"));
        assert!(!registry.is_interested("t"));
        assert!(registry.is_interested("st"));
        assert!(registry.is_interested("get_t"));
    }

    #[test]
    fn test_watchdog_uses_translation_functions() {
        use crate::calls::CallSiteDetector;
        use crate::calls::test_support::lex;
        use crate::tokens::TokenKind;
        use crate::types::FileReport;

        let mut rules = Settings::default().rules;
        rules.translatable_strings.enabled = false;
        rules.translatable_strings.functions = vec!["get_t".to_string()];
        let registry = builtin_registry(&rules);
        let detector = CallSiteDetector::new(&registry);

        let stream = lex("watchdog('m', get_t('Saved')); watchdog('m', t('Saved'));");
        let mut report = FileReport::new("test.module");
        for token in stream.iter().filter(|t| t.kind == TokenKind::Identifier) {
            detector.process(&stream, token.position, &mut report);
        }

        assert_eq!(report.findings.len(), 1);
        assert!(report.findings[0].message.ends_with("enclosed with get_t()"));
    }

    #[test]
    fn test_empty_string_literal() {
        assert!(is_empty_string_literal("''"));
        assert!(is_empty_string_literal("\"\""));
        assert!(!is_empty_string_literal("' '"));
        assert!(!is_empty_string_literal("'a'"));
    }
}
