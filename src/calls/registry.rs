//! Name-keyed listener registry and synchronous dispatch.

use super::context::FunctionCall;
use crate::types::FileReport;
use std::collections::HashMap;
use std::sync::Arc;

/// Observer notified for calls to the functions it names.
pub trait CallListener: Send + Sync {
    /// Function names this listener wants to observe. Matched
    /// case-sensitively against the call's name token.
    fn function_names(&self) -> &[String];

    /// Inspect one call. The call must not outlive this invocation.
    fn process_function_call(&self, call: &mut FunctionCall<'_>, report: &mut FileReport);
}

/// Mapping from function name to listeners in registration order.
///
/// Filled once before scanning and only read afterwards; share it across
/// scanning threads behind an `Arc`.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: HashMap<String, Vec<Arc<dyn CallListener>>>,
    registered: usize,
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.listeners.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.registered)
            .field("functions", &names)
            .finish()
    }
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `listener` to the list of every name it declares.
    pub fn register(&mut self, listener: Arc<dyn CallListener>) {
        for name in listener.function_names() {
            self.listeners
                .entry(name.clone())
                .or_default()
                .push(Arc::clone(&listener));
        }
        self.registered += 1;
    }

    pub fn is_interested(&self, function_name: &str) -> bool {
        self.listeners.contains_key(function_name)
    }

    pub fn listeners_for(&self, function_name: &str) -> &[Arc<dyn CallListener>] {
        self.listeners
            .get(function_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of `register` calls.
    pub fn len(&self) -> usize {
        self.registered
    }

    pub fn is_empty(&self) -> bool {
        self.registered == 0
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.listeners.keys().map(String::as_str)
    }

    /// Invoke every listener for the call's name, in registration order.
    /// Returns how many listeners ran.
    pub fn dispatch(&self, call: &mut FunctionCall<'_>, report: &mut FileReport) -> usize {
        let listeners = self.listeners_for(call.function_name());
        for listener in listeners {
            listener.process_function_call(call, report);
        }
        listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calls::test_support::lex;
    use crate::types::{Finding, Severity};

    /// Records its tag and the requested argument as a finding.
    struct Recorder {
        tag: &'static str,
        names: Vec<String>,
    }

    impl Recorder {
        fn new(tag: &'static str, names: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                tag,
                names: names.iter().map(|n| n.to_string()).collect(),
            })
        }
    }

    impl CallListener for Recorder {
        fn function_names(&self) -> &[String] {
            &self.names
        }

        fn process_function_call(&self, call: &mut FunctionCall<'_>, report: &mut FileReport) {
            let first = call.argument_text(1).unwrap_or_default();
            report.add(Finding {
                rule: self.tag.to_string(),
                severity: Severity::Warning,
                line: call.name_token().line,
                column: call.name_token().column,
                message: format!("{}({first})", call.function_name()),
            });
        }
    }

    #[test]
    fn test_register_multiple_names() {
        let mut registry = ListenerRegistry::new();
        registry.register(Recorder::new("a", &["t", "st"]));

        assert!(registry.is_interested("t"));
        assert!(registry.is_interested("st"));
        assert!(!registry.is_interested("T"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.listeners_for("st").len(), 1);
        assert!(registry.listeners_for("missing").is_empty());
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let mut registry = ListenerRegistry::new();
        registry.register(Recorder::new("first", &["foo"]));
        registry.register(Recorder::new("other", &["bar"]));
        registry.register(Recorder::new("second", &["foo"]));

        let stream = lex("foo('x')");
        let mut call = FunctionCall::new(&stream, 0, 1, 3);
        let mut report = FileReport::new("test.php");

        assert_eq!(registry.dispatch(&mut call, &mut report), 2);
        let tags: Vec<&str> = report.findings.iter().map(|f| f.rule.as_str()).collect();
        assert_eq!(tags, vec!["first", "second"]);
        assert_eq!(report.findings[0].message, "foo('x')");
    }

    #[test]
    fn test_dispatch_without_listeners() {
        let registry = ListenerRegistry::new();
        let stream = lex("foo()");
        let mut call = FunctionCall::new(&stream, 0, 1, 2);
        let mut report = FileReport::new("test.php");

        assert_eq!(registry.dispatch(&mut call, &mut report), 0);
        assert!(report.findings.is_empty());
        assert!(registry.is_empty());
    }
}
