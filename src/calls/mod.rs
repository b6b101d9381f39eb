//! Function-call detection and argument inspection.
//!
//! ```text
//! identifier token ──▶ CallSiteDetector ──▶ FunctionCall ──▶ ListenerRegistry::dispatch
//!                         (is it a call?)     (arguments)       (listeners, in order)
//! ```
//!
//! Listeners implement [`CallListener`] and query arguments lazily through
//! [`FunctionCall::argument`].

pub mod context;
pub mod detector;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::{ArgumentBoundary, FunctionCall};
pub use detector::{CallSite, CallSiteDetector};
pub use registry::{CallListener, ListenerRegistry};
