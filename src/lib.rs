pub mod calls;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod rules;
pub mod scanner;
pub mod tokens;
pub mod types;
pub mod walker;

pub use calls::{
    ArgumentBoundary, CallListener, CallSite, CallSiteDetector, FunctionCall, ListenerRegistry,
};
pub use config::Settings;
pub use error::{ScanError, ScanResult};
pub use scanner::{FileFailure, ScanSummary, Scanner};
pub use tokens::{PhpTokenizer, Token, TokenKind, TokenKinds, TokenStream};
pub use types::{FileReport, Finding, Severity};
