//! Loyc Core
//!
//! Universal syntax tree for the Loyc family of languages.
//! This crate provides immutable Identifier/Literal/Call nodes with a
//! uniform indexed-child model, structural equality and hashing, lazy
//! traversal, and the trivia reattachment pass that puts comments and blank
//! lines back onto a freshly parsed tree.

pub mod atom;
pub mod config;
pub mod error;
pub mod node;
pub mod result;
pub mod span;
pub mod trivia;

// Re-export commonly used types
pub use atom::{Atom, Interner, sym};
// Configuration system
pub use config::{
    ConfigLoader, HashingConfiguration, LoycConfig, RewriteConfiguration, TriviaConfiguration,
};
pub use error::{ErrorKind, LoycError};
pub use node::{
    CompareMode, DEFAULT_HASH_DEPTH, Descendants, LiteralData, LiteralValue, Node, NodeFactory,
    NodeKind, NodeList, NodeRef, NodeStyle, ScanMode,
};
pub use result::{Result, ResultExt};
pub use span::{SourceFile, SourceRange};
pub use trivia::{
    Injected, StandardTrivia, TriviaClass, TriviaInjector, TriviaKind, TriviaLocation,
    TriviaOptions, TriviaStrategy, TriviaToken,
};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("loyc=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
