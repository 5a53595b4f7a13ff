//! Configuration for tree hashing, trivia reattachment and rewriting
//!
//! Settings are read from a TOML file discovered by walking up from a start
//! directory:
//!
//! 1. `loyc.toml`
//! 2. `.loycrc.toml`
//!
//! Every key is optional; missing keys take their defaults and unknown keys
//! are rejected.
//!
//! ## Example Configuration
//!
//! ```toml
//! [hashing]
//! depth = 3
//!
//! [trivia]
//! mark_one_liners = true
//! split_on_blank_line = true
//!
//! [rewrite]
//! max_expansions = 1000
//! process_attributes = true
//! ```

mod loader;
mod loyc_config;

pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
pub use loyc_config::{
    HashingConfiguration, LoycConfig, RewriteConfiguration, TriviaConfiguration,
};
