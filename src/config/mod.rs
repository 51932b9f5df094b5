//! Configuration for proofwatch.
//!
//! Settings come from an optional YAML file (unknown fields are ignored for
//! forward compatibility), then from the `INPUT_*` environment variables that
//! CI actions pass to their steps, then from CLI flags.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::parse_keyword_list;
