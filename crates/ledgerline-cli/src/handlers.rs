//! Command handlers for CLI subcommands

mod completions;
mod schemas;
mod utils;
mod validate;

pub use completions::handle_completions;
pub use schemas::handle_schemas;
pub use validate::handle_validate;
