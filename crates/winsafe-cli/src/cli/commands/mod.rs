//! CLI command handlers, one file per subcommand.

mod completions;
mod plan;
mod sanitize;
mod scan;
mod source;

pub use completions::{run_completions, run_manpage};
pub use plan::run_plan;
pub use sanitize::run_sanitize;
pub use scan::run_scan;
