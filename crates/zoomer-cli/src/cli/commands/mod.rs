//! CLI command handlers. Each command is in its own file for clarity.

mod check_limit;
mod clear;
mod export;
mod import;
mod levels;
mod list;
mod lookup;
mod metrics;
mod purge;
mod remove;
mod reset;
mod set;

pub use check_limit::run_check_limit;
pub use clear::run_clear;
pub use export::run_export;
pub use import::run_import;
pub use levels::run_levels;
pub use list::run_list;
pub use lookup::run_lookup;
pub use metrics::run_metrics;
pub use purge::run_purge;
pub use remove::run_remove;
pub use reset::run_reset;
pub use set::run_set;
