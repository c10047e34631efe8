mod checks;
mod context;
mod expand;
mod run;
mod scan;

pub use checks::{run_checks, run_checks_impl};
pub use context::CommandContext;
pub use expand::{run_expand, run_expand_impl};
pub use run::{run_run, run_run_impl};
pub use scan::{run_scan, run_scan_impl};
