//! CLI command handling.

mod commands;
mod run;
mod server;

pub use commands::{Cli, Commands};
pub use run::{print_cost, print_models, print_probe, print_scripts, run_story};
pub use server::serve;
