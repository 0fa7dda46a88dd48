//! Command handlers

pub mod import;
pub mod plans;

pub use import::handle_import_command;
pub use plans::{handle_buckets_command, handle_plans_command};
