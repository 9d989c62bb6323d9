//! Integration tests for cargo-scm-updates

mod test_config;
mod test_exec;
mod test_modules;
mod test_plan;
