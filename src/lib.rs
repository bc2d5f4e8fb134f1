//! Portfolio site builder.
//!
//! Assembles static HTML pages from shells that reference template
//! fragments, rendered with a small mustache-style engine against JSON data.
//!
//! The public API is organised into layers:
//!
//! - **[`engine`]**: parse and render templates; never fails
//! - **[`config`]**: load and validate `site.toml`
//! - **[`site`]**: load data and fragments, splice sections into shells
//! - **[`tasks`]**: named build steps with status recording
//! - **[`commands`]**: subcommand orchestration (`build`, `render`, `check`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod site;
pub mod tasks;
