//! Core session logic for the broker load bot.
//!
//! This crate is transport-agnostic. The broker connection and its wire codec
//! live behind [`ports::Transport`], implemented in adapter crates.

pub mod clock;
pub mod config;
pub mod domain;
pub mod driver;
pub mod errors;
pub mod logging;
pub mod policy;
pub mod ports;
pub mod protocol;
pub mod random;
pub mod utils;

pub use errors::{Error, Result};
