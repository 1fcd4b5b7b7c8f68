#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Shared utilities for graphbridge.
//!
//! This crate provides pure helper functions with no logging/tracing dependencies.
//! Logging is emitted by the core crate and installed by whoever hosts it.

pub mod file_url;

pub use file_url::{file_url_to_path, is_file_url, path_to_file_url};
