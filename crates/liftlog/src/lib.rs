//! Liftlog - workout drafts from the command line
//!
//! Keeps one open draft on disk between invocations and saves finished
//! drafts to an SQLite store.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod db;
pub mod draft_file;
pub mod error;

pub use error::{Error, Result};
