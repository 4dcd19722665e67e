//! Shared foundation for the blobgate workspace.
//!
//! This crate carries the pieces every other crate leans on:
//!
//! - [`Error`] / [`ErrorKind`]: the structured error type used across the
//!   workspace. Errors carry a kind, a message, and an optional source chain.
//! - [`hash`]: SHA-256 / HMAC-SHA256 digests and base64 helpers.
//! - [`time`]: the timestamp type and the two wire formats signing cares
//!   about (`YYYYMMDD` and `YYYYMMDD'T'HHMMSS'Z'`).
//! - [`utils`]: the [`Masked`](utils::Masked) wrapper that keeps secrets out
//!   of logs.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
