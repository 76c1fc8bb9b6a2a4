//! Shared utilities for the XaTube stream chat service.
//!
//! Time handling and logging setup used by the server crate and its binaries.

pub mod logger;
pub mod time;
