//! Domain types and pure logic shared by the runlens crates.
//!
//! Contains common type aliases and the run-history metric extraction.
//! No I/O happens here.

pub mod history;
pub mod types;
