//! `tnefreader` — a streaming reader for TNEF (`winmail.dat`) containers.
//!
//! This crate provides the sequential attribute reader that walks a TNEF
//! stream, checks attribute framing and checksums, and exposes typed reads
//! to attribute decoders.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;

pub use error::{Result, TnefError};
pub use parser::reader::TnefReader;
