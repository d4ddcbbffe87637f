//! Core data model types for TNEF headers, attributes, and tags.

pub mod attribute;
pub mod header;
pub mod tag;
