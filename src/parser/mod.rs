//! TNEF parsing: checksummed attribute reader, code page table, and stream scan.

pub mod checksum;
pub mod codepage;
pub mod reader;
pub mod scan;
