//! opcost - per-opcode instruction cost estimation
//!
//! This library turns raw benchmark logs (instruction counts of a loop
//! executing one operation, minus a baseline loop) into robust per-operation
//! cost estimates: a lookup table of binned modes, linear cost models for
//! size-dependent operations, and HTML diagnostic reports.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod estimate;
pub mod filter;
pub mod lut;
pub mod record;
pub mod report;
pub mod scaling;
