//! CLI command implementations.

pub mod common;
pub mod fir;
pub mod iir;
pub mod info;
pub mod maf;
pub mod run;
pub mod spectrum;
pub mod tables;
