//! File export of evaluated curves.

pub mod export;
