//! Core pipeline orchestration and domain logic for dexgen.
//!
//! This crate ties together record loading, the global ordinal table,
//! evolution family resolution and page rendering into the end-to-end
//! `build_site` batch.

pub mod assembler;
pub mod evolution;
pub mod index;
pub mod pipeline;
