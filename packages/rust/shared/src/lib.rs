//! Shared types, error model, and configuration for dexgen.
//!
//! This crate is the foundation depended on by all other dexgen crates.
//! It provides:
//! - [`DexError`], the unified error type
//! - The record data model ([`Record`], [`Stats`], [`EvolutionMethod`], ...)
//! - Resolved-family and navigation types ([`FamilyTree`], [`OrdinalEntry`])
//! - Configuration ([`AppConfig`], [`BuildConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BuildConfig, PathsConfig, SiteConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{DexError, Result};
pub use types::{
    CURRENT_SCHEMA_VERSION, EvolutionDecl, EvolutionMethod, EvolutionTarget, FamilyBranch,
    FamilyNode, FamilyTree, HappinessThreshold, LoadedRecord, MethodCondition, OrdinalEntry,
    PageEntry, Record, STAT_MAX, SiteManifest, StatKey, Stats, Transformation,
    TransformationCondition,
};
