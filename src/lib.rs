//! enginelint library
//!
//! Typed content model for engine reference pages (specs, reliability issues,
//! FAQs and their schema.org JSON-LD graph) plus a linter that checks the
//! structural invariants the pages rely on.

pub mod cli;
pub mod config_file;
pub mod content;
pub mod error;
pub mod lint;
pub mod report;
pub mod types;

// Re-export main types for convenience
pub use config_file::LintConfig;
pub use content::{BrandData, EnginePageData, GraphNode, PageData, ProductionYears, SchemaGraph};
pub use error::{EngineLintError, Result};
pub use lint::{Finding, Linter, Report};
pub use types::{NodeType, OutputFormat, Rule, Severity};
