//! Type-safe lint vocabulary
//!
//! Rule codes, severities and schema.org node types are enums rather than
//! strings so configuration typos are caught at load time and matches stay
//! exhaustive.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Stable identifiers for every lint rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Rule {
    EmptyField,
    EmptySection,
    InvalidUrl,
    ResearchResources,
    YearRange,
    SeoLength,
    EngineKey,
    Gradient,
    SchemaContext,
    MissingNode,
    DuplicateNode,
    MissingId,
    DuplicateId,
    DanglingReference,
    NodeShape,
    FaqMismatch,
    DuplicateFaq,
    SpecDrift,
}

impl Rule {
    /// Severity used when the configuration does not override it
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::SeoLength
            | Self::EngineKey
            | Self::Gradient
            | Self::DuplicateFaq
            | Self::SpecDrift => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// One-line description shown by `--help`-style listings
    pub fn description(&self) -> &'static str {
        match self {
            Self::EmptyField => "required text field is empty",
            Self::EmptySection => "required list section has no entries",
            Self::InvalidUrl => "URL is not an absolute http(s) URL",
            Self::ResearchResources => "brand does not carry the expected research URLs",
            Self::YearRange => "production years do not form a valid range",
            Self::SeoLength => "SEO title or description is too long",
            Self::EngineKey => "engine code is malformed or not reflected in the graph",
            Self::Gradient => "info block gradient is not a CSS gradient",
            Self::SchemaContext => "JSON-LD @context is wrong",
            Self::MissingNode => "required JSON-LD node type is missing",
            Self::DuplicateNode => "JSON-LD node type appears more than once",
            Self::MissingId => "top-level JSON-LD node has no @id",
            Self::DuplicateId => "JSON-LD @id is defined more than once",
            Self::DanglingReference => "JSON-LD reference does not resolve",
            Self::NodeShape => "JSON-LD node lacks a required property",
            Self::FaqMismatch => "FAQ list and FAQPage graph node disagree",
            Self::DuplicateFaq => "FAQ question is repeated",
            Self::SpecDrift => "spec table and VehicleEngine node disagree numerically",
        }
    }
}

/// The six node types every engine graph must carry exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum NodeType {
    #[strum(serialize = "WebPage")]
    WebPage,
    #[strum(serialize = "WebSite")]
    WebSite,
    #[strum(serialize = "Article")]
    Article,
    #[strum(serialize = "VehicleEngine")]
    VehicleEngine,
    #[strum(serialize = "Dataset")]
    Dataset,
    #[serde(rename = "FAQPage")]
    #[strum(serialize = "FAQPage")]
    FaqPage,
}

impl NodeType {
    /// The schema.org type name as it appears in `@type`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebPage => "WebPage",
            Self::WebSite => "WebSite",
            Self::Article => "Article",
            Self::VehicleEngine => "VehicleEngine",
            Self::Dataset => "Dataset",
            Self::FaqPage => "FAQPage",
        }
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
