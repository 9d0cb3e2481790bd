//! Per-engine page content
//!
//! One [`EnginePageData`] holds every section rendered on an engine page.
//! Field names follow the camelCase keys of the authored JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::jsonld::SchemaGraph;
use crate::error::{EngineLintError, Result};

/// Earliest plausible production year for an internal combustion engine
const MIN_YEAR: u16 = 1885;
const MAX_YEAR: u16 = 2100;

/// SEO strings for the page `<head>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disclaimer {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    /// Production-year range as authored, e.g. "1985–1998"
    pub years: String,
    /// Narrative paragraphs, in display order
    pub intro: Vec<String>,
    pub disclaimer: Disclaimer,
}

/// Parsed production-year range. `end` is `None` for engines still in production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionYears {
    pub start: u16,
    pub end: Option<u16>,
}

impl ProductionYears {
    /// Parse `YYYY`, `YYYY–YYYY` (en/em dash or hyphen) or `YYYY–present`
    pub fn parse(text: &str) -> Result<Self> {
        let normalized = text.trim().replace(['–', '—'], "-");
        if normalized.is_empty() {
            return Err(EngineLintError::validation("production years are empty"));
        }

        let (start, end) = match normalized.split_once('-') {
            Some((start, end)) => (start.trim(), Some(end.trim())),
            None => (normalized.as_str(), None),
        };

        let start = parse_year(start)?;
        let end = match end {
            None => Some(start),
            Some(end) if end.eq_ignore_ascii_case("present") => None,
            Some(end) => Some(parse_year(end)?),
        };

        if let Some(end) = end {
            if end < start {
                return Err(EngineLintError::validation(format!(
                    "production ends ({}) before it starts ({})",
                    end, start
                )));
            }
        }

        Ok(Self { start, end })
    }
}

fn parse_year(text: &str) -> Result<u16> {
    if text.len() != 4 || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(EngineLintError::validation(format!(
            "'{}' is not a four-digit year",
            text
        )));
    }
    let year: u16 = text
        .parse()
        .map_err(|_| EngineLintError::validation(format!("'{}' is not a year", text)))?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(EngineLintError::validation(format!(
            "year {} is outside {}..={}",
            year, MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(year)
}

impl Hero {
    pub fn production_years(&self) -> Result<ProductionYears> {
        ProductionYears::parse(&self.years)
    }
}

/// One row of the human-readable specification table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecRow {
    pub parameter: String,
    pub value: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticalImplications {
    pub heading: String,
    pub content: String,
    /// Verification notes keyed by topic
    #[serde(default)]
    pub verification_notes: BTreeMap<String, String>,
    #[serde(default)]
    pub citations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSpecifications {
    pub description: String,
    pub engine_specs: Vec<SpecRow>,
    pub practical_implications: PracticalImplications,
}

/// A row of the compatible-vehicles table. Keys keep the authored spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRow {
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Models")]
    pub models: String,
    #[serde(rename = "Years")]
    pub years: String,
    #[serde(rename = "Variants")]
    pub variants: String,
    #[serde(rename = "OEM Source")]
    pub oem_source: String,
}

/// Free-form note value: a sentence or a bullet list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteValue {
    Text(String),
    List(Vec<String>),
}

impl NoteValue {
    /// True when there is no non-blank text anywhere in the note
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibleModels {
    pub description: String,
    pub models: Vec<ModelRow>,
    pub guidance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_notes: Option<Vec<BTreeMap<String, NoteValue>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityIssue {
    pub title: String,
    pub symptoms: String,
    pub cause: String,
    pub fix: String,
}

/// Call-out box under the issue list. `gradient` is a CSS background value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoBlock {
    pub title: String,
    pub description: String,
    pub gradient: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReliabilityIssues {
    pub subheading: String,
    pub issues: Vec<ReliabilityIssue>,
    pub info_block: InfoBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// Every section of one engine's page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnginePageData {
    pub metadata: Metadata,
    pub hero: Hero,
    pub technical_specifications: TechnicalSpecifications,
    pub compatible_models: CompatibleModels,
    pub banner_image: String,
    pub common_reliability_issues: ReliabilityIssues,
    pub faqs: Vec<Faq>,
    pub schema: SchemaGraph,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_closed_range() {
        let years = ProductionYears::parse("1985–1998").unwrap();
        assert_eq!(years, ProductionYears { start: 1985, end: Some(1998) });

        let years = ProductionYears::parse("1985 - 1998").unwrap();
        assert_eq!(years.end, Some(1998));

        let years = ProductionYears::parse("1985—1998").unwrap();
        assert_eq!(years.start, 1985);
    }

    #[test]
    fn test_parse_single_year_and_open_range() {
        let single = ProductionYears::parse("1990").unwrap();
        assert_eq!(single, ProductionYears { start: 1990, end: Some(1990) });

        let open = ProductionYears::parse("2003–present").unwrap();
        assert_eq!(open, ProductionYears { start: 2003, end: None });

        let open = ProductionYears::parse("2003-Present").unwrap();
        assert_eq!(open.end, None);
    }

    #[test]
    fn test_parse_rejects_bad_ranges() {
        assert!(ProductionYears::parse("").is_err());
        assert!(ProductionYears::parse("1998–1985").is_err());
        assert!(ProductionYears::parse("85–98").is_err());
        assert!(ProductionYears::parse("1700–1710").is_err());
        assert!(ProductionYears::parse("late 1980s").is_err());
        assert!(ProductionYears::parse("2003–current").is_err());
    }

    #[test]
    fn test_model_row_keeps_authored_keys() {
        let row = ModelRow {
            make: "Saab".to_string(),
            models: "900".to_string(),
            years: "1985–1993".to_string(),
            variants: "Turbo".to_string(),
            oem_source: "Saab EPC".to_string(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["OEM Source"], "Saab EPC");
        assert_eq!(json["Make"], "Saab");
    }

    #[test]
    fn test_note_value_untagged() {
        let text: NoteValue = serde_json::from_str("\"Check the vacuum lines\"").unwrap();
        assert_eq!(text, NoteValue::Text("Check the vacuum lines".to_string()));

        let list: NoteValue = serde_json::from_str("[\"one\", \" \"]").unwrap();
        assert!(!list.is_blank());

        let blank = NoteValue::List(vec![" ".to_string()]);
        assert!(blank.is_blank());
    }
}
