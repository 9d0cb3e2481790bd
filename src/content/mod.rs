//! Typed content model for engine reference pages
//!
//! The top-level document maps brand names to [`BrandData`], and each brand
//! maps engine codes to [`EnginePageData`]. Records are loaded once and
//! treated as immutable.

pub mod engine;
pub mod jsonld;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{EngineLintError, Result};

pub use engine::{
    CompatibleModels, Disclaimer, EnginePageData, Faq, Hero, InfoBlock, Metadata, ModelRow,
    NoteValue, PracticalImplications, ProductionYears, ReliabilityIssue, ReliabilityIssues,
    SpecRow, TechnicalSpecifications,
};
pub use jsonld::{GraphNode, GraphReference, SchemaGraph, TypeField};

/// Image shown at the top of every page for a brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroImage {
    pub url: String,
    pub alt: String,
}

/// Everything published for one automotive brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandData {
    /// Reference URLs keyed by label; a brand carries exactly two
    pub research_resources: BTreeMap<String, String>,
    pub hero_image: HeroImage,
    pub engines: BTreeMap<String, EnginePageData>,
}

/// The whole content document: brand name -> brand data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageData {
    brands: BTreeMap<String, BrandData>,
}

impl PageData {
    /// Load page data from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("Reading page data from {:?}", path.as_ref());
        let content = fs::read_to_string(&path)?;
        let data = Self::from_json(&content)?;
        info!(
            brands = data.brands.len(),
            engines = data.engine_count(),
            "Loaded page data from {:?}",
            path.as_ref()
        );
        Ok(data)
    }

    /// Parse page data from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write page data back out as pretty JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        Ok(())
    }

    /// All brands, in key order
    pub fn brands(&self) -> &BTreeMap<String, BrandData> {
        &self.brands
    }

    pub fn brand(&self, name: &str) -> Result<&BrandData> {
        self.brands
            .get(name)
            .ok_or_else(|| EngineLintError::not_found(format!("brand '{}'", name)))
    }

    /// Look up a single engine page by brand and engine code
    pub fn engine(&self, brand: &str, code: &str) -> Result<&EnginePageData> {
        self.brand(brand)?
            .engines
            .get(code)
            .ok_or_else(|| EngineLintError::not_found(format!("engine '{}/{}'", brand, code)))
    }

    /// Iterate `(brand, engine code, page)` across every brand in key order
    pub fn engines(&self) -> impl Iterator<Item = (&str, &str, &EnginePageData)> {
        self.brands.iter().flat_map(|(brand, data)| {
            data.engines
                .iter()
                .map(move |(code, page)| (brand.as_str(), code.as_str(), page))
        })
    }

    pub fn engine_count(&self) -> usize {
        self.brands.values().map(|b| b.engines.len()).sum()
    }

    pub fn insert_brand(&mut self, name: impl Into<String>, brand: BrandData) {
        self.brands.insert(name.into(), brand);
    }
}
