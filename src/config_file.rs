//! Lint configuration file handling
//!
//! Rule codes and severities are typed enums, so a misspelled rule in the
//! JSON file fails at load time instead of silently doing nothing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::types::{Rule, Severity};

pub const DEFAULT_CONTEXT: &str = "https://schema.org";

/// Thresholds and rule switches for a lint run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Maximum SEO title length in characters
    pub title_max_len: usize,
    /// Maximum SEO description length in characters
    pub description_max_len: usize,
    /// Relative tolerance for spec table vs. graph comparisons (0.01 = 1%)
    pub numeric_tolerance: f64,
    /// Required JSON-LD `@context`
    pub expected_context: String,
    /// Number of research URLs each brand must carry
    pub research_resource_count: usize,
    pub disabled_rules: Vec<Rule>,
    pub severity_overrides: BTreeMap<Rule, Severity>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            title_max_len: 60,
            description_max_len: 160,
            numeric_tolerance: 0.01,
            expected_context: DEFAULT_CONTEXT.to_string(),
            research_resource_count: 2,
            disabled_rules: Vec::new(),
            severity_overrides: BTreeMap::new(),
        }
    }
}

impl LintConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize lint configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write lint configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read lint configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse lint configuration JSON")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.title_max_len == 0 {
            anyhow::bail!("title_max_len must be greater than zero");
        }
        if self.description_max_len == 0 {
            anyhow::bail!("description_max_len must be greater than zero");
        }
        if !(0.0..1.0).contains(&self.numeric_tolerance) {
            anyhow::bail!(
                "numeric_tolerance must be in [0, 1), got {}",
                self.numeric_tolerance
            );
        }
        let context = self.expected_context.trim();
        if !context.starts_with("http://") && !context.starts_with("https://") {
            anyhow::bail!("expected_context must start with http:// or https://");
        }
        if let Some(rule) = self
            .severity_overrides
            .keys()
            .find(|rule| self.disabled_rules.contains(rule))
        {
            anyhow::bail!("Rule '{}' is both disabled and given a severity override", rule);
        }
        Ok(())
    }

    pub fn is_enabled(&self, rule: Rule) -> bool {
        !self.disabled_rules.contains(&rule)
    }

    /// Effective severity: the override if any, otherwise `fallback`
    pub fn severity_or(&self, rule: Rule, fallback: Severity) -> Severity {
        self.severity_overrides.get(&rule).copied().unwrap_or(fallback)
    }

    pub fn severity(&self, rule: Rule) -> Severity {
        self.severity_or(rule, rule.default_severity())
    }
}
