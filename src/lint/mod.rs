//! Content linter for engine pages
//!
//! The linter walks every brand and engine and collects [`Finding`]s. Nothing
//! here fails fast: a run always produces a full [`Report`], and the caller
//! decides what exit status the findings deserve.
//!
//! Checks are grouped by concern:
//! - [`structure`]: non-empty text, URLs, year ranges, SEO lengths
//! - [`graph`]: JSON-LD node set, `@id` integrity, node shapes
//! - [`consistency`]: FAQ duplication and spec table vs. graph numbers

pub mod consistency;
pub mod graph;
pub mod numbers;
pub mod structure;

use serde::Serialize;
use tracing::{debug, info};

use crate::config_file::LintConfig;
use crate::content::{BrandData, EnginePageData, PageData};
use crate::error::{EngineLintError, Result};
use crate::types::{Rule, Severity};

/// A single problem found in the content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub rule: Rule,
    pub severity: Severity,
    pub brand: String,
    /// `None` for brand-level findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Location inside the record, e.g. `faqs[2].answer`
    pub path: String,
    pub message: String,
}

impl Finding {
    /// `brand/engine` or just `brand`
    pub fn location(&self) -> String {
        match &self.engine {
            Some(engine) => format!("{}/{}", self.brand, engine),
            None => self.brand.clone(),
        }
    }
}

/// Collects findings for one brand or engine, applying rule switches and
/// severity overrides from the configuration.
pub struct Findings<'a> {
    config: &'a LintConfig,
    brand: &'a str,
    engine: Option<&'a str>,
    items: Vec<Finding>,
}

impl<'a> Findings<'a> {
    pub fn new(config: &'a LintConfig, brand: &'a str, engine: Option<&'a str>) -> Self {
        Self {
            config,
            brand,
            engine,
            items: Vec::new(),
        }
    }

    pub fn config(&self) -> &'a LintConfig {
        self.config
    }

    /// Record a finding at the rule's configured severity
    pub fn push(&mut self, rule: Rule, path: impl Into<String>, message: impl Into<String>) {
        let severity = self.config.severity(rule);
        self.push_at(rule, severity, path, message);
    }

    /// Record a finding whose default severity differs from the rule's
    pub fn push_with(
        &mut self,
        rule: Rule,
        fallback: Severity,
        path: impl Into<String>,
        message: impl Into<String>,
    ) {
        let severity = self.config.severity_or(rule, fallback);
        self.push_at(rule, severity, path, message);
    }

    fn push_at(
        &mut self,
        rule: Rule,
        severity: Severity,
        path: impl Into<String>,
        message: impl Into<String>,
    ) {
        if !self.config.is_enabled(rule) {
            return;
        }
        self.items.push(Finding {
            rule,
            severity,
            brand: self.brand.to_string(),
            engine: self.engine.map(str::to_string),
            path: path.into(),
            message: message.into(),
        });
    }

    /// Flag blank text as `empty-field`
    pub fn require_text(&mut self, path: impl Into<String>, value: &str) {
        if value.trim().is_empty() {
            let path = path.into();
            let message = format!("{} must not be empty", path);
            self.push(Rule::EmptyField, path, message);
        }
    }

    /// Flag anything but an absolute http(s) URL as `invalid-url`
    pub fn require_url(&mut self, path: impl Into<String>, value: &str) {
        let path = path.into();
        if value.trim().is_empty() {
            let message = format!("{} must not be empty", path);
            self.push(Rule::EmptyField, path, message);
        } else if !is_http_url(value) {
            self.push(
                Rule::InvalidUrl,
                path,
                format!("'{}' is not an absolute http(s) URL", value),
            );
        }
    }

    pub fn into_vec(self) -> Vec<Finding> {
        self.items
    }
}

/// Absolute http(s) URL with a host part and no whitespace
pub fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or("");
            !host.is_empty() && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Outcome of a lint run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub brands_checked: usize,
    pub engines_checked: usize,
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// No findings of any severity
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings raised by a given rule
    pub fn by_rule(&self, rule: Rule) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.rule == rule).collect()
    }

    fn sort(&mut self) {
        self.findings.sort_by(|a, b| {
            a.brand
                .cmp(&b.brand)
                .then_with(|| a.engine.cmp(&b.engine))
                .then_with(|| a.path.cmp(&b.path))
                .then_with(|| a.rule.cmp(&b.rule))
        });
    }
}

/// Runs every check over page data
#[derive(Debug, Clone, Default)]
pub struct Linter {
    config: LintConfig,
}

impl Linter {
    pub fn new(config: LintConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Lint every brand and engine
    pub fn lint(&self, data: &PageData) -> Report {
        let mut report = Report::default();
        for (name, brand) in data.brands() {
            self.lint_into(&mut report, name, brand, None);
        }
        report.sort();
        info!(
            brands = report.brands_checked,
            engines = report.engines_checked,
            errors = report.error_count(),
            warnings = report.warning_count(),
            "Lint finished"
        );
        report
    }

    /// Lint a subset. Fails when the filter selects no engine at all.
    pub fn lint_filtered(
        &self,
        data: &PageData,
        brand: Option<&str>,
        engine: Option<&str>,
    ) -> Result<Report> {
        if brand.is_none() && engine.is_none() {
            return Ok(self.lint(data));
        }

        let mut report = Report::default();
        for (name, brand_data) in data.brands() {
            if brand.is_some_and(|wanted| wanted != name.as_str()) {
                continue;
            }
            if engine.is_some_and(|code| !brand_data.engines.contains_key(code)) {
                continue;
            }
            self.lint_into(&mut report, name, brand_data, engine);
        }

        if report.brands_checked == 0 {
            let selector = format!("{}/{}", brand.unwrap_or("*"), engine.unwrap_or("*"));
            return Err(EngineLintError::not_found(format!(
                "no engine matches '{}'",
                selector
            )));
        }

        report.sort();
        Ok(report)
    }

    fn lint_into(&self, report: &mut Report, name: &str, brand: &BrandData, only: Option<&str>) {
        report.brands_checked += 1;
        report.findings.extend(self.lint_brand(name, brand));
        for (code, page) in &brand.engines {
            if only.is_some_and(|wanted| wanted != code.as_str()) {
                continue;
            }
            report.engines_checked += 1;
            report.findings.extend(self.lint_engine(name, code, page));
        }
    }

    /// Brand-level checks: research resources and the hero image
    pub fn lint_brand(&self, name: &str, brand: &BrandData) -> Vec<Finding> {
        let mut findings = Findings::new(&self.config, name, None);
        structure::check_brand(&mut findings, brand);
        findings.into_vec()
    }

    /// All checks for a single engine page
    pub fn lint_engine(&self, brand: &str, code: &str, page: &EnginePageData) -> Vec<Finding> {
        debug!("Linting {}/{}", brand, code);
        let mut findings = Findings::new(&self.config, brand, Some(code));
        structure::check_engine(&mut findings, code, page);
        graph::check_graph(&mut findings, code, &page.schema);
        consistency::check_faqs(&mut findings, page);
        consistency::check_spec_drift(&mut findings, page);
        let findings = findings.into_vec();
        debug!("{}/{}: {} finding(s)", brand, code, findings.len());
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://example.org/saab/b230ft"));
        assert!(is_http_url("http://example.org"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("/images/b230ft.jpg"));
        assert!(!is_http_url("ftp://example.org/file"));
        assert!(!is_http_url("https://example.org/a b"));
    }

    #[test]
    fn test_findings_respect_disabled_rules() {
        let config = LintConfig {
            disabled_rules: vec![Rule::EmptyField],
            ..Default::default()
        };
        let mut findings = Findings::new(&config, "saab", Some("b230ft"));
        findings.require_text("metadata.title", "  ");
        findings.require_url("bannerImage", "not-a-url");
        let items = findings.into_vec();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].rule, Rule::InvalidUrl);
        assert_eq!(items[0].location(), "saab/b230ft");
    }

    #[test]
    fn test_findings_apply_severity_override() {
        let mut config = LintConfig::default();
        config.severity_overrides.insert(Rule::FaqMismatch, Severity::Error);
        let mut findings = Findings::new(&config, "saab", None);
        findings.push_with(Rule::FaqMismatch, Severity::Warning, "faqs[0]", "differs");
        findings.push(Rule::SeoLength, "metadata.title", "too long");
        let items = findings.into_vec();
        assert_eq!(items[0].severity, Severity::Error);
        assert_eq!(items[1].severity, Severity::Warning);
        assert_eq!(items[0].location(), "saab");
    }

    #[test]
    fn test_report_counts() {
        let finding = |severity| Finding {
            rule: Rule::EmptyField,
            severity,
            brand: "saab".to_string(),
            engine: None,
            path: "heroImage.alt".to_string(),
            message: String::new(),
        };
        let report = Report {
            brands_checked: 1,
            engines_checked: 0,
            findings: vec![finding(Severity::Error), finding(Severity::Warning)],
        };
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
        assert!(!report.is_clean());
        assert!(Report::default().is_clean());
    }
}
