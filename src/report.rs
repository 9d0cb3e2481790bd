//! Output rendering for lint reports, listings and JSON-LD extraction

use std::fmt::Write;

use crate::content::{PageData, SchemaGraph};
use crate::error::Result;
use crate::lint::Report;
use crate::types::OutputFormat;

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// Render a report in the requested format
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Human-readable report grouped by brand/engine
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let mut current: Option<String> = None;

    for finding in &report.findings {
        let location = finding.location();
        if current.as_deref() != Some(location.as_str()) {
            if current.is_some() {
                out.push('\n');
            }
            let _ = writeln!(out, "{}", location);
            current = Some(location);
        }
        if finding.path.is_empty() {
            let _ = writeln!(out, "  {}[{}] {}", finding.severity, finding.rule, finding.message);
        } else {
            let _ = writeln!(
                out,
                "  {}[{}] {}: {}",
                finding.severity, finding.rule, finding.path, finding.message
            );
        }
    }

    let scope = format!(
        "{} ({})",
        plural(report.engines_checked, "engine"),
        plural(report.brands_checked, "brand")
    );
    if report.is_clean() {
        let _ = writeln!(out, "✓ {}: no findings", scope);
    } else {
        if !out.is_empty() {
            out.push('\n');
        }
        let mark = if report.has_errors() { "✗" } else { "!" };
        let _ = writeln!(
            out,
            "{} {}, {} in {}",
            mark,
            plural(report.error_count(), "error"),
            plural(report.warning_count(), "warning"),
            scope
        );
    }
    out
}

/// One line per engine: brand, code, years and section sizes
pub fn render_listing(data: &PageData) -> String {
    let mut out = String::new();
    for (brand, code, page) in data.engines() {
        let _ = writeln!(
            out,
            "{}/{}\t{}\t{} specs\t{} issues\t{} faqs",
            brand,
            code,
            page.hero.years,
            page.technical_specifications.engine_specs.len(),
            page.common_reliability_issues.issues.len(),
            page.faqs.len()
        );
    }
    let _ = writeln!(
        out,
        "{} across {}",
        plural(data.engine_count(), "engine"),
        plural(data.brands().len(), "brand")
    );
    out
}

/// Pretty JSON-LD, optionally wrapped in a `<script>` tag for embedding
pub fn render_jsonld(schema: &SchemaGraph, script_tag: bool) -> Result<String> {
    let json = serde_json::to_string_pretty(schema)?;
    if !script_tag {
        return Ok(json);
    }
    // "</" inside string values would terminate the script element early
    let escaped = json.replace("</", "<\\/");
    Ok(format!(
        "<script type=\"application/ld+json\">\n{}\n</script>",
        escaped
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::Finding;
    use crate::types::{Rule, Severity};

    fn finding(engine: &str, rule: Rule, severity: Severity) -> Finding {
        Finding {
            rule,
            severity,
            brand: "saab".to_string(),
            engine: Some(engine.to_string()),
            path: "faqs[0].question".to_string(),
            message: "broken".to_string(),
        }
    }

    #[test]
    fn test_clean_report_text() {
        let report = Report {
            brands_checked: 1,
            engines_checked: 2,
            findings: Vec::new(),
        };
        assert_eq!(render_text(&report), "✓ 2 engines (1 brand): no findings\n");
    }

    #[test]
    fn test_report_text_groups_by_engine() {
        let report = Report {
            brands_checked: 1,
            engines_checked: 2,
            findings: vec![
                finding("b230ft", Rule::FaqMismatch, Severity::Error),
                finding("b230ft", Rule::DuplicateFaq, Severity::Warning),
                finding("b234", Rule::EmptyField, Severity::Error),
            ],
        };
        let text = render_text(&report);
        assert_eq!(text.matches("saab/b230ft\n").count(), 1);
        assert!(text.contains("  error[faq-mismatch] faqs[0].question: broken"));
        assert!(text.contains("  warning[duplicate-faq]"));
        assert!(text.ends_with("✗ 2 errors, 1 warning in 2 engines (1 brand)\n"));
    }

    #[test]
    fn test_report_json() {
        let report = Report {
            brands_checked: 1,
            engines_checked: 1,
            findings: vec![finding("b230ft", Rule::SpecDrift, Severity::Warning)],
        };
        let json = render(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["findings"][0]["rule"], "spec-drift");
        assert_eq!(value["findings"][0]["severity"], "warning");
        assert_eq!(value["engines_checked"], 1);
    }

    #[test]
    fn test_jsonld_script_tag_escapes_closing_tags() {
        let schema: SchemaGraph = serde_json::from_value(serde_json::json!({
            "@context": "https://schema.org",
            "@graph": [{ "@type": "Answer", "text": "see </script> here" }]
        }))
        .unwrap();
        let html = render_jsonld(&schema, true).unwrap();
        assert!(html.starts_with("<script type=\"application/ld+json\">"));
        assert!(html.contains("<\\/script> here"));
        assert!(html.ends_with("</script>"));

        let json = render_jsonld(&schema, false).unwrap();
        assert!(json.contains("\"@graph\""));
    }
}
