//! Cross-section consistency: content that is authored twice must agree
//!
//! The plain `faqs` list is duplicated into the FAQPage node, and the spec
//! table overlaps the VehicleEngine node. Neither copy is generated from the
//! other, so drift is common.

use std::collections::HashSet;

use super::numbers::{approx_eq, extract_numbers, value_numbers};
use super::Findings;
use crate::content::jsonld::node_path;
use crate::content::EnginePageData;
use crate::types::{NodeType, Rule, Severity};

/// Maps spec-table parameters to VehicleEngine properties
struct SpecMapping {
    /// Lowercase substrings matched against the row's parameter
    keywords: &'static [&'static str],
    property: &'static str,
    /// Accepted unit factors between row and node (litres vs. cc)
    scales: &'static [f64],
}

const SPEC_MAPPINGS: &[SpecMapping] = &[
    SpecMapping {
        keywords: &["displacement"],
        property: "engineDisplacement",
        scales: &[1.0, 1000.0, 0.001],
    },
    SpecMapping { keywords: &["torque"], property: "torque", scales: &[1.0] },
    SpecMapping {
        keywords: &["horsepower", "power"],
        property: "enginePower",
        scales: &[1.0],
    },
    SpecMapping { keywords: &["bore"], property: "bore", scales: &[1.0] },
    SpecMapping { keywords: &["stroke"], property: "stroke", scales: &[1.0] },
    SpecMapping {
        keywords: &["compression"],
        property: "compressionRatio",
        scales: &[1.0],
    },
];

/// Every `faqs` question must appear verbatim in FAQPage.mainEntity
pub fn check_faqs(findings: &mut Findings, page: &EnginePageData) {
    if page.schema.node_of_type(NodeType::FaqPage).is_none() {
        // missing-node already covers this
        return;
    }

    let entries = page.schema.faq_entries();

    for (i, faq) in page.faqs.iter().enumerate() {
        if faq.question.trim().is_empty() {
            continue;
        }
        match entries.iter().find(|entry| entry.question == faq.question) {
            None => findings.push(
                Rule::FaqMismatch,
                format!("faqs[{}].question", i),
                format!("'{}' is missing from FAQPage.mainEntity", faq.question),
            ),
            Some(entry) if entry.answer.as_deref() != Some(faq.answer.as_str()) => findings
                .push_with(
                    Rule::FaqMismatch,
                    Severity::Warning,
                    format!("{}.acceptedAnswer.text", entry.path),
                    format!("answer differs from faqs[{}].answer", i),
                ),
            Some(_) => {}
        }
    }

    let listed: HashSet<&str> = page.faqs.iter().map(|faq| faq.question.as_str()).collect();
    for entry in &entries {
        if !listed.contains(entry.question.as_str()) {
            findings.push_with(
                Rule::FaqMismatch,
                Severity::Warning,
                format!("{}.name", entry.path),
                format!("'{}' is in FAQPage but not in faqs", entry.question),
            );
        }
    }
}

/// VehicleEngine quantities must match the spec rows that describe them
pub fn check_spec_drift(findings: &mut Findings, page: &EnginePageData) {
    let Some((index, engine)) = page
        .schema
        .nodes_of_type(NodeType::VehicleEngine)
        .into_iter()
        .next()
    else {
        return;
    };
    let tolerance = findings.config().numeric_tolerance;
    let rows = &page.technical_specifications.engine_specs;

    for mapping in SPEC_MAPPINGS {
        let Some(property) = engine.property(mapping.property) else {
            continue;
        };
        let node_values = value_numbers(property);
        if node_values.is_empty() {
            continue;
        }

        let matching: Vec<_> = rows
            .iter()
            .filter(|row| {
                let parameter = row.parameter.to_lowercase();
                mapping.keywords.iter().any(|k| parameter.contains(k))
            })
            .collect();
        if matching.is_empty() {
            continue;
        }
        let row_values: Vec<f64> = matching
            .iter()
            .flat_map(|row| extract_numbers(&row.value))
            .collect();

        for actual in node_values {
            let consistent = row_values.iter().any(|expected| {
                mapping
                    .scales
                    .iter()
                    .any(|scale| approx_eq(actual, expected * scale, tolerance))
            });
            if !consistent {
                let described: Vec<String> = matching
                    .iter()
                    .map(|row| format!("{}: {}", row.parameter, row.value))
                    .collect();
                findings.push(
                    Rule::SpecDrift,
                    format!("{}.{}", node_path(index), mapping.property),
                    format!(
                        "VehicleEngine {} = {} does not match spec table ({})",
                        mapping.property,
                        actual,
                        described.join("; ")
                    ),
                );
            }
        }
    }
}
