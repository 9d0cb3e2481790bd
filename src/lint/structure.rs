//! Structural checks on the human-readable sections

use std::collections::HashMap;

use super::Findings;
use crate::content::{BrandData, EnginePageData, NoteValue};
use crate::types::Rule;

const GRADIENT_FUNCTIONS: &[&str] = &[
    "linear-gradient(",
    "radial-gradient(",
    "conic-gradient(",
    "repeating-linear-gradient(",
    "repeating-radial-gradient(",
];

/// Research URLs and hero image of a brand
pub fn check_brand(findings: &mut Findings, brand: &BrandData) {
    let expected = findings.config().research_resource_count;
    if brand.research_resources.len() != expected {
        findings.push(
            Rule::ResearchResources,
            "researchResources",
            format!(
                "expected {} research URLs, found {}",
                expected,
                brand.research_resources.len()
            ),
        );
    }
    for (label, url) in &brand.research_resources {
        findings.require_url(format!("researchResources.{}", label), url);
    }

    findings.require_url("heroImage.url", &brand.hero_image.url);
    findings.require_text("heroImage.alt", &brand.hero_image.alt);
}

/// Every human-readable section of an engine page
pub fn check_engine(findings: &mut Findings, code: &str, page: &EnginePageData) {
    check_engine_key(findings, code);
    check_metadata(findings, page);
    check_hero(findings, page);
    check_specifications(findings, page);
    check_compatible_models(findings, page);
    findings.require_url("bannerImage", &page.banner_image);
    check_reliability_issues(findings, page);
    check_faqs(findings, page);
}

/// Lowercase alphanumeric words joined by single dashes, e.g. `b230ft` or `b207-l`
pub fn is_valid_engine_key(code: &str) -> bool {
    !code.is_empty()
        && code
            .split('-')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()))
}

fn check_engine_key(findings: &mut Findings, code: &str) {
    if !is_valid_engine_key(code) {
        findings.push(
            Rule::EngineKey,
            "key",
            format!("engine code '{}' should be lowercase letters and digits", code),
        );
    }
}

fn check_metadata(findings: &mut Findings, page: &EnginePageData) {
    let metadata = &page.metadata;
    findings.require_text("metadata.title", &metadata.title);
    findings.require_text("metadata.description", &metadata.description);

    let title_max = findings.config().title_max_len;
    let title_len = metadata.title.chars().count();
    if title_len > title_max {
        findings.push(
            Rule::SeoLength,
            "metadata.title",
            format!("title is {} characters, limit is {}", title_len, title_max),
        );
    }

    let description_max = findings.config().description_max_len;
    let description_len = metadata.description.chars().count();
    if description_len > description_max {
        findings.push(
            Rule::SeoLength,
            "metadata.description",
            format!(
                "description is {} characters, limit is {}",
                description_len, description_max
            ),
        );
    }
}

fn check_hero(findings: &mut Findings, page: &EnginePageData) {
    let hero = &page.hero;
    if let Err(e) = hero.production_years() {
        findings.push(Rule::YearRange, "hero.years", e.to_string());
    }

    if hero.intro.is_empty() {
        findings.push(Rule::EmptySection, "hero.intro", "hero needs at least one paragraph");
    }
    for (i, paragraph) in hero.intro.iter().enumerate() {
        findings.require_text(format!("hero.intro[{}]", i), paragraph);
    }

    findings.require_text("hero.disclaimer.title", &hero.disclaimer.title);
    findings.require_text("hero.disclaimer.content", &hero.disclaimer.content);
}

fn check_specifications(findings: &mut Findings, page: &EnginePageData) {
    let specs = &page.technical_specifications;
    findings.require_text("technicalSpecifications.description", &specs.description);

    if specs.engine_specs.is_empty() {
        findings.push(
            Rule::EmptySection,
            "technicalSpecifications.engineSpecs",
            "specification table has no rows",
        );
    }
    for (i, row) in specs.engine_specs.iter().enumerate() {
        let base = format!("technicalSpecifications.engineSpecs[{}]", i);
        findings.require_text(format!("{}.parameter", base), &row.parameter);
        findings.require_text(format!("{}.value", base), &row.value);
        findings.require_text(format!("{}.source", base), &row.source);
    }

    let implications = &specs.practical_implications;
    let base = "technicalSpecifications.practicalImplications";
    findings.require_text(format!("{}.heading", base), &implications.heading);
    findings.require_text(format!("{}.content", base), &implications.content);
    for (topic, note) in &implications.verification_notes {
        findings.require_text(format!("{}.verificationNotes.{}", base, topic), note);
    }
    for (i, citation) in implications.citations.iter().enumerate() {
        findings.require_text(format!("{}.citations[{}]", base, i), citation);
    }
}

fn check_compatible_models(findings: &mut Findings, page: &EnginePageData) {
    let compatible = &page.compatible_models;
    findings.require_text("compatibleModels.description", &compatible.description);
    findings.require_text("compatibleModels.guidance", &compatible.guidance);

    if compatible.models.is_empty() {
        findings.push(
            Rule::EmptySection,
            "compatibleModels.models",
            "compatible model table has no rows",
        );
    }
    for (i, row) in compatible.models.iter().enumerate() {
        let base = format!("compatibleModels.models[{}]", i);
        findings.require_text(format!("{}.Make", base), &row.make);
        findings.require_text(format!("{}.Models", base), &row.models);
        findings.require_text(format!("{}.Years", base), &row.years);
        findings.require_text(format!("{}.Variants", base), &row.variants);
        findings.require_text(format!("{}[\"OEM Source\"]", base), &row.oem_source);
    }

    for (i, note) in compatible.extra_notes.iter().flatten().enumerate() {
        for (topic, value) in note {
            if value.is_blank() {
                let path = format!("compatibleModels.extraNotes[{}].{}", i, topic);
                let what = match value {
                    NoteValue::Text(_) => "note",
                    NoteValue::List(_) => "note list",
                };
                findings.push(Rule::EmptyField, path, format!("{} '{}' is blank", what, topic));
            }
        }
    }
}

fn check_reliability_issues(findings: &mut Findings, page: &EnginePageData) {
    let section = &page.common_reliability_issues;
    findings.require_text("commonReliabilityIssues.subheading", &section.subheading);

    if section.issues.is_empty() {
        findings.push(
            Rule::EmptySection,
            "commonReliabilityIssues.issues",
            "no reliability issues listed",
        );
    }
    for (i, issue) in section.issues.iter().enumerate() {
        let base = format!("commonReliabilityIssues.issues[{}]", i);
        findings.require_text(format!("{}.title", base), &issue.title);
        findings.require_text(format!("{}.symptoms", base), &issue.symptoms);
        findings.require_text(format!("{}.cause", base), &issue.cause);
        findings.require_text(format!("{}.fix", base), &issue.fix);
    }

    let info = &section.info_block;
    findings.require_text("commonReliabilityIssues.infoBlock.title", &info.title);
    findings.require_text("commonReliabilityIssues.infoBlock.description", &info.description);
    if !is_css_gradient(&info.gradient) {
        findings.push(
            Rule::Gradient,
            "commonReliabilityIssues.infoBlock.gradient",
            format!("'{}' is not a CSS gradient", info.gradient),
        );
    }
}

/// `linear-gradient(...)` and friends, with balanced parentheses
pub fn is_css_gradient(value: &str) -> bool {
    let value = value.trim();
    if !GRADIENT_FUNCTIONS.iter().any(|f| value.starts_with(f)) || !value.ends_with(')') {
        return false;
    }
    let mut depth: i32 = 0;
    for c in value.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

fn check_faqs(findings: &mut Findings, page: &EnginePageData) {
    if page.faqs.is_empty() {
        findings.push(Rule::EmptySection, "faqs", "page has no FAQs");
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (i, faq) in page.faqs.iter().enumerate() {
        findings.require_text(format!("faqs[{}].question", i), &faq.question);
        findings.require_text(format!("faqs[{}].answer", i), &faq.answer);

        if faq.question.trim().is_empty() {
            continue;
        }
        match seen.get(faq.question.as_str()) {
            Some(first) => findings.push(
                Rule::DuplicateFaq,
                format!("faqs[{}].question", i),
                format!("question repeats faqs[{}]", first),
            ),
            None => {
                seen.insert(faq.question.as_str(), i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_key_format() {
        assert!(is_valid_engine_key("b230ft"));
        assert!(is_valid_engine_key("b207-l"));
        assert!(!is_valid_engine_key("B230FT"));
        assert!(!is_valid_engine_key("b230 ft"));
        assert!(!is_valid_engine_key("b230--ft"));
        assert!(!is_valid_engine_key(""));
    }

    #[test]
    fn test_css_gradient() {
        assert!(is_css_gradient("linear-gradient(135deg, #1e3a8a 0%, #3b82f6 100%)"));
        assert!(is_css_gradient("radial-gradient(circle, rgba(0,0,0,0.2), transparent)"));
        assert!(!is_css_gradient("#1e3a8a"));
        assert!(!is_css_gradient("linear-gradient(135deg, #000"));
        assert!(!is_css_gradient("linear-gradient(a))("));
    }
}
