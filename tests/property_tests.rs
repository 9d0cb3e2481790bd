//! Property-based tests for enginelint
//!
//! These tests verify:
//! - Number extraction from formatted spec values
//! - Production-year parsing over the whole accepted range
//! - Rule code round-trips (parse → to_string → parse)
//! - Engine key validation

use proptest::prelude::*;
use std::str::FromStr;
use strum::IntoEnumIterator;

use enginelint::lint::numbers::{approx_eq, extract_numbers};
use enginelint::lint::structure::is_valid_engine_key;
use enginelint::{ProductionYears, Rule, Severity};

/// Format an integer with comma thousands separators: 1234567 -> "1,234,567"
fn with_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Number extraction
// =============================================================================

proptest! {
    /// A separated integer inside prose is read back as one number
    #[test]
    fn separated_integer_roundtrip(n in 0u64..100_000_000) {
        let text = format!("peak at {} rpm", with_separators(n));
        prop_assert_eq!(extract_numbers(&text), vec![n as f64]);
    }

    /// Decimal values keep their fractional part
    #[test]
    fn decimal_roundtrip(whole in 0u32..10_000, frac in 0u32..100) {
        let literal = format!("{}.{:02}", whole, frac);
        let expected: f64 = literal.parse().unwrap();
        let text = format!("{} mm", literal);
        prop_assert_eq!(extract_numbers(&text), vec![expected]);
    }

    /// Both ends of an en-dash range are extracted in order
    #[test]
    fn range_yields_both_ends(low in 1u32..1000, high in 1u32..1000) {
        let text = format!("{}–{} hp", low, high);
        prop_assert_eq!(extract_numbers(&text), vec![low as f64, high as f64]);
    }

    /// A value always matches itself, whatever the tolerance
    #[test]
    fn approx_eq_is_reflexive(value in 0.001f64..1.0e6, tolerance in 0.0f64..0.5) {
        prop_assert!(approx_eq(value, value, tolerance));
    }
}

// =============================================================================
// Production years
// =============================================================================

proptest! {
    /// Any ordered pair of years in range parses to itself
    #[test]
    fn ordered_years_parse(start in 1885u16..=2100, span in 0u16..40) {
        let end = start.saturating_add(span).min(2100);
        let years = ProductionYears::parse(&format!("{}–{}", start, end)).unwrap();
        prop_assert_eq!(years, ProductionYears { start, end: Some(end) });
    }

    /// Reversed ranges are always rejected
    #[test]
    fn reversed_years_rejected(start in 1886u16..=2100, back in 1u16..50) {
        let end = start.saturating_sub(back).max(1885);
        prop_assume!(end < start);
        let input = format!("{}-{}", start, end);
        prop_assert!(ProductionYears::parse(&input).is_err());
    }

    /// Open-ended ranges have no end year
    #[test]
    fn open_range_parses(start in 1885u16..=2100) {
        let years = ProductionYears::parse(&format!("{}–present", start)).unwrap();
        prop_assert_eq!(years.end, None);
    }
}

// =============================================================================
// Rule and severity codes
// =============================================================================

fn rule_strategy() -> impl Strategy<Value = Rule> {
    proptest::sample::select(Rule::iter().collect::<Vec<_>>())
}

proptest! {
    /// Rule: to_string → parse round-trip is identity
    #[test]
    fn rule_roundtrip(rule in rule_strategy()) {
        let code = rule.to_string();
        prop_assert_eq!(Rule::from_str(&code).unwrap(), rule);
        prop_assert_eq!(code.clone(), code.to_lowercase());
        prop_assert!(!code.contains('_'));
    }

    /// Rule: default severity round-trips through its string form
    #[test]
    fn severity_roundtrip(rule in rule_strategy()) {
        let severity = rule.default_severity();
        prop_assert_eq!(Severity::from_str(&severity.to_string()).unwrap(), severity);
    }
}

// =============================================================================
// Engine keys
// =============================================================================

proptest! {
    /// Lowercase alphanumeric words joined by dashes are valid
    #[test]
    fn generated_keys_are_valid(key in "[a-z0-9]{1,8}(-[a-z0-9]{1,4}){0,2}") {
        prop_assert!(is_valid_engine_key(&key));
    }

    /// Any uppercase letter invalidates a key
    #[test]
    fn uppercase_keys_are_invalid(key in "[a-z0-9]{0,4}[A-Z][a-z0-9]{0,4}") {
        prop_assert!(!is_valid_engine_key(&key));
    }
}
