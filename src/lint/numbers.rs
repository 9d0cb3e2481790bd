//! Number extraction from spec-table prose and JSON-LD values

use serde_json::Value;

/// Pull every number out of free text.
///
/// Handles thousands separators (`2,290`), decimals (`96.0`) and ranges
/// (`155–185` yields both ends). Signs are ignored.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    let chars: Vec<char> = text.chars().collect();
    let mut numbers = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let mut literal = String::new();
        while i < chars.len() && chars[i].is_ascii_digit() {
            literal.push(chars[i]);
            i += 1;
        }

        // Thousands groups: a comma followed by exactly three digits
        while chars.get(i) == Some(&',') && is_digit_group(&chars, i + 1) {
            literal.extend(&chars[i + 1..i + 4]);
            i += 4;
        }

        if chars.get(i) == Some(&'.') && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit()) {
            literal.push('.');
            i += 1;
            while i < chars.len() && chars[i].is_ascii_digit() {
                literal.push(chars[i]);
                i += 1;
            }
        }

        if let Ok(number) = literal.parse::<f64>() {
            numbers.push(number);
        }
    }

    numbers
}

/// Exactly three digits starting at `start`, not followed by a fourth
fn is_digit_group(chars: &[char], start: usize) -> bool {
    let group = chars.get(start..start + 3);
    group.is_some_and(|g| g.iter().all(char::is_ascii_digit))
        && !chars.get(start + 3).is_some_and(char::is_ascii_digit)
}

/// Numbers carried by a JSON-LD value.
///
/// QuantitativeValue objects contribute `value`, `minValue` and `maxValue`;
/// plain numbers contribute themselves; strings are scanned as text.
pub fn value_numbers(value: &Value) -> Vec<f64> {
    match value {
        Value::Number(n) => n.as_f64().into_iter().collect(),
        Value::String(s) => extract_numbers(s),
        Value::Object(object) => ["value", "minValue", "maxValue"]
            .iter()
            .filter_map(|key| object.get(*key))
            .flat_map(value_numbers)
            .collect(),
        Value::Array(items) => items.iter().flat_map(value_numbers).collect(),
        _ => Vec::new(),
    }
}

/// Relative comparison; exact match required when `expected` is zero
pub fn approx_eq(actual: f64, expected: f64, tolerance: f64) -> bool {
    if expected == 0.0 {
        return actual == 0.0;
    }
    ((actual - expected) / expected).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_plain_and_decimal() {
        assert_eq!(extract_numbers("96.0 mm"), vec![96.0]);
        assert_eq!(extract_numbers("9.0:1"), vec![9.0, 1.0]);
        assert_eq!(extract_numbers("no digits"), Vec::<f64>::new());
    }

    #[test]
    fn test_extract_thousands_separator() {
        assert_eq!(extract_numbers("2,290 cc (2.3 L)"), vec![2290.0, 2.3]);
        assert_eq!(extract_numbers("1,985 cc"), vec![1985.0]);
        // Not a thousands group: four digits after the comma
        assert_eq!(extract_numbers("1985,1986"), vec![1985.0, 1986.0]);
    }

    #[test]
    fn test_extract_ranges() {
        assert_eq!(extract_numbers("155–185 hp"), vec![155.0, 185.0]);
        assert_eq!(extract_numbers("263-350 Nm @ 2,000 rpm"), vec![263.0, 350.0, 2000.0]);
    }

    #[test]
    fn test_trailing_period_is_not_decimal() {
        assert_eq!(extract_numbers("Rated at 185."), vec![185.0]);
    }

    #[test]
    fn test_value_numbers() {
        assert_eq!(value_numbers(&json!(2290)), vec![2290.0]);
        assert_eq!(value_numbers(&json!("96.0 mm")), vec![96.0]);
        assert_eq!(
            value_numbers(&json!({ "@type": "QuantitativeValue", "minValue": 155, "maxValue": 185 })),
            vec![155.0, 185.0]
        );
        assert_eq!(value_numbers(&json!(null)), Vec::<f64>::new());
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(2290.0, 2290.0, 0.0));
        assert!(approx_eq(2295.0, 2290.0, 0.01));
        assert!(!approx_eq(2400.0, 2290.0, 0.01));
        assert!(!approx_eq(1.0, 0.0, 0.5));
    }
}
