//! Display formatting shared by every visualization.
//!
//! Numbers are rounded to four decimal places on copies of payload values;
//! the payload itself is never modified.

use serde_json::{Number, Value};

/// Decimal places kept for display.
pub const DISPLAY_DECIMALS: i32 = 4;

/// Round to [`DISPLAY_DECIMALS`] places.
pub fn round_display(x: f64) -> f64 {
    // From 1e15 up, f64 steps are at least 0.125, so rounding is a no-op and scaling may overflow.
    if !x.is_finite() || x.abs() >= 1e15 {
        return x;
    }
    let factor = 10f64.powi(DISPLAY_DECIMALS);
    let rounded = (x * factor).round() / factor;
    // Collapse -0.0 so it prints as "0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format a number for display: at most four decimals, no trailing zeros.
pub fn format_number(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let rounded = round_display(x);
    if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

/// Format any JSON value as display text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "—".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => format_number(f),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string(&round_value(value)).unwrap_or_default()
        }
    }
}

/// Deep copy of `value` with every float rounded for display.
pub fn round_value(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .and_then(|f| Number::from_f64(round_display(f)))
            .map(Value::Number)
            .unwrap_or_else(|| value.clone()),
        Value::Array(items) => Value::Array(items.iter().map(round_value).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), round_value(v)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

/// Human label for a payload key: `total_sales` / `totalSales` → `Total Sales`.
pub fn title_case(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in key.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_number_rounding() {
        assert_eq!(format_number(1234.5678), "1234.5678");
        assert_eq!(format_number(1234.56789), "1234.5679");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(100.00001), "100");
        assert_eq!(format_number(-0.00001), "0");
        assert_eq!(format_number(-3.25), "-3.25");
    }

    #[test]
    fn test_huge_numbers_survive_rounding() {
        assert_eq!(round_display(1e305), 1e305);
        assert_eq!(round_display(f64::MAX), f64::MAX);
        assert_eq!(round_display(-1e306), -1e306);
        assert_eq!(round_display(123456789012345678.0), 123456789012345678.0);

        let shown = display_value(&json!(1e305));
        assert_ne!(shown, "inf");
        assert_eq!(shown.parse::<f64>().unwrap(), 1e305);
        assert_eq!(round_value(&json!(1e305)), json!(1e305));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!(42)), "42");
        assert_eq!(display_value(&json!(3.14159265)), "3.1416");
        assert_eq!(display_value(&json!("North")), "North");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(null)), "—");
        assert_eq!(display_value(&json!([1.23456, 2])), "[1.2346,2]");
    }

    #[test]
    fn test_round_value_does_not_touch_source() {
        let source = json!({"a": 1.234567, "b": [2.000049, 7], "c": "x"});
        let rounded = round_value(&source);
        assert_eq!(rounded, json!({"a": 1.2346, "b": [2.0, 7], "c": "x"}));
        assert_eq!(source["a"], json!(1.234567));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("total_sales"), "Total Sales");
        assert_eq!(title_case("totalSales"), "Total Sales");
        assert_eq!(title_case("avg-order value"), "Avg Order Value");
        assert_eq!(title_case("avgROI"), "Avg ROI");
        assert_eq!(title_case("sales_by_region"), "Sales By Region");
        assert_eq!(title_case("q4Revenue"), "Q4 Revenue");
        assert_eq!(title_case(""), "");
    }
}
