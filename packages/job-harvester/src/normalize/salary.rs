use lazy_static::lazy_static;
use regex::Regex;

use crate::types::CurrencyUnit;

/// Phrases meaning "salary to be discussed". The second form is the mojibake
/// rendering the site occasionally serves.
const NEGOTIABLE_MARKERS: &[&str] = &["thoả thuận", "thoáº£ thuáº­n"];
const UP_TO_MARKERS: &[&str] = &["tới", "tá»›i"];
const FROM_MARKERS: &[&str] = &["trên", "trãªn"];

/// Magnitude keywords in declared order. When several appear in one string,
/// the last entry of this table that matches wins.
const MAGNITUDES: &[(&str, f64)] = &[
    ("tỷ", 1_000_000_000.0),
    ("triệu", 1_000_000.0),
    ("nghìn", 1_000.0),
    ("ngàn", 1_000.0),
];

lazy_static! {
    static ref RANGE: Regex = Regex::new(r"\d+([.,]\d+)?-\d+([.,]\d+)?").unwrap();
    static ref NUMBER: Regex = Regex::new(r"\d+([.,]\d+)?").unwrap();
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParsedSalary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub unit: Option<CurrencyUnit>,
}

/// Parse a raw salary string into `(min, max, unit)`.
///
/// Negotiable phrases, missing input and text without numeric content all
/// yield the all-`None` result. Commas are thousand separators and are
/// stripped before numeric conversion.
pub fn parse_salary(raw: Option<&str>) -> ParsedSalary {
    let Some(raw) = raw else {
        return ParsedSalary::default();
    };
    let lowered = raw.to_lowercase();
    let text = lowered.trim();

    if NEGOTIABLE_MARKERS.iter().any(|m| text.contains(m)) {
        return ParsedSalary::default();
    }

    let unit = if text.contains("usd") {
        CurrencyUnit::Usd
    } else {
        CurrencyUnit::Vnd
    };

    let mut multiplier = 1.0;
    for (keyword, value) in MAGNITUDES {
        if text.contains(keyword) {
            multiplier = *value;
        }
    }

    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '-' | '.' | ','))
        .collect();

    if RANGE.is_match(&cleaned) {
        let parts: Vec<&str> = cleaned.split('-').collect();
        if let (Ok(low), Ok(high)) = (
            parts[0].replace(',', "").parse::<f64>(),
            parts[1].replace(',', "").parse::<f64>(),
        ) {
            return ParsedSalary {
                min: Some(low * multiplier),
                max: Some(high * multiplier),
                unit: Some(unit),
            };
        }
        return ParsedSalary::default();
    }

    if NUMBER.is_match(&cleaned) {
        if let Ok(value) = cleaned.replace(',', "").parse::<f64>() {
            let value = value * multiplier;
            if UP_TO_MARKERS.iter().any(|m| text.contains(m)) {
                return ParsedSalary {
                    min: None,
                    max: Some(value),
                    unit: Some(unit),
                };
            }
            if FROM_MARKERS.iter().any(|m| text.contains(m)) {
                return ParsedSalary {
                    min: Some(value),
                    max: None,
                    unit: Some(unit),
                };
            }
            return ParsedSalary {
                min: Some(value),
                max: Some(value),
                unit: Some(unit),
            };
        }
    }

    ParsedSalary::default()
}
