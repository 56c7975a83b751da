//! Lenient numeric fields.
//!
//! Backend rows are edited by hand in the admin screens, so prices and sizes
//! arrive as numbers, as formatted text ("1.250.000 TL", "72,5 m²") or not at
//! all. Everything unparsable becomes `None` instead of failing the row.

use crate::pipeline::text::fold;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Deserialize an optional number that may be written as text.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(text)) => parse_amount(&text),
        Some(NumberOrText::Other(_)) | None => None,
    })
}

/// Deserialize an optional count. Accepts `3`, `"3"` and the local
/// room notation `"3+1"` (bedrooms plus living room), which counts as 3.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrText::Number(n)) if n.is_finite() && n >= 0.0 => Some(n as u32),
        Some(NumberOrText::Text(text)) => parse_count(&text),
        _ => None,
    })
}

/// Deserialize an optional floor number. Accepts signed numbers, "3. kat",
/// and the usual names for the ground and basement floors.
pub fn lenient_floor<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrText::Number(n)) if n.is_finite() => Some(n as i32),
        Some(NumberOrText::Text(text)) => parse_floor(&text),
        _ => None,
    })
}

/// Parse a human-formatted amount.
///
/// Dots are thousands separators and a comma is the decimal mark, unless the
/// text is a plain float already.
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !is_grouped(trimmed) {
        if let Ok(n) = trimmed.parse::<f64>() {
            return Some(n);
        }
    }

    let kept: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if !kept.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let canonical = if kept.contains(',') {
        kept.replace('.', "").replacen(',', ".", 1).replace(',', "")
    } else if is_grouped(&kept) {
        kept.replace('.', "")
    } else {
        kept
    };

    canonical.parse::<f64>().ok()
}

/// "1.250" is one thousand two hundred fifty, not one and a quarter.
fn is_grouped(text: &str) -> bool {
    let mut groups = text.split('.');
    let head = groups.next().unwrap_or_default();
    let mut tail = groups.peekable();
    if tail.peek().is_none() || head.is_empty() || head.len() > 3 {
        return false;
    }
    head.chars().all(|c| c.is_ascii_digit())
        && tail.all(|group| group.len() == 3 && group.chars().all(|c| c.is_ascii_digit()))
}

fn parse_floor(text: &str) -> Option<i32> {
    let folded = fold(text.trim());
    let (sign, rest) = match folded.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, folded.as_str()),
    };
    if let Some(n) = parse_count(rest) {
        return i32::try_from(n).ok().map(|n| sign * n);
    }

    if ["zemin", "giris", "bahce"].iter().any(|name| folded.contains(name)) {
        Some(0)
    } else if folded.contains("bodrum") {
        Some(-1)
    } else {
        None
    }
}

fn parse_count(text: &str) -> Option<u32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
