use crate::shared::constants::{MEASUREMENT_DECIMALS, POSITION_DECIMALS, POSITION_FIELD_TOKENS};

/// Which caption line a field is rendered on, and how it is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    /// Latitude, longitude and time-of-day fields.
    Position,
    /// Everything else (depth, speed, altitude, ...).
    Measurement,
}

impl FieldGroup {
    /// Classifies a raw column name by case-sensitive token match.
    pub fn classify(raw_name: &str) -> Self {
        if POSITION_FIELD_TOKENS
            .iter()
            .any(|token| raw_name.contains(token))
        {
            FieldGroup::Position
        } else {
            FieldGroup::Measurement
        }
    }

    pub fn decimals(self) -> u32 {
        match self {
            FieldGroup::Position => POSITION_DECIMALS,
            FieldGroup::Measurement => MEASUREMENT_DECIMALS,
        }
    }
}

/// Shortens a raw column name into a caption label.
///
/// Each noise token is removed literally, then everything from the first
/// remaining underscore on (the unit suffix) is dropped. Falls back to the
/// raw name when nothing would be left.
pub fn normalize_label(raw_name: &str, noise_tokens: &[String]) -> String {
    let mut label = raw_name.to_string();
    for token in noise_tokens.iter().filter(|t| !t.is_empty()) {
        label = label.replace(token.as_str(), "");
    }
    if let Some(cut) = label.find('_') {
        label.truncate(cut);
    }
    if label.is_empty() {
        raw_name.to_string()
    } else {
        label
    }
}

/// Rounds a numeric cell to `decimals` places; other cells pass through trimmed.
///
/// Trailing zeros are trimmed but one decimal digit is always kept, so
/// `12` renders as `12.0`.
pub fn format_value(cell: &str, decimals: u32) -> String {
    let trimmed = cell.trim();
    let Ok(value) = trimmed.parse::<f64>() else {
        return trimmed.to_string();
    };
    if !value.is_finite() {
        return trimmed.to_string();
    }

    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    let mut text = format!("{rounded:.prec$}", prec = decimals.max(1) as usize);
    while text.ends_with('0') && !text.ends_with(".0") {
        text.pop();
    }
    if text == "-0.0" {
        text = "0.0".to_string();
    }
    text
}
