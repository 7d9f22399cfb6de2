use std::collections::HashMap;

use crate::shared::constants::{
    DEFAULT_CAPTION_FIELDS, DEFAULT_DATETIME_FIELD, DEFAULT_DIVE_FIELD,
    DEFAULT_LABEL_NOISE_TOKENS, TIME_LABEL,
};
use crate::shared::error::SurveyError;
use crate::survey::domain::field_format::{normalize_label, FieldGroup};

/// Which telemetry columns to read and caption. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetrySchema {
    pub datetime_field: String,
    pub dive_field: String,
    /// Sensor columns to caption, in display order.
    pub fields: Vec<String>,
    pub noise_tokens: Vec<String>,
}

impl Default for TelemetrySchema {
    fn default() -> Self {
        Self {
            datetime_field: DEFAULT_DATETIME_FIELD.to_string(),
            dive_field: DEFAULT_DIVE_FIELD.to_string(),
            fields: DEFAULT_CAPTION_FIELDS.iter().map(|f| f.to_string()).collect(),
            noise_tokens: DEFAULT_LABEL_NOISE_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

/// One captioned column. `source` is `None` for the derived time-of-day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionField {
    pub source: Option<String>,
    pub label: String,
    pub group: FieldGroup,
}

/// Caption columns derived from a [`TelemetrySchema`]: the time-of-day
/// field first, then each configured field with its normalized label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryLayout {
    fields: Vec<CaptionField>,
}

impl TelemetryLayout {
    pub fn from_schema(schema: &TelemetrySchema) -> Result<Self, SurveyError> {
        let mut fields = Vec::with_capacity(schema.fields.len() + 1);
        fields.push(CaptionField {
            source: None,
            label: TIME_LABEL.to_string(),
            group: FieldGroup::Position,
        });

        let mut seen: HashMap<String, String> = HashMap::new();
        seen.insert(TIME_LABEL.to_string(), TIME_LABEL.to_string());

        for raw in &schema.fields {
            let label = normalize_label(raw, &schema.noise_tokens);
            if let Some(first) = seen.get(&label) {
                return Err(SurveyError::DuplicateLabel {
                    label,
                    first: first.clone(),
                    second: raw.clone(),
                });
            }
            seen.insert(label.clone(), raw.clone());
            fields.push(CaptionField {
                source: Some(raw.clone()),
                label,
                group: FieldGroup::classify(raw),
            });
        }

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[CaptionField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
