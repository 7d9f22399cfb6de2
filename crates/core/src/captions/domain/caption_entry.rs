use chrono::TimeDelta;

use crate::survey::domain::field_format::FieldGroup;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReading {
    pub label: String,
    pub value: String,
    pub group: FieldGroup,
}

/// One timed caption block. Offsets are relative to the clip start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionEntry {
    /// 1-based, contiguous within a clip.
    pub index: usize,
    pub start: TimeDelta,
    pub end: TimeDelta,
    pub fields: Vec<FieldReading>,
}

impl CaptionEntry {
    /// Readings of one group, in layout order.
    pub fn group(&self, group: FieldGroup) -> impl Iterator<Item = &FieldReading> {
        self.fields.iter().filter(move |f| f.group == group)
    }
}
