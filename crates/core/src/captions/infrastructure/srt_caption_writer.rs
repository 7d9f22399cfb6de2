use std::fmt::Write as _;
use std::path::Path;

use crate::captions::domain::caption_entry::CaptionEntry;
use crate::captions::domain::caption_writer::CaptionWriter;
use crate::shared::constants::CAPTION_FIELD_SEPARATOR;
use crate::shared::error::SurveyError;
use crate::shared::timecode::format_timecode;
use crate::survey::domain::field_format::FieldGroup;

/// Writes SubRip caption files: position readings on the first text line,
/// measurements on the second.
pub struct SrtCaptionWriter;

impl SrtCaptionWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SrtCaptionWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptionWriter for SrtCaptionWriter {
    fn write(&self, path: &Path, entries: &[CaptionEntry]) -> Result<(), SurveyError> {
        std::fs::write(path, render_srt(entries)).map_err(|source| SurveyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Wrote {} captions to {}", entries.len(), path.display());
        Ok(())
    }
}

/// Renders entries as SubRip text. Empty groups produce no line.
pub fn render_srt(entries: &[CaptionEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "{}", entry.index);
        let _ = writeln!(
            out,
            "{} --> {}",
            format_timecode(entry.start),
            format_timecode(entry.end)
        );
        for group in [FieldGroup::Position, FieldGroup::Measurement] {
            let line = entry
                .group(group)
                .map(|f| format!("{}: {}", f.label, f.value))
                .collect::<Vec<_>>()
                .join(CAPTION_FIELD_SEPARATOR);
            if !line.is_empty() {
                let _ = writeln!(out, "{line}");
            }
        }
        out.push('\n');
    }
    out
}
