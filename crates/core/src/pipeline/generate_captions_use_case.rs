use std::path::{Path, PathBuf};

use crate::captions::domain::caption_aligner::align_captions;
use crate::captions::domain::caption_writer::CaptionWriter;
use crate::media::domain::media_probe::MediaProbe;
use crate::pipeline::batch_summary::BatchSummary;
use crate::pipeline::diagnostics::{Diagnostic, DiagnosticReporter};
use crate::pipeline::video_files::list_videos;
use crate::shared::constants::CAPTION_EXTENSION;
use crate::shared::error::SurveyError;
use crate::shared::video_identity::VideoIdentity;
use crate::survey::domain::telemetry_index::TelemetryIndex;

/// Writes one caption file next to every clip in a directory.
pub struct GenerateCaptionsUseCase {
    probe: Box<dyn MediaProbe>,
    telemetry: TelemetryIndex,
    writer: Box<dyn CaptionWriter>,
    reporter: Box<dyn DiagnosticReporter>,
}

impl GenerateCaptionsUseCase {
    pub fn new(
        probe: Box<dyn MediaProbe>,
        telemetry: TelemetryIndex,
        writer: Box<dyn CaptionWriter>,
        reporter: Box<dyn DiagnosticReporter>,
    ) -> Self {
        Self {
            probe,
            telemetry,
            writer,
            reporter,
        }
    }

    pub fn execute(&mut self, clips_dir: &Path) -> Result<BatchSummary, SurveyError> {
        let clips = list_videos(clips_dir)?
            .into_iter()
            .map(|path| VideoIdentity::from_path(&path).map(|identity| (path, identity)))
            .collect::<Result<Vec<_>, _>>()?;

        self.reporter.info(&format!(
            "Captioning {} clips in {}",
            clips.len(),
            clips_dir.display()
        ));

        let mut summary = BatchSummary::default();
        for (path, identity) in &clips {
            summary.processed += 1;
            match self.caption_clip(path, identity) {
                Ok((caption_path, count)) => {
                    summary.written += 1;
                    self.reporter.info(&format!(
                        "{}: {count} captions",
                        caption_path.display()
                    ));
                }
                Err(e) if e.is_structural() => return Err(e),
                Err(e) => {
                    summary.failed += 1;
                    self.reporter.report(Diagnostic::ItemFailed {
                        item: path.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        self.reporter.summary(&summary);
        Ok(summary)
    }

    fn caption_clip(
        &self,
        path: &Path,
        identity: &VideoIdentity,
    ) -> Result<(PathBuf, usize), SurveyError> {
        let rows = self.telemetry.rows_for(&identity.dive_id)?;
        let probed_secs = self.probe.duration_secs(path)?;
        let entries = align_captions(identity, probed_secs, self.telemetry.layout(), rows);

        let caption_path = path.with_extension(CAPTION_EXTENSION);
        self.writer.write(&caption_path, &entries)?;
        Ok((caption_path, entries.len()))
    }
}
