use std::path::{Path, PathBuf};

use crate::clipping::domain::clip_boundary::ClipLength;
use crate::clipping::domain::clip_planner::plan_clips;
use crate::media::domain::clip_extractor::ClipExtractor;
use crate::media::domain::media_probe::MediaProbe;
use crate::pipeline::batch_summary::BatchSummary;
use crate::pipeline::diagnostics::{Diagnostic, DiagnosticReporter};
use crate::pipeline::video_files::list_videos;
use crate::shared::error::SurveyError;
use crate::shared::video_identity::VideoIdentity;
use crate::survey::domain::dive_log_index::DiveLogIndex;

/// Cuts every source video in a directory into transect-bounded clips.
///
/// Filenames are all parsed before the first probe, so a malformed name
/// aborts the run before any clip is written. Errors tied to one video or
/// one clip are reported and the batch moves on.
pub struct ClipVideosUseCase {
    probe: Box<dyn MediaProbe>,
    extractor: Box<dyn ClipExtractor>,
    dive_log: DiveLogIndex,
    clip_length: ClipLength,
    reporter: Box<dyn DiagnosticReporter>,
}

struct VideoOutcome {
    written: usize,
    failed_clips: usize,
}

impl ClipVideosUseCase {
    pub fn new(
        probe: Box<dyn MediaProbe>,
        extractor: Box<dyn ClipExtractor>,
        dive_log: DiveLogIndex,
        clip_length: ClipLength,
        reporter: Box<dyn DiagnosticReporter>,
    ) -> Self {
        Self {
            probe,
            extractor,
            dive_log,
            clip_length,
            reporter,
        }
    }

    pub fn execute(
        &mut self,
        videos_dir: &Path,
        output_dir: &Path,
    ) -> Result<BatchSummary, SurveyError> {
        std::fs::create_dir_all(output_dir).map_err(|source| SurveyError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let videos = list_videos(videos_dir)?
            .into_iter()
            .map(|path| VideoIdentity::from_path(&path).map(|identity| (path, identity)))
            .collect::<Result<Vec<_>, _>>()?;

        self.reporter.info(&format!(
            "Clipping {} videos from {} into {} ({} minute clips)",
            videos.len(),
            videos_dir.display(),
            output_dir.display(),
            self.clip_length.minutes()
        ));

        let mut summary = BatchSummary::default();
        for (path, identity) in &videos {
            summary.processed += 1;
            match self.clip_video(path, identity, output_dir) {
                Ok(outcome) => {
                    summary.written += outcome.written;
                    if outcome.failed_clips > 0 {
                        summary.failed += 1;
                    }
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

    fn clip_video(
        &mut self,
        path: &Path,
        identity: &VideoIdentity,
        output_dir: &Path,
    ) -> Result<VideoOutcome, SurveyError> {
        let window = self.dive_log.window(&identity.dive_id)?.buffered();
        let probed_secs = self.probe.duration_secs(path)?;
        let plan = plan_clips(identity, probed_secs, &window, self.clip_length);

        for warning in plan.warnings {
            self.reporter
                .report(Diagnostic::from_warning(path.to_path_buf(), warning));
        }

        let mut outcome = VideoOutcome {
            written: 0,
            failed_clips: 0,
        };
        for boundary in &plan.boundaries {
            let output: PathBuf = output_dir.join(&boundary.output_name);
            if is_same_file(path, &output) {
                outcome.failed_clips += 1;
                self.reporter.report(Diagnostic::ItemFailed {
                    item: output,
                    error: "clip would overwrite its source video".to_string(),
                });
                continue;
            }
            match self
                .extractor
                .extract_clip(path, boundary.offset, boundary.duration, &output)
            {
                Ok(_) => outcome.written += 1,
                Err(e) => {
                    outcome.failed_clips += 1;
                    self.reporter.report(Diagnostic::ItemFailed {
                        item: output,
                        error: e.to_string(),
                    });
                }
            }
        }

        self.reporter.info(&format!(
            "{}: {} of {} clips written",
            path.display(),
            outcome.written,
            plan.boundaries.len()
        ));
        Ok(outcome)
    }
}

/// True when both paths name the same file, including through links.
fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::diagnostics::CollectingReporter;
    use crate::survey::domain::transect_window::TransectWindow;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use std::collections::HashMap;
    use std::num::NonZeroU32;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubProbe {
        durations: HashMap<String, f64>,
    }

    impl MediaProbe for StubProbe {
        fn duration_secs(&self, path: &Path) -> Result<f64, SurveyError> {
            let name = path.file_name().unwrap().to_str().unwrap();
            self.durations
                .get(name)
                .copied()
                .ok_or_else(|| SurveyError::ProbeFailure {
                    path: path.to_path_buf(),
                    reason: "no duration".to_string(),
                })
        }
    }

    type Call = (PathBuf, TimeDelta, TimeDelta, PathBuf);

    struct StubExtractor {
        calls: Arc<Mutex<Vec<Call>>>,
        fail_offsets: Vec<TimeDelta>,
    }

    impl ClipExtractor for StubExtractor {
        fn extract_clip(
            &self,
            source: &Path,
            offset: TimeDelta,
            length: TimeDelta,
            output: &Path,
        ) -> Result<PathBuf, SurveyError> {
            self.calls.lock().unwrap().push((
                source.to_path_buf(),
                offset,
                length,
                output.to_path_buf(),
            ));
            if self.fail_offsets.contains(&offset) {
                return Err(SurveyError::TranscodeFailure {
                    source_path: source.to_path_buf(),
                    output: output.to_path_buf(),
                    reason: "encoder exploded".to_string(),
                });
            }
            Ok(output.to_path_buf())
        }
    }

    // --- Helpers ---

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 7, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn dive_log() -> DiveLogIndex {
        DiveLogIndex::from_windows([
            TransectWindow {
                dive_id: "D01".to_string(),
                start: at(10, 0),
                end: at(10, 20),
            },
            TransectWindow {
                dive_id: "D02".to_string(),
                start: at(13, 0),
                end: at(13, 5),
            },
        ])
    }

    struct Fixture {
        videos: tempfile::TempDir,
        output: PathBuf,
        calls: Arc<Mutex<Vec<Call>>>,
        reporter: CollectingReporter,
        use_case: ClipVideosUseCase,
    }

    fn fixture(names: &[&str], durations: &[(&str, f64)], fail_offsets: Vec<TimeDelta>) -> Fixture {
        let videos = tempfile::tempdir().unwrap();
        for name in names {
            std::fs::write(videos.path().join(name), b"").unwrap();
        }
        let output = videos.path().join("clips");
        let calls = Arc::new(Mutex::new(Vec::new()));
        let reporter = CollectingReporter::new();
        let use_case = ClipVideosUseCase::new(
            Box::new(StubProbe {
                durations: durations
                    .iter()
                    .map(|(n, d)| (n.to_string(), *d))
                    .collect(),
            }),
            Box::new(StubExtractor {
                calls: calls.clone(),
                fail_offsets,
            }),
            dive_log(),
            ClipLength::from_minutes(NonZeroU32::new(10).unwrap()),
            Box::new(reporter.clone()),
        );
        Fixture {
            videos,
            output,
            calls,
            reporter,
            use_case,
        }
    }

    const D01: &str = "TR1_D01_20220701_095000.mp4";
    const D02: &str = "TR1_D02_20220701_125500.mp4";

    // --- Tests ---

    #[test]
    fn test_clips_each_video_into_output_dir() {
        let mut f = fixture(&[D01, D02], &[(D01, 1800.0), (D02, 1800.0)], vec![]);
        let summary = f.use_case.execute(f.videos.path(), &f.output).unwrap();

        assert!(f.output.is_dir());
        // D01: offsets 570, 1170, 1770. D02: window 12:59:30..13:05:30 from 12:55.
        assert_eq!(
            summary,
            BatchSummary {
                processed: 2,
                failed: 0,
                written: 4,
            }
        );

        let calls = f.calls.lock().unwrap();
        let offsets: Vec<i64> = calls.iter().map(|c| c.1.num_seconds()).collect();
        assert_eq!(offsets, vec![570, 1170, 1770, 270]);
        assert_eq!(calls[0].0, f.videos.path().join(D01));
        assert_eq!(calls[0].2, TimeDelta::minutes(10));
        assert_eq!(calls[0].3, f.output.join("TR1_D01_20220701_095930.mp4"));
        assert_eq!(calls[3].3, f.output.join("TR1_D02_20220701_125930.mp4"));
    }

    #[test]
    fn test_short_source_is_reported_not_fatal() {
        let mut f = fixture(&[D01], &[(D01, 1800.0)], vec![]);
        f.use_case.execute(f.videos.path(), &f.output).unwrap();

        let diagnostics = f.reporter.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0],
            Diagnostic::VideoEndsBeforeTransect { .. }
        ));
    }

    #[test]
    fn test_unknown_dive_is_skipped() {
        let unknown = "TR1_D99_20220701_095000.mp4";
        let mut f = fixture(&[D01, unknown], &[(D01, 1900.0), (unknown, 1900.0)], vec![]);
        let summary = f.use_case.execute(f.videos.path(), &f.output).unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.written, 3);
        let diagnostics = f.reporter.diagnostics();
        assert!(diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::ItemFailed { item, error }
                if item.ends_with(unknown) && error.contains("D99")
        )));
    }

    #[test]
    fn test_probe_failure_is_skipped() {
        let mut f = fixture(&[D01, D02], &[(D02, 1800.0)], vec![]);
        let summary = f.use_case.execute(f.videos.path(), &f.output).unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.written, 1);
    }

    #[test]
    fn test_failed_clip_does_not_stop_the_video() {
        let mut f = fixture(&[D01], &[(D01, 1900.0)], vec![TimeDelta::seconds(1170)]);
        let summary = f.use_case.execute(f.videos.path(), &f.output).unwrap();

        assert_eq!(f.calls.lock().unwrap().len(), 3);
        assert_eq!(
            summary,
            BatchSummary {
                processed: 1,
                failed: 1,
                written: 2,
            }
        );
        let failures: Vec<_> = f
            .reporter
            .diagnostics()
            .into_iter()
            .filter(Diagnostic::is_failure)
            .collect();
        assert_eq!(failures.len(), 1);
    }

    #[test]
    fn test_malformed_filename_aborts_before_any_clip() {
        let mut f = fixture(&[D01, "D01_bad.mp4"], &[(D01, 1900.0)], vec![]);
        let err = f.use_case.execute(f.videos.path(), &f.output).unwrap_err();

        assert!(matches!(err, SurveyError::MalformedFilename { .. }));
        assert!(f.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_clip_named_like_its_source_is_never_written_over_it() {
        // Starts exactly at the buffered start, so the first clip reuses the name.
        let source = "TR1_D01_20220701_095930.mp4";
        let mut f = fixture(&[source], &[(source, 1260.0)], vec![]);
        let videos = f.videos.path().to_path_buf();
        let summary = f.use_case.execute(&videos, &videos).unwrap();

        let calls = f.calls.lock().unwrap();
        assert!(calls.iter().all(|(src, _, _, out)| src != out));
        let offsets: Vec<i64> = calls.iter().map(|c| c.1.num_seconds()).collect();
        assert_eq!(offsets, vec![600, 1200]);
        assert_eq!(
            summary,
            BatchSummary {
                processed: 1,
                failed: 1,
                written: 2,
            }
        );
        assert!(f.reporter.diagnostics().iter().any(|d| matches!(
            d,
            Diagnostic::ItemFailed { item, error }
                if item == &videos.join(source) && error.contains("overwrite")
        )));
    }

    #[test]
    fn test_same_file_detection_follows_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.mp4");
        std::fs::write(&file, b"").unwrap();
        let indirect = dir.path().join(".").join("a.mp4");

        assert!(is_same_file(&file, &indirect));
        assert!(!is_same_file(&file, &dir.path().join("b.mp4")));
    }

    #[test]
    fn test_non_video_files_are_ignored() {
        let mut f = fixture(&[D01, "divelog.csv"], &[(D01, 1900.0)], vec![]);
        let summary = f.use_case.execute(f.videos.path(), &f.output).unwrap();
        assert_eq!(summary.processed, 1);
    }
}
