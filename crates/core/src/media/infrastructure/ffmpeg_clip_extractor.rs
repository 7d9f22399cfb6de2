use std::path::{Path, PathBuf};

use chrono::TimeDelta;

use crate::media::domain::clip_extractor::ClipExtractor;
use crate::media::infrastructure::ffmpeg_media_probe::MICROS_PER_SECOND;
use crate::shared::error::SurveyError;
use crate::shared::timecode::{delta_to_secs, format_timecode};

/// Cuts clips by remuxing packets with ffmpeg-next; nothing is re-encoded.
///
/// The cut starts at the keyframe at or before `offset` and drops packets
/// at or past `offset + length`. Output timestamps are rebased to zero.
/// An offset at or beyond the end of the source is an error.
pub struct FfmpegClipExtractor;

impl FfmpegClipExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FfmpegClipExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipExtractor for FfmpegClipExtractor {
    fn extract_clip(
        &self,
        source: &Path,
        offset: TimeDelta,
        length: TimeDelta,
        output: &Path,
    ) -> Result<PathBuf, SurveyError> {
        log::debug!(
            "Cutting {} at {} for {} into {}",
            source.display(),
            format_timecode(offset),
            format_timecode(length),
            output.display()
        );

        match remux(source, delta_to_secs(offset), delta_to_secs(length), output) {
            Ok(()) => Ok(output.to_path_buf()),
            Err(e) => {
                if output.exists() {
                    if let Err(cleanup) = std::fs::remove_file(output) {
                        log::warn!("Could not remove partial clip {}: {cleanup}", output.display());
                    }
                }
                Err(SurveyError::TranscodeFailure {
                    source_path: source.to_path_buf(),
                    output: output.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

fn remux(
    source: &Path,
    offset_secs: f64,
    length_secs: f64,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    ffmpeg_next::init()?;

    let mut ictx = ffmpeg_next::format::input(source)?;
    let mut octx = ffmpeg_next::format::output(output)?;

    let mut stream_map: Vec<isize> = vec![-1; ictx.nb_streams() as usize];
    let mut ost_index: usize = 0;

    for (idx, stream) in ictx.streams().enumerate() {
        let medium = stream.parameters().medium();
        if !matches!(
            medium,
            ffmpeg_next::media::Type::Video
                | ffmpeg_next::media::Type::Audio
                | ffmpeg_next::media::Type::Subtitle
        ) {
            continue;
        }
        let mut ost = octx.add_stream(ffmpeg_next::encoder::find(ffmpeg_next::codec::Id::None))?;
        ost.set_parameters(stream.parameters());
        unsafe {
            (*ost.parameters().as_mut_ptr()).codec_tag = 0;
        }
        stream_map[idx] = ost_index as isize;
        ost_index += 1;
    }

    if ost_index == 0 {
        return Err("source has no audio, video or subtitle streams".into());
    }

    octx.set_metadata(ictx.metadata().to_owned());
    octx.write_header()?;

    let time_bases: Vec<_> = ictx.streams().map(|s| s.time_base()).collect();

    let target = (offset_secs * MICROS_PER_SECOND) as i64;
    if target > 0 {
        ictx.seek(target, ..target)?;
    }

    let end_secs = offset_secs + length_secs;
    let mut finished = vec![false; stream_map.len()];
    let mut open_streams = ost_index;
    // Source time of the first copied packet; all streams are shifted by it.
    let mut origin_secs: Option<f64> = None;
    let mut reached_offset = false;

    for (stream, mut packet) in ictx.packets() {
        let ist_idx = stream.index();
        let ost_idx = stream_map[ist_idx];
        if ost_idx < 0 || finished[ist_idx] {
            continue;
        }

        let time_base = time_bases[ist_idx];
        let Some(ts) = packet.dts().or(packet.pts()) else {
            continue;
        };
        let secs = ts as f64 * f64::from(time_base);
        if secs >= end_secs {
            finished[ist_idx] = true;
            open_streams -= 1;
            if open_streams == 0 {
                break;
            }
            continue;
        }

        if secs >= offset_secs {
            reached_offset = true;
        }
        let origin = *origin_secs.get_or_insert(secs);
        let shift = (origin / f64::from(time_base)).round() as i64;
        packet.set_pts(packet.pts().map(|pts| pts - shift));
        packet.set_dts(packet.dts().map(|dts| dts - shift));

        let ost_time_base = octx
            .stream(ost_idx as usize)
            .ok_or("output stream missing")?
            .time_base();
        packet.rescale_ts(time_base, ost_time_base);
        packet.set_position(-1);
        packet.set_stream(ost_idx as usize);
        packet.write_interleaved(&mut octx)?;
    }

    // A seek past the end lands on the last keyframe; that footage predates the clip.
    if !reached_offset {
        return Err(format!("offset {offset_secs:.3}s is past the end of the source").into());
    }

    octx.write_trailer()?;
    Ok(())
}
