//! Provider over the `GoPro MET` timed metadata track of an MP4/LRV file.

use std::path::{Path, PathBuf};

use crate::constants::GOPRO_METADATA_HANDLER;
use crate::errors::GpmfError;
use crate::provider::{PayloadProvider, Segment};

/// Reads GPMF payloads from the timed `GoPro MET` track, one `Segment`
/// per MP4 sample chunk, each carrying its real start time and duration.
pub struct Mp4TrackProvider {
    path: PathBuf,
}

impl Mp4TrackProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Mp4TrackProvider { path: path.as_ref().to_path_buf() }
    }

    /// Video frame rate as a reduced `(numerator, denominator)` pair,
    /// derived from `mvhd`'s time scale and the video track's `stts`
    /// (§4.2 "the provider, not the timeline, knows container specifics").
    pub fn video_frame_rate_and_count(&self) -> Result<((u32, u32), usize), GpmfError> {
        let mut mp4 = mp4iter::Mp4::new(&self.path)?;
        let rate = mp4.frame_rate()?;
        let count = mp4.stts_video(false)?.len();
        Ok((best_rational(rate, 100_000), count))
    }
}

impl PayloadProvider for Mp4TrackProvider {
    fn segments(&mut self) -> Result<Vec<Segment>, GpmfError> {
        let mut mp4 = mp4iter::Mp4::new(&self.path)
            .map_err(|_| GpmfError::FileOpenFailed(self.path.clone()))?;
        let mut track = mp4iter::track::Track::from_name(&mut mp4, GOPRO_METADATA_HANDLER, true)?;

        let timestamps: Vec<(time::Duration, time::Duration)> = track.timestamps().collect();
        let mut segments = Vec::with_capacity(timestamps.len());

        for (chunk, (start, duration)) in track.data().zip(timestamps.into_iter()) {
            let bytes = chunk?.into_inner();
            segments.push(Segment {
                data: bytes,
                start: start.as_seconds_f64(),
                duration: duration.as_seconds_f64(),
            });
        }

        Ok(segments)
    }
}

/// Best rational approximation of `value` with denominator at most
/// `max_denominator`, via the standard continued-fraction algorithm.
fn best_rational(value: f64, max_denominator: u32) -> (u32, u32) {
    if !value.is_finite() || value <= 0.0 {
        return (0, 1);
    }

    let (mut h_prev, mut h_curr) = (1u64, 0u64);
    let (mut k_prev, mut k_curr) = (0u64, 1u64);
    let mut x = value;

    loop {
        let a = x.floor();
        let h_next = a as u64 * h_curr + h_prev;
        let k_next = a as u64 * k_curr + k_prev;
        if k_next > max_denominator as u64 || !x.is_finite() {
            break;
        }
        h_prev = h_curr;
        h_curr = h_next;
        k_prev = k_curr;
        k_curr = k_next;

        let frac = x - a;
        if frac < 1e-9 {
            break;
        }
        x = 1.0 / frac;
    }

    (h_curr as u32, k_curr.max(1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approximates_ntsc_frame_rate() {
        let (num, den) = best_rational(29.97, 100_000);
        assert!((num as f64 / den as f64 - 29.97).abs() < 0.001);
    }

    #[test]
    fn approximates_integer_frame_rate() {
        let (num, den) = best_rational(30.0, 100_000);
        assert_eq!(num / den, 30);
    }
}
