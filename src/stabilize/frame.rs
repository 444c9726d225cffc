//! Frame extraction (§4.4 "Inputs"): pair `CORI`/`IORI`/`GRAV` timeline
//! samples by index into one `FrameData` per video frame, and read the
//! `RATE`/`PRJT`/`MTYP`/`VFOV`/`EISA` configuration keys once.
//!
//! Grounded on `GPMFFrameMetadata::extract_cori_iori_grav` in
//! `original_source/FlowMotionPOC/Libs/GPMFFrameMetadata.cpp`.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use glam::{Quat, Vec3};

use crate::errors::GpmfError;
use crate::fourcc::FourCC;
use crate::timeline::{Sample, Timeline};

/// `AllOn`'s gravity-pole choice (§3 "`hl_rot_strategy`"): a lazily
/// resolved, per-video decision frozen on first use and shared by every
/// `FrameData` of that video via `Rc<Cell<_>>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotStrategy {
    Unknown,
    NorthPole,
    SouthPole,
}

/// Electronic-stabilization descriptor carried by `EISA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EisType {
    NotApplicable,
    HsEis,
    HsHigh,
    HsBoost,
    /// Anything else the camera reports — the original falls back to
    /// this bucket for any `EISA` string it doesn't special-case.
    HLevel,
}

/// Video-wide configuration read once from the timeline (§4.4 "Inputs").
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    /// `RATE`'s `"2X"`..`"30X"` integer divisor, `None` if unparseable
    /// (the original's `rateValue == -1`). `RATE` itself is mandatory —
    /// its absence fails extraction rather than producing `None` here.
    pub rate_divisor: Option<i32>,
    /// `PRJT` projection string. Mandatory, like `RATE` — its absence
    /// fails extraction.
    pub projection: Option<String>,
    /// `MTYP == 7`.
    pub spherical_timelapse: bool,
    /// `VFOV == "S"`.
    pub super_view: bool,
    pub eis_type: EisType,
    /// `true` when `GRAV` is present but entirely zero — callers should
    /// fuse with `Mode::AntiShake` instead of the requested mode.
    pub grav_invalid: bool,
}

/// One video frame's paired orientation samples (§3 "Video frame list").
#[derive(Debug, Clone)]
pub struct FrameData {
    pub timestamp_ns: i64,
    pub cori: Quat,
    pub iori: Quat,
    pub grav: Vec3,
    /// Per-video frame rate derived from `RATE`'s divisor, or `-1.0`
    /// when the divisor text carries no recognizable `X` suffix
    /// (`isCoriFilterNeeded` gates on this). `RATE` itself is mandatory —
    /// its absence fails extraction before this is ever computed.
    pub frame_rate: f64,
    /// Shared with every other `FrameData` of this video: `AllOn`
    /// resolves and freezes this on its first call, all later frames
    /// (of this video or not) read the same cell.
    pub hl_rot_strategy: Rc<Cell<RotStrategy>>,
}

/// Pair `CORI`/`IORI`/`GRAV` samples by index and read the stabilization
/// configuration keys, applying §4.4's validity gating.
pub fn extract_frame_data(
    timeline: &Timeline,
    video_path: &Path,
    video_frame_count: usize,
    video_fps: f64,
) -> Result<(Vec<FrameData>, VideoMetadata), GpmfError> {
    let cori: Vec<&Sample> = timeline.by_fourcc(FourCC::CORI).collect();
    let iori: Vec<&Sample> = timeline.by_fourcc(FourCC::IORI).collect();
    let grav: Vec<&Sample> = timeline.by_fourcc(FourCC::GRAV).collect();

    let counts = [cori.len(), iori.len(), grav.len()];
    let largest = *counts.iter().max().unwrap_or(&0);
    let smallest = *counts.iter().min().unwrap_or(&0);
    if largest.saturating_sub(smallest) > 2 {
        return Err(GpmfError::StabilizationFailed);
    }

    let max_missing = video_fps.ceil().max(0.0) as usize;
    let frame_count_compensated = video_frame_count.saturating_sub(max_missing);
    if smallest < frame_count_compensated {
        return Err(GpmfError::StabilizationFailed);
    }

    // `RATE` and `PRJT` are both mandatory: their first sample missing
    // fails extraction outright in the original, same as absent CORI/IORI.
    let rate_sample = timeline.sample(FourCC::RATE, 0).map_err(|_| GpmfError::StabilizationFailed)?;
    let rate_divisor = parse_rate_divisor(rate_sample);
    let frame_rate = match rate_divisor {
        Some(d) if d > -1 && d != 0 => video_fps / d as f64,
        _ => -1.0,
    };

    let projection = timeline
        .sample(FourCC::PRJT, 0)
        .map_err(|_| GpmfError::StabilizationFailed)?
        .text
        .clone();

    // "LRV IORI should not be used for fisheyes!": a low-res proxy (FSFB
    // projection, or a `GPMF.mp4` filename) gets its IORI forced to
    // identity right here, and that substitution is what keeps the
    // all-zero-IORI check below from failing on it.
    let low_res_proxy =
        projection.as_deref() == Some("FSFB") || video_path.to_string_lossy().contains("GPMF.mp4");

    if cori.iter().take(smallest).all(|s| is_zero_quat(s)) && smallest > 0 {
        return Err(GpmfError::StabilizationFailed);
    }
    if !low_res_proxy && iori.iter().take(smallest).all(|s| is_zero_quat(s)) && smallest > 0 {
        return Err(GpmfError::StabilizationFailed);
    }
    let grav_invalid = smallest > 0 && grav.iter().take(smallest).all(|s| is_zero_vec3(s));

    let hl_rot_strategy = Rc::new(Cell::new(RotStrategy::Unknown));
    let mut frames = Vec::with_capacity(smallest);
    for i in 0..smallest {
        let iori_quat = if low_res_proxy { Quat::IDENTITY } else { quat_from_sample(iori[i])? };
        frames.push(FrameData {
            timestamp_ns: (cori[i].time.seconds().unwrap_or(0.0) * 1_000_000_000.0) as i64,
            cori: quat_from_sample(cori[i])?,
            iori: iori_quat,
            grav: vec3_from_sample(grav[i])?,
            frame_rate,
            hl_rot_strategy: Rc::clone(&hl_rot_strategy),
        });
    }

    let metadata = VideoMetadata {
        rate_divisor,
        projection,
        spherical_timelapse: read_mtyp(timeline) == Some(7),
        super_view: read_vfov(timeline).as_deref() == Some("S"),
        eis_type: decode_eis_type(read_eisa(timeline).as_deref()),
        grav_invalid,
    };

    Ok((frames, metadata))
}

fn is_zero_quat(sample: &Sample) -> bool {
    sample.values.len() >= 4 && sample.values.iter().all(|v| *v == 0.0)
}

fn is_zero_vec3(sample: &Sample) -> bool {
    sample.values.len() >= 3 && sample.values[..3].iter().all(|v| *v == 0.0)
}

/// GPMF `CORI`/`IORI` wire order is `w, x, y, z`
/// (`GPMFFrameMetadata.cpp`'s `setXYZW(ptr[1], ptr[2], ptr[3], ptr[0])`).
fn quat_from_sample(sample: &Sample) -> Result<Quat, GpmfError> {
    if sample.values.len() < 4 {
        return Err(GpmfError::StabilizationFailed);
    }
    let w = sample.values[0] as f32;
    let x = sample.values[1] as f32;
    let y = sample.values[2] as f32;
    let z = sample.values[3] as f32;
    Ok(Quat::from_xyzw(x, y, z, w))
}

fn vec3_from_sample(sample: &Sample) -> Result<Vec3, GpmfError> {
    if sample.values.len() < 3 {
        return Err(GpmfError::StabilizationFailed);
    }
    Ok(Vec3::new(sample.values[0] as f32, sample.values[1] as f32, sample.values[2] as f32))
}

/// `RATE`'s `"2X"`..`"30X"` integer divisor. `None` when the text carries
/// no recognizable `X` suffix — the original leaves `rateValue` at `-1`
/// in that case rather than failing extraction.
fn parse_rate_divisor(sample: &Sample) -> Option<i32> {
    let text = sample.text.as_deref()?;
    text.trim_end_matches(['X', 'x']).parse::<i32>().ok()
}

fn read_mtyp(timeline: &Timeline) -> Option<i64> {
    let sample = timeline.sample(FourCC::MTYP, 0).ok()?;
    sample.values.first().map(|v| *v as i64)
}

fn read_vfov(timeline: &Timeline) -> Option<String> {
    timeline.sample(FourCC::VFOV, 0).ok().and_then(|s| s.text.clone())
}

fn read_eisa(timeline: &Timeline) -> Option<String> {
    timeline.sample(FourCC::EISA, 0).ok().and_then(|s| s.text.clone())
}

fn decode_eis_type(raw: Option<&str>) -> EisType {
    match raw {
        None => EisType::NotApplicable,
        Some(s) if s.contains("N/A") => EisType::NotApplicable,
        Some(s) if s.contains("HS EIS") => EisType::HsEis,
        Some(s) if s.contains("HS High") => EisType::HsHigh,
        Some(s) if s.contains("HS Boost") => EisType::HsBoost,
        Some(_) => EisType::HLevel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::klv::header::TypeTag;
    use crate::timeline::Time;

    fn quat_sample(fourcc: FourCC, w: f64, x: f64, y: f64, z: f64) -> Sample {
        Sample {
            fourcc,
            type_tag: TypeTag::Float,
            struct_size: 4,
            elements_in_struct: 4,
            repeat: 1,
            count: 1,
            device_id: 1,
            device_name: None,
            time: Time::At(0.0),
            rate: Some(200.0),
            tsmp: None,
            stmp: None,
            values: vec![w, x, y, z],
            text: None,
        }
    }

    fn grav_sample(x: f64, y: f64, z: f64) -> Sample {
        Sample {
            fourcc: FourCC::GRAV,
            type_tag: TypeTag::Float,
            struct_size: 4,
            elements_in_struct: 3,
            repeat: 1,
            count: 1,
            device_id: 1,
            device_name: None,
            time: Time::At(0.0),
            rate: Some(200.0),
            tsmp: None,
            stmp: None,
            values: vec![x, y, z],
            text: None,
        }
    }

    fn text_sample(fourcc: FourCC, text: &str) -> Sample {
        Sample {
            fourcc,
            type_tag: TypeTag::Char,
            struct_size: 1,
            elements_in_struct: 1,
            repeat: text.len() as u16,
            count: 1,
            device_id: 1,
            device_name: None,
            time: Time::Global,
            rate: None,
            tsmp: None,
            stmp: None,
            values: Vec::new(),
            text: Some(text.to_string()),
        }
    }

    /// `RATE`/`PRJT` are mandatory inputs — every test timeline carries them.
    fn push_mandatory_config(timeline: &mut Timeline) {
        timeline.push(text_sample(FourCC::RATE, "1X"));
        timeline.push(text_sample(FourCC::PRJT, "EAC"));
    }

    #[test]
    fn pairs_cori_iori_grav_by_index() {
        let mut timeline = Timeline::new();
        push_mandatory_config(&mut timeline);
        timeline.push(quat_sample(FourCC::CORI, 1.0, 0.0, 0.0, 0.0));
        timeline.push(quat_sample(FourCC::IORI, 1.0, 0.0, 0.0, 0.0));
        timeline.push(grav_sample(0.0, -1.0, 0.0));

        let (frames, metadata) = extract_frame_data(&timeline, Path::new("GX010001.MP4"), 1, 30.0).unwrap();
        assert_eq!(frames.len(), 1);
        assert!(!metadata.grav_invalid);
    }

    #[test]
    fn all_zero_cori_fails() {
        let mut timeline = Timeline::new();
        push_mandatory_config(&mut timeline);
        timeline.push(quat_sample(FourCC::CORI, 0.0, 0.0, 0.0, 0.0));
        timeline.push(quat_sample(FourCC::IORI, 1.0, 0.0, 0.0, 0.0));
        timeline.push(grav_sample(0.0, -1.0, 0.0));

        let result = extract_frame_data(&timeline, Path::new("GX010001.MP4"), 1, 30.0);
        assert!(matches!(result, Err(GpmfError::StabilizationFailed)));
    }

    #[test]
    fn all_zero_grav_marks_invalid_rather_than_failing() {
        let mut timeline = Timeline::new();
        push_mandatory_config(&mut timeline);
        timeline.push(quat_sample(FourCC::CORI, 1.0, 0.0, 0.0, 0.0));
        timeline.push(quat_sample(FourCC::IORI, 1.0, 0.0, 0.0, 0.0));
        timeline.push(grav_sample(0.0, 0.0, 0.0));

        let (_, metadata) = extract_frame_data(&timeline, Path::new("GX010001.MP4"), 1, 30.0).unwrap();
        assert!(metadata.grav_invalid);
    }

    #[test]
    fn missing_rate_fails() {
        let mut timeline = Timeline::new();
        timeline.push(text_sample(FourCC::PRJT, "EAC"));
        timeline.push(quat_sample(FourCC::CORI, 1.0, 0.0, 0.0, 0.0));
        timeline.push(quat_sample(FourCC::IORI, 1.0, 0.0, 0.0, 0.0));
        timeline.push(grav_sample(0.0, -1.0, 0.0));

        let result = extract_frame_data(&timeline, Path::new("GX010001.MP4"), 1, 30.0);
        assert!(matches!(result, Err(GpmfError::StabilizationFailed)));
    }

    #[test]
    fn missing_prjt_fails() {
        let mut timeline = Timeline::new();
        timeline.push(text_sample(FourCC::RATE, "1X"));
        timeline.push(quat_sample(FourCC::CORI, 1.0, 0.0, 0.0, 0.0));
        timeline.push(quat_sample(FourCC::IORI, 1.0, 0.0, 0.0, 0.0));
        timeline.push(grav_sample(0.0, -1.0, 0.0));

        let result = extract_frame_data(&timeline, Path::new("GX010001.MP4"), 1, 30.0);
        assert!(matches!(result, Err(GpmfError::StabilizationFailed)));
    }

    #[test]
    fn low_res_proxy_survives_all_zero_iori_and_gets_identity() {
        let mut timeline = Timeline::new();
        timeline.push(text_sample(FourCC::RATE, "1X"));
        timeline.push(text_sample(FourCC::PRJT, "EAC"));
        timeline.push(quat_sample(FourCC::CORI, 1.0, 0.0, 0.0, 0.0));
        timeline.push(quat_sample(FourCC::IORI, 0.0, 0.0, 0.0, 0.0));
        timeline.push(grav_sample(0.0, -1.0, 0.0));

        let (frames, _) = extract_frame_data(&timeline, Path::new("100GOPRO/GPMF.mp4"), 1, 30.0).unwrap();
        assert_eq!(frames[0].iori, Quat::IDENTITY);
    }

    #[test]
    fn fsfb_projection_also_counts_as_low_res_proxy() {
        let mut timeline = Timeline::new();
        timeline.push(text_sample(FourCC::RATE, "1X"));
        timeline.push(text_sample(FourCC::PRJT, "FSFB"));
        timeline.push(quat_sample(FourCC::CORI, 1.0, 0.0, 0.0, 0.0));
        timeline.push(quat_sample(FourCC::IORI, 0.0, 0.0, 0.0, 0.0));
        timeline.push(grav_sample(0.0, -1.0, 0.0));

        let (frames, _) = extract_frame_data(&timeline, Path::new("GX010001.MP4"), 1, 30.0).unwrap();
        assert_eq!(frames[0].iori, Quat::IDENTITY);
    }

    #[test]
    fn decodes_eis_descriptor() {
        assert_eq!(decode_eis_type(Some("HS EIS")), EisType::HsEis);
        assert_eq!(decode_eis_type(Some("N/A")), EisType::NotApplicable);
        assert_eq!(decode_eis_type(Some("Something else")), EisType::HLevel);
    }
}
