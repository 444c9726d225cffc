//! Quaternion fusion (§4.4 "Stabilization Fusion"): turn a `FrameData`
//! sequence into one corrective `Quat` per frame, in one of five modes.
//!
//! Grounded on `meld_cori_grav`/`meld_cori_iori_grav` and their internal
//! helpers (`coriFilter`, `generateAntiShakeToIndex`,
//! `generateWorldLockStabToIndex`, `antiShake`, `worldLockOnly`,
//! `horizonLevelOnly`, `allOn`) in
//! `original_source/FlowMotionPOC/SphericalMetadataProvider.cpp`. glam's
//! `Quat`/`Vec3` carry the arithmetic — no hand-rolled quaternion math.

use std::path::Path;

use glam::{Quat, Vec3, Vec4};

use crate::stabilize::frame::{FrameData, RotStrategy, VideoMetadata};

/// Which stabilization strategy to fuse toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    AllOff,
    AntiShake,
    WorldLock,
    HorizonLevel,
    AllOn,
}

const ANTI_SHAKE_HALF_WINDOW: i64 = 30;
const HORIZON_LEVEL_HALF_WINDOW: i64 = 20;
const ROLL_MAX_DEGREES: f32 = 20.0;
const ROLL_STRENGTH: f32 = 0.8;

/// Freeze `frame`'s shared `hl_rot_strategy` from `grav_init` the first
/// time it's needed; every later call (of any frame sharing the same
/// cell) reuses the frozen choice.
fn resolve_strategy(frame: &FrameData, grav_init: Vec3) -> RotStrategy {
    if frame.hl_rot_strategy.get() == RotStrategy::Unknown {
        let strategy = if grav_init.y > 0.0 { RotStrategy::NorthPole } else { RotStrategy::SouthPole };
        frame.hl_rot_strategy.set(strategy);
    }
    frame.hl_rot_strategy.get()
}

/// Fuse without applying `IORI` to the final per-frame composition
/// (§4.4/§7: the `meld_cori_grav` entry point). Anti-shake's state
/// generation still reads the raw per-frame `IORI`, exactly as
/// `meld_cori_iori_grav` does — only the output term differs.
///
/// `video_path` is accepted for symmetry with `extract_frame_data`,
/// which is where proxy detection actually happens.
pub fn fuse_cori_grav_only(
    frames: &[FrameData],
    metadata: &VideoMetadata,
    mode: Mode,
    video_path: &Path,
) -> Vec<Quat> {
    fuse_internal(frames, metadata, mode, false, video_path)
}

/// Fuse applying `IORI` to the final per-frame composition (§4.4/§7:
/// the `meld_cori_iori_grav` entry point).
pub fn fuse(frames: &[FrameData], metadata: &VideoMetadata, mode: Mode, video_path: &Path) -> Vec<Quat> {
    fuse_internal(frames, metadata, mode, true, video_path)
}

fn fuse_internal(frames: &[FrameData], metadata: &VideoMetadata, mode: Mode, apply_iori: bool, video_path: &Path) -> Vec<Quat> {
    // GRAV entirely zero: the original auto-downgrades to AntiShake
    // inside the entry point rather than erroring out.
    let mode = if metadata.grav_invalid { Mode::AntiShake } else { mode };

    if frames.is_empty() || mode == Mode::AllOff {
        return vec![Quat::IDENTITY; frames.len()];
    }

    let _ = video_path; // proxy detection already baked into `FrameData::iori` by `extract_frame_data`

    let cori_filtered = cori_filter(frames);
    let cori_eff: Vec<Quat> = frames
        .iter()
        .enumerate()
        .map(|(i, f)| if needs_cori_filter(f) { cori_filtered[i] } else { f.cori })
        .collect();
    // Raw IORI (proxy-zeroing already applied by `extract_frame_data`),
    // never gated by `apply_iori` — `getOrient`/`generateAntiShakeToIndex`
    // in the original always read `frameData[i].iori` directly.
    // `apply_iori` (the `meld_cori_grav` vs. `meld_cori_iori_grav` split)
    // gates only the final per-frame composition term below.
    let raw_iori_eff: Vec<Quat> = frames.iter().map(|f| f.iori).collect();
    let iori_eff: Vec<Quat> =
        raw_iori_eff.iter().map(|&iori| if apply_iori { iori } else { Quat::IDENTITY }).collect();

    if mode != Mode::AllOn {
        // `allOn`'s pole strategy is frozen on first use even when the
        // caller never actually requests `AllOn` — primed from frame 0's
        // raw, unfiltered cori/iori, exactly as the original's priming
        // call (`meld_cori_iori_grav_internal`) does before its main loop.
        let _ = all_on_output(frames[0].cori, frames[0].iori, &frames[0]);
    }

    let anti_shake_states = (mode == Mode::AntiShake).then(|| anti_shake_state_quats(&cori_eff, &raw_iori_eff));
    let horizon_states = (mode == Mode::HorizonLevel).then(|| horizon_level_state_quats(frames, &cori_eff));

    (0..frames.len())
        .map(|i| {
            let cori = cori_eff[i];
            let iori = iori_eff[i];
            match mode {
                Mode::AllOff => Quat::IDENTITY,
                Mode::AntiShake => antishake_output(cori, iori, anti_shake_states.as_deref().unwrap(), i),
                Mode::WorldLock => world_lock_output(cori, iori),
                Mode::HorizonLevel => horizon_level_output(cori, iori, horizon_states.as_deref().unwrap(), i),
                Mode::AllOn => all_on_output(cori, iori, &frames[i]),
            }
        })
        .collect()
}

fn needs_cori_filter(frame: &FrameData) -> bool {
    frame.frame_rate > -1.0
}

/// Steady-state gated integration of frame-to-frame `CORI` deltas
/// (§4.4 "cori filter"): frames with five or more consecutive
/// slow-rotation deltas stop accumulating, holding the last filtered
/// orientation instead of drifting with sensor noise.
fn cori_filter(frames: &[FrameData]) -> Vec<Quat> {
    let mut out = vec![Quat::IDENTITY; frames.len()];
    let mut prev_cori = Quat::IDENTITY;
    let mut cur = Quat::IDENTITY;
    let mut steady_count = 0u32;

    for (i, frame) in frames.iter().enumerate() {
        if frame.frame_rate < 0.0 {
            continue;
        }
        let delta = frame.cori * prev_cori.inverse();
        prev_cori = frame.cori;

        let (_, angle) = delta.to_axis_angle();
        let speed = angle.to_degrees() as f64 * frame.frame_rate;
        if speed < 0.5 {
            steady_count += 1;
        } else {
            steady_count = 0;
        }
        if steady_count < 5 {
            cur = delta * cur;
        }
        out[i] = cur;
    }
    out
}

/// Inverted camera orientation used internally by the anti-shake roll
/// state machine (`getOrient` in the original — distinct from the
/// non-inverted `iori * cori` used in final per-mode composition).
fn inverted_cam_orient(cori: Quat, iori: Quat) -> Quat {
    (iori * cori).normalize().inverse()
}

/// One step of the anti-shake roll-damping state machine
/// (`processRollFromCameraOrient`): tracks the camera's roll relative to
/// the previous frame, damps it by `ROLL_STRENGTH`, and clamps it to
/// `ROLL_MAX_DEGREES`.
fn process_roll(cam_orient: Quat, prev_cam_orient: Quat, prev_roll: Quat, prev_angle: f32, index: usize) -> (Quat, f32) {
    let roll_max = ROLL_MAX_DEGREES.to_radians();

    let (cam_angle, raw_angle) = if index > 0 {
        let d = prev_roll.inverse() * cam_orient.inverse() * prev_cam_orient * prev_roll;
        let x = 2.0 * d.x * d.y - 2.0 * d.z * d.w;
        let y = 1.0 - 2.0 * d.x * d.x - 2.0 * d.z * d.z;
        let cam_angle = x.atan2(y);
        (cam_angle, prev_angle - cam_angle)
    } else {
        (prev_angle, prev_angle)
    };

    let mut angle = raw_angle * ROLL_STRENGTH;
    angle = angle.clamp(-roll_max, roll_max);
    if cam_angle.abs() > roll_max {
        angle = prev_angle;
    }

    let roll = Quat::from_xyzw(0.0, 0.0, (angle / 2.0).sin(), (angle / 2.0).cos());
    (roll, angle)
}

/// `iori_raw` is the unfiltered `FrameData::iori` (proxy-zeroing applied,
/// `apply_iori` gating not applied) — `getOrient` in the original always
/// reads the raw per-frame `iori`, regardless of which public entry point
/// (`meld_cori_grav` vs. `meld_cori_iori_grav`) is driving the fusion.
fn anti_shake_state_quats(cori_eff: &[Quat], iori_raw: &[Quat]) -> Vec<Quat> {
    let mut out = Vec::with_capacity(cori_eff.len());
    let mut prev_cam_orient = Quat::IDENTITY;
    let mut prev_roll = Quat::IDENTITY;
    let mut prev_angle = 0f32;

    for i in 0..cori_eff.len() {
        let cam_orient = inverted_cam_orient(cori_eff[i], iori_raw[i]);
        let (roll, angle) = process_roll(cam_orient, prev_cam_orient, prev_roll, prev_angle, i);
        prev_cam_orient = cam_orient;
        prev_roll = roll;
        prev_angle = angle;
        out.push(cam_orient * roll);
    }
    out
}

/// Gravity-derived leveling orientation for one frame
/// (`horizonLevelQuatForIndex`).
fn horizon_level_quat_for_index(frame: &FrameData, cori_eff: Quat) -> Quat {
    let grav = frame.grav.normalize_or_zero();
    let x = Vec3::Z.cross(grav).normalize_or_zero();
    let z = grav.cross(x).normalize_or_zero();
    let level = Quat::from_mat3(&glam::Mat3::from_cols(-x, grav, z));
    cori_eff.inverse() * level
}

/// Horizon-level state quaternions, flipping sign frame-to-frame to
/// follow whichever of `q`/`-q` is closer to the running orientation
/// (`generateWorldLockStabToIndex`, despite its name — this is the
/// horizon-level helper in the original).
fn horizon_level_state_quats(frames: &[FrameData], cori_eff: &[Quat]) -> Vec<Quat> {
    let mut out = Vec::with_capacity(frames.len());
    let mut follow = Quat::IDENTITY;

    for (i, frame) in frames.iter().enumerate() {
        let mut stab_in = horizon_level_quat_for_index(frame, cori_eff[i]);
        let d1 = (Vec4::from(follow) - Vec4::from(stab_in)).length();
        let d2 = (Vec4::from(follow) + Vec4::from(stab_in)).length();
        if d2 < d1 {
            stab_in = Quat::from_vec4(-Vec4::from(stab_in));
        }
        follow = stab_in;
        out.push(stab_in);
    }
    out
}

/// `Σ weight_n · state[n]` over `[i - half, i + half]`, clamped to
/// `[0, len - 2]`, then renormalized — the shared window-average used by
/// `antishake_output`/`horizon_level_output`.
fn weighted_window_sum(states: &[Quat], i: usize, half: i64) -> Quat {
    let len = states.len() as i64;
    if len == 0 {
        return Quat::IDENTITY;
    }
    let i_min = (i as i64 - half).max(0);
    let i_max = (i as i64 + half).min(len - 2);
    if i_max < i_min {
        return states[i];
    }

    let mut acc = Vec4::ZERO;
    let mut n = i_min;
    while n <= i_max {
        let weight = (half + 1 - (n - i as i64).abs()) as f32;
        acc += Vec4::from(states[n as usize]) * weight;
        n += 1;
    }
    if acc == Vec4::ZERO {
        Quat::IDENTITY
    } else {
        Quat::from_vec4(acc).normalize()
    }
}

/// §4.4 "AntiShake": a ±30-frame rolling average of the roll-damped
/// state quaternions, composed onto the (non-inverted) camera
/// orientation.
fn antishake_output(cori: Quat, iori: Quat, states: &[Quat], i: usize) -> Quat {
    let cam_orient = iori * cori;
    let window = weighted_window_sum(states, i, ANTI_SHAKE_HALF_WINDOW);
    cam_orient * window
}

/// §4.4 "WorldLock": `normalize(iori * cori)`, no windowing.
fn world_lock_output(cori: Quat, iori: Quat) -> Quat {
    (iori * cori).normalize()
}

/// §4.4 "HorizonLevel": a ±20-frame rolling average of the sign-stable
/// leveling quaternions, composed onto the (unnormalized) camera
/// orientation.
fn horizon_level_output(cori: Quat, iori: Quat, states: &[Quat], i: usize) -> Quat {
    let window = weighted_window_sum(states, i, HORIZON_LEVEL_HALF_WINDOW);
    iori * cori * window
}

/// §4.4 "AllOn": world-lock composed with a gravity-pole-latching
/// leveling rotation. The pole choice freezes on first use; `grav_init`
/// itself is recomputed every frame from that frame's own `cori`/`grav`.
fn all_on_output(cori: Quat, iori: Quat, frame: &FrameData) -> Quat {
    let cam_orient = (iori * cori).normalize();
    let grav_init = (cori.inverse() * frame.grav).normalize_or_zero();
    let strategy = resolve_strategy(frame, grav_init);

    let grav_rot = match strategy {
        RotStrategy::NorthPole => {
            let axe = Vec3::Y.cross(grav_init);
            let mut angle = axe.length().min(1.0).asin();
            if grav_init.y < 0.0 {
                angle = std::f32::consts::PI - angle;
            }
            Quat::from_axis_angle(axe.normalize_or_zero(), angle)
        }
        RotStrategy::SouthPole => {
            let axe = (-Vec3::Y).cross(grav_init);
            let mut angle = axe.length().min(1.0).asin();
            if grav_init.y > 0.0 {
                angle = std::f32::consts::PI - angle;
            }
            Quat::from_axis_angle(axe.normalize_or_zero(), angle) * Quat::from_xyzw(0.0, 0.0, 1.0, 0.0)
        }
        RotStrategy::Unknown => unreachable!("resolve() always leaves a concrete pole"),
    };

    cam_orient * grav_rot.normalize()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::stabilize::frame::EisType;

    fn frame(w: f32, x: f32, y: f32, z: f32, grav: Vec3, frame_rate: f64) -> FrameData {
        FrameData {
            timestamp_ns: 0,
            cori: Quat::from_xyzw(x, y, z, w),
            iori: Quat::IDENTITY,
            grav,
            frame_rate,
            hl_rot_strategy: Rc::new(Cell::new(RotStrategy::Unknown)),
        }
    }

    fn metadata(grav_invalid: bool) -> VideoMetadata {
        VideoMetadata {
            rate_divisor: Some(1),
            projection: None,
            spherical_timelapse: false,
            super_view: false,
            eis_type: EisType::NotApplicable,
            grav_invalid,
        }
    }

    #[test]
    fn all_off_is_always_identity() {
        let frames = vec![frame(1.0, 0.0, 0.0, 0.0, Vec3::new(0.0, -1.0, 0.0), 30.0)];
        let out = fuse(&frames, &metadata(false), Mode::AllOff, Path::new("video.mp4"));
        assert_eq!(out, vec![Quat::IDENTITY]);
    }

    #[test]
    fn world_lock_matches_normalized_iori_cori() {
        let frames = vec![frame(1.0, 0.0, 0.0, 0.0, Vec3::new(0.0, -1.0, 0.0), 30.0)];
        let out = fuse(&frames, &metadata(false), Mode::WorldLock, Path::new("video.mp4"));
        assert!(out[0].angle_between(Quat::IDENTITY) < 1e-4);
    }

    #[test]
    fn grav_invalid_downgrades_to_anti_shake() {
        let frames = vec![
            frame(1.0, 0.0, 0.0, 0.0, Vec3::ZERO, 30.0),
            frame(1.0, 0.0, 0.0, 0.0, Vec3::ZERO, 30.0),
        ];
        let out = fuse(&frames, &metadata(true), Mode::AllOn, Path::new("video.mp4"));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn fuse_cori_grav_only_forces_identity_iori() {
        let frames = vec![frame(0.707, 0.0, 0.707, 0.0, Vec3::new(0.0, -1.0, 0.0), 30.0)];
        let out = fuse_cori_grav_only(&frames, &metadata(false), Mode::WorldLock, Path::new("video.mp4"));
        // cori alone, no iori contribution: result should equal cori's own normalization.
        assert!(out[0].normalize().angle_between(frames[0].cori.normalize()) < 1e-4);
    }

    #[test]
    fn pole_strategy_freezes_on_first_frame_and_ignores_later_flips() {
        let strategy = Rc::new(Cell::new(RotStrategy::Unknown));
        let mut frames = vec![
            frame(1.0, 0.0, 0.0, 0.0, Vec3::new(0.0, -1.0, 0.0), 30.0),
            frame(1.0, 0.0, 0.0, 0.0, Vec3::new(0.0, 1.0, 0.0), 30.0),
        ];
        for f in &mut frames {
            f.hl_rot_strategy = Rc::clone(&strategy);
        }

        let _ = fuse(&frames, &metadata(false), Mode::AllOn, Path::new("video.mp4"));
        let frozen = strategy.get();
        assert_ne!(frozen, RotStrategy::Unknown);

        let _ = fuse(&frames, &metadata(false), Mode::AllOn, Path::new("video.mp4"));
        assert_eq!(strategy.get(), frozen);
    }
}
