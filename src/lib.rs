//! Parse GoPro GPMF telemetry — a nested, self-describing KLV stream
//! embedded in an MP4 track, an MP4 `udta` blob, or a JPEG `APP6`
//! segment — into a time-indexed [`timeline::Timeline`], and fuse its
//! `CORI`/`IORI`/`GRAV` samples into one stabilization quaternion per
//! video frame.
//!
//! Four layers, leaves first:
//!
//! - [`klv`] (L1): the byte-accurate KLV record walker.
//! - [`provider`] (L2): where the raw GPMF bytes come from (MP4 timed
//!   track, MP4 `udta` blob, or a standalone buffer).
//! - [`timeline`] (L3): assembles payload-indexed KLV records into a
//!   per-FourCC, time-sorted sample index.
//! - [`stabilize`] (L4): extracts per-frame orientation data from a
//!   timeline and fuses it under one of five stabilization modes.
//!
//! ```rust,no_run
//! use gpmf_timeline::provider::{Mp4TrackProvider, PayloadProvider};
//! use gpmf_timeline::timeline::assemble;
//! use gpmf_timeline::stabilize::{extract_frame_data, fuse, Mode};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), gpmf_timeline::GpmfError> {
//! let path = Path::new("GX010001.MP4");
//! let mut provider = Mp4TrackProvider::new(path);
//! let ((num, den), video_frame_count) = provider.video_frame_rate_and_count()?;
//! let fps = num as f64 / den.max(1) as f64;
//!
//! let timeline = assemble(provider.segments()?)?;
//! let (frames, metadata) = extract_frame_data(&timeline, path, video_frame_count, fps)?;
//! let quaternions = fuse(&frames, &metadata, Mode::HorizonLevel, path);
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod errors;
pub mod fourcc;
pub mod klv;
pub mod provider;
pub mod stabilize;
pub mod timeline;

pub use errors::GpmfError;
pub use fourcc::FourCC;
