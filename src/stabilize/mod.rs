//! Layer 4: stabilization fusion (§4.4). Pairs `CORI`/`IORI`/`GRAV`
//! timeline samples into per-frame data, then fuses them into one
//! corrective quaternion per video frame under one of five modes.

pub mod frame;
pub mod fuse;

pub use frame::{extract_frame_data, EisType, FrameData, RotStrategy, VideoMetadata};
pub use fuse::{fuse, fuse_cori_grav_only, Mode};
