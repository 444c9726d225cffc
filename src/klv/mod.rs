//! Layer 1: the KLV parser. Walks a single GPMF byte buffer record by
//! record, independent of where that buffer came from (MP4 timed track,
//! `udta` blob, or JPEG `APP6` segment — see `crate::provider`).

pub mod complex;
pub mod cursor;
pub mod fixed_point;
pub mod header;

pub use complex::ComplexValue;
pub use cursor::{Cursor, CURRENT_LEVEL, RECURSE_LEVELS, TOLERANT};
pub use header::{RecordHeader, TypeTag};
