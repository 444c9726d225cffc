//! Layer 2: payload providers. Abstracts over where a raw GPMF byte
//! buffer comes from — an MP4 timed track, an MP4 `udta` blob, or a
//! standalone buffer (a `.gpmf` sidecar, or a JPEG `APP6` segment) — so
//! the timeline assembler (§4.3) never has to know which.

pub mod buffer;
pub mod mp4_track;
pub mod mp4_udta;

pub use buffer::BufferProvider;
pub use mp4_track::Mp4TrackProvider;
pub use mp4_udta::UdtaProvider;

use crate::constants::GLOBAL_TIME;
use crate::errors::GpmfError;

/// One demuxed chunk of raw GPMF bytes together with the time window it
/// occupies in its source container.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Raw GPMF KLV bytes for this chunk (never includes container framing).
    pub data: Vec<u8>,
    /// Start time in seconds relative to track start, or `GLOBAL_TIME`
    /// when the source has no per-chunk timing (a `udta` blob or a
    /// standalone buffer).
    pub start: f64,
    /// Duration in seconds, or `GLOBAL_TIME` alongside `start`.
    pub duration: f64,
}

impl Segment {
    /// A segment with no real time window (§9 design note on `GLOBAL_TIME`).
    pub fn untimed(data: Vec<u8>) -> Self {
        Segment { data, start: GLOBAL_TIME, duration: GLOBAL_TIME }
    }

    pub fn has_real_time(&self) -> bool {
        self.start != GLOBAL_TIME
    }
}

/// A source of raw GPMF byte buffers, demuxed into time-ordered segments.
pub trait PayloadProvider {
    /// Demux every available segment, in stream order.
    fn segments(&mut self) -> Result<Vec<Segment>, GpmfError>;

    /// Writer-side operation. MP4 writing is out of scope; every provider
    /// inherits this stub rather than implementing its own.
    fn write_gpmf(&mut self, _data: &[u8]) -> Result<(), GpmfError> {
        Err(GpmfError::NotImplemented)
    }
}
