//! Crate-wide constants: MP4 track handler names, and the sentinel values
//! the KLV/timeline layers use for "no real timestamp".

/// Track name (`hdlr` atom handler name) for the GoPro timed telemetry GPMF track.
pub const GOPRO_METADATA_HANDLER: &str = "GoPro MET";
/// Atom FourCC in the `udta` atom holding GoPro metadata in GPMF form.
pub const GOPRO_UDTA_GPMF_FOURCC: &str = "GPMF";

/// Sentinel `in`/`time` value for payloads with no real time window, i.e.
/// the single payload of a `udta`-blob GPMF stream. Never mixed into
/// numeric arithmetic directly — see `crate::timeline::Time`.
pub const GLOBAL_TIME: f64 = -999.0;

/// Max length (in bytes, not including the trailing nul) of an inherited
/// `DVNM` device name string copied into a `Sample`.
pub const MAX_DEVICE_NAME_LEN: usize = 31;

/// Default device ID used when no `DVID` is present in an enclosing `DEVC` nest.
pub const DEFAULT_DEVICE_ID: u32 = 1;

/// Decimal decades tried, in order, when inferring a `STMP`-based sample
/// rate (§4.3 "Sample-rate inference across payloads").
pub const TIME_STAMP_SCALE_DECADES: [f64; 10] = [
    1e9, 1e8, 1e7, 1e6, 1e5, 1e4, 1e3, 1e2, 1e1, 1e0,
];
