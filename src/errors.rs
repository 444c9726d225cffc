//! Errors returned by the KLV parser, timeline assembler, providers, and
//! stabilization fusion. Every failure is a value (§7 of the spec this
//! crate implements) — nothing here panics or throws.

use std::fmt;
use std::path::PathBuf;

/// Error kinds returned by core operations.
#[derive(Debug)]
pub enum GpmfError {
    /// Allocation or invalid index on query.
    Memory,
    /// KLV header malformed beyond what `TOLERANT` allows.
    BadStructure,
    /// Walker reached the end of the payload.
    BufferEnd,
    /// Key not present at the requested level.
    Find,
    /// Unknown type tag byte.
    TypeNotSupported(u8),
    /// `SCAL` descriptor invalid for the target type.
    ScaleNotSupported,
    /// `SCAL` element count does not match the struct's element count.
    ScaleCount { got: usize, expected: usize },
    /// Writer-side operation; never implemented, present for interface
    /// completeness only.
    NotImplemented,
    /// E.g. asking for video frame rate on a buffer source.
    NotValidForType,
    /// Provider failed to open its underlying file.
    FileOpenFailed(PathBuf),
    /// Time-range iterator exhausted.
    TimeRangeNotFound,
    /// No samples matched a requested FourCC during parse.
    TypeNotFound,
    /// Stabilization fusion gating failure (invalid/insufficient CORI,
    /// IORI, or GRAV samples for the requested frame range).
    StabilizationFailed,
    /// Unrecognised file extension, neither MP4/LRV, JPEG, nor a raw GPMF
    /// stream.
    InvalidFileType(PathBuf),
    /// Wrapped MP4 demuxer error.
    Mp4Error(mp4iter::Mp4Error),
    /// Wrapped JPEG parse error.
    JpegError(jpegiter::JpegError),
    /// Wrapped IO error.
    IoError(std::io::Error),
    /// Wrapped JSON export error.
    JsonError(serde_json::Error),
}

impl std::error::Error for GpmfError {}

impl fmt::Display for GpmfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpmfError::Memory => write!(f, "allocation failed or index out of bounds"),
            GpmfError::BadStructure => write!(f, "KLV record malformed beyond tolerance"),
            GpmfError::BufferEnd => write!(f, "reached end of payload buffer"),
            GpmfError::Find => write!(f, "key not found at this nest level"),
            GpmfError::TypeNotSupported(t) => write!(f, "unsupported type tag '{}' (0x{t:02x})", *t as char),
            GpmfError::ScaleNotSupported => write!(f, "SCAL descriptor not supported for this type"),
            GpmfError::ScaleCount { got, expected } => write!(f, "SCAL has {got} divisors, expected 1 or {expected}"),
            GpmfError::NotImplemented => write!(f, "not implemented"),
            GpmfError::NotValidForType => write!(f, "operation not valid for this payload source"),
            GpmfError::FileOpenFailed(p) => write!(f, "failed to open '{}'", p.display()),
            GpmfError::TimeRangeNotFound => write!(f, "no more time ranges"),
            GpmfError::TypeNotFound => write!(f, "no samples found for this key"),
            GpmfError::StabilizationFailed => write!(f, "insufficient or invalid CORI/IORI/GRAV metadata"),
            GpmfError::InvalidFileType(p) => write!(f, "unsupported file type: '{}'", p.display()),
            GpmfError::Mp4Error(err) => write!(f, "{err}"),
            GpmfError::JpegError(err) => write!(f, "{err}"),
            GpmfError::IoError(err) => write!(f, "{err}"),
            GpmfError::JsonError(err) => write!(f, "{err}"),
        }
    }
}

impl From<mp4iter::Mp4Error> for GpmfError {
    fn from(err: mp4iter::Mp4Error) -> Self {
        GpmfError::Mp4Error(err)
    }
}

impl From<jpegiter::JpegError> for GpmfError {
    fn from(err: jpegiter::JpegError) -> Self {
        GpmfError::JpegError(err)
    }
}

impl From<std::io::Error> for GpmfError {
    fn from(err: std::io::Error) -> Self {
        GpmfError::IoError(err)
    }
}

impl From<serde_json::Error> for GpmfError {
    fn from(err: serde_json::Error) -> Self {
        GpmfError::JsonError(err)
    }
}
