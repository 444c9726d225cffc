//! GPMF FourCC — the four-character key every KLV record and every
//! `Sample` is addressed by.
//!
//! Unlike the teacher crate's closed `FourCC` enum (one variant per
//! documented key, plus `Other(String)`), keys here are addressed
//! generically: GPMF defines hundreds of device- and firmware-specific
//! FourCCs and this crate never needs to branch on "which one is it",
//! only "does this record's key equal that one". A handful of
//! well-known keys the parser and timeline themselves inspect (`DEVC`,
//! `SCAL`, `TYPE`, ...) are exposed as associated constants instead.

use std::fmt;

/// Four-character record key, stored in the byte order it appears in the
/// stream (i.e. as written in the file, not reversed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    // GPMF structural keys.
    pub const DEVC: FourCC = FourCC(*b"DEVC");
    pub const DVID: FourCC = FourCC(*b"DVID");
    pub const DVNM: FourCC = FourCC(*b"DVNM");
    pub const STRM: FourCC = FourCC(*b"STRM");
    pub const STNM: FourCC = FourCC(*b"STNM");
    pub const TYPE: FourCC = FourCC(*b"TYPE");
    pub const SCAL: FourCC = FourCC(*b"SCAL");
    pub const TSMP: FourCC = FourCC(*b"TSMP");
    pub const STMP: FourCC = FourCC(*b"STMP");
    pub const TIMO: FourCC = FourCC(*b"TIMO");
    pub const EMPT: FourCC = FourCC(*b"EMPT");

    // Orientation / stabilization keys (§4.4).
    pub const CORI: FourCC = FourCC(*b"CORI");
    pub const IORI: FourCC = FourCC(*b"IORI");
    pub const GRAV: FourCC = FourCC(*b"GRAV");
    pub const RATE: FourCC = FourCC(*b"RATE");
    pub const PRJT: FourCC = FourCC(*b"PRJT");
    pub const MTYP: FourCC = FourCC(*b"MTYP");
    pub const VFOV: FourCC = FourCC(*b"VFOV");
    pub const EISA: FourCC = FourCC(*b"EISA");

    // Common sensor/content keys (not special-cased by the parser, just
    // convenient to have named).
    pub const GPS5: FourCC = FourCC(*b"GPS5");
    pub const GPS9: FourCC = FourCC(*b"GPS9");
    pub const ACCL: FourCC = FourCC(*b"ACCL");
    pub const GYRO: FourCC = FourCC(*b"GYRO");

    /// MP4 `udta` atom's nested GPMF blob FourCC.
    pub const GPMF: FourCC = FourCC(*b"GPMF");

    /// Build a `FourCC` from a 4-byte slice taken directly from the
    /// stream (no byte-order reversal: FourCC value bytes are stored as
    /// written, §4.1).
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; 4] = bytes.get(0..4)?.try_into().ok()?;
        Some(FourCC(arr))
    }

    /// Build a `FourCC` from an ASCII string, e.g. `FourCC::from_str("CORI")`.
    pub fn from_str(key: &str) -> Option<Self> {
        Self::from_bytes(key.as_bytes())
    }

    /// Render as a `&str` if the key is printable ASCII, lossy UTF-8 otherwise.
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// `true` for zero-padding found at the tail of an MP4 `udta` GPMF
    /// blob (§4.2): four NUL bytes are not a valid key and mark the end
    /// of usable data.
    pub fn is_padding(&self) -> bool {
        self.0 == [0, 0, 0, 0]
    }

    /// Structural container keys that `Timeline` assembly skips — they
    /// describe nesting, not data (§4.3 step 2 "Skip").
    pub fn is_container_only(&self) -> bool {
        matches!(*self, Self::DVID | Self::DVNM | Self::STRM | Self::DEVC)
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<[u8; 4]> for FourCC {
    fn from(bytes: [u8; 4]) -> Self {
        FourCC(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_ascii() {
        assert_eq!(FourCC::CORI.to_string(), "CORI");
    }

    #[test]
    fn detects_udta_padding() {
        assert!(FourCC::from_bytes(&[0, 0, 0, 0]).unwrap().is_padding());
        assert!(!FourCC::CORI.is_padding());
    }

    #[test]
    fn container_keys_are_flagged() {
        assert!(FourCC::DEVC.is_container_only());
        assert!(FourCC::STRM.is_container_only());
        assert!(!FourCC::GPS5.is_container_only());
    }
}
