//! Provider over the MP4 `udta` atom's nested GPMF blob — GoPro writes a
//! single untimed metadata snapshot here alongside (or instead of) the
//! timed `GoPro MET` track (§4.2).

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::errors::GpmfError;
use crate::fourcc::FourCC;
use crate::provider::{PayloadProvider, Segment};

pub struct UdtaProvider {
    path: PathBuf,
}

impl UdtaProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        UdtaProvider { path: path.as_ref().to_path_buf() }
    }
}

impl PayloadProvider for UdtaProvider {
    fn segments(&mut self) -> Result<Vec<Segment>, GpmfError> {
        let mut mp4 = mp4iter::Mp4::new(&self.path)
            .map_err(|_| GpmfError::FileOpenFailed(self.path.clone()))?;
        let mut atom = mp4.udta(true)?;

        let mut bytes = Vec::new();
        atom.cursor.read_to_end(&mut bytes)?;

        Ok(extract_gpmf_blobs(&bytes).into_iter().map(Segment::untimed).collect())
    }
}

/// Scan a `udta` atom's raw bytes for nested `size(u32 be) | fourcc(4) |
/// data` fields, returning the payload of every field keyed `GPMF`.
fn extract_gpmf_blobs(udta: &[u8]) -> Vec<Vec<u8>> {
    let mut blobs = Vec::new();
    let mut pos = 0usize;

    while pos + 8 <= udta.len() {
        let size = u32::from_be_bytes([udta[pos], udta[pos + 1], udta[pos + 2], udta[pos + 3]]) as usize;
        if size < 8 || pos + size > udta.len() {
            break;
        }
        if let Some(fourcc) = FourCC::from_bytes(&udta[pos + 4..pos + 8]) {
            if fourcc == FourCC::GPMF {
                blobs.push(udta[pos + 8..pos + size].to_vec());
            }
        }
        pos += size;
    }

    blobs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(fourcc: &[u8; 4], data: &[u8]) -> Vec<u8> {
        let size = (8 + data.len()) as u32;
        let mut v = size.to_be_bytes().to_vec();
        v.extend_from_slice(fourcc);
        v.extend_from_slice(data);
        v
    }

    #[test]
    fn extracts_gpmf_field_among_others() {
        let mut udta = field(b"xxxx", b"ignored");
        udta.extend(field(b"GPMF", b"telemetry-bytes"));

        let blobs = extract_gpmf_blobs(&udta);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0], b"telemetry-bytes");
    }

    #[test]
    fn stops_at_malformed_size() {
        let udta = vec![0xff, 0xff, 0xff, 0xff, b'G', b'P', b'M', b'F'];
        assert!(extract_gpmf_blobs(&udta).is_empty());
    }
}
