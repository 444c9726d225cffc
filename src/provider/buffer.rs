//! Provider over a single in-memory GPMF buffer: a standalone `.gpmf`
//! sidecar file, or the `APP6` segment of a GoPro JPEG still (§4.2).

use std::io::Read;
use std::path::Path;

use jpegiter::{Jpeg, JpegTag};

use crate::errors::GpmfError;
use crate::provider::{PayloadProvider, Segment};

pub struct BufferProvider {
    data: Vec<u8>,
}

impl BufferProvider {
    /// Wrap an already-extracted byte buffer directly.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        BufferProvider { data }
    }

    /// Read a standalone raw GPMF stream file in full.
    pub fn from_raw_file(path: impl AsRef<Path>) -> Result<Self, GpmfError> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path).map_err(|_| GpmfError::FileOpenFailed(path.to_path_buf()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(BufferProvider { data })
    }

    /// Extract the GPMF stream embedded in a GoPro JPEG's `APP6` segment.
    pub fn from_jpeg(path: impl AsRef<Path>) -> Result<Self, GpmfError> {
        let path = path.as_ref();
        let segment = Jpeg::new(path)?.find(&JpegTag::APP6)?;

        let mut app6 = segment.ok_or_else(|| GpmfError::InvalidFileType(path.to_path_buf()))?;
        app6.seek(6); // seek past "GoPro\0"
        let mut data = Vec::new();
        app6.data.read_to_end(&mut data)?;
        Ok(BufferProvider { data })
    }
}

impl PayloadProvider for BufferProvider {
    fn segments(&mut self) -> Result<Vec<Segment>, GpmfError> {
        Ok(vec![Segment::untimed(self.data.clone())])
    }
}
