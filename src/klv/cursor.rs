//! `Cursor`: the stateful KLV walker (§4.1, "L1 KLV Parser").
//!
//! Walks a single GPMF byte buffer (one MP4 timed-track payload, one
//! `udta` blob, or one JPEG `APP6` segment) record by record, optionally
//! descending into nests, inheriting `DEVC`/`DVID`/`DVNM` ancestry as it
//! goes, and decoding payload bytes on demand.

use crate::constants::{DEFAULT_DEVICE_ID, MAX_DEVICE_NAME_LEN};
use crate::errors::GpmfError;
use crate::fourcc::FourCC;
use crate::klv::complex::{expand_complex_struct, parse_descriptor, ComplexValue};
use crate::klv::header::{RecordHeader, TypeTag};

/// Stay at the current nest level; do not descend into nests encountered
/// while advancing (they are skipped over whole).
pub const CURRENT_LEVEL: u8 = 0b001;
/// Descend into nests encountered while advancing, rather than skipping them.
pub const RECURSE_LEVELS: u8 = 0b010;
/// Tolerate a single malformed record before failing (§7 `BadStructure`).
pub const TOLERANT: u8 = 0b100;

#[derive(Debug, Clone)]
struct LevelFrame {
    end: usize,
    device_id: Option<u32>,
    device_name: Option<String>,
}

/// A forward-walking cursor over one GPMF byte buffer.
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    levels: Vec<LevelFrame>,
    current: Option<RecordHeader>,
    current_payload_start: usize,
    malformed_streak: u32,
    /// `(start_offset, header)` of every record yielded so far, oldest
    /// first, used by `find_prev`.
    history: Vec<(usize, RecordHeader)>,
}

impl<'a> Cursor<'a> {
    /// Start a new walk at the beginning of `data`.
    pub fn init(data: &'a [u8]) -> Self {
        Cursor {
            data,
            pos: 0,
            levels: vec![LevelFrame { end: data.len(), device_id: None, device_name: None }],
            current: None,
            current_payload_start: 0,
            malformed_streak: 0,
            history: Vec::new(),
        }
    }

    /// The record header the cursor currently sits on, if any.
    pub fn current(&self) -> Option<&RecordHeader> {
        self.current.as_ref()
    }

    /// Advance to and return the next record at (or, with
    /// `RECURSE_LEVELS`, below) the current position. Returns `Ok(None)`
    /// at end of buffer.
    pub fn next(&mut self, flags: u8) -> Result<Option<RecordHeader>, GpmfError> {
        loop {
            let level_end = self.levels.last().map(|l| l.end).unwrap_or(self.data.len());

            if self.pos >= level_end {
                if self.levels.len() > 1 {
                    self.levels.pop();
                    continue;
                }
                return Ok(None);
            }

            let header = match RecordHeader::parse(&self.data[self.pos..]) {
                Ok(h) => {
                    self.malformed_streak = 0;
                    h
                }
                Err(e) => {
                    if flags & TOLERANT != 0 && self.malformed_streak < 1 {
                        self.malformed_streak += 1;
                        self.pos += 4;
                        continue;
                    }
                    return Err(e);
                }
            };

            let payload_start = self.pos + RecordHeader::SIZE;
            let aligned_len = header.aligned_payload_len_checked()?;
            if payload_start + aligned_len > self.data.len() {
                return Err(GpmfError::BadStructure);
            }

            self.current_payload_start = payload_start;
            let nest_end = payload_start + aligned_len;

            if header.is_nest() {
                if flags & RECURSE_LEVELS != 0 {
                    let payload = &self.data[payload_start..nest_end];
                    let (device_id, device_name) = if header.key == FourCC::DEVC {
                        scan_device_info(payload)
                    } else {
                        (None, None)
                    };
                    self.levels.push(LevelFrame { end: nest_end, device_id, device_name });
                    self.pos = payload_start;
                    self.current = Some(header);
                    self.history.push((self.pos, header));
                    return Ok(Some(header));
                } else {
                    self.pos = nest_end;
                    continue;
                }
            }

            self.pos = nest_end;
            self.current = Some(header);
            self.history.push((payload_start - RecordHeader::SIZE, header));
            return Ok(Some(header));
        }
    }

    /// Advance until a record keyed `key` is found, per `flags`.
    pub fn find_next(&mut self, key: FourCC, flags: u8) -> Result<RecordHeader, GpmfError> {
        while let Some(header) = self.next(flags)? {
            if header.key == key {
                return Ok(header);
            }
        }
        Err(GpmfError::Find)
    }

    /// The last record keyed `key` seen before the current position.
    pub fn find_prev(&self, key: FourCC) -> Result<RecordHeader, GpmfError> {
        self.history
            .iter()
            .rev()
            .skip(1)
            .find(|(_, h)| h.key == key)
            .map(|(_, h)| *h)
            .ok_or(GpmfError::Find)
    }

    /// [`Cursor::find_prev`], also returning that record's raw
    /// (unaligned) payload bytes — used to resolve `SCAL`/`TYPE` sibling
    /// descriptors for the record the cursor currently sits on.
    pub fn find_prev_with_data(&self, key: FourCC) -> Result<(RecordHeader, &'a [u8]), GpmfError> {
        let (start, header) = self
            .history
            .iter()
            .rev()
            .skip(1)
            .find(|(_, h)| h.key == key)
            .ok_or(GpmfError::Find)?;
        let payload_start = start + RecordHeader::SIZE;
        let end = payload_start + header.raw_payload_len();
        let data = self.data.get(payload_start..end).ok_or(GpmfError::BufferEnd)?;
        Ok((*header, data))
    }

    /// Device ID inherited from the innermost enclosing `DEVC` nest that
    /// carried a `DVID`, or the crate default.
    pub fn device_id(&self) -> u32 {
        self.levels
            .iter()
            .rev()
            .find_map(|l| l.device_id)
            .unwrap_or(DEFAULT_DEVICE_ID)
    }

    /// Device name inherited from the innermost enclosing `DEVC` nest
    /// that carried a `DVNM`, if any.
    pub fn device_name(&self) -> Option<&str> {
        self.levels.iter().rev().find_map(|l| l.device_name.as_deref())
    }

    /// Number of samples the current record represents on the timeline
    /// (§4.3): `repeat` for ordinary numeric/vector records, or `1` for
    /// whole-payload records such as `COMPLEX` arrays.
    pub fn payload_sample_count(&self) -> Result<usize, GpmfError> {
        let header = self.current.ok_or(GpmfError::BufferEnd)?;
        if header.type_tag()?.is_single_sample_payload() {
            Ok(1)
        } else {
            Ok(header.repeat as usize)
        }
    }

    /// Raw (unaligned) payload bytes of the current record.
    pub fn raw_data(&self) -> Result<&'a [u8], GpmfError> {
        let header = self.current.ok_or(GpmfError::BufferEnd)?;
        let end = self.current_payload_start + header.raw_payload_len();
        self.data.get(self.current_payload_start..end).ok_or(GpmfError::BufferEnd)
    }

    /// Unaligned payload length in bytes of the current record.
    pub fn raw_data_size(&self) -> Result<usize, GpmfError> {
        Ok(self.current.ok_or(GpmfError::BufferEnd)?.raw_payload_len())
    }

    /// Decode the current record's raw bytes as its own declared type,
    /// with no `SCAL` division applied. Not valid on `COMPLEX` records —
    /// callers must resolve the sibling `TYPE` descriptor and call
    /// [`Cursor::formatted_complex`] instead.
    pub fn formatted_data(&self) -> Result<Vec<ComplexValue>, GpmfError> {
        let header = self.current.ok_or(GpmfError::BufferEnd)?;
        let tag = header.type_tag()?;
        if matches!(tag, TypeTag::Complex) {
            return Err(GpmfError::NotValidForType);
        }
        expand_complex_struct(&[tag], self.raw_data()?)
    }

    /// Decode the current `COMPLEX` record using an externally-resolved
    /// `TYPE` descriptor string (the sibling record's raw bytes).
    pub fn formatted_complex(&self, type_descriptor: &[u8]) -> Result<Vec<ComplexValue>, GpmfError> {
        let descriptor = parse_descriptor(type_descriptor)?;
        expand_complex_struct(&descriptor, self.raw_data()?)
    }

    /// [`Cursor::formatted_data`], then divide by `scale` per §4.1's
    /// `SCAL` rule: one divisor applies to every value, or one divisor
    /// per struct element cycled across `repeat`.
    pub fn scaled_data(&self, scale: &[f64]) -> Result<Vec<f64>, GpmfError> {
        let header = self.current.ok_or(GpmfError::BufferEnd)?;
        let width = header.type_tag()?.primitive_size().ok_or(GpmfError::ScaleNotSupported)?;
        let elements_per_struct = if width == 0 { 0 } else { header.struct_size as usize / width };

        let values = self.formatted_data()?;
        let numeric: Vec<f64> = values
            .iter()
            .map(|v| v.as_f64().ok_or(GpmfError::ScaleNotSupported))
            .collect::<Result<_, _>>()?;

        if scale.len() == 1 {
            Ok(numeric.into_iter().map(|v| v / scale[0]).collect())
        } else if elements_per_struct > 0 && scale.len() == elements_per_struct {
            Ok(numeric
                .into_iter()
                .enumerate()
                .map(|(i, v)| v / scale[i % elements_per_struct])
                .collect())
        } else {
            Err(GpmfError::ScaleCount { got: scale.len(), expected: elements_per_struct })
        }
    }

    /// Writer-side operation, never implemented (present for interface
    /// parity with the reader API).
    pub fn modify(&mut self, _bytes: &[u8]) -> Result<(), GpmfError> {
        Err(GpmfError::NotImplemented)
    }

    /// Human-readable one-liner for the record at the current position —
    /// key, type, struct size, repeat — for unit tests and any future CLI.
    /// Never used for anything machine-readable.
    pub fn dump(&self) -> String {
        match self.current {
            Some(header) => format!(
                "{} type={} struct_size={} repeat={}",
                header.key,
                header.type_tag_byte as char,
                header.struct_size,
                header.repeat,
            ),
            None => "<no current record>".to_string(),
        }
    }
}

/// Shallow scan of a `DEVC` nest's immediate payload for `DVID`/`DVNM`,
/// without recursing into further nests. Best-effort: a malformed child
/// record simply ends the scan rather than failing the whole walk.
fn scan_device_info(payload: &[u8]) -> (Option<u32>, Option<String>) {
    let mut device_id = None;
    let mut device_name = None;
    let mut pos = 0usize;

    while pos < payload.len() {
        let header = match RecordHeader::parse(&payload[pos..]) {
            Ok(h) => h,
            Err(_) => break,
        };
        let payload_start = pos + RecordHeader::SIZE;
        let end = payload_start + header.aligned_payload_len();
        if end > payload.len() {
            break;
        }

        if header.key == FourCC::DVID && !header.is_nest() {
            let raw = &payload[payload_start..payload_start + header.raw_payload_len()];
            device_id = Some(match raw.len() {
                4 => u32::from_be_bytes(raw.try_into().unwrap()),
                2 => u16::from_be_bytes(raw.try_into().unwrap()) as u32,
                1 => raw[0] as u32,
                _ => 0,
            });
        } else if header.key == FourCC::DVNM && !header.is_nest() {
            let raw = &payload[payload_start..payload_start + header.raw_payload_len()];
            let name: String = String::from_utf8_lossy(raw).trim_end_matches('\0').to_string();
            device_name = Some(name.chars().take(MAX_DEVICE_NAME_LEN).collect());
        }

        pos = end;
    }

    (device_id, device_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &[u8; 4], ty: u8, struct_size: u8, repeat: u16, payload: &[u8]) -> Vec<u8> {
        let mut v = key.to_vec();
        v.push(ty);
        v.push(struct_size);
        v.extend_from_slice(&repeat.to_be_bytes());
        v.extend_from_slice(payload);
        let pad = (4 - (payload.len() % 4)) % 4;
        v.extend(std::iter::repeat(0u8).take(pad));
        v
    }

    #[test]
    fn walks_flat_records_at_current_level() {
        let mut data = record(b"SCAL", b'l', 4, 1, &10i32.to_be_bytes());
        data.extend(record(b"GPS5", b'l', 4, 1, &20i32.to_be_bytes()));

        let mut cursor = Cursor::init(&data);
        let first = cursor.next(CURRENT_LEVEL).unwrap().unwrap();
        assert_eq!(first.key, FourCC::SCAL);
        let second = cursor.next(CURRENT_LEVEL).unwrap().unwrap();
        assert_eq!(second.key, FourCC::GPS5);
        assert!(cursor.next(CURRENT_LEVEL).unwrap().is_none());
    }

    /// Wraps `payload` (already a whole number of 4-byte-aligned records)
    /// in a nest header whose `struct_size * repeat` equals its length.
    fn nest(key: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut v = key.to_vec();
        v.push(0); // type == 0 marks a nest
        v.push(1); // struct_size
        v.extend_from_slice(&(payload.len() as u16).to_be_bytes()); // repeat
        v.extend_from_slice(payload);
        v
    }

    #[test]
    fn skips_nest_without_recurse_flag() {
        let inner = record(b"GPS5", b'l', 4, 1, &20i32.to_be_bytes());
        let mut data = nest(b"STRM", &inner);
        data.extend(record(b"SCAL", b'l', 4, 1, &1i32.to_be_bytes()));

        let mut cursor = Cursor::init(&data);
        let header = cursor.next(CURRENT_LEVEL).unwrap().unwrap();
        assert_eq!(header.key, FourCC::SCAL);
    }

    #[test]
    fn descends_into_nest_with_recurse_flag() {
        let inner = record(b"GPS5", b'l', 4, 1, &20i32.to_be_bytes());
        let data = nest(b"STRM", &inner);

        let mut cursor = Cursor::init(&data);
        let nest = cursor.next(RECURSE_LEVELS).unwrap().unwrap();
        assert_eq!(nest.key, FourCC::STRM);
        let child = cursor.next(RECURSE_LEVELS).unwrap().unwrap();
        assert_eq!(child.key, FourCC::GPS5);
    }

    #[test]
    fn inherits_device_id_and_name_from_devc() {
        let mut devc_payload = record(b"DVID", b'L', 4, 1, &7u32.to_be_bytes());
        devc_payload.extend(record(b"DVNM", b'c', 1, 6, b"Camera"));
        devc_payload.extend(record(b"GPS5", b'l', 4, 1, &1i32.to_be_bytes()));

        let data = nest(b"DEVC", &devc_payload);

        let mut cursor = Cursor::init(&data);
        cursor.next(RECURSE_LEVELS).unwrap(); // DEVC
        cursor.next(RECURSE_LEVELS).unwrap(); // DVID
        cursor.next(RECURSE_LEVELS).unwrap(); // DVNM
        let gps = cursor.next(RECURSE_LEVELS).unwrap().unwrap();
        assert_eq!(gps.key, FourCC::GPS5);
        assert_eq!(cursor.device_id(), 7);
        assert_eq!(cursor.device_name(), Some("Camera"));
    }

    #[test]
    fn scaled_data_divides_by_single_scalar() {
        let mut data = record(b"SCAL", b'l', 4, 1, &10i32.to_be_bytes());
        data.extend(record(b"TMPC", b'l', 4, 1, &250i32.to_be_bytes()));

        let mut cursor = Cursor::init(&data);
        cursor.next(CURRENT_LEVEL).unwrap();
        cursor.next(CURRENT_LEVEL).unwrap();
        let scaled = cursor.scaled_data(&[10.0]).unwrap();
        assert_eq!(scaled, vec![25.0]);
    }

    #[test]
    fn find_next_locates_key_deeper_in_stream() {
        let mut data = record(b"STMP", b'J', 8, 1, &0u64.to_be_bytes());
        data.extend(record(b"GPS5", b'l', 4, 1, &42i32.to_be_bytes()));

        let mut cursor = Cursor::init(&data);
        let found = cursor.find_next(FourCC::GPS5, CURRENT_LEVEL).unwrap();
        assert_eq!(found.key, FourCC::GPS5);
    }

    #[test]
    fn dump_renders_current_record() {
        let data = record(b"GPS5", b'l', 20, 10, &[0u8; 200]);
        let mut cursor = Cursor::init(&data);
        assert_eq!(cursor.dump(), "<no current record>");
        cursor.next(CURRENT_LEVEL).unwrap();
        assert_eq!(cursor.dump(), "GPS5 type=l struct_size=20 repeat=10");
    }

    #[test]
    fn overflow_length_fails_as_bad_structure_not_panic() {
        let mut data = b"OVFL".to_vec();
        data.push(b'b');
        data.push(255); // struct_size
        data.extend_from_slice(&65535u16.to_be_bytes()); // repeat

        let mut cursor = Cursor::init(&data);
        let err = cursor.next(CURRENT_LEVEL).unwrap_err();
        assert!(matches!(err, GpmfError::BadStructure));
    }
}
