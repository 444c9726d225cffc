//! Complex (`?`) type expansion: a `COMPLEX` record's actual field layout
//! is described by a sibling `TYPE` record holding an ASCII string of type
//! tag characters, one per field, cycled to fill `struct_size` bytes
//! (§3, §4.1).

use crate::errors::GpmfError;
use crate::fourcc::FourCC;
use crate::klv::fixed_point::{q15_16_to_f64, q31_32_to_f64};
use crate::klv::header::TypeTag;

/// One decoded field of a complex struct.
#[derive(Debug, Clone, PartialEq)]
pub enum ComplexValue {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    FourCc(FourCC),
    Char(u8),
    Bytes(Vec<u8>),
}

impl ComplexValue {
    /// Best-effort numeric projection, used when a complex field feeds
    /// into `SCAL` division alongside plain numeric samples.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ComplexValue::Signed(v) => Some(*v as f64),
            ComplexValue::Unsigned(v) => Some(*v as f64),
            ComplexValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

/// Parse a `TYPE` record's ASCII payload into one tag per character.
pub fn parse_descriptor(bytes: &[u8]) -> Result<Vec<TypeTag>, GpmfError> {
    bytes.iter().map(|b| TypeTag::from_byte(*b)).collect()
}

/// Byte width of one full cycle of `descriptor` (the width of one struct element).
pub fn size_of_complex(descriptor: &[TypeTag]) -> Result<usize, GpmfError> {
    descriptor
        .iter()
        .try_fold(0usize, |acc, tag| Ok(acc + tag.primitive_size().ok_or(GpmfError::ScaleNotSupported)?))
}

/// Decode one `struct_size`-byte struct element of `raw` by walking
/// `descriptor`, cycling back to its start if `struct_size` is a multiple
/// of the descriptor's own width greater than one (a handful of firmwares
/// repeat a short descriptor across a wider struct).
pub fn expand_complex_struct(descriptor: &[TypeTag], raw: &[u8]) -> Result<Vec<ComplexValue>, GpmfError> {
    let cycle_width = size_of_complex(descriptor)?;
    if cycle_width == 0 {
        return Err(GpmfError::ScaleNotSupported);
    }

    let mut values = Vec::new();
    let mut offset = 0usize;
    while offset < raw.len() {
        for tag in descriptor {
            let width = tag.primitive_size().ok_or(GpmfError::ScaleNotSupported)?;
            let field = raw.get(offset..offset + width).ok_or(GpmfError::BufferEnd)?;
            values.push(decode_field(*tag, field)?);
            offset += width;
        }
    }
    Ok(values)
}

fn decode_field(tag: TypeTag, bytes: &[u8]) -> Result<ComplexValue, GpmfError> {
    Ok(match tag {
        TypeTag::Int8 => ComplexValue::Signed(bytes[0] as i8 as i64),
        TypeTag::UInt8 => ComplexValue::Unsigned(bytes[0] as u64),
        TypeTag::Char => ComplexValue::Char(bytes[0]),
        TypeTag::Int16 => ComplexValue::Signed(i16::from_be_bytes(bytes.try_into().unwrap()) as i64),
        TypeTag::UInt16 => ComplexValue::Unsigned(u16::from_be_bytes(bytes.try_into().unwrap()) as u64),
        TypeTag::Int32 => ComplexValue::Signed(i32::from_be_bytes(bytes.try_into().unwrap()) as i64),
        TypeTag::UInt32 => ComplexValue::Unsigned(u32::from_be_bytes(bytes.try_into().unwrap()) as u64),
        TypeTag::Int64 => ComplexValue::Signed(i64::from_be_bytes(bytes.try_into().unwrap())),
        TypeTag::UInt64 => ComplexValue::Unsigned(u64::from_be_bytes(bytes.try_into().unwrap())),
        TypeTag::Float => ComplexValue::Float(f32::from_be_bytes(bytes.try_into().unwrap()) as f64),
        TypeTag::Double => ComplexValue::Float(f64::from_be_bytes(bytes.try_into().unwrap())),
        TypeTag::Q1516 => ComplexValue::Float(q15_16_to_f64(i32::from_be_bytes(bytes.try_into().unwrap()))),
        TypeTag::Q3132 => ComplexValue::Float(q31_32_to_f64(i64::from_be_bytes(bytes.try_into().unwrap()))),
        TypeTag::FourCcValue => ComplexValue::FourCc(FourCC::from_bytes(bytes).ok_or(GpmfError::BadStructure)?),
        TypeTag::StringUtf8 => ComplexValue::Bytes(bytes.to_vec()),
        TypeTag::Guid | TypeTag::Utc => ComplexValue::Bytes(bytes.to_vec()),
        TypeTag::Opaque(_) => ComplexValue::Bytes(bytes.to_vec()),
        TypeTag::Nest | TypeTag::Complex => return Err(GpmfError::ScaleNotSupported),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_mixed_descriptor() {
        // "Lf": one u32, one f32.
        let descriptor = parse_descriptor(b"Lf").unwrap();
        let mut raw = 42u32.to_be_bytes().to_vec();
        raw.extend_from_slice(&1.5f32.to_be_bytes());
        let values = expand_complex_struct(&descriptor, &raw).unwrap();
        assert_eq!(values[0], ComplexValue::Unsigned(42));
        assert_eq!(values[1], ComplexValue::Float(1.5));
    }

    #[test]
    fn cycles_descriptor_across_multiple_structs() {
        let descriptor = parse_descriptor(b"B").unwrap();
        let raw = vec![1u8, 2, 3];
        let values = expand_complex_struct(&descriptor, &raw).unwrap();
        assert_eq!(values.len(), 3);
    }
}
