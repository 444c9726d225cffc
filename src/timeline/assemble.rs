//! The assembly algorithm itself (§4.3): walk every segment's KLV tree,
//! resolve each leaf record's `SCAL`/`TYPE`/`TSMP`/`STMP`/`EMPT` siblings,
//! and emit `Sample`s, time-placed within the segment.

use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};

use crate::errors::GpmfError;
use crate::fourcc::FourCC;
use crate::klv::complex::{expand_complex_struct, parse_descriptor};
use crate::klv::header::TypeTag;
use crate::klv::{Cursor, RECURSE_LEVELS, TOLERANT};
use crate::provider::Segment;
use crate::timeline::{Sample, Time, Timeline};

/// Sibling/descriptor keys that describe another record rather than
/// carrying their own timeline data.
fn is_sibling_descriptor(key: FourCC) -> bool {
    matches!(key, FourCC::SCAL | FourCC::TYPE | FourCC::TSMP | FourCC::STMP | FourCC::TIMO | FourCC::EMPT)
}

/// Assemble every segment into one sorted `Timeline`. Segments are
/// independent payloads, so each is walked on its own rayon thread and
/// the per-segment sample lists merged afterwards — same split the
/// teacher uses for its own per-stream parallel walk.
pub fn assemble(segments: Vec<Segment>) -> Result<Timeline, GpmfError> {
    let mut timeline = Timeline::new();
    let per_segment: Vec<Vec<Sample>> =
        segments.par_iter().map(assemble_segment).collect::<Result<_, _>>()?;
    for samples in per_segment {
        for sample in samples {
            timeline.push(sample);
        }
    }
    timeline.sort_by_time();
    Ok(timeline)
}

fn assemble_segment(segment: &Segment) -> Result<Vec<Sample>, GpmfError> {
    let mut samples = Vec::new();
    let mut cursor = Cursor::init(&segment.data);

    while let Some(header) = cursor.next(RECURSE_LEVELS | TOLERANT)? {
        if header.is_nest() || header.key.is_container_only() || is_sibling_descriptor(header.key) {
            continue;
        }

        let device_id = cursor.device_id();
        let device_name = cursor.device_name().map(|s| s.to_string());
        let tag = header.type_tag()?;
        let tsmp = resolve_tsmp(&cursor);
        let stmp = resolve_stmp(&cursor);
        let empt = resolve_empt(&cursor);
        let rate = segment_rate(segment, header.repeat);

        // ASCII strings (§3 "Char ... also used for ASCII string
        // payloads"): a single whole-payload Sample carrying text, never
        // split across `repeat`.
        if matches!(tag, TypeTag::Char) {
            let raw = cursor.raw_data()?;
            let text = String::from_utf8_lossy(raw).trim_end_matches('\0').to_string();
            samples.push(Sample {
                fourcc: header.key,
                type_tag: tag,
                struct_size: header.struct_size,
                elements_in_struct: 1,
                repeat: header.repeat,
                count: 1,
                device_id,
                device_name,
                time: time_for_index(segment, 0, 1),
                rate,
                tsmp,
                stmp,
                values: Vec::new(),
                text: Some(text),
            });
            continue;
        }

        // `COMPLEX` structs (§3 Invariant 5): one whole-payload Sample,
        // fields resolved via the sibling `TYPE` descriptor.
        if matches!(tag, TypeTag::Complex) {
            let (_, type_bytes) = cursor.find_prev_with_data(FourCC::TYPE)?;
            let descriptor = parse_descriptor(type_bytes)?;
            let elements_in_struct = descriptor.len().max(1);
            let values = cursor.formatted_complex(type_bytes)?;
            let mut numeric: Vec<f64> = values.iter().filter_map(|v| v.as_f64()).collect();
            let mut count = numeric.len() / elements_in_struct.max(1);
            count = effective_count(count, empt);
            numeric.truncate(count * elements_in_struct);

            samples.push(Sample {
                fourcc: header.key,
                type_tag: tag,
                struct_size: header.struct_size,
                elements_in_struct,
                repeat: header.repeat,
                count,
                device_id,
                device_name,
                time: time_for_index(segment, 0, 1),
                rate,
                tsmp,
                stmp,
                values: numeric,
                text: None,
            });
            continue;
        }

        let (scale, has_scal) = resolve_scale(&cursor)?;
        let scaled = cursor.scaled_data(&scale)?;
        let sample_count = cursor.payload_sample_count()?.max(1);
        let elements_per_struct = (scaled.len() / sample_count).max(1);

        // Invariant 4: once `SCAL` has rescaled the payload to a floating
        // point quantity, the type reported on the timeline follows suit
        // (`GPS5` rescales to `double`, everything else to `float`).
        let reported_tag = if has_scal {
            if header.key == FourCC::GPS5 { TypeTag::Double } else { TypeTag::Float }
        } else {
            tag
        };
        let reported_struct_size = if has_scal {
            (reported_tag.primitive_size().unwrap_or(4) * elements_per_struct) as u8
        } else {
            header.struct_size
        };

        if !segment.has_real_time() {
            // Invariant 5: global-time segments collapse to one Sample
            // per payload key rather than `repeat` individually-timed ones.
            let count = effective_count(sample_count, empt);
            let mut values = scaled;
            values.truncate(count * elements_per_struct);
            samples.push(Sample {
                fourcc: header.key,
                type_tag: reported_tag,
                struct_size: reported_struct_size,
                elements_in_struct: elements_per_struct,
                repeat: header.repeat,
                count,
                device_id,
                device_name,
                time: Time::Global,
                rate,
                tsmp,
                stmp,
                values,
                text: None,
            });
            continue;
        }

        let emit_count = effective_count(sample_count, empt);
        for i in 0..emit_count {
            let start = i * elements_per_struct;
            let values = scaled[start..start + elements_per_struct].to_vec();
            samples.push(Sample {
                fourcc: header.key,
                type_tag: reported_tag,
                struct_size: reported_struct_size,
                elements_in_struct: elements_per_struct,
                repeat: header.repeat,
                count: 1,
                device_id,
                device_name: device_name.clone(),
                time: time_for_index(segment, i, sample_count),
                rate,
                tsmp,
                stmp,
                values,
                text: None,
            });
        }
    }

    Ok(samples)
}

/// Resolve the nearest preceding `SCAL` sibling into a divisor list and
/// whether one was found at all (`[1.0]`/`false` when `SCAL` is absent —
/// it's optional, §4.1).
fn resolve_scale(cursor: &Cursor) -> Result<(Vec<f64>, bool), GpmfError> {
    match cursor.find_prev_with_data(FourCC::SCAL) {
        Ok((scal_header, scal_bytes)) => {
            let scal_tag = scal_header.type_tag()?;
            let values = expand_complex_struct(&[scal_tag], scal_bytes)?;
            let divisors: Vec<f64> = values.iter().filter_map(|v| v.as_f64()).collect();
            Ok((divisors, true))
        }
        Err(_) => Ok((vec![1.0], false)),
    }
}

/// `TSMP`: total samples of this key up to and including this payload.
fn resolve_tsmp(cursor: &Cursor) -> Option<u32> {
    let (header, bytes) = cursor.find_prev_with_data(FourCC::TSMP).ok()?;
    let tag = header.type_tag().ok()?;
    let values = expand_complex_struct(&[tag], bytes).ok()?;
    values.first().and_then(|v| v.as_f64()).map(|v| v as u32)
}

/// `STMP`: this payload's absolute device timestamp.
fn resolve_stmp(cursor: &Cursor) -> Option<u64> {
    let (header, bytes) = cursor.find_prev_with_data(FourCC::STMP).ok()?;
    let tag = header.type_tag().ok()?;
    let values = expand_complex_struct(&[tag], bytes).ok()?;
    values.first().and_then(|v| v.as_f64()).map(|v| v as u64)
}

/// `EMPT`: count of trailing empty/padding samples within `repeat` to
/// drop before emitting (§3 Invariant 3).
fn resolve_empt(cursor: &Cursor) -> usize {
    (|| -> Option<usize> {
        let (header, bytes) = cursor.find_prev_with_data(FourCC::EMPT).ok()?;
        let tag = header.type_tag().ok()?;
        let values = expand_complex_struct(&[tag], bytes).ok()?;
        values.first().and_then(|v| v.as_f64()).map(|v| v as usize)
    })()
    .unwrap_or(0)
}

fn effective_count(sample_count: usize, empt: usize) -> usize {
    sample_count.saturating_sub(empt).max(if sample_count == 0 { 0 } else { 1 })
}

/// Per-segment sample rate (§4.3 "Compute `sample_rate_segment`"):
/// `repeat / (out - in)`, or `1.0` when the window is too short to
/// divide meaningfully. `None` for untimed segments.
fn segment_rate(segment: &Segment, repeat: u16) -> Option<f64> {
    if !segment.has_real_time() {
        return None;
    }
    if segment.duration > 0.001 {
        Some(repeat as f64 / segment.duration)
    } else {
        Some(1.0)
    }
}

/// Linearly interpolate sample `i` of `count` across `segment`'s time
/// window, or `Time::Global` if the segment carries no real timing.
fn time_for_index(segment: &Segment, i: usize, count: usize) -> Time {
    if !segment.has_real_time() {
        return Time::Global;
    }
    let frac = if count <= 1 { 0.0 } else { i as f64 / count as f64 };
    Time::At(segment.start + frac * segment.duration)
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

    fn nest(key: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut v = key.to_vec();
        v.push(0);
        v.push(1);
        v.extend_from_slice(&(payload.len() as u16).to_be_bytes());
        v.extend_from_slice(payload);
        v
    }

    #[test]
    fn assembles_scaled_samples_with_real_time() {
        let mut strm_payload = record(b"STNM", b'c', 1, 5, b"GYROS");
        strm_payload.extend(record(b"SCAL", b'l', 4, 1, &10i32.to_be_bytes()));
        strm_payload.extend(record(b"GYRO", b'l', 4, 2, &[
            0, 0, 0, 100, // 10.0 after scaling
            0, 0, 0, 200, // 20.0 after scaling
        ]));
        let devc_payload = nest(b"STRM", &strm_payload);
        let data = nest(b"DEVC", &devc_payload);

        let segment = Segment { data, start: 0.0, duration: 1.0 };
        let timeline = assemble(vec![segment]).unwrap();

        let gyro: Vec<_> = timeline.by_fourcc(FourCC::GYRO).collect();
        assert_eq!(gyro.len(), 2);
        assert_eq!(gyro[0].values, vec![10.0]);
        assert_eq!(gyro[1].values, vec![20.0]);
        assert_eq!(gyro[0].time, Time::At(0.0));
        assert_eq!(gyro[1].time, Time::At(0.5));
        assert_eq!(gyro[0].type_tag, TypeTag::Float);
        assert_eq!(gyro[0].rate, Some(2.0));
    }

    #[test]
    fn untimed_segment_yields_global_time_and_single_sample() {
        let data = record(b"GPS5", b'l', 4, 1, &1i32.to_be_bytes());
        let segment = Segment::untimed(data);
        let timeline = assemble(vec![segment]).unwrap();
        assert_eq!(timeline.all()[0].time, Time::Global);
        assert_eq!(timeline.all()[0].count, 1);
    }

    #[test]
    fn char_record_becomes_text_sample() {
        let data = record(b"STNM", b'c', 1, 5, b"GYROS");
        let segment = Segment { data, start: 0.0, duration: 1.0 };
        let timeline = assemble(vec![segment]).unwrap();

        let sample = &timeline.all()[0];
        assert_eq!(sample.text.as_deref(), Some("GYROS"));
        assert!(sample.values.is_empty());
    }

    #[test]
    fn empt_reduces_emitted_sample_count() {
        let mut payload = record(b"EMPT", b'L', 4, 1, &1u32.to_be_bytes());
        payload.extend(record(b"GYRO", b'l', 4, 3, &[
            0, 0, 0, 1, //
            0, 0, 0, 2, //
            0, 0, 0, 3, //
        ]));
        let segment = Segment { data: payload, start: 0.0, duration: 1.0 };
        let timeline = assemble(vec![segment]).unwrap();

        assert_eq!(timeline.sample_count(FourCC::GYRO), 2);
    }

    #[test]
    fn complex_record_resolves_type_descriptor() {
        let complex_key = FourCC::from_bytes(b"ALLD").unwrap();
        let mut payload = record(b"TYPE", b'c', 1, 2, b"Lf");
        let mut struct_bytes = 42u32.to_be_bytes().to_vec();
        struct_bytes.extend_from_slice(&1.5f32.to_be_bytes());
        payload.extend(record(b"ALLD", b'?', 8, 1, &struct_bytes));

        let segment = Segment { data: payload, start: 0.0, duration: 1.0 };
        let timeline = assemble(vec![segment]).unwrap();

        let sample = timeline.sample(complex_key, 0).unwrap();
        assert_eq!(sample.elements_in_struct, 2);
        assert_eq!(sample.values, vec![42.0, 1.5]);
    }
}
