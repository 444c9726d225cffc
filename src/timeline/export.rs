//! JSON export (§4.3 "export", §6 "JSON export"): grouped by device name,
//! then `HH:MM:SS.mmm` timestamp, then `FourCC`. Built with `serde_json`,
//! the JSON crate this corpus reaches for.

use std::io::Write;

use serde_json::{Map, Value};

use crate::errors::GpmfError;
use crate::timeline::{Sample, Time, Timeline};

const EXPORT_VERSION: &str = "LIBGPMF2JSON 1.0.0";

/// Which export shape to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// The grouped device/timestamp/FourCC tree described in §6.
    Json,
    /// A flat per-record debug dump (key/type/struct_size/repeat/time),
    /// in timeline order — the "raw-GPMF debug variant" §4.3 calls for.
    Raw,
}

pub fn export(timeline: &Timeline, mut writer: impl Write, kind: ExportKind) -> Result<(), GpmfError> {
    let value = match kind {
        ExportKind::Json => build_grouped(timeline),
        ExportKind::Raw => build_raw(timeline),
    };
    serde_json::to_writer_pretty(&mut writer, &value)?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn build_grouped(timeline: &Timeline) -> Value {
    let mut root = Map::new();
    root.insert("VERSION".to_string(), Value::String(EXPORT_VERSION.to_string()));

    for sample in timeline.all() {
        let device_key = sample
            .device_name
            .clone()
            .unwrap_or_else(|| format!("DEVICE_{}", sample.device_id));
        let device_obj = entry(&mut root, &device_key);

        let fourcc_parent = match sample.time {
            Time::Global => device_obj,
            Time::At(seconds) => entry(device_obj, &format_timestamp(seconds)),
        };

        fourcc_parent.insert(sample.fourcc.as_str().to_string(), sample_object(sample));
    }

    Value::Object(root)
}

fn build_raw(timeline: &Timeline) -> Value {
    let records = timeline
        .all()
        .iter()
        .map(|s| {
            let mut obj = Map::new();
            obj.insert("key".to_string(), Value::String(s.fourcc.as_str().to_string()));
            obj.insert("type".to_string(), Value::String((s.type_tag.to_byte() as char).to_string()));
            obj.insert("structSize".to_string(), Value::from(s.struct_size));
            obj.insert("repeat".to_string(), Value::from(s.repeat));
            match s.time {
                Time::At(t) => {
                    obj.insert("time".to_string(), Value::from(t));
                }
                Time::Global => {
                    obj.insert("time".to_string(), Value::Null);
                }
            }
            Value::Object(obj)
        })
        .collect();
    Value::Array(records)
}

/// Build one `sampleBuffer`-bearing object for a `Sample` (§6).
fn sample_object(sample: &Sample) -> Value {
    let mut obj = Map::new();
    obj.insert("sampleDeviceID".to_string(), Value::from(sample.device_id));
    if let Some(name) = &sample.device_name {
        obj.insert("sampleDeviceName".to_string(), Value::String(name.clone()));
    }
    obj.insert("elementsInStruct".to_string(), Value::from(sample.elements_in_struct));
    obj.insert("structSize".to_string(), Value::from(sample.struct_size));
    obj.insert("sampleRepeat".to_string(), Value::from(sample.repeat));
    if let Some(stmp) = sample.stmp {
        if stmp != 0 {
            obj.insert("sampleSTMP".to_string(), Value::from(stmp));
        }
    }
    if let Some(rate) = sample.rate {
        if rate > 0.0 {
            obj.insert("sampleRate".to_string(), Value::from(rate));
        }
    }
    obj.insert(
        "sampleSizeType".to_string(),
        Value::String((sample.type_tag.to_byte() as char).to_string()),
    );

    if let Some(text) = &sample.text {
        obj.insert("sampleBuffer".to_string(), Value::String(text.clone()));
        obj.insert("sampleBufferSize".to_string(), Value::from(text.len()));
    } else {
        obj.insert("sampleBufferSize".to_string(), Value::from(sample.values.len()));
        obj.insert("sampleBuffer".to_string(), buffer_value(sample));
    }

    Value::Object(obj)
}

/// Shape `sampleBuffer` as a scalar, a flat array, or an array-of-arrays
/// depending on `repeat` × `elementsInStruct` (§6).
fn buffer_value(sample: &Sample) -> Value {
    if sample.count <= 1 {
        return match sample.values.len() {
            0 => Value::Array(vec![]),
            1 => Value::from(sample.values[0]),
            _ => Value::Array(sample.values.iter().map(|v| Value::from(*v)).collect()),
        };
    }

    let per_group = sample.elements_in_struct.max(1);
    Value::Array(
        sample
            .values
            .chunks(per_group)
            .map(|chunk| Value::Array(chunk.iter().map(|v| Value::from(*v)).collect()))
            .collect(),
    )
}

fn entry<'m>(parent: &'m mut Map<String, Value>, key: &str) -> &'m mut Map<String, Value> {
    parent
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .expect("export always inserts Value::Object at this key")
}

/// Render seconds as `HH:MM:SS.mmm` (§6).
fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round().max(0.0) as u64;
    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;
    let s = total_s % 60;
    let m = (total_s / 60) % 60;
    let h = total_s / 3600;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fourcc::FourCC;
    use crate::klv::header::TypeTag;

    fn sample(fourcc: FourCC, time: Time, values: Vec<f64>, count: usize) -> Sample {
        Sample {
            fourcc,
            type_tag: TypeTag::Float,
            struct_size: 4,
            elements_in_struct: values.len().max(1) / count.max(1),
            repeat: count as u16,
            count,
            device_id: 1,
            device_name: Some("Camera".to_string()),
            time,
            rate: Some(200.0),
            tsmp: None,
            stmp: None,
            values,
            text: None,
        }
    }

    #[test]
    fn formats_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00:00.000");
        assert_eq!(format_timestamp(61.25), "00:01:01.250");
    }

    #[test]
    fn groups_by_device_then_time_then_fourcc() {
        let mut timeline = Timeline::new();
        timeline.push(sample(FourCC::ACCL, Time::At(1.0), vec![1.0, 2.0, 3.0], 1));
        let value = build_grouped(&timeline);

        let camera = &value["Camera"];
        let at_one = &camera["00:00:01.000"];
        assert!(at_one["ACCL"]["sampleBuffer"].is_array());
    }

    #[test]
    fn global_time_sample_omits_timestamp_level() {
        let mut timeline = Timeline::new();
        timeline.push(sample(FourCC::GPS5, Time::Global, vec![1.0], 1));
        let value = build_grouped(&timeline);
        assert!(value["Camera"]["GPS5"].is_object());
    }

    #[test]
    fn repeated_struct_becomes_array_of_arrays() {
        let mut timeline = Timeline::new();
        timeline.push(sample(FourCC::ACCL, Time::At(0.0), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2));
        let value = build_grouped(&timeline);
        let buf = &value["Camera"]["00:00:00.000"]["ACCL"]["sampleBuffer"];
        assert_eq!(buf.as_array().unwrap().len(), 2);
        assert_eq!(buf[0].as_array().unwrap().len(), 3);
    }
}
