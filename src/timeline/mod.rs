//! Layer 3: the timeline assembler. Turns the flat sequence of
//! `Segment`s a provider hands back into a single time-sorted,
//! per-FourCC-queryable `Timeline` of `Sample`s (§3, §4.3).

pub mod assemble;
pub mod export;
pub mod rate;

use std::collections::HashMap;

use crate::constants::GLOBAL_TIME;
use crate::errors::GpmfError;
use crate::fourcc::FourCC;
use crate::klv::header::TypeTag;

pub use assemble::assemble;
pub use export::ExportKind;
pub use rate::KeyRate;

/// A sample's position on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Time {
    /// Seconds relative to the start of the source track.
    At(f64),
    /// No real time window — the sample came from an untimed source
    /// (a `udta` blob or a standalone buffer), §9 design note.
    Global,
}

impl Time {
    pub fn seconds(&self) -> Option<f64> {
        match self {
            Time::At(t) => Some(*t),
            Time::Global => None,
        }
    }

    #[allow(dead_code)]
    fn from_raw(seconds: f64) -> Self {
        if seconds == GLOBAL_TIME {
            Time::Global
        } else {
            Time::At(seconds)
        }
    }
}

/// One decoded, time-placed KLV leaf record (§3 "Sample record").
#[derive(Debug, Clone)]
pub struct Sample {
    pub fourcc: FourCC,
    pub type_tag: TypeTag,
    /// Bytes per element-group, as declared by the originating record's
    /// header, recomputed per Invariant 4 when `SCAL` rescaled the type
    /// to `float`/`double`.
    pub struct_size: u8,
    /// Number of primitive elements packed into one `struct_size`-sized
    /// element-group (e.g. 5 for `GPS5`'s `l`-typed struct).
    pub elements_in_struct: usize,
    /// `repeat` of the record this sample was emitted from (§4.3 "Emit
    /// samples"): the count of element-groups in that record's payload,
    /// not the count of `Sample`s emitted from it (those are almost
    /// always 1:1, except the single-record `COMPLEX`/string/global-time
    /// case of §4.3 step 2, where one `Sample` carries all `repeat`
    /// element-groups under `count`).
    pub repeat: u16,
    /// Number of element-groups this particular `Sample` carries: 1 for
    /// the ordinary per-sample case, `repeat` for the complex/string/
    /// global-time whole-payload case (§3 Invariant 5).
    pub count: usize,
    pub device_id: u32,
    pub device_name: Option<String>,
    pub time: Time,
    /// Per-segment sample rate (samples/second), computed as
    /// `repeat / (out - in)` when the segment has a real time window
    /// (§4.3 "Compute `sample_rate_segment`"). `None` for global-time
    /// samples, which have no segment duration to divide by.
    pub rate: Option<f64>,
    /// `TSMP` sibling: total samples of this key up to and including
    /// this payload. Shared by every `Sample` emitted from the same
    /// payload/key pair.
    pub tsmp: Option<u32>,
    /// `STMP` sibling: this payload's absolute device timestamp.
    pub stmp: Option<u64>,
    /// Scaled numeric values: one element for a scalar record, several
    /// for a struct (e.g. 5 for `GPS5`), `elements_in_struct * count`
    /// for a whole-payload complex record. Empty for ASCII-string
    /// samples, whose text lives in `text` instead — a GPMF string
    /// carries no numeric payload worth representing as `f64`.
    pub values: Vec<f64>,
    /// ASCII text, populated only for `TypeTag::Char` leaf records
    /// (GPMF's string convention: `struct_size == 1`, `repeat` == length).
    pub text: Option<String>,
}

/// A time-sorted collection of `Sample`s, queryable by `FourCC`.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    samples: Vec<Sample>,
    /// Per-key read cursor for `next_sample` (§4.3 "Query operations").
    cursors: HashMap<FourCC, usize>,
}

impl Timeline {
    pub fn new() -> Self {
        Timeline { samples: Vec::new(), cursors: HashMap::new() }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn all(&self) -> &[Sample] {
        &self.samples
    }

    /// All samples keyed `fourcc`, in time order.
    pub fn by_fourcc(&self, fourcc: FourCC) -> impl Iterator<Item = &Sample> {
        self.samples.iter().filter(move |s| s.fourcc == fourcc)
    }

    /// Number of samples keyed `fourcc`.
    pub fn sample_count(&self, fourcc: FourCC) -> usize {
        self.by_fourcc(fourcc).count()
    }

    /// The `index`-th sample keyed `fourcc`, in time order.
    pub fn sample(&self, fourcc: FourCC, index: usize) -> Result<&Sample, GpmfError> {
        self.by_fourcc(fourcc).nth(index).ok_or(GpmfError::TypeNotFound)
    }

    /// Stateful per-key cursor: returns the next not-yet-returned sample
    /// keyed `fourcc`, advancing that key's cursor. Independent cursors
    /// per key (§4.3).
    pub fn next_sample(&mut self, fourcc: FourCC) -> Result<&Sample, GpmfError> {
        let cursor = self.cursors.entry(fourcc).or_insert(0);
        let index = *cursor;
        let found = self.samples.iter().filter(|s| s.fourcc == fourcc).nth(index);
        if found.is_some() {
            *cursor += 1;
        }
        // Re-borrow immutably now that the cursor update is done.
        self.samples.iter().filter(|s| s.fourcc == fourcc).nth(index).ok_or(GpmfError::TypeNotFound)
    }

    /// Every distinct device name present on the timeline, insertion order.
    pub fn device_names(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for s in &self.samples {
            if let Some(name) = s.device_name.as_deref() {
                if !seen.contains(&name) {
                    seen.push(name);
                }
            }
        }
        seen
    }

    /// Every distinct FourCC key present on the timeline, insertion order.
    pub fn fourcc_keys(&self) -> Vec<FourCC> {
        let mut seen = Vec::new();
        for s in &self.samples {
            if !seen.contains(&s.fourcc) {
                seen.push(s.fourcc);
            }
        }
        seen
    }

    /// Clear all samples and cursors (§4.3 "reset").
    pub fn reset(&mut self) {
        self.samples.clear();
        self.cursors.clear();
    }

    /// Sort stably by time; `Time::Global` samples (no real ordering)
    /// retain their original relative order and precede timed ones.
    pub fn sort_by_time(&mut self) {
        self.samples.sort_by(|a, b| match (a.time, b.time) {
            (Time::At(x), Time::At(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
            (Time::Global, Time::Global) => std::cmp::Ordering::Equal,
            (Time::Global, Time::At(_)) => std::cmp::Ordering::Less,
            (Time::At(_), Time::Global) => std::cmp::Ordering::Greater,
        });
    }

    /// Write this timeline as JSON (§4.3 "export", §6 "JSON export").
    pub fn export(&self, writer: impl std::io::Write, kind: ExportKind) -> Result<(), GpmfError> {
        export::export(self, writer, kind)
    }

    /// Infer this key's sample rate from its `TSMP`/`STMP` siblings
    /// across the first and last payload that carried it (§4.3 "Sample-
    /// rate inference across payloads"). Falls back to the coarse
    /// per-segment rate already attached to its samples when no
    /// `STMP`/`TSMP` pair is available.
    pub fn infer_rate(&self, fourcc: FourCC) -> Option<KeyRate> {
        rate::infer_rate(self, fourcc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(fourcc: FourCC, time: Time) -> Sample {
        Sample {
            fourcc,
            type_tag: TypeTag::Float,
            struct_size: 4,
            elements_in_struct: 1,
            repeat: 1,
            count: 1,
            device_id: 1,
            device_name: None,
            time,
            rate: None,
            tsmp: None,
            stmp: None,
            values: vec![],
            text: None,
        }
    }

    #[test]
    fn sorts_timed_samples_and_keeps_global_first() {
        let mut timeline = Timeline::new();
        timeline.push(sample(FourCC::GPS5, Time::At(2.0)));
        timeline.push(sample(FourCC::GPS5, Time::Global));
        timeline.push(sample(FourCC::GPS5, Time::At(1.0)));
        timeline.sort_by_time();

        let times: Vec<_> = timeline.all().iter().map(|s| s.time).collect();
        assert_eq!(times, vec![Time::Global, Time::At(1.0), Time::At(2.0)]);
    }

    #[test]
    fn filters_by_fourcc() {
        let mut timeline = Timeline::new();
        timeline.push(sample(FourCC::GPS5, Time::At(0.0)));
        timeline.push(sample(FourCC::ACCL, Time::At(0.0)));
        assert_eq!(timeline.by_fourcc(FourCC::GPS5).count(), 1);
    }

    #[test]
    fn next_sample_has_independent_cursor_per_key() {
        let mut timeline = Timeline::new();
        timeline.push(sample(FourCC::GPS5, Time::At(0.0)));
        timeline.push(sample(FourCC::GPS5, Time::At(1.0)));
        timeline.push(sample(FourCC::ACCL, Time::At(0.0)));

        assert_eq!(timeline.next_sample(FourCC::GPS5).unwrap().time, Time::At(0.0));
        assert_eq!(timeline.next_sample(FourCC::ACCL).unwrap().time, Time::At(0.0));
        assert_eq!(timeline.next_sample(FourCC::GPS5).unwrap().time, Time::At(1.0));
        assert!(timeline.next_sample(FourCC::ACCL).is_err());
    }

    #[test]
    fn empty_timeline_reports_zero_samples_and_no_next() {
        let mut timeline = Timeline::new();
        assert_eq!(timeline.sample_count(FourCC::GPS5), 0);
        assert!(timeline.next_sample(FourCC::GPS5).is_err());
    }

    #[test]
    fn reset_clears_samples_and_cursors() {
        let mut timeline = Timeline::new();
        timeline.push(sample(FourCC::GPS5, Time::At(0.0)));
        timeline.next_sample(FourCC::GPS5).unwrap();
        timeline.reset();
        assert_eq!(timeline.len(), 0);
        assert!(timeline.next_sample(FourCC::GPS5).is_err());
    }
}
