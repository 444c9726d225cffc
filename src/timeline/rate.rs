//! Sample-rate inference across payloads (§4.3 "Sample-rate inference
//! across payloads"): given the first and last payload that carried a
//! key, use their `TSMP`/`STMP` siblings to recover the key's true
//! sample rate, trying decade scales of the device timestamp clock
//! until one agrees with a coarse rate estimate.

use crate::constants::TIME_STAMP_SCALE_DECADES;
use crate::fourcc::FourCC;
use crate::timeline::{Time, Timeline};

/// Result of `Timeline::infer_rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyRate {
    /// Samples per second.
    pub rate: f64,
    /// `true` if this came from a `TSMP`/`STMP` regression rather than
    /// the coarse per-segment `repeat / (out - in)` fallback.
    pub precise: bool,
}

/// Infer `fourcc`'s sample rate (§4.3). Prefers the `TSMP`/`STMP` pair
/// from the first and last payload carrying the key; falls back to the
/// average of the coarse per-segment rates already attached to its
/// samples when no such pair exists.
pub fn infer_rate(timeline: &Timeline, fourcc: FourCC) -> Option<KeyRate> {
    let samples: Vec<_> = timeline.by_fourcc(fourcc).collect();
    if samples.is_empty() {
        return None;
    }

    let coarse = coarse_rate(&samples);

    // Distinct (tsmp, stmp) pairs in the order their payloads were
    // assembled (before the timeline's time-sort, so we recover this
    // from sample order isn't reliable after sort_by_time — instead we
    // rely on tsmp being monotonically non-decreasing across payloads,
    // which holds for any well-formed GPMF stream).
    let mut stamped: Vec<(u32, u64)> = samples
        .iter()
        .filter_map(|s| match (s.tsmp, s.stmp) {
            (Some(tsmp), Some(stmp)) => Some((tsmp, stmp)),
            _ => None,
        })
        .collect();
    stamped.dedup();

    if let (Some(&(start_tsmp, start_stmp)), Some(&(end_tsmp, end_stmp))) =
        (stamped.first(), stamped.last())
    {
        if end_tsmp > start_tsmp && end_stmp > start_stmp {
            if let Some(rate) = try_decade_scales(start_tsmp, end_tsmp, start_stmp, end_stmp, coarse) {
                return Some(KeyRate { rate, precise: true });
            }
        }
    }

    coarse.map(|rate| KeyRate { rate, precise: false })
}

/// Try each decade scale in turn (§4.3), accepting the first whose
/// resulting rate lies within ±10% of the coarse estimate. Falls back to
/// the first scale tried if no coarse estimate is available to compare
/// against.
fn try_decade_scales(start_tsmp: u32, end_tsmp: u32, start_stmp: u64, end_stmp: u64, coarse: Option<f64>) -> Option<f64> {
    let delta_samples = (end_tsmp - start_tsmp) as f64;
    let delta_stamp = (end_stmp - start_stmp) as f64;

    for scale in TIME_STAMP_SCALE_DECADES {
        let dt = delta_stamp / scale;
        if dt <= 0.0 {
            continue;
        }
        let rate = delta_samples / dt;
        match coarse {
            Some(c) if c > 0.0 => {
                if (rate - c).abs() <= 0.1 * c {
                    return Some(rate);
                }
            }
            _ => return Some(rate),
        }
    }
    None
}

/// Average of the coarse per-segment rates already stamped onto this
/// key's samples (§4.3 "compute `sample_rate_segment`").
fn coarse_rate(samples: &[&crate::timeline::Sample]) -> Option<f64> {
    let rates: Vec<f64> = samples.iter().filter_map(|s| s.rate).filter(|r| *r > 0.0).collect();
    if rates.is_empty() {
        return None;
    }
    Some(rates.iter().sum::<f64>() / rates.len() as f64)
}

/// Least-squares slope of cumulative sample count against payload end
/// time, used when no `STMP` is present anywhere on the key (§4.3,
/// "precise mode, a linear regression of cumulative sample count vs.
/// payload end-time"). `points` is `(payload_end_time_s, cumulative_count)`.
pub fn regression_rate(points: &[(f64, f64)]) -> Option<f64> {
    let n = points.len() as f64;
    if points.len() < 2 {
        return None;
    }
    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xx: f64 = points.iter().map(|(x, _)| x * x).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();

    let denom = n * sum_xx - sum_x * sum_x;
    if denom.abs() < f64::EPSILON {
        return None;
    }
    Some((n * sum_xy - sum_x * sum_y) / denom)
}

/// First/last timed sample of a key, ignoring `Time::Global` entries.
pub fn time_bounds(timeline: &Timeline, fourcc: FourCC) -> Option<(f64, f64)> {
    let times: Vec<f64> = timeline.by_fourcc(fourcc).filter_map(|s| s.time.seconds()).collect();
    match (times.first(), times.last()) {
        (Some(a), Some(b)) => Some((*a, *b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::klv::header::TypeTag;

    fn sample(tsmp: Option<u32>, stmp: Option<u64>, rate: Option<f64>, time: Time) -> crate::timeline::Sample {
        crate::timeline::Sample {
            fourcc: FourCC::GYRO,
            type_tag: TypeTag::Float,
            struct_size: 4,
            elements_in_struct: 1,
            repeat: 1,
            count: 1,
            device_id: 1,
            device_name: None,
            time,
            rate,
            tsmp,
            stmp,
            values: vec![],
            text: None,
        }
    }

    #[test]
    fn infers_rate_from_tsmp_stmp_jump() {
        let mut timeline = Timeline::new();
        // First payload: 0 -> 100 samples, 0ns.
        for i in 0..100 {
            timeline.push(sample(Some(100), Some(0), Some(200.0), Time::At(i as f64 / 200.0)));
        }
        // Second payload: 100 -> 200 samples, 1_000_000_000ns later.
        for i in 0..100 {
            timeline.push(sample(Some(200), Some(1_000_000_000), Some(200.0), Time::At(0.5 + i as f64 / 200.0)));
        }

        let inferred = infer_rate(&timeline, FourCC::GYRO).unwrap();
        assert!(inferred.precise);
        assert!((inferred.rate - 200.0).abs() / 200.0 < 0.01);
    }

    #[test]
    fn falls_back_to_coarse_rate_without_stmp() {
        let mut timeline = Timeline::new();
        timeline.push(sample(None, None, Some(100.0), Time::At(0.0)));
        timeline.push(sample(None, None, Some(100.0), Time::At(0.01)));

        let inferred = infer_rate(&timeline, FourCC::GYRO).unwrap();
        assert!(!inferred.precise);
        assert_eq!(inferred.rate, 100.0);
    }

    #[test]
    fn regression_recovers_slope() {
        // Cumulative count grows at 50/s.
        let points = vec![(0.0, 0.0), (1.0, 50.0), (2.0, 100.0)];
        let rate = regression_rate(&points).unwrap();
        assert!((rate - 50.0).abs() < 1e-9);
    }
}
