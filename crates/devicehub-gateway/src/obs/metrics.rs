//! Metrics registry for the device service.
//!
//! Counter/gauge/histogram types with dynamic labels are backed by `DashMap`.
//! Labels are flattened into sorted key vectors and series are sorted before
//! rendering so scrapes are deterministic. Durations are accumulated in
//! microseconds and rendered in seconds.

use dashmap::DashMap;
use std::collections::VecDeque;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

const NAMESPACE: &str = "myapp";

/// Request duration buckets, seconds.
pub const REQUEST_DURATION_BUCKETS: [f64; 5] = [0.1, 0.15, 0.2, 0.25, 0.3];

/// Login summary quantiles.
pub const LOGIN_QUANTILES: [f64; 3] = [0.5, 0.9, 0.99];

/// Samples kept for summary quantiles.
const SUMMARY_WINDOW: usize = 1024;

type LabelKey = Vec<(String, String)>;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_pairs(key: &LabelKey) -> Vec<String> {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect()
}

/// `{a="b",c="d"}`, or nothing for an unlabeled series.
fn label_block(key: &LabelKey) -> String {
    if key.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", label_pairs(key).join(","))
    }
}

fn header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

fn micros_to_secs(us: u64) -> f64 {
    us as f64 / 1_000_000.0
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value of one series (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "counter");
        let mut rows: Vec<(LabelKey, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (key, val) in rows {
            let _ = writeln!(out, "{}{} {}", name, label_block(&key), val);
        }
    }
}

/// Unlabeled gauge.
#[derive(Default)]
pub struct Gauge {
    value: AtomicI64,
}

impl Gauge {
    pub fn set(&self, v: i64) {
        self.value.store(v, Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "gauge");
        let _ = writeln!(out, "{} {}", name, self.get());
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    /// Overwrite one series.
    pub fn set(&self, labels: &[(&str, &str)], v: i64) {
        self.map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0))
            .store(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> Option<i64> {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "gauge");
        let mut rows: Vec<(LabelKey, i64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (key, val) in rows {
            let _ = writeln!(out, "{}{} {}", name, label_block(&key), val);
        }
    }
}

struct AtomicHistogram {
    count: AtomicU64,
    sum_micros: AtomicU64,
    buckets: Vec<AtomicU64>,
}

impl AtomicHistogram {
    fn new(n: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_micros: AtomicU64::new(0),
            buckets: (0..n).map(|_| AtomicU64::new(0)).collect(),
        }
    }
}

pub struct HistogramVec {
    bounds_micros: Vec<u64>,
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Upper bounds are given in seconds, ascending.
    pub fn with_buckets(bounds_secs: &[f64]) -> Self {
        Self {
            bounds_micros: bounds_secs
                .iter()
                .map(|s| (s * 1_000_000.0).round() as u64)
                .collect(),
            map: DashMap::new(),
        }
    }

    /// Observe a duration and increment cumulative buckets.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let n = self.bounds_micros.len();
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicHistogram::new(n));
        let us = micros(duration);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_micros.fetch_add(us, Ordering::Relaxed);

        // Cumulative: every bucket whose bound covers the value.
        for (i, &b) in self.bounds_micros.iter().enumerate() {
            if us <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Number of observations in one series.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "histogram");
        let mut keys: Vec<LabelKey> = self.map.iter().map(|r| r.key().clone()).collect();
        keys.sort();

        for key in keys {
            let Some(hist) = self.map.get(&key) else { continue };
            let pairs = label_pairs(&key);
            let prefix = if pairs.is_empty() {
                String::new()
            } else {
                format!("{},", pairs.join(","))
            };

            for (i, &le) in self.bounds_micros.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(
                    out,
                    "{}_bucket{{{}le=\"{}\"}} {}",
                    name,
                    prefix,
                    micros_to_secs(le),
                    count
                );
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = micros_to_secs(hist.sum_micros.load(Ordering::Relaxed));
            let labels = label_block(&key);
            let _ = writeln!(out, "{}_sum{} {}", name, labels, sum);
            let _ = writeln!(out, "{}_count{} {}", name, labels, count);
        }
    }
}

#[derive(Default)]
struct SummaryState {
    window: VecDeque<f64>,
    count: u64,
    sum: f64,
}

/// Unlabeled summary. Quantiles are computed over the most recent
/// `SUMMARY_WINDOW` observations; `_sum` and `_count` cover all of them.
pub struct Summary {
    quantiles: Vec<f64>,
    state: Mutex<SummaryState>,
}

impl Summary {
    pub fn with_quantiles(quantiles: &[f64]) -> Self {
        Self {
            quantiles: quantiles.to_vec(),
            state: Mutex::new(SummaryState::default()),
        }
    }

    pub fn observe(&self, duration: Duration) {
        let secs = duration.as_secs_f64();
        let mut st = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if st.window.len() == SUMMARY_WINDOW {
            st.window.pop_front();
        }
        st.window.push_back(secs);
        st.count += 1;
        st.sum += secs;
    }

    pub fn count(&self) -> u64 {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).count
    }

    /// Nearest-rank quantile over the sample window; `None` when empty.
    pub fn quantile(&self, q: f64) -> Option<f64> {
        let st = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let mut sorted: Vec<f64> = st.window.iter().copied().collect();
        drop(st);
        nearest_rank(&mut sorted, q)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "summary");
        let (mut sorted, count, sum) = {
            let st = self.state.lock().unwrap_or_else(|e| e.into_inner());
            (st.window.iter().copied().collect::<Vec<f64>>(), st.count, st.sum)
        };
        for &q in &self.quantiles {
            let v = nearest_rank(&mut sorted, q).unwrap_or(f64::NAN);
            let _ = writeln!(out, "{}{{quantile=\"{}\"}} {}", name, q, v);
        }
        let _ = writeln!(out, "{}_sum {}", name, sum);
        let _ = writeln!(out, "{}_count {}", name, count);
    }
}

fn nearest_rank(samples: &mut [f64], q: f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    samples.sort_by(|a, b| a.total_cmp(b));
    let rank = (q.clamp(0.0, 1.0) * samples.len() as f64).ceil() as usize;
    Some(samples[rank.saturating_sub(1).min(samples.len() - 1)])
}

/// Every metric the device service exports.
pub struct DeviceHubMetrics {
    pub devices: Gauge,
    pub info: GaugeVec,
    pub upgrades: CounterVec,
    pub duration: HistogramVec,
    pub login_duration: Summary,
}

impl Default for DeviceHubMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceHubMetrics {
    pub fn new() -> Self {
        Self {
            devices: Gauge::default(),
            info: GaugeVec::default(),
            upgrades: CounterVec::default(),
            duration: HistogramVec::with_buckets(&REQUEST_DURATION_BUCKETS),
            login_duration: Summary::with_quantiles(&LOGIN_QUANTILES),
        }
    }

    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.devices.render(
            &format!("{NAMESPACE}_connected_devices"),
            "Number of currently connected devices.",
            &mut out,
        );
        self.info.render(
            &format!("{NAMESPACE}_info"),
            "Information about the My App environment.",
            &mut out,
        );
        self.upgrades.render(
            &format!("{NAMESPACE}_device_upgrade_total"),
            "Number of upgraded devices.",
            &mut out,
        );
        self.duration.render(
            &format!("{NAMESPACE}_request_duration_seconds"),
            "Duration of the request.",
            &mut out,
        );
        self.login_duration.render(
            &format!("{NAMESPACE}_login_request_duration_seconds"),
            "Duration of the login request.",
            &mut out,
        );
        out
    }
}
