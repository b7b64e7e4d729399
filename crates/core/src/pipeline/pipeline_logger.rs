use std::collections::BTreeMap;
use std::time::Instant;

/// Stage names reported through [`PipelineLogger::timing`].
pub const STAGE_ANALYZE: &str = "analyze";
pub const STAGE_CLASSIFY: &str = "classify";
pub const STAGE_DISPLAY: &str = "display";

/// Metric name for the number of faces annotated in a frame.
pub const METRIC_FACES: &str = "faces";

/// Observer for the annotation loop.
///
/// Lets the CLI report throughput while tests run the loop silently.
pub trait PipelineLogger: Send {
    /// Report that `frames` frames have been processed so far.
    ///
    /// A live camera has no known total.
    fn progress(&mut self, frames: usize);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a per-frame metric such as the face count.
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _frames: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Running total of one timing or metric. Only the sum and count are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningStat {
    sum: f64,
    count: usize,
}

impl RunningStat {
    pub fn record(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Collects per-stage timings and metrics and writes them through `log`.
///
/// A progress line is logged every `log_every` frames.
pub struct StdoutPipelineLogger {
    log_every: usize,
    timings: BTreeMap<String, RunningStat>,
    metrics: BTreeMap<String, RunningStat>,
    start_time: Instant,
    frames: usize,
}

impl StdoutPipelineLogger {
    pub fn new(log_every: usize) -> Self {
        Self {
            log_every: log_every.max(1),
            timings: BTreeMap::new(),
            metrics: BTreeMap::new(),
            start_time: Instant::now(),
            frames: 0,
        }
    }

    /// Returns the formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.frames;
        let mut lines = vec![format!(
            "Run summary ({frames} frames, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        for (stage, stat) in &self.timings {
            lines.push(format!(
                "  {stage:10}: avg {:6.1}ms  total {:7.0}ms",
                stat.mean(),
                stat.sum()
            ));
        }

        for (name, stat) in &self.metrics {
            lines.push(format!("  {name}: avg {:.1}", stat.mean()));
        }

        if frames > 0 && elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<RunningStat> {
        self.timings.get(stage).copied()
    }

    pub fn metrics_for(&self, name: &str) -> Option<RunningStat> {
        self.metrics.get(name).copied()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, frames: usize) {
        self.frames = frames;
        if frames > 0 && frames % self.log_every == 0 {
            let secs = self.start_time.elapsed().as_secs_f64();
            if secs > 0.0 {
                log::info!("Processed {frames} frames ({:.1} fps)", frames as f64 / secs);
            } else {
                log::info!("Processed {frames} frames");
            }
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .record(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .record(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
