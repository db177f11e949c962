use crate::util::{mean, median, std_dev};

/// Simple descriptive statistics of one latency sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
}

impl LatencySummary {
    pub fn new(latencies: &[f64]) -> Self {
        Self {
            count: latencies.len(),
            mean: mean(latencies),
            median: median(latencies),
            std_dev: std_dev(latencies),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub live: LatencySummary,
    pub ghost: LatencySummary,
    pub accuracy: f64,
}

impl SessionSummary {
    pub fn new(live: &[f64], ghost: &[f64], accuracy: f64) -> Self {
        Self {
            live: LatencySummary::new(live),
            ghost: LatencySummary::new(ghost),
            accuracy,
        }
    }

    /// Mean live latency minus mean ghost latency; positive means slower than the persona
    pub fn pace_delta(&self) -> Option<f64> {
        Some(self.live.mean? - self.ghost.mean?)
    }

    pub fn describe(&self) -> String {
        let avg = |m: Option<f64>| m.map_or("-".to_string(), |v| format!("{v:.0} ms"));
        let delta = match self.pace_delta() {
            Some(d) if d.abs() < 0.5 => "even pace".to_string(),
            Some(d) if d > 0.0 => format!("{d:.0} ms slower"),
            Some(d) => format!("{:.0} ms faster", d.abs()),
            None => "no comparison yet".to_string(),
        };
        format!(
            "you {} avg   persona {} avg   {}   {}% acc",
            avg(self.live.mean),
            avg(self.ghost.mean),
            delta,
            self.accuracy
        )
    }

    /// Median and standard deviation of both sequences
    pub fn describe_spread(&self) -> String {
        let ms = |m: Option<f64>| m.map_or("-".to_string(), |v| format!("{v:.0} ms"));
        format!(
            "median you {} / persona {}   sd you {} / persona {}",
            ms(self.live.median),
            ms(self.ghost.median),
            ms(self.live.std_dev),
            ms(self.ghost.std_dev)
        )
    }
}
