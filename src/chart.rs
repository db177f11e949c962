/// One plotted sample: 1-based character index and latency in ms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub index: usize,
    pub latency_ms: f64,
}

impl ChartPoint {
    pub fn new(index: usize, latency_ms: f64) -> Self {
        Self { index, latency_ms }
    }
}

impl From<ChartPoint> for (f64, f64) {
    fn from(p: ChartPoint) -> Self {
        (p.index as f64, p.latency_ms)
    }
}

const MAX_X_TICKS: usize = 10;
const Y_TICKS: usize = 5;

/// Plain data for the live vs ghost latency chart. Rebuilt from scratch on
/// every render, so repeated renders of the same sequences are identical.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonChart {
    pub live: Vec<(f64, f64)>,
    pub ghost: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ComparisonChart {
    pub fn new(live: &[f64], ghost: &[f64]) -> Self {
        let live = to_points(live);
        let ghost = to_points(ghost);

        let longest = live.len().max(ghost.len()).max(1);
        let highest = live
            .iter()
            .chain(ghost.iter())
            .map(|&(_, latency)| latency)
            .fold(0.0_f64, f64::max);

        Self {
            live,
            ghost,
            x_bounds: [1.0, longest as f64],
            y_bounds: [0.0, nice_ceiling(highest)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty() && self.ghost.is_empty()
    }

    /// Evenly spaced integer x ticks, at most eleven of them
    pub fn x_ticks(&self) -> Vec<f64> {
        let [lo, hi] = self.x_bounds;
        let span = (hi - lo) as usize;
        if span == 0 {
            return vec![lo];
        }
        let intervals = (1..=MAX_X_TICKS.min(span))
            .rev()
            .find(|k| span % k == 0)
            .unwrap_or(1);
        let step = span / intervals;
        (0..=intervals).map(|i| lo + (i * step) as f64).collect()
    }

    pub fn y_ticks(&self) -> Vec<f64> {
        let [lo, hi] = self.y_bounds;
        (0..=Y_TICKS)
            .map(|i| lo + (hi - lo) * i as f64 / Y_TICKS as f64)
            .collect()
    }
}

fn to_points(latencies: &[f64]) -> Vec<(f64, f64)> {
    latencies
        .iter()
        .enumerate()
        .map(|(i, &latency)| ChartPoint::new(i + 1, latency).into())
        .collect()
}

/// Round `value` up to a 1, 2 or 5 multiple of a power of ten, the way a
/// linear scale picks a ten-tick step. Non-positive input yields 1.
pub fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let raw_step = value / 10.0;
    let power = 10f64.powf(raw_step.log10().floor());
    let error = raw_step / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    let step = factor * power;
    (value / step).ceil() * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequences() {
        let chart = ComparisonChart::new(&[], &[]);
        assert!(chart.is_empty());
        assert_eq!(chart.x_bounds, [1.0, 1.0]);
        assert_eq!(chart.y_bounds, [0.0, 1.0]);
        assert_eq!(chart.x_ticks(), vec![1.0]);
    }

    #[test]
    fn test_points_are_one_indexed() {
        let chart = ComparisonChart::new(&[120.0, 80.0], &[300.0]);
        assert_eq!(chart.live, vec![(1.0, 120.0), (2.0, 80.0)]);
        assert_eq!(chart.ghost, vec![(1.0, 300.0)]);
    }

    #[test]
    fn test_x_domain_uses_longer_series() {
        let chart = ComparisonChart::new(&[1.0, 2.0], &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(chart.x_bounds, [1.0, 5.0]);
        let chart = ComparisonChart::new(&[1.0; 7], &[1.0, 2.0]);
        assert_eq!(chart.x_bounds, [1.0, 7.0]);
    }

    #[test]
    fn test_y_domain_covers_both_series() {
        let chart = ComparisonChart::new(&[900.0], &[310.0, 280.0]);
        assert!(chart.y_bounds[1] >= 900.0);
        let chart = ComparisonChart::new(&[100.0], &[487.3]);
        assert_eq!(chart.y_bounds, [0.0, 500.0]);
    }

    #[test]
    fn test_live_only_has_y_domain() {
        let chart = ComparisonChart::new(&[250.0, 120.0], &[]);
        assert!(!chart.is_empty());
        assert_eq!(chart.y_bounds, [0.0, 260.0]);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let live = [210.0, 190.5, 330.0];
        let ghost = [300.0, 280.0];
        assert_eq!(
            ComparisonChart::new(&live, &ghost),
            ComparisonChart::new(&live, &ghost)
        );
    }

    #[test]
    fn test_nice_ceiling() {
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(-3.0), 1.0);
        assert_eq!(nice_ceiling(450.0), 450.0);
        assert_eq!(nice_ceiling(487.3), 500.0);
        assert_eq!(nice_ceiling(593.8), 600.0);
        assert_eq!(nice_ceiling(7.0), 7.0);
    }

    #[test]
    fn test_x_ticks() {
        let chart = ComparisonChart::new(&[1.0; 4], &[]);
        assert_eq!(chart.x_ticks(), vec![1.0, 2.0, 3.0, 4.0]);

        let chart = ComparisonChart::new(&[1.0; 40], &[]);
        assert_eq!(chart.x_ticks(), vec![1.0, 14.0, 27.0, 40.0]);

        let chart = ComparisonChart::new(&[1.0; 21], &[]);
        assert_eq!(chart.x_ticks().len(), 11);
    }

    #[test]
    fn test_y_ticks() {
        let chart = ComparisonChart::new(&[], &[500.0]);
        assert_eq!(
            chart.y_ticks(),
            vec![0.0, 100.0, 200.0, 300.0, 400.0, 500.0]
        );
    }
}
