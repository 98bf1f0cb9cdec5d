//! Scale Mapper
//! Band and linear mappings from data space to pixel space.

/// Default padding fraction between and around bands.
pub const DEFAULT_BAND_PADDING: f64 = 0.1;

/// Categorical scale dividing a pixel range into equal-width, padded
/// slots, one per discrete month key. Domain order is the order given.
#[derive(Debug, Clone)]
pub struct BandScale {
    domain: Vec<f64>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Build a band scale over `domain` across the pixel interval
    /// `[range_start, range_end]` with `padding` inserted between and
    /// around bands as a fraction of the step.
    pub fn new(domain: Vec<f64>, range_start: f64, range_end: f64, padding: f64) -> Self {
        let n = domain.len() as f64;
        let width = range_end - range_start;
        let step = width / (n - padding + 2.0 * padding).max(1.0);
        let bandwidth = step * (1.0 - padding);
        // Center the bands within the range (align 0.5).
        let start = range_start + (width - step * (n - padding)) / 2.0;

        Self {
            domain,
            start,
            step,
            bandwidth,
        }
    }

    /// Starting pixel of `month`'s band, or `None` when the month is not
    /// in the domain. Never a silent zero.
    pub fn position(&self, month: f64) -> Option<f64> {
        let idx = self
            .domain
            .iter()
            .position(|m| m.to_bits() == month.to_bits())?;
        Some(self.start + self.step * idx as f64)
    }

    /// Shared band width.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    /// Center pixel of each band, for tick placement.
    pub fn band_centers(&self) -> Vec<(f64, f64)> {
        self.domain
            .iter()
            .enumerate()
            .map(|(i, &m)| (m, self.start + self.step * i as f64 + self.bandwidth / 2.0))
            .collect()
    }
}

/// Affine transform from a numeric domain interval to a pixel range
/// interval. The vertical range is handed in inverted (screen
/// coordinates grow downward).
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Interpolate `v` from domain to range. A degenerate domain maps
    /// every value to the start of the range without dividing by zero.
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Tick values at a round step, covering the domain.
    pub fn ticks(&self, target_steps: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let span = d1 - d0;
        if !(span > 0.0) || !span.is_finite() {
            return vec![d0];
        }

        let step = nice_step(span, target_steps);
        let mut ticks = Vec::new();
        let mut v = (d0 / step).ceil() * step;
        while v <= d1 + step * 1e-9 {
            ticks.push(v);
            v += step;
        }
        ticks
    }
}

/// Round a raw step up to a 1/2/5 multiple of a power of ten.
fn nice_step(range: f64, target_steps: usize) -> f64 {
    let raw_step = range / target_steps as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_bands_tile_the_range() {
        let domain: Vec<f64> = (1..=12).map(|m| m as f64).collect();
        let k = domain.len() as f64;
        let scale = BandScale::new(domain, 150.0, 950.0, DEFAULT_BAND_PADDING);

        // k bands plus k-1 inner gaps and two outer pads account for the
        // full range.
        let step = scale.bandwidth() / (1.0 - DEFAULT_BAND_PADDING);
        let padding_total = (k + 1.0) * DEFAULT_BAND_PADDING * step;
        assert!((k * scale.bandwidth() + padding_total - 800.0).abs() < EPS);
        assert!(scale.bandwidth() > 0.0);
    }

    #[test]
    fn test_bands_do_not_overlap() {
        let domain = vec![1.0, 2.0, 3.0, 4.0];
        let scale = BandScale::new(domain.clone(), 0.0, 400.0, DEFAULT_BAND_PADDING);

        for pair in domain.windows(2) {
            let left_end = scale.position(pair[0]).unwrap() + scale.bandwidth();
            let right_start = scale.position(pair[1]).unwrap();
            assert!(left_end < right_start + EPS);
        }
    }

    #[test]
    fn test_band_positions_follow_domain_order() {
        // Domain order is whatever the caller hands in, not sorted.
        let scale = BandScale::new(vec![3.0, 1.0, 2.0], 0.0, 300.0, DEFAULT_BAND_PADDING);
        let p3 = scale.position(3.0).unwrap();
        let p1 = scale.position(1.0).unwrap();
        let p2 = scale.position(2.0).unwrap();
        assert!(p3 < p1 && p1 < p2);
    }

    #[test]
    fn test_out_of_domain_month_is_an_error_condition() {
        let scale = BandScale::new(vec![1.0, 2.0], 0.0, 100.0, DEFAULT_BAND_PADDING);
        assert_eq!(scale.position(7.0), None);
    }

    #[test]
    fn test_empty_domain_does_not_panic() {
        let scale = BandScale::new(Vec::new(), 150.0, 950.0, DEFAULT_BAND_PADDING);
        assert_eq!(scale.position(1.0), None);
        assert!(scale.band_centers().is_empty());
    }

    #[test]
    fn test_linear_maps_domain_ends_to_range_ends() {
        // Inverted pixel range: larger values map to smaller y.
        let scale = LinearScale::new((0.0, 150.0), (470.0, 50.0));
        assert!((scale.map(0.0) - 470.0).abs() < EPS);
        assert!((scale.map(150.0) - 50.0).abs() < EPS);
        assert!((scale.map(75.0) - 260.0).abs() < EPS);
    }

    #[test]
    fn test_linear_is_monotonically_non_increasing() {
        let scale = LinearScale::new((0.0, 100.0), (470.0, 50.0));
        let mut last = f64::INFINITY;
        for v in 0..=10 {
            let y = scale.map(v as f64 * 10.0);
            assert!(y <= last);
            last = y;
        }
    }

    #[test]
    fn test_degenerate_linear_domain_pins_to_range_start() {
        let scale = LinearScale::new((0.0, 0.0), (470.0, 50.0));
        assert_eq!(scale.map(0.0), 470.0);
        assert_eq!(scale.map(123.0), 470.0);
    }

    #[test]
    fn test_ticks_cover_the_domain_at_a_round_step() {
        let scale = LinearScale::new((0.0, 150.0), (470.0, 50.0));
        let ticks = scale.ticks(8);
        assert_eq!(ticks.first(), Some(&0.0));
        assert!(*ticks.last().unwrap() <= 150.0 + EPS);
        assert!(ticks.len() > 2);
    }

    #[test]
    fn test_ticks_on_degenerate_domain() {
        let scale = LinearScale::new((0.0, 0.0), (470.0, 50.0));
        assert_eq!(scale.ticks(8), vec![0.0]);
    }
}
