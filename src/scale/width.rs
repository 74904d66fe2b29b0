use serde::Serialize;

/// (count, line width in px) stops for route lines.
pub const DEFAULT_WIDTH_STOPS: [[f64; 2]; 4] = [
    [0.0, 1.5],
    [50_000.0, 3.5],
    [120_000.0, 6.0],
    [250_000.0, 9.0],
];

/// Piecewise-linear mapping from flow magnitude to line width.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WidthScale {
    stops: Vec<[f64; 2]>,
}

impl Default for WidthScale {
    fn default() -> Self {
        Self { stops: DEFAULT_WIDTH_STOPS.to_vec() }
    }
}

impl WidthScale {
    /// Stops are sorted by count; non-finite stops are dropped. An empty set
    /// falls back to the defaults.
    pub fn new(stops: &[[f64; 2]]) -> Self {
        let mut stops: Vec<[f64; 2]> = stops.iter().copied()
            .filter(|[count, width]| count.is_finite() && width.is_finite())
            .collect();
        if stops.is_empty() { return Self::default() }
        stops.sort_by(|a, b| a[0].total_cmp(&b[0]));
        stops.dedup_by(|b, a| a[0] == b[0]);
        Self { stops }
    }

    #[inline] pub fn stops(&self) -> &[[f64; 2]] { &self.stops }

    /// Width for a magnitude, clamped to the first and last stop.
    pub fn width_for(&self, count: f64) -> f64 {
        let first = self.stops[0];
        if !(count > first[0]) { return first[1] }
        for pair in self.stops.windows(2) {
            let ([c0, w0], [c1, w1]) = (pair[0], pair[1]);
            if count <= c1 { return w0 + (w1 - w0) * (count - c0) / (c1 - c0) }
        }
        self.stops[self.stops.len() - 1][1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_between_stops() {
        let scale = WidthScale::default();
        assert_eq!(scale.width_for(0.0), 1.5);
        assert_eq!(scale.width_for(25_000.0), 2.5);
        assert_eq!(scale.width_for(120_000.0), 6.0);
        assert_eq!(scale.width_for(1_000_000.0), 9.0);
        assert_eq!(scale.width_for(-10.0), 1.5);
        assert_eq!(scale.width_for(f64::NAN), 1.5);
    }

    #[test]
    fn unsorted_and_duplicate_stops_are_cleaned() {
        let scale = WidthScale::new(&[[100.0, 4.0], [0.0, 1.0], [100.0, 8.0], [f64::NAN, 2.0]]);
        assert_eq!(scale.stops(), &[[0.0, 1.0], [100.0, 4.0]]);
        assert_eq!(scale.width_for(50.0), 2.5);
        assert_eq!(WidthScale::new(&[]), WidthScale::default());
    }
}
