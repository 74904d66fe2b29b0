use serde::{Deserialize, Serialize};
use tracing::debug;

use super::color::{sample_ramp, Rgb};

/// Light-to-dark red ramp used for arrival totals.
pub const DEFAULT_PALETTE: [Rgb; 3] = [
    Rgb::new(0xfd, 0xe0, 0xdd),
    Rgb::new(0xfc, 0xae, 0x91),
    Rgb::new(0xfb, 0x6a, 0x4a),
];

/// How choropleth breakpoints are chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ScalePolicy {
    /// Three breaks at the sample's min, rounded midpoint and max.
    #[default]
    MinMidMax,
    /// `classes` equal-size quantile breaks over the strictly positive values.
    Quantile { classes: usize },
    /// Constant breaks chosen from domain knowledge.
    Fixed { breaks: Vec<f64> },
}

/// One breakpoint of a [`ColorScale`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleStop {
    pub threshold: f64,
    pub color: Rgb,
}

/// Ordered (threshold, color) pairs with strictly increasing thresholds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    stops: Vec<ScaleStop>,
}

impl ColorScale {
    /// Pair thresholds with colors, repairing any non-increasing neighbors.
    /// Non-finite thresholds are dropped. Never empty: with no usable
    /// threshold a single stop at 0 is used.
    pub fn new(thresholds: &[f64], colors: &[Rgb]) -> Self {
        let mut thresholds: Vec<f64> = thresholds.iter().copied().filter(|t| t.is_finite()).collect();
        if thresholds.is_empty() { thresholds.push(0.0) }
        repair_thresholds(&mut thresholds);

        let palette = if colors.is_empty() { &DEFAULT_PALETTE[..] } else { colors };
        let colors = if palette.len() == thresholds.len() {
            palette.to_vec()
        } else {
            sample_ramp(palette, thresholds.len())
        };

        Self {
            stops: thresholds.into_iter().zip(colors)
                .map(|(threshold, color)| ScaleStop { threshold, color })
                .collect(),
        }
    }

    #[inline] pub fn stops(&self) -> &[ScaleStop] { &self.stops }

    pub fn thresholds(&self) -> Vec<f64> {
        self.stops.iter().map(|s| s.threshold).collect()
    }

    #[inline] pub fn lowest_color(&self) -> Rgb { self.stops[0].color }

    #[inline] pub fn highest_color(&self) -> Rgb { self.stops[self.stops.len() - 1].color }

    /// Color of the highest breakpoint not exceeding `value`.
    /// Zero, negative and NaN values get the lowest color.
    pub fn color_for(&self, value: f64) -> Rgb {
        if !(value > 0.0) { return self.lowest_color() }
        self.stops.iter()
            .rev()
            .find(|stop| stop.threshold <= value)
            .map_or(self.lowest_color(), |stop| stop.color)
    }

    /// Linear interpolation between the neighboring stops, clamped at both ends.
    pub fn interpolate(&self, value: f64) -> Rgb {
        if !(value > self.stops[0].threshold) { return self.lowest_color() }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if value <= hi.threshold {
                let t = (value - lo.threshold) / (hi.threshold - lo.threshold);
                return lo.color.lerp(hi.color, t);
            }
        }
        self.highest_color()
    }
}

/// Bump every threshold that does not exceed its predecessor to the smallest
/// value above it.
pub fn repair_thresholds(thresholds: &mut [f64]) {
    for i in 1..thresholds.len() {
        if !(thresholds[i] > thresholds[i - 1]) {
            thresholds[i] = next_up(thresholds[i - 1]);
        }
    }
}

/// Smallest f64 greater than `x`.
fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY { return x }
    if x == 0.0 { return f64::from_bits(1) }
    let bits = x.to_bits();
    f64::from_bits(if x > 0.0 { bits + 1 } else { bits - 1 })
}

/// Build a color scale for the observed `values` under `policy`.
pub fn build_scale(values: &[f64], policy: &ScalePolicy, palette: &[Rgb]) -> ColorScale {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let thresholds = match policy {
        ScalePolicy::MinMidMax => min_mid_max(&values),
        ScalePolicy::Quantile { classes } => quantile_breaks(&values, *classes),
        ScalePolicy::Fixed { breaks } => breaks.clone(),
    };
    let scale = ColorScale::new(&thresholds, palette);
    debug!("[scale] {:?} breaks {:?}", policy, scale.thresholds());
    scale
}

/// Lookup helper mirroring [`ColorScale::color_for`].
#[inline]
pub fn color_for(value: f64, scale: &ColorScale) -> Rgb {
    scale.color_for(value)
}

/// `[min, round((min + max) / 2), max]`, or `[0, 1, 1]` for an empty sample.
fn min_mid_max(values: &[f64]) -> Vec<f64> {
    if values.is_empty() { return vec![0.0, 1.0, 1.0] }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    vec![min, ((min + max) / 2.0).round(), max]
}

/// `classes` breaks at evenly spaced ranks of the sorted positive values,
/// first at the smallest and last at the largest.
fn quantile_breaks(values: &[f64], classes: usize) -> Vec<f64> {
    let classes = classes.max(1);
    let mut positive: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
    if positive.is_empty() { return vec![0.0; classes] }
    positive.sort_by(f64::total_cmp);

    if classes == 1 { return vec![positive[0]] }
    let last = positive.len() - 1;
    (0..classes)
        .map(|i| positive[(i as f64 * last as f64 / (classes - 1) as f64).round() as usize])
        .collect()
}
