//! Color values for choropleth ramps.

use std::fmt;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Simple RGB color, serialized as a CSS hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn parse_hex(text: &str) -> Result<Self> {
        let hex = text.trim().trim_start_matches('#');
        if !hex.is_ascii() { bail!("Invalid color {text:?}") }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => bail!("Invalid color {text:?}: expected #rgb or #rrggbb"),
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16)
            .with_context(|| format!("Invalid color {text:?}"));
        Ok(Self { r: channel(0)?, g: channel(2)?, b: channel(4)? })
    }

    /// Linear interpolation in RGB space, `t` clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb { r: mix(self.r, other.r), g: mix(self.g, other.g), b: mix(self.b, other.b) }
    }
}

impl fmt::Display for Rgb {
    /// Format as CSS: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = anyhow::Error;
    fn try_from(value: String) -> Result<Self> { Self::parse_hex(&value) }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self { value.to_string() }
}

/// Sample `count` colors evenly along a piecewise-linear ramp through `stops`.
pub fn sample_ramp(stops: &[Rgb], count: usize) -> Vec<Rgb> {
    match (stops, count) {
        (_, 0) | ([], _) => Vec::new(),
        ([only], _) => vec![*only; count],
        (_, 1) => vec![stops[0]],
        _ => (0..count).map(|i| {
            let position = i as f64 / (count - 1) as f64 * (stops.len() - 1) as f64;
            let lower = (position.floor() as usize).min(stops.len() - 2);
            stops[lower].lerp(stops[lower + 1], position - lower as f64)
        }).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let color = Rgb::parse_hex("#fb6a4a").unwrap();
        assert_eq!(color, Rgb::new(0xfb, 0x6a, 0x4a));
        assert_eq!(color.to_string(), "#fb6a4a");
        assert_eq!(Rgb::parse_hex("FFF").unwrap(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(Rgb::parse_hex("#12345").is_err());
        assert!(Rgb::parse_hex("#zzzzzz").is_err());
        assert!(serde_json::from_str::<Rgb>("\"red\"").is_err());
    }

    #[test]
    fn ramp_endpoints_match_stops() {
        let stops = [Rgb::new(0, 0, 0), Rgb::new(100, 100, 100), Rgb::new(200, 0, 0)];
        let ramp = sample_ramp(&stops, 5);
        assert_eq!(ramp.len(), 5);
        assert_eq!(ramp[0], stops[0]);
        assert_eq!(ramp[2], stops[1]);
        assert_eq!(ramp[4], stops[2]);
        assert_eq!(ramp[1], Rgb::new(50, 50, 50));
    }
}
