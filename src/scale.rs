//! Cartographic map scales and the unit conversions between image pixels,
//! printed pixels and real-world meters.
//!
//! A map scale `1:S` means one millimeter on paper stands for `S` millimeters
//! (`S / 1000` meters) on the ground. At a print resolution of `dpi` there are
//! `dpi / 25.4` printed pixels per millimeter, so reproducing `1:S` needs
//! `(dpi / 25.4) * 1000 / S` printed pixels per real-world meter.

use core::fmt;
use core::num::NonZeroU32;
use core::str::FromStr;

use crate::paper::pixels_per_mm;

/// A map scale `1:denominator`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MapScale(NonZeroU32);

impl MapScale {
    /// Standard scale denominators, largest map first.
    pub const STANDARD: [Self; 14] = [
        Self::of(100),
        Self::of(200),
        Self::of(250),
        Self::of(500),
        Self::of(1_000),
        Self::of(2_000),
        Self::of(2_500),
        Self::of(5_000),
        Self::of(10_000),
        Self::of(25_000),
        Self::of(50_000),
        Self::of(100_000),
        Self::of(250_000),
        Self::of(500_000),
    ];

    /// Scale `1:denominator`. Returns `None` for zero.
    pub const fn new(denominator: u32) -> Option<Self> {
        match NonZeroU32::new(denominator) {
            Some(d) => Some(Self(d)),
            None => None,
        }
    }

    // Only for the constant table above; a zero here fails const evaluation.
    const fn of(denominator: u32) -> Self {
        match Self::new(denominator) {
            Some(s) => s,
            None => panic!("map scale denominator must be non-zero"),
        }
    }

    /// The `S` in `1:S`.
    pub const fn denominator(self) -> u32 {
        self.0.get()
    }

    /// Whether this is one of [`STANDARD`](Self::STANDARD).
    pub fn is_standard(self) -> bool {
        Self::STANDARD.contains(&self)
    }

    /// Printed pixels per real-world meter needed to reproduce this scale at `dpi`.
    pub fn target_pixels_per_meter(self, dpi: u32) -> f64 {
        pixels_per_mm(dpi) * 1000.0 / self.denominator() as f64
    }

    /// Uniform factor to apply to an image with `pixels_per_meter` so that
    /// printing it at `dpi` reproduces this scale exactly.
    pub fn required_factor(self, dpi: u32, pixels_per_meter: f64) -> f64 {
        pixels_per_mm(dpi) * 1000.0 / (pixels_per_meter * self.denominator() as f64)
    }
}

/// Map scale denominator produced by printing an image whose (already
/// scaled) density is `printed_pixels_per_meter` at `dpi`.
///
/// Unrounded; callers round for display. Non-positive densities give a
/// non-finite or negative ratio and must be rejected before calling.
pub fn scale_ratio(dpi: u32, printed_pixels_per_meter: f64) -> f64 {
    pixels_per_mm(dpi) / printed_pixels_per_meter * 1000.0
}

impl fmt::Display for MapScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1:{}", self.denominator())
    }
}

/// Error parsing a [`MapScale`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidMapScale;

impl fmt::Display for InvalidMapScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid map scale (expected a positive denominator like 2000 or 1:2000)")
    }
}

impl core::error::Error for InvalidMapScale {}

impl FromStr for MapScale {
    type Err = InvalidMapScale;

    /// Accepts `"2000"` or `"1:2000"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix("1:").unwrap_or(s);
        digits
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or(InvalidMapScale)
    }
}
