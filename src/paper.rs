//! A-series paper sizes, print orientation, and millimeter to pixel conversion.

use core::fmt;
use core::str::FromStr;

use num_traits::Float;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Highest resolution at which the longest A0 edge (1189 mm) still fits a
/// `u32` pixel count.
pub const MAX_DPI: u32 = 91_751_193;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width and height exchanged.
    pub const fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// ISO 216 A-series sheet, A0 (largest) through A3.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PaperSize {
    A0,
    A1,
    A2,
    A3,
}

impl PaperSize {
    /// Every supported sheet, largest first.
    pub const ALL: [Self; 4] = [Self::A0, Self::A1, Self::A2, Self::A3];

    /// Portrait `(width, height)` in millimeters.
    pub const fn dimensions_mm(self) -> (u32, u32) {
        match self {
            Self::A0 => (841, 1189),
            Self::A1 => (594, 841),
            Self::A2 => (420, 594),
            Self::A3 => (297, 420),
        }
    }

    /// Portrait dimensions in printed pixels at `dpi`.
    pub fn pixels(self, dpi: u32) -> Size {
        let (w_mm, h_mm) = self.dimensions_mm();
        Size::new(mm_to_pixels(w_mm as f64, dpi), mm_to_pixels(h_mm as f64, dpi))
    }

    /// Short name, e.g. `"A3"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::A0 => "A0",
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::A3 => "A3",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a [`PaperSize`] name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnknownPaperSize;

impl fmt::Display for UnknownPaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown paper size (expected A0, A1, A2 or A3)")
    }
}

impl core::error::Error for UnknownPaperSize {}

impl FromStr for PaperSize {
    type Err = UnknownPaperSize;

    /// Case-insensitive: `"a2"` and `"A2"` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(UnknownPaperSize)
    }
}

/// Which way the sheet is turned when the image is placed on it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PaperOrientation {
    /// Sheet dimensions as listed in the A-series table (taller than wide).
    #[default]
    Portrait,
    /// Sheet turned 90°, width and height exchanged.
    Landscape,
}

impl PaperOrientation {
    /// Whether this orientation swaps the sheet's width and height.
    pub fn swaps_axes(self) -> bool {
        self == Self::Landscape
    }

    /// Transform portrait sheet dimensions into this orientation.
    pub fn transform_dimensions(self, portrait: Size) -> Size {
        if self.swaps_axes() {
            portrait.transposed()
        } else {
            portrait
        }
    }

    /// Same as [`transform_dimensions`](Self::transform_dimensions), for a float pair.
    pub fn transform_pair(self, (w, h): (f64, f64)) -> (f64, f64) {
        if self.swaps_axes() { (h, w) } else { (w, h) }
    }

    /// Lowercase name, e.g. `"landscape"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

impl fmt::Display for PaperOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert a physical length to printed pixels: `round(mm / 25.4 * dpi)`.
///
/// Saturates at `u32::MAX`; callers keep `dpi` at or below [`MAX_DPI`].
pub fn mm_to_pixels(mm: f64, dpi: u32) -> u32 {
    Float::round(mm / MM_PER_INCH * dpi as f64) as u32
}

/// Printed pixels per millimeter of paper at `dpi`.
pub fn pixels_per_mm(dpi: u32) -> f64 {
    dpi as f64 / MM_PER_INCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_series_table() {
        assert_eq!(PaperSize::A0.dimensions_mm(), (841, 1189));
        assert_eq!(PaperSize::A1.dimensions_mm(), (594, 841));
        assert_eq!(PaperSize::A2.dimensions_mm(), (420, 594));
        assert_eq!(PaperSize::A3.dimensions_mm(), (297, 420));
    }

    #[test]
    fn each_size_halves_the_previous() {
        for pair in PaperSize::ALL.windows(2) {
            let (big_w, big_h) = pair[0].dimensions_mm();
            let (small_w, small_h) = pair[1].dimensions_mm();
            assert_eq!(small_h, big_w, "{} -> {}", pair[0], pair[1]);
            assert_eq!(small_w, big_h / 2, "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn pixels_at_300_dpi_round_to_nearest() {
        // 297 / 25.4 * 300 = 3507.87 -> 3508 (truncation would give 3507)
        assert_eq!(PaperSize::A3.pixels(300), Size::new(3508, 4961));
        assert_eq!(PaperSize::A2.pixels(300), Size::new(4961, 7016));
        assert_eq!(PaperSize::A1.pixels(300), Size::new(7016, 9933));
        assert_eq!(PaperSize::A0.pixels(300), Size::new(9933, 14043));
    }

    #[test]
    fn max_dpi_is_the_last_unsaturated_resolution() {
        let a0 = PaperSize::A0.pixels(MAX_DPI);
        assert_eq!(a0.height, 4_294_967_263);
        assert!(a0.height < u32::MAX);
        // One dot per inch more pushes 1189 mm past u32::MAX.
        let next = Float::round(1189.0 / MM_PER_INCH * (MAX_DPI + 1) as f64);
        assert!(next > u32::MAX as f64, "{next}");
    }

    #[test]
    fn pixels_at_254_dpi_are_exact() {
        // 254 dpi = 10 px/mm
        assert_eq!(PaperSize::A3.pixels(254), Size::new(2970, 4200));
        assert_eq!(PaperSize::A0.pixels(254), Size::new(8410, 11890));
    }

    #[test]
    fn parse_paper_size() {
        assert_eq!("A0".parse::<PaperSize>(), Ok(PaperSize::A0));
        assert_eq!("a3".parse::<PaperSize>(), Ok(PaperSize::A3));
        assert_eq!(" A2 ".parse::<PaperSize>(), Ok(PaperSize::A2));
        assert_eq!("A4".parse::<PaperSize>(), Err(UnknownPaperSize));
        assert_eq!("".parse::<PaperSize>(), Err(UnknownPaperSize));
    }

    #[test]
    fn orientation_transforms() {
        let portrait = Size::new(3508, 4961);
        assert_eq!(
            PaperOrientation::Portrait.transform_dimensions(portrait),
            portrait
        );
        assert_eq!(
            PaperOrientation::Landscape.transform_dimensions(portrait),
            Size::new(4961, 3508)
        );
        assert_eq!(
            PaperOrientation::Landscape.transform_pair((1.0, 2.0)),
            (2.0, 1.0)
        );
        assert!(!PaperOrientation::Portrait.swaps_axes());
        assert!(PaperOrientation::Landscape.swaps_axes());
    }
}
