//! Scale-factor computation for printing terrain images on A-series paper.
//!
//! For every sheet and every standard map scale, works out the uniform factor
//! to resize the image by, whether the target scale fits on the sheet at all,
//! and how much of the sheet the result covers. Pure arithmetic, no I/O.
//!
//! # Example
//!
//! ```
//! use mapscale::{ImageSpec, PaperOrientation, PaperSize, PrintConfig, compute};
//!
//! // 2500×1800 image where 1000 px span 50 m (20 px/m), printed at 300 dpi
//! let table = compute(ImageSpec::new(2500, 1800, 1000, 50.0), PrintConfig::new()).unwrap();
//!
//! let r = table.get(PaperSize::A3, 1000).unwrap();
//! assert!(r.achieves_target_scale);
//! assert_eq!(r.orientation, PaperOrientation::Landscape);
//! assert_eq!(r.final_size.width, 1476);
//! assert_eq!(r.achieved_scale_ratio, 1000);
//! ```

use alloc::vec::Vec;
use core::fmt;

use num_traits::Float;

use crate::paper::{MAX_DPI, PaperOrientation, PaperSize, Size};
use crate::scale::{MapScale, scale_ratio};
use crate::table::{PaperResults, ResultTable};
use crate::trace::{NoTrace, Trace, TraceEvent};

/// Relative tolerance for comparisons between chained float divisions.
pub const RELATIVE_EPSILON: f64 = 1e-9;

/// Default print resolution.
pub const DEFAULT_DPI: u32 = 300;

/// Default coverage limit: the whole sheet.
pub const DEFAULT_MAX_COVERAGE: f64 = 100.0;

/// Source image geometry and its real-world scale.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImageSpec {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Length in pixels of an image span whose ground distance is known.
    pub reference_pixels: u32,
    /// Ground distance covered by `reference_pixels`, in meters.
    pub reference_meters: f64,
}

impl ImageSpec {
    /// An image of `width × height` pixels where `reference_pixels` span
    /// `reference_meters` on the ground.
    pub const fn new(width: u32, height: u32, reference_pixels: u32, reference_meters: f64) -> Self {
        Self {
            width,
            height,
            reference_pixels,
            reference_meters,
        }
    }

    /// Image pixels per real-world meter.
    pub fn pixels_per_meter(&self) -> f64 {
        self.reference_pixels as f64 / self.reference_meters
    }

    fn validate(&self) -> Result<(), ScaleError> {
        if self.width == 0 || self.height == 0 {
            return Err(ScaleError::ZeroImageDimension);
        }
        if self.reference_pixels == 0 {
            return Err(ScaleError::ZeroReferencePixels);
        }
        if !(self.reference_meters.is_finite() && self.reference_meters > 0.0) {
            return Err(ScaleError::InvalidReferenceMeters);
        }
        Ok(())
    }
}

/// Print settings.
///
/// # Example
///
/// ```
/// use mapscale::PrintConfig;
///
/// let config = PrintConfig::new().dpi(600).max_coverage(90.0);
/// assert_eq!(config.dpi, 600);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrintConfig {
    /// Print resolution in dots per inch.
    pub dpi: u32,
    /// Largest share of each sheet axis the image may occupy, in `(0, 100]`.
    pub max_coverage_percent: f64,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintConfig {
    /// 300 dpi, full sheet.
    pub const fn new() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            max_coverage_percent: DEFAULT_MAX_COVERAGE,
        }
    }

    /// Set the print resolution.
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Limit how much of each sheet axis the image may use.
    pub fn max_coverage(mut self, percent: f64) -> Self {
        self.max_coverage_percent = percent;
        self
    }

    fn validate(&self) -> Result<(), ScaleError> {
        if self.dpi == 0 {
            return Err(ScaleError::ZeroDpi);
        }
        if self.dpi > MAX_DPI {
            return Err(ScaleError::DpiTooLarge);
        }
        let c = self.max_coverage_percent;
        if !(c.is_finite() && c > 0.0 && c <= 100.0) {
            return Err(ScaleError::CoverageOutOfRange);
        }
        Ok(())
    }
}

/// Outcome for one (sheet, target scale) pair.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScaleResult {
    pub paper: PaperSize,
    /// Requested map scale.
    pub target_scale: MapScale,
    /// Factor to resize the source image by.
    pub scale_factor: f64,
    /// Factor that would reproduce `target_scale` exactly.
    pub required_scale_factor: f64,
    /// Largest factor that fits the coverage-limited sheet in `orientation`.
    pub max_scale_factor: f64,
    /// Resized image dimensions, truncated.
    pub final_size: Size,
    /// Full sheet in printed pixels, in `orientation`.
    pub paper_px: Size,
    /// Full sheet in millimeters, in `orientation`.
    pub paper_mm: (u32, u32),
    pub orientation: PaperOrientation,
    /// Map scale denominator the print actually has, rounded.
    pub achieved_scale_ratio: u64,
    /// Resized width as a percentage of sheet width.
    pub coverage_x_percent: f64,
    /// Resized height as a percentage of sheet height.
    pub coverage_y_percent: f64,
    /// `false` when the image had to be shrunk below `target_scale` to fit.
    pub achieves_target_scale: bool,
}

/// Scaling computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScaleError {
    /// Image width or height is zero.
    ZeroImageDimension,
    /// Reference pixel span is zero.
    ZeroReferencePixels,
    /// Reference distance is zero, negative, or not finite.
    InvalidReferenceMeters,
    /// Print resolution is zero.
    ZeroDpi,
    /// Print resolution is so high that sheet pixel counts overflow `u32`.
    DpiTooLarge,
    /// Coverage limit is outside `(0, 100]`.
    CoverageOutOfRange,
    /// A paper/scale selection matched nothing.
    NoMatchingResults,
    /// The printed density came out zero, negative or non-finite.
    DegenerateScale { paper: PaperSize, scale: MapScale },
}

/// Broad classification of a [`ScaleError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rejected before any computation.
    InvalidInput,
    /// Computed fine, but the caller's filter left nothing.
    EmptyResult,
    /// Arithmetic broke down for some pair.
    DegenerateScale,
}

impl ScaleError {
    /// Which broad class this error falls in.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ZeroImageDimension
            | Self::ZeroReferencePixels
            | Self::InvalidReferenceMeters
            | Self::ZeroDpi
            | Self::DpiTooLarge
            | Self::CoverageOutOfRange => ErrorKind::InvalidInput,
            Self::NoMatchingResults => ErrorKind::EmptyResult,
            Self::DegenerateScale { .. } => ErrorKind::DegenerateScale,
        }
    }
}

impl fmt::Display for ScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroImageDimension => f.write_str("image width and height must be positive"),
            Self::ZeroReferencePixels => f.write_str("reference pixel count must be positive"),
            Self::InvalidReferenceMeters => {
                f.write_str("reference distance in meters must be a positive number")
            }
            Self::ZeroDpi => f.write_str("DPI must be positive"),
            Self::DpiTooLarge => write!(f, "DPI must be at most {MAX_DPI}"),
            Self::CoverageOutOfRange => {
                f.write_str("maximum coverage must be greater than 0 and at most 100 percent")
            }
            Self::NoMatchingResults => f.write_str("no results found for the specified filters"),
            Self::DegenerateScale { paper, scale } => {
                write!(f, "degenerate printed density for {scale} on {paper}")
            }
        }
    }
}

impl core::error::Error for ScaleError {}

/// Compute results for every sheet and every standard scale.
pub fn compute(image: ImageSpec, config: PrintConfig) -> Result<ResultTable, ScaleError> {
    compute_traced(image, config, &mut NoTrace)
}

/// [`compute`], reporting intermediate values to `trace`.
pub fn compute_traced<T: Trace + ?Sized>(
    image: ImageSpec,
    config: PrintConfig,
    trace: &mut T,
) -> Result<ResultTable, ScaleError> {
    image.validate()?;
    config.validate()?;

    let papers = PaperSize::ALL
        .into_iter()
        .map(|paper| compute_paper(&image, &config, paper, trace))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ResultTable::new(image, config, papers))
}

/// Orientation decision for one sheet.
#[derive(Copy, Clone, Debug)]
struct SheetFit {
    paper: PaperSize,
    orientation: PaperOrientation,
    /// Full sheet in `orientation`.
    paper_px: Size,
    max_factor: f64,
}

fn compute_paper<T: Trace + ?Sized>(
    image: &ImageSpec,
    config: &PrintConfig,
    paper: PaperSize,
    trace: &mut T,
) -> Result<PaperResults, ScaleError> {
    let portrait_px = paper.pixels(config.dpi);
    let limit = config.max_coverage_percent / 100.0;
    let effective = (
        portrait_px.width as f64 * limit,
        portrait_px.height as f64 * limit,
    );

    let (iw, ih) = (image.width as f64, image.height as f64);
    let portrait_max = max_factor(effective, iw, ih);
    let landscape_max = max_factor((effective.1, effective.0), iw, ih);
    let orientation = if exceeds(landscape_max, portrait_max) {
        PaperOrientation::Landscape
    } else {
        PaperOrientation::Portrait
    };
    trace.event(&TraceEvent::PaperFit {
        paper,
        paper_px: portrait_px,
        effective,
        portrait_max,
        landscape_max,
        orientation,
    });

    let fit = SheetFit {
        paper,
        orientation,
        paper_px: orientation.transform_dimensions(portrait_px),
        max_factor: match orientation {
            PaperOrientation::Portrait => portrait_max,
            PaperOrientation::Landscape => landscape_max,
        },
    };

    let results = MapScale::STANDARD
        .into_iter()
        .map(|scale| evaluate(image, config, &fit, scale, trace))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PaperResults {
        paper,
        portrait_px,
        effective_px: orientation.transform_pair(effective),
        orientation,
        max_scale_factor: fit.max_factor,
        results,
    })
}

/// Largest uniform factor keeping `iw × ih` inside `area`.
fn max_factor(area: (f64, f64), iw: f64, ih: f64) -> f64 {
    (area.0 / iw).min(area.1 / ih)
}

/// `a > b` by more than the relative tolerance.
fn exceeds(a: f64, b: f64) -> bool {
    a - b > RELATIVE_EPSILON * Float::abs(b)
}

fn evaluate<T: Trace + ?Sized>(
    image: &ImageSpec,
    config: &PrintConfig,
    fit: &SheetFit,
    scale: MapScale,
    trace: &mut T,
) -> Result<ScaleResult, ScaleError> {
    let ppm = image.pixels_per_meter();
    let required = scale.required_factor(config.dpi, ppm);

    // Inclusive boundary: a target that lands exactly on the sheet edge fits.
    let achieves = !exceeds(required, fit.max_factor);
    let factor = if achieves { required } else { fit.max_factor };
    trace.event(&TraceEvent::ScaleDecision {
        paper: fit.paper,
        scale,
        required,
        max: fit.max_factor,
        chosen: factor,
        achieves_target_scale: achieves,
    });

    let final_w = image.width as f64 * factor;
    let final_h = image.height as f64 * factor;

    // A subnormal density passes the sign check but overflows the ratio.
    let printed_ppm = ppm * factor;
    let ratio = scale_ratio(config.dpi, printed_ppm);
    if !(printed_ppm > 0.0 && ratio.is_finite()) {
        return Err(ScaleError::DegenerateScale {
            paper: fit.paper,
            scale,
        });
    }

    let (mm_w, mm_h) = fit.paper.dimensions_mm();
    let paper_mm = if fit.orientation.swaps_axes() {
        (mm_h, mm_w)
    } else {
        (mm_w, mm_h)
    };

    Ok(ScaleResult {
        paper: fit.paper,
        target_scale: scale,
        scale_factor: factor,
        required_scale_factor: required,
        max_scale_factor: fit.max_factor,
        final_size: Size::new(Float::trunc(final_w) as u32, Float::trunc(final_h) as u32),
        paper_px: fit.paper_px,
        paper_mm,
        orientation: fit.orientation,
        achieved_scale_ratio: Float::round(ratio) as u64,
        coverage_x_percent: final_w / fit.paper_px.width as f64 * 100.0,
        coverage_y_percent: final_h / fit.paper_px.height as f64 * 100.0,
        achieves_target_scale: achieves,
    })
}
