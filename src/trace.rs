//! Optional diagnostics for the scaling computation.
//!
//! The calculator never prints. Callers that want to see intermediate values
//! pass a [`Trace`] to [`compute_traced`](crate::compute_traced); a closure
//! works:
//!
//! ```
//! use mapscale::{ImageSpec, PrintConfig, TraceEvent, compute_traced};
//!
//! let mut decisions = 0;
//! let table = compute_traced(
//!     ImageSpec::new(2500, 1800, 1000, 50.0),
//!     PrintConfig::new(),
//!     &mut |event: &TraceEvent| {
//!         if matches!(event, TraceEvent::ScaleDecision { .. }) {
//!             decisions += 1;
//!         }
//!     },
//! )
//! .unwrap();
//! assert_eq!(decisions, table.len());
//! ```

use crate::paper::{PaperOrientation, PaperSize, Size};
use crate::scale::MapScale;

/// An intermediate result of the computation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TraceEvent {
    /// Orientation chosen for one sheet.
    PaperFit {
        paper: PaperSize,
        /// Portrait sheet size in printed pixels.
        paper_px: Size,
        /// Portrait sheet size after the coverage limit.
        effective: (f64, f64),
        /// Largest factor that fits portrait.
        portrait_max: f64,
        /// Largest factor that fits landscape.
        landscape_max: f64,
        orientation: PaperOrientation,
    },
    /// Feasibility decision for one target scale on one sheet.
    ScaleDecision {
        paper: PaperSize,
        scale: MapScale,
        /// Factor that reproduces `scale` exactly.
        required: f64,
        /// Largest factor that fits the sheet in the chosen orientation.
        max: f64,
        /// Factor actually used.
        chosen: f64,
        achieves_target_scale: bool,
    },
}

/// Receiver for [`TraceEvent`]s.
pub trait Trace {
    /// Called once per event, in computation order.
    fn event(&mut self, event: &TraceEvent);
}

impl<F: FnMut(&TraceEvent)> Trace for F {
    fn event(&mut self, event: &TraceEvent) {
        self(event)
    }
}

/// Discards every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoTrace;

impl Trace for NoTrace {
    fn event(&mut self, _: &TraceEvent) {}
}

/// Forwards events to `tracing` at debug level, target `mapscale`.
#[cfg(feature = "tracing")]
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingTrace;

#[cfg(feature = "tracing")]
impl Trace for TracingTrace {
    fn event(&mut self, event: &TraceEvent) {
        match *event {
            TraceEvent::PaperFit {
                paper,
                paper_px,
                effective,
                portrait_max,
                landscape_max,
                orientation,
            } => tracing::debug!(
                target: "mapscale",
                paper = paper.name(),
                paper_w = paper_px.width,
                paper_h = paper_px.height,
                effective_w = effective.0,
                effective_h = effective.1,
                portrait_max,
                landscape_max,
                orientation = orientation.name(),
                "paper fit"
            ),
            TraceEvent::ScaleDecision {
                paper,
                scale,
                required,
                max,
                chosen,
                achieves_target_scale,
            } => tracing::debug!(
                target: "mapscale",
                paper = paper.name(),
                scale = scale.denominator(),
                required,
                max,
                chosen,
                achieves_target_scale,
                "scale decision"
            ),
        }
    }
}
