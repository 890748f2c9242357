//! Print scaling for terrain images on A-series paper at standard map scales.
//!
//! Given an image's pixel size and a known ground distance, computes for
//! every sheet (A0-A3) and every standard scale (1:100 to 1:500000) the
//! uniform resize factor, the resulting pixel size, the map scale actually
//! achieved, and how much of the sheet the print covers.
//!
//! Pure arithmetic, `no_std` compatible (needs `alloc`).
//!
//! # Modules
//!
//! - [`calculator`]: Inputs, per-pair results, errors, and [`compute`]
//! - [`paper`]: A-series sheet table, orientation, millimeter to pixel conversion
//! - [`scale`]: Map scales and unit conversions
//! - [`table`]: Result table and paper/scale selection
//! - [`trace`]: Optional diagnostics callback
//! - `text`: Console report rendering (feature `text`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod calculator;
pub mod paper;
pub mod scale;
pub mod table;
#[cfg(feature = "text")]
pub mod text;
pub mod trace;

// Re-exports: core types
pub use calculator::{
    ErrorKind, ImageSpec, PrintConfig, ScaleError, ScaleResult, compute, compute_traced,
};
pub use paper::{PaperOrientation, PaperSize, Size};
pub use scale::MapScale;
pub use table::{PaperResults, ResultTable, Selection};
#[cfg(feature = "tracing")]
pub use trace::TracingTrace;
pub use trace::{NoTrace, Trace, TraceEvent};
