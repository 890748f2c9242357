//! Plain-text rendering of scaling results.
//!
//! Produces the console report: an input summary, one table per sheet, and a
//! worked example for the first selected result.
//!
//! # Example
//!
//! ```
//! use mapscale::{ImageSpec, PrintConfig, Selection, compute, text};
//!
//! let table = compute(ImageSpec::new(2500, 1800, 1000, 50.0), PrintConfig::new()).unwrap();
//! let report = text::render(&table, &Selection::all(), false).unwrap();
//! assert!(report.contains("A3 Paper"));
//! assert!(report.contains("EXAMPLE: To print on A0 paper at 1:100 scale:"));
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::calculator::{ImageSpec, PrintConfig, ScaleError, ScaleResult};
use crate::paper::PaperSize;
use crate::table::{ResultTable, Selection};

/// Width of the report's outer rules.
const RULE_W: usize = 80;
/// Width of the per-sheet table rules.
const TABLE_RULE_W: usize = 70;

/// Header, per-sheet tables and the closing example for `selection`.
///
/// Fails with [`ScaleError::NoMatchingResults`] when the selection is empty;
/// nothing is rendered in that case.
pub fn render(
    table: &ResultTable,
    selection: &Selection,
    verbose: bool,
) -> Result<String, ScaleError> {
    let selected = table.select(selection)?;
    let mut out = header(table.image(), table.config(), selection);
    out.push_str(&tables(&selected, table.config(), verbose));
    if let Some(first) = selected.first() {
        out.push('\n');
        out.push_str(&"=".repeat(RULE_W));
        out.push('\n');
        out.push_str(&example(first));
    }
    Ok(out)
}

/// Summary of the inputs and any active filters.
pub fn header(image: &ImageSpec, config: &PrintConfig, selection: &Selection) -> String {
    let mut out = String::from("Terrain Image Scaling Calculator\n");
    out.push_str(&"=".repeat(40));
    out.push('\n');
    out.push_str("Input parameters:\n");
    out.push_str(&format!(
        "  Image size: {} x {} pixels\n",
        image.width, image.height
    ));
    out.push_str(&format!(
        "  Original scale: {} pixels = {} meters ({:.2} pixels/meter)\n",
        image.reference_pixels,
        image.reference_meters,
        image.pixels_per_meter()
    ));
    out.push_str(&format!("  Target DPI: {}\n", config.dpi));
    if config.max_coverage_percent < 100.0 {
        out.push_str(&format!(
            "  Maximum coverage: {}%\n",
            config.max_coverage_percent
        ));
    }
    if let Some(paper) = selection.paper {
        out.push_str(&format!("  Paper filter: {paper} only\n"));
    }
    if let Some(scale) = selection.scale {
        out.push_str(&format!("  Scale filter: {scale} only\n"));
    }
    out
}

/// One table per sheet, sheets in A0..A3 order, rows in the given order.
pub fn tables(results: &[&ScaleResult], config: &PrintConfig, verbose: bool) -> String {
    let mut out = String::new();
    if !verbose {
        out.push_str(&"=".repeat(RULE_W));
        out.push('\n');
    }

    for paper in PaperSize::ALL {
        let rows: Vec<&ScaleResult> = results
            .iter()
            .copied()
            .filter(|r| r.paper == paper)
            .collect();
        let Some(first) = rows.first() else {
            continue;
        };

        out.push_str(&format!("\n{paper} Paper"));
        if verbose {
            out.push_str(&format!(
                " ({} x {} mm = {} x {} pixels at {} DPI, {})",
                first.paper_mm.0,
                first.paper_mm.1,
                first.paper_px.width,
                first.paper_px.height,
                config.dpi,
                first.orientation
            ));
        }
        out.push('\n');
        out.push_str(&"-".repeat(TABLE_RULE_W));
        out.push('\n');
        out.push_str(&format!(
            "{:<12} {:<15} {:<18} {:<12} {:<12} {}\n",
            "Target Scale", "Scaling Factor", "Final Size (px)", "Actual Scale", "Coverage %", "Fits?"
        ));
        out.push_str(&"-".repeat(TABLE_RULE_W));
        out.push('\n');

        for r in rows {
            out.push_str(&format!(
                "{:<12} {:<15.4} {:<18} {:<12} {:<12} {}\n",
                format!("{}", r.target_scale),
                r.scale_factor,
                format!("{}x{}", r.final_size.width, r.final_size.height),
                format!("1:{}", r.achieved_scale_ratio),
                coverage_label(r),
                if r.achieves_target_scale { "✓" } else { "✗" }
            ));
        }
    }
    out
}

/// Worked example for a single result.
pub fn example(result: &ScaleResult) -> String {
    let (lo, hi) = coverage_sorted(result);
    let mut out = format!(
        "EXAMPLE: To print on {} paper at {} scale:\n",
        result.paper, result.target_scale
    );
    out.push_str(&format!(
        "Apply scaling factor: {:.4}\n",
        result.scale_factor
    ));
    out.push_str(&format!(
        "Final image size: {} x {} pixels\n",
        result.final_size.width, result.final_size.height
    ));
    out.push_str(&format!("Paper coverage: {lo:.1}% x {hi:.1}%\n"));
    if !result.achieves_target_scale {
        out.push_str(&format!(
            "Note: {} does not fit; best achievable scale is 1:{}\n",
            result.target_scale, result.achieved_scale_ratio
        ));
    }
    out
}

/// Coverage pair as `"29.8x30.3"`, smallest first.
pub fn coverage_label(result: &ScaleResult) -> String {
    let (lo, hi) = coverage_sorted(result);
    format!("{lo:.1}x{hi:.1}")
}

// Display-only ordering; the result keeps its axis-true values.
fn coverage_sorted(result: &ScaleResult) -> (f64, f64) {
    let (x, y) = (result.coverage_x_percent, result.coverage_y_percent);
    if x <= y { (x, y) } else { (y, x) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute;
    use crate::scale::MapScale;

    fn table() -> ResultTable {
        compute(ImageSpec::new(2500, 1800, 1000, 50.0), PrintConfig::new()).unwrap()
    }

    #[test]
    fn coverage_is_ordered_for_display_only() {
        let t = table();
        let r = t.get(PaperSize::A3, 1000).unwrap();
        // axis-true: x = 29.76 (width on 4961), y = 30.30 (height on 3508)
        assert!(r.coverage_x_percent < r.coverage_y_percent);
        assert_eq!(coverage_label(r), "29.8x30.3");

        let mut swapped = *r;
        swapped.coverage_x_percent = r.coverage_y_percent;
        swapped.coverage_y_percent = r.coverage_x_percent;
        assert_eq!(coverage_label(&swapped), "29.8x30.3");
        assert!(swapped.coverage_x_percent > swapped.coverage_y_percent);
    }

    #[test]
    fn row_layout() {
        let t = table();
        let sel = Selection::all()
            .paper(PaperSize::A3)
            .scale(MapScale::new(1000).unwrap());
        let rows = t.select(&sel).unwrap();
        let out = tables(&rows, t.config(), false);
        let row = out
            .lines()
            .find(|l| l.starts_with("1:1000"))
            .expect("row for 1:1000");
        assert_eq!(
            row,
            "1:1000       0.5906          1476x1062          1:1000       29.8x30.3    ✓"
        );
        assert!(!out.contains("A0 Paper"));
    }

    #[test]
    fn clamped_rows_are_marked() {
        let t = table();
        let rows = t
            .select(&Selection::all().paper(PaperSize::A3).scale(MapScale::new(100).unwrap()))
            .unwrap();
        let out = tables(&rows, t.config(), false);
        assert!(out.contains("1:303"), "{out}");
        assert!(out.trim_end().ends_with('✗'), "{out}");
    }

    #[test]
    fn verbose_shows_sheet_dimensions() {
        let t = table();
        let rows = t.select(&Selection::all().paper(PaperSize::A3)).unwrap();
        let out = tables(&rows, t.config(), true);
        assert!(
            out.contains("A3 Paper (420 x 297 mm = 4961 x 3508 pixels at 300 DPI, landscape)"),
            "{out}"
        );
        assert!(!out.starts_with('='));
    }

    #[test]
    fn header_lists_filters() {
        let t = table();
        let sel = Selection::all()
            .paper(PaperSize::A2)
            .scale(MapScale::new(2000).unwrap());
        let h = header(t.image(), t.config(), &sel);
        assert!(h.contains("  Image size: 2500 x 1800 pixels\n"));
        assert!(h.contains("(20.00 pixels/meter)"));
        assert!(h.contains("  Paper filter: A2 only\n"));
        assert!(h.contains("  Scale filter: 1:2000 only\n"));
        assert!(!h.contains("Maximum coverage"));
    }

    #[test]
    fn example_block() {
        let t = table();
        let r = t.get(PaperSize::A2, 2000).unwrap();
        let e = example(r);
        assert!(e.starts_with("EXAMPLE: To print on A2 paper at 1:2000 scale:\n"));
        assert!(e.contains("Apply scaling factor: 0.2953\n"));
        assert!(!e.contains("Note:"));
    }

    #[test]
    fn empty_selection_renders_nothing() {
        let t = table();
        let sel = Selection::all().scale(MapScale::new(1234).unwrap());
        assert_eq!(render(&t, &sel, false), Err(ScaleError::NoMatchingResults));
    }
}
