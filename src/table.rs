//! Computed results, grouped by sheet, and paper/scale selection.

use alloc::vec::Vec;

use crate::calculator::{ImageSpec, PrintConfig, ScaleError, ScaleResult};
use crate::paper::{PaperOrientation, PaperSize, Size};
use crate::scale::MapScale;

/// Every result for one sheet, in [`MapScale::STANDARD`] order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PaperResults {
    pub paper: PaperSize,
    /// Sheet in printed pixels, portrait.
    pub portrait_px: Size,
    /// Coverage-limited area in `orientation`, in printed pixels.
    pub effective_px: (f64, f64),
    pub orientation: PaperOrientation,
    /// Largest factor that fits the effective area.
    pub max_scale_factor: f64,
    pub results: Vec<ScaleResult>,
}

impl PaperResults {
    /// Result for `1:denominator`, if it is a computed scale.
    pub fn get(&self, denominator: u32) -> Option<&ScaleResult> {
        self.results
            .iter()
            .find(|r| r.target_scale.denominator() == denominator)
    }
}

/// Output of [`compute`](crate::compute): sheets A0..A3, each with every
/// standard scale.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResultTable {
    image: ImageSpec,
    config: PrintConfig,
    papers: Vec<PaperResults>,
}

impl ResultTable {
    pub(crate) fn new(image: ImageSpec, config: PrintConfig, papers: Vec<PaperResults>) -> Self {
        Self {
            image,
            config,
            papers,
        }
    }

    /// The image the table was computed for.
    pub fn image(&self) -> &ImageSpec {
        &self.image
    }

    /// The print settings the table was computed with.
    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    /// Per-sheet groups, largest sheet first.
    pub fn papers(&self) -> &[PaperResults] {
        &self.papers
    }

    /// Results for one sheet.
    pub fn paper(&self, paper: PaperSize) -> Option<&PaperResults> {
        self.papers.iter().find(|p| p.paper == paper)
    }

    /// Result for `paper` at `1:denominator`.
    pub fn get(&self, paper: PaperSize, denominator: u32) -> Option<&ScaleResult> {
        self.paper(paper)?.get(denominator)
    }

    /// All results, sheet by sheet.
    pub fn iter(&self) -> impl Iterator<Item = &ScaleResult> {
        self.papers.iter().flat_map(|p| p.results.iter())
    }

    /// Total number of results.
    pub fn len(&self) -> usize {
        self.papers.iter().map(|p| p.results.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Results matching `selection`, in table order.
    ///
    /// Fails with [`ScaleError::NoMatchingResults`] when nothing matches,
    /// e.g. a scale that is not in [`MapScale::STANDARD`].
    pub fn select(&self, selection: &Selection) -> Result<Vec<&ScaleResult>, ScaleError> {
        let hits: Vec<_> = self.iter().filter(|r| selection.matches(r)).collect();
        if hits.is_empty() {
            return Err(ScaleError::NoMatchingResults);
        }
        Ok(hits)
    }
}

/// Optional paper and scale filter over a [`ResultTable`]. Empty selects all.
///
/// ```
/// use mapscale::{ImageSpec, MapScale, PaperSize, PrintConfig, Selection, compute};
///
/// let table = compute(ImageSpec::new(2500, 1800, 1000, 50.0), PrintConfig::new()).unwrap();
/// let a2 = table.select(&Selection::all().paper(PaperSize::A2)).unwrap();
/// assert_eq!(a2.len(), MapScale::STANDARD.len());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub paper: Option<PaperSize>,
    pub scale: Option<MapScale>,
}

impl Selection {
    /// No filter.
    pub const fn all() -> Self {
        Self {
            paper: None,
            scale: None,
        }
    }

    /// Keep only `paper`.
    pub fn paper(mut self, paper: PaperSize) -> Self {
        self.paper = Some(paper);
        self
    }

    /// Keep only `scale`.
    pub fn scale(mut self, scale: MapScale) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Whether `result` passes every active filter.
    pub fn matches(&self, result: &ScaleResult) -> bool {
        self.paper.is_none_or(|p| p == result.paper)
            && self.scale.is_none_or(|s| s == result.target_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{ErrorKind, compute};

    fn table() -> ResultTable {
        compute(ImageSpec::new(2500, 1800, 1000, 50.0), PrintConfig::new()).unwrap()
    }

    #[test]
    fn table_shape() {
        let t = table();
        assert_eq!(t.papers().len(), 4);
        assert_eq!(t.len(), 4 * MapScale::STANDARD.len());
        assert!(!t.is_empty());
        let order: Vec<_> = t.papers().iter().map(|p| p.paper).collect();
        assert_eq!(order, PaperSize::ALL.to_vec());
        for p in t.papers() {
            let scales: Vec<_> = p.results.iter().map(|r| r.target_scale).collect();
            assert_eq!(scales, MapScale::STANDARD.to_vec());
            assert!(p.results.iter().all(|r| r.paper == p.paper));
        }
        assert_eq!(t.iter().count(), t.len());
    }

    #[test]
    fn lookup() {
        let t = table();
        assert_eq!(
            t.get(PaperSize::A1, 5000).map(|r| r.target_scale.denominator()),
            Some(5000)
        );
        assert!(t.get(PaperSize::A1, 3000).is_none());
        assert_eq!(t.paper(PaperSize::A2).unwrap().portrait_px, Size::new(4961, 7016));
        assert_eq!(t.image().width, 2500);
        assert_eq!(t.config().dpi, 300);
    }

    #[test]
    fn paper_group_records_effective_area() {
        let t = compute(
            ImageSpec::new(2500, 1800, 1000, 50.0),
            PrintConfig::new().max_coverage(50.0),
        )
        .unwrap();
        let a3 = t.paper(PaperSize::A3).unwrap();
        assert_eq!(a3.orientation, PaperOrientation::Landscape);
        assert_eq!(a3.effective_px, (4961.0 * 0.5, 3508.0 * 0.5));
    }

    #[test]
    fn select_all() {
        let t = table();
        assert_eq!(t.select(&Selection::all()).unwrap().len(), t.len());
    }

    #[test]
    fn select_paper_and_scale() {
        let t = table();
        let scale = MapScale::new(2000).unwrap();
        let hits = t
            .select(&Selection::all().paper(PaperSize::A0).scale(scale))
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].paper, PaperSize::A0);
        assert_eq!(hits[0].target_scale, scale);

        let hits = t.select(&Selection::all().scale(scale)).unwrap();
        let papers: Vec<_> = hits.iter().map(|r| r.paper).collect();
        assert_eq!(papers, PaperSize::ALL.to_vec());
    }

    #[test]
    fn select_nonstandard_scale_is_empty() {
        let t = table();
        let e = t
            .select(&Selection::all().scale(MapScale::new(3000).unwrap()))
            .unwrap_err();
        assert_eq!(e, ScaleError::NoMatchingResults);
        assert_eq!(e.kind(), ErrorKind::EmptyResult);
    }
}
