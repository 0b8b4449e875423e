use crate::geometry::curve::{BiArc, CurveDomain};
use crate::geometry::pline::Pline;

/// One fitted biarc together with the part of the source curve it replaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximatedBiArc {
    /// The fitted biarc.
    pub biarc: BiArc,
    /// Parameter range on the source curve covered by `biarc`.
    pub domain: CurveDomain,
    /// Largest sampled distance between the fragment and `biarc`.
    pub max_error: f64,
    /// `false` if the depth cap stopped refinement before the tolerance was met.
    pub converged: bool,
}

/// Ordered biarc approximation of a cubic curve, from its start to its end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Approximation {
    items: Vec<ApproximatedBiArc>,
}

impl Approximation {
    /// Sorts the fitted pieces by their position on the source curve.
    pub(crate) fn from_unordered(mut items: Vec<ApproximatedBiArc>) -> Self {
        items.sort_by(|a, b| a.domain.t_min.total_cmp(&b.domain.t_min));
        Self { items }
    }

    /// Returns the fitted pieces with their domains and errors.
    #[must_use]
    pub fn items(&self) -> &[ApproximatedBiArc] {
        &self.items
    }

    /// Iterates over the biarcs in curve order.
    pub fn biarcs(&self) -> impl Iterator<Item = &BiArc> + '_ {
        self.items.iter().map(|item| &item.biarc)
    }

    /// Consumes the result, keeping only the biarcs.
    #[must_use]
    pub fn into_biarcs(self) -> Vec<BiArc> {
        self.items.into_iter().map(|item| item.biarc).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns whether every piece met the tolerance.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.items.iter().all(|item| item.converged)
    }

    /// Number of pieces accepted at the depth cap.
    #[must_use]
    pub fn unconverged_count(&self) -> usize {
        self.items.iter().filter(|item| !item.converged).count()
    }

    /// Largest sampled error over all pieces, `0` when empty.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.max_error)
            .fold(0.0, f64::max)
    }

    /// Converts the biarcs into an open bulge polyline.
    ///
    /// Every biarc contributes two vertices, and the end of the last arc
    /// closes the vertex list.
    #[must_use]
    pub fn to_pline(&self) -> Pline {
        Pline::from_arcs(
            self.items
                .iter()
                .flat_map(|item| [item.biarc.first(), item.biarc.second()]),
        )
    }
}

impl<'a> IntoIterator for &'a Approximation {
    type Item = &'a ApproximatedBiArc;
    type IntoIter = std::slice::Iter<'a, ApproximatedBiArc>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
