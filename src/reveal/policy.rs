use crate::curve::model::{CurveModel, Threshold};

/// Per-threshold visibility, in threshold order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RevealSet {
    visible: Vec<bool>,
}

impl RevealSet {
    /// A set with every one of `len` labels hidden.
    pub fn hidden(len: usize) -> Self {
        Self {
            visible: vec![false; len],
        }
    }

    /// Visibility flags in threshold order.
    pub fn flags(&self) -> &[bool] {
        &self.visible
    }

    /// Number of thresholds covered (visible or not).
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// `true` when the curve has no thresholds.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Visibility of threshold `index`; out-of-range indices are hidden.
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Number of visible labels.
    pub fn count_visible(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    /// Indices of the visible labels, ascending.
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.visible
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.then_some(i))
    }

    /// Labels of the visible thresholds of `curve`.
    pub fn labels<'a>(&'a self, curve: &'a CurveModel) -> impl Iterator<Item = &'a str> + 'a {
        self.visible_indices()
            .filter_map(|i| curve.thresholds().get(i))
            .map(|th| th.label.as_str())
    }

    /// `true` when every label visible here is also visible in `other`.
    pub fn is_subset_of(&self, other: &RevealSet) -> bool {
        self.visible_indices().all(|i| other.is_visible(i))
    }
}

/// Stateless threshold evaluation.
#[derive(Clone, Copy, Debug, Default)]
pub struct RevealPolicy;

impl RevealPolicy {
    /// Visibility of every threshold at `progress`: shown iff `progress > reveal_progress`.
    pub fn resolve(curve: &CurveModel, progress: f64) -> RevealSet {
        Self::resolve_thresholds(curve.thresholds(), progress)
    }

    /// A label is visible iff `progress` strictly exceeds its reveal threshold.
    pub fn resolve_thresholds(thresholds: &[Threshold], progress: f64) -> RevealSet {
        RevealSet {
            visible: thresholds
                .iter()
                .map(|th| progress > th.reveal_progress)
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/policy.rs"]
mod tests;
