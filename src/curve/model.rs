use std::collections::HashSet;

use kurbo::{ParamCurve, ParamCurveArclen, ParamCurveDeriv, PathEl, QuadBez};

use crate::{
    curve::sampler::{CurveSampler, SamplePoint},
    foundation::core::{BezPath, CubicBez, Point, Vec2},
    foundation::error::{TraceError, TraceResult},
    foundation::math::{JOIN_EPSILON, is_unit, points_coincide},
};

/// Default accuracy (in curve units) for arc-length and inverse arc-length solves.
pub const DEFAULT_ARCLEN_ACCURACY: f64 = 1e-5;

/// Which way a label's text runs relative to the curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelDirection {
    /// Text follows the curve from start to end.
    #[default]
    Forward,
    /// Text is laid along the reversed curve so it reads upright on right-to-left stretches.
    Reversed,
}

/// A label anchored on the curve that becomes visible past a progress threshold.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Threshold {
    /// Anchor position along the curve, as a fraction of arc length from the start.
    pub offset_percent: f64,
    /// Label identifier.
    pub label: String,
    /// The label is visible once progress strictly exceeds this value.
    pub reveal_progress: f64,
    /// Text direction along the curve.
    #[serde(default)]
    pub direction: LabelDirection,
}

impl Threshold {
    /// A forward-running label at `offset_percent` from the curve start.
    pub fn new(label: impl Into<String>, offset_percent: f64, reveal_progress: f64) -> Self {
        Self {
            offset_percent,
            label: label.into(),
            reveal_progress,
            direction: LabelDirection::Forward,
        }
    }

    /// A label laid along the reversed curve, positioned `offset_from_end` from the curve end.
    pub fn reversed(label: impl Into<String>, offset_from_end: f64, reveal_progress: f64) -> Self {
        Self {
            offset_percent: 1.0 - offset_from_end,
            label: label.into(),
            reveal_progress,
            direction: LabelDirection::Reversed,
        }
    }
}

/// Immutable multi-segment cubic Bézier path plus its label thresholds.
///
/// Segment arc lengths are measured once at construction; the cumulative table drives
/// arc-length-uniform lookups in [`CurveSampler`].
#[derive(Clone, Debug)]
pub struct CurveModel {
    segments: Vec<CubicBez>,
    seg_lengths: Vec<f64>,
    // cumulative[i] = total length of segments[..=i]
    cumulative: Vec<f64>,
    length: f64,
    thresholds: Vec<Threshold>,
    accuracy: f64,
}

impl CurveModel {
    /// Build a curve from contiguous cubic segments.
    pub fn new(segments: Vec<CubicBez>, thresholds: Vec<Threshold>) -> TraceResult<Self> {
        Self::with_accuracy(segments, thresholds, DEFAULT_ARCLEN_ACCURACY)
    }

    /// Build a curve with an explicit arc-length accuracy.
    pub fn with_accuracy(
        segments: Vec<CubicBez>,
        thresholds: Vec<Threshold>,
        accuracy: f64,
    ) -> TraceResult<Self> {
        if !(accuracy.is_finite() && accuracy > 0.0) {
            return Err(TraceError::validation(
                "arc-length accuracy must be finite and > 0",
            ));
        }
        validate_segments(&segments)?;
        validate_thresholds(&thresholds)?;

        let seg_lengths: Vec<f64> = segments.iter().map(|s| s.arclen(accuracy)).collect();
        let cumulative: Vec<f64> = seg_lengths
            .iter()
            .scan(0.0, |acc, len| {
                *acc += len;
                Some(*acc)
            })
            .collect();
        let length = cumulative.last().copied().unwrap_or(0.0);
        if length == 0.0 {
            tracing::debug!(
                segments = segments.len(),
                "curve has zero length; sampling will be refused"
            );
        }

        Ok(Self {
            segments,
            seg_lengths,
            cumulative,
            length,
            thresholds,
            accuracy,
        })
    }

    /// Parse an SVG path string (`M`, `L`, `Q`, `C`, `Z` and their variants).
    ///
    /// Lines and quadratics are elevated to cubics. The path must be a single subpath.
    pub fn from_svg(d: &str, thresholds: Vec<Threshold>) -> TraceResult<Self> {
        Self::from_svg_with_accuracy(d, thresholds, DEFAULT_ARCLEN_ACCURACY)
    }

    /// [`CurveModel::from_svg`] with an explicit arc-length accuracy.
    pub fn from_svg_with_accuracy(
        d: &str,
        thresholds: Vec<Threshold>,
        accuracy: f64,
    ) -> TraceResult<Self> {
        let d = d.trim();
        if d.is_empty() {
            return Err(TraceError::validation("curve path must be non-empty"));
        }
        let path = BezPath::from_svg(d)
            .map_err(|e| TraceError::validation(format!("invalid curve path: {e}")))?;
        Self::with_accuracy(cubics_from_path(&path)?, thresholds, accuracy)
    }

    /// The cubic segments, in path order.
    pub fn segments(&self) -> &[CubicBez] {
        &self.segments
    }

    /// Label thresholds, sorted by offset.
    pub fn thresholds(&self) -> &[Threshold] {
        &self.thresholds
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Accuracy used for arc-length solves.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// First point of the curve.
    pub fn start(&self) -> Point {
        self.segments[0].p0
    }

    /// Last point of the curve.
    pub fn end(&self) -> Point {
        self.segments[self.segments.len() - 1].p3
    }

    /// Sample with the default sampler settings.
    pub fn sample_at(&self, progress: f64) -> TraceResult<SamplePoint> {
        CurveSampler::default().sample_at(self, progress)
    }

    /// Rebuild the curve as a path, e.g. for drawing the guide line.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start());
        for s in &self.segments {
            path.curve_to(s.p1, s.p2, s.p3);
        }
        path
    }

    /// Resolve an arc-length distance to `(segment index, local t)`.
    ///
    /// `distance` must already lie in `[0, length]`.
    pub(crate) fn locate(&self, distance: f64) -> (usize, f64) {
        let last = self.segments.len() - 1;
        let idx = self
            .cumulative
            .partition_point(|&c| c < distance)
            .min(last);
        let before = if idx == 0 {
            0.0
        } else {
            self.cumulative[idx - 1]
        };
        let seg_len = self.seg_lengths[idx];
        let local = (distance - before).clamp(0.0, seg_len);

        let t = if seg_len <= 0.0 || local <= 0.0 {
            0.0
        } else if local >= seg_len {
            1.0
        } else {
            self.segments[idx]
                .inv_arclen(local, self.accuracy)
                .clamp(0.0, 1.0)
        };
        (idx, t)
    }

    pub(crate) fn point_at(&self, idx: usize, t: f64) -> Point {
        self.segments[idx].eval(t)
    }

    pub(crate) fn point_at_distance(&self, distance: f64) -> Point {
        let (idx, t) = self.locate(distance);
        self.point_at(idx, t)
    }

    /// First derivative at `(idx, t)`, falling back to the segment chord where the derivative
    /// vanishes (a control point coinciding with an endpoint).
    pub(crate) fn direction_at(&self, idx: usize, t: f64) -> Vec2 {
        let seg = &self.segments[idx];
        let d = seg.deriv().eval(t).to_vec2();
        if d.hypot2() > JOIN_EPSILON * JOIN_EPSILON {
            return d;
        }
        let nudged = if t < 0.5 { t + 1e-3 } else { t - 1e-3 };
        let d = seg.deriv().eval(nudged).to_vec2();
        if d.hypot2() > JOIN_EPSILON * JOIN_EPSILON {
            return d;
        }
        seg.p3 - seg.p0
    }
}

fn validate_segments(segments: &[CubicBez]) -> TraceResult<()> {
    if segments.is_empty() {
        return Err(TraceError::validation(
            "curve must have at least one segment",
        ));
    }
    for (i, s) in segments.iter().enumerate() {
        if ![s.p0, s.p1, s.p2, s.p3].iter().all(|p| p.is_finite()) {
            return Err(TraceError::validation(format!(
                "segment {i} has non-finite control points"
            )));
        }
    }
    for (i, w) in segments.windows(2).enumerate() {
        if !points_coincide(w[0].p3, w[1].p0) {
            return Err(TraceError::validation(format!(
                "segment {} does not start where segment {i} ends",
                i + 1
            )));
        }
    }
    Ok(())
}

fn validate_thresholds(thresholds: &[Threshold]) -> TraceResult<()> {
    let mut seen = HashSet::new();
    for th in thresholds {
        if th.label.trim().is_empty() {
            return Err(TraceError::validation("threshold label must be non-empty"));
        }
        if !seen.insert(th.label.as_str()) {
            return Err(TraceError::validation(format!(
                "duplicate threshold label '{}'",
                th.label
            )));
        }
        if !is_unit(th.offset_percent) {
            return Err(TraceError::validation(format!(
                "threshold '{}' offset_percent must be in [0, 1]",
                th.label
            )));
        }
        if !is_unit(th.reveal_progress) {
            return Err(TraceError::validation(format!(
                "threshold '{}' reveal_progress must be in [0, 1]",
                th.label
            )));
        }
    }
    for w in thresholds.windows(2) {
        if w[0].offset_percent > w[1].offset_percent {
            return Err(TraceError::validation(
                "thresholds must be sorted by offset_percent",
            ));
        }
        if w[0].reveal_progress > w[1].reveal_progress {
            return Err(TraceError::validation(format!(
                "threshold '{}' reveals before '{}' although it sits further along the curve",
                w[1].label, w[0].label
            )));
        }
    }
    Ok(())
}

fn line_to_cubic(a: Point, b: Point) -> CubicBez {
    CubicBez::new(a, a.lerp(b, 1.0 / 3.0), a.lerp(b, 2.0 / 3.0), b)
}

fn cubics_from_path(path: &BezPath) -> TraceResult<Vec<CubicBez>> {
    let mut out = Vec::new();
    let mut subpath_start: Option<Point> = None;
    let mut last: Option<Point> = None;

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                if !out.is_empty() {
                    return Err(TraceError::validation(
                        "curve path must be a single continuous subpath",
                    ));
                }
                subpath_start = Some(p);
                last = Some(p);
            }
            PathEl::LineTo(p) => {
                let a = last.ok_or_else(|| TraceError::validation("path must start with M"))?;
                out.push(line_to_cubic(a, p));
                last = Some(p);
            }
            PathEl::QuadTo(p1, p2) => {
                let a = last.ok_or_else(|| TraceError::validation("path must start with M"))?;
                out.push(QuadBez::new(a, p1, p2).raise());
                last = Some(p2);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let a = last.ok_or_else(|| TraceError::validation("path must start with M"))?;
                out.push(CubicBez::new(a, p1, p2, p3));
                last = Some(p3);
            }
            PathEl::ClosePath => {
                if let (Some(a), Some(s)) = (last, subpath_start) {
                    if !points_coincide(a, s) {
                        out.push(line_to_cubic(a, s));
                    }
                    last = Some(s);
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/curve/model.rs"]
mod tests;
