//! JSON configuration for one engine: curve, thresholds and tuning constants.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    curve::model::{CurveModel, DEFAULT_ARCLEN_ACCURACY, Threshold},
    curve::sampler::{CurveSampler, DEFAULT_LOOKAHEAD},
    engine::orchestrator::AnimationEngine,
    engine::render::RenderStyle,
    foundation::error::{TraceError, TraceResult},
    progress::tracker::{DEFAULT_SPEED_MULTIPLIER, ProgressTracker},
};

/// The flight path of the mentorship journey page.
pub const JOURNEY_PATH: &str =
    "M 150 50 C 450 50, 650 200, 650 400 C 650 600, 250 700, 150 800 C 50 900, 150 1100, 350 1200";

fn default_speed_multiplier() -> f64 {
    DEFAULT_SPEED_MULTIPLIER
}

fn default_lookahead() -> f64 {
    DEFAULT_LOOKAHEAD
}

fn default_arclen_accuracy() -> f64 {
    DEFAULT_ARCLEN_ACCURACY
}

/// Everything needed to build an [`AnimationEngine`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// SVG path data of the curve (`d` attribute).
    pub path: String,
    /// Label thresholds, sorted by `offset_percent`.
    #[serde(default)]
    pub thresholds: Vec<Threshold>,
    /// Multiplier applied to the clamped scroll ratio.
    #[serde(default = "default_speed_multiplier")]
    pub speed_multiplier: f64,
    /// Lookahead distance for the tangent chord, in curve units.
    #[serde(default = "default_lookahead")]
    pub lookahead: f64,
    /// Accuracy of arc-length solves, in curve units.
    #[serde(default = "default_arclen_accuracy")]
    pub arclen_accuracy: f64,
    /// Marker and label styling.
    #[serde(default)]
    pub style: RenderStyle,
}

impl EngineConfig {
    /// A config for `path` with no labels and default tuning.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            thresholds: Vec::new(),
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            lookahead: DEFAULT_LOOKAHEAD,
            arclen_accuracy: DEFAULT_ARCLEN_ACCURACY,
            style: RenderStyle::default(),
        }
    }

    /// The journey page: three-segment flight path with four milestone labels.
    pub fn journey() -> Self {
        Self {
            thresholds: vec![
                Threshold::new("First Solo", 0.18, 0.15),
                Threshold::new("Private Pilot License", 0.26, 0.23),
                Threshold::reversed("Commercial License", 0.22, 0.75),
                Threshold::reversed("IFR Rated", 0.16, 0.82),
            ],
            ..Self::new(JOURNEY_PATH)
        }
    }

    /// Replace the speed multiplier.
    pub fn with_speed_multiplier(mut self, speed_multiplier: f64) -> Self {
        self.speed_multiplier = speed_multiplier;
        self
    }

    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TraceResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TraceError::serde(format!("parse engine config JSON: {e}")))
    }

    /// Parse a config from a JSON string.
    pub fn from_json_str(s: &str) -> TraceResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| TraceError::serde(format!("parse engine config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TraceResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TraceError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> TraceResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TraceError::serde(format!("serialize engine config: {e}")))
    }

    /// Check tuning values and the curve definition without keeping the result.
    pub fn validate(&self) -> TraceResult<()> {
        self.parts().map(|_| ())
    }

    /// Parse the path and validate thresholds into a [`CurveModel`].
    pub fn build_curve(&self) -> TraceResult<CurveModel> {
        CurveModel::from_svg_with_accuracy(
            &self.path,
            self.thresholds.clone(),
            self.arclen_accuracy,
        )
    }

    /// Validate everything and assemble an unmounted [`AnimationEngine`].
    #[tracing::instrument(skip_all)]
    pub fn build(&self) -> TraceResult<AnimationEngine> {
        let (curve, sampler, tracker) = self.parts()?;
        tracing::debug!(
            segments = curve.segments().len(),
            length = curve.length(),
            thresholds = curve.thresholds().len(),
            speed = self.speed_multiplier,
            "engine built"
        );
        Ok(AnimationEngine::with_parts(curve, sampler, tracker))
    }

    fn parts(&self) -> TraceResult<(CurveModel, CurveSampler, ProgressTracker)> {
        let tracker = ProgressTracker::new(self.speed_multiplier)?;
        let sampler = CurveSampler::new(self.lookahead)?;
        self.style.validate()?;
        let curve = self.build_curve()?;
        Ok((curve, sampler, tracker))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::journey()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
