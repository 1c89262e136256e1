use std::sync::Arc;

use crate::core::{
    error::PredictorError,
    narrative::{narrate, recommend},
    normalize::normalize,
    predictor::{FittedPredictor, TrainingParams},
    scoring::{overall_score, round1, rounded, score},
    synth::synthesize,
};
use crate::models::{ScoringResult, StartupInput};

/// Main scoring orchestrator - runs the SWOT pipeline for one startup
///
/// # Pipeline Stages
/// 1. Metric synthesis from the input text
/// 2. Normalization to a 0-100 favorability scale
/// 3. Composite SWOT scoring
/// 4. Success prediction from raw metrics
/// 5. Narrative and recommendations
///
/// The fitted predictor is built once in `new` and shared by every clone.
#[derive(Debug, Clone)]
pub struct SwotEngine {
    predictor: Arc<FittedPredictor>,
}

impl SwotEngine {
    /// Train the success predictor and build an engine around it
    pub fn new(params: &TrainingParams) -> Result<Self, PredictorError> {
        let predictor = FittedPredictor::train(params)?;
        Ok(Self::from_predictor(predictor))
    }

    pub fn with_default_params() -> Result<Self, PredictorError> {
        Self::new(&TrainingParams::default())
    }

    pub fn from_predictor(predictor: FittedPredictor) -> Self {
        Self {
            predictor: Arc::new(predictor),
        }
    }

    pub fn predictor(&self) -> &FittedPredictor {
        &self.predictor
    }

    /// Score a startup
    ///
    /// Never fails: predictor problems degrade to a neutral success probability.
    pub fn analyze(&self, input: &StartupInput) -> ScoringResult {
        let raw = synthesize(input);
        let metrics = normalize(&raw);

        let scores = score(&metrics);
        let overall = overall_score(&scores);

        let success_probability = round1(self.predictor.predict(input));

        let swot_analysis = narrate(&metrics, input);
        let recommendations = recommend(&metrics, &swot_analysis);

        tracing::debug!(
            industry = input.industry(),
            overall_score = overall,
            success_probability,
            "Scored startup"
        );

        ScoringResult {
            overall_score: overall,
            success_probability,
            component_scores: rounded(&scores),
            swot_analysis,
            metrics,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forest::ForestParams;

    fn engine() -> SwotEngine {
        SwotEngine::new(&TrainingParams {
            samples: 200,
            forest: ForestParams {
                n_trees: 5,
                ..ForestParams::default()
            },
            ..TrainingParams::default()
        })
        .unwrap()
    }

    #[test]
    fn test_analyze_fills_every_field() {
        let result = engine().analyze(&StartupInput::default());

        assert!((0.0..=100.0).contains(&result.overall_score));
        assert!((0.0..=100.0).contains(&result.success_probability));
        assert!((2..=4).contains(&result.swot_analysis.strengths.len()));
        assert!(!result.recommendations.is_empty());
        assert!(result.recommendations.len() <= 5);
    }

    #[test]
    fn test_clones_share_predictor() {
        let a = engine();
        let b = a.clone();
        assert!(std::ptr::eq(a.predictor(), b.predictor()));
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let engine = engine();
        let input = StartupInput::new("EdTech", "Asia", "Universities", "Adaptive tutoring");
        assert_eq!(engine.analyze(&input), engine.analyze(&input));
    }
}
