use crate::models::{Category, CategoryScores, Metric, NormalizedMetrics};

/// One weighted metric inside a category score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedTerm {
    pub metric: Metric,
    pub weight: f64,
    /// Use `100 - value` so that unfavorable conditions raise the score
    pub inverted: bool,
}

const fn term(metric: Metric, weight: f64) -> WeightedTerm {
    WeightedTerm {
        metric,
        weight,
        inverted: false,
    }
}

const fn inverted(metric: Metric, weight: f64) -> WeightedTerm {
    WeightedTerm {
        metric,
        weight,
        inverted: true,
    }
}

pub const STRENGTH_TERMS: [WeightedTerm; 4] = [
    term(Metric::MarketGrowthRate, 0.30),
    term(Metric::FundingAvailability, 0.25),
    term(Metric::TechComplexity, 0.20),
    term(Metric::RevenuePotential, 0.25),
];

pub const WEAKNESS_TERMS: [WeightedTerm; 3] = [
    inverted(Metric::TimeToMarketMonths, 0.40),
    inverted(Metric::CustomerAcquisitionCost, 0.35),
    inverted(Metric::RegulatoryDifficulty, 0.25),
];

pub const OPPORTUNITY_TERMS: [WeightedTerm; 3] = [
    term(Metric::MarketSizeBillions, 0.40),
    term(Metric::MarketGrowthRate, 0.35),
    term(Metric::FundingAvailability, 0.25),
];

pub const THREAT_TERMS: [WeightedTerm; 3] = [
    inverted(Metric::CompetitionLevel, 0.40),
    inverted(Metric::RegulatoryDifficulty, 0.35),
    inverted(Metric::CustomerAcquisitionCost, 0.25),
];

/// Weight of each category in the overall score; weaknesses and threats subtract
pub const OVERALL_WEIGHTS: [(Category, f64); 4] = [
    (Category::Strengths, 0.30),
    (Category::Opportunities, 0.30),
    (Category::Weaknesses, -0.20),
    (Category::Threats, -0.20),
];

pub fn category_terms(category: Category) -> &'static [WeightedTerm] {
    match category {
        Category::Strengths => &STRENGTH_TERMS,
        Category::Weaknesses => &WEAKNESS_TERMS,
        Category::Opportunities => &OPPORTUNITY_TERMS,
        Category::Threats => &THREAT_TERMS,
    }
}

/// Weighted sum of a category's terms, clipped to 0-100
pub fn category_score(category: Category, metrics: &NormalizedMetrics) -> f64 {
    category_terms(category)
        .iter()
        .map(|t| {
            let value = metrics.get(t.metric);
            let value = if t.inverted { 100.0 - value } else { value };
            value * t.weight
        })
        .sum::<f64>()
        .clamp(0.0, 100.0)
}

/// Calculate the four SWOT category scores
///
/// Scoring formula:
/// strengths     = growth * 0.30 + funding * 0.25 + tech * 0.20 + revenue * 0.25
/// weaknesses    = (100 - time_to_market) * 0.40 + (100 - cac) * 0.35 + (100 - regulation) * 0.25
/// opportunities = market_size * 0.40 + growth * 0.35 + funding * 0.25
/// threats       = (100 - competition) * 0.40 + (100 - regulation) * 0.35 + (100 - cac) * 0.25
pub fn score(metrics: &NormalizedMetrics) -> CategoryScores {
    CategoryScores {
        strengths: category_score(Category::Strengths, metrics),
        weaknesses: category_score(Category::Weaknesses, metrics),
        opportunities: category_score(Category::Opportunities, metrics),
        threats: category_score(Category::Threats, metrics),
    }
}

/// Overall score from unrounded category scores, clipped to 0-100 and rounded to one decimal
pub fn overall_score(scores: &CategoryScores) -> f64 {
    let total: f64 = OVERALL_WEIGHTS
        .iter()
        .map(|(category, weight)| scores.get(*category) * weight)
        .sum();
    round1(total.clamp(0.0, 100.0))
}

/// Category scores rounded for presentation
pub fn rounded(scores: &CategoryScores) -> CategoryScores {
    CategoryScores {
        strengths: round1(scores.strengths),
        weaknesses: round1(scores.weaknesses),
        opportunities: round1(scores.opportunities),
        threats: round1(scores.threats),
    }
}

#[inline]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
