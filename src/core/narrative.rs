use crate::models::{Metric, NormalizedMetrics, StartupInput, SwotNarrative};

pub const MIN_POINTS: usize = 2;
pub const MAX_POINTS: usize = 4;
pub const MAX_RECOMMENDATIONS: usize = 5;

const INDUSTRY_PLACEHOLDER: &str = "{industry}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Above,
    Below,
}

/// Emits `text` when a normalized metric crosses `threshold`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub metric: Metric,
    pub comparison: Comparison,
    pub threshold: f64,
    /// May contain `{industry}`
    pub text: &'static str,
}

impl Rule {
    const fn above(metric: Metric, threshold: f64, text: &'static str) -> Self {
        Self {
            metric,
            comparison: Comparison::Above,
            threshold,
            text,
        }
    }

    const fn below(metric: Metric, threshold: f64, text: &'static str) -> Self {
        Self {
            metric,
            comparison: Comparison::Below,
            threshold,
            text,
        }
    }

    pub fn matches(&self, metrics: &NormalizedMetrics) -> bool {
        let value = metrics.get(self.metric);
        match self.comparison {
            Comparison::Above => value > self.threshold,
            Comparison::Below => value < self.threshold,
        }
    }

    pub fn render(&self, industry: &str) -> String {
        self.text.replace(INDUSTRY_PLACEHOLDER, industry)
    }
}

pub const STRENGTH_RULES: [Rule; 4] = [
    Rule::above(Metric::MarketGrowthRate, 70.0, "Operating in a high-growth {industry} market"),
    Rule::above(Metric::TechComplexity, 60.0, "Strong technical differentiation and barriers to entry"),
    Rule::above(Metric::FundingAvailability, 70.0, "Access to abundant funding opportunities"),
    Rule::above(Metric::RevenuePotential, 75.0, "High revenue generation potential"),
];

pub const WEAKNESS_RULES: [Rule; 3] = [
    Rule::below(Metric::TimeToMarketMonths, 40.0, "Extended time-to-market may delay competitive advantage"),
    Rule::below(Metric::CustomerAcquisitionCost, 50.0, "High customer acquisition costs may impact profitability"),
    Rule::below(
        Metric::RegulatoryDifficulty,
        30.0,
        "Complex regulatory environment requires significant compliance investment",
    ),
];

pub const OPPORTUNITY_RULES: [Rule; 3] = [
    Rule::above(Metric::MarketSizeBillions, 60.0, "Large addressable market in {industry} sector"),
    Rule::above(Metric::MarketGrowthRate, 60.0, "Market expansion driven by increasing demand"),
    Rule::above(Metric::FundingAvailability, 60.0, "Favorable investment climate for scaling operations"),
];

pub const THREAT_RULES: [Rule; 3] = [
    Rule::below(Metric::CompetitionLevel, 40.0, "Intense competition from established players"),
    Rule::below(Metric::RegulatoryDifficulty, 40.0, "Regulatory changes could impact business model"),
    Rule::below(Metric::CustomerAcquisitionCost, 40.0, "Rising customer acquisition costs in competitive market"),
];

pub const STRENGTH_FILLERS: [&str; 2] = [
    "Innovative approach to solving market problems",
    "Agile development and quick adaptation capabilities",
];

pub const WEAKNESS_FILLERS: [&str; 2] = [
    "Limited brand recognition in competitive market",
    "Resource constraints typical of early-stage ventures",
];

pub const OPPORTUNITY_FILLERS: [&str; 2] = [
    "Potential for strategic partnerships and collaborations",
    "Emerging technology trends creating new market segments",
];

pub const THREAT_FILLERS: [&str; 2] = [
    "Economic uncertainty affecting investment and spending",
    "Rapid technological changes requiring continuous innovation",
];

pub const RECOMMENDATION_RULES: [Rule; 4] = [
    Rule::above(Metric::TechComplexity, 60.0, "Leverage technical advantages to build strong IP portfolio"),
    Rule::below(
        Metric::CustomerAcquisitionCost,
        50.0,
        "Focus on optimizing customer acquisition channels and reducing CAC",
    ),
    Rule::above(Metric::MarketGrowthRate, 60.0, "Accelerate market entry to capture growth opportunities"),
    Rule::below(
        Metric::CompetitionLevel,
        40.0,
        "Develop unique value proposition to differentiate from competitors",
    ),
];

pub const GENERAL_RECOMMENDATIONS: [&str; 3] = [
    "Establish key performance indicators to track progress",
    "Build strategic partnerships to accelerate growth",
    "Maintain lean operations while scaling capabilities",
];

/// Matching rule sentences, topped up with fillers to `MIN_POINTS` and capped at `MAX_POINTS`
fn collect_points(
    rules: &[Rule],
    fillers: &[&str],
    metrics: &NormalizedMetrics,
    industry: &str,
) -> Vec<String> {
    let mut points: Vec<String> = rules
        .iter()
        .filter(|rule| rule.matches(metrics))
        .map(|rule| rule.render(industry))
        .collect();

    for filler in fillers {
        if points.len() >= MIN_POINTS {
            break;
        }
        points.push((*filler).to_string());
    }

    points.truncate(MAX_POINTS);
    points
}

/// Build the qualitative SWOT bullet lists for a startup
pub fn narrate(metrics: &NormalizedMetrics, input: &StartupInput) -> SwotNarrative {
    let industry = input.industry();
    SwotNarrative {
        strengths: collect_points(&STRENGTH_RULES, &STRENGTH_FILLERS, metrics, industry),
        weaknesses: collect_points(&WEAKNESS_RULES, &WEAKNESS_FILLERS, metrics, industry),
        opportunities: collect_points(&OPPORTUNITY_RULES, &OPPORTUNITY_FILLERS, metrics, industry),
        threats: collect_points(&THREAT_RULES, &THREAT_FILLERS, metrics, industry),
    }
}

/// Condition-gated recommendations first, then general ones, capped at `MAX_RECOMMENDATIONS`
pub fn recommend(metrics: &NormalizedMetrics, _narrative: &SwotNarrative) -> Vec<String> {
    RECOMMENDATION_RULES
        .iter()
        .filter(|rule| rule.matches(metrics))
        .map(|rule| rule.text.to_string())
        .chain(GENERAL_RECOMMENDATIONS.iter().map(|s| (*s).to_string()))
        .take(MAX_RECOMMENDATIONS)
        .collect()
}
