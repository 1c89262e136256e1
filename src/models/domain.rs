use serde::{Deserialize, Serialize};

/// Industry assumed when a request does not name one
pub const DEFAULT_INDUSTRY: &str = "SaaS";
/// Location assumed when a request does not name one
pub const DEFAULT_LOCATION: &str = "US";

/// Free-text description of a startup to be scored
///
/// Every field is optional; accessors resolve absent fields to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StartupInput {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl StartupInput {
    pub fn new(
        industry: impl Into<String>,
        location: impl Into<String>,
        audience: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            industry: Some(industry.into()),
            location: Some(location.into()),
            audience: Some(audience.into()),
            description: Some(description.into()),
        }
    }

    pub fn industry(&self) -> &str {
        self.industry.as_deref().unwrap_or(DEFAULT_INDUSTRY)
    }

    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or(DEFAULT_LOCATION)
    }

    pub fn audience(&self) -> &str {
        self.audience.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Lowercased `industry-location-audience-description` key that seeds metric synthesis
    pub fn canonical_key(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.industry(),
            self.location(),
            self.audience(),
            self.description()
        )
        .to_lowercase()
    }
}

/// The nine synthesized startup metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    MarketGrowthRate,
    CompetitionLevel,
    RegulatoryDifficulty,
    FundingAvailability,
    TechComplexity,
    MarketSizeBillions,
    TimeToMarketMonths,
    CustomerAcquisitionCost,
    RevenuePotential,
}

impl Metric {
    /// All metrics in feature-vector order
    pub const ALL: [Metric; 9] = [
        Metric::MarketGrowthRate,
        Metric::CompetitionLevel,
        Metric::RegulatoryDifficulty,
        Metric::FundingAvailability,
        Metric::TechComplexity,
        Metric::MarketSizeBillions,
        Metric::TimeToMarketMonths,
        Metric::CustomerAcquisitionCost,
        Metric::RevenuePotential,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::MarketGrowthRate => "market_growth_rate",
            Metric::CompetitionLevel => "competition_level",
            Metric::RegulatoryDifficulty => "regulatory_difficulty",
            Metric::FundingAvailability => "funding_availability",
            Metric::TechComplexity => "tech_complexity",
            Metric::MarketSizeBillions => "market_size_billions",
            Metric::TimeToMarketMonths => "time_to_market_months",
            Metric::CustomerAcquisitionCost => "customer_acquisition_cost",
            Metric::RevenuePotential => "revenue_potential",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

/// Raw metrics in their natural units (percent, 1-10 scales, billions, months, USD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawMetrics {
    pub market_growth_rate: f64,
    pub competition_level: f64,
    pub regulatory_difficulty: f64,
    pub funding_availability: f64,
    pub tech_complexity: f64,
    pub market_size_billions: f64,
    pub time_to_market_months: f64,
    pub customer_acquisition_cost: f64,
    pub revenue_potential: f64,
}

impl RawMetrics {
    pub fn from_fn(mut f: impl FnMut(Metric) -> f64) -> Self {
        Self {
            market_growth_rate: f(Metric::MarketGrowthRate),
            competition_level: f(Metric::CompetitionLevel),
            regulatory_difficulty: f(Metric::RegulatoryDifficulty),
            funding_availability: f(Metric::FundingAvailability),
            tech_complexity: f(Metric::TechComplexity),
            market_size_billions: f(Metric::MarketSizeBillions),
            time_to_market_months: f(Metric::TimeToMarketMonths),
            customer_acquisition_cost: f(Metric::CustomerAcquisitionCost),
            revenue_potential: f(Metric::RevenuePotential),
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::MarketGrowthRate => self.market_growth_rate,
            Metric::CompetitionLevel => self.competition_level,
            Metric::RegulatoryDifficulty => self.regulatory_difficulty,
            Metric::FundingAvailability => self.funding_availability,
            Metric::TechComplexity => self.tech_complexity,
            Metric::MarketSizeBillions => self.market_size_billions,
            Metric::TimeToMarketMonths => self.time_to_market_months,
            Metric::CustomerAcquisitionCost => self.customer_acquisition_cost,
            Metric::RevenuePotential => self.revenue_potential,
        }
    }

    /// Values in `Metric::ALL` order
    pub fn to_array(&self) -> [f64; 9] {
        Metric::ALL.map(|m| self.get(m))
    }
}

/// Metrics rescaled to 0-100 where higher is always more favorable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetrics {
    pub market_growth_rate: f64,
    pub competition_level: f64,
    pub regulatory_difficulty: f64,
    pub funding_availability: f64,
    pub tech_complexity: f64,
    pub market_size_billions: f64,
    pub time_to_market_months: f64,
    pub customer_acquisition_cost: f64,
    pub revenue_potential: f64,
}

impl NormalizedMetrics {
    pub fn from_fn(mut f: impl FnMut(Metric) -> f64) -> Self {
        Self {
            market_growth_rate: f(Metric::MarketGrowthRate),
            competition_level: f(Metric::CompetitionLevel),
            regulatory_difficulty: f(Metric::RegulatoryDifficulty),
            funding_availability: f(Metric::FundingAvailability),
            tech_complexity: f(Metric::TechComplexity),
            market_size_billions: f(Metric::MarketSizeBillions),
            time_to_market_months: f(Metric::TimeToMarketMonths),
            customer_acquisition_cost: f(Metric::CustomerAcquisitionCost),
            revenue_potential: f(Metric::RevenuePotential),
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::MarketGrowthRate => self.market_growth_rate,
            Metric::CompetitionLevel => self.competition_level,
            Metric::RegulatoryDifficulty => self.regulatory_difficulty,
            Metric::FundingAvailability => self.funding_availability,
            Metric::TechComplexity => self.tech_complexity,
            Metric::MarketSizeBillions => self.market_size_billions,
            Metric::TimeToMarketMonths => self.time_to_market_months,
            Metric::CustomerAcquisitionCost => self.customer_acquisition_cost,
            Metric::RevenuePotential => self.revenue_potential,
        }
    }
}

/// The four SWOT categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Strengths,
    Weaknesses,
    Opportunities,
    Threats,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Strengths,
        Category::Weaknesses,
        Category::Opportunities,
        Category::Threats,
    ];
}

/// Composite score per SWOT category (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub strengths: f64,
    pub weaknesses: f64,
    pub opportunities: f64,
    pub threats: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Strengths => self.strengths,
            Category::Weaknesses => self.weaknesses,
            Category::Opportunities => self.opportunities,
            Category::Threats => self.threats,
        }
    }
}

/// Qualitative bullet points per SWOT category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwotNarrative {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

impl SwotNarrative {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Strengths => &self.strengths,
            Category::Weaknesses => &self.weaknesses,
            Category::Opportunities => &self.opportunities,
            Category::Threats => &self.threats,
        }
    }
}

/// Complete scoring output for one startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub overall_score: f64,
    pub success_probability: f64,
    pub component_scores: CategoryScores,
    pub swot_analysis: SwotNarrative,
    pub metrics: NormalizedMetrics,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_defaults() {
        let input = StartupInput::default();
        assert_eq!(input.industry(), "SaaS");
        assert_eq!(input.location(), "US");
        assert_eq!(input.audience(), "");
        assert_eq!(input.canonical_key(), "saas-us--");
    }

    #[test]
    fn test_canonical_key_lowercases() {
        let input = StartupInput::new("FinTech", "US", "SMB", "B2B payments");
        assert_eq!(input.canonical_key(), "fintech-us-smb-b2b payments");
    }

    #[test]
    fn test_input_deserializes_empty_object() {
        let input: StartupInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, StartupInput::default());
    }

    #[test]
    fn test_metric_names_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_name(metric.name()), Some(metric));
        }
        assert_eq!(Metric::from_name("burn_rate"), None);
    }

    #[test]
    fn test_raw_metrics_array_order() {
        let raw = RawMetrics::from_fn(|m| Metric::ALL.iter().position(|x| *x == m).unwrap() as f64);
        assert_eq!(raw.to_array(), [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }
}
