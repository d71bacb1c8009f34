use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Sector classification of a company
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub sector: Option<String>,
    pub industry: Option<String>,
}

/// Key statistics, all expressed as fractions (0.085 = 8.5%)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyStatistics {
    pub dividend_yield: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub return_on_invested_capital: Option<f64>,
    pub payout_ratio: Option<f64>,
}

/// Balance sheet / operating figures used for leverage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialData {
    pub total_debt: Option<f64>,
    pub ebitda: Option<f64>,
}

/// One fiscal year of the income statement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub total_revenue: Option<f64>,
    pub net_income: Option<f64>,
}

/// One fiscal year of the cash flow statement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashflowStatement {
    pub operating_cashflow: Option<f64>,
}

/// Everything the scoring engine looks at for one asset.
///
/// Histories are ordered most recent fiscal year first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub symbol: String,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub profile: CompanyProfile,
    #[serde(default)]
    pub key_statistics: KeyStatistics,
    #[serde(default)]
    pub financial_data: FinancialData,
    #[serde(default)]
    pub income_history: Vec<IncomeStatement>,
    #[serde(default)]
    pub cashflow_history: Vec<CashflowStatement>,
}

/// Market quote shown alongside an analysis.
///
/// Uses brapi's field names on the wire, which the web client reads as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicQuote {
    pub symbol: String,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub currency: Option<String>,
    pub regular_market_price: Option<f64>,
    pub regular_market_change: Option<f64>,
    pub regular_market_change_percent: Option<f64>,
    pub market_cap: Option<f64>,
    #[serde(rename = "logourl")]
    pub logo_url: Option<String>,
}

/// Financial record plus quote, as returned by a data provider
#[derive(Debug, Clone)]
pub struct AssetSnapshot {
    pub record: FinancialRecord,
    pub quote: BasicQuote,
}

/// Outcome of a single criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub passed: bool,
    pub value: String,
    pub description: String,
}

impl CriterionResult {
    pub const NOT_AVAILABLE: &'static str = "N/A";

    pub fn new(passed: bool, value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            passed,
            value: value.into(),
            description: description.into(),
        }
    }

    /// Failed result for a criterion whose inputs are missing
    pub fn not_available(description: impl Into<String>) -> Self {
        Self::new(false, Self::NOT_AVAILABLE, description)
    }

    pub fn is_available(&self) -> bool {
        self.value != Self::NOT_AVAILABLE
    }
}

/// Criterion results keyed by criterion name, in evaluation order.
///
/// Serializes as a JSON object whose key order matches evaluation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriteriaResults(Vec<(&'static str, CriterionResult)>);

impl CriteriaResults {
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, key: &'static str, result: CriterionResult) {
        self.0.push((key, result));
    }

    pub fn get(&self, key: &str) -> Option<&CriterionResult> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, r)| r)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CriterionResult)> {
        self.0.iter().map(|(k, r)| (*k, r))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn passed_count(&self) -> usize {
        self.0.iter().filter(|(_, r)| r.passed).count()
    }
}

impl Serialize for CriteriaResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, result) in &self.0 {
            map.serialize_entry(key, result)?;
        }
        map.end()
    }
}

/// Recommendation derived from the Society score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "strong buy")]
    StrongBuy,
    #[serde(rename = "buy")]
    Buy,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "sell")]
    Sell,
}

impl Recommendation {
    /// Map a 0-100 score to a band. Lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => Recommendation::StrongBuy,
            s if s >= 60.0 => Recommendation::Buy,
            s if s >= 40.0 => Recommendation::Neutral,
            _ => Recommendation::Sell,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "strong buy",
            Recommendation::Buy => "buy",
            Recommendation::Neutral => "neutral",
            Recommendation::Sell => "sell",
        }
    }

    /// Human-readable label for the recommendation
    pub fn to_label(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "Strong Buy - excellent asset under the Society method",
            Recommendation::Buy => "Buy - good asset under the Society method",
            Recommendation::Neutral => "Neutral - average asset under the Society method",
            Recommendation::Sell => "Sell - asset not recommended by the Society method",
        }
    }
}

/// Full Society analysis of one asset
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub company_name: String,
    pub analysis_date: DateTime<Utc>,
    pub score: f64, // 0.0 to 100.0, two decimals
    pub criteria_results: CriteriaResults,
    pub recommendation: Recommendation,
    pub recommendation_label: String,
}
