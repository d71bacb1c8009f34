//! The nine Society criteria.
//!
//! Every criterion follows the same shape: extract its inputs from the
//! record, bail out with "N/A" when they are missing, compare against a
//! threshold and render the measured value.

use analysis_core::{CriterionResult, FinancialRecord, KeyStatistics};

/// Sector keywords considered structurally stable demand
pub const PERENNIAL_SECTORS: &[&str] = &[
    "utilities",
    "energy",
    "healthcare",
    "financial services",
    "banks",
    "insurance",
    "real estate",
    "consumer staples",
];

/// A single pass/fail check over a financial record.
pub trait Criterion: Send + Sync {
    /// Stable key used in the report
    fn key(&self) -> &'static str;

    /// Measure the criterion, or `None` when prerequisite data is missing.
    fn measure(&self, record: &FinancialRecord) -> Option<CriterionResult>;

    /// Description used when `measure` returns `None`
    fn missing_description(&self) -> String;

    fn evaluate(&self, record: &FinancialRecord) -> CriterionResult {
        self.measure(record)
            .unwrap_or_else(|| CriterionResult::not_available(self.missing_description()))
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Sector or industry contains one of [`PERENNIAL_SECTORS`].
pub struct PerennialSector;

impl Criterion for PerennialSector {
    fn key(&self) -> &'static str {
        "setor_perene"
    }

    fn measure(&self, record: &FinancialRecord) -> Option<CriterionResult> {
        let sector = non_empty(&record.profile.sector).map(str::to_lowercase);
        let industry = non_empty(&record.profile.industry).map(str::to_lowercase);
        let shown = sector.as_deref().or(industry.as_deref())?;

        let sector_lc = sector.as_deref().unwrap_or_default();
        let industry_lc = industry.as_deref().unwrap_or_default();
        let matched = PERENNIAL_SECTORS
            .iter()
            .find(|kw| sector_lc.contains(*kw) || industry_lc.contains(*kw));

        Some(match matched {
            Some(kw) => CriterionResult::new(true, shown, format!("Perennial sector ({})", kw)),
            None => CriterionResult::new(false, shown, "Sector is not perennial"),
        })
    }

    fn missing_description(&self) -> String {
        "Sector data not available".to_string()
    }
}

/// At least two of the last (up to) three fiscal years are positive.
///
/// Used for operating cash flow and net income.
pub struct PositiveYears {
    key: &'static str,
    subject: &'static str,
    unit: &'static str,
    series: fn(&FinancialRecord) -> Vec<Option<f64>>,
}

impl PositiveYears {
    pub const WINDOW: usize = 3;
    pub const MIN_POSITIVE: usize = 2;

    pub fn operating_cash_flow() -> Self {
        Self {
            key: "fluxo_caixa",
            subject: "Operating cash flow",
            unit: "positive years",
            series: |r| r.cashflow_history.iter().map(|y| y.operating_cashflow).collect(),
        }
    }

    pub fn consistent_profit() -> Self {
        Self {
            key: "lucros_consistentes",
            subject: "Net income",
            unit: "profitable years",
            series: |r| r.income_history.iter().map(|y| y.net_income).collect(),
        }
    }
}

impl Criterion for PositiveYears {
    fn key(&self) -> &'static str {
        self.key
    }

    fn measure(&self, record: &FinancialRecord) -> Option<CriterionResult> {
        let series = (self.series)(record);
        if series.is_empty() {
            return None;
        }

        let window = series.len().min(Self::WINDOW);
        // Absent values count as non-positive years
        let positive = series[..window]
            .iter()
            .filter(|v| v.is_some_and(|v| v > 0.0))
            .count();
        let passed = positive >= Self::MIN_POSITIVE;

        let description = if passed {
            format!("{} consistently positive", self.subject)
        } else {
            format!("{} inconsistent", self.subject)
        };
        Some(CriterionResult::new(
            passed,
            format!("{}/{} {}", positive, window, self.unit),
            description,
        ))
    }

    fn missing_description(&self) -> String {
        format!("{} history not available", self.subject)
    }
}

/// Latest fiscal-year revenue grew over the previous one.
pub struct RevenueGrowth;

impl Criterion for RevenueGrowth {
    fn key(&self) -> &'static str {
        "receita_crescente"
    }

    fn measure(&self, record: &FinancialRecord) -> Option<CriterionResult> {
        let [current, previous, ..] = record.income_history.as_slice() else {
            return None;
        };
        let current = current.total_revenue.filter(|v| *v != 0.0)?;
        let previous = previous.total_revenue.filter(|v| *v != 0.0)?;

        let growth = (current - previous) / previous * 100.0;
        let passed = growth > 0.0;
        let description = if passed {
            format!("Revenue grew {:.2}%", growth)
        } else {
            format!("Revenue dropped {:.2}%", growth.abs())
        };
        Some(CriterionResult::new(passed, format!("{:.2}%", growth), description))
    }

    fn missing_description(&self) -> String {
        "Insufficient revenue history to measure growth".to_string()
    }
}

/// Payout ratio within the limit for the asset type.
pub struct PayoutLimit;

impl PayoutLimit {
    pub const STOCK_LIMIT: f64 = 0.8;
    pub const FUND_LIMIT: f64 = 1.0;

    /// Fund-type tickers (FIIs) end in "11"
    pub fn is_fund_ticker(symbol: &str) -> bool {
        symbol.trim().ends_with("11")
    }

    pub fn limit_for(symbol: &str) -> f64 {
        if Self::is_fund_ticker(symbol) {
            Self::FUND_LIMIT
        } else {
            Self::STOCK_LIMIT
        }
    }
}

impl Criterion for PayoutLimit {
    fn key(&self) -> &'static str {
        "payout_aceitavel"
    }

    fn measure(&self, record: &FinancialRecord) -> Option<CriterionResult> {
        let payout = record.key_statistics.payout_ratio?;
        let limit = Self::limit_for(&record.symbol);

        Some(CriterionResult::new(
            payout <= limit,
            percent(payout),
            format!("Payout of {} (limit: {:.0}%)", percent(payout), limit * 100.0),
        ))
    }

    fn missing_description(&self) -> String {
        "Payout data not available".to_string()
    }
}

/// Total debt below three times EBITDA.
pub struct DebtToEbitda;

impl DebtToEbitda {
    pub const MAX_RATIO: f64 = 3.0;
}

impl Criterion for DebtToEbitda {
    fn key(&self) -> &'static str {
        "pouca_divida"
    }

    fn measure(&self, record: &FinancialRecord) -> Option<CriterionResult> {
        let debt = record.financial_data.total_debt.filter(|d| *d != 0.0)?;
        let ebitda = record.financial_data.ebitda.filter(|e| *e > 0.0)?;

        let ratio = debt / ebitda;
        Some(CriterionResult::new(
            ratio < Self::MAX_RATIO,
            format!("{:.2}x", ratio),
            format!("Debt/EBITDA of {:.2}x (limit: {:.1}x)", ratio, Self::MAX_RATIO),
        ))
    }

    fn missing_description(&self) -> String {
        "Debt or EBITDA data not available".to_string()
    }
}

/// A key statistic strictly above a minimum.
///
/// Used for dividend yield, ROE and ROIC.
pub struct MinimumRatio {
    key: &'static str,
    label: &'static str,
    minimum: f64,
    extract: fn(&KeyStatistics) -> Option<f64>,
}

impl MinimumRatio {
    pub fn dividend_yield() -> Self {
        Self {
            key: "bons_dividendos",
            label: "Dividend Yield",
            minimum: 0.04,
            extract: |s| s.dividend_yield,
        }
    }

    pub fn return_on_equity() -> Self {
        Self {
            key: "bom_roe",
            label: "ROE",
            minimum: 0.15,
            extract: |s| s.return_on_equity,
        }
    }

    pub fn return_on_invested_capital() -> Self {
        Self {
            key: "bom_roic",
            label: "ROIC",
            minimum: 0.12,
            extract: |s| s.return_on_invested_capital,
        }
    }
}

impl Criterion for MinimumRatio {
    fn key(&self) -> &'static str {
        self.key
    }

    fn measure(&self, record: &FinancialRecord) -> Option<CriterionResult> {
        let ratio = (self.extract)(&record.key_statistics)?;

        Some(CriterionResult::new(
            ratio > self.minimum,
            percent(ratio),
            format!(
                "{} of {} (minimum: {:.0}%)",
                self.label,
                percent(ratio),
                self.minimum * 100.0
            ),
        ))
    }

    fn missing_description(&self) -> String {
        format!("{} data not available", self.label)
    }
}
