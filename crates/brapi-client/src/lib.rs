use analysis_core::{
    AnalysisError, AssetSnapshot, BasicQuote, CashflowStatement, CompanyProfile, FinancialData,
    FinancialDataProvider, FinancialRecord, IncomeStatement, KeyStatistics,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://brapi.dev/api";

/// Quote modules needed by the Society analysis
const FUNDAMENTAL_MODULES: &[&str] = &[
    "summaryProfile",
    "defaultKeyStatistics",
    "financialData",
    "incomeStatementHistory",
    "cashflowHistory",
];

#[derive(Clone)]
pub struct BrapiClient {
    token: String,
    base_url: String,
    client: Client,
}

impl BrapiClient {
    pub fn new(token: String, base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch quote and fundamentals for a symbol.
    ///
    /// A non-success status or an empty result set yields `Ok(None)`.
    /// Transport failures are `ApiError`, undecodable bodies `InvalidData`.
    pub async fn get_asset(&self, symbol: &str) -> Result<Option<AssetSnapshot>, AnalysisError> {
        let symbol = symbol.trim().to_uppercase();
        let url = format!("{}/quote/{}", self.base_url, symbol);
        let modules = FUNDAMENTAL_MODULES.join(",");

        let response = self
            .client
            .get(&url)
            .query(&[("modules", modules.as_str()), ("token", self.token.as_str())])
            .send()
            .await
            .map_err(|e| AnalysisError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            tracing::warn!("brapi quote for {} returned HTTP {}", symbol, response.status());
            return Ok(None);
        }

        let quote_response: QuoteResponse = response
            .json()
            .await
            .map_err(|e| {
                AnalysisError::InvalidData(format!("malformed quote for {}: {}", symbol, e))
            })?;

        Ok(quote_response.into_snapshot())
    }
}

#[async_trait]
impl FinancialDataProvider for BrapiClient {
    async fn fetch_asset(&self, symbol: &str) -> Result<Option<AssetSnapshot>, AnalysisError> {
        self.get_asset(symbol).await
    }
}

// Response structures
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    results: Vec<QuoteResult>,
}

impl QuoteResponse {
    fn into_snapshot(self) -> Option<AssetSnapshot> {
        self.results.into_iter().next().map(QuoteResult::into_snapshot)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResult {
    symbol: String,
    long_name: Option<String>,
    short_name: Option<String>,
    currency: Option<String>,
    regular_market_price: Option<f64>,
    regular_market_change: Option<f64>,
    regular_market_change_percent: Option<f64>,
    market_cap: Option<f64>,
    #[serde(rename = "logourl")]
    logo_url: Option<String>,
    #[serde(default)]
    summary_profile: Option<SummaryProfile>,
    #[serde(default)]
    default_key_statistics: Option<DefaultKeyStatistics>,
    #[serde(default)]
    financial_data: Option<FinancialDataModule>,
    #[serde(default)]
    income_statement_history: Option<Vec<IncomeStatementEntry>>,
    #[serde(default)]
    cashflow_history: Option<Vec<CashflowEntry>>,
}

#[derive(Debug, Deserialize)]
struct SummaryProfile {
    sector: Option<String>,
    industry: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DefaultKeyStatistics {
    dividend_yield: Option<f64>,
    return_on_equity: Option<f64>,
    return_on_invested_capital: Option<f64>,
    payout_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialDataModule {
    total_debt: Option<f64>,
    ebitda: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomeStatementEntry {
    total_revenue: Option<f64>,
    net_income: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CashflowEntry {
    operating_cashflow: Option<f64>,
}

impl QuoteResult {
    fn into_snapshot(self) -> AssetSnapshot {
        let profile = self
            .summary_profile
            .map(|p| CompanyProfile {
                sector: p.sector,
                industry: p.industry,
            })
            .unwrap_or_default();

        let key_statistics = self
            .default_key_statistics
            .map(|s| KeyStatistics {
                dividend_yield: s.dividend_yield,
                return_on_equity: s.return_on_equity,
                return_on_invested_capital: s.return_on_invested_capital,
                payout_ratio: s.payout_ratio,
            })
            .unwrap_or_default();

        let financial_data = self
            .financial_data
            .map(|f| FinancialData {
                total_debt: f.total_debt,
                ebitda: f.ebitda,
            })
            .unwrap_or_default();

        // brapi lists fiscal years most recent first, same as the record
        let income_history = self
            .income_statement_history
            .unwrap_or_default()
            .into_iter()
            .map(|e| IncomeStatement {
                total_revenue: e.total_revenue,
                net_income: e.net_income,
            })
            .collect();

        let cashflow_history = self
            .cashflow_history
            .unwrap_or_default()
            .into_iter()
            .map(|e| CashflowStatement {
                operating_cashflow: e.operating_cashflow,
            })
            .collect();

        let quote = BasicQuote {
            symbol: self.symbol.clone(),
            long_name: self.long_name.clone(),
            short_name: self.short_name,
            currency: self.currency,
            regular_market_price: self.regular_market_price,
            regular_market_change: self.regular_market_change,
            regular_market_change_percent: self.regular_market_change_percent,
            market_cap: self.market_cap,
            logo_url: self.logo_url,
        };

        AssetSnapshot {
            record: FinancialRecord {
                symbol: self.symbol,
                long_name: self.long_name,
                profile,
                key_statistics,
                financial_data,
                income_history,
                cashflow_history,
            },
            quote,
        }
    }
}
