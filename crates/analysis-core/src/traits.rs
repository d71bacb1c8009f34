use async_trait::async_trait;
use crate::{AnalysisError, AnalysisReport, AssetSnapshot, FinancialRecord};

/// Trait for fundamental scoring engines.
///
/// Evaluation is synchronous and infallible: missing inputs degrade
/// individual criteria instead of failing the report.
pub trait FundamentalAnalyzer: Send + Sync {
    fn evaluate(&self, record: &FinancialRecord) -> AnalysisReport;
}

/// Trait for upstream financial-data sources.
#[async_trait]
pub trait FinancialDataProvider: Send + Sync {
    /// `Ok(None)` means the provider answered but had nothing for `symbol`.
    async fn fetch_asset(&self, symbol: &str) -> Result<Option<AssetSnapshot>, AnalysisError>;
}
