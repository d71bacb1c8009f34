//! Society Analysis API Routes

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use analysis_core::{AnalysisReport, BasicQuote, FundamentalAnalyzer};
use serde::Serialize;

use crate::demo_data::{demo_asset, DEMO_MESSAGE};
use crate::{AppError, AppState};

#[derive(Debug, Serialize)]
pub struct AssetAnalysis {
    #[serde(flatten)]
    pub report: AnalysisReport,
    pub basic_data: BasicQuote,
    pub demo_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_message: Option<String>,
}

pub fn analysis_routes() -> Router<AppState> {
    Router::new().route("/analyze/:symbol", get(analyze_asset))
}

async fn analyze_asset(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<AssetAnalysis>, AppError> {
    let symbol = symbol.trim().to_uppercase();

    let fetched = match &state.provider {
        Some(provider) => provider
            .fetch_asset(&symbol)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to fetch {}: {}", symbol, e))?,
        None => None,
    };

    let (snapshot, demo_mode) = match fetched {
        Some(snapshot) => (snapshot, false),
        None => {
            if state.provider.is_some() {
                tracing::warn!("No provider data for {}, falling back to demo data", symbol);
            }
            (demo_asset(&symbol), true)
        }
    };

    let report = state.engine.evaluate(&snapshot.record);
    tracing::info!(
        "Analyzed {}: score {:.2} ({}){}",
        report.symbol,
        report.score,
        report.recommendation.as_str(),
        if demo_mode { " [demo]" } else { "" }
    );

    Ok(Json(AssetAnalysis {
        report,
        basic_data: snapshot.quote,
        demo_mode,
        demo_message: demo_mode.then(|| DEMO_MESSAGE.to_string()),
    }))
}
