//! Symbol Search API Routes
//!
//! Searches a fixed list of popular B3 stocks and real-estate funds.

use axum::{extract::Path, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

pub const MAX_SEARCH_RESULTS: usize = 10;

const POPULAR_ASSETS: &[(&str, &str)] = &[
    ("PETR4", "Petróleo Brasileiro S.A. - Petrobras"),
    ("VALE3", "Vale S.A."),
    ("ITUB4", "Itaú Unibanco Holding S.A."),
    ("BBDC4", "Banco Bradesco S.A."),
    ("ABEV3", "Ambev S.A."),
    ("WEGE3", "WEG S.A."),
    ("MGLU3", "Magazine Luiza S.A."),
    ("HGLG11", "CSHG Logística FII"),
    ("KNRI11", "Kinea Renda Imobiliária FII"),
    ("XPML11", "XP Malls FII"),
    ("VISC11", "Vinci Shopping Centers FII"),
    ("BCFF11", "BTG Pactual Fundo de CRI FII"),
];

#[derive(Debug, Serialize)]
pub struct SymbolSearchResult {
    pub symbol: String,
    pub name: String,
}

pub fn symbol_routes() -> Router<AppState> {
    Router::new().route("/search/:query", get(search_symbols))
}

/// Case-insensitive substring match on symbol or name.
pub fn search_assets(query: &str) -> Vec<SymbolSearchResult> {
    let q = query.trim().to_uppercase();
    POPULAR_ASSETS
        .iter()
        .filter(|(symbol, name)| {
            symbol.contains(q.as_str()) || name.to_uppercase().contains(q.as_str())
        })
        .take(MAX_SEARCH_RESULTS)
        .map(|(symbol, name)| SymbolSearchResult {
            symbol: symbol.to_string(),
            name: name.to_string(),
        })
        .collect()
}

async fn search_symbols(Path(query): Path<String>) -> Json<Vec<SymbolSearchResult>> {
    let results = search_assets(&query);
    tracing::debug!("Symbol search '{}' matched {} assets", query, results.len());
    Json(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let results = search_assets("fii");
        let symbols: Vec<_> = results.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["HGLG11", "KNRI11", "XPML11", "VISC11", "BCFF11"]);
    }

    #[test]
    fn test_search_matches_symbol() {
        let results = search_assets("itub");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Itaú Unibanco Holding S.A.");
    }

    #[test]
    fn test_search_matches_accented_names() {
        let results = search_assets("petróleo");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "PETR4");
    }

    #[test]
    fn test_search_is_capped() {
        let results = search_assets("a");
        assert_eq!(results.len(), MAX_SEARCH_RESULTS);
        assert_eq!(results[0].symbol, "PETR4");
    }

    #[test]
    fn test_search_without_matches() {
        assert!(search_assets("zzz").is_empty());
    }
}
