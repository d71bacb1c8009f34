//! Canned assets served when no brapi token is configured or brapi has
//! nothing for the requested symbol.

use analysis_core::{
    AssetSnapshot, BasicQuote, CashflowStatement, CompanyProfile, FinancialData, FinancialRecord,
    IncomeStatement, KeyStatistics,
};

pub const DEMO_MESSAGE: &str =
    "Demonstration data - configure your brapi.dev token (BRAPI_TOKEN) for real quotes";

/// Demo snapshot for `symbol` (case-insensitive). Unknown symbols get a
/// generic record with no fundamentals.
pub fn demo_asset(symbol: &str) -> AssetSnapshot {
    let symbol = symbol.trim().to_uppercase();
    match symbol.as_str() {
        "PETR4" => petr4(),
        "HGLG11" => hglg11(),
        _ => generic(&symbol),
    }
}

fn income(history: &[(f64, f64)]) -> Vec<IncomeStatement> {
    history
        .iter()
        .map(|&(revenue, net_income)| IncomeStatement {
            total_revenue: Some(revenue),
            net_income: Some(net_income),
        })
        .collect()
}

fn cashflow(history: &[f64]) -> Vec<CashflowStatement> {
    history
        .iter()
        .map(|&ocf| CashflowStatement {
            operating_cashflow: Some(ocf),
        })
        .collect()
}

fn quote(
    symbol: &str,
    long_name: &str,
    short_name: &str,
    price: f64,
    change: f64,
    change_percent: f64,
    market_cap: f64,
) -> BasicQuote {
    BasicQuote {
        symbol: symbol.to_string(),
        long_name: Some(long_name.to_string()),
        short_name: Some(short_name.to_string()),
        currency: Some("BRL".to_string()),
        regular_market_price: Some(price),
        regular_market_change: Some(change),
        regular_market_change_percent: Some(change_percent),
        market_cap: Some(market_cap),
        logo_url: Some(format!("https://icons.brapi.dev/logos/{}.png", symbol)),
    }
}

fn petr4() -> AssetSnapshot {
    let long_name = "Petróleo Brasileiro S.A. - Petrobras";
    AssetSnapshot {
        record: FinancialRecord {
            symbol: "PETR4".to_string(),
            long_name: Some(long_name.to_string()),
            profile: CompanyProfile {
                sector: Some("Energy".to_string()),
                industry: Some("Oil & Gas Integrated".to_string()),
            },
            key_statistics: KeyStatistics {
                dividend_yield: Some(0.085),
                return_on_equity: Some(0.18),
                return_on_invested_capital: Some(0.14),
                payout_ratio: Some(0.65),
            },
            financial_data: FinancialData {
                total_debt: Some(45_000_000_000.0),
                ebitda: Some(25_000_000_000.0),
            },
            income_history: income(&[
                (650_000_000_000.0, 45_000_000_000.0),
                (580_000_000_000.0, 35_000_000_000.0),
            ]),
            cashflow_history: cashflow(&[55_000_000_000.0, 48_000_000_000.0]),
        },
        quote: quote("PETR4", long_name, "PETROBRAS PN", 38.50, 0.30, 0.78, 503_100_000_000.0),
    }
}

fn hglg11() -> AssetSnapshot {
    let long_name = "CSHG Logística FII";
    AssetSnapshot {
        record: FinancialRecord {
            symbol: "HGLG11".to_string(),
            long_name: Some(long_name.to_string()),
            profile: CompanyProfile {
                sector: Some("Real Estate".to_string()),
                industry: Some("Real Estate Investment Trust".to_string()),
            },
            key_statistics: KeyStatistics {
                dividend_yield: Some(0.095),
                return_on_equity: Some(0.12),
                return_on_invested_capital: Some(0.10),
                payout_ratio: Some(0.95),
            },
            financial_data: FinancialData {
                total_debt: Some(1_200_000_000.0),
                ebitda: Some(800_000_000.0),
            },
            income_history: income(&[
                (950_000_000.0, 720_000_000.0),
                (880_000_000.0, 650_000_000.0),
            ]),
            cashflow_history: cashflow(&[750_000_000.0, 680_000_000.0]),
        },
        quote: quote("HGLG11", long_name, "HGLG11", 165.50, -1.20, -0.72, 8_500_000_000.0),
    }
}

fn generic(symbol: &str) -> AssetSnapshot {
    let long_name = format!("Company {}", symbol);
    AssetSnapshot {
        record: FinancialRecord {
            symbol: symbol.to_string(),
            long_name: Some(long_name.clone()),
            profile: CompanyProfile {
                sector: Some("Unknown".to_string()),
                industry: Some("Unknown".to_string()),
            },
            ..Default::default()
        },
        quote: BasicQuote {
            symbol: symbol.to_string(),
            long_name: Some(long_name),
            short_name: Some(symbol.to_string()),
            currency: Some("BRL".to_string()),
            regular_market_price: Some(100.0),
            regular_market_change: Some(0.0),
            regular_market_change_percent: Some(0.0),
            market_cap: Some(1_000_000_000.0),
            logo_url: None,
        },
    }
}
