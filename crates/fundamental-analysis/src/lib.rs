pub mod criteria;

use analysis_core::{
    AnalysisReport, CriteriaResults, FinancialRecord, FundamentalAnalyzer, Recommendation,
};
use chrono::Utc;

pub use criteria::{
    Criterion, DebtToEbitda, MinimumRatio, PayoutLimit, PerennialSector, PositiveYears,
    RevenueGrowth, PERENNIAL_SECTORS,
};

/// Score as a percentage of passed criteria, rounded to two decimals.
pub fn society_score(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = passed as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Scores an asset against the nine Society criteria.
pub struct SocietyAnalysisEngine {
    criteria: Vec<Box<dyn Criterion>>,
}

impl SocietyAnalysisEngine {
    pub fn new() -> Self {
        Self {
            criteria: vec![
                Box::new(PerennialSector),
                Box::new(PositiveYears::operating_cash_flow()),
                Box::new(PositiveYears::consistent_profit()),
                Box::new(RevenueGrowth),
                Box::new(PayoutLimit),
                Box::new(DebtToEbitda),
                Box::new(MinimumRatio::dividend_yield()),
                Box::new(MinimumRatio::return_on_equity()),
                Box::new(MinimumRatio::return_on_invested_capital()),
            ],
        }
    }

    /// Criterion keys in evaluation order
    pub fn criterion_keys(&self) -> Vec<&'static str> {
        self.criteria.iter().map(|c| c.key()).collect()
    }

    pub fn evaluate_criteria(&self, record: &FinancialRecord) -> CriteriaResults {
        let mut results = CriteriaResults::with_capacity(self.criteria.len());
        for criterion in &self.criteria {
            results.push(criterion.key(), criterion.evaluate(record));
        }
        results
    }
}

impl FundamentalAnalyzer for SocietyAnalysisEngine {
    fn evaluate(&self, record: &FinancialRecord) -> AnalysisReport {
        let criteria_results = self.evaluate_criteria(record);
        let passed = criteria_results.passed_count();
        let score = society_score(passed, criteria_results.len());
        let recommendation = Recommendation::from_score(score);

        tracing::debug!(
            symbol = %record.symbol,
            passed,
            score,
            recommendation = recommendation.as_str(),
            "Society analysis complete"
        );

        AnalysisReport {
            symbol: record.symbol.clone(),
            company_name: record.long_name.clone().unwrap_or_default(),
            analysis_date: Utc::now(),
            score,
            criteria_results,
            recommendation,
            recommendation_label: recommendation.to_label().to_string(),
        }
    }
}

impl Default for SocietyAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{
        CashflowStatement, CompanyProfile, FinancialData, IncomeStatement, KeyStatistics,
    };

    const EXPECTED_KEYS: [&str; 9] = [
        "setor_perene",
        "fluxo_caixa",
        "lucros_consistentes",
        "receita_crescente",
        "payout_aceitavel",
        "pouca_divida",
        "bons_dividendos",
        "bom_roe",
        "bom_roic",
    ];

    fn petr4() -> FinancialRecord {
        FinancialRecord {
            symbol: "PETR4".to_string(),
            long_name: Some("Petróleo Brasileiro S.A. - Petrobras".to_string()),
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
                total_debt: Some(45e9),
                ebitda: Some(25e9),
            },
            income_history: vec![
                IncomeStatement {
                    total_revenue: Some(650e9),
                    net_income: Some(45e9),
                },
                IncomeStatement {
                    total_revenue: Some(580e9),
                    net_income: Some(35e9),
                },
            ],
            cashflow_history: vec![
                CashflowStatement {
                    operating_cashflow: Some(55e9),
                },
                CashflowStatement {
                    operating_cashflow: Some(48e9),
                },
            ],
        }
    }

    fn pass_vector(report: &AnalysisReport) -> Vec<bool> {
        report.criteria_results.iter().map(|(_, r)| r.passed).collect()
    }

    #[test]
    fn test_report_has_nine_keys_in_order() {
        let engine = SocietyAnalysisEngine::new();
        assert_eq!(engine.criterion_keys(), EXPECTED_KEYS);

        let full = engine.evaluate(&petr4());
        let keys: Vec<_> = full.criteria_results.keys().collect();
        assert_eq!(keys, EXPECTED_KEYS);

        let empty = engine.evaluate(&FinancialRecord::default());
        let keys: Vec<_> = empty.criteria_results.keys().collect();
        assert_eq!(keys, EXPECTED_KEYS);
    }

    #[test]
    fn test_empty_record_scores_zero() {
        let engine = SocietyAnalysisEngine::new();
        let report = engine.evaluate(&FinancialRecord {
            symbol: "XPTO3".to_string(),
            ..Default::default()
        });

        assert_eq!(report.score, 0.0);
        assert_eq!(report.recommendation, Recommendation::Sell);
        assert_eq!(report.company_name, "");
        assert!(report.criteria_results.iter().all(|(_, r)| !r.passed && r.value == "N/A"));
    }

    #[test]
    fn test_petr4_demo_record() {
        // "Energy" contains the "energy" keyword, so every criterion passes
        let report = SocietyAnalysisEngine::new().evaluate(&petr4());

        assert_eq!(pass_vector(&report), vec![true; 9]);
        assert_eq!(report.score, 100.0);
        assert_eq!(report.recommendation, Recommendation::StrongBuy);
        assert_eq!(report.symbol, "PETR4");

        let results = &report.criteria_results;
        assert_eq!(results.get("fluxo_caixa").unwrap().value, "2/2 positive years");
        assert_eq!(results.get("receita_crescente").unwrap().value, "12.07%");
        assert_eq!(results.get("pouca_divida").unwrap().value, "1.80x");
        assert_eq!(results.get("bons_dividendos").unwrap().value, "8.50%");
    }

    #[test]
    fn test_petr4_outside_perennial_sectors_scores_eight_of_nine() {
        let mut record = petr4();
        record.profile.sector = Some("Oil & Gas".to_string());
        record.profile.industry = Some("Integrated".to_string());

        let report = SocietyAnalysisEngine::new().evaluate(&record);
        let mut expected = vec![true; 9];
        expected[0] = false;
        assert_eq!(pass_vector(&report), expected);
        assert_eq!(report.score, 88.89);
        assert_eq!(report.recommendation, Recommendation::StrongBuy);
    }

    #[test]
    fn test_fund_record() {
        let record = FinancialRecord {
            symbol: "HGLG11".to_string(),
            long_name: Some("CSHG Logística FII".to_string()),
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
                total_debt: Some(1.2e9),
                ebitda: Some(0.8e9),
            },
            income_history: vec![
                IncomeStatement {
                    total_revenue: Some(950e6),
                    net_income: Some(720e6),
                },
                IncomeStatement {
                    total_revenue: Some(880e6),
                    net_income: Some(650e6),
                },
            ],
            cashflow_history: vec![
                CashflowStatement {
                    operating_cashflow: Some(750e6),
                },
                CashflowStatement {
                    operating_cashflow: Some(680e6),
                },
            ],
        };

        let report = SocietyAnalysisEngine::new().evaluate(&record);
        assert_eq!(
            pass_vector(&report),
            vec![true, true, true, true, true, true, true, false, false]
        );
        assert_eq!(report.score, 77.78);
        assert_eq!(report.recommendation, Recommendation::Buy);
    }

    #[test]
    fn test_score_for_every_pass_combination() {
        for mask in 0u32..512 {
            let passed = mask.count_ones() as usize;
            let expected = (100.0 * passed as f64 / 9.0 * 100.0).round() / 100.0;
            assert_eq!(society_score(passed, 9), expected, "mask {:09b}", mask);
        }

        let scores: Vec<f64> = (0..=9).map(|p| society_score(p, 9)).collect();
        assert_eq!(
            scores,
            vec![0.0, 11.11, 22.22, 33.33, 44.44, 55.56, 66.67, 77.78, 88.89, 100.0]
        );
    }

    #[test]
    fn test_recommendation_for_each_pass_count() {
        let bands: Vec<Recommendation> = (0..=9)
            .map(|p| Recommendation::from_score(society_score(p, 9)))
            .collect();
        use Recommendation::*;
        assert_eq!(
            bands,
            vec![Sell, Sell, Sell, Sell, Neutral, Neutral, Buy, Buy, StrongBuy, StrongBuy]
        );
    }

    #[test]
    fn test_evaluation_is_deterministic_apart_from_timestamp() {
        let engine = SocietyAnalysisEngine::default();
        let a = engine.evaluate(&petr4());
        let b = engine.evaluate(&petr4());
        assert_eq!(a.criteria_results, b.criteria_results);
        assert_eq!(a.score, b.score);
        assert_eq!(a.recommendation, b.recommendation);
    }

    #[test]
    fn test_report_json_shape() {
        let report = SocietyAnalysisEngine::new().evaluate(&petr4());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["symbol"], "PETR4");
        assert_eq!(json["recommendation"], "strong buy");
        assert_eq!(json["criteria_results"]["pouca_divida"]["value"], "1.80x");
        assert_eq!(json["criteria_results"].as_object().unwrap().len(), 9);
    }
}
