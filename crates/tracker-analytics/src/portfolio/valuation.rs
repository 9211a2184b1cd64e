//! 누적 포트폴리오 평가 엔진
//!
//! 실현된 매도 대금을 다음 거래의 매수 자금으로 재사용한다고 보고
//! 포트폴리오 가치를 누적합니다. 어떤 거래의 매수가가 직전 단계의
//! 포트폴리오 가치보다 크면 그 차액은 외부에서 새로 투입된 자본으로
//! 따로 집계되어 총 수익률 분모에 더해집니다.
//!
//! # 접는 순서
//!
//! 기본값([`FoldOrder::Descending`])은 가장 큰 거래 번호(가장 최근 거래)가
//! 시작점이 되고 이전 거래들을 차례로 접습니다. 시작 거래의 매수가가
//! 총 수익률 계산의 기준 자본이 됩니다.
//!
//! 엔진은 실패하지 않습니다. 빈 목록은 모든 값이 0입니다. 합계는 포화 연산으로
//! 누적하고, 총 수익률이 `Decimal` 범위를 넘으면 0을 반환합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tracker_core::{FoldOrder, TradeRecord};

/// 접기 한 단계의 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationStep {
    /// 거래 번호
    pub index: u32,
    /// 매수가
    pub buy_price: Decimal,
    /// 순손익
    pub net_result: Decimal,
    /// 이 단계에서 감지된 추가 투입 자본
    pub added_capital: Decimal,
    /// 이 단계 이후 포트폴리오 가치
    pub portfolio_value: Decimal,
}

/// 포트폴리오 평가 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// 모든 거래 손익의 합
    pub total_profit: Decimal,
    /// 모든 거래 매수가의 합
    pub total_investment: Decimal,
    /// 최종 포트폴리오 가치
    pub portfolio_value: Decimal,
    /// 추가 투입 자본 합계
    pub total_added_capital: Decimal,
    /// 실질 투입 자본 (시작 거래 매수가 + 추가 투입 자본)
    pub effective_invested: Decimal,
    /// 총 수익률 (%)
    pub total_roi: Decimal,
    /// 사용된 접기 순서
    pub fold_order: FoldOrder,
    /// 단계별 기록 (접은 순서대로)
    pub steps: Vec<ValuationStep>,
}

impl PortfolioSummary {
    fn empty(fold_order: FoldOrder) -> Self {
        Self {
            total_profit: Decimal::ZERO,
            total_investment: Decimal::ZERO,
            portfolio_value: Decimal::ZERO,
            total_added_capital: Decimal::ZERO,
            effective_invested: Decimal::ZERO,
            total_roi: Decimal::ZERO,
            fold_order,
            steps: Vec::new(),
        }
    }

    /// 시작 거래 (접기의 첫 단계).
    pub fn seed(&self) -> Option<&ValuationStep> {
        self.steps.first()
    }
}

/// 접기 상태.
#[derive(Debug, Default)]
struct FoldState {
    portfolio_value: Decimal,
    prev_portfolio: Decimal,
    total_added_capital: Decimal,
    initialized: bool,
}

impl FoldState {
    fn step(&mut self, record: &TradeRecord) -> ValuationStep {
        let buy = record.buy_price;
        let net_result = record.net_result();

        let added_capital = if !self.initialized {
            self.prev_portfolio = buy;
            self.portfolio_value = buy.saturating_add(net_result);
            self.initialized = true;
            Decimal::ZERO
        } else {
            let added = if buy > self.prev_portfolio {
                buy.saturating_sub(self.prev_portfolio)
            } else {
                Decimal::ZERO
            };
            self.total_added_capital = self.total_added_capital.saturating_add(added);
            self.portfolio_value = self
                .prev_portfolio
                .saturating_sub(buy)
                .saturating_add(net_result)
                .saturating_add(added);
            added
        };
        self.prev_portfolio = self.portfolio_value;

        ValuationStep {
            index: record.index,
            buy_price: buy,
            net_result,
            added_capital,
            portfolio_value: self.portfolio_value,
        }
    }
}

/// 포트폴리오 평가 엔진.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortfolioValuation {
    order: FoldOrder,
}

impl PortfolioValuation {
    /// 주어진 접기 순서로 엔진을 생성합니다.
    pub fn new(order: FoldOrder) -> Self {
        Self { order }
    }

    /// 거래 목록을 평가합니다.
    ///
    /// 입력 순서는 상관없으며 순서는 항상 거래 번호에서 다시 정합니다.
    pub fn evaluate(&self, records: &[TradeRecord]) -> PortfolioSummary {
        if records.is_empty() {
            return PortfolioSummary::empty(self.order);
        }

        let mut ordered: Vec<&TradeRecord> = records.iter().collect();
        match self.order {
            FoldOrder::Descending => ordered.sort_by(|a, b| b.index.cmp(&a.index)),
            FoldOrder::Ascending => ordered.sort_by_key(|r| r.index),
        }

        let total_profit = saturating_sum(records.iter().map(TradeRecord::profit));
        let total_investment = saturating_sum(records.iter().map(|r| r.buy_price));

        let mut state = FoldState::default();
        let steps: Vec<ValuationStep> = ordered
            .into_iter()
            .map(|record| {
                let step = state.step(record);
                debug!(
                    trade = step.index,
                    net_result = %step.net_result,
                    added_capital = %step.added_capital,
                    portfolio_value = %step.portfolio_value,
                    "Valuation step"
                );
                step
            })
            .collect();

        let baseline = steps.first().map(|s| s.buy_price).unwrap_or(Decimal::ZERO);
        let effective_invested = baseline.saturating_add(state.total_added_capital);
        let total_roi = total_roi(state.portfolio_value, effective_invested);

        debug!(
            order = %self.order,
            trades = steps.len(),
            portfolio_value = %state.portfolio_value,
            total_added_capital = %state.total_added_capital,
            total_roi = %total_roi,
            "Portfolio evaluated"
        );

        PortfolioSummary {
            total_profit,
            total_investment,
            portfolio_value: state.portfolio_value,
            total_added_capital: state.total_added_capital,
            effective_invested,
            total_roi,
            fold_order: self.order,
            steps,
        }
    }
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// (최종 가치 / 실질 투입 - 1) * 100. 분모가 0 이하이거나 범위를 넘으면 0.
fn total_roi(portfolio_value: Decimal, effective_invested: Decimal) -> Decimal {
    if effective_invested <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    portfolio_value
        .checked_div(effective_invested)
        .and_then(|ratio| ratio.checked_sub(Decimal::ONE))
        .and_then(|growth| growth.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn evaluate_portfolio(records: &[TradeRecord]) -> PortfolioSummary {
        PortfolioValuation::default().evaluate(records)
    }

    fn two_trades() -> Vec<TradeRecord> {
        vec![
            TradeRecord::new(1, dec!(200), dec!(0), dec!(0)),
            TradeRecord::new(2, dec!(100), dec!(150), dec!(0)),
        ]
    }

    #[test]
    fn test_empty_list() {
        let summary = evaluate_portfolio(&[]);
        assert_eq!(summary.total_profit, Decimal::ZERO);
        assert_eq!(summary.total_roi, Decimal::ZERO);
        assert_eq!(summary.portfolio_value, Decimal::ZERO);
        assert_eq!(summary.total_added_capital, Decimal::ZERO);
        assert!(summary.steps.is_empty());
    }

    #[test]
    fn test_single_trade() {
        let records = vec![TradeRecord::new(1, dec!(100), dec!(150), dec!(0))];
        let summary = evaluate_portfolio(&records);

        assert_eq!(summary.steps[0].net_result, dec!(50));
        assert_eq!(summary.portfolio_value, dec!(150));
        assert_eq!(summary.total_added_capital, Decimal::ZERO);
        assert_eq!(summary.effective_invested, dec!(100));
        assert_eq!(summary.total_roi, dec!(50));
    }

    #[test]
    fn test_two_trades_descending_fold() {
        let summary = evaluate_portfolio(&two_trades());

        // 거래 2가 시작점
        let seed = summary.seed().unwrap();
        assert_eq!(seed.index, 2);
        assert_eq!(seed.portfolio_value, dec!(150));

        // 거래 1: 200 > 150 → 추가 자본 50, 150 - 200 + (-200) + 50 = -200
        let second = summary.steps[1];
        assert_eq!(second.index, 1);
        assert_eq!(second.net_result, dec!(-200));
        assert_eq!(second.added_capital, dec!(50));
        assert_eq!(summary.total_added_capital, dec!(50));
        assert_eq!(summary.portfolio_value, dec!(-200));

        // 실질 투입 = 100 + 50, 수익률 = (-200 / 150 - 1) * 100
        assert_eq!(summary.effective_invested, dec!(150));
        assert_eq!(summary.total_roi.round_dp(4), dec!(-233.3333));
        assert_eq!(summary.total_profit, dec!(-150));
        assert_eq!(summary.total_investment, dec!(300));
    }

    #[test]
    fn test_input_order_is_irrelevant() {
        let mut reversed = two_trades();
        reversed.reverse();
        assert_eq!(
            evaluate_portfolio(&two_trades()),
            evaluate_portfolio(&reversed)
        );
    }

    #[test]
    fn test_ascending_fold_differs() {
        let summary = PortfolioValuation::new(FoldOrder::Ascending).evaluate(&two_trades());

        // 거래 1이 시작점: 200 + (-200) = 0
        assert_eq!(summary.steps[0].portfolio_value, Decimal::ZERO);
        // 거래 2: 100 > 0 → 추가 자본 100, 0 - 100 + 50 + 100 = 50
        assert_eq!(summary.total_added_capital, dec!(100));
        assert_eq!(summary.portfolio_value, dec!(50));
        assert_eq!(summary.effective_invested, dec!(300));
        assert_eq!(summary.fold_order, FoldOrder::Ascending);
    }

    #[test]
    fn test_no_added_capital_when_buy_covered() {
        let records = vec![
            TradeRecord::new(1, dec!(100), dec!(130), dec!(0)),
            TradeRecord::new(2, dec!(100), dec!(120), dec!(0)),
        ];
        let summary = evaluate_portfolio(&records);

        // 시작: 100 + 20 = 120, 다음: 120 - 100 + 30 + 0 = 50
        assert_eq!(summary.total_added_capital, Decimal::ZERO);
        assert_eq!(summary.portfolio_value, dec!(50));
        assert_eq!(summary.total_roi, dec!(-50));
    }

    #[test]
    fn test_extreme_values_do_not_panic() {
        let records = vec![
            TradeRecord::new(1, dec!(0.000000000001), dec!(100000000000000000), dec!(0)),
            TradeRecord::new(2, dec!(1), dec!(50000000000000000000000000000), dec!(200)),
            TradeRecord::new(3, Decimal::MAX, Decimal::MAX, dec!(0)),
        ];

        for order in [FoldOrder::Descending, FoldOrder::Ascending] {
            let summary = PortfolioValuation::new(order).evaluate(&records);
            assert_eq!(summary.steps.len(), 3);
            assert_eq!(summary.total_investment, Decimal::MAX);
        }
    }

    #[test]
    fn test_total_roi_overflow_returns_zero() {
        // 실질 투입이 아주 작으면 비율이 범위를 넘음
        assert_eq!(total_roi(dec!(1000000000000), dec!(0.000000000000000001)), Decimal::ZERO);
        assert_eq!(total_roi(dec!(150), dec!(100)), dec!(50));
    }

    #[test]
    fn test_zero_effective_invested_guard() {
        let records = vec![TradeRecord::new(1, dec!(0), dec!(10), dec!(0))];
        let summary = evaluate_portfolio(&records);

        assert_eq!(summary.portfolio_value, dec!(10));
        assert_eq!(summary.effective_invested, Decimal::ZERO);
        assert_eq!(summary.total_roi, Decimal::ZERO);
    }
}
