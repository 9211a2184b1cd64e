//! 거래별 손익 계산.
//!
//! 각 거래를 독립적으로 계산하며 순서에 의존하지 않습니다.
//! 모든 연산은 포화(saturating) 또는 검사(checked) 연산이라 어떤 입력에서도
//! 패닉하지 않습니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::trade::{Tag, TradeRecord};
use crate::types::{DecimalExt, Percentage, Price};

/// 매도 금액에 대한 수수료.
///
/// # Examples
///
/// ```
/// use tracker_core::sell_fee;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(sell_fee(dec!(150), dec!(1)), dec!(1.5));
/// ```
pub fn sell_fee(sell_price: Price, fee_percent: Percentage) -> Decimal {
    sell_price.saturating_mul(fee_percent.percent_to_ratio())
}

/// 순손익: (매도가 - 매수가) - 매도 수수료.
///
/// # Examples
///
/// ```
/// use tracker_core::net_result;
/// use rust_decimal_macros::dec;
///
/// // 100에 매수 → 150에 매도, 수수료 1%
/// assert_eq!(net_result(dec!(100), dec!(150), dec!(1)), dec!(48.5));
/// ```
pub fn net_result(buy_price: Price, sell_price: Price, fee_percent: Percentage) -> Decimal {
    sell_price
        .saturating_sub(buy_price)
        .saturating_sub(sell_fee(sell_price, fee_percent))
}

/// 수익률 (%).
///
/// 매수가가 0 이하이거나 결과가 `Decimal` 범위를 넘으면 0을 반환합니다.
pub fn roi_pct(profit: Decimal, buy_price: Price) -> Decimal {
    if buy_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    profit
        .checked_div(buy_price)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// 수수료 차감 후 매도 대금 (매수 비용은 고려하지 않음).
pub fn total_return(sell_price: Price, fee_percent: Percentage) -> Decimal {
    sell_price.saturating_sub(sell_fee(sell_price, fee_percent))
}

impl TradeRecord {
    /// 이 거래의 순손익.
    pub fn net_result(&self) -> Decimal {
        net_result(self.buy_price, self.sell_price, self.fee_percent)
    }

    /// 이 거래의 손익 (순손익과 같음).
    pub fn profit(&self) -> Decimal {
        self.net_result()
    }

    /// 이 거래의 수익률 (%).
    pub fn roi(&self) -> Decimal {
        roi_pct(self.profit(), self.buy_price)
    }

    /// 이 거래의 수수료 차감 후 매도 대금.
    pub fn total_return(&self) -> Decimal {
        total_return(self.sell_price, self.fee_percent)
    }
}

/// 거래 하나의 입력값과 파생 지표.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeMetrics {
    /// 거래 번호
    pub index: u32,
    /// 매수가
    pub buy_price: Decimal,
    /// 매도가
    pub sell_price: Decimal,
    /// 수수료 (%)
    pub fee_percent: Decimal,
    /// 손익
    pub profit: Decimal,
    /// 수익률 (%)
    pub roi: Decimal,
    /// 수수료 차감 후 매도 대금
    pub total_return: Decimal,
    /// 태그
    pub tag: Tag,
}

impl TradeMetrics {
    /// 거래 기록에서 지표를 계산합니다.
    pub fn from_record(record: &TradeRecord) -> Self {
        let profit = record.profit();
        Self {
            index: record.index,
            buy_price: record.buy_price,
            sell_price: record.sell_price,
            fee_percent: record.fee_percent,
            profit,
            roi: roi_pct(profit, record.buy_price),
            total_return: record.total_return(),
            tag: record.tag,
        }
    }
}

/// 거래 목록의 지표를 거래 번호 오름차순으로 계산합니다.
pub fn compute_metrics(records: &[TradeRecord]) -> Vec<TradeMetrics> {
    let mut metrics: Vec<TradeMetrics> = records.iter().map(TradeMetrics::from_record).collect();
    metrics.sort_by_key(|m| m.index);
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_profit_and_roi_with_fee() {
        // 100 매수 → 150 매도, 수수료 1%: 50 - 1.5 = 48.5
        let record = TradeRecord::new(1, dec!(100), dec!(150), dec!(1));
        assert_eq!(record.profit(), dec!(48.5));
        assert_eq!(record.roi(), dec!(48.5));
        assert_eq!(record.total_return(), dec!(148.5));
    }

    #[test]
    fn test_losing_trade() {
        let record = TradeRecord::new(1, dec!(200), dec!(180), dec!(0.5));
        // (180 - 200) - 0.9 = -20.9
        assert_eq!(record.profit(), dec!(-20.9));
        assert_eq!(record.roi(), dec!(-10.45));
        assert_eq!(record.total_return(), dec!(179.1));
    }

    #[test]
    fn test_zero_buy_price_roi_guard() {
        let record = TradeRecord::new(1, Decimal::ZERO, dec!(75), dec!(2));
        assert_eq!(record.profit(), dec!(73.5));
        assert_eq!(record.roi(), Decimal::ZERO);
    }

    #[test]
    fn test_compute_metrics_sorted_ascending() {
        let records = vec![
            TradeRecord::new(3, dec!(10), dec!(11), dec!(0)),
            TradeRecord::new(1, dec!(10), dec!(12), dec!(0)),
            TradeRecord::new(2, dec!(10), dec!(9), dec!(0)),
        ];
        let metrics = compute_metrics(&records);
        let indices: Vec<u32> = metrics.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(metrics[1].profit, dec!(-1));
    }

    #[test]
    fn test_metrics_keep_inputs_and_tag() {
        let record = TradeRecord::new(4, dec!(55), dec!(60), dec!(0.1)).with_tag(Tag::Blue);
        let metrics = TradeMetrics::from_record(&record);
        assert_eq!(metrics.index, 4);
        assert_eq!(metrics.fee_percent, dec!(0.1));
        assert_eq!(metrics.tag, Tag::Blue);
    }

    #[test]
    fn test_extreme_values_do_not_panic() {
        // 매수가가 아주 작으면 수익률이 범위를 넘음
        let tiny_buy = TradeRecord::new(1, dec!(0.000000000001), dec!(100000000000000000), dec!(0));
        assert!(tiny_buy.profit() > dec!(99999999999999999));
        assert_eq!(tiny_buy.roi(), Decimal::ZERO);

        // 수수료 곱셈이 범위를 넘으면 포화
        let huge_sell = TradeRecord::new(1, dec!(1), dec!(50000000000000000000000000000), dec!(200));
        assert_eq!(sell_fee(huge_sell.sell_price, huge_sell.fee_percent), Decimal::MAX);
        assert!(huge_sell.profit() < Decimal::ZERO);
        assert_eq!(huge_sell.roi(), Decimal::ZERO);
    }

    fn price() -> impl Strategy<Value = Decimal> {
        (0u64..10_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
    }

    proptest! {
        #[test]
        fn prop_zero_buy_price_has_zero_roi(sell in price(), fee in 0u32..10_000u32) {
            let record = TradeRecord::new(1, Decimal::ZERO, sell, Decimal::new(fee as i64, 2));
            prop_assert_eq!(record.roi(), Decimal::ZERO);
        }

        #[test]
        fn prop_profit_is_linear_in_buy(buy in price(), sell in price(), delta in price()) {
            let fee = dec!(0.75);
            let base = TradeRecord::new(1, buy, sell, fee).profit();
            let shifted = TradeRecord::new(1, buy + delta, sell, fee).profit();
            prop_assert_eq!(base - shifted, delta);
        }

        #[test]
        fn prop_profit_is_linear_in_sell(buy in price(), sell in price(), delta in price()) {
            let fee = dec!(0.75);
            let base = TradeRecord::new(1, buy, sell, fee).profit();
            let shifted = TradeRecord::new(1, buy, sell + delta, fee).profit();
            prop_assert_eq!(shifted - base, delta * (Decimal::ONE - fee.percent_to_ratio()));
        }

        #[test]
        fn prop_total_return_minus_buy_is_profit(buy in price(), sell in price()) {
            let record = TradeRecord::new(1, buy, sell, dec!(0.3));
            prop_assert_eq!(record.total_return() - record.buy_price, record.profit());
        }
    }
}
