//! 거래 표와 헤드라인 지표.

use serde::Serialize;

use tracker_core::{compute_metrics, FoldOrder, Tag, TradeMetrics, TradeRecord};

use super::format::DisplayFormat;
use crate::portfolio::valuation::{PortfolioSummary, PortfolioValuation};

/// 포맷된 거래 표의 한 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedTradeRow {
    #[serde(rename = "Trade")]
    pub trade: u32,
    #[serde(rename = "Buy")]
    pub buy: String,
    #[serde(rename = "Sell")]
    pub sell: String,
    #[serde(rename = "Fee (%)")]
    pub fee: String,
    #[serde(rename = "Profit")]
    pub profit: String,
    #[serde(rename = "ROI (%)")]
    pub roi: String,
    #[serde(rename = "Total Return")]
    pub total_return: String,
    #[serde(rename = "Color")]
    pub color: Tag,
}

impl FormattedTradeRow {
    pub fn from_metrics(metrics: &TradeMetrics, fmt: &DisplayFormat) -> Self {
        Self {
            trade: metrics.index,
            buy: fmt.currency(metrics.buy_price),
            sell: fmt.currency(metrics.sell_price),
            fee: fmt.percent(metrics.fee_percent),
            profit: fmt.currency(metrics.profit),
            roi: fmt.percent(metrics.roi),
            total_return: fmt.currency(metrics.total_return),
            color: metrics.tag,
        }
    }
}

/// 포맷된 헤드라인 지표.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsOverview {
    pub total_profit: String,
    pub total_roi: String,
    pub portfolio_value: String,
}

impl TotalsOverview {
    pub fn from_summary(summary: &PortfolioSummary, fmt: &DisplayFormat) -> Self {
        Self {
            total_profit: fmt.currency(summary.total_profit),
            total_roi: fmt.percent(summary.total_roi),
            portfolio_value: fmt.currency(summary.portfolio_value),
        }
    }
}

/// 한 번의 계산 결과: 거래별 지표 + 포트폴리오 평가.
#[derive(Debug, Clone)]
pub struct TradeReport {
    /// 거래별 지표 (오름차순)
    pub metrics: Vec<TradeMetrics>,
    /// 포트폴리오 평가
    pub summary: PortfolioSummary,
}

impl TradeReport {
    /// 거래 목록으로 리포트를 생성합니다.
    pub fn build(records: &[TradeRecord], order: FoldOrder) -> Self {
        Self {
            metrics: compute_metrics(records),
            summary: PortfolioValuation::new(order).evaluate(records),
        }
    }

    /// 포맷된 거래 표 (오름차순).
    pub fn rows(&self, fmt: &DisplayFormat) -> Vec<FormattedTradeRow> {
        format_rows(&self.metrics, fmt)
    }

    /// 포맷된 헤드라인 지표.
    pub fn totals(&self, fmt: &DisplayFormat) -> TotalsOverview {
        TotalsOverview::from_summary(&self.summary, fmt)
    }
}

/// 지표 목록을 포맷된 행으로 변환합니다.
pub fn format_rows(metrics: &[TradeMetrics], fmt: &DisplayFormat) -> Vec<FormattedTradeRow> {
    let mut rows: Vec<FormattedTradeRow> = metrics
        .iter()
        .map(|m| FormattedTradeRow::from_metrics(m, fmt))
        .collect();
    rows.sort_by_key(|r| r.trade);
    rows
}

/// 고정폭 텍스트 표로 출력합니다.
pub fn render_table(rows: &[FormattedTradeRow]) -> String {
    let mut output = String::new();

    // 헤더
    output.push_str(&format!(
        "{:>5} {:>14} {:>14} {:>9} {:>14} {:>11} {:>14} {:<8}\n",
        "Trade", "Buy", "Sell", "Fee (%)", "Profit", "ROI (%)", "Total Return", "Color"
    ));
    output.push_str(&"-".repeat(96));
    output.push('\n');

    // 데이터
    for row in rows {
        output.push_str(&format!(
            "{:>5} {:>14} {:>14} {:>9} {:>14} {:>11} {:>14} {:<8}\n",
            row.trade,
            row.buy,
            row.sell,
            row.fee,
            row.profit,
            row.roi,
            row.total_return,
            row.color.as_str()
        ));
    }

    output.push_str(&format!("Total: {} trades", rows.len()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn report() -> TradeReport {
        TradeReport::build(
            &[
                TradeRecord::new(2, dec!(100), dec!(150), dec!(0)).with_tag(Tag::Blue),
                TradeRecord::new(1, dec!(200), dec!(0), dec!(0)),
            ],
            FoldOrder::Descending,
        )
    }

    #[test]
    fn test_totals_overview() {
        let totals = report().totals(&DisplayFormat::default());
        assert_eq!(totals.total_profit, "$-150.00");
        assert_eq!(totals.total_roi, "-233.33%");
        assert_eq!(totals.portfolio_value, "$-200.00");
    }

    #[test]
    fn test_rows_sorted_and_formatted() {
        let rows = report().rows(&DisplayFormat::default());
        assert_eq!(rows[0].trade, 1);
        assert_eq!(rows[0].roi, "-100.00%");
        assert_eq!(rows[1].buy, "$100.00");
        assert_eq!(rows[1].fee, "0.00%");
        assert_eq!(rows[1].color, Tag::Blue);
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&report().rows(&DisplayFormat::default()));
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].contains("Total Return"));
        assert!(lines[2].contains("$200.00"));
        assert!(lines[3].trim_end().ends_with("blue"));
        assert_eq!(lines.last().copied(), Some("Total: 2 trades"));
    }
}
