//! 헤드라인 지표, 평가 과정, 거래 표 출력.

use std::fmt::Write as _;

use tracker_analytics::{
    format_rows, render_table, DisplayFormat, PerformanceView, TradeReport, ViewMode,
};

/// 헤드라인 지표 출력.
pub fn render_summary(report: &TradeReport, fmt: &DisplayFormat) -> String {
    let totals = report.totals(fmt);
    let mut output = String::new();

    let _ = writeln!(output, "Total Profit:    {}", totals.total_profit);
    let _ = writeln!(output, "Total ROI:       {}", totals.total_roi);
    let _ = write!(output, "Portfolio Value: {}", totals.portfolio_value);
    output
}

/// 포트폴리오 평가의 단계별 기록 출력.
pub fn render_explain(report: &TradeReport, fmt: &DisplayFormat) -> String {
    let summary = &report.summary;
    let mut output = String::new();

    let _ = writeln!(output, "Fold order: {}", summary.fold_order);
    let _ = writeln!(
        output,
        "{:>5} {:>14} {:>14} {:>14} {:>16}",
        "Trade", "Buy", "Net Result", "Added", "Portfolio Value"
    );
    output.push_str(&"-".repeat(67));
    output.push('\n');

    for step in &summary.steps {
        let _ = writeln!(
            output,
            "{:>5} {:>14} {:>14} {:>14} {:>16}",
            step.index,
            fmt.currency(step.buy_price),
            fmt.currency(step.net_result),
            fmt.currency(step.added_capital),
            fmt.currency(step.portfolio_value),
        );
    }

    let _ = writeln!(
        output,
        "Added capital:      {}",
        fmt.currency(summary.total_added_capital)
    );
    let _ = writeln!(
        output,
        "Effective invested: {}",
        fmt.currency(summary.effective_invested)
    );
    let _ = write!(output, "Total ROI:          {}", fmt.percent(summary.total_roi));
    output
}

/// 보기 방식에 맞게 거래 표를 출력합니다.
///
/// 분할 보기에서 거래가 없는 패널은 안내 문구만 출력합니다.
pub fn render_tables(report: &TradeReport, mode: ViewMode, fmt: &DisplayFormat) -> String {
    let view = PerformanceView::build(&report.metrics, mode);
    let sections: Vec<String> = view
        .panels
        .iter()
        .map(|panel| match panel.empty_message() {
            Some(message) => format!("== {} ==\n{}", panel.label, message),
            None => format!(
                "== {} ==\n{}",
                panel.label,
                render_table(&format_rows(&panel.trades, fmt))
            ),
        })
        .collect();

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tracker_core::{FoldOrder, Tag, TradeRecord};

    fn report(order: FoldOrder) -> TradeReport {
        TradeReport::build(
            &[
                TradeRecord::new(2, dec!(100), dec!(150), dec!(0)).with_tag(Tag::Blue),
                TradeRecord::new(1, dec!(200), dec!(0), dec!(0)),
            ],
            order,
        )
    }

    #[test]
    fn test_render_summary() {
        let text = render_summary(&report(FoldOrder::Descending), &DisplayFormat::default());
        assert_eq!(
            text,
            "Total Profit:    $-150.00\nTotal ROI:       -233.33%\nPortfolio Value: $-200.00"
        );
    }

    #[test]
    fn test_render_explain_lists_steps_in_fold_order() {
        let text = render_explain(&report(FoldOrder::Descending), &DisplayFormat::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Fold order: descending");
        assert!(lines[3].trim_start().starts_with('2'));
        assert!(lines[4].trim_start().starts_with('1'));
        assert!(lines[4].contains("$50.00"));
        assert!(text.contains("Effective invested: $150.00"));
    }

    #[test]
    fn test_render_tables_split_reports_empty_panel() {
        let text = render_tables(
            &report(FoldOrder::Descending),
            ViewMode::SplitByTag,
            &DisplayFormat::default(),
        );

        assert!(text.contains("== Red Trades ==\nNo red trades available."));
        assert!(text.contains("== Blue Trades =="));
        assert!(text.contains("Total: 1 trades"));
    }

    #[test]
    fn test_render_tables_all() {
        let text = render_tables(
            &report(FoldOrder::Descending),
            ViewMode::AllTrades,
            &DisplayFormat::default(),
        );
        assert!(text.starts_with("== All Trades =="));
        assert!(text.ends_with("Total: 2 trades"));
    }
}
