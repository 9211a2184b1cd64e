//! 차트 시리즈 출력 (JSON/CSV).

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;

use tracker_analytics::{ChartSeries, PerformanceView, ViewMode};
use tracker_core::TradeMetrics;

/// 출력 형식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(anyhow::anyhow!("Invalid format: {}. Use: json, csv", s)),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// JSON 출력용 패널.
#[derive(Debug, Serialize)]
struct ChartPanel<'a> {
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    charts: Option<&'a ChartSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// 보기 방식에 맞게 차트 시리즈를 출력합니다.
pub fn render_charts(metrics: &[TradeMetrics], mode: ViewMode, format: OutputFormat) -> Result<String> {
    let view = PerformanceView::build(metrics, mode);

    match format {
        OutputFormat::Json => {
            let panels: Vec<ChartPanel<'_>> = view
                .panels
                .iter()
                .map(|panel| ChartPanel {
                    label: &panel.label,
                    charts: panel.charts.as_ref(),
                    message: panel.empty_message(),
                })
                .collect();
            Ok(serde_json::to_string_pretty(&panels)?)
        }
        OutputFormat::Csv => {
            let sections: Vec<String> = view
                .panels
                .iter()
                .map(|panel| match &panel.charts {
                    Some(series) => format!("# {}\n{}", panel.label, series_to_csv(series)),
                    None => format!(
                        "# {}\n# {}",
                        panel.label,
                        panel.empty_message().unwrap_or_default()
                    ),
                })
                .collect();
            Ok(sections.join("\n\n"))
        }
    }
}

/// 시리즈를 CSV로 변환합니다 (거래 번호 오름차순).
fn series_to_csv(series: &ChartSeries) -> String {
    let mut output = String::from("Trade,Profit,Portfolio Value,ROI (%)");

    let rows = series
        .profit
        .iter()
        .zip(&series.portfolio_value)
        .zip(&series.roi);
    for ((profit, value), roi) in rows {
        let _ = write!(
            output,
            "\n{},{},{},{}",
            profit.trade,
            profit.value.normalize(),
            value.value.normalize(),
            roi.value.round_dp(6).normalize()
        );
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tracker_core::{compute_metrics, Tag, TradeRecord};

    fn metrics() -> Vec<TradeMetrics> {
        compute_metrics(&[
            TradeRecord::new(1, dec!(100), dec!(150), dec!(1)).with_tag(Tag::Red),
            TradeRecord::new(2, dec!(80), dec!(100), dec!(0)),
        ])
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("CSV").unwrap(), OutputFormat::Csv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(OutputFormat::parse("xml").is_err());
    }

    #[test]
    fn test_render_csv_all() {
        let text = render_charts(&metrics(), ViewMode::AllTrades, OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# All Trades");
        assert_eq!(lines[1], "Trade,Profit,Portfolio Value,ROI (%)");
        assert_eq!(lines[2], "1,48.5,148.5,48.5");
        assert_eq!(lines[3], "2,20,248.5,25");
    }

    #[test]
    fn test_render_json_split() {
        let text = render_charts(&metrics(), ViewMode::SplitByTag, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value[0]["label"], "Red Trades");
        assert_eq!(value[0]["charts"]["Profit"][0]["value"], 48.5);
        assert_eq!(value[1]["message"], "No blue trades available.");
        assert!(value[1].get("charts").is_none());
    }
}
