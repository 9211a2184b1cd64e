//! 차트 데이터 구조
//!
//! 태그별로 거래를 나누고 각 묶음마다 차트 시리즈를 만듭니다.
//!
//! # 제공 차트
//!
//! - 거래별 손익 (`Profit`)
//! - 포트폴리오 가치 성장 (`Portfolio Value`): 누적 매수가 + 누적 손익
//! - 거래별 수익률 (`ROI (%)`)
//!
//! 여기의 누적 방식은 헤드라인 평가 엔진과 별개이며 차트에만 쓰입니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use tracker_core::{Tag, TrackerError, TradeMetrics};

/// 차트 데이터 포인트
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// X축 값 (거래 번호)
    pub trade: u32,

    /// Y축 값
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

impl SeriesPoint {
    pub fn new(trade: u32, value: Decimal) -> Self {
        Self { trade, value }
    }
}

/// 한 묶음의 차트 시리즈 (거래 번호 오름차순)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// 거래별 손익
    #[serde(rename = "Profit")]
    pub profit: Vec<SeriesPoint>,

    /// 누적 매수가 + 누적 손익
    #[serde(rename = "Portfolio Value")]
    pub portfolio_value: Vec<SeriesPoint>,

    /// 거래별 수익률 (%)
    #[serde(rename = "ROI (%)")]
    pub roi: Vec<SeriesPoint>,
}

impl ChartSeries {
    /// 거래 지표에서 차트 시리즈를 생성합니다.
    ///
    /// 입력 순서와 상관없이 거래 번호 오름차순으로 누적합니다.
    pub fn from_metrics(metrics: &[TradeMetrics]) -> Self {
        let mut ordered: Vec<&TradeMetrics> = metrics.iter().collect();
        ordered.sort_by_key(|m| m.index);

        let mut series = Self::default();
        let mut cumulative_buy = Decimal::ZERO;
        let mut cumulative_profit = Decimal::ZERO;

        for m in ordered {
            cumulative_buy = cumulative_buy.saturating_add(m.buy_price);
            cumulative_profit = cumulative_profit.saturating_add(m.profit);

            series.profit.push(SeriesPoint::new(m.index, m.profit));
            series
                .portfolio_value
                .push(SeriesPoint::new(
                    m.index,
                    cumulative_buy.saturating_add(cumulative_profit),
                ));
            series.roi.push(SeriesPoint::new(m.index, m.roi));
        }

        series
    }

    /// 포인트 수.
    pub fn len(&self) -> usize {
        self.profit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profit.is_empty()
    }
}

/// 거래를 태그별로 나눕니다.
///
/// 세 태그 모두 키로 존재하며 (비어 있을 수 있음) 각 묶음은 거래 번호 오름차순입니다.
pub fn partition_by_tag(metrics: &[TradeMetrics]) -> BTreeMap<Tag, Vec<TradeMetrics>> {
    let mut groups: BTreeMap<Tag, Vec<TradeMetrics>> =
        Tag::ALL.iter().map(|tag| (*tag, Vec::new())).collect();

    for m in metrics {
        groups.entry(m.tag).or_default().push(*m);
    }
    for group in groups.values_mut() {
        group.sort_by_key(|m| m.index);
    }

    groups
}

/// 성과 보기 방식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    /// 전체 거래
    #[default]
    AllTrades,
    /// 색상별 분할 (빨강/파랑)
    SplitByTag,
}

impl std::str::FromStr for ViewMode {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "all-trades" => Ok(ViewMode::AllTrades),
            "split" | "split-by-color" | "color" => Ok(ViewMode::SplitByTag),
            _ => Err(TrackerError::InvalidInput(format!(
                "Unknown view mode: {}. Use: all, split",
                s
            ))),
        }
    }
}

/// 성과 보기의 한 패널 (표 + 차트).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePanel {
    /// 패널 제목
    pub label: String,

    /// 태그 필터 (전체 보기면 None)
    pub tag: Option<Tag>,

    /// 패널에 속한 거래 (오름차순)
    pub trades: Vec<TradeMetrics>,

    /// 차트 시리즈 (거래가 없으면 None)
    pub charts: Option<ChartSeries>,
}

impl PerformancePanel {
    fn new(label: impl Into<String>, tag: Option<Tag>, trades: Vec<TradeMetrics>) -> Self {
        let charts = (!trades.is_empty()).then(|| ChartSeries::from_metrics(&trades));
        Self {
            label: label.into(),
            tag,
            trades,
            charts,
        }
    }

    /// 거래가 없을 때 보여줄 안내 문구.
    pub fn empty_message(&self) -> Option<String> {
        if !self.trades.is_empty() {
            return None;
        }
        Some(match self.tag {
            Some(tag) => format!("No {} trades available.", tag),
            None => "No trades added yet.".to_string(),
        })
    }
}

/// 성과 보기 (패널 목록).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceView {
    pub mode: ViewMode,
    pub panels: Vec<PerformancePanel>,
}

impl PerformanceView {
    /// 보기 방식에 맞게 패널을 구성합니다.
    ///
    /// 분할 보기는 빨강, 파랑 순서의 두 패널을 가집니다.
    pub fn build(metrics: &[TradeMetrics], mode: ViewMode) -> Self {
        let panels = match mode {
            ViewMode::AllTrades => {
                let mut all = metrics.to_vec();
                all.sort_by_key(|m| m.index);
                vec![PerformancePanel::new("All Trades", None, all)]
            }
            ViewMode::SplitByTag => {
                let mut groups = partition_by_tag(metrics);
                [(Tag::Red, "Red Trades"), (Tag::Blue, "Blue Trades")]
                    .into_iter()
                    .map(|(tag, label)| {
                        let trades = groups.remove(&tag).unwrap_or_default();
                        PerformancePanel::new(label, Some(tag), trades)
                    })
                    .collect()
            }
        };

        Self { mode, panels }
    }
}
