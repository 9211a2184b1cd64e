//! 포트폴리오 평가 및 표시용 분석.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 포트폴리오 평가 엔진 (자본 재사용/추가 투입 추적)
//! - 태그별 분할과 차트 시리즈
//! - 통화/퍼센트 문자열 포맷팅과 거래 표
//!
//! # Re-exports
//!
//! - [`portfolio`]: 평가 엔진 (PortfolioValuation, PortfolioSummary) 및 차트 (ChartSeries, PerformanceView)
//! - [`report`]: 표시 계층 (TradeReport, TotalsOverview, format_currency)

pub mod portfolio;
pub mod report;

// Portfolio 모듈 re-exports
pub use portfolio::charts::{
    partition_by_tag, ChartSeries, PerformancePanel, PerformanceView, SeriesPoint, ViewMode,
};
pub use portfolio::valuation::{PortfolioSummary, PortfolioValuation, ValuationStep};

// Report 모듈 re-exports
pub use report::format::{format_currency, format_percent, DisplayFormat};
pub use report::table::{
    format_rows, render_table, FormattedTradeRow, TotalsOverview, TradeReport,
};
