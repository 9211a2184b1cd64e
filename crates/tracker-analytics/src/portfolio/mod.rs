//! 포트폴리오 분석 모듈
//!
//! # 모듈 구성
//!
//! - [`valuation`]: 누적 포트폴리오 평가 (헤드라인 지표)
//! - [`charts`]: 태그별 분할과 차트용 누적 시리즈
//!
//! # 사용 예시
//!
//! ```rust
//! use tracker_analytics::portfolio::{PortfolioValuation, ChartSeries};
//! use tracker_core::{compute_metrics, FoldOrder, TradeRecord};
//! use rust_decimal_macros::dec;
//!
//! let records = vec![
//!     TradeRecord::new(1, dec!(200), dec!(0), dec!(0)),
//!     TradeRecord::new(2, dec!(100), dec!(150), dec!(0)),
//! ];
//!
//! let summary = PortfolioValuation::new(FoldOrder::Descending).evaluate(&records);
//! assert_eq!(summary.portfolio_value, dec!(-200));
//!
//! let series = ChartSeries::from_metrics(&compute_metrics(&records));
//! assert_eq!(series.portfolio_value.len(), 2);
//! ```

pub mod charts;
pub mod valuation;

pub use charts::*;
pub use valuation::*;
