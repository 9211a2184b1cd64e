//! 포트폴리오 누적 평가 순서.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

/// 포트폴리오 평가 엔진이 거래를 접는(fold) 순서.
///
/// 기본값은 `Descending`: 가장 최근 거래(가장 큰 번호)가 시작점이 되고
/// 그 이전 거래들을 차례로 접습니다. `Ascending`은 시간 순서대로 접습니다.
/// 두 순서는 매수가가 거래마다 다를 때 서로 다른 평가액을 냅니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldOrder {
    /// 거래 번호 내림차순 (N → 1)
    #[default]
    Descending,
    /// 거래 번호 오름차순 (1 → N)
    Ascending,
}

impl fmt::Display for FoldOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoldOrder::Descending => f.write_str("descending"),
            FoldOrder::Ascending => f.write_str("ascending"),
        }
    }
}

impl FromStr for FoldOrder {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "descending" | "desc" => Ok(FoldOrder::Descending),
            "ascending" | "asc" | "chronological" => Ok(FoldOrder::Ascending),
            _ => Err(TrackerError::InvalidInput(format!(
                "Unknown fold order: {}. Supported: descending, ascending",
                s
            ))),
        }
    }
}
