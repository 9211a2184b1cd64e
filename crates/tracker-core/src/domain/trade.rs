//! 거래 기록 타입.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;
use crate::types::{Percentage, Price};

/// 사용자가 거래에 붙이는 분류 태그 (색상).
///
/// 계산에는 영향이 없고 표시용 분할에만 사용됩니다.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    #[default]
    Default,
    Red,
    Blue,
}

impl Tag {
    /// 선택 가능한 모든 태그 (표시 순서).
    pub const ALL: [Tag; 3] = [Tag::Default, Tag::Red, Tag::Blue];

    /// 스냅샷 및 화면에 쓰이는 이름.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Default => "default",
            Tag::Red => "red",
            Tag::Blue => "blue",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Tag::Default),
            "red" => Ok(Tag::Red),
            "blue" => Ok(Tag::Blue),
            _ => Err(TrackerError::InvalidInput(format!(
                "Unknown color: {}. Supported: default, red, blue",
                s
            ))),
        }
    }
}

/// 거래 번호 하나에 대한 입력값.
///
/// 입력 경계에서 이미 0 이상으로 보정된 값만 담습니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TradeInput {
    /// 매수가
    pub buy_price: Price,
    /// 매도가
    pub sell_price: Price,
    /// 수수료 (퍼센트 포인트)
    pub fee_percent: Percentage,
    /// 태그
    pub tag: Tag,
}

/// 엔진에 전달되는 단일 거래 기록.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeRecord {
    /// 1부터 시작하는 거래 번호 (시간 순서)
    pub index: u32,
    /// 매수가
    pub buy_price: Price,
    /// 매도가
    pub sell_price: Price,
    /// 수수료 (퍼센트 포인트, 0.5 = 0.5%)
    pub fee_percent: Percentage,
    /// 태그
    pub tag: Tag,
}

impl TradeRecord {
    /// 새 거래 기록을 생성합니다.
    pub fn new(index: u32, buy_price: Decimal, sell_price: Decimal, fee_percent: Decimal) -> Self {
        Self {
            index,
            buy_price,
            sell_price,
            fee_percent,
            tag: Tag::Default,
        }
    }

    /// 태그를 지정합니다.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }

    /// 입력값으로부터 거래 기록을 만듭니다.
    pub fn from_input(index: u32, input: &TradeInput) -> Self {
        Self {
            index,
            buy_price: input.buy_price,
            sell_price: input.sell_price,
            fee_percent: input.fee_percent,
            tag: input.tag,
        }
    }

    /// 입력값 부분만 떼어냅니다.
    pub fn input(&self) -> TradeInput {
        TradeInput {
            buy_price: self.buy_price,
            sell_price: self.sell_price,
            fee_percent: self.fee_percent,
            tag: self.tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tag_parse_and_display() {
        assert_eq!("RED".parse::<Tag>().unwrap(), Tag::Red);
        assert_eq!(" blue ".parse::<Tag>().unwrap(), Tag::Blue);
        assert_eq!(Tag::Default.to_string(), "default");
        assert!("green".parse::<Tag>().is_err());
    }

    #[test]
    fn test_tag_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Tag::Red).unwrap(), "\"red\"");
        let tag: Tag = serde_json::from_str("\"blue\"").unwrap();
        assert_eq!(tag, Tag::Blue);
        assert!(serde_json::from_str::<Tag>("\"Blue\"").is_err());
    }

    #[test]
    fn test_record_input_roundtrip() {
        let record = TradeRecord::new(3, dec!(100), dec!(120), dec!(0.5)).with_tag(Tag::Red);
        let rebuilt = TradeRecord::from_input(3, &record.input());
        assert_eq!(record, rebuilt);
    }
}
