//! 거래 목록 스냅샷 (JSON 배열).
//!
//! 필드 이름은 외부 파일 형식을 그대로 따릅니다:
//! `Trade`, `Buy`, `Sell`, `Fee (%)`, `Profit`, `ROI (%)`, `Total Return`, `Color`.
//! 로드할 때는 입력값(`Buy`, `Sell`, `Fee (%)`, `Color`)만 사용하고
//! 파생값은 다시 계산합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use super::calculations::TradeMetrics;
use super::session::check_field;
use super::trade::{Tag, TradeInput, TradeRecord};
use crate::error::{TrackerError, TrackerResult};
use crate::types::{DecimalExt, MAX_FEE_PERCENT, MAX_PRICE};

/// 스냅샷의 거래 한 건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    #[serde(rename = "Trade")]
    pub trade: u32,
    #[serde(rename = "Buy", with = "rust_decimal::serde::float")]
    pub buy: Decimal,
    #[serde(rename = "Sell", with = "rust_decimal::serde::float")]
    pub sell: Decimal,
    #[serde(rename = "Fee (%)", with = "rust_decimal::serde::float")]
    pub fee: Decimal,
    #[serde(rename = "Profit", with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    #[serde(rename = "ROI (%)", with = "rust_decimal::serde::float")]
    pub roi: Decimal,
    #[serde(rename = "Total Return", with = "rust_decimal::serde::float")]
    pub total_return: Decimal,
    #[serde(rename = "Color")]
    pub color: Tag,
}

impl SnapshotEntry {
    /// 거래 기록과 파생 지표로 항목을 만듭니다.
    pub fn from_record(record: &TradeRecord) -> Self {
        let metrics = TradeMetrics::from_record(record);
        Self {
            trade: metrics.index,
            buy: metrics.buy_price,
            sell: metrics.sell_price,
            fee: metrics.fee_percent,
            profit: metrics.profit,
            roi: metrics.roi,
            total_return: metrics.total_return,
            color: metrics.tag,
        }
    }

    /// 입력값만 꺼냅니다. 음수는 0으로 보정됩니다.
    pub fn input(&self) -> TradeInput {
        TradeInput {
            buy_price: self.buy.clamp_non_negative(),
            sell_price: self.sell.clamp_non_negative(),
            fee_percent: self.fee.clamp_non_negative(),
            tag: self.color,
        }
    }

    fn has_negative_input(&self) -> bool {
        self.buy.is_sign_negative() || self.sell.is_sign_negative() || self.fee.is_sign_negative()
    }
}

/// 스냅샷 전체. 파일에는 거래 번호 내림차순으로 기록됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: Vec<SnapshotEntry>,
}

impl Snapshot {
    /// 거래 기록으로 스냅샷을 만듭니다.
    pub fn from_records(records: &[TradeRecord]) -> Self {
        let mut entries: Vec<SnapshotEntry> =
            records.iter().map(SnapshotEntry::from_record).collect();
        entries.sort_by(|a, b| b.trade.cmp(&a.trade));
        Self { entries }
    }

    /// JSON 문자열을 파싱하고 검증합니다.
    ///
    /// 거래 번호는 1..=N 이 빠짐없이 한 번씩 나와야 하며 N은 `max_trades` 이하여야 합니다.
    /// 입력값이 상한을 넘으면 `InvalidInput` 에러입니다.
    pub fn parse(json: &str, max_trades: u32) -> TrackerResult<Self> {
        let entries: Vec<SnapshotEntry> = serde_json::from_str(json)
            .map_err(|e| TrackerError::Snapshot(format!("Failed to load trades: {}", e)))?;

        if entries.is_empty() {
            return Err(TrackerError::Snapshot(
                "snapshot contains no trades".to_string(),
            ));
        }
        if entries.len() > max_trades as usize {
            return Err(TrackerError::Snapshot(format!(
                "snapshot contains {} trades, maximum is {}",
                entries.len(),
                max_trades
            )));
        }

        let mut indices: Vec<u32> = entries.iter().map(|e| e.trade).collect();
        indices.sort_unstable();
        for (expected, actual) in (1u32..).zip(indices.iter()) {
            if *actual != expected {
                return Err(TrackerError::Snapshot(format!(
                    "trade numbers must be 1..={} without gaps or duplicates (found {} where {} was expected)",
                    entries.len(),
                    actual,
                    expected
                )));
            }
        }

        for entry in entries.iter().filter(|e| e.has_negative_input()) {
            warn!(trade = entry.trade, "Negative snapshot value clamped to 0");
        }
        for entry in &entries {
            let input = entry.input();
            check_field(entry.trade, "Buy", input.buy_price, MAX_PRICE)?;
            check_field(entry.trade, "Sell", input.sell_price, MAX_PRICE)?;
            check_field(entry.trade, "Fee (%)", input.fee_percent, MAX_FEE_PERCENT)?;
        }

        Ok(Self { entries })
    }

    /// 파일에서 스냅샷을 읽습니다.
    pub fn load_file<P: AsRef<Path>>(path: P, max_trades: u32) -> TrackerResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| TrackerError::Snapshot(format!("{}: {}", path.display(), e)))?;
        let snapshot = Self::parse(&json, max_trades)?;
        info!(path = %path.display(), trades = snapshot.len(), "Trades successfully loaded");
        Ok(snapshot)
    }

    /// 4칸 들여쓰기 JSON으로 직렬화합니다.
    pub fn to_json_pretty(&self) -> TrackerResult<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.entries.serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(|e| TrackerError::Serialization(e.to_string()))
    }

    /// 파일에 스냅샷을 기록합니다.
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> TrackerResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_pretty()?)?;
        info!(path = %path.display(), trades = self.len(), "Trades saved");
        Ok(())
    }

    /// 거래 번호로 항목을 찾습니다.
    pub fn entry(&self, trade: u32) -> Option<&SnapshotEntry> {
        self.entries.iter().find(|e| e.trade == trade)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"[
        {"Trade": 2, "Buy": 100.0, "Sell": 150.0, "Fee (%)": 0.0, "Profit": 50.0, "ROI (%)": 50.0, "Total Return": 150.0, "Color": "red"},
        {"Trade": 1, "Buy": 200, "Sell": 0, "Fee (%)": 0, "Profit": -200, "ROI (%)": -100, "Total Return": 0, "Color": "default"}
    ]"#;

    #[test]
    fn test_parse_sample() {
        let snapshot = Snapshot::parse(SAMPLE, 50).unwrap();
        assert_eq!(snapshot.len(), 2);

        let second = snapshot.entry(2).unwrap();
        assert_eq!(second.buy, dec!(100));
        assert_eq!(second.color, Tag::Red);
        assert_eq!(snapshot.entry(1).unwrap().input().sell_price, Decimal::ZERO);
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let json = r#"[{"Trade": 1, "Buy": 1, "Sell": 2, "Profit": 1, "ROI (%)": 100, "Total Return": 2, "Color": "red"}]"#;
        let err = Snapshot::parse(json, 50).unwrap_err();
        assert!(matches!(err, TrackerError::Snapshot(_)));
        assert!(err.to_string().contains("Fee (%)"));
    }

    #[test]
    fn test_parse_rejects_unknown_color() {
        let json = SAMPLE.replace("\"red\"", "\"green\"");
        assert!(Snapshot::parse(&json, 50).is_err());
    }

    #[test]
    fn test_parse_rejects_gaps_and_duplicates() {
        let gapped = SAMPLE.replace("\"Trade\": 2", "\"Trade\": 3");
        assert!(Snapshot::parse(&gapped, 50).is_err());

        let duplicated = SAMPLE.replace("\"Trade\": 2", "\"Trade\": 1");
        assert!(Snapshot::parse(&duplicated, 50).is_err());
    }

    #[test]
    fn test_parse_rejects_empty_and_oversized() {
        assert!(Snapshot::parse("[]", 50).is_err());
        assert!(Snapshot::parse(SAMPLE, 1).is_err());
        assert!(Snapshot::parse("not json", 50).is_err());
    }

    #[test]
    fn test_negative_values_clamped() {
        let json = SAMPLE.replace("\"Buy\": 100.0", "\"Buy\": -5.0");
        let snapshot = Snapshot::parse(&json, 50).unwrap();
        assert_eq!(snapshot.entry(2).unwrap().input().buy_price, Decimal::ZERO);
    }

    #[test]
    fn test_parse_rejects_oversized_values() {
        let json = SAMPLE.replace("\"Sell\": 150.0", "\"Sell\": 1e17");
        let err = Snapshot::parse(&json, 50).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidInput(_)));
        assert!(err.to_string().contains("Trade 2 Sell"));
    }

    #[test]
    fn test_serialize_descending_with_field_names() {
        let records = vec![
            TradeRecord::new(1, dec!(10), dec!(12), dec!(0)),
            TradeRecord::new(2, dec!(100), dec!(150), dec!(1)).with_tag(Tag::Blue),
        ];
        let json = Snapshot::from_records(&records).to_json_pretty().unwrap();

        assert!(json.starts_with("[\n    {\n        \"Trade\": 2,"));
        assert!(json.contains("\"Fee (%)\": 1.0"));
        assert!(json.contains("\"Profit\": 48.5"));
        assert!(json.contains("\"Color\": \"blue\""));
    }
}
