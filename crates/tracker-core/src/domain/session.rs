//! 세션 상태: 거래 번호별 입력값.
//!
//! 호출자가 소유하는 명시적인 상태 객체입니다. 입력값은 setter를 통해서만
//! 바뀌며, 음수는 이 경계에서 0으로 보정되어 엔진에 음수가 전달되지 않습니다.
//! 상한([`MAX_PRICE`], [`MAX_FEE_PERCENT`])을 넘는 값은 거부됩니다.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

use super::calculations::{compute_metrics, TradeMetrics};
use super::snapshot::Snapshot;
use super::trade::{Tag, TradeInput, TradeRecord};
use crate::error::{TrackerError, TrackerResult};
use crate::types::{DecimalExt, MAX_FEE_PERCENT, MAX_PRICE};

/// 세션의 거래 수 한도.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeLimits {
    /// 최소 거래 수
    pub min: u32,
    /// 최대 거래 수
    pub max: u32,
    /// 새 세션의 거래 수
    pub default: u32,
}

impl Default for TradeLimits {
    fn default() -> Self {
        Self {
            min: 1,
            max: 50,
            default: 1,
        }
    }
}

impl TradeLimits {
    /// 거래 수를 한도 안으로 보정합니다.
    pub fn clamp(&self, count: u32) -> u32 {
        count.clamp(self.min, self.max)
    }
}

/// 한 사용자 세션의 거래 입력 상태.
#[derive(Debug, Clone)]
pub struct TradeSession {
    limits: TradeLimits,
    /// 거래 번호 → 입력값 (1..=count)
    inputs: BTreeMap<u32, TradeInput>,
    /// 마지막으로 로드한 스냅샷 (거래 수를 늘릴 때 미리 채우는 용도)
    prefill: Option<Snapshot>,
}

impl Default for TradeSession {
    fn default() -> Self {
        Self::new(TradeLimits::default())
    }
}

impl TradeSession {
    /// 기본 거래 수만큼 빈 입력값을 가진 세션을 생성합니다.
    pub fn new(limits: TradeLimits) -> Self {
        let mut session = Self {
            limits,
            inputs: BTreeMap::new(),
            prefill: None,
        };
        session.set_trade_count(limits.default);
        session
    }

    /// 스냅샷으로 채워진 세션을 생성합니다.
    pub fn from_snapshot(limits: TradeLimits, snapshot: Snapshot) -> Self {
        let mut session = Self {
            limits,
            inputs: BTreeMap::new(),
            prefill: None,
        };
        session.apply_snapshot(snapshot);
        session
    }

    /// 거래 수 한도.
    pub fn limits(&self) -> TradeLimits {
        self.limits
    }

    /// 현재 거래 수.
    pub fn trade_count(&self) -> u32 {
        self.inputs.len() as u32
    }

    /// 거래 수를 변경합니다.
    ///
    /// 한도 밖의 값은 보정됩니다. 늘어난 번호는 로드한 스냅샷에서 같은 번호의
    /// 값으로 채우고, 없으면 기본값을 사용합니다. 줄어들면 큰 번호부터 버립니다.
    /// 보정된 실제 거래 수를 반환합니다.
    pub fn set_trade_count(&mut self, count: u32) -> u32 {
        let clamped = self.limits.clamp(count);
        if clamped != count {
            warn!(
                requested = count,
                clamped,
                min = self.limits.min,
                max = self.limits.max,
                "Trade count clamped"
            );
        }

        self.inputs.retain(|index, _| *index <= clamped);
        for index in 1..=clamped {
            if !self.inputs.contains_key(&index) {
                let input = self.prefill_for(index);
                self.inputs.insert(index, input);
            }
        }

        debug!(count = clamped, "Trade count set");
        clamped
    }

    fn prefill_for(&self, index: u32) -> TradeInput {
        self.prefill
            .as_ref()
            .and_then(|snapshot| snapshot.entry(index))
            .map(|entry| entry.input())
            .unwrap_or_default()
    }

    /// 거래 번호의 입력값을 조회합니다.
    pub fn input(&self, index: u32) -> TrackerResult<&TradeInput> {
        self.inputs.get(&index).ok_or_else(|| self.missing(index))
    }

    fn input_mut(&mut self, index: u32) -> TrackerResult<&mut TradeInput> {
        let count = self.trade_count();
        self.inputs
            .get_mut(&index)
            .ok_or_else(|| missing_trade(index, count))
    }

    fn missing(&self, index: u32) -> TrackerError {
        missing_trade(index, self.trade_count())
    }

    /// 매수가를 설정합니다. 음수는 0으로 보정되고 보정된 값을 반환합니다.
    ///
    /// 상한을 넘으면 `InvalidInput` 에러를 반환하고 값은 바뀌지 않습니다.
    pub fn set_buy(&mut self, index: u32, value: Decimal) -> TrackerResult<Decimal> {
        let value = check_field(index, "buy", value, MAX_PRICE)?;
        self.input_mut(index)?.buy_price = value;
        debug!(trade = index, buy = %value, "Buy price updated");
        Ok(value)
    }

    /// 매도가를 설정합니다. 음수는 0으로 보정되고 보정된 값을 반환합니다.
    pub fn set_sell(&mut self, index: u32, value: Decimal) -> TrackerResult<Decimal> {
        let value = check_field(index, "sell", value, MAX_PRICE)?;
        self.input_mut(index)?.sell_price = value;
        debug!(trade = index, sell = %value, "Sell price updated");
        Ok(value)
    }

    /// 수수료(%)를 설정합니다. 음수는 0으로 보정되고 보정된 값을 반환합니다.
    pub fn set_fee(&mut self, index: u32, value: Decimal) -> TrackerResult<Decimal> {
        let value = check_field(index, "fee", value, MAX_FEE_PERCENT)?;
        self.input_mut(index)?.fee_percent = value;
        debug!(trade = index, fee = %value, "Fee updated");
        Ok(value)
    }

    /// 태그를 설정합니다.
    pub fn set_tag(&mut self, index: u32, tag: Tag) -> TrackerResult<()> {
        self.input_mut(index)?.tag = tag;
        debug!(trade = index, %tag, "Tag updated");
        Ok(())
    }

    /// 엔진에 전달할 거래 기록 목록 (거래 번호 내림차순).
    pub fn records(&self) -> Vec<TradeRecord> {
        self.inputs
            .iter()
            .rev()
            .map(|(index, input)| TradeRecord::from_input(*index, input))
            .collect()
    }

    /// 거래별 지표 (거래 번호 오름차순).
    pub fn metrics(&self) -> Vec<TradeMetrics> {
        compute_metrics(&self.records())
    }

    /// 현재 입력값의 스냅샷.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_records(&self.records())
    }

    /// 현재 입력값을 스냅샷 JSON으로 직렬화합니다.
    pub fn to_snapshot_json(&self) -> TrackerResult<String> {
        self.snapshot().to_json_pretty()
    }

    /// 현재 입력값을 파일에 기록합니다.
    pub fn save_snapshot_file<P: AsRef<Path>>(&self, path: P) -> TrackerResult<()> {
        self.snapshot().save_file(path)
    }

    /// 스냅샷 JSON을 로드합니다.
    ///
    /// 실패하면 에러를 반환하고 현재 상태는 바뀌지 않습니다.
    pub fn load_snapshot_str(&mut self, json: &str) -> TrackerResult<()> {
        let snapshot = Snapshot::parse(json, self.limits.max)?;
        self.apply_snapshot(snapshot);
        Ok(())
    }

    /// 스냅샷 파일을 로드합니다.
    ///
    /// 실패하면 에러를 반환하고 현재 상태는 바뀌지 않습니다.
    pub fn load_snapshot_file<P: AsRef<Path>>(&mut self, path: P) -> TrackerResult<()> {
        let snapshot = Snapshot::load_file(path, self.limits.max)?;
        self.apply_snapshot(snapshot);
        Ok(())
    }

    fn apply_snapshot(&mut self, snapshot: Snapshot) {
        let count = snapshot.len() as u32;
        self.inputs.clear();
        self.prefill = Some(snapshot);
        let applied = self.set_trade_count(count);
        info!(trades = applied, "Session hydrated from snapshot");
    }
}

fn missing_trade(index: u32, count: u32) -> TrackerError {
    TrackerError::NotFound(format!("Trade {} (session has trades 1..={})", index, count))
}

/// 음수는 0으로 보정하고 상한을 넘는 값은 거부합니다.
pub(crate) fn check_field(
    index: u32,
    field: &str,
    value: Decimal,
    max: Decimal,
) -> TrackerResult<Decimal> {
    let clamped = value.clamp_non_negative();
    if clamped != value {
        warn!(trade = index, field, value = %value, "Negative input clamped to 0");
    }
    if clamped > max {
        return Err(TrackerError::InvalidInput(format!(
            "Trade {} {} {} exceeds maximum {}",
            index, field, clamped, max
        )));
    }
    Ok(clamped)
}
