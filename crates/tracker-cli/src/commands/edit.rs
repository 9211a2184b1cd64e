//! 스냅샷 생성/편집 명령어.
//!
//! # 사용 예시
//!
//! ```bash
//! # 거래 3건짜리 빈 스냅샷 생성
//! tracker init --count 3
//!
//! # 2번 거래 입력
//! tracker set --trade 2 --buy 100 --sell 150 --fee 0.5 --tag red
//!
//! # 거래 수 변경 (로드한 스냅샷 값으로 미리 채움)
//! tracker resize --count 5
//! ```

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;
use tracing::info;

use tracker_core::{Tag, TradeInput};

use super::context::TrackerContext;

/// 거래 한 건 편집 설정.
#[derive(Debug, Clone, Default)]
pub struct SetTradeConfig {
    /// 거래 번호
    pub trade: u32,
    pub buy: Option<Decimal>,
    pub sell: Option<Decimal>,
    pub fee: Option<Decimal>,
    pub tag: Option<Tag>,
}

/// 빈 거래로 채운 새 스냅샷을 기록합니다.
///
/// 보정된 거래 수를 반환합니다.
pub fn init_snapshot(ctx: &TrackerContext, count: Option<u32>, output: &Path) -> Result<u32> {
    let mut session = ctx.new_session();
    let count = session.set_trade_count(count.unwrap_or(ctx.config.tracker.default_trades));

    session
        .save_snapshot_file(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(path = %output.display(), count, "Snapshot initialized");
    Ok(count)
}

/// 거래 한 건을 수정하고 스냅샷을 다시 기록합니다.
///
/// 로드나 수정이 실패하면 파일은 그대로 남습니다.
pub fn set_trade(ctx: &TrackerContext, file: &Path, config: &SetTradeConfig) -> Result<TradeInput> {
    let index = config.trade;
    let _span = tracker_core::trade_span!("set_trade", index).entered();
    let mut session = ctx.load_session(file)?;

    if let Some(buy) = config.buy {
        session.set_buy(index, buy)?;
    }
    if let Some(sell) = config.sell {
        session.set_sell(index, sell)?;
    }
    if let Some(fee) = config.fee {
        session.set_fee(index, fee)?;
    }
    if let Some(tag) = config.tag {
        session.set_tag(index, tag)?;
    }
    // 아무 필드도 없으면 존재 여부만 확인
    let input = *session.input(index)?;

    session
        .save_snapshot_file(file)
        .with_context(|| format!("Failed to write {}", file.display()))?;

    info!(path = %file.display(), trade = index, "Trade updated");
    Ok(input)
}

/// 거래 수를 변경하고 스냅샷을 다시 기록합니다.
pub fn resize(ctx: &TrackerContext, file: &Path, count: u32) -> Result<u32> {
    let mut session = ctx.load_session(file)?;
    let applied = session.set_trade_count(count);

    session
        .save_snapshot_file(file)
        .with_context(|| format!("Failed to write {}", file.display()))?;

    info!(path = %file.display(), count = applied, "Trade count changed");
    Ok(applied)
}
