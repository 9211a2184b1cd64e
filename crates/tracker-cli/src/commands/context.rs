//! 명령어 공통 컨텍스트.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use tracker_analytics::{DisplayFormat, TradeReport};
use tracker_core::{AppConfig, FoldOrder, Snapshot, TradeSession};

/// 설정에서 파생된 명령어 실행 환경.
#[derive(Debug, Clone, Default)]
pub struct TrackerContext {
    pub config: AppConfig,
}

impl TrackerContext {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// 새 세션을 생성합니다.
    pub fn new_session(&self) -> TradeSession {
        TradeSession::new(self.config.tracker.limits())
    }

    /// 스냅샷 파일에서 세션을 로드합니다.
    pub fn load_session(&self, path: &Path) -> Result<TradeSession> {
        let limits = self.config.tracker.limits();
        let snapshot = Snapshot::load_file(path, limits.max)
            .with_context(|| format!("Failed to load trades from {}", path.display()))?;
        Ok(TradeSession::from_snapshot(limits, snapshot))
    }

    /// 파일 인자가 없으면 설정의 기본 스냅샷 경로를 사용합니다.
    pub fn snapshot_path(&self, file: Option<PathBuf>) -> PathBuf {
        file.unwrap_or_else(|| PathBuf::from(&self.config.tracker.snapshot_path))
    }

    /// 명령줄 값이 없으면 설정의 접기 순서를 사용합니다.
    pub fn fold_order(&self, flag: Option<FoldOrder>) -> FoldOrder {
        flag.unwrap_or(self.config.valuation.fold_order)
    }

    /// 표시 형식.
    pub fn display(&self) -> DisplayFormat {
        DisplayFormat::new(self.config.display.currency_symbol.clone())
    }

    /// 세션에 대한 리포트를 계산합니다.
    pub fn report(&self, session: &TradeSession, order: FoldOrder) -> TradeReport {
        TradeReport::build(&session.records(), order)
    }
}
