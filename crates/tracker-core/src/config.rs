//! 설정 관리.
//!
//! 기본값 → TOML 파일 → `TRACKER__` 환경 변수 순으로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::{FoldOrder, TradeLimits};
use crate::error::{TrackerError, TrackerResult};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 거래 입력 설정
    #[serde(default)]
    pub tracker: TrackerConfig,
    /// 포트폴리오 평가 설정
    #[serde(default)]
    pub valuation: ValuationConfig,
    /// 표시 설정
    #[serde(default)]
    pub display: DisplayConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// 파일명과 줄 번호 포함 여부
    #[serde(default)]
    pub with_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            with_file: false,
        }
    }
}

/// 거래 입력 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerConfig {
    /// 최소 거래 수
    pub min_trades: u32,
    /// 최대 거래 수
    pub max_trades: u32,
    /// 새 세션의 거래 수
    pub default_trades: u32,
    /// 스냅샷 기본 파일 경로
    pub snapshot_path: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            min_trades: 1,
            max_trades: 50,
            default_trades: 1,
            snapshot_path: "trades_backup.json".to_string(),
        }
    }
}

impl TrackerConfig {
    /// 세션에서 사용할 거래 수 한도를 반환합니다.
    pub fn limits(&self) -> TradeLimits {
        TradeLimits {
            min: self.min_trades,
            max: self.max_trades,
            default: self.default_trades,
        }
    }
}

/// 포트폴리오 평가 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ValuationConfig {
    /// 누적 평가 순서
    #[serde(default)]
    pub fold_order: FoldOrder,
}

/// 표시 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// 통화 기호
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> TrackerResult<Self> {
        let defaults = AppConfig::default();

        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .set_default("logging.with_file", defaults.logging.with_file)?
            .set_default("tracker.min_trades", i64::from(defaults.tracker.min_trades))?
            .set_default("tracker.max_trades", i64::from(defaults.tracker.max_trades))?
            .set_default("tracker.default_trades", i64::from(defaults.tracker.default_trades))?
            .set_default("tracker.snapshot_path", defaults.tracker.snapshot_path)?
            .set_default("valuation.fold_order", "descending")?
            .set_default("display.currency_symbol", defaults.display.currency_symbol)?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("TRACKER")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        tracing::debug!(path = %path.as_ref().display(), "Configuration loaded");
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> TrackerResult<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// 설정값의 일관성을 검사합니다.
    pub fn validate(&self) -> TrackerResult<()> {
        let t = &self.tracker;
        if t.min_trades < 1 {
            return Err(TrackerError::Config(
                "tracker.min_trades must be at least 1".to_string(),
            ));
        }
        if t.max_trades < t.min_trades {
            return Err(TrackerError::Config(format!(
                "tracker.max_trades ({}) is below tracker.min_trades ({})",
                t.max_trades, t.min_trades
            )));
        }
        if !(t.min_trades..=t.max_trades).contains(&t.default_trades) {
            return Err(TrackerError::Config(format!(
                "tracker.default_trades ({}) must be within {}..={}",
                t.default_trades, t.min_trades, t.max_trades
            )));
        }
        Ok(())
    }
}
