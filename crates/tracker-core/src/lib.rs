//! # Tracker Core
//!
//! 매매 기록기의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 거래 기록 및 거래별 손익 계산
//! - 세션 상태 (거래 번호별 입력값)
//! - 스냅샷 파일 형식 (JSON)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
