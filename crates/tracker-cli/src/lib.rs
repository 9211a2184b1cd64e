//! 매매 기록기 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 스냅샷 파일 생성/편집
//! - 헤드라인 지표, 거래 표, 평가 과정 출력
//! - 차트 시리즈 출력 (JSON/CSV)
//! - 대화형 세션 셸

pub mod commands;

pub use commands::*;
