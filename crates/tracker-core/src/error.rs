//! 매매 기록기의 에러 타입.
//!
//! 이 모듈은 기록기 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 기록기 에러.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 스냅샷 로드 에러
    #[error("스냅샷 에러: {0}")]
    Snapshot(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 파일 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 기록기 작업을 위한 Result 타입.
pub type TrackerResult<T> = Result<T, TrackerError>;

impl TrackerError {
    /// 사용자가 입력을 고쳐 다시 시도할 수 있는 에러인지 확인합니다.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TrackerError::Snapshot(_) | TrackerError::InvalidInput(_) | TrackerError::NotFound(_)
        )
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for TrackerError {
    fn from(err: config::ConfigError) -> Self {
        TrackerError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_facing() {
        let snapshot_err = TrackerError::Snapshot("missing field `Buy`".to_string());
        assert!(snapshot_err.is_user_error());

        let io_err = TrackerError::Io("permission denied".to_string());
        assert!(!io_err.is_user_error());
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<Vec<u32>>("[1, 2").unwrap_err();
        let tracker_err: TrackerError = err.into();
        assert!(matches!(tracker_err, TrackerError::Serialization(_)));
    }
}
