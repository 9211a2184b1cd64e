//! CLI 명령어 구현 모듈.

pub mod charts;
pub mod context;
pub mod edit;
pub mod report;
pub mod shell;

pub use context::TrackerContext;
