//! 표시 계층.
//!
//! 숫자 엔진의 결과를 문자열로 바꾸는 순수 함수들입니다. 엔진 출력은
//! 항상 `Decimal`로 유지되고 포맷팅은 여기서만 일어납니다.

pub mod format;
pub mod table;

pub use format::*;
pub use table::*;
