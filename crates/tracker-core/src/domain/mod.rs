//! 매매 기록을 위한 도메인 모델.

mod calculations;
mod fold_order;
mod session;
mod snapshot;
mod trade;

pub use calculations::*;
pub use fold_order::*;
pub use session::*;
pub use snapshot::*;
pub use trade::*;
