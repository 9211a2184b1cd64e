//! 금액 계산을 위한 Decimal 유틸리티.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 금액 타입 (매수가, 매도가, 손익).
pub type Price = Decimal;

/// 퍼센트 포인트 타입 (0.5 = 0.5%).
pub type Percentage = Decimal;

/// 매수가/매도가 입력 상한.
///
/// 최대 거래 수만큼 누적해도 `Decimal` 범위를 넘지 않도록 잡은 값입니다.
pub const MAX_PRICE: Price = dec!(1000000000000);

/// 수수료(%) 입력 상한.
pub const MAX_FEE_PERCENT: Percentage = dec!(1000);

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 음수를 0으로 올립니다. 입력 경계에서 사용합니다.
    fn clamp_non_negative(&self) -> Decimal;

    /// 퍼센트 포인트 값을 비율로 변환합니다 (1.5 → 0.015).
    fn percent_to_ratio(&self) -> Decimal;

    /// 차트/허용 오차 비교용 f64 변환. 범위를 벗어나면 0.0.
    fn to_f64_lossy(&self) -> f64;
}

impl DecimalExt for Decimal {
    fn clamp_non_negative(&self) -> Decimal {
        if self.is_sign_negative() {
            Decimal::ZERO
        } else {
            *self
        }
    }

    fn percent_to_ratio(&self) -> Decimal {
        *self / Decimal::ONE_HUNDRED
    }

    fn to_f64_lossy(&self) -> f64 {
        self.to_f64().unwrap_or(0.0)
    }
}
