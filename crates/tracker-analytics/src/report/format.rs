//! 통화/퍼센트 문자열 포맷팅.
//!
//! 소수점 둘째 자리까지 반올림하고 천 단위 구분 쉼표를 넣습니다.
//! 음수 통화는 기호 뒤에 부호가 붙습니다 (`$-200.00`).

use rust_decimal::{Decimal, RoundingStrategy};

/// 표시 설정.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFormat {
    /// 통화 기호
    pub currency_symbol: String,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}

impl DisplayFormat {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    /// 통화 문자열 (예: "$1,234.50").
    pub fn currency(&self, value: Decimal) -> String {
        format!("{}{}", self.currency_symbol, group_thousands(value))
    }

    /// 퍼센트 문자열 (예: "48.50%").
    pub fn percent(&self, value: Decimal) -> String {
        format!("{}%", group_thousands(value))
    }
}

/// 기본 통화 기호(`$`)로 포맷합니다.
pub fn format_currency(value: Decimal) -> String {
    DisplayFormat::default().currency(value)
}

/// 퍼센트로 포맷합니다.
pub fn format_percent(value: Decimal) -> String {
    DisplayFormat::default().percent(value)
}

/// 소수점 둘째 자리 반올림 후 천 단위 쉼표를 넣습니다.
///
/// 반올림은 정확한 십진값 기준 0.5 올림(0.125 → 0.13)이고, 부호만 남는 0은
/// "0.00"으로 출력합니다. 이진 부동소수 포맷(0.125 → "0.12", "-0.00")과 다릅니다.
fn group_thousands(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // "-0.00" 대신 "0.00"
        rounded = Decimal::ZERO;
    }

    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(48.5)), "$48.50");
        assert_eq!(format_currency(dec!(1234.5)), "$1,234.50");
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(-200)), "$-200.00");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
        assert_eq!(format_currency(dec!(0.125)), "$0.13");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(48.5)), "48.50%");
        assert_eq!(format_percent(dec!(-233.33333)), "-233.33%");
        assert_eq!(format_percent(dec!(12345.678)), "12,345.68%");
    }

    #[test]
    fn test_custom_currency_symbol() {
        let fmt = DisplayFormat::new("€");
        assert_eq!(fmt.currency(dec!(999.995)), "€1,000.00");
    }
}
