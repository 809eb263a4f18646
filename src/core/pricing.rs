use crate::domain::model::BookingCalculation;
use crate::utils::error::{Result, StayError};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

const DAY_MS: f64 = 86_400_000.0;

/// 解析 `YYYY-MM-DD` 或 RFC 3339 字串；純日期視為 UTC 午夜
pub fn parse_date_input(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(date_time.with_timezone(&Utc));
    }

    if let Ok(date_time) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(date_time.and_utc());
    }

    Err(StayError::InvalidDate {
        value: value.to_string(),
    })
}

/// 不檢查日期區間；nights 可能為 0 或負數，呼叫端應先呼叫 `is_valid_date_range`
pub fn price_for_range(
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    base_price: f64,
    cleaning_fee: f64,
) -> BookingCalculation {
    let diff_ms = (check_out - check_in).num_milliseconds() as f64;
    let nights = (diff_ms / DAY_MS).ceil() as i64;

    BookingCalculation {
        nights,
        base_price: base_price * nights as f64,
        cleaning_fee,
        total: base_price * nights as f64 + cleaning_fee,
    }
}

pub fn calculate_booking_price(
    check_in_date: &str,
    check_out_date: &str,
    base_price: f64,
    cleaning_fee: f64,
) -> Result<BookingCalculation> {
    let check_in = parse_date_input(check_in_date)?;
    let check_out = parse_date_input(check_out_date)?;
    Ok(price_for_range(check_in, check_out, base_price, cleaning_fee))
}

/// 沒有清潔費時以 0 計算
pub fn calculate_with_optional_fee(
    check_in_date: &str,
    check_out_date: &str,
    base_price: f64,
    cleaning_fee: Option<f64>,
) -> Result<BookingCalculation> {
    calculate_booking_price(
        check_in_date,
        check_out_date,
        base_price,
        cleaning_fee.unwrap_or(0.0),
    )
}

/// check-in 不可早於 `today`，check-out 必須晚於 check-in
pub fn is_valid_date_range(check_in_date: &str, check_out_date: &str, today: NaiveDate) -> bool {
    if check_in_date.trim().is_empty() || check_out_date.trim().is_empty() {
        return false;
    }

    let parse = |value: &str| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d");
    match (parse(check_in_date), parse(check_out_date)) {
        (Ok(check_in), Ok(check_out)) => check_in >= today && check_out > check_in,
        _ => false,
    }
}

pub fn is_valid_date_range_from_today(check_in_date: &str, check_out_date: &str) -> bool {
    is_valid_date_range(check_in_date, check_out_date, Local::now().date_naive())
}

/// `Fri, Mar 1, 2024`
pub fn format_date(value: &str) -> Result<String> {
    let date = parse_date_input(value)?.date_naive();
    Ok(date.format("%a, %b %-d, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_three_night_stay_with_cleaning_fee() {
        let calc = calculate_booking_price("2024-03-01", "2024-03-04", 150.0, 25.0).unwrap();

        assert_eq!(calc.nights, 3);
        assert_eq!(calc.base_price, 450.0);
        assert_eq!(calc.cleaning_fee, 25.0);
        assert_eq!(calc.total, 475.0);
    }

    #[test]
    fn test_missing_cleaning_fee_defaults_to_zero() {
        let calc = calculate_with_optional_fee("2024-03-01", "2024-03-02", 200.0, None).unwrap();
        assert_eq!(calc.nights, 1);
        assert_eq!(calc.cleaning_fee, 0.0);
        assert_eq!(calc.total, 200.0);
    }

    #[test]
    fn test_partial_days_round_up() {
        let calc =
            calculate_booking_price("2024-03-01T10:00:00Z", "2024-03-03T09:00:00Z", 100.0, 0.0)
                .unwrap();
        // 47 小時 -> 2 晚
        assert_eq!(calc.nights, 2);

        let calc =
            calculate_booking_price("2024-03-01T10:00:00Z", "2024-03-03T11:00:00Z", 100.0, 0.0)
                .unwrap();
        assert_eq!(calc.nights, 3);
        assert_eq!(calc.total, 300.0);
    }

    #[test]
    fn test_nights_formula_over_many_ranges() {
        let start = day(2024, 1, 1);
        for offset in 1..=60 {
            let end = start + chrono::Days::new(offset);
            let calc = calculate_booking_price(
                &start.to_string(),
                &end.to_string(),
                185.0,
                30.0,
            )
            .unwrap();
            assert_eq!(calc.nights, offset as i64);
            assert_eq!(calc.total, calc.nights as f64 * 185.0 + 30.0);
        }
    }

    #[test]
    fn test_degenerate_range_is_not_rejected() {
        let calc = calculate_booking_price("2024-03-04", "2024-03-01", 100.0, 10.0).unwrap();
        assert_eq!(calc.nights, -3);
        assert_eq!(calc.total, -290.0);
    }

    #[test]
    fn test_unparseable_date_is_an_error() {
        assert!(matches!(
            calculate_booking_price("tomorrow", "2024-03-04", 100.0, 0.0),
            Err(StayError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_is_valid_date_range() {
        let today = day(2024, 3, 1);

        assert!(is_valid_date_range("2024-03-01", "2024-03-02", today));
        assert!(is_valid_date_range("2024-04-10", "2024-04-20", today));
        // check-out 等於 check-in
        assert!(!is_valid_date_range("2024-03-05", "2024-03-05", today));
        assert!(!is_valid_date_range("2024-03-05", "2024-03-04", today));
        // check-in 在今天之前
        assert!(!is_valid_date_range("2024-02-29", "2024-03-04", today));
        assert!(!is_valid_date_range("", "2024-03-04", today));
        assert!(!is_valid_date_range("2024-03-02", "", today));
        assert!(!is_valid_date_range("03/02/2024", "2024-03-04", today));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-01").unwrap(), "Fri, Mar 1, 2024");
        assert_eq!(format_date("2024-12-25").unwrap(), "Wed, Dec 25, 2024");
    }
}
