use chrono::{Duration, NaiveDate};

const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1970, 1, 1) {
    Some(date) => date,
    None => panic!("unix epoch is a valid date"),
};

/// Convert NaiveDate to Polars i32 date
pub fn date_to_i32(date: NaiveDate) -> i32 {
    (date - EPOCH).num_days() as i32
}

pub fn i32_to_date(days: i32) -> NaiveDate {
    EPOCH + Duration::days(days as i64)
}

/// Local calendar date, the planner's notion of "today".
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polars_date_conversion_is_symmetric() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(i32_to_date(date_to_i32(date)), date);
        assert_eq!(date_to_i32(EPOCH), 0);
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("2025-01-06").is_some());
        assert!(parse_date("06/01/2025").is_none());
    }
}
