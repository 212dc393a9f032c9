use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in the timezone named by `canonical_timezone`.
pub fn today_in_timezone(canonical_timezone: &str) -> Option<time::Date> {
    get_local_offset(canonical_timezone)
        .map(|offset| OffsetDateTime::now_utc().to_offset(offset).date())
}

#[cfg(test)]
mod timezone_tests {
    use super::{get_local_offset, today_in_timezone};

    #[test]
    fn resolves_utc() {
        let offset = get_local_offset("Etc/UTC").expect("Etc/UTC should resolve");

        assert!(offset.is_utc());
    }

    #[test]
    fn rejects_unknown_timezone() {
        assert!(get_local_offset("Not/AZone").is_none());
        assert!(today_in_timezone("Not/AZone").is_none());
    }
}
