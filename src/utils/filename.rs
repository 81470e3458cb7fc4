use chrono::{DateTime, NaiveDateTime, TimeZone};
use std::path::Path;

use crate::utils::constants::{RAW_FILE_EXTENSION, RAW_FILE_PREFIX, RAW_FILE_TIMESTAMP_FORMAT};

/// Raw snapshot filename for a capture time: weather_data_{YYYY-MM-DD_HH-MM-SS}.csv
pub fn raw_data_filename<Tz: TimeZone>(captured_at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}{}.{}",
        RAW_FILE_PREFIX,
        captured_at.format(RAW_FILE_TIMESTAMP_FORMAT),
        RAW_FILE_EXTENSION
    )
}

/// Whether a file name is a raw snapshot written by this tool
pub fn is_raw_data_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|f| f.to_str())
        .and_then(parse_capture_time)
        .is_some()
}

/// Parse the capture time back out of a raw snapshot filename
pub fn parse_capture_time(file_name: &str) -> Option<NaiveDateTime> {
    let stamp = file_name
        .strip_prefix(RAW_FILE_PREFIX)?
        .strip_suffix(RAW_FILE_EXTENSION)?
        .strip_suffix('.')?;
    NaiveDateTime::parse_from_str(stamp, RAW_FILE_TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use std::path::PathBuf;

    #[test]
    fn test_raw_data_filename() {
        let captured = Utc.with_ymd_and_hms(2024, 7, 15, 9, 5, 3).unwrap();
        assert_eq!(
            raw_data_filename(&captured),
            "weather_data_2024-07-15_09-05-03.csv"
        );
    }

    #[test]
    fn test_local_filename_is_recognised() {
        let name = raw_data_filename(&chrono::Local::now());
        assert!(is_raw_data_file(&PathBuf::from("data").join(&name)));
        assert!(parse_capture_time(&name).is_some());
    }

    #[test]
    fn test_is_raw_data_file() {
        assert!(is_raw_data_file(Path::new("data/weather_data_2024-07-15_09-05-03.csv")));
        assert!(!is_raw_data_file(Path::new("data/daily_summary.csv")));
        assert!(!is_raw_data_file(Path::new("data/weather_data_2024-07-15.json")));
        assert!(!is_raw_data_file(Path::new("data/weather_data_backup.csv")));
    }

    #[test]
    fn test_parse_capture_time() {
        let parsed = parse_capture_time("weather_data_2024-07-15_09-05-03.csv").unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2024, 7, 15)
                .unwrap()
                .and_hms_opt(9, 5, 3)
                .unwrap()
        );
        assert!(parse_capture_time("daily_summary.csv").is_none());
    }
}
