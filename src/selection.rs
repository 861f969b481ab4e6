use chrono::NaiveDate;
use thiserror::Error;
use crate::models::reading::SensorReading;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no sensor readings available")]
    EmptyInput,
}

/// Returns the most recent reading, i.e. the last one in arrival order.
/// The sheet appends readings as they are sampled so arrival order is
/// assumed chronological.
///
/// # Arguments
///
/// * 'readings' - all readings in arrival order
pub fn latest(readings: &[SensorReading]) -> Result<&SensorReading, SelectionError> {
    readings.last().ok_or(SelectionError::EmptyInput)
}

/// Returns the readings whose timestamp falls on the given calendar date,
/// time of day ignored, preserving arrival order.
///
/// An empty result is a valid outcome and distinct from failure, the caller
/// renders it as no data available.
///
/// # Arguments
///
/// * 'readings' - all readings in arrival order
/// * 'date' - the calendar date to filter on
pub fn select_by_date(readings: &[SensorReading], date: NaiveDate) -> Vec<SensorReading> {
    readings.iter()
        .filter(|r| r.timestamp.date_naive() == date)
        .cloned()
        .collect()
}

/// Returns the most recent reading of the given date's window, for feeding
/// into the classifier
///
/// # Arguments
///
/// * 'readings' - all readings in arrival order
/// * 'date' - the calendar date to filter on
pub fn latest_in_window(readings: &[SensorReading], date: NaiveDate) -> Option<SensorReading> {
    select_by_date(readings, date).last().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn reading(y: i32, m: u32, d: u32, h: u32, temperature: f64) -> SensorReading {
        SensorReading {
            timestamp: Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
            temperature,
            humidity: 80.0,
            rain_sensor: 1.0,
            ldr_sensor: 300.0,
        }
    }

    fn sample() -> Vec<SensorReading> {
        vec![
            reading(2024, 1, 1, 8, 25.0),
            reading(2024, 1, 1, 9, 26.0),
            reading(2024, 1, 3, 7, 22.0),
        ]
    }

    #[test]
    fn latest_returns_last_in_arrival_order() {
        let readings = sample();
        let current = latest(&readings).unwrap();

        assert_eq!(current.temperature, 22.0);
    }

    #[test]
    fn latest_on_empty_input_fails() {
        assert_eq!(latest(&[]), Err(SelectionError::EmptyInput));
    }

    #[test]
    fn select_by_date_keeps_matching_rows_in_order() {
        let readings = sample();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let window = select_by_date(&readings, date);

        assert_eq!(window.len(), 2);
        assert_eq!(window[0].temperature, 25.0);
        assert_eq!(window[1].temperature, 26.0);
    }

    #[test]
    fn select_by_date_without_match_is_empty_not_error() {
        let readings = sample();
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        assert!(select_by_date(&readings, date).is_empty());
    }

    #[test]
    fn select_by_date_is_idempotent() {
        let readings = sample();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let window = select_by_date(&readings, date);
        let again = select_by_date(&window, date);

        assert_eq!(again, window);
    }

    #[test]
    fn latest_in_window_returns_most_recent_of_the_day() {
        let readings = sample();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let current = latest_in_window(&readings, date).unwrap();

        assert_eq!(current.temperature, 26.0);
    }

    #[test]
    fn latest_in_window_without_match_is_none() {
        let readings = sample();
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        assert!(latest_in_window(&readings, date).is_none());
    }
}
