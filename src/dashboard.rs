use std::io;
use std::io::{BufRead, Write};
use chrono::{Local, NaiveDate};
use log::{error, info};
use crate::classifier::classify_weather;
use crate::errors::DashboardError;
use crate::initialization::Mgr;
use crate::manager_model::PredictiveModel;
use crate::models::reading::SensorReading;
use crate::retry;
use crate::selection::{latest, latest_in_window, select_by_date};

/// Views selectable from the navigation prompt
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum View {
    Home,
    Current,
    Date(NaiveDate),
}

impl View {
    /// Parses a navigation command into a view.
    /// Accepted commands are "home", "current" and "date YYYY-MM-DD".
    ///
    /// # Arguments
    ///
    /// * 'line' - the command to parse
    pub fn parse(line: &str) -> Option<View> {
        let line = line.trim();
        match line {
            "home" => Some(View::Home),
            "current" => Some(View::Current),
            _ => line.strip_prefix("date ")
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
                .map(View::Date),
        }
    }
}

/// Runs the dashboard.
///
/// With a one shot view given it renders that view once and returns.
/// Otherwise it loops over navigation commands from stdin where each command
/// triggers one synchronous pass of selection, classification and rendering.
/// A failing pass is reported and logged, and the dashboard stays up.
///
/// # Arguments
///
/// * 'mgr' - the managers needed by the dashboard
/// * 'one_shot' - an optional single view to render
pub fn run(mgr: &mut Mgr, one_shot: Option<View>) -> Result<(), DashboardError> {
    if let Some(view) = one_shot {
        return show(mgr, view);
    }

    show(mgr, View::Home)?;

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line == "quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match View::parse(line) {
            Some(view) => {
                if let Err(e) = show(mgr, view) {
                    error!("dashboard pass failed: {}", e);
                    println!("{}", e);
                }
            },
            None => println!("Options: home, current, date YYYY-MM-DD, quit"),
        }
    }

    Ok(())
}

/// Renders one view
///
/// # Arguments
///
/// * 'mgr' - the managers needed by the dashboard
/// * 'view' - the view to render
fn show(mgr: &mut Mgr, view: View) -> Result<(), DashboardError> {
    match view {
        View::Home => show_home(),
        View::Current => show_current(mgr)?,
        View::Date(date) => show_by_date(mgr, date)?,
    }

    Ok(())
}

/// Renders the welcome view
fn show_home() {
    print_msg("Welcome to the weather prediction dashboard.\n\
               The dashboard labels the weather condition from the readings the sensor rig\n\
               appends to the monitoring sheet, either for the most recent reading or for\n\
               the most recent reading of a selected date.\n\n\
               Options: home, current, date YYYY-MM-DD, quit", "Home");
}

/// Renders the current conditions view: the latest reading, its predicted
/// weather condition and the full set of readings
///
/// # Arguments
///
/// * 'mgr' - the managers needed by the dashboard
fn show_current(mgr: &mut Mgr) -> Result<(), DashboardError> {
    let readings = retry!(||mgr.sheet.get_records())?;
    info!("current view over {} readings", readings.len());

    match latest(&readings) {
        Ok(current) => {
            let prediction = prediction_text(mgr.model.as_ref(), current);
            print_msg(&format!("{}\nPredicted condition: {}", current, prediction),
                      "Current conditions");
            print_readings("Sensor readings", &readings);
        },
        Err(_) => print_msg("No sensor data available.", "Current conditions"),
    }

    Ok(())
}

/// Renders the by date view: the selected day's readings and the predicted
/// weather condition for the most recent of them
///
/// # Arguments
///
/// * 'mgr' - the managers needed by the dashboard
/// * 'date' - the selected date
fn show_by_date(mgr: &mut Mgr, date: NaiveDate) -> Result<(), DashboardError> {
    let readings = retry!(||mgr.sheet.get_records())?;
    let window = select_by_date(&readings, date);
    info!("date view for {} matched {} of {} readings", date, window.len(), readings.len());

    match latest_in_window(&window, date) {
        Some(current) => {
            let prediction = prediction_text(mgr.model.as_ref(), &current);
            print_msg(&format!("{}\nPredicted condition: {}", current, prediction),
                      &format!("Conditions for {}", date));
            print_readings(&format!("Sensor readings for {}", date), &window);
        },
        None => print_msg("No data available for the selected date.",
                          &format!("Conditions for {}", date)),
    }

    Ok(())
}

/// Returns the predicted weather label for a reading, or the classification
/// error text in its place. Classification failures never abort a pass.
///
/// # Arguments
///
/// * 'model' - the pre-trained model capability
/// * 'reading' - the reading to classify
fn prediction_text(model: &dyn PredictiveModel, reading: &SensorReading) -> String {
    match classify_weather(model, reading.temperature, reading.humidity,
                           reading.rain_sensor, reading.ldr_sensor) {
        Ok(label) => label.to_string(),
        Err(e) => e.to_string(),
    }
}

/// Prints a set of readings with a caption
///
/// # Arguments
///
/// * 'caption' - the caption to print
/// * 'readings' - the readings to print
fn print_readings(caption: &str, readings: &[SensorReading]) {
    let report_time = format!("{}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let caption = format!("{} {} ", report_time, caption);

    let mut msg = format!("{:=<100}\n", caption);
    for r in readings {
        msg += &format!("{}\n", r);
    }
    println!("{}", msg);
}

/// Prints a message with a caption
///
/// # Arguments
///
/// * 'message' - the message
/// * 'caption' - the caption to print
fn print_msg(message: &str, caption: &str) {
    let report_time = format!("{}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let caption = format!("{} {} ", report_time, caption);

    let msg = format!("{:=<100}\n{}\n", caption, message);
    println!("{}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use crate::manager_model::FeatureRow;
    use crate::manager_model::errors::ModelError;

    struct StubModel(i64);
    impl PredictiveModel for StubModel {
        fn classify(&self, _features: &FeatureRow) -> Result<i64, ModelError> {
            Ok(self.0)
        }
    }

    struct FailingModel;
    impl PredictiveModel for FailingModel {
        fn classify(&self, _features: &FeatureRow) -> Result<i64, ModelError> {
            Err(ModelError::Predict("bad shape".to_string()))
        }
    }

    fn reading() -> SensorReading {
        SensorReading {
            timestamp: Local.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            temperature: 26.0,
            humidity: 78.0,
            rain_sensor: 0.0,
            ldr_sensor: 310.0,
        }
    }

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(View::parse("home"), Some(View::Home));
        assert_eq!(View::parse(" current "), Some(View::Current));
        assert_eq!(View::parse("date 2024-01-02"),
                   Some(View::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())));
        assert_eq!(View::parse("date2024-01-02"), None);
        assert_eq!(View::parse("date tomorrow"), None);
        assert_eq!(View::parse("date"), None);
        assert_eq!(View::parse("charts"), None);
    }

    #[test]
    fn current_view_scenario_labels_latest_reading() {
        let readings = vec![
            SensorReading {
                timestamp: Local.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
                temperature: 25.0,
                humidity: 80.0,
                rain_sensor: 1.0,
                ldr_sensor: 300.0,
            },
            reading(),
        ];

        let current = latest(&readings).unwrap();
        assert_eq!(current.timestamp.hour(), 9);
        assert_eq!(prediction_text(&StubModel(3), current), "Clear");
    }

    #[test]
    fn date_view_scenario_uses_most_recent_of_the_window() {
        let readings = vec![reading()];
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let window = select_by_date(&readings, date);

        let current = latest_in_window(&window, date).unwrap();
        assert_eq!(prediction_text(&StubModel(7), &current), "Unrecognized");

        let empty = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert!(latest_in_window(&readings, empty).is_none());
    }

    #[test]
    fn prediction_text_renders_label() {
        assert_eq!(prediction_text(&StubModel(3), &reading()), "Clear");
        assert_eq!(prediction_text(&StubModel(7), &reading()), "Unrecognized");
    }

    #[test]
    fn prediction_text_renders_error_in_place_of_label() {
        let text = prediction_text(&FailingModel, &reading());
        assert!(text.contains("bad shape"));
    }
}
