use std::fmt;
use std::time::Duration;
use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone};
use serde_json::Value;
use ureq::{Agent, Error};
use crate::config::SheetSource;
use crate::models::reading::SensorReading;
use crate::models::sheet_values::ValueRange;

/// Column headers as they appear in the first worksheet row
const COL_TIMESTAMP: &str = "Timestamp";
const COL_TEMPERATURE: &str = "Temperature (°C)";
const COL_HUMIDITY: &str = "Humidity (%)";
const COL_RAIN: &str = "Rain Sensor";
const COL_LDR: &str = "LDR Sensor";

/// Accepted timestamp formats in the worksheet
const TS_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"];

#[derive(Debug)]
pub enum SheetError {
    Sheet(String),
    Document(String),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SheetError::Sheet(e) => write!(f, "SheetError::Sheet: {}", e),
            SheetError::Document(e) => write!(f, "SheetError::Document: {}", e),
        }
    }
}
impl From<Error> for SheetError {
    fn from(e: Error) -> Self {
        SheetError::Sheet(e.to_string())
    }
}
impl From<serde_json::Error> for SheetError {
    fn from(e: serde_json::Error) -> Self {
        SheetError::Document(e.to_string())
    }
}

/// Struct for managing the spreadsheet that the sensor rig appends its
/// readings to
pub struct Sheet {
    agent: Agent,
    endpoint: String,
    spreadsheet_id: String,
    worksheet: String,
    api_key: String,
    cache_ttl: TimeDelta,
    fetched_at: Option<DateTime<Local>>,
    snapshot: Vec<SensorReading>,
}

impl Sheet {
    /// Returns a Sheet struct ready for fetching sensor readings from the
    /// monitoring worksheet
    ///
    /// # Arguments
    ///
    /// * 'config' - the sheet section of the configuration
    pub fn new(config: &SheetSource) -> Sheet {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        let agent = agent_config.into();

        Sheet {
            agent,
            endpoint: config.endpoint.to_string(),
            spreadsheet_id: config.spreadsheet_id.to_string(),
            worksheet: config.worksheet.to_string(),
            api_key: config.api_key.to_string(),
            cache_ttl: TimeDelta::seconds(config.cache_ttl_secs),
            fetched_at: None,
            snapshot: Vec::new(),
        }
    }

    /// Sets an existing snapshot of readings without fetching
    ///
    /// # Arguments
    ///
    /// * 'readings' - the readings to set
    /// * 'fetched_at' - the time the readings were fetched
    pub fn set_snapshot(&mut self, readings: Vec<SensorReading>, fetched_at: DateTime<Local>) {
        self.snapshot = readings;
        self.fetched_at = Some(fetched_at);
    }

    /// Returns all sensor readings in arrival order.
    ///
    /// The last fetched snapshot is served until it is older than the
    /// configured cache ttl, after which a new fetch is made transparently.
    /// The returned snapshot is always internally consistent, possibly stale.
    pub fn get_records(&mut self) -> Result<Vec<SensorReading>, SheetError> {
        let now = Local::now();
        if self.is_stale(now) {
            self.snapshot = self.fetch()?;
            self.fetched_at = Some(now);
        }

        Ok(self.snapshot.clone())
    }

    /// Returns true if the current snapshot has outlived the cache ttl
    ///
    /// # Arguments
    ///
    /// * 'now' - the current time
    fn is_stale(&self, now: DateTime<Local>) -> bool {
        self.fetched_at.is_none_or(|t| now - t > self.cache_ttl)
    }

    /// Retrieves the full worksheet and parses it into sensor readings.
    /// The first row holds the column headers, remaining rows are readings
    /// in the order the sensor rig appended them.
    fn fetch(&self) -> Result<Vec<SensorReading>, SheetError> {
        // Worksheet names may carry spaces which the values API expects encoded
        let worksheet = self.worksheet.replace(' ', "%20");
        let url = format!("{}/v4/spreadsheets/{}/values/{}?key={}",
                          self.endpoint, self.spreadsheet_id, worksheet, self.api_key);

        let json = self.agent
            .get(url)
            .call()?
            .body_mut()
            .read_to_string()?;

        let range: ValueRange = serde_json::from_str(&json)?;

        parse_rows(&range.values)
    }
}

/// Parses raw worksheet rows into sensor readings.
///
/// Every sensor cell must be coercible to a number, otherwise the whole
/// fetch fails with a descriptive error. Sensor-range plausibility is not
/// validated, values are passed through to the model unchanged.
///
/// # Arguments
///
/// * 'values' - header row followed by data rows
pub fn parse_rows(values: &[Vec<Value>]) -> Result<Vec<SensorReading>, SheetError> {
    let Some(headers) = values.first() else {
        return Ok(Vec::new());
    };

    let ts = column_index(headers, COL_TIMESTAMP)?;
    let temp = column_index(headers, COL_TEMPERATURE)?;
    let hum = column_index(headers, COL_HUMIDITY)?;
    let rain = column_index(headers, COL_RAIN)?;
    let ldr = column_index(headers, COL_LDR)?;

    let mut readings: Vec<SensorReading> = Vec::with_capacity(values.len() - 1);
    for row in &values[1..] {
        readings.push(SensorReading {
            timestamp: parse_timestamp(text_cell(row, ts, COL_TIMESTAMP)?)?,
            temperature: numeric_cell(row, temp, COL_TEMPERATURE)?,
            humidity: numeric_cell(row, hum, COL_HUMIDITY)?,
            rain_sensor: numeric_cell(row, rain, COL_RAIN)?,
            ldr_sensor: numeric_cell(row, ldr, COL_LDR)?,
        });
    }

    Ok(readings)
}

/// Returns the index of a named column in the header row
///
/// # Arguments
///
/// * 'headers' - the header row
/// * 'column' - the column name to find
fn column_index(headers: &[Value], column: &str) -> Result<usize, SheetError> {
    headers.iter()
        .position(|h| h.as_str() == Some(column))
        .ok_or(SheetError::Document(format!("missing column: {}", column)))
}

/// Returns a cell as text
///
/// # Arguments
///
/// * 'row' - the data row
/// * 'index' - the cell index
/// * 'column' - the column name, for error reporting
fn text_cell<'a>(row: &'a [Value], index: usize, column: &str) -> Result<&'a str, SheetError> {
    row.get(index)
        .and_then(|v| v.as_str())
        .ok_or(SheetError::Document(format!("missing value in column: {}", column)))
}

/// Coerces a cell to a number. The values API delivers cells either as json
/// numbers or as their string representation depending on the worksheet
/// formatting.
///
/// # Arguments
///
/// * 'row' - the data row
/// * 'index' - the cell index
/// * 'column' - the column name, for error reporting
fn numeric_cell(row: &[Value], index: usize, column: &str) -> Result<f64, SheetError> {
    let cell = row.get(index)
        .ok_or(SheetError::Document(format!("missing value in column: {}", column)))?;

    match cell {
        Value::Number(n) => n.as_f64()
            .ok_or(SheetError::Document(format!("non numeric value in column: {}", column))),
        Value::String(s) => s.trim().parse::<f64>()
            .map_err(|_| SheetError::Document(format!("non numeric value '{}' in column: {}", s, column))),
        _ => Err(SheetError::Document(format!("non numeric value in column: {}", column))),
    }
}

/// Parses a worksheet timestamp into local time
///
/// # Arguments
///
/// * 'text' - the timestamp cell contents
fn parse_timestamp(text: &str) -> Result<DateTime<Local>, SheetError> {
    for format in TS_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text.trim(), format) {
            return Local.from_local_datetime(&naive)
                .single()
                .ok_or(SheetError::Document(format!("ambiguous timestamp: {}", text)));
        }
    }

    Err(SheetError::Document(format!("unparseable timestamp: {}", text)))
}
