use std::fmt;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One timestamped sensor sample as delivered by the monitoring sheet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: DateTime<Local>,
    pub temperature: f64,
    pub humidity: f64,
    pub rain_sensor: f64,
    pub ldr_sensor: f64,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> temp {:>6.1} °C, humidity {:>5.1} %, rain {:>6.1}, ldr {:>6.1}",
               self.timestamp.format("%Y-%m-%d %H:%M:%S"),
               self.temperature, self.humidity, self.rain_sensor, self.ldr_sensor)
    }
}
