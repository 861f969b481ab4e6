use std::fmt;
use std::fmt::Formatter;
use chrono::Local;
use crate::manager_model::errors::ModelError;
use crate::manager_sheet::SheetError;

pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError(e.to_string())
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError(e.to_string())
    }
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self {
        ConfigError(e.to_string())
    }
}

pub struct InitError(pub String);

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SkywatchInitError: {}", self.0)
    }
}
impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        InitError(e.to_string())
    }
}
impl From<ModelError> for InitError {
    fn from(e: ModelError) -> Self {
        InitError(e.to_string())
    }
}
impl From<std::io::Error> for InitError {
    fn from(e: std::io::Error) -> Self {
        InitError(e.to_string())
    }
}
impl From<log::SetLoggerError> for InitError {
    fn from(e: log::SetLoggerError) -> Self {
        InitError(e.to_string())
    }
}
impl From<log4rs::config::runtime::ConfigErrors> for InitError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> Self {
        InitError(e.to_string())
    }
}

pub struct DashboardError {
    msg: String,
}
impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let report_time = format!("{}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        let caption = format!("{} SkywatchDashboardError ", report_time);
        write!(f, "{:=<137}\n", caption)?;
        write!(f, "{}\n", self.msg)?;

        Ok(())
    }
}
impl From<SheetError> for DashboardError {
    fn from(e: SheetError) -> Self {
        DashboardError { msg: e.to_string() }
    }
}
impl From<std::io::Error> for DashboardError {
    fn from(e: std::io::Error) -> Self {
        DashboardError { msg: e.to_string() }
    }
}
