use std::env;
use log::info;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::{load_config, General};
use crate::errors::InitError;
use crate::manager_model::{load_model, PredictiveModel};
use crate::manager_sheet::Sheet;

/// Managers needed by the dashboard
pub struct Mgr {
    pub sheet: Sheet,
    pub model: Box<dyn PredictiveModel>,
}

/// Initializes logging and returns the managers the dashboard needs.
///
/// A model that cannot be found or loaded is fatal, the dashboard is never
/// started without a usable model.
pub fn init() -> Result<Mgr, InitError> {
    let config_file = env::var("CONFIG_FILE")
        .map_err(|_| InitError("Error getting CONFIG_FILE".to_string()))?;
    let config = load_config(&config_file)?;

    setup_logger(&config.general)?;
    info!("skywatch version: {}", env!("CARGO_PKG_VERSION"));

    let sheet = Sheet::new(&config.sheet);
    let model = load_model(&config.model.model_path)?;

    Ok(Mgr { sheet, model })
}

/// Configures log4rs with a file appender and optionally a console appender
///
/// # Arguments
///
/// * 'general' - the general section of the configuration
fn setup_logger(general: &General) -> Result<(), InitError> {
    let pattern = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build(&general.log_path)?;

    let mut builder = log4rs::Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(pattern)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    let log_config = builder.build(root.build(general.log_level))?;
    log4rs::init_config(log_config)?;

    Ok(())
}
