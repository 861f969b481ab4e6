use std::fmt;
use thiserror::Error;
use crate::manager_model::errors::ModelError;
use crate::manager_model::{FeatureRow, PredictiveModel};

#[derive(Error, Debug)]
#[error("{0}")]
pub struct ClassificationError(pub String);
impl From<ModelError> for ClassificationError {
    fn from(e: ModelError) -> ClassificationError {
        ClassificationError(e.to_string())
    }
}

/// Weather conditions the model was trained to distinguish, plus a catch-all
/// for class codes outside the trained set
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WeatherLabel {
    Dark,
    Rain,
    Overcast,
    Clear,
    Unrecognized,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for WeatherLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WeatherLabel::Dark         => write!(f, "Dark"),
            WeatherLabel::Rain         => write!(f, "Rain"),
            WeatherLabel::Overcast     => write!(f, "Overcast"),
            WeatherLabel::Clear        => write!(f, "Clear"),
            WeatherLabel::Unrecognized => write!(f, "Unrecognized"),
        }
    }
}

/// Translates a model class code to its weather label.
/// Codes outside the trained 0-3 set map to Unrecognized, so the mapping is
/// total over all integers.
///
/// # Arguments
///
/// * 'code' - the class code returned by the model
pub fn map_code(code: i64) -> WeatherLabel {
    match code {
        0 => WeatherLabel::Dark,
        1 => WeatherLabel::Rain,
        2 => WeatherLabel::Overcast,
        3 => WeatherLabel::Clear,
        _ => WeatherLabel::Unrecognized,
    }
}

/// Classifies one set of sensor values into a weather label.
///
/// The four scalars are assembled into the single-row feature record the
/// model expects (order: temperature, humidity, rain, ldr). A failing model
/// invocation is returned as a ClassificationError carrying the underlying
/// message and is rendered by the caller in place of a label, it never
/// aborts the dashboard pass.
///
/// # Arguments
///
/// * 'model' - the pre-trained model capability
/// * 'temperature' - temperature in °C
/// * 'humidity' - relative humidity in %
/// * 'rain_sensor' - raw rain sensor value
/// * 'ldr_sensor' - raw light sensor value
pub fn classify_weather(
    model: &dyn PredictiveModel,
    temperature: f64,
    humidity: f64,
    rain_sensor: f64,
    ldr_sensor: f64) -> Result<WeatherLabel, ClassificationError> {

    let features = FeatureRow { temperature, humidity, rain_sensor, ldr_sensor };
    let code = model.classify(&features)?;

    Ok(map_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;

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

    struct EchoModel;
    impl PredictiveModel for EchoModel {
        fn classify(&self, features: &FeatureRow) -> Result<i64, ModelError> {
            Ok(features.as_array()[0] as i64)
        }
    }

    #[test]
    fn maps_trained_codes_to_labels() {
        assert_eq!(map_code(0), WeatherLabel::Dark);
        assert_eq!(map_code(1), WeatherLabel::Rain);
        assert_eq!(map_code(2), WeatherLabel::Overcast);
        assert_eq!(map_code(3), WeatherLabel::Clear);
    }

    #[test]
    fn maps_unknown_codes_to_unrecognized() {
        for code in [-1, 4, 7, 100, i64::MIN, i64::MAX] {
            assert_eq!(map_code(code), WeatherLabel::Unrecognized);
        }
    }

    #[test]
    fn classifies_clear_from_model_code() {
        let label = classify_weather(&StubModel(3), 26.0, 78.0, 0.0, 310.0).unwrap();
        assert_eq!(label, WeatherLabel::Clear);
    }

    #[test]
    fn unknown_model_code_is_unrecognized_not_an_error() {
        let label = classify_weather(&StubModel(7), 25.0, 80.0, 1.0, 300.0).unwrap();
        assert_eq!(label, WeatherLabel::Unrecognized);
    }

    #[test]
    fn model_failure_becomes_error_value() {
        let result = classify_weather(&FailingModel, 25.0, 80.0, 1.0, 300.0);
        let err = result.unwrap_err();

        assert!(err.to_string().contains("bad shape"));
    }

    #[test]
    fn feature_order_is_temperature_first() {
        let label = classify_weather(&EchoModel, 2.0, 78.0, 1.0, 310.0).unwrap();
        assert_eq!(label, WeatherLabel::Overcast);
    }
}
