pub mod errors;

use std::f64::consts::PI;
use std::fs;
use std::path::Path;
use crate::manager_model::errors::ModelError;
use crate::models::model_params::NaiveBayesParams;

/// Feature columns in the order the model was trained with
const FEATURE_ORDER: [&str; 4] = ["Temperature", "Humidity", "Rain_Sensor", "LDR_Sensor"];

/// One row of input features for the classifier.
/// The field order is part of the model contract and must match the
/// column order the model was trained with.
#[derive(Clone, PartialEq)]
pub struct FeatureRow {
    pub temperature: f64,
    pub humidity: f64,
    pub rain_sensor: f64,
    pub ldr_sensor: f64,
}

impl FeatureRow {
    /// Returns the features as a fixed-order array, matching the training
    /// column order temperature, humidity, rain, ldr
    pub fn as_array(&self) -> [f64; 4] {
        [self.temperature, self.humidity, self.rain_sensor, self.ldr_sensor]
    }
}

/// Capability exposed by any pre-trained classification model.
/// The dashboard only ever calls classify and never inspects internals.
pub trait PredictiveModel {
    /// Classifies one feature row and returns the integer class code
    ///
    /// # Arguments
    ///
    /// * 'features' - the feature row to classify
    fn classify(&self, features: &FeatureRow) -> Result<i64, ModelError>;
}

/// Gaussian naive Bayes over the four sensor features, rebuilt from
/// parameters exported by the training pipeline
pub struct GaussianNb {
    classes: Vec<i64>,
    log_priors: Vec<f64>,
    means: Vec<[f64; 4]>,
    variances: Vec<[f64; 4]>,
}

impl GaussianNb {
    /// Builds a model from persisted parameters, validating that the
    /// per-class vectors line up and that all variances are usable
    ///
    /// # Arguments
    ///
    /// * 'params' - the deserialized parameter file contents
    pub fn from_params(params: NaiveBayesParams) -> Result<GaussianNb, ModelError> {
        let n = params.classes.len();
        if n == 0 {
            return Err(ModelError::Load("model has no classes".to_string()));
        }
        if params.class_priors.len() != n || params.means.len() != n || params.variances.len() != n {
            return Err(ModelError::Load("class parameter lengths mismatch".to_string()));
        }
        if !params.feature_names.iter().map(String::as_str).eq(FEATURE_ORDER) {
            return Err(ModelError::Load("unexpected feature column order".to_string()));
        }
        if params.class_priors.iter().any(|&p| p <= 0.0) {
            return Err(ModelError::Load("class priors must be positive".to_string()));
        }
        if params.variances.iter().flatten().any(|&v| v <= 0.0) {
            return Err(ModelError::Load("feature variance must be positive".to_string()));
        }

        Ok(GaussianNb {
            classes: params.classes,
            log_priors: params.class_priors.iter().map(|p| p.ln()).collect(),
            means: params.means,
            variances: params.variances,
        })
    }
}

impl PredictiveModel for GaussianNb {
    /// Returns the class code with the highest joint log likelihood
    ///
    /// # Arguments
    ///
    /// * 'features' - the feature row to classify
    fn classify(&self, features: &FeatureRow) -> Result<i64, ModelError> {
        let x = features.as_array();
        if x.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::Predict("non-finite feature value".to_string()));
        }

        let mut best: Option<(i64, f64)> = None;
        for (c, class) in self.classes.iter().enumerate() {
            let mut log_likelihood = self.log_priors[c];
            for i in 0..4 {
                let var = self.variances[c][i];
                let diff = x[i] - self.means[c][i];
                log_likelihood += -0.5 * (2.0 * PI * var).ln() - diff * diff / (2.0 * var);
            }

            if best.is_none_or(|(_, score)| log_likelihood > score) {
                best = Some((*class, log_likelihood));
            }
        }

        best.map(|(class, _)| class)
            .ok_or(ModelError::Predict("model has no classes".to_string()))
    }
}

/// Loads a pre-trained model from the given parameter file and returns it
/// behind the PredictiveModel capability.
///
/// A missing file is reported as NotFound and a malformed or inconsistent
/// parameter file as Load, both of which are fatal at startup.
///
/// # Arguments
///
/// * 'model_path' - path to the model parameter file
pub fn load_model(model_path: &str) -> Result<Box<dyn PredictiveModel>, ModelError> {
    let path = Path::new(model_path);
    if !path.exists() {
        return Err(ModelError::NotFound(model_path.to_string()));
    }

    let json = fs::read_to_string(path)?;
    let params: NaiveBayesParams = serde_json::from_str(&json)?;
    let model = GaussianNb::from_params(params)?;

    Ok(Box::new(model))
}
