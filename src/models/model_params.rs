use serde::Deserialize;

/// Persisted Gaussian naive Bayes parameters as exported by the training
/// pipeline. One entry per class in each of the per-class vectors, and the
/// four feature columns in the order temperature, humidity, rain, ldr.
#[derive(Deserialize)]
pub struct NaiveBayesParams {
    pub feature_names: Vec<String>,
    pub classes: Vec<i64>,
    pub class_priors: Vec<f64>,
    pub means: Vec<[f64; 4]>,
    pub variances: Vec<[f64; 4]>,
}
