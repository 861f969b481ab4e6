use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("model file not found: {0}")]
    NotFound(String),
    #[error("error loading model: {0}")]
    Load(String),
    #[error("error in prediction: {0}")]
    Predict(String),
}
impl From<std::io::Error> for ModelError {
    fn from(e: std::io::Error) -> ModelError {
        ModelError::Load(format!("model file error: {}", e))
    }
}
impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> ModelError {
        ModelError::Load(format!("json document error: {}", e))
    }
}
