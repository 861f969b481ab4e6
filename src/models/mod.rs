pub mod reading;
pub mod sheet_values;
pub mod model_params;
