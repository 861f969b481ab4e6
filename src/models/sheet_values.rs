use serde::Deserialize;
use serde_json::Value;

/// Raw worksheet contents as returned by the spreadsheet values API.
/// The first row holds the column headers, the rest are data rows.
/// The document's range and majorDimension envelope fields are ignored.
#[derive(Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}
