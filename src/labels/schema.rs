use serde::{Deserialize, Serialize};

/// One exported labeling result.
///
/// Field names follow the labels-file schema: the identifier is stored under
/// `wav` and the emotion code under `emo`. Unlabeled and unmeasured fields
/// serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    #[serde(rename = "wav")]
    pub clip: String,
    pub length: Option<f64>,
    #[serde(rename = "emo")]
    pub emotion: Option<String>,
}
