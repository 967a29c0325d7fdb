use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub html: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ExtractedItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub display_name: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub items: Vec<ExtractedItem>,
}
