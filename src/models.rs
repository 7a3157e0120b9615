use invoice_table_extract::{DecodedPage, PageResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PDF_DECODER_URL: &str = "http://127.0.0.1:8091/api/v1/decode-pages";
pub const DEFAULT_INFERENCE_URL: &str = "http://127.0.0.1:8092/api/v1/classify-tokens";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecodedPagesResponse {
    pub pages: Vec<DecodedPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifyResponse {
    pub predictions: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessPdfResponse {
    pub result: Vec<PageResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}
