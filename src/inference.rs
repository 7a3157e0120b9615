use invoice_table_extract::DecodedPage;
use url::Url;
use worker::wasm_bindgen::JsValue;
use worker::{Fetch, Headers, Method, Request, RequestInit};

use crate::error::ApiError;
use crate::models::ClassifyResponse;

/// Sends one decoded page (image, texts, boxes) to the token-classification
/// service and returns its prediction vector. The service owns batching,
/// padding, and truncation, so the vector length is not tied to the number
/// of text blocks.
pub async fn classify_page(
    inference_url: &str,
    page: &DecodedPage,
) -> Result<Vec<i64>, ApiError> {
    let endpoint = Url::parse(inference_url)?;

    let mut headers = Headers::new();
    headers.set("Content-Type", "application/json")?;

    let payload = serde_json::to_string(page)?;
    let mut init = RequestInit::new();
    init.with_method(Method::Post)
        .with_headers(headers)
        .with_body(Some(JsValue::from_str(&payload)));

    let request = Request::new_with_init(endpoint.as_str(), &init)?;
    let mut response = Fetch::Request(request).send().await?;
    let status = response.status_code();
    if status >= 400 {
        return Err(ApiError::Upstream(format!(
            "token classification service failed: status {status}"
        )));
    }

    let body = response.text().await?;
    let classified = serde_json::from_str::<ClassifyResponse>(&body).map_err(|error| {
        ApiError::Upstream(format!(
            "token classification service returned a malformed payload: {error}"
        ))
    })?;

    Ok(classified.predictions)
}
