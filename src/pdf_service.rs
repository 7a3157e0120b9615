use invoice_table_extract::DecodedPage;
use url::Url;
use worker::js_sys::Uint8Array;
use worker::{Fetch, Headers, Method, Request, RequestInit};

use crate::error::ApiError;
use crate::models::DecodedPagesResponse;

/// Sends the raw document to the page-decode service and returns one entry
/// per page, in document order. Rasterization and text-block extraction
/// happen entirely on the service side.
pub async fn decode_document(
    decoder_url: &str,
    pdf_bytes: &[u8],
) -> Result<Vec<DecodedPage>, ApiError> {
    let endpoint = Url::parse(decoder_url)?;

    let mut headers = Headers::new();
    headers.set("Content-Type", "application/pdf")?;

    let body = Uint8Array::from(pdf_bytes);
    let mut init = RequestInit::new();
    init.with_method(Method::Post)
        .with_headers(headers)
        .with_body(Some(body.into()));

    let request = Request::new_with_init(endpoint.as_str(), &init)?;
    let mut response = Fetch::Request(request).send().await?;
    let status = response.status_code();
    if status >= 400 {
        return Err(ApiError::Upstream(format!(
            "page decode service rejected the document: status {status}"
        )));
    }

    let payload = response.text().await?;
    let decoded = serde_json::from_str::<DecodedPagesResponse>(&payload).map_err(|error| {
        ApiError::Upstream(format!(
            "page decode service returned a malformed payload: {error}"
        ))
    })?;

    Ok(decoded.pages)
}
