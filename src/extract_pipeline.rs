use invoice_table_extract::{PageResult, process_page, summarize};

use crate::error::ApiError;
use crate::inference;
use crate::pdf_service;
use crate::routes::AppState;

/// Per-request pipeline: decode every page, classify each page's tokens,
/// then reconstruct table records from the positioned text blocks. Pages
/// share no state; any collaborator failure fails the whole request.
pub async fn process_document(
    state: &AppState,
    pdf_bytes: &[u8],
) -> Result<Vec<PageResult>, ApiError> {
    if pdf_bytes.is_empty() {
        return Err(ApiError::BadRequest(
            "uploaded document is empty".to_string(),
        ));
    }

    let pages = pdf_service::decode_document(&state.decoder_url, pdf_bytes).await?;

    let mut results = Vec::with_capacity(pages.len());
    for (page_number, page) in (1u32..).zip(pages.iter()) {
        let predictions = inference::classify_page(&state.inference_url, page).await?;
        results.push(process_page(page_number, page, &predictions)?);
    }

    let report = summarize(&results);
    worker::console_log!(
        "table extraction completed: pages={}, records={}",
        report.page_count,
        report.record_count
    );

    Ok(results)
}
