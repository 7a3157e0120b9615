use serde::Serialize;
use worker::{Context, Env, FormEntry, Request, Response, Result, RouteContext, Router};

use crate::error::ApiError;
use crate::extract_pipeline;
use crate::models::{DEFAULT_INFERENCE_URL, DEFAULT_PDF_DECODER_URL, ProcessPdfResponse};

#[derive(Debug, Clone)]
pub struct AppState {
    pub decoder_url: String,
    pub inference_url: String,
}

pub async fn handle(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    let decoder_url = env
        .var("PDF_DECODER_URL")
        .map(|value| value.to_string())
        .unwrap_or_else(|_| DEFAULT_PDF_DECODER_URL.to_string());
    let inference_url = env
        .var("INFERENCE_URL")
        .map(|value| value.to_string())
        .unwrap_or_else(|_| DEFAULT_INFERENCE_URL.to_string());

    let state = AppState {
        decoder_url,
        inference_url,
    };

    Router::with_data(state)
        .post_async("/api/v1/process-pdf", process_pdf_route)
        .options("/api/v1/process-pdf", preflight_route)
        .run(req, env)
        .await
}

async fn process_pdf_route(mut req: Request, ctx: RouteContext<AppState>) -> Result<Response> {
    let response = match process_pdf_response(&mut req, &ctx.data).await {
        Ok(payload) => json_response(&payload),
        Err(error) => error.into_response(),
    };
    response.and_then(with_cors)
}

fn preflight_route(_req: Request, _ctx: RouteContext<AppState>) -> Result<Response> {
    with_cors(Response::empty()?.with_status(204))
}

async fn process_pdf_response(
    req: &mut Request,
    state: &AppState,
) -> Result<ProcessPdfResponse, ApiError> {
    let pdf_bytes = read_document_upload(req).await?;
    let result = extract_pipeline::process_document(state, &pdf_bytes).await?;
    Ok(ProcessPdfResponse { result })
}

async fn read_document_upload(req: &mut Request) -> Result<Vec<u8>, ApiError> {
    let content_type = req.headers().get("Content-Type")?.unwrap_or_default();

    if is_multipart(&content_type) {
        let form = req
            .form_data()
            .await
            .map_err(|error| ApiError::BadRequest(format!("invalid multipart upload: {error}")))?;
        return match form.get("file") {
            Some(FormEntry::File(file)) => Ok(file.bytes().await?),
            Some(FormEntry::Field(_)) => Err(ApiError::BadRequest(
                "form field 'file' must be a file upload".to_string(),
            )),
            None => Err(ApiError::BadRequest(
                "multipart upload is missing the 'file' field".to_string(),
            )),
        };
    }

    Ok(req.bytes().await?)
}

#[must_use]
pub fn is_multipart(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("multipart/form-data")
}

fn json_response<T>(payload: &T) -> Result<Response>
where
    T: Serialize,
{
    let mut response = Response::from_json(payload)?;
    response.headers_mut().set("Cache-Control", "no-store")?;
    Ok(response)
}

fn with_cors(mut response: Response) -> Result<Response> {
    let headers = response.headers_mut();
    headers.set("Access-Control-Allow-Origin", "*")?;
    headers.set("Access-Control-Allow-Methods", "POST, OPTIONS")?;
    headers.set("Access-Control-Allow-Headers", "Content-Type")?;
    Ok(response)
}
