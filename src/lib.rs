pub mod error;
pub mod extract_pipeline;
pub mod inference;
pub mod models;
pub mod pdf_service;
pub mod routes;

use worker::{Context, Env, Request, Response, Result, event};

#[event(fetch)]
async fn fetch(req: Request, env: Env, ctx: Context) -> Result<Response> {
    routes::handle(req, env, ctx).await
}
