use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json};
use axum::http::StatusCode;

use crate::api::DynAPI;
use crate::entities::{CrawlRequest, CrawlSummary};
use crate::error::{validation_error, Error};

pub async fn create(
    Extension(api): Extension<DynAPI>,
    params: Result<Json<CrawlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CrawlSummary>), Error> {
    let Json(params) = params.map_err(|rejection| validation_error(rejection.to_string()))?;

    let summary = api.crawl(params).await.map_err(|err| {
        if !err.is_validation() {
            tracing::error!(error = %err, "crawl failed");
        }
        err
    })?;

    Ok((StatusCode::CREATED, summary.into()))
}
