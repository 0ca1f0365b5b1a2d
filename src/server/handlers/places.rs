use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{PageRequest, Place};
use crate::error::{validation_error, Error};

/// Raw query parameters; parsed by `PageRequest::from_query` so bad values
/// get our error body instead of the extractor's.
#[derive(Serialize, Deserialize)]
pub struct ListParams {
    limit: Option<String>,
    offset: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum ListResponse {
    All(Vec<Place>),
    Page {
        data: Vec<Place>,
        pagination: Pagination,
    },
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse>, Error> {
    let Query(params) = params.map_err(|rejection| validation_error(rejection.to_string()))?;
    let page = PageRequest::from_query(params.limit.as_deref(), params.offset.as_deref())?;

    let response = match page {
        None => ListResponse::All(api.list_places().await?),
        Some(page) => {
            let result = api.list_places_page(page).await?;
            ListResponse::Page {
                data: result.data,
                pagination: Pagination {
                    total: result.total,
                    limit: page.limit,
                    offset: page.offset,
                },
            }
        }
    };

    Ok(response.into())
}
