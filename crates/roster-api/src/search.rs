//! Handlers for `/people/search` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/people/search` | Lists the search methods |
//! | `GET`  | `/people/search/findByLastName` | `?name=` required; exact match |

use axum::extract::State;
use roster_core::store::PersonStore;
use serde::Deserialize;

use crate::{
  ApiState,
  error::ApiError,
  extract::{Json, Query},
  hal::{CollectionResource, SearchIndex},
};

/// `GET /people/search`
pub async fn index<S>(State(state): State<ApiState<S>>) -> Json<SearchIndex>
where
  S: PersonStore,
{
  Json(SearchIndex::new(&state.hrefs))
}

#[derive(Debug, Deserialize)]
pub struct LastNameParams {
  pub name: Option<String>,
}

/// `GET /people/search/findByLastName?name=<last name>`
pub async fn find_by_last_name<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<LastNameParams>,
) -> Result<Json<CollectionResource>, ApiError>
where
  S: PersonStore,
{
  let name = params
    .name
    .ok_or(ApiError::MissingParameter("name"))?;

  let people = state
    .store
    .find_by_last_name(&name)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let encoded: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
  let self_href = format!("{}?name={encoded}", state.hrefs.find_by_last_name());
  Ok(Json(CollectionResource::search(people, self_href, &state.hrefs)))
}
