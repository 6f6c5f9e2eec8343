//! Handlers for `/people` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/people` | Optional `?page`, `?size`, `?sort=lastName,desc` |
//! | `POST`   | `/people` | Body: Person JSON; `id` ignored; 201 + `Location` |
//! | `GET`    | `/people/:id` | 404 if not found |
//! | `PUT`    | `/people/:id` | Full replacement; 201 + `Location` of a new id if it did not exist |
//! | `PATCH`  | `/people/:id` | Merge patch; 404 if not found |
//! | `DELETE` | `/people/:id` | 204; 404 if not found |

use axum::{
  extract::State,
  http::{StatusCode, header},
  response::IntoResponse,
};
use roster_core::{
  Person,
  patch::PersonPatch,
  store::{PageRequest, PersonStore, Sort},
};
use serde::Deserialize;

use crate::{
  ApiState,
  error::ApiError,
  extract::{Json, Path, Query},
  hal::{CollectionResource, PersonResource},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub page: Option<u32>,
  pub size: Option<u32>,
  /// `<property>[,asc|desc]`.
  pub sort: Option<String>,
}

impl ListParams {
  fn page_request(&self) -> Result<PageRequest, ApiError> {
    let mut req = PageRequest::new(
      self.page.unwrap_or(0),
      self.size.unwrap_or(PageRequest::DEFAULT_SIZE),
    );
    if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
      req = req.with_sort(sort.parse::<Sort>()?);
    }
    Ok(req)
  }
}

/// `GET /people[?page=<n>][&size=<n>][&sort=<property>,<dir>]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<CollectionResource>, ApiError>
where
  S: PersonStore,
{
  let req  = params.page_request()?;
  let page = state
    .store
    .find_all(&req)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(CollectionResource::paged(page, &req, &state.hrefs)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /people` — the store assigns the identifier; any `id` in the body is
/// discarded.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(mut body): Json<Person>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore,
{
  body.set_id(Person::UNSAVED_ID);
  let person = state
    .store
    .save(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(id = person.id, "created person");
  let location = state.hrefs.person(person.id);
  Ok((
    StatusCode::CREATED,
    [(header::LOCATION, location)],
    Json(PersonResource::new(person, &state.hrefs)),
  ))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /people/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<PersonResource>, ApiError>
where
  S: PersonStore,
{
  let person = state
    .store
    .find_by_id(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or(ApiError::PersonNotFound { id })?;
  Ok(Json(PersonResource::new(person, &state.hrefs)))
}

// ─── Replace ──────────────────────────────────────────────────────────────────

/// `PUT /people/:id` — the path identifier wins over any `id` in the body.
///
/// Overwrites the stored record (200). If there is none, the store inserts
/// the body under a generated identifier and the response is 201 with a
/// `Location` naming it.
pub async fn replace<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<Person>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore,
{
  if id == Person::UNSAVED_ID {
    return Err(ApiError::ReservedId);
  }

  let saved = state
    .store
    .persist(body.to_builder().id(id).build())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let created = saved.is_created();
  let person  = saved.into_person();
  tracing::info!(requested = id, id = person.id, created, "replaced person");

  let status   = if created { StatusCode::CREATED } else { StatusCode::OK };
  let location = state.hrefs.person(person.id);
  Ok((
    status,
    [(header::LOCATION, location)],
    Json(PersonResource::new(person, &state.hrefs)),
  ))
}

// ─── Patch ────────────────────────────────────────────────────────────────────

/// `PATCH /people/:id` — absent keys are kept, `null` clears.
pub async fn patch<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<PersonPatch>,
) -> Result<Json<PersonResource>, ApiError>
where
  S: PersonStore,
{
  let current = state
    .store
    .find_by_id(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or(ApiError::PersonNotFound { id })?;

  if body.is_empty() {
    return Ok(Json(PersonResource::new(current, &state.hrefs)));
  }

  let person = state
    .store
    .save(body.apply(&current))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(PersonResource::new(person, &state.hrefs)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /people/:id`
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: PersonStore,
{
  let removed = state
    .store
    .delete_by_id(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if !removed {
    return Err(ApiError::PersonNotFound { id });
  }
  tracing::info!(id, "deleted person");
  Ok(StatusCode::NO_CONTENT)
}
