//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::store::PersonStore`].
//! Responses use HAL (`_links`, `_embedded`). Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = roster_api::api_router(Arc::new(store), "http://localhost:8080");
//! ```
//!
//! `base_url` is the public URL the router is reachable under; it prefixes
//! every href in a response.

pub mod error;
pub mod extract;
pub mod hal;
pub mod people;
pub mod search;

use std::sync::Arc;

use axum::{Router, routing::get};
use roster_core::store::PersonStore;

pub use error::ApiError;
use hal::Hrefs;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store: Arc<S>,
  pub hrefs: Arc<Hrefs>,
}

// Manual impl: cloning shares the `Arc`s and must not require `S: Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), hrefs: Arc::clone(&self.hrefs) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, base_url: &str) -> Router<()>
where
  S: PersonStore + 'static,
{
  let state = ApiState { store, hrefs: Arc::new(Hrefs::new(base_url)) };

  Router::new()
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route(
      "/people/{id}",
      get(people::get_one::<S>)
        .put(people::replace::<S>)
        .patch(people::patch::<S>)
        .delete(people::delete_one::<S>),
    )
    .route("/people/search", get(search::index::<S>))
    .route(
      "/people/search/findByLastName",
      get(search::find_by_last_name::<S>),
    )
    .with_state(state)
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use roster_core::Person;
  use roster_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  const BASE: &str = "http://localhost:8080";

  async fn make_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().await.unwrap())
  }

  async fn oneshot_raw(
    store:  Arc<SqliteStore>,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> axum::response::Response {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    api_router(store, BASE).oneshot(req).await.unwrap()
  }

  async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  // ── Create / read ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn post_assigns_id_and_get_returns_it() {
    let store = make_store().await;

    let resp = oneshot_raw(
      store.clone(),
      "POST",
      "/people",
      Some(json!({ "firstName": "Alice", "lastName": "Smith" })),
    ).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, "http://localhost:8080/people/1");
    let created = json_body(resp).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["_links"]["self"]["href"], "http://localhost:8080/people/1");

    let resp = oneshot_raw(store, "GET", "/people/1", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["firstName"], "Alice");
    assert_eq!(body["lastName"], "Smith");
  }

  #[tokio::test]
  async fn post_ignores_caller_supplied_id() {
    let store = make_store().await;
    let resp = oneshot_raw(
      store.clone(),
      "POST",
      "/people",
      Some(json!({ "id": 77, "firstName": "Mallory" })),
    ).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(json_body(resp).await["id"], 1);
    assert!(store.find_by_id(77).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn post_blank_body_creates_blank_person() {
    let store = make_store().await;
    let resp  = oneshot_raw(store, "POST", "/people", Some(json!({}))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert_eq!(body["firstName"], Value::Null);
    assert_eq!(body["lastName"], Value::Null);
  }

  #[tokio::test]
  async fn get_nonexistent_returns_404() {
    let store = make_store().await;
    let resp  = oneshot_raw(store, "GET", "/people/999", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["error"], "person 999 not found");
  }

  #[tokio::test]
  async fn get_non_numeric_id_is_rejected() {
    let store = make_store().await;
    let resp  = oneshot_raw(store, "GET", "/people/abc", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn malformed_json_body_is_rejected_as_json() {
    let store = make_store().await;
    let req = Request::builder()
      .method("POST")
      .uri("/people")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{\"firstName\":"))
      .unwrap();
    let resp = api_router(store.clone(), BASE).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());
    assert_eq!(store.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn missing_content_type_is_rejected_as_json() {
    let store = make_store().await;
    let req = Request::builder()
      .method("POST")
      .uri("/people")
      .body(Body::from("{}"))
      .unwrap();
    let resp = api_router(store, BASE).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(json_body(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn bad_page_number_is_rejected_as_json() {
    let store = make_store().await;
    let resp  = oneshot_raw(store, "GET", "/people?page=-1", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());
  }

  // ── Update ───────────────────────────────────────────────────────────────────

  /// Saves Alice then Bob, so Bob is stored under id 2.
  async fn seed_bob(store: &SqliteStore, last: &str) -> Person {
    store
      .save(Person::builder().first_name("Alice").last_name("Smith").build())
      .await
      .unwrap();
    store
      .save(Person::builder().first_name("Bob").last_name(last).build())
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn put_existing_replaces_and_keeps_id() {
    let store = make_store().await;
    assert_eq!(seed_bob(&store, "Jones").await.id, 2);

    let resp = oneshot_raw(
      store.clone(),
      "PUT",
      "/people/2",
      Some(json!({ "id": 5, "firstName": "Bob", "lastName": "Lee" })),
    ).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, "http://localhost:8080/people/2");

    let stored = store.find_by_id(2).await.unwrap();
    assert_eq!(stored, Some(Person::new(2, Some("Bob".into()), Some("Lee".into()))));
    assert!(store.find_by_id(5).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn put_missing_creates_under_generated_id() {
    let store = make_store().await;
    let resp  = oneshot_raw(
      store.clone(),
      "PUT",
      "/people/9",
      Some(json!({ "firstName": "Nine" })),
    ).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, "http://localhost:8080/people/1");
    assert_eq!(json_body(resp).await["id"], 1);

    assert!(store.find_by_id(9).await.unwrap().is_none());
    assert_eq!(
      store.find_by_id(1).await.unwrap(),
      Some(Person::new(1, Some("Nine".into()), None))
    );
  }

  #[tokio::test]
  async fn put_max_id_leaves_creation_working() {
    let store = make_store().await;
    let resp  = oneshot_raw(
      store.clone(),
      "PUT",
      "/people/9223372036854775807",
      Some(json!({ "firstName": "Max" })),
    ).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, "http://localhost:8080/people/1");

    let resp = oneshot_raw(
      store.clone(),
      "POST",
      "/people",
      Some(json!({ "firstName": "Alice" })),
    ).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(json_body(resp).await["id"], 2);
  }

  #[tokio::test]
  async fn put_negative_id_is_not_stored_under_it() {
    let store = make_store().await;
    let resp  = oneshot_raw(store.clone(), "PUT", "/people/-5", Some(json!({}))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(store.find_by_id(-5).await.unwrap().is_none());
    assert_eq!(store.count().await.unwrap(), 1);
  }

  #[tokio::test]
  async fn put_after_concurrent_delete_reports_creation() {
    let store = make_store().await;
    let bob   = seed_bob(&store, "Jones").await;

    // Deleted between the client reading the record and sending its PUT.
    let resp = oneshot_raw(store.clone(), "DELETE", "/people/2", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = oneshot_raw(
      store.clone(),
      "PUT",
      "/people/2",
      Some(json!({ "firstName": bob.first_name, "lastName": "Lee" })),
    ).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, "http://localhost:8080/people/3");
    assert!(store.find_by_id(2).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn put_unsaved_id_is_rejected() {
    let store = make_store().await;
    let resp  = oneshot_raw(store.clone(), "PUT", "/people/0", Some(json!({}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "id 0 is reserved for unsaved records");
    assert_eq!(store.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn patch_changes_only_given_fields() {
    let store = make_store().await;
    seed_bob(&store, "Jones").await;

    let resp = oneshot_raw(
      store.clone(),
      "PATCH",
      "/people/2",
      Some(json!({ "lastName": "Lee" })),
    ).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["id"], 2);
    assert_eq!(body["firstName"], "Bob");
    assert_eq!(body["lastName"], "Lee");

    let resp = oneshot_raw(
      store.clone(),
      "PATCH",
      "/people/2",
      Some(json!({ "firstName": null })),
    ).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      store.find_by_id(2).await.unwrap(),
      Some(Person::new(2, None, Some("Lee".into())))
    );
  }

  #[tokio::test]
  async fn patch_missing_returns_404() {
    let store = make_store().await;
    let resp  = oneshot_raw(
      store,
      "PATCH",
      "/people/3",
      Some(json!({ "firstName": "X" })),
    ).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Delete ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_existing_returns_204_and_get_returns_404() {
    let store = make_store().await;
    seed_bob(&store, "Lee").await;

    let resp = oneshot_raw(store.clone(), "DELETE", "/people/2", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = oneshot_raw(store, "GET", "/people/2", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_nonexistent_returns_404() {
    let store = make_store().await;
    let resp  = oneshot_raw(store, "DELETE", "/people/2", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── List / search ────────────────────────────────────────────────────────────

  async fn seed(store: &SqliteStore) {
    for (first, last) in [("Alice", "Smith"), ("Bob", "Jones"), ("Carol", "Smith")] {
      store
        .save(Person::builder().first_name(first).last_name(last).build())
        .await
        .unwrap();
    }
  }

  #[tokio::test]
  async fn list_embeds_people_with_page_metadata() {
    let store = make_store().await;
    seed(&store).await;

    let resp = oneshot_raw(store, "GET", "/people?size=2", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;

    let people = body["_embedded"]["people"].as_array().unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[0]["firstName"], "Alice");
    assert_eq!(
      body["page"],
      json!({ "size": 2, "totalElements": 3, "totalPages": 2, "number": 0 })
    );
    assert_eq!(
      body["_links"]["next"]["href"],
      "http://localhost:8080/people?page=1&size=2"
    );
  }

  #[tokio::test]
  async fn list_sorted_descending() {
    let store = make_store().await;
    seed(&store).await;

    let resp = oneshot_raw(store, "GET", "/people?sort=firstName,desc", None).await;
    let body = json_body(resp).await;
    let names: Vec<&str> = body["_embedded"]["people"]
      .as_array()
      .unwrap()
      .iter()
      .map(|p| p["firstName"].as_str().unwrap())
      .collect();
    assert_eq!(names, vec!["Carol", "Bob", "Alice"]);
  }

  #[tokio::test]
  async fn list_with_bad_sort_returns_400() {
    let store = make_store().await;
    let resp  = oneshot_raw(store, "GET", "/people?sort=email", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn list_empty_store() {
    let store = make_store().await;
    let body  = json_body(oneshot_raw(store, "GET", "/people", None).await).await;
    assert_eq!(body["_embedded"]["people"], json!([]));
    assert_eq!(body["page"]["totalElements"], 0);
  }

  #[tokio::test]
  async fn find_by_last_name_returns_matches() {
    let store = make_store().await;
    seed(&store).await;

    let resp = oneshot_raw(
      store,
      "GET",
      "/people/search/findByLastName?name=Smith",
      None,
    ).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    let people = body["_embedded"]["people"].as_array().unwrap();
    assert_eq!(people.len(), 2);
    assert!(people.iter().all(|p| p["lastName"] == "Smith"));
    assert!(body.get("page").is_none());
  }

  #[tokio::test]
  async fn find_by_last_name_requires_name() {
    let store = make_store().await;
    let resp  = oneshot_raw(store, "GET", "/people/search/findByLastName", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "missing query parameter: name");
  }

  #[tokio::test]
  async fn search_index_lists_methods() {
    let store = make_store().await;
    let body  = json_body(oneshot_raw(store, "GET", "/people/search", None).await).await;
    assert_eq!(body["_links"]["findByLastName"]["templated"], true);
  }
}
