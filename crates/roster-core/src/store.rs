//! The `PersonStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! Higher layers (`roster-api`) depend on this abstraction, not on any
//! concrete backend.

use std::{fmt, future::Future, str::FromStr};

use serde::Serialize;

use crate::{Error, person::Person};

// ─── Sorting ─────────────────────────────────────────────────────────────────

/// A sortable attribute of [`Person`], named as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
  Id,
  FirstName,
  LastName,
}

impl SortProperty {
  pub fn as_str(self) -> &'static str {
    match self {
      SortProperty::Id => "id",
      SortProperty::FirstName => "firstName",
      SortProperty::LastName => "lastName",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
  #[default]
  Asc,
  Desc,
}

impl SortDirection {
  pub fn as_str(self) -> &'static str {
    match self {
      SortDirection::Asc => "asc",
      SortDirection::Desc => "desc",
    }
  }
}

/// Ordering for [`PersonStore::find_all`], parsed from `"lastName,desc"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
  pub property:  SortProperty,
  pub direction: SortDirection,
}

impl Sort {
  pub fn asc(property: SortProperty) -> Self {
    Self { property, direction: SortDirection::Asc }
  }

  pub fn desc(property: SortProperty) -> Self {
    Self { property, direction: SortDirection::Desc }
  }
}

impl FromStr for Sort {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (prop, dir) = match s.split_once(',') {
      Some((p, d)) => (p.trim(), Some(d.trim())),
      None => (s.trim(), None),
    };

    let property = match prop {
      "id" => SortProperty::Id,
      "firstName" => SortProperty::FirstName,
      "lastName" => SortProperty::LastName,
      other => return Err(Error::UnknownSortProperty(other.to_owned())),
    };

    let direction = match dir.map(str::to_ascii_lowercase).as_deref() {
      None | Some("") | Some("asc") => SortDirection::Asc,
      Some("desc") => SortDirection::Desc,
      Some(other) => return Err(Error::UnknownSortDirection(other.to_owned())),
    };

    Ok(Self { property, direction })
  }
}

impl fmt::Display for Sort {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{},{}", self.property.as_str(), self.direction.as_str())
  }
}

// ─── Paging ──────────────────────────────────────────────────────────────────

/// Parameters for [`PersonStore::find_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  /// Zero-based page number.
  pub page: u32,
  /// Always within `1..=MAX_PAGE_SIZE`.
  pub size: u32,
  /// `None` orders by ascending `id`.
  pub sort: Option<Sort>,
}

impl PageRequest {
  pub const DEFAULT_SIZE: u32 = 20;
  pub const MAX_PAGE_SIZE: u32 = 1000;

  pub fn new(page: u32, size: u32) -> Self {
    Self {
      page,
      size: size.clamp(1, Self::MAX_PAGE_SIZE),
      sort: None,
    }
  }

  pub fn with_sort(mut self, sort: Sort) -> Self {
    self.sort = Some(sort);
    self
  }

  /// Number of rows to skip.
  pub fn offset(&self) -> u64 { u64::from(self.page) * u64::from(self.size) }
}

impl Default for PageRequest {
  fn default() -> Self { Self::new(0, Self::DEFAULT_SIZE) }
}

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub content:        Vec<T>,
  pub number:         u32,
  pub size:           u32,
  pub total_elements: u64,
  pub total_pages:    u64,
}

impl<T> Page<T> {
  pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
    Self {
      content,
      number: request.page,
      size: request.size,
      total_elements,
      total_pages: total_elements.div_ceil(u64::from(request.size.max(1))),
    }
  }

  pub fn has_next(&self) -> bool { u64::from(self.number) + 1 < self.total_pages }

  pub fn has_previous(&self) -> bool { self.number > 0 }
}

// ─── Write outcome ───────────────────────────────────────────────────────────

/// How [`PersonStore::persist`] stored a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
  /// Inserted under a freshly generated identifier.
  Created(Person),
  /// Overwrote the record already stored under the same identifier.
  Updated(Person),
}

impl Saved {
  pub fn person(&self) -> &Person {
    match self {
      Saved::Created(p) | Saved::Updated(p) => p,
    }
  }

  pub fn into_person(self) -> Person {
    match self {
      Saved::Created(p) | Saved::Updated(p) => p,
    }
  }

  pub fn is_created(&self) -> bool { matches!(self, Saved::Created(_)) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Roster person store backend.
///
/// The store owns identity: it is the only place a [`Person::id`] is ever
/// generated. Lookups report absence as `None`/`false`, never as an error.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist `person` in a single write and report whether it was inserted
  /// or overwrote an existing record.
  ///
  /// A person whose identifier is stored overwrites that record. Any other
  /// person (unsaved, or carrying an identifier the store does not hold) is
  /// inserted under a fresh identifier that has never been used before; the
  /// caller's identifier is never written.
  fn persist(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Saved, Self::Error>> + Send + '_;

  /// Persist `person` and return the stored record. See [`Self::persist`].
  fn save(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_ {
    async move { self.persist(person).await.map(Saved::into_person) }
  }

  /// Remove the record stored under `id`. Returns `false` if there was none.
  fn delete_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a person by identifier. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  fn exists_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Return one page of people ordered per `request`.
  fn find_all<'a>(
    &'a self,
    request: &'a PageRequest,
  ) -> impl Future<Output = Result<Page<Person>, Self::Error>> + Send + 'a;

  /// All people whose last name equals `last_name` exactly, by ascending id.
  fn find_by_last_name<'a>(
    &'a self,
    last_name: &'a str,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;

  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
