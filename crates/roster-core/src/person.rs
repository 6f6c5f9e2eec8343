//! Person — the single persisted record type.
//!
//! A person is a plain mutable value. Its `id` is granted by the store on first
//! save; until then it holds [`Person::UNSAVED_ID`]. Nothing here validates
//! the name fields.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Record ──────────────────────────────────────────────────────────────────

/// A person record.
///
/// Three construction paths produce field-for-field equal values:
///
/// ```
/// use roster_core::Person;
///
/// let mut blank = Person::default();
/// blank.first_name = Some("Alice".into());
/// blank.last_name = Some("Smith".into());
///
/// let direct = Person::new(0, Some("Alice".into()), Some("Smith".into()));
/// let built = Person::builder().first_name("Alice").last_name("Smith").build();
///
/// assert_eq!(blank, direct);
/// assert_eq!(direct, built);
/// ```
#[derive(
  Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(default, rename_all = "camelCase")]
pub struct Person {
  /// Store-assigned identifier; `0` until the record is first saved.
  pub id:         i64,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
}

impl Person {
  /// The `id` of a record that has not been saved yet.
  pub const UNSAVED_ID: i64 = 0;

  /// All-fields constructor. Does not grant identity: `id` is taken verbatim.
  pub fn new(
    id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
  ) -> Self {
    Self { id, first_name, last_name }
  }

  /// Start an empty [`PersonBuilder`].
  pub fn builder() -> PersonBuilder { PersonBuilder::default() }

  /// Seed a [`PersonBuilder`] with every field of `self`, `id` included.
  pub fn to_builder(&self) -> PersonBuilder {
    PersonBuilder {
      id:         self.id,
      first_name: self.first_name.clone(),
      last_name:  self.last_name.clone(),
    }
  }

  /// `true` until the store has assigned an identifier.
  pub fn is_new(&self) -> bool { self.id == Self::UNSAVED_ID }

  /// Whether `self` and `other` are the same logical entity. Only `id`
  /// counts; the name fields carry no identity.
  pub fn same_entity(&self, other: &Person) -> bool { self.id == other.id }

  // ── Accessors ─────────────────────────────────────────────────────────

  pub fn id(&self) -> i64 { self.id }

  pub fn first_name(&self) -> Option<&str> { self.first_name.as_deref() }

  pub fn last_name(&self) -> Option<&str> { self.last_name.as_deref() }

  pub fn set_id(&mut self, id: i64) -> &mut Self {
    self.id = id;
    self
  }

  pub fn set_first_name(&mut self, first_name: Option<String>) -> &mut Self {
    self.first_name = first_name;
    self
  }

  pub fn set_last_name(&mut self, last_name: Option<String>) -> &mut Self {
    self.last_name = last_name;
    self
  }
}

impl fmt::Display for Person {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Person(id={}, firstName={}, lastName={})",
      self.id,
      self.first_name.as_deref().unwrap_or("null"),
      self.last_name.as_deref().unwrap_or("null"),
    )
  }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Staging area for a [`Person`]. Fields may be set in any order; unset
/// fields finalise to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct PersonBuilder {
  id:         i64,
  first_name: Option<String>,
  last_name:  Option<String>,
}

impl PersonBuilder {
  pub fn id(mut self, id: i64) -> Self {
    self.id = id;
    self
  }

  pub fn first_name(self, first_name: impl Into<String>) -> Self {
    self.first_name_opt(Some(first_name.into()))
  }

  /// Stage a nullable first name; `None` clears it.
  pub fn first_name_opt(mut self, first_name: Option<String>) -> Self {
    self.first_name = first_name;
    self
  }

  pub fn last_name(self, last_name: impl Into<String>) -> Self {
    self.last_name_opt(Some(last_name.into()))
  }

  /// Stage a nullable last name; `None` clears it.
  pub fn last_name_opt(mut self, last_name: Option<String>) -> Self {
    self.last_name = last_name;
    self
  }

  pub fn build(self) -> Person {
    Person::new(self.id, self.first_name, self.last_name)
  }
}

impl From<PersonBuilder> for Person {
  fn from(b: PersonBuilder) -> Self { b.build() }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
