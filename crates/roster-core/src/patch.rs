//! Partial updates to a stored [`Person`].
//!
//! A patch body follows JSON merge-patch rules: an absent key leaves the field
//! alone, `null` clears it, a string replaces it. Any `id` in the body is
//! ignored.

use serde::{Deserialize, Deserializer};

use crate::person::Person;

/// What to do with one nullable field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate {
  Set(String),
  Unset,
  #[default]
  Unchanged,
}

impl FieldUpdate {
  /// Resolve against the field's current value.
  pub fn resolve(self, current: Option<String>) -> Option<String> {
    match self {
      FieldUpdate::Set(v) => Some(v),
      FieldUpdate::Unset => None,
      FieldUpdate::Unchanged => current,
    }
  }
}

// Only invoked when the key is present; absence falls back to `Default`.
impl<'de> Deserialize<'de> for FieldUpdate {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    Ok(match Option::<String>::deserialize(deserializer)? {
      Some(v) => FieldUpdate::Set(v),
      None => FieldUpdate::Unset,
    })
  }
}

/// A merge-patch document for a [`Person`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonPatch {
  pub first_name: FieldUpdate,
  pub last_name:  FieldUpdate,
}

impl PersonPatch {
  pub fn is_empty(&self) -> bool {
    self.first_name == FieldUpdate::Unchanged
      && self.last_name == FieldUpdate::Unchanged
  }

  /// Produce the updated record. Goes through [`Person::to_builder`], so the
  /// identifier of `current` always survives.
  pub fn apply(self, current: &Person) -> Person {
    current
      .to_builder()
      .first_name_opt(self.first_name.resolve(current.first_name.clone()))
      .last_name_opt(self.last_name.resolve(current.last_name.clone()))
      .build()
  }
}
