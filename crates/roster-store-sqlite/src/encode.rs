//! Mapping between Rust domain types and SQLite rows and clauses.
//!
//! Names are stored as nullable TEXT. Sort properties map onto a fixed set of
//! column names, so ORDER BY clauses never interpolate caller input.

use roster_core::{
  Person,
  store::{Sort, SortDirection, SortProperty},
};

use crate::{Error, Result};

/// Column list in the order [`decode_person`] expects.
pub const PERSON_COLUMNS: &str = "id, first_name, last_name";

pub fn decode_person(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
  Ok(Person::new(row.get(0)?, row.get(1)?, row.get(2)?))
}

pub fn decode_count(n: i64) -> Result<u64> {
  u64::try_from(n).map_err(|_| Error::InvalidCount(n))
}

// ─── Sort ────────────────────────────────────────────────────────────────────

fn sort_column(p: SortProperty) -> &'static str {
  match p {
    SortProperty::Id => "id",
    SortProperty::FirstName => "first_name",
    SortProperty::LastName => "last_name",
  }
}

fn sort_keyword(d: SortDirection) -> &'static str {
  match d {
    SortDirection::Asc => "ASC",
    SortDirection::Desc => "DESC",
  }
}

/// `ORDER BY` clause for `sort`; `id` breaks ties so paging is stable.
pub fn order_by(sort: Option<Sort>) -> String {
  match sort {
    None => "ORDER BY id ASC".to_owned(),
    Some(Sort { property: SortProperty::Id, direction }) => {
      format!("ORDER BY id {}", sort_keyword(direction))
    }
    Some(Sort { property, direction }) => format!(
      "ORDER BY {} {}, id ASC",
      sort_column(property),
      sort_keyword(direction)
    ),
  }
}
