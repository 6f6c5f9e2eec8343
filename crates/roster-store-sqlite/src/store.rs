//! [`SqliteStore`] — the SQLite implementation of [`PersonStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use roster_core::{
  Person,
  store::{Page, PageRequest, PersonStore, Saved},
};

use crate::{
  Result,
  encode::{PERSON_COLUMNS, decode_count, decode_person, order_by},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster person store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn persist(&self, person: Person) -> Result<Saved> {
    let Person { id, first_name, last_name } = person;
    let (first, last) = (first_name.clone(), last_name.clone());

    // Overwrite in place when the id is stored; otherwise insert and let
    // SQLite pick the id. Both happen in one transaction.
    let (stored_id, created) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let updated = if id == Person::UNSAVED_ID {
          0
        } else {
          tx.execute(
            "UPDATE people SET first_name = ?2, last_name = ?3 WHERE id = ?1",
            rusqlite::params![id, first, last],
          )?
        };
        let outcome = if updated > 0 {
          (id, false)
        } else {
          tx.execute(
            "INSERT INTO people (first_name, last_name) VALUES (?1, ?2)",
            rusqlite::params![first, last],
          )?;
          (tx.last_insert_rowid(), true)
        };
        tx.commit()?;
        Ok(outcome)
      })
      .await?;

    let person = Person::new(stored_id, first_name, last_name);
    if created {
      tracing::debug!(id = stored_id, requested = id, "inserted person");
      Ok(Saved::Created(person))
    } else {
      tracing::debug!(id = stored_id, "updated person");
      Ok(Saved::Updated(person))
    }
  }

  async fn delete_by_id(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM people WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    tracing::debug!(id, removed, "deleted person");
    Ok(removed > 0)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn find_by_id(&self, id: i64) -> Result<Option<Person>> {
    let person = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1"),
            rusqlite::params![id],
            decode_person,
          )
          .optional()?)
      })
      .await?;
    Ok(person)
  }

  async fn exists_by_id(&self, id: i64) -> Result<bool> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT 1 FROM people WHERE id = ?1",
            rusqlite::params![id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false))
      })
      .await?;
    Ok(exists)
  }

  async fn find_all(&self, request: &PageRequest) -> Result<Page<Person>> {
    let sql = format!(
      "SELECT {PERSON_COLUMNS} FROM people {} LIMIT ?1 OFFSET ?2",
      order_by(request.sort)
    );
    let limit  = i64::from(request.size);
    let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);

    let (rows, total): (Vec<Person>, i64) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let total: i64 =
          tx.query_row("SELECT COUNT(*) FROM people", [], |r| r.get(0))?;
        let rows = {
          let mut stmt = tx.prepare(&sql)?;
          stmt
            .query_map(rusqlite::params![limit, offset], decode_person)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        tx.commit()?;
        Ok((rows, total))
      })
      .await?;

    Ok(Page::new(rows, request, decode_count(total)?))
  }

  async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Person>> {
    let last_name = last_name.to_owned();

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PERSON_COLUMNS} FROM people WHERE last_name = ?1 ORDER BY id ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![last_name], decode_person)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM people", [], |r| r.get(0))?)
      })
      .await?;
    decode_count(n)
  }
}
