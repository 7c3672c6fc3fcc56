//! Author repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `authors` storage.
//! - Own the store-backed name uniqueness rule (`validate_name`).
//!
//! # Invariants
//! - Write paths run `validate_name` and `Author::validate()` before SQL
//!   mutations.
//! - A store-level unique violation on `authors.name` surfaces as
//!   `ValidationError::NameTaken`, same as the application-level check.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::author::{Author, AuthorFields, AuthorId, NewAuthor};
use crate::model::validation::{validate_name_present, ValidationError};
use crate::repo::error::{log_write_failure, RepoError, RepoResult};
use crate::repo::sql::{ensure_connection_ready, push_pagination};
use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number,
    created_at,
    updated_at
FROM authors";

const AUTHOR_COLUMNS: &[&str] = &["id", "name", "phone_number", "created_at", "updated_at"];

/// Query options for listing authors. Rows are ordered by `id ASC`.
#[derive(Debug, Clone, Default)]
pub struct AuthorListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for author CRUD operations.
pub trait AuthorRepository {
    /// Inserts a draft and returns the persisted record.
    fn create_author(&self, draft: &NewAuthor) -> RepoResult<Author>;
    /// Writes every field of `author` back and returns the refreshed record.
    fn update_author(&self, author: &Author) -> RepoResult<Author>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// Id of the author owning `name`, without loading the row.
    fn find_author_id_by_name(&self, name: &str) -> RepoResult<Option<AuthorId>>;
    /// Exact, case-sensitive lookup on the unique name column.
    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>>;
    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>>;
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;

    /// Accepts `candidate` as the name of record `record_id`.
    ///
    /// Fails when the name is absent or empty, or when a different author
    /// already owns it. `record_id` is `None` for records not yet inserted;
    /// an author keeping its own current name passes. Only the owner's id is
    /// read, so a malformed owner row still reports `NameTaken`.
    fn validate_name<'a>(
        &self,
        record_id: Option<AuthorId>,
        candidate: Option<&'a str>,
    ) -> RepoResult<&'a str> {
        let name = validate_name_present(candidate)?;
        if let Some(owner_id) = self.find_author_id_by_name(name)? {
            if Some(owner_id) != record_id {
                return Err(ValidationError::NameTaken.into());
            }
        }
        Ok(name)
    }
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "authors", AUTHOR_COLUMNS)?;
        Ok(Self { conn })
    }

    fn insert_author(&self, draft: &NewAuthor) -> RepoResult<Author> {
        let name = self.validate_name(None, Some(draft.name()))?;

        self.conn
            .execute(
                "INSERT INTO authors (name, phone_number) VALUES (?1, ?2);",
                params![name, draft.phone_number()],
            )
            .map_err(map_name_conflict)?;

        let id = self.conn.last_insert_rowid();
        self.get_author(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("author {id} missing after insert")))
    }

    fn write_author(&self, author: &Author) -> RepoResult<Author> {
        author.validate()?;
        self.validate_name(Some(author.id()), Some(author.name()))?;

        let changed = self
            .conn
            .execute(
                "UPDATE authors
                 SET
                    name = ?1,
                    phone_number = ?2,
                    updated_at = CAST(unixepoch('subsec') * 1000 AS INTEGER)
                 WHERE id = ?3;",
                params![author.name(), author.phone_number(), author.id()],
            )
            .map_err(map_name_conflict)?;

        if changed == 0 {
            return Err(RepoError::AuthorNotFound(author.id()));
        }

        self.get_author(author.id())?
            .ok_or(RepoError::AuthorNotFound(author.id()))
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, draft: &NewAuthor) -> RepoResult<Author> {
        match self.insert_author(draft) {
            Ok(author) => {
                info!(
                    "event=author_create module=repo status=ok author_id={}",
                    author.id()
                );
                Ok(author)
            }
            Err(err) => {
                log_write_failure("author_create", &err);
                Err(err)
            }
        }
    }

    fn update_author(&self, author: &Author) -> RepoResult<Author> {
        match self.write_author(author) {
            Ok(updated) => {
                info!(
                    "event=author_update module=repo status=ok author_id={}",
                    updated.id()
                );
                Ok(updated)
            }
            Err(err) => {
                log_write_failure("author_update", &err);
                Err(err)
            }
        }
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }

        Ok(None)
    }

    fn find_author_id_by_name(&self, name: &str) -> RepoResult<Option<AuthorId>> {
        debug!("event=author_lookup module=repo status=start by=name");
        let id = self
            .conn
            .query_row("SELECT id FROM authors WHERE name = ?1;", [name], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(id)
    }

    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        match self.find_author_id_by_name(name)? {
            Some(id) => self.get_author(id),
            None => Ok(None),
        }
    }

    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        let mut sql = format!("{AUTHOR_SELECT_SQL} ORDER BY id ASC");
        let mut bind_values: Vec<Value> = Vec::new();
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id])?;
        if changed == 0 {
            let err = RepoError::AuthorNotFound(id);
            log_write_failure("author_delete", &err);
            return Err(err);
        }

        info!("event=author_delete module=repo status=ok author_id={id}");
        Ok(())
    }
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let id: AuthorId = row.get("id")?;
    let fields = AuthorFields {
        id,
        name: row.get("name")?,
        phone_number: row.get("phone_number")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    Author::from_parts(fields).map_err(|err| RepoError::InvalidData(format!("author {id}: {err}")))
}

fn map_name_conflict(err: rusqlite::Error) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::Validation(ValidationError::NameTaken)
        }
        _ => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_db_in_memory;

    #[test]
    fn store_unique_constraint_maps_to_name_taken() {
        let conn = open_db_in_memory().unwrap();
        conn.execute("INSERT INTO authors (name) VALUES ('Ada');", [])
            .unwrap();

        let raw = conn
            .execute("INSERT INTO authors (name) VALUES ('Ada');", [])
            .unwrap_err();
        let mapped = map_name_conflict(raw);
        assert!(matches!(
            mapped,
            RepoError::Validation(ValidationError::NameTaken)
        ));
    }

    #[test]
    fn other_sqlite_errors_are_not_remapped() {
        let conn = open_db_in_memory().unwrap();
        let raw = conn
            .execute("INSERT INTO authors (phone_number) VALUES ('1');", [])
            .unwrap_err();
        assert!(matches!(map_name_conflict(raw), RepoError::Db(_)));
    }
}
