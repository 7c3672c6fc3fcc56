//! Post repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `posts` storage.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Post::validate()` before SQL mutations.
//! - List order is `updated_at DESC, id ASC`.

use crate::model::post::{NewPost, Post, PostFields, PostId};
use crate::repo::error::{log_write_failure, RepoError, RepoResult};
use crate::repo::sql::{ensure_connection_ready, push_pagination};
use log::info;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    category,
    summary,
    created_at,
    updated_at
FROM posts";

const POST_COLUMNS: &[&str] = &[
    "id",
    "title",
    "content",
    "category",
    "summary",
    "created_at",
    "updated_at",
];

/// Query options for listing posts.
#[derive(Debug, Clone, Default)]
pub struct PostListQuery {
    /// Exact category match.
    pub category: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for post CRUD operations.
pub trait PostRepository {
    fn create_post(&self, draft: &NewPost) -> RepoResult<Post>;
    /// Writes every field of `post` back and returns the refreshed record.
    fn update_post(&self, post: &Post) -> RepoResult<Post>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>>;
    fn delete_post(&self, id: PostId) -> RepoResult<()>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "posts", POST_COLUMNS)?;
        Ok(Self { conn })
    }

    fn insert_post(&self, draft: &NewPost) -> RepoResult<Post> {
        self.conn.execute(
            "INSERT INTO posts (title, content, category, summary)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.title(),
                draft.content(),
                draft.category(),
                draft.summary(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_post(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("post {id} missing after insert")))
    }

    fn write_post(&self, post: &Post) -> RepoResult<Post> {
        post.validate()?;

        let changed = self.conn.execute(
            "UPDATE posts
             SET
                title = ?1,
                content = ?2,
                category = ?3,
                summary = ?4,
                updated_at = CAST(unixepoch('subsec') * 1000 AS INTEGER)
             WHERE id = ?5;",
            params![
                post.title(),
                post.content(),
                post.category(),
                post.summary(),
                post.id(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::PostNotFound(post.id()));
        }

        self.get_post(post.id())?
            .ok_or(RepoError::PostNotFound(post.id()))
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&self, draft: &NewPost) -> RepoResult<Post> {
        match self.insert_post(draft) {
            Ok(post) => {
                info!(
                    "event=post_create module=repo status=ok post_id={}",
                    post.id()
                );
                Ok(post)
            }
            Err(err) => {
                log_write_failure("post_create", &err);
                Err(err)
            }
        }
    }

    fn update_post(&self, post: &Post) -> RepoResult<Post> {
        match self.write_post(post) {
            Ok(updated) => {
                info!(
                    "event=post_update module=repo status=ok post_id={}",
                    updated.id()
                );
                Ok(updated)
            }
            Err(err) => {
                log_write_failure("post_update", &err);
                Err(err)
            }
        }
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(row)?));
        }

        Ok(None)
    }

    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        let mut sql = format!("{POST_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = query.category.as_ref() {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.clone()));
        }

        sql.push_str(" ORDER BY updated_at DESC, id ASC");
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        Ok(posts)
    }

    fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM posts WHERE id = ?1;", [id])?;
        if changed == 0 {
            let err = RepoError::PostNotFound(id);
            log_write_failure("post_delete", &err);
            return Err(err);
        }

        info!("event=post_delete module=repo status=ok post_id={id}");
        Ok(())
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let id: PostId = row.get("id")?;
    let fields = PostFields {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        category: row.get("category")?,
        summary: row.get("summary")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    Post::from_parts(fields).map_err(|err| RepoError::InvalidData(format!("post {id}: {err}")))
}
