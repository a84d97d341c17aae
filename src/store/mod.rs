//! Community persistence on ScyllaDB.
//!
//! Document-style tables: each post/comment row carries its JSON-serialized
//! model in a `data` text column. Posts are partitioned by board, with a
//! small id→board lookup table so detail reads can start from a post id
//! alone.

use anyhow::{Context, Result};
use futures::future::try_join_all;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::{BoardStats, Comment, Post};

#[derive(Clone)]
pub struct StoreClient {
    session: Arc<Session>,
}

impl StoreClient {
    pub async fn new(uri: &str) -> Result<Self> {
        info!("Connecting to ScyllaDB at {}...", uri);
        let session: Session = SessionBuilder::new()
            .known_node(uri)
            .build()
            .await
            .context("Failed to connect to ScyllaDB")?;

        let client = Self {
            session: Arc::new(session),
        };

        client.init_schema().await?;
        Ok(client)
    }

    async fn init_schema(&self) -> Result<()> {
        self.session
            .query_unpaged(
                "CREATE KEYSPACE IF NOT EXISTS ginkgo
                 WITH REPLICATION = {
                    'class' : 'SimpleStrategy',
                    'replication_factor' : 1
                 }",
                &[],
            )
            .await?;

        self.session
            .query_unpaged(
                "CREATE TABLE IF NOT EXISTS ginkgo.posts (
                    board_id int,
                    id uuid,
                    data text,
                    PRIMARY KEY (board_id, id)
                )",
                &[],
            )
            .await?;

        self.session
            .query_unpaged(
                "CREATE TABLE IF NOT EXISTS ginkgo.post_board (
                    id uuid PRIMARY KEY,
                    board_id int
                )",
                &[],
            )
            .await?;

        self.session
            .query_unpaged(
                "CREATE TABLE IF NOT EXISTS ginkgo.comments (
                    post_id uuid,
                    id uuid,
                    data text,
                    PRIMARY KEY (post_id, id)
                )",
                &[],
            )
            .await?;

        self.session
            .query_unpaged(
                "CREATE TABLE IF NOT EXISTS ginkgo.likes (
                    post_id uuid,
                    user_id text,
                    PRIMARY KEY (post_id, user_id)
                )",
                &[],
            )
            .await?;

        Ok(())
    }

    /// Store reachability probe for the health endpoint.
    pub async fn health_check(&self) -> Result<bool> {
        let result = self
            .session
            .query_unpaged("SELECT release_version FROM system.local", &[])
            .await?;
        Ok(result.into_rows_result().is_ok())
    }

    pub async fn create_post(&self, post: &Post) -> Result<()> {
        let data = serde_json::to_string(post)?;
        self.session
            .query_unpaged(
                "INSERT INTO ginkgo.posts (board_id, id, data) VALUES (?, ?, ?)",
                (post.board_id, post.id, data),
            )
            .await?;
        self.session
            .query_unpaged(
                "INSERT INTO ginkgo.post_board (id, board_id) VALUES (?, ?)",
                (post.id, post.board_id),
            )
            .await?;
        Ok(())
    }

    /// Re-serialize a post after a counter change. Same upsert as creation,
    /// minus the board lookup row which never changes.
    pub async fn update_post(&self, post: &Post) -> Result<()> {
        let data = serde_json::to_string(post)?;
        self.session
            .query_unpaged(
                "INSERT INTO ginkgo.posts (board_id, id, data) VALUES (?, ?, ?)",
                (post.board_id, post.id, data),
            )
            .await?;
        Ok(())
    }

    pub async fn list_posts(&self, board_id: i32) -> Result<Vec<Post>> {
        let result = self
            .session
            .query_unpaged(
                "SELECT data FROM ginkgo.posts WHERE board_id = ?",
                (board_id,),
            )
            .await?;

        let mut posts = Vec::new();
        if let Ok(rows_result) = result.into_rows_result() {
            for row in rows_result.rows::<(String,)>()? {
                let (data,) = row?;
                posts.push(serde_json::from_str(&data)?);
            }
        }
        Ok(posts)
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Option<Post>> {
        let Some(board_id) = self.board_of(id).await? else {
            return Ok(None);
        };

        let result = self
            .session
            .query_unpaged(
                "SELECT data FROM ginkgo.posts WHERE board_id = ? AND id = ?",
                (board_id, id),
            )
            .await?;

        if let Ok(rows_result) = result.into_rows_result() {
            if let Some((data,)) = rows_result.maybe_first_row::<(String,)>()? {
                return Ok(Some(serde_json::from_str(&data)?));
            }
        }
        Ok(None)
    }

    async fn board_of(&self, id: Uuid) -> Result<Option<i32>> {
        let result = self
            .session
            .query_unpaged("SELECT board_id FROM ginkgo.post_board WHERE id = ?", (id,))
            .await?;

        if let Ok(rows_result) = result.into_rows_result() {
            if let Some((board_id,)) = rows_result.maybe_first_row::<(i32,)>()? {
                return Ok(Some(board_id));
            }
        }
        Ok(None)
    }

    pub async fn create_comment(&self, comment: &Comment) -> Result<()> {
        let data = serde_json::to_string(comment)?;
        self.session
            .query_unpaged(
                "INSERT INTO ginkgo.comments (post_id, id, data) VALUES (?, ?, ?)",
                (comment.post_id, comment.id, data),
            )
            .await?;
        Ok(())
    }

    /// Comments for a post, oldest first.
    pub async fn comments_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let result = self
            .session
            .query_unpaged(
                "SELECT data FROM ginkgo.comments WHERE post_id = ?",
                (post_id,),
            )
            .await?;

        let mut comments: Vec<Comment> = Vec::new();
        if let Ok(rows_result) = result.into_rows_result() {
            for row in rows_result.rows::<(String,)>()? {
                let (data,) = row?;
                comments.push(serde_json::from_str(&data)?);
            }
        }
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    pub async fn comment_count(&self, post_id: Uuid) -> Result<i64> {
        let result = self
            .session
            .query_unpaged(
                "SELECT COUNT(*) FROM ginkgo.comments WHERE post_id = ?",
                (post_id,),
            )
            .await?;

        if let Ok(rows_result) = result.into_rows_result() {
            if let Some((count,)) = rows_result.maybe_first_row::<(i64,)>()? {
                return Ok(count);
            }
        }
        Ok(0)
    }

    /// Insert or remove a like row and refresh the post's counter.
    /// Returns `None` when the post does not exist, otherwise
    /// `(now_liked, like_count)`.
    pub async fn toggle_like(&self, post_id: Uuid, user_id: &str) -> Result<Option<(bool, i64)>> {
        let Some(mut post) = self.get_post(post_id).await? else {
            return Ok(None);
        };

        let existing = self
            .session
            .query_unpaged(
                "SELECT user_id FROM ginkgo.likes WHERE post_id = ? AND user_id = ?",
                (post_id, user_id),
            )
            .await?;
        let already_liked = existing
            .into_rows_result()
            .ok()
            .and_then(|r| r.maybe_first_row::<(String,)>().ok().flatten())
            .is_some();

        if already_liked {
            self.session
                .query_unpaged(
                    "DELETE FROM ginkgo.likes WHERE post_id = ? AND user_id = ?",
                    (post_id, user_id),
                )
                .await?;
        } else {
            self.session
                .query_unpaged(
                    "INSERT INTO ginkgo.likes (post_id, user_id) VALUES (?, ?)",
                    (post_id, user_id),
                )
                .await?;
        }

        let count = self.like_count(post_id).await?;
        post.likes = count;
        self.update_post(&post).await?;

        Ok(Some((!already_liked, count)))
    }

    pub async fn like_count(&self, post_id: Uuid) -> Result<i64> {
        let result = self
            .session
            .query_unpaged(
                "SELECT COUNT(*) FROM ginkgo.likes WHERE post_id = ?",
                (post_id,),
            )
            .await?;

        if let Ok(rows_result) = result.into_rows_result() {
            if let Some((count,)) = rows_result.maybe_first_row::<(i64,)>()? {
                return Ok(count);
            }
        }
        Ok(0)
    }

    /// Aggregate counters for a board. Comment counts fan out per post.
    pub async fn board_stats(&self, board_id: i32) -> Result<BoardStats> {
        let posts = self.list_posts(board_id).await?;
        let likes = posts.iter().map(|p| p.likes).sum();

        let counts = try_join_all(posts.iter().map(|p| self.comment_count(p.id))).await?;
        let comments: i64 = counts.into_iter().sum();

        Ok(BoardStats {
            board_id,
            posts: posts.len(),
            comments: comments as usize,
            likes,
        })
    }
}
