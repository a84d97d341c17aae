//! Community board types (posts, comments, likes).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A board post, stored as a JSON document in the posts table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub board_id: i32,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author_id: String,
    pub author: String,
    pub author_level: String,
    pub likes: i64,
    pub views: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with zeroed counters and a fresh id.
    pub fn new(
        board_id: i32,
        title: String,
        content: String,
        category: String,
        author_id: String,
        author: String,
        author_level: String,
        images: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_id,
            title,
            content,
            category,
            author_id,
            author,
            author_level,
            likes: 0,
            views: 0,
            images,
            created_at: Utc::now(),
        }
    }
}

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub author_id: String,
    pub author: String,
    pub author_level: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        post_id: Uuid,
        content: String,
        author_id: String,
        author: String,
        author_level: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            content,
            author_id,
            author,
            author_level,
            likes: 0,
            created_at: Utc::now(),
        }
    }
}

/// Per-board aggregate counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardStats {
    pub board_id: i32,
    pub posts: usize,
    pub comments: usize,
    pub likes: i64,
}

/// Sort orders for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Latest,
    Popular,
    Views,
}

impl SortOrder {
    /// Order a fetched partition in place. Listing queries pull the whole
    /// board partition, so the ordering lives here rather than in CQL.
    pub fn apply(&self, posts: &mut [Post]) {
        match self {
            SortOrder::Latest => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::Popular => {
                posts.sort_by(|a, b| (b.likes, b.views).cmp(&(a.likes, a.views)))
            }
            SortOrder::Views => posts.sort_by(|a, b| b.views.cmp(&a.views)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, likes: i64, views: i64) -> Post {
        let mut p = Post::new(
            1,
            title.to_string(),
            "body".to_string(),
            "일반".to_string(),
            "u1".to_string(),
            "user".to_string(),
            "Lv.1".to_string(),
            Vec::new(),
        );
        p.likes = likes;
        p.views = views;
        p
    }

    #[test]
    fn test_popular_sorts_by_likes_then_views() {
        let mut posts = vec![post("a", 1, 50), post("b", 3, 0), post("c", 3, 10)];
        SortOrder::Popular.apply(&mut posts);
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_latest_sorts_newest_first() {
        let mut older = post("old", 0, 0);
        older.created_at = Utc::now() - chrono::Duration::hours(1);
        let newer = post("new", 0, 0);
        let mut posts = vec![older, newer];
        SortOrder::Latest.apply(&mut posts);
        assert_eq!(posts[0].title, "new");
    }
}
