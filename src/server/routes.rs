//! Request handlers and wire DTOs.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ginkgo::models::{BoardStats, Comment, LandmarkInfo, Post, SortOrder};
use ginkgo::narrative::{Narrative, VisitorContext};
use ginkgo::tour::TourSpot;

use crate::error::ApiError;
use crate::AppState;

// Location resolution

/// Coordinates arrive either as numbers or as decimal-degree strings,
/// depending on the client.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum CoordField {
    Num(f64),
    Text(String),
}

impl CoordField {
    fn as_f64(&self) -> Option<f64> {
        match self {
            CoordField::Num(v) => Some(*v),
            CoordField::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize)]
pub struct LocateRequest {
    latitude: Option<CoordField>,
    longitude: Option<CoordField>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateResponse {
    matched: bool,
    id: Option<String>,
    name: Option<String>,
    matched_by_footprint: bool,
    distance_meters: Option<f64>,
}

pub async fn locate_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LocateRequest>,
) -> Result<Json<LocateResponse>, ApiError> {
    let lat = body.latitude.as_ref().and_then(CoordField::as_f64);
    let lon = body.longitude.as_ref().and_then(CoordField::as_f64);
    let (Some(lat), Some(lon)) = (lat, lon) else {
        return Err(ApiError::BadRequest(
            "latitude and longitude are required".to_string(),
        ));
    };

    let response = match state.resolver.resolve(lat, lon) {
        Some(resolved) => LocateResponse {
            matched: true,
            id: Some(resolved.id),
            name: Some(resolved.name),
            matched_by_footprint: resolved.matched_by_footprint,
            distance_meters: resolved.distance_meters,
        },
        // No match is a valid result, not an error
        None => LocateResponse {
            matched: false,
            id: None,
            name: None,
            matched_by_footprint: false,
            distance_meters: None,
        },
    };

    Ok(Json(response))
}

// Landmark catalog

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkSummary {
    id: String,
    name: String,
    name_localized: String,
    lat: f64,
    lon: f64,
    description: String,
    heritage: String,
}

#[derive(Serialize)]
pub struct LandmarksResponse {
    landmarks: Vec<LandmarkSummary>,
    total: usize,
}

pub async fn list_landmarks_handler(
    State(state): State<Arc<AppState>>,
) -> Json<LandmarksResponse> {
    let landmarks: Vec<LandmarkSummary> = state
        .resolver
        .catalog()
        .entries()
        .map(|info| LandmarkSummary {
            id: info.id.clone(),
            name: info.name.clone(),
            name_localized: info.name_localized.clone(),
            lat: info.center.lat,
            lon: info.center.lon,
            description: info.description.clone(),
            heritage: info.heritage.clone(),
        })
        .collect();

    let total = landmarks.len();
    Json(LandmarksResponse { landmarks, total })
}

pub async fn landmark_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LandmarkInfo>, ApiError> {
    state
        .resolver
        .landmark_by_id(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("unknown landmark: {}", id)))
}

pub async fn narrative_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<Json<VisitorContext>>,
) -> Result<Json<Narrative>, ApiError> {
    let building = state
        .resolver
        .landmark_by_id(&id)
        .ok_or_else(|| ApiError::NotFound(format!("unknown landmark: {}", id)))?;

    let visitor = body.map(|Json(v)| v).unwrap_or_default();
    let narrative = state.narrative.building_narrative(&building, &visitor).await;
    Ok(Json(narrative))
}

// Community board

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    board_id: i32,
    title: String,
    content: String,
    category: Option<String>,
    user_id: String,
    author: Option<String>,
    author_level: Option<String>,
    #[serde(default)]
    images: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    id: Uuid,
    board_id: i32,
    title: String,
    content: String,
    category: String,
    author_id: String,
    author: String,
    author_level: String,
    likes: i64,
    views: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>,
    created_at: DateTime<Utc>,
    time_formatted: String,
    comment_count: i64,
}

impl PostView {
    fn from_post(post: Post, comment_count: i64) -> Self {
        Self {
            id: post.id,
            board_id: post.board_id,
            title: post.title,
            content: post.content,
            category: post.category,
            author_id: post.author_id,
            author: post.author,
            author_level: post.author_level,
            likes: post.likes,
            views: post.views,
            images: post.images,
            created_at: post.created_at,
            time_formatted: format_relative(post.created_at),
            comment_count,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    id: Uuid,
    post_id: Uuid,
    content: String,
    author_id: String,
    author: String,
    author_level: String,
    likes: i64,
    created_at: DateTime<Utc>,
    time_formatted: String,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            content: comment.content,
            author_id: comment.author_id,
            author: comment.author,
            author_level: comment.author_level,
            likes: comment.likes,
            created_at: comment.created_at,
            time_formatted: format_relative(comment.created_at),
        }
    }
}

pub async fn create_post_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreatePostRequest>,
) -> Result<Json<PostView>, ApiError> {
    let title = body.title.trim();
    let content = body.content.trim();
    if title.is_empty() || content.is_empty() || body.user_id.is_empty() {
        return Err(ApiError::BadRequest(
            "boardId, title, content and userId are required".to_string(),
        ));
    }

    let author = body
        .author
        .unwrap_or_else(|| default_author_name(&body.user_id));
    let post = Post::new(
        body.board_id,
        title.to_string(),
        content.to_string(),
        body.category.unwrap_or_else(|| "일반".to_string()),
        body.user_id,
        author,
        body.author_level.unwrap_or_else(|| "Lv.1".to_string()),
        body.images,
    );

    state.store.create_post(&post).await?;
    Ok(Json(PostView::from_post(post, 0)))
}

#[derive(Deserialize)]
pub struct ListPostsParams {
    #[serde(default)]
    sort: SortOrder,
}

#[derive(Serialize)]
pub struct PostsResponse {
    posts: Vec<PostView>,
    total: usize,
}

pub async fn list_posts_handler(
    State(state): State<Arc<AppState>>,
    Path(board_id): Path<i32>,
    Query(params): Query<ListPostsParams>,
) -> Result<Json<PostsResponse>, ApiError> {
    let mut posts = state.store.list_posts(board_id).await?;
    params.sort.apply(&mut posts);

    let counts = try_join_all(posts.iter().map(|p| state.store.comment_count(p.id))).await?;
    let posts: Vec<PostView> = posts
        .into_iter()
        .zip(counts)
        .map(|(post, count)| PostView::from_post(post, count))
        .collect();

    let total = posts.len();
    Ok(Json(PostsResponse { posts, total }))
}

#[derive(Serialize)]
pub struct PostDetailResponse {
    post: PostView,
    comments: Vec<CommentView>,
}

pub async fn post_detail_handler(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostDetailResponse>, ApiError> {
    let mut post = state
        .store
        .get_post(post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("unknown post: {}", post_id)))?;

    post.views += 1;
    state.store.update_post(&post).await?;

    let comments = state.store.comments_for_post(post_id).await?;
    let comment_count = comments.len() as i64;

    Ok(Json(PostDetailResponse {
        post: PostView::from_post(post, comment_count),
        comments: comments.into_iter().map(CommentView::from).collect(),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    post_id: Uuid,
    content: String,
    user_id: String,
    author: Option<String>,
    author_level: Option<String>,
}

pub async fn create_comment_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<Json<CommentView>, ApiError> {
    let content = body.content.trim();
    if content.is_empty() || body.user_id.is_empty() {
        return Err(ApiError::BadRequest(
            "postId, content and userId are required".to_string(),
        ));
    }

    if state.store.get_post(body.post_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("unknown post: {}", body.post_id)));
    }

    let author = body
        .author
        .unwrap_or_else(|| default_author_name(&body.user_id));
    let comment = Comment::new(
        body.post_id,
        content.to_string(),
        body.user_id,
        author,
        body.author_level.unwrap_or_else(|| "Lv.1".to_string()),
    );

    state.store.create_comment(&comment).await?;
    Ok(Json(CommentView::from(comment)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    user_id: String,
}

#[derive(Serialize)]
pub struct LikeResponse {
    liked: bool,
    likes: i64,
}

pub async fn toggle_like_handler(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<Uuid>,
    Json(body): Json<LikeRequest>,
) -> Result<Json<LikeResponse>, ApiError> {
    if body.user_id.is_empty() {
        return Err(ApiError::BadRequest("userId is required".to_string()));
    }

    let (liked, likes) = state
        .store
        .toggle_like(post_id, &body.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("unknown post: {}", post_id)))?;

    Ok(Json(LikeResponse { liked, likes }))
}

pub async fn board_stats_handler(
    State(state): State<Arc<AppState>>,
    Path(board_id): Path<i32>,
) -> Result<Json<BoardStats>, ApiError> {
    let stats = state.store.board_stats(board_id).await?;
    Ok(Json(stats))
}

// Tourism proxy

#[derive(Deserialize)]
pub struct TourNearbyParams {
    latitude: f64,
    longitude: f64,
    /// Search radius in meters
    radius: Option<u32>,
    size: Option<u32>,
}

#[derive(Serialize)]
pub struct TourNearbyResponse {
    spots: Vec<TourSpot>,
    total: usize,
}

pub async fn tour_nearby_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TourNearbyParams>,
) -> Json<TourNearbyResponse> {
    let radius = params.radius.unwrap_or(10_000);
    let size = params.size.unwrap_or(10).min(30);

    let spots = state
        .tour
        .nearby(params.latitude, params.longitude, radius, size)
        .await;

    let total = spots.len();
    Json(TourNearbyResponse { spots, total })
}

// Helpers

fn default_author_name(user_id: &str) -> String {
    let suffix: String = user_id
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("사용자{}", suffix)
}

/// Relative timestamps the board UI shows next to posts and comments.
fn format_relative(at: DateTime<Utc>) -> String {
    let elapsed = Utc::now() - at;

    if elapsed.num_minutes() < 1 {
        return "방금 전".to_string();
    }
    if elapsed.num_minutes() < 60 {
        return format!("{}분 전", elapsed.num_minutes());
    }
    if elapsed.num_hours() < 24 {
        return format!("{}시간 전", elapsed.num_hours());
    }
    if elapsed.num_days() < 7 {
        return format!("{}일 전", elapsed.num_days());
    }
    at.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_field_parses_both_shapes() {
        let num = CoordField::Num(37.5788);
        let text = CoordField::Text(" 126.9770 ".to_string());
        let bad = CoordField::Text("not-a-coordinate".to_string());
        assert_eq!(num.as_f64(), Some(37.5788));
        assert_eq!(text.as_f64(), Some(126.9770));
        assert_eq!(bad.as_f64(), None);
    }

    #[test]
    fn test_format_relative_buckets() {
        let now = Utc::now();
        assert_eq!(format_relative(now), "방금 전");
        assert_eq!(format_relative(now - chrono::Duration::minutes(5)), "5분 전");
        assert_eq!(format_relative(now - chrono::Duration::hours(3)), "3시간 전");
        assert_eq!(format_relative(now - chrono::Duration::days(2)), "2일 전");
        let old = format_relative(now - chrono::Duration::days(30));
        assert!(old.contains('-'), "old posts show a date, got {}", old);
    }

    #[test]
    fn test_default_author_name_uses_id_suffix() {
        assert_eq!(default_author_name("user-12345678"), "사용자5678");
        assert_eq!(default_author_name("ab"), "사용자ab");
    }
}
