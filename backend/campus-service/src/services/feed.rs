/// Feed selection, ranking, and annotation
///
/// Resolves a request's filter intent into an ordered sequence of posts with
/// denormalized display fields. Filter resolution order: explicit category,
/// explicit author, personalized-for-viewer, then the unfiltered catalog.
use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::Result;
use crate::models::{
    AuthorSummary, FeedPost, Post, User, BROAD_INTEREST_THRESHOLD, CATEGORIES,
};

/// Filter intent of one feed request.
#[derive(Debug, Default)]
pub struct FeedQuery {
    pub category: Option<String>,
    pub author: Option<Uuid>,
    pub personalized: bool,
    pub viewer: Option<Uuid>,
}

/// What a personalized request should fetch.
#[derive(Debug, PartialEq)]
pub enum FeedScope {
    Everything,
    Categories(Vec<String>),
}

pub struct FeedService {
    pool: PgPool,
}

impl FeedService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Select, rank, and annotate posts for one request.
    pub async fn list(&self, query: &FeedQuery) -> Result<Vec<FeedPost>> {
        let mut posts = self.select(query).await?;
        rank_by_likes(&mut posts);
        let authors = self.load_authors(&posts).await?;
        Ok(annotate(posts, &authors, query.viewer))
    }

    /// First matching filter wins.
    async fn select(&self, query: &FeedQuery) -> Result<Vec<Post>> {
        if let Some(category) = &query.category {
            return Ok(db::posts::find_active_by_category(&self.pool, category).await?);
        }

        if let Some(author) = query.author {
            return Ok(db::posts::find_active_by_author(&self.pool, author).await?);
        }

        if query.personalized {
            if let Some(viewer) = query.viewer {
                let interests = db::users::find_by_id(&self.pool, viewer)
                    .await?
                    .map(|user| user.interests)
                    .unwrap_or_default();

                return match personalized_scope(&interests) {
                    FeedScope::Everything => Ok(db::posts::find_all_active(&self.pool).await?),
                    FeedScope::Categories(categories) => {
                        Ok(db::posts::find_active_by_categories(&self.pool, &categories).await?)
                    }
                };
            }
        }

        Ok(db::posts::find_all_active(&self.pool).await?)
    }

    /// One batch lookup for every distinct author in the selection. Authors
    /// that no longer resolve are simply absent from the map; the posts are
    /// still returned, just without author fields.
    async fn load_authors(&self, posts: &[Post]) -> Result<HashMap<Uuid, User>> {
        let mut ids: Vec<Uuid> = posts.iter().map(|post| post.user_id).collect();
        ids.sort_unstable();
        ids.dedup();

        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = db::users::find_by_ids(&self.pool, &ids).await?;
        Ok(users.into_iter().map(|user| (user.id, user)).collect())
    }
}

/// Decide how wide a personalized feed should be. A viewer with no interests
/// falls back to the whole catalog; so does a "broad interest" viewer.
pub fn personalized_scope(interests: &[String]) -> FeedScope {
    if interests.is_empty() || is_broad_interest(interests) {
        FeedScope::Everything
    } else {
        FeedScope::Categories(interests.to_vec())
    }
}

/// Broad interest: at least four distinct categories, or the first four of
/// the canonical vocabulary as a subset. Product rule carried over verbatim.
pub fn is_broad_interest(interests: &[String]) -> bool {
    let distinct: HashSet<&str> = interests.iter().map(String::as_str).collect();

    if distinct.len() >= BROAD_INTEREST_THRESHOLD {
        return true;
    }

    CATEGORIES[..BROAD_INTEREST_THRESHOLD]
        .iter()
        .all(|category| distinct.contains(category))
}

/// Popularity ranking. The sort is stable, so equal-like posts keep the
/// most-recent-first order the selection produced.
pub fn rank_by_likes(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.likes.cmp(&a.likes));
}

/// Attach display fields: ground-truth like total (liker-set size, not the
/// counter), the viewer's like state, and the author summary when available.
pub fn annotate(
    posts: Vec<Post>,
    authors: &HashMap<Uuid, User>,
    viewer: Option<Uuid>,
) -> Vec<FeedPost> {
    posts
        .into_iter()
        .map(|post| {
            let total_likes = post.liked_by.len();
            let viewer_has_liked = viewer
                .map(|viewer| post.liked_by.contains(&viewer))
                .unwrap_or(false);
            let author = authors.get(&post.user_id).map(AuthorSummary::from_user);

            FeedPost {
                post,
                total_likes,
                viewer_has_liked,
                author,
            }
        })
        .collect()
}
