/// Feed ranking and personalization tests
/// Covers the selection policy, the stable popularity sort, and display
/// annotation through the public library API.
use std::collections::HashMap;

use campus_service::models::{Post, User, CATEGORIES};
use campus_service::services::feed::{
    annotate, is_broad_interest, personalized_scope, rank_by_likes, FeedScope,
};
use campus_service::services::users::profile_stats;
use chrono::{Duration, Utc};
use sqlx::types::Json;
use uuid::Uuid;

fn post_with_likes(category: &str, likes: i32, minutes_ago: i64) -> Post {
    let liked_by = (0..likes).map(|_| Uuid::new_v4()).collect();
    Post {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        title: String::new(),
        content: format!("{} / {} likes", category, likes),
        category: category.to_string(),
        image_url: None,
        created_at: Utc::now() - Duration::minutes(minutes_ago),
        active: true,
        likes,
        liked_by,
        comments: Json(vec![]),
    }
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ============================================
// Ranking
// ============================================

#[test]
fn test_feed_sort_is_stable_for_equal_likes() {
    // Insertion order (most recent first): 3a, 5, 3b, 1.
    let three_newer = post_with_likes("general", 3, 5);
    let three_older = post_with_likes("general", 3, 30);
    let newer_id = three_newer.id;
    let older_id = three_older.id;

    let mut posts = vec![
        three_newer,
        post_with_likes("eventos", 5, 10),
        three_older,
        post_with_likes("ayuda", 1, 45),
    ];
    rank_by_likes(&mut posts);

    let likes: Vec<i32> = posts.iter().map(|p| p.likes).collect();
    assert_eq!(likes, vec![5, 3, 3, 1]);

    // The two 3-like posts keep their prior relative order.
    assert_eq!(posts[1].id, newer_id);
    assert_eq!(posts[2].id, older_id);
}

#[test]
fn test_ranking_is_by_counter_not_recency() {
    let mut posts = vec![
        post_with_likes("general", 0, 1),
        post_with_likes("general", 9, 500),
    ];
    rank_by_likes(&mut posts);
    assert_eq!(posts[0].likes, 9);
}

// ============================================
// Personalization policy
// ============================================

#[test]
fn test_full_interest_coverage_matches_unfiltered_listing() {
    // Covering the whole canonical vocabulary widens the feed to everything.
    let all: Vec<String> = CATEGORIES.iter().map(|c| c.to_string()).collect();
    assert_eq!(personalized_scope(&all), FeedScope::Everything);
}

#[test]
fn test_canonical_first_four_subset_is_broad() {
    assert!(is_broad_interest(&tags(&[
        "general", "academico", "eventos", "ayuda"
    ])));
}

#[test]
fn test_no_interests_falls_back_to_everything() {
    assert_eq!(personalized_scope(&[]), FeedScope::Everything);
}

#[test]
fn test_narrow_interests_filter_by_membership() {
    let scope = personalized_scope(&tags(&["eventos", "social"]));
    match scope {
        FeedScope::Categories(categories) => {
            assert_eq!(categories, tags(&["eventos", "social"]));
        }
        FeedScope::Everything => panic!("two narrow interests must not widen the feed"),
    }
}

#[test]
fn test_duplicated_interests_do_not_reach_the_threshold() {
    assert!(!is_broad_interest(&tags(&[
        "eventos", "eventos", "eventos", "eventos"
    ])));
}

// ============================================
// Annotation
// ============================================

#[test]
fn test_total_likes_tracks_the_liker_set() {
    let viewer = Uuid::new_v4();
    let mut post = post_with_likes("general", 0, 0);
    post.liked_by = vec![viewer, Uuid::new_v4(), Uuid::new_v4()];

    let annotated = annotate(vec![post], &HashMap::new(), Some(viewer));

    assert_eq!(annotated[0].total_likes, 3);
    assert!(annotated[0].viewer_has_liked);
}

#[test]
fn test_anonymous_viewer_gets_no_like_flags() {
    let mut post = post_with_likes("general", 2, 0);
    post.liked_by = vec![Uuid::new_v4(), Uuid::new_v4()];

    let annotated = annotate(vec![post], &HashMap::new(), None);
    assert!(!annotated[0].viewer_has_liked);
}

#[test]
fn test_unresolvable_author_does_not_drop_the_post() {
    let author = User {
        id: Uuid::new_v4(),
        name: "Valentina".to_string(),
        email: "valentina@ucc.edu.co".to_string(),
        password_hash: "hash".to_string(),
        university: Some("UCC".to_string()),
        degree: Some("Derecho".to_string()),
        interests: tags(&["ayuda"]),
        created_at: Utc::now(),
        active: true,
        followers: vec![],
        following: vec![],
    };

    let mut resolved = post_with_likes("ayuda", 1, 0);
    resolved.user_id = author.id;
    let orphaned = post_with_likes("general", 4, 10);

    let mut authors = HashMap::new();
    authors.insert(author.id, author);

    let mut posts = vec![resolved, orphaned];
    rank_by_likes(&mut posts);
    let annotated = annotate(posts, &authors, None);

    assert_eq!(annotated.len(), 2);
    // The orphaned post ranked first on likes and lost only its author block.
    assert!(annotated[0].author.is_none());
    let summary = annotated[1].author.as_ref().expect("author resolves");
    assert_eq!(summary.degree, "Derecho");
}

// ============================================
// Profile statistics
// ============================================

#[test]
fn test_profile_stats_over_ranked_posts() {
    let posts = vec![
        post_with_likes("eventos", 5, 1),
        post_with_likes("eventos", 0, 2),
        post_with_likes("general", 3, 3),
    ];
    let stats = profile_stats(&posts, Utc::now());

    assert_eq!(stats.total_posts, 3);
    assert_eq!(stats.total_likes_received, 8);
    assert_eq!(stats.favorite_category, "eventos");
}
