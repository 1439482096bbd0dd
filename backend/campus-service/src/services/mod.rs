/// Business logic layer
pub mod feed;
pub mod likes;
pub mod posts;
pub mod users;

pub use feed::{FeedQuery, FeedService};
pub use likes::LikeService;
pub use posts::PostService;
pub use users::UserService;
