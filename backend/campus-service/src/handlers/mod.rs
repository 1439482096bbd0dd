/// HTTP request handlers
pub mod health;
pub mod posts;
pub mod users;

pub use health::*;
pub use posts::*;
pub use users::*;
