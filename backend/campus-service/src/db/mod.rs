/// Database access layer
///
/// Thin wrappers over the store's find/insert/update operations. All
/// functions are free functions over `&PgPool` and surface `sqlx::Error`;
/// mapping into the service error taxonomy happens one layer up.
pub mod posts;
pub mod users;
