// Re-export the Database struct and other public items
mod article;
pub mod core;
pub mod query;
mod schema;

// Re-export Database and essential traits
pub use self::article::Article;
pub use self::core::Database;
pub use self::core::StorageUnavailableExt;
pub use self::query::{age_cutoff, ArticleFilter, LocationAggregate, Stats};
pub use sqlx::Row;
