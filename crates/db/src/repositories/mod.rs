//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Soft delete is an explicit
//! `deleted_at IS NULL` / `IS NOT NULL` predicate in each query; there is no
//! implicit scoping.

pub mod category_repo;
pub mod notification_repo;
pub mod offer_repo;
pub mod revoked_token_repo;
pub mod store_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use notification_repo::NotificationRepo;
pub use offer_repo::OfferRepo;
pub use revoked_token_repo::RevokedTokenRepo;
pub use store_repo::StoreRepo;
pub use user_repo::UserRepo;
