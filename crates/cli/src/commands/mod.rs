//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

/// Read the database URL the same way the API does: `AZUR_DATABASE_URL`
/// with a fallback to the generic `DATABASE_URL`.
pub(crate) fn database_url() -> Option<String> {
    std::env::var("AZUR_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}
