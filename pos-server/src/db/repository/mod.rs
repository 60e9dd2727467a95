//! Repositories: one module per aggregate, free functions over the pool

pub mod bill;
pub mod customer;
pub mod product;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => RepoError::NotFound(e.to_string()),
            _ => RepoError::Database(e.to_string()),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
