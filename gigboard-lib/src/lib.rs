//! Storage and domain logic for Gigboard.
//!
//! The [`Repository`] owns every gig, singer, and status assignment. The [`board`] and
//! [`sheet`] modules hold the pure logic behind the two ways of editing assignments.

use std::path::PathBuf;

use thiserror::Error;

pub mod board;
pub mod fs;
pub mod repository;
pub mod sheet;

pub use repository::Repository;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Entity(#[from] repository::entities::Error),
    #[error(transparent)]
    Config(#[from] repository::config::Error),
    #[error("Path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),
    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
}
