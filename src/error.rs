use crate::store::StoreError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError
{
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("location catalog is empty")]
    EmptyCatalog,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
