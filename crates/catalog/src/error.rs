use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Class name is empty: cannot derive a display name")]
    InvalidName,

    #[error("Duplicate model name: {0}")]
    DuplicateModel(String),
}
