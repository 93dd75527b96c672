#![forbid(unsafe_code)]

pub mod baserow;
pub mod repository;

pub use baserow::{BaserowConfig, BaserowInitError, BaserowStore};
pub use repository::{Store, StorageError};
