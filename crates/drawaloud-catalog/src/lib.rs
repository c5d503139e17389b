#![deny(unsafe_code)]

//! Loading the prompt catalog.
//!
//! A catalog is a JSON array of prompt records. An optional Markdown file can
//! supply longer descriptions, one `## <prompt id>` section per prompt. A
//! catalog that cannot be read or parsed is not fatal: callers use
//! [`load_catalog_or_empty`] and the session starts with navigation disabled.

pub mod builtin;
pub mod descriptions;
pub mod error;
pub mod loader;

pub use crate::builtin::builtin_catalog;
pub use crate::descriptions::{apply_descriptions, load_descriptions, parse_descriptions};
pub use crate::error::CatalogError;
pub use crate::loader::{
    CATALOG_ENV_VAR, catalog_path_from_env, load_catalog, load_catalog_or_empty, parse_catalog,
};
