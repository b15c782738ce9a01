#![deny(unsafe_code)]

pub mod error;
pub mod file;
pub mod hash;
pub mod registry;

pub use crate::error::{Result, StandardsError};
pub use crate::file::{StandardsFile, parse_standards_file};
pub use crate::registry::{StandardsRegistry, StandardsSource, default_standards_root};
