//! Utility modules shared by the loader and normalizer
//!
//! - Schema: explicit column contracts validated once at load time
//! - Format: number formatting for presenter adapters

pub mod schema;
pub mod format;

// Re-export commonly used items
pub use schema::{SchemaContract, trim_column_names, materialize_with_contract};
pub use format::{format_gallons, format_dollars, format_thousands};
