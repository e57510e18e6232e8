//! Result presenter adapters
//!
//! The engine produces plain numbers; these adapters shape them for display.
//! `SavingsReport` is the single view model, formatters are interchangeable.

pub mod types;
pub mod markdown;
pub mod json;

pub use types::{ComparisonBar, DemandRow, SavingsReport, ScenarioSummary};
pub use markdown::MarkdownFormatter;
pub use json::JsonFormatter;
