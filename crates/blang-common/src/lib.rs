//! Shared types for the BLang front end.
//!
//! - [`span`]: byte spans and the line/column index
//! - [`token`]: the token model and the keyword/operator tables
//! - [`error`]: lexical error kinds

pub mod error;
pub mod span;
pub mod token;
