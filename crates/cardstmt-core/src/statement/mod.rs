//! Credit-card statement field extraction.
//!
//! Pipeline: bank identification, per-field pattern capture, normalization
//! and confidence scoring, assembled by [`StatementParser`].

pub mod fields;
pub mod identify;
pub mod normalize;
mod parser;
pub mod registry;
pub mod rules;
pub mod score;

pub use fields::{extract_fields, RawCapture, RawCaptures};
pub use identify::identify_bank;
pub use normalize::{normalize, NormalizedFields};
pub use parser::StatementParser;
pub use registry::{BankDefinition, BankProfile, PatternDefinitions, PatternRegistry, RegistryBuilder};
pub use rules::DateOrder;
pub use score::{assess, Assessment};
