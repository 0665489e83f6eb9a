//! Heuristic analysis layer: keyword lexicons, ordered rule chains, and the
//! [`Analyzer`] that turns an extracted case into typed answers.

mod analyzer;
pub mod corpus;
pub mod lexicon;
pub mod rules;

pub use analyzer::Analyzer;
pub use corpus::CaseText;
pub use lexicon::Lexicon;
