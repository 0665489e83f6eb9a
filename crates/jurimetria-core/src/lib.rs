pub mod answers;
pub mod case;
pub mod schema;

pub use answers::Answers;
pub use case::{
    CaseFields, CaseFile, CaseNumber, CaseNumberError, CaseRecord, CaseStatus, Extraction,
    Movement, Parties,
};
pub use schema::report;
