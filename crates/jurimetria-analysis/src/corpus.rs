//! Lowercased text blobs the rules are evaluated against.

use jurimetria_core::CaseFile;

/// The texts of one case, lowercased once up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseText {
    /// Whole page text.
    pub full: String,
    /// Movement descriptions joined by spaces, in docket order.
    pub movements: String,
    /// Plaintiff, interested parties and creditors joined by spaces.
    pub parties: String,
    pub class: String,
    pub subject: String,
}

impl CaseText {
    pub fn from_file(file: &CaseFile) -> Self {
        let movements = file
            .movements
            .iter()
            .map(|m| m.description.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let p = &file.parties;
        let parties = format!(
            "{} {} {}",
            p.plaintiff,
            p.interested.join(" "),
            p.creditors.join(" ")
        );

        Self {
            full: file.full_text.to_lowercase(),
            movements: movements.to_lowercase(),
            parties: parties.to_lowercase(),
            class: file.fields.class.to_lowercase(),
            subject: file.fields.subject.to_lowercase(),
        }
    }
}
