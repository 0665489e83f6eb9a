//! Case records as extracted from the e-SAJ portal.
//!
//! Extraction produces an [`Extraction`] outcome; a [`CaseRecord`] is built
//! from it exactly once and is read-only afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::answers::Answers;

/// Number of trailing digits that form the forum code in a unified case number.
pub const FORUM_DIGITS: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaseNumberError {
    #[error("case number {raw:?} has {digits} digits, need more than {FORUM_DIGITS}")]
    TooShort { raw: String, digits: usize },
}

/// A case number as typed by the user, e.g. `1001535-69.2025.8.26.0260`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseNumber(String);

impl CaseNumber {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The number as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ASCII digits only, punctuation dropped.
    pub fn digits(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// Split into the two inputs of the unified search form: every digit but
    /// the last four, then the four-digit forum code.
    ///
    /// `"1001535-69.2025.8.26.0260"` → `("1001535692025826", "0260")`
    pub fn unified_parts(&self) -> Result<(String, String), CaseNumberError> {
        let digits = self.digits();
        if digits.len() <= FORUM_DIGITS {
            return Err(CaseNumberError::TooShort {
                raw: self.0.clone(),
                digits: digits.len(),
            });
        }
        let (head, forum) = digits.split_at(digits.len() - FORUM_DIGITS);
        Ok((head.to_string(), forum.to_string()))
    }
}

impl std::fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CaseNumber {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Lifecycle status of a case record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    #[default]
    Pending,
    Success,
    NotFound,
    Error,
}

impl CaseStatus {
    /// Label used in the report's `Status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Success => "Sucesso",
            Self::NotFound => "Não encontrado",
            Self::Error => "Erro",
        }
    }
}

/// Labelled header fields of a case page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFields {
    /// Procedural class, e.g. "Recuperação Judicial" or "Tutela Cautelar Antecedente".
    pub class: String,
    pub subject: String,
    pub forum: String,
    /// Court chamber ("vara").
    pub chamber: String,
    pub judge: String,
    pub distributed_at: String,
}

/// Parties of a case. List fields keep source order and duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parties {
    pub plaintiff: String,
    pub plaintiff_counsel: Vec<String>,
    pub interested: Vec<String>,
    pub creditors: Vec<String>,
    /// Court-appointed expert or judicial administrator.
    pub guardian: String,
}

/// One line of the docket, as presented by the portal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub date: String,
    pub description: String,
}

/// Everything read from a case page that was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFile {
    pub fields: CaseFields,
    pub parties: Parties,
    pub movements: Vec<Movement>,
    /// Inner text of the whole page body.
    pub full_text: String,
    /// Optional fields that could not be read and were left empty.
    pub misses: Vec<String>,
}

impl CaseFile {
    /// Whether any optional field was left empty because it could not be read.
    pub fn is_partial(&self) -> bool {
        !self.misses.is_empty()
    }
}

/// Result of driving one case through the portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(CaseFile),
    /// The portal answered with an explicit message instead of a case page.
    NotFound { message: String },
    /// Navigation or parsing broke; the message is the error text.
    Failed { message: String },
}

/// One row of the study: a requested case number and what came of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseRecord {
    pub number: CaseNumber,
    pub status: CaseStatus,
    pub error: String,
    pub file: Option<CaseFile>,
    pub answers: Option<Answers>,
}

impl CaseRecord {
    /// A record for a case that has not been processed yet.
    pub fn pending(number: CaseNumber) -> Self {
        Self {
            number,
            status: CaseStatus::Pending,
            error: String::new(),
            file: None,
            answers: None,
        }
    }

    /// Build the final record from an extraction outcome.
    ///
    /// `classify` runs only for [`Extraction::Found`], so answers exist iff
    /// the status is [`CaseStatus::Success`].
    pub fn from_extraction(
        number: CaseNumber,
        extraction: Extraction,
        classify: impl FnOnce(&CaseFile) -> Answers,
    ) -> Self {
        match extraction {
            Extraction::Found(file) => {
                let answers = classify(&file);
                Self {
                    number,
                    status: CaseStatus::Success,
                    error: String::new(),
                    file: Some(file),
                    answers: Some(answers),
                }
            }
            Extraction::NotFound { message } => Self {
                number,
                status: CaseStatus::NotFound,
                error: message,
                file: None,
                answers: None,
            },
            Extraction::Failed { message } => Self {
                number,
                status: CaseStatus::Error,
                error: message,
                file: None,
                answers: None,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CaseStatus::Success
    }
}
