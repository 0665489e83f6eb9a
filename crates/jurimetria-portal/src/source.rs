use async_trait::async_trait;
use jurimetria_core::{CaseNumber, Extraction};
use tracing::{info, warn};

use crate::PortalError;
use crate::page::{PageSnapshot, parse_snapshot};

/// Anything that can search a case number and hand back the settled page.
///
/// The browser session implements this; tests and offline runs use canned
/// pages.
#[async_trait]
pub trait CaseSource: Send {
    async fn fetch(&mut self, number: &CaseNumber) -> Result<PageSnapshot, PortalError>;
}

/// Look up one case. Never fails: every error becomes
/// [`Extraction::Failed`] with its message.
pub async fn extract_case<S>(source: &mut S, number: &CaseNumber) -> Extraction
where
    S: CaseSource + ?Sized,
{
    if let Err(e) = number.unified_parts() {
        warn!(case = %number, error = %e, "rejecting case number");
        return Extraction::Failed {
            message: PortalError::from(e).to_string(),
        };
    }

    info!(case = %number, "searching case");
    let outcome = match source.fetch(number).await {
        Ok(snapshot) => parse_snapshot(&snapshot),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(Extraction::Found(file)) => {
            info!(
                case = %number,
                parties = file.parties.creditors.len() + file.parties.interested.len(),
                movements = file.movements.len(),
                partial = file.is_partial(),
                "case extracted"
            );
            Extraction::Found(file)
        }
        Ok(Extraction::NotFound { message }) => {
            warn!(case = %number, message = %message, "case not found");
            Extraction::NotFound { message }
        }
        Ok(failed @ Extraction::Failed { .. }) => failed,
        Err(e) => {
            warn!(case = %number, error = %e, "extraction failed");
            Extraction::Failed {
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// Serves canned pages by case number.
    #[derive(Default)]
    struct Canned {
        pages: HashMap<String, String>,
        calls: usize,
    }

    #[async_trait]
    impl CaseSource for Canned {
        async fn fetch(&mut self, number: &CaseNumber) -> Result<PageSnapshot, PortalError> {
            self.calls += 1;
            match self.pages.get(number.as_str()) {
                Some(html) => Ok(PageSnapshot::from_html(html.clone())),
                None => Err(PortalError::Timeout {
                    what: "result page".into(),
                    ms: 30_000,
                }),
            }
        }
    }

    const CASE: &str = "1001535-69.2025.8.26.0260";

    #[tokio::test]
    async fn found_page_is_extracted() {
        let mut source = Canned::default();
        source.pages.insert(
            CASE.into(),
            r#"<span id="classeProcesso">Recuperação Judicial</span>"#.into(),
        );
        let outcome = extract_case(&mut source, &CaseNumber::from(CASE)).await;
        match outcome {
            Extraction::Found(file) => assert_eq!(file.fields.class, "Recuperação Judicial"),
            other => panic!("expected found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn message_page_is_not_found() {
        let mut source = Canned::default();
        source.pages.insert(
            CASE.into(),
            r#"<td id="mensagemRetorno">Não existem informações</td>"#.into(),
        );
        let outcome = extract_case(&mut source, &CaseNumber::from(CASE)).await;
        assert_eq!(
            outcome,
            Extraction::NotFound {
                message: "Não existem informações".into()
            }
        );
    }

    #[tokio::test]
    async fn source_errors_become_failed() {
        let mut source = Canned::default();
        let outcome = extract_case(&mut source, &CaseNumber::from(CASE)).await;
        match outcome {
            Extraction::Failed { message } => assert!(message.contains("timed out")),
            other => panic!("expected failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn short_number_is_rejected_without_fetching() {
        let mut source = Canned::default();
        let outcome = extract_case(&mut source, &CaseNumber::from("12-3")).await;
        assert!(matches!(outcome, Extraction::Failed { .. }));
        assert_eq!(source.calls, 0);
    }

    #[tokio::test]
    async fn works_through_a_trait_object() {
        let mut source = Canned::default();
        let dynamic: &mut dyn CaseSource = &mut source;
        let outcome = extract_case(dynamic, &CaseNumber::from(CASE)).await;
        assert!(matches!(outcome, Extraction::Failed { .. }));
    }
}
