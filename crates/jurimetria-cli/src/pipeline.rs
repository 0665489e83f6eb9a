//! Batch pipeline: look up each case in order, classify the ones found, and
//! pause between cases.

use std::time::Duration;

use jurimetria_analysis::Analyzer;
use jurimetria_core::{CaseNumber, CaseRecord, Extraction};
use jurimetria_portal::{CaseSource, extract_case};
use tracing::info;

/// Process `cases` strictly in order. Every case yields exactly one record;
/// a failing case never stops the batch. `cooldown` is slept between cases,
/// not after the last one.
pub async fn run_batch<S>(
    source: &mut S,
    cases: &[CaseNumber],
    analyzer: &Analyzer,
    cooldown: Duration,
) -> Vec<CaseRecord>
where
    S: CaseSource + ?Sized,
{
    let mut records = Vec::with_capacity(cases.len());

    for (i, number) in cases.iter().enumerate() {
        info!(case = %number, position = i + 1, total = cases.len(), "processing case");
        let extraction = extract_case(source, number).await;
        let record = CaseRecord::from_extraction(number.clone(), extraction, |file| {
            analyzer.analyze(file)
        });
        info!(case = %number, status = record.status.as_str(), "case done");
        records.push(record);

        if i + 1 < cases.len() && !cooldown.is_zero() {
            info!(secs = cooldown.as_secs_f64(), "cooling down");
            tokio::time::sleep(cooldown).await;
        }
    }

    records
}

/// Records for a batch that could not start, e.g. when no browser launched.
pub fn fail_all(cases: &[CaseNumber], message: &str) -> Vec<CaseRecord> {
    cases
        .iter()
        .map(|number| {
            CaseRecord::from_extraction(
                number.clone(),
                Extraction::Failed {
                    message: message.to_string(),
                },
                |_| unreachable!("failed extractions are never classified"),
            )
        })
        .collect()
}

/// Screenshot file name for a probed case, after its outcome.
pub fn screenshot_name(number: &CaseNumber, extraction: &Extraction) -> String {
    let outcome = match extraction {
        Extraction::Found(_) => "resultado",
        Extraction::NotFound { message } if message.is_empty() => "desconhecido",
        Extraction::NotFound { .. } | Extraction::Failed { .. } => "erro",
    };
    format!("{outcome}_{}.png", number.digits())
}
