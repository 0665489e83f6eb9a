//! Vertical card display for report rows.
//!
//! Renders one row of a report RecordBatch as a grouped, human-readable card.
//! Null and empty cells are skipped, and so are sections with nothing to show.

use std::fmt::Write;

use arrow::array::{Array, StringArray};
use arrow::record_batch::RecordBatch;
use jurimetria_core::report;
use jurimetria_store::Summary;

// ── Report section groupings ──

const CASE: &[&str] = &["Status", "Classe", "Assunto", "Foro", "Vara", "Juiz"];

const PARTIES: &[&str] = &[
    "Requerente",
    "Advogados",
    "Interessados",
    "Credores",
    "Perito/Administrador",
];

const ERROR: &[&str] = &[report::ERROR];

// ── Public API ──

/// Print row `row` of a report batch as a card.
pub fn print_case_card(batch: &RecordBatch, row: usize) {
    print!("{}", case_card(batch, row));
}

pub fn case_card(batch: &RecordBatch, row: usize) -> String {
    let mut out = String::new();
    let number = cell(batch, "Processo", row).unwrap_or_default();
    let _ = writeln!(out, "=== {number} ===");
    let _ = writeln!(out);

    section(&mut out, batch, row, "Processo", CASE);
    section(&mut out, batch, row, "Partes", PARTIES);
    section(&mut out, batch, row, "Questões", report::QUESTIONS);
    section(&mut out, batch, row, "Erro", ERROR);
    out
}

/// Print the batch summary the way `resumo.json` reports it.
pub fn print_summary(summary: &Summary) {
    match summary {
        Summary::Empty { total, .. } => {
            println!("Total: {total}");
            println!("Sucesso: 0");
        }
        Summary::Full {
            total,
            succeeded,
            questions,
        } => {
            println!("Total: {total}");
            println!("Sucesso: {succeeded}");
            println!(
                "  {:<26} {} ({})",
                "Q1 - Bancos/Veículos", questions.bank_vehicle.count, questions.bank_vehicle.share
            );
            println!(
                "  {:<26} {} ({})",
                "Q3 - Garantias", questions.guarantees.count, questions.guarantees.share
            );
            println!(
                "  {:<26} {} ({})",
                "Q4 - Essencialidade", questions.essentiality.count, questions.essentiality.share
            );
            println!(
                "  {:<26} {} ({})",
                "Q11 - Stay Period", questions.stay_period.count, questions.stay_period.share
            );
        }
    }
}

// ── Section rendering ──

fn section(out: &mut String, batch: &RecordBatch, row: usize, header: &str, cols: &[&str]) {
    let cells: Vec<(&str, &str)> = cols
        .iter()
        .filter_map(|&col| cell(batch, col, row).map(|value| (col, value)))
        .filter(|(_, value)| !value.is_empty())
        .collect();
    if cells.is_empty() {
        return;
    }

    let _ = writeln!(out, "{header}");
    for (col, value) in cells {
        let _ = writeln!(out, "  {col:<30} {value}");
    }
    let _ = writeln!(out);
}

/// Non-null Utf8 cell, if the column exists.
pub fn cell<'a>(batch: &'a RecordBatch, col: &str, row: usize) -> Option<&'a str> {
    let idx = batch.schema().index_of(col).ok()?;
    let arr = batch.column(idx).as_any().downcast_ref::<StringArray>()?;
    (row < arr.len() && !arr.is_null(row)).then(|| arr.value(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jurimetria_core::{Answers, CaseFile, CaseNumber, CaseRecord, Extraction};
    use jurimetria_store::report_batch;

    fn batch() -> RecordBatch {
        let mut file = CaseFile::default();
        file.fields.class = "Recuperação Judicial".into();
        file.parties.creditors = vec!["BANCO A".into()];
        let found = CaseRecord::from_extraction(
            CaseNumber::from("1001535-69.2025.8.26.0260"),
            Extraction::Found(file),
            |_| Answers::default(),
        );
        let failed = CaseRecord::from_extraction(
            CaseNumber::from("0000001-00.2025.8.26.0100"),
            Extraction::Failed {
                message: "timed out".into(),
            },
            |_| unreachable!(),
        );
        report_batch(&[found, failed]).unwrap()
    }

    #[test]
    fn success_card_groups_sections() {
        let card = case_card(&batch(), 0);
        assert!(card.starts_with("=== 1001535-69.2025.8.26.0260 ==="));
        assert!(card.contains("Processo\n"));
        assert!(card.contains("Recuperação Judicial"));
        assert!(card.contains("Partes\n"));
        assert!(card.contains("BANCO A"));
        assert!(card.contains("Questões\n"));
        assert!(card.contains("Q14 - AGC/Mediação"));
        // Empty cells and the empty error section are skipped.
        assert!(!card.contains("Juiz"));
        assert!(!card.contains("Erro\n"));
    }

    #[test]
    fn failure_card_has_no_answers() {
        let card = case_card(&batch(), 1);
        assert!(card.contains("Status"));
        assert!(card.contains("Erro\n"));
        assert!(card.contains("timed out"));
        assert!(!card.contains("Partes"));
        assert!(!card.contains("Questões"));
    }

    #[test]
    fn cell_out_of_range_or_missing() {
        let batch = batch();
        assert_eq!(cell(&batch, "Classe", 0), Some("Recuperação Judicial"));
        assert_eq!(cell(&batch, "Classe", 1), None);
        assert_eq!(cell(&batch, "Classe", 9), None);
        assert_eq!(cell(&batch, "nope", 0), None);
    }
}
