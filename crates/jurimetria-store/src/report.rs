use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch, StringArray};
use chrono::NaiveDateTime;
use jurimetria_core::{CaseRecord, report};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::info;

use crate::StoreError;

/// How many entries of a list column make it into the report.
const LIST_PREVIEW: usize = 2;

/// Where a report was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub csv: PathBuf,
    pub parquet: PathBuf,
}

/// `relatorio_jurimetria_YYYYMMDD_HHMMSS`, without extension.
pub fn default_report_name(at: NaiveDateTime) -> String {
    format!("relatorio_jurimetria_{}", at.format("%Y%m%d_%H%M%S"))
}

/// One report row per record, in input order.
///
/// Case fields are null for records without a case file and answers are
/// null for records that were not classified.
pub fn report_batch(records: &[CaseRecord]) -> Result<RecordBatch, StoreError> {
    let schema = report::report_schema();
    let mut columns: Vec<Vec<Option<String>>> = (0..schema.fields().len())
        .map(|_| Vec::with_capacity(records.len()))
        .collect();

    for record in records {
        for (column, value) in columns.iter_mut().zip(row(record)) {
            column.push(value);
        }
    }

    let arrays: Vec<ArrayRef> = columns
        .into_iter()
        .map(|values| Arc::new(StringArray::from(values)) as ArrayRef)
        .collect();
    Ok(RecordBatch::try_new(Arc::new(schema), arrays)?)
}

fn row(record: &CaseRecord) -> Vec<Option<String>> {
    let mut row = Vec::with_capacity(report::IDENTITY.len() + report::QUESTIONS.len() + 1);
    row.push(Some(record.number.to_string()));
    row.push(Some(record.status.as_str().to_string()));

    match &record.file {
        Some(file) => {
            let f = &file.fields;
            let p = &file.parties;
            row.extend(
                [
                    f.class.clone(),
                    f.subject.clone(),
                    f.forum.clone(),
                    f.chamber.clone(),
                    f.judge.clone(),
                    p.plaintiff.clone(),
                    preview(&p.plaintiff_counsel),
                    preview(&p.interested),
                    preview(&p.creditors),
                    p.guardian.clone(),
                ]
                .map(Some),
            );
        }
        None => row.extend(std::iter::repeat_n(None, report::IDENTITY.len() - 2)),
    }

    match &record.answers {
        Some(answers) => row.extend(answers.labels().map(Some)),
        None => row.extend(std::iter::repeat_n(None, report::QUESTIONS.len())),
    }

    row.push((!record.error.is_empty()).then(|| record.error.clone()));
    row
}

fn preview(names: &[String]) -> String {
    names
        .iter()
        .take(LIST_PREVIEW)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Write `batch` as `<stem>.csv` and `<stem>.parquet` under `dir`, creating
/// `dir` if needed.
pub fn write_report(batch: &RecordBatch, dir: &Path, stem: &str) -> Result<ReportPaths, StoreError> {
    std::fs::create_dir_all(dir)?;
    let paths = ReportPaths {
        csv: dir.join(format!("{stem}.csv")),
        parquet: dir.join(format!("{stem}.parquet")),
    };

    let mut csv = arrow::csv::WriterBuilder::new()
        .with_header(true)
        .build(File::create(&paths.csv)?);
    csv.write(batch)?;
    info!(path = %paths.csv.display(), rows = batch.num_rows(), "wrote CSV report");

    let mut parquet = ArrowWriter::try_new(File::create(&paths.parquet)?, batch.schema(), None)?;
    parquet.write(batch)?;
    parquet.close()?;
    info!(path = %paths.parquet.display(), rows = batch.num_rows(), "wrote Parquet report");

    Ok(paths)
}

/// Read a Parquet file into Arrow RecordBatches.
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    if !path.exists() {
        return Err(StoreError::ParquetNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}
