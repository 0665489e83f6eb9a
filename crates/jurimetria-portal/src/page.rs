//! Parse a captured case page into an [`Extraction`].
//!
//! The element ids are those of the e-SAJ "consulta processual" (cpopg)
//! result page.

use jurimetria_core::{CaseFields, CaseFile, Extraction};
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::PortalError;
use crate::html::{first, inner_text, selector, text_of};
use crate::rows::{parse_movements, parse_parties};

pub const CLASS: &str = "#classeProcesso";
pub const RETURN_MESSAGE: &str = "#mensagemRetorno";
const SUBJECT: &str = "#assuntoProcesso";
const JUDGE: &str = "#juizProcesso";
const DISTRIBUTED_AT: &str = "#dataHoraDistribuicaoProcesso";
const FORUM: &str = "#foroProcesso";
const CHAMBER: &str = "#varaProcesso";
const PARTY_ROWS: &str = "#tablePartesPrincipais tr";
const ALL_MOVEMENT_ROWS: &str = "#tabelaTodasMovimentacoes tr";
const LAST_MOVEMENT_ROWS: &str = "#tabelaUltimasMovimentacoes tr";

/// What the browser captured after a search settled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// `document.documentElement.outerHTML`.
    pub html: String,
    /// `document.body.innerText` as rendered by the browser. When absent it is
    /// approximated from the HTML.
    pub body_text: Option<String>,
}

impl PageSnapshot {
    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            body_text: None,
        }
    }
}

/// Classify a captured page and, for a found case, read its fields, parties,
/// movements and full text.
///
/// A page with neither the class field nor a return message is reported as
/// not found with an empty message.
pub fn parse_snapshot(snapshot: &PageSnapshot) -> Result<Extraction, PortalError> {
    let doc = Html::parse_document(&snapshot.html);

    if first(&doc, CLASS)?.is_some() {
        return Ok(Extraction::Found(read_case_file(&doc, snapshot)?));
    }

    let message = text_of(&doc, RETURN_MESSAGE)?.unwrap_or_default();
    Ok(Extraction::NotFound { message })
}

fn read_case_file(doc: &Html, snapshot: &PageSnapshot) -> Result<CaseFile, PortalError> {
    let mut misses = Vec::new();
    let mut optional = |name: &str, value: Option<String>| {
        value.unwrap_or_else(|| {
            warn!(field = name, "field not found on case page, left empty");
            misses.push(name.to_string());
            String::new()
        })
    };

    let fields = CaseFields {
        class: text_of(doc, CLASS)?.unwrap_or_default(),
        subject: optional("subject", text_of(doc, SUBJECT)?),
        forum: optional("forum", labelled(doc, FORUM, "Foro")?),
        chamber: optional("chamber", labelled(doc, CHAMBER, "Vara")?),
        judge: optional("judge", text_of(doc, JUDGE)?),
        distributed_at: optional("distributed_at", text_of(doc, DISTRIBUTED_AT)?),
    };

    let party_rows = row_texts(doc, PARTY_ROWS)?;
    if party_rows.is_empty() {
        warn!("parties table not found");
    }
    let parties = parse_parties(&party_rows);

    let mut movement_rows = row_texts(doc, ALL_MOVEMENT_ROWS)?;
    if movement_rows.is_empty() {
        movement_rows = row_texts(doc, LAST_MOVEMENT_ROWS)?;
    }
    if movement_rows.is_empty() {
        warn!("movements table not found");
    }
    let movements = parse_movements(&movement_rows);

    let full_text = match &snapshot.body_text {
        Some(text) => text.clone(),
        None => first(doc, "body")?.map(inner_text).unwrap_or_default(),
    };

    Ok(CaseFile {
        fields,
        parties,
        movements,
        full_text,
        misses,
    })
}

/// Read a field by id, falling back to the last `span` next to a `span`
/// whose text contains `label`.
fn labelled(doc: &Html, id: &str, label: &str) -> Result<Option<String>, PortalError> {
    if let Some(text) = text_of(doc, id)? {
        return Ok(Some(text));
    }

    let spans = selector("span")?;
    let Some(label_span) = doc.select(&spans).find(|s| inner_text(*s).contains(label)) else {
        return Ok(None);
    };
    let value = label_span
        .parent()
        .and_then(ElementRef::wrap)
        .and_then(|parent| parent.select(&spans).last())
        .filter(|span| *span != label_span)
        .map(|span| inner_text(span).trim().to_string())
        .filter(|text| !text.is_empty());
    Ok(value)
}

fn row_texts(doc: &Html, css: &str) -> Result<Vec<String>, PortalError> {
    let rows = selector(css)?;
    Ok(doc
        .select(&rows)
        .map(inner_text)
        .filter(|t| !t.trim().is_empty())
        .collect())
}
