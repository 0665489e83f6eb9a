//! Parsers for the parties and movements tables.
//!
//! Both take the inner text of each table row. Extraction is best effort:
//! rows that do not fit are skipped, never fatal.

use jurimetria_core::{Movement, Parties};

/// Role of the party a row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    Plaintiff,
    Interested,
    Creditor,
    Guardian,
}

impl PartyRole {
    /// Classify a row by its participation label. First match wins.
    pub fn classify(row: &str) -> Option<Self> {
        if row.contains("Reqte") || row.contains("Requerente") {
            Some(Self::Plaintiff)
        } else if row.contains("Interessado") || row.contains("Interessd") {
            Some(Self::Interested)
        } else if row.contains("Credor") {
            Some(Self::Creditor)
        } else if row.contains("Perito") {
            Some(Self::Guardian)
        } else {
            None
        }
    }
}

const COUNSEL_LABELS: &[&str] = &["Advogado:", "Advogada:"];

/// Fold party rows into [`Parties`].
///
/// Counsel lines are attributed to the plaintiff when the latest
/// plaintiff/interested/creditor row seen was a plaintiff row, so counsel-only
/// rows that follow the plaintiff still count.
pub fn parse_parties<S: AsRef<str>>(rows: &[S]) -> Parties {
    let mut parties = Parties::default();
    let mut current: Option<PartyRole> = None;

    for row in rows {
        let row = row.as_ref().trim();
        let role = PartyRole::classify(row);

        match role {
            Some(PartyRole::Plaintiff) => {
                current = role;
                if let Some(name) = party_name(row) {
                    parties.plaintiff = name;
                }
            }
            Some(PartyRole::Interested) => {
                current = role;
                parties.interested.extend(party_name(row));
            }
            Some(PartyRole::Creditor) => {
                current = role;
                parties.creditors.extend(party_name(row));
            }
            Some(PartyRole::Guardian) => {
                if let Some(name) = party_name(row) {
                    parties.guardian = name;
                }
            }
            None => {}
        }

        if current == Some(PartyRole::Plaintiff) {
            parties.plaintiff_counsel.extend(counsel(row));
        }
    }

    parties
}

/// Name of the party in a row.
///
/// Taken from the first `Label: Name` line, not a counsel line, whose name is
/// long enough; when there is none, from the last cell of the first line
/// (`Reqte\tNAME`).
fn party_name(row: &str) -> Option<String> {
    let long_enough = |name: &&str| name.chars().count() > 2;

    row.lines()
        .filter(|line| line.contains(':') && !line.contains("Advogad"))
        .find_map(|line| line.rsplit(':').next().map(str::trim).filter(long_enough))
        .or_else(|| {
            let first = row.lines().next()?;
            let mut cells = first.split('\t').map(str::trim).filter(|c| !c.is_empty());
            let _label = cells.next()?;
            cells.last().filter(long_enough)
        })
        .map(str::to_string)
}

fn counsel(row: &str) -> Vec<String> {
    row.lines()
        .filter(|line| COUNSEL_LABELS.iter().any(|l| line.contains(l)))
        .map(|line| {
            COUNSEL_LABELS
                .iter()
                .fold(line.to_string(), |acc, l| acc.replace(l, ""))
                .trim()
                .to_string()
        })
        .filter(|name| name.chars().count() > 3)
        .collect()
}

/// Length of the date prefix of a movement row (`dd/mm/yyyy`).
const DATE_CHARS: usize = 10;

/// Rows this short carry no movement.
const MIN_ROW_CHARS: usize = 5;

/// Parse movement rows, keeping source order.
pub fn parse_movements<S: AsRef<str>>(rows: &[S]) -> Vec<Movement> {
    rows.iter()
        .filter_map(|row| parse_movement(row.as_ref()))
        .collect()
}

fn parse_movement(row: &str) -> Option<Movement> {
    let row = row.trim();
    if row.chars().count() <= MIN_ROW_CHARS {
        return None;
    }

    let mut lines = row.lines();
    let first = lines.next()?.trim();
    let rest: Vec<&str> = lines.map(str::trim).filter(|l| !l.is_empty()).collect();

    if rest.is_empty() {
        return Some(Movement {
            date: String::new(),
            description: row.to_string(),
        });
    }

    let date: String = first.chars().take(DATE_CHARS).collect();
    // Text sharing the date line (`24/03/2025\tDecisão`) heads the description.
    let head = first.chars().skip(DATE_CHARS).collect::<String>();
    let head = head.trim();

    let mut parts = Vec::with_capacity(rest.len() + 1);
    if !head.is_empty() {
        parts.push(head);
    }
    parts.extend(rest);

    Some(Movement {
        date: date.trim().to_string(),
        description: parts.join(" "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_roles() {
        assert_eq!(PartyRole::classify("Reqte\tX"), Some(PartyRole::Plaintiff));
        assert_eq!(
            PartyRole::classify("Requerente: X"),
            Some(PartyRole::Plaintiff)
        );
        assert_eq!(
            PartyRole::classify("Interessd.: X"),
            Some(PartyRole::Interested)
        );
        assert_eq!(PartyRole::classify("Credor: X"), Some(PartyRole::Creditor));
        assert_eq!(PartyRole::classify("Perito: X"), Some(PartyRole::Guardian));
        assert_eq!(PartyRole::classify("Advogado: X"), None);
    }

    #[test]
    fn labelled_rows() {
        let rows = [
            "Requerente: METALCORE INDÚSTRIA LTDA\nAdvogado: CARLOS ALBERTO",
            "Interessado: BANCO BRADESCO S.A.",
            "Credor: MILLS PESADOS S.A.",
            "Perito: ADMJUD CONSULTORIA",
        ];
        let p = parse_parties(&rows);
        assert_eq!(p.plaintiff, "METALCORE INDÚSTRIA LTDA");
        assert_eq!(p.plaintiff_counsel, vec!["CARLOS ALBERTO"]);
        assert_eq!(p.interested, vec!["BANCO BRADESCO S.A."]);
        assert_eq!(p.creditors, vec!["MILLS PESADOS S.A."]);
        assert_eq!(p.guardian, "ADMJUD CONSULTORIA");
    }

    #[test]
    fn tabular_rows_fall_back_to_last_cell() {
        let rows = [
            "Reqte\tMETALCORE LTDA\nAdvogado: ANA SOUZA\nAdvogada: BEATRIZ LIMA",
            "Credor\tBANCO SAFRA S/A\nAdvogado: OUTRO ADVOGADO",
        ];
        let p = parse_parties(&rows);
        assert_eq!(p.plaintiff, "METALCORE LTDA");
        assert_eq!(p.plaintiff_counsel, vec!["ANA SOUZA", "BEATRIZ LIMA"]);
        assert_eq!(p.creditors, vec!["BANCO SAFRA S/A"]);
    }

    #[test]
    fn counsel_only_rows_follow_the_plaintiff() {
        let rows = [
            "Reqte: EMPRESA X",
            "Advogado: PRIMEIRO NOME",
            "Perito: FULANO PERITO",
            "Advogado: SEGUNDO NOME",
            "Credor: BANCO Y",
            "Advogado: DO CREDOR",
        ];
        let p = parse_parties(&rows);
        assert_eq!(p.plaintiff_counsel, vec!["PRIMEIRO NOME", "SEGUNDO NOME"]);
        assert_eq!(p.guardian, "FULANO PERITO");
    }

    #[test]
    fn lists_keep_duplicates_and_order() {
        let rows = ["Credor: B", "Credor: BANCO A", "Credor: BANCO A", "Credor: BANCO C"];
        let p = parse_parties(&rows);
        // "B" is too short to be a name.
        assert_eq!(p.creditors, vec!["BANCO A", "BANCO A", "BANCO C"]);
    }

    #[test]
    fn short_counsel_names_and_malformed_rows_are_skipped() {
        let rows = ["", "???", "Reqte: EMPRESA Z\nAdvogado: AB", "\t\t"];
        let p = parse_parties(&rows);
        assert_eq!(p.plaintiff, "EMPRESA Z");
        assert!(p.plaintiff_counsel.is_empty());
    }

    #[test]
    fn short_labelled_lines_do_not_hide_the_name() {
        let rows = [
            "Credor: X\nRazão social: BANCO REAL S.A.",
            "Reqte: \nNome: EMPRESA W LTDA\nAdvogado: ANA SOUZA",
        ];
        let p = parse_parties(&rows);
        assert_eq!(p.creditors, vec!["BANCO REAL S.A."]);
        assert_eq!(p.plaintiff, "EMPRESA W LTDA");
        assert_eq!(p.plaintiff_counsel, vec!["ANA SOUZA"]);
    }

    #[test]
    fn later_plaintiff_row_wins() {
        let rows = ["Reqte: PRIMEIRA", "Reqte: SEGUNDA"];
        assert_eq!(parse_parties(&rows).plaintiff, "SEGUNDA");
    }

    #[test]
    fn movements_multi_line() {
        let rows = ["24/03/2025\nDecisão\nProcessamento deferido"];
        let m = parse_movements(&rows);
        assert_eq!(
            m,
            vec![Movement {
                date: "24/03/2025".into(),
                description: "Decisão Processamento deferido".into(),
            }]
        );
    }

    #[test]
    fn movements_with_description_on_date_line() {
        let rows = ["24/03/2025\t\tDecisão\nDeferido o processamento"];
        let m = parse_movements(&rows);
        assert_eq!(m[0].date, "24/03/2025");
        assert_eq!(m[0].description, "Decisão Deferido o processamento");
    }

    #[test]
    fn movements_single_line_and_short_rows() {
        let rows = ["abc", "", "Juntada de Petição Intermediária", "12345"];
        let m = parse_movements(&rows);
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].date, "");
        assert_eq!(m[0].description, "Juntada de Petição Intermediária");
    }

    #[test]
    fn movements_keep_source_order() {
        let rows = [
            "25/03/2025\nSegunda",
            "24/03/2025\nPrimeira",
            "26/03/2025\nTerceira",
        ];
        let dates: Vec<_> = parse_movements(&rows)
            .into_iter()
            .map(|m| m.date)
            .collect();
        assert_eq!(dates, vec!["25/03/2025", "24/03/2025", "26/03/2025"]);
    }
}
