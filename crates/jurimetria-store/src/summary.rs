use std::path::{Path, PathBuf};

use jurimetria_core::answers::{BankVehicle, Presence};
use jurimetria_core::{Answers, CaseRecord};
use serde::Serialize;
use tracing::info;

use crate::StoreError;

pub const SUMMARY_FILE: &str = "resumo.json";

/// Headline counts over a batch. Serializes to the `resumo.json` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Summary {
    /// No case was extracted. Both counts are written as 0, whatever the
    /// batch size.
    Empty {
        total: usize,
        #[serde(rename = "sucesso")]
        succeeded: usize,
    },
    Full {
        #[serde(rename = "total_processos")]
        total: usize,
        #[serde(rename = "extraidos_sucesso")]
        succeeded: usize,
        #[serde(rename = "questoes")]
        questions: Questions,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Questions {
    #[serde(rename = "Q1_bancos_veiculos")]
    pub bank_vehicle: YesCount,
    #[serde(rename = "Q3_garantias")]
    pub guarantees: YesCount,
    #[serde(rename = "Q4_essencialidade")]
    pub essentiality: YesCount,
    #[serde(rename = "Q11_stay_period")]
    pub stay_period: ActiveCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YesCount {
    #[serde(rename = "sim")]
    pub count: usize,
    #[serde(rename = "percentual")]
    pub share: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveCount {
    #[serde(rename = "ativo")]
    pub count: usize,
    #[serde(rename = "percentual")]
    pub share: String,
}

/// Count answers over the successful records. Percentages are of the
/// successful records, one decimal place.
pub fn summarize(records: &[CaseRecord]) -> Summary {
    let answers: Vec<_> = records
        .iter()
        .filter(|r| r.is_success())
        .filter_map(|r| r.answers.as_ref())
        .collect();
    let succeeded = answers.len();

    if succeeded == 0 {
        return Summary::Empty {
            total: 0,
            succeeded: 0,
        };
    }

    let share = |n: usize| format!("{:.1}%", n as f64 / succeeded as f64 * 100.0);
    let yes = |n: usize| YesCount {
        count: n,
        share: share(n),
    };

    let bank_vehicle = count(&answers, |a| a.bank_vehicle == BankVehicle::Both);
    let guarantees = count(&answers, |a| a.guarantees == Presence::Yes);
    let essentiality = count(&answers, |a| a.essentiality == Presence::Yes);
    let stay_period = count(&answers, |a| a.stay_period.in_force());

    Summary::Full {
        total: records.len(),
        succeeded,
        questions: Questions {
            bank_vehicle: yes(bank_vehicle),
            guarantees: yes(guarantees),
            essentiality: yes(essentiality),
            stay_period: ActiveCount {
                count: stay_period,
                share: share(stay_period),
            },
        },
    }
}

fn count(answers: &[&Answers], pred: impl Fn(&Answers) -> bool) -> usize {
    answers.iter().filter(|a| pred(a)).count()
}

/// Write `summary` as pretty-printed `resumo.json` under `dir`.
pub fn write_summary(summary: &Summary, dir: &Path) -> Result<PathBuf, StoreError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(SUMMARY_FILE);
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(&path, json)?;
    info!(path = %path.display(), "wrote summary");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jurimetria_core::answers::StayPeriod;
    use jurimetria_core::{CaseFile, CaseNumber, Extraction};
    use serde_json::json;

    fn success(answers: Answers) -> CaseRecord {
        CaseRecord::from_extraction(
            CaseNumber::from("1001535-69.2025.8.26.0260"),
            Extraction::Found(CaseFile::default()),
            move |_| answers,
        )
    }

    fn failure() -> CaseRecord {
        CaseRecord::from_extraction(
            CaseNumber::from("1001535-69.2025.8.26.0260"),
            Extraction::Failed {
                message: "timeout".into(),
            },
            |_| unreachable!(),
        )
    }

    #[test]
    fn no_successes_gives_the_zero_summary() {
        let summary = summarize(&[failure(), failure()]);
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({"total": 0, "sucesso": 0})
        );
        assert_eq!(
            serde_json::to_value(summarize(&[])).unwrap(),
            json!({"total": 0, "sucesso": 0})
        );
    }

    #[test]
    fn counts_over_successful_records() {
        let both = Answers {
            bank_vehicle: BankVehicle::Both,
            guarantees: Presence::Yes,
            stay_period: StayPeriod::Extended,
            ..Answers::default()
        };
        let bank_only = Answers {
            bank_vehicle: BankVehicle::BankOnly,
            stay_period: StayPeriod::Active,
            ..Answers::default()
        };
        let records = [success(both), success(bank_only), success(Answers::default()), failure()];

        let value = serde_json::to_value(summarize(&records)).unwrap();
        assert_eq!(
            value,
            json!({
                "total_processos": 4,
                "extraidos_sucesso": 3,
                "questoes": {
                    "Q1_bancos_veiculos": {"sim": 1, "percentual": "33.3%"},
                    "Q3_garantias": {"sim": 1, "percentual": "33.3%"},
                    "Q4_essencialidade": {"sim": 0, "percentual": "0.0%"},
                    "Q11_stay_period": {"ativo": 2, "percentual": "66.7%"}
                }
            })
        );
    }

    #[test]
    fn writes_pretty_utf8_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_summary(&summarize(&[success(Answers::default())]), dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), SUMMARY_FILE);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"total_processos\": 1"));
        assert!(text.contains("\"percentual\": \"0.0%\""));
    }
}
