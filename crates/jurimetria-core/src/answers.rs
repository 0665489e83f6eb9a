//! Typed answers to the fourteen research questions.
//!
//! Every answer has a closed vocabulary except the law-firm passthrough (Q7).
//! `as_str` gives the label written to the report.

use serde::Serialize;

/// Label written when a rule found nothing to report.
pub const NOT_IDENTIFIED: &str = "Não identificado";

/// Q1: banks among the parties and heavy vehicles or equipment in the case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BankVehicle {
    Both,
    BankOnly,
    VehicleOnly,
    #[default]
    Neither,
}

impl BankVehicle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Both => "SIM - Bancos E Veículos",
            Self::BankOnly => "Apenas Bancos",
            Self::VehicleOnly => "Apenas Veículos/Equipamentos",
            Self::Neither => NOT_IDENTIFIED,
        }
    }
}

/// Q2: relief requested in the case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relief {
    InterimRelief,
    JudicialRecovery,
    StayOfEnforcement,
    AssetEssentiality,
}

impl Relief {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InterimRelief => "Tutela Cautelar",
            Self::JudicialRecovery => "Recuperação Judicial",
            Self::StayOfEnforcement => "Suspensão de execuções",
            Self::AssetEssentiality => "Essencialidade de bens",
        }
    }
}

/// Q5: legal theses under discussion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Thesis {
    AssetEssentiality,
    ExtraconcursalCredit,
    StayPeriod,
}

impl Thesis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssetEssentiality => "Essencialidade de bens",
            Self::ExtraconcursalCredit => "Crédito extraconcursal",
            Self::StayPeriod => "Stay period",
        }
    }
}

/// Yes/not-identified answers (Q3, Q4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Yes,
    #[default]
    NotIdentified,
}

impl Presence {
    pub fn from_bool(found: bool) -> Self {
        if found { Self::Yes } else { Self::NotIdentified }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "SIM",
            Self::NotIdentified => NOT_IDENTIFIED,
        }
    }
}

/// Q6: how the court has ruled so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Favorable,
    GrantedVerify,
    Unfavorable,
    #[default]
    Awaiting,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Favorable => "Favorável à empresa",
            Self::GrantedVerify => "Decisão deferida - verificar teor",
            Self::Unfavorable => "Desfavorável à empresa",
            Self::Awaiting => "Aguardando decisão",
        }
    }
}

/// Q8: whether an extraconcursal credit was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditRecognition {
    Recognized,
    UnderDiscussion,
    #[default]
    NotIdentified,
}

impl CreditRecognition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recognized => "SIM",
            Self::UnderDiscussion => "Em discussão",
            Self::NotIdentified => NOT_IDENTIFIED,
        }
    }
}

/// Q9: pending appeals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Appeals {
    Pending,
    #[default]
    NotIdentified,
}

impl Appeals {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "SIM - Verificar tipo",
            Self::NotIdentified => NOT_IDENTIFIED,
        }
    }
}

/// Q10: essential assets against search-and-seizure requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetConflict {
    Conflict,
    SeizureRequested,
    #[default]
    NotIdentified,
}

impl AssetConflict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conflict => "Conflito identificado",
            Self::SeizureRequested => "Há pedido de busca/apreensão",
            Self::NotIdentified => NOT_IDENTIFIED,
        }
    }
}

/// Q11: state of the stay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StayPeriod {
    Extended,
    Active,
    Closed,
    #[default]
    VerifyManually,
}

impl StayPeriod {
    /// Whether creditor enforcement is currently suspended.
    pub fn in_force(&self) -> bool {
        matches!(self, Self::Active | Self::Extended)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extended => "Prorrogado",
            Self::Active => "Ativo",
            Self::Closed => "Encerrado",
            Self::VerifyManually => "Verificar manualmente",
        }
    }
}

/// Q12: whether guarantees can be enforced. Derived from [`StayPeriod`] only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Enforcement {
    Blocked,
    #[default]
    PossiblyAllowed,
}

impl Enforcement {
    pub fn from_stay(stay: StayPeriod) -> Self {
        if stay.in_force() {
            Self::Blocked
        } else {
            Self::PossiblyAllowed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocked => "NÃO (Stay Period vigente)",
            Self::PossiblyAllowed => "Possivelmente SIM",
        }
    }
}

/// Q13: reorganization plan progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Ratified,
    Approved,
    Submitted,
    #[default]
    Pending,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ratified => "Homologado",
            Self::Approved => "Aprovado",
            Self::Submitted => "Apresentado",
            Self::Pending => "Aguardando/Em elaboração",
        }
    }
}

/// Q14: creditors' meeting or mediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Meeting {
    Assembly,
    Mediation,
    #[default]
    NotIdentified,
}

impl Meeting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assembly => "AGC realizada/marcada",
            Self::Mediation => "Mediação em andamento",
            Self::NotIdentified => NOT_IDENTIFIED,
        }
    }
}

/// Answers to the fourteen questions for one successfully extracted case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Answers {
    pub bank_vehicle: BankVehicle,
    pub relief: Vec<Relief>,
    pub guarantees: Presence,
    pub essentiality: Presence,
    pub theses: Vec<Thesis>,
    pub disposition: Disposition,
    /// First counsel listed for the plaintiff.
    pub law_firm: Option<String>,
    pub extraconcursal_credit: CreditRecognition,
    pub appeals: Appeals,
    pub asset_conflict: AssetConflict,
    pub stay_period: StayPeriod,
    pub enforcement: Enforcement,
    pub plan: PlanStatus,
    pub meeting: Meeting,
}

impl Answers {
    /// Report labels in question order, Q1 first.
    pub fn labels(&self) -> [String; 14] {
        [
            self.bank_vehicle.as_str().to_string(),
            join_or(self.relief.iter().map(Relief::as_str), "Verificar petição inicial"),
            self.guarantees.as_str().to_string(),
            self.essentiality.as_str().to_string(),
            join_or(self.theses.iter().map(Thesis::as_str), "Verificar decisões"),
            self.disposition.as_str().to_string(),
            self.law_firm
                .clone()
                .unwrap_or_else(|| NOT_IDENTIFIED.to_string()),
            self.extraconcursal_credit.as_str().to_string(),
            self.appeals.as_str().to_string(),
            self.asset_conflict.as_str().to_string(),
            self.stay_period.as_str().to_string(),
            self.enforcement.as_str().to_string(),
            self.plan.as_str().to_string(),
            self.meeting.as_str().to_string(),
        ]
    }
}

/// Comma-join labels, or fall back to a manual-review placeholder when empty.
fn join_or<'a>(labels: impl Iterator<Item = &'a str>, fallback: &str) -> String {
    let joined = labels.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        fallback.to_string()
    } else {
        joined
    }
}
