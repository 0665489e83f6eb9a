//! The fourteen research questions as rule chains over [`CaseText`].

use jurimetria_core::CaseFile;
use jurimetria_core::answers::{
    Answers, Appeals, AssetConflict, BankVehicle, CreditRecognition, Disposition, Enforcement,
    Meeting, PlanStatus, Presence, Relief, StayPeriod, Thesis,
};
use tracing::debug;

use crate::corpus::CaseText;
use crate::lexicon::{BANKS, ESSENTIALITY, GUARANTEES, STAY, VEHICLES};
use crate::rules::{self, Chain, Predicate};

/// Answers the research questions for a successfully extracted case.
///
/// Pure and deterministic: the same [`CaseFile`] always yields the same
/// [`Answers`]. It never fails; every chain has a default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer;

impl Analyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, file: &CaseFile) -> Answers {
        let text = CaseText::from_file(file);
        let stay_period = STAY_PERIOD.eval(&text);

        let answers = Answers {
            bank_vehicle: BANK_VEHICLE.eval(&text),
            relief: rules::triggered(RELIEF, &text),
            guarantees: Presence::from_bool(GUARANTEES.matches(&text.full)),
            essentiality: Presence::from_bool(ESSENTIALITY.matches(&text.full)),
            theses: rules::triggered(THESES, &text),
            disposition: DISPOSITION.eval(&text),
            law_firm: file.parties.plaintiff_counsel.first().cloned(),
            extraconcursal_credit: CREDIT.eval(&text),
            appeals: APPEALS.eval(&text),
            asset_conflict: ASSET_CONFLICT.eval(&text),
            stay_period,
            enforcement: Enforcement::from_stay(stay_period),
            plan: PLAN.eval(&text),
            meeting: MEETING.eval(&text),
        };

        debug!(
            bank_vehicle = answers.bank_vehicle.as_str(),
            stay_period = answers.stay_period.as_str(),
            plan = answers.plan.as_str(),
            "case analysed"
        );
        answers
    }
}

// ── Q1 ──

// The page text normally carries the docket too; movements are searched
// explicitly so a docket-only mention still counts.
fn q1_texts(t: &CaseText) -> [&str; 3] {
    [t.parties.as_str(), t.full.as_str(), t.movements.as_str()]
}

fn has_bank(t: &CaseText) -> bool {
    BANKS.matches_any(&q1_texts(t))
}

fn has_vehicle(t: &CaseText) -> bool {
    VEHICLES.matches_any(&q1_texts(t))
}

fn bank_and_vehicle(t: &CaseText) -> bool {
    has_bank(t) && has_vehicle(t)
}

const BANK_VEHICLE: Chain<BankVehicle> = Chain {
    rules: &[
        (bank_and_vehicle, BankVehicle::Both),
        (has_bank, BankVehicle::BankOnly),
        (has_vehicle, BankVehicle::VehicleOnly),
    ],
    default: BankVehicle::Neither,
};

// ── Q2, Q5 ──

const RELIEF: &[(Predicate, Relief)] = &[
    (|t| t.class.contains("tutela"), Relief::InterimRelief),
    (|t| t.subject.contains("recuperação"), Relief::JudicialRecovery),
    (|t| t.full.contains("suspensão"), Relief::StayOfEnforcement),
    (|t| t.full.contains("essencial"), Relief::AssetEssentiality),
];

const THESES: &[(Predicate, Thesis)] = &[
    (|t| ESSENTIALITY.matches(&t.full), Thesis::AssetEssentiality),
    (|t| GUARANTEES.matches(&t.full), Thesis::ExtraconcursalCredit),
    (|t| STAY.matches(&t.full), Thesis::StayPeriod),
];

// ── Q6 ──

const DISPOSITION: Chain<Disposition> = Chain {
    rules: &[
        (
            |t| rules::granted(&t.movements) && t.movements.contains("essencial"),
            Disposition::Favorable,
        ),
        (|t| rules::granted(&t.movements), Disposition::GrantedVerify),
        (|t| rules::denied(&t.movements), Disposition::Unfavorable),
    ],
    default: Disposition::Awaiting,
};

// ── Q8 ──

const CREDIT: Chain<CreditRecognition> = Chain {
    rules: &[
        (
            |t| t.full.contains("extraconcursal") && t.full.contains("reconhec"),
            CreditRecognition::Recognized,
        ),
        (
            |t| t.full.contains("extraconcursal"),
            CreditRecognition::UnderDiscussion,
        ),
    ],
    default: CreditRecognition::NotIdentified,
};

// ── Q9 ──

const APPEALS: Chain<Appeals> = Chain {
    rules: &[(
        |t| ["agravo", "apelação", "recurso"]
            .iter()
            .any(|term| t.movements.contains(term)),
        Appeals::Pending,
    )],
    default: Appeals::NotIdentified,
};

// ── Q10 ──

const SEIZURE: &str = "busca e apreensão";

const ASSET_CONFLICT: Chain<AssetConflict> = Chain {
    rules: &[
        (
            |t| t.full.contains(SEIZURE) && ESSENTIALITY.matches(&t.full),
            AssetConflict::Conflict,
        ),
        (|t| t.full.contains(SEIZURE), AssetConflict::SeizureRequested),
    ],
    default: AssetConflict::NotIdentified,
};

// ── Q11 (Q12 derives from it) ──

const STAY_PERIOD: Chain<StayPeriod> = Chain {
    rules: &[
        (
            |t| t.movements.contains("prorrogação") && t.movements.contains("prazo"),
            StayPeriod::Extended,
        ),
        (
            // Masculine form only.
            |t| {
                t.movements.contains("processamento")
                    && rules::undenied(&t.movements, "deferido")
            },
            StayPeriod::Active,
        ),
        (
            |t| t.movements.contains("encerr") || t.movements.contains("falência"),
            StayPeriod::Closed,
        ),
    ],
    default: StayPeriod::VerifyManually,
};

// ── Q13 ──

const PLAN: Chain<PlanStatus> = Chain {
    rules: &[
        (
            |t| t.movements.contains("homologação") && t.movements.contains("plano"),
            PlanStatus::Ratified,
        ),
        (
            |t| t.movements.contains("aprovação") && t.movements.contains("plano"),
            PlanStatus::Approved,
        ),
        (
            |t| t.movements.contains("apresentação") && t.movements.contains("plano"),
            PlanStatus::Submitted,
        ),
    ],
    default: PlanStatus::Pending,
};

// ── Q14 ──

const MEETING: Chain<Meeting> = Chain {
    rules: &[
        (|t| t.movements.contains("assembleia"), Meeting::Assembly),
        (|t| t.movements.contains("mediação"), Meeting::Mediation),
    ],
    default: Meeting::NotIdentified,
};
