//! Fixed keyword lexicons.
//!
//! Terms are lowercase substrings matched against lowercased text. They are
//! compiled in and not configurable at runtime.

/// A named set of lowercase substrings.
#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    pub name: &'static str,
    pub terms: &'static [&'static str],
}

impl Lexicon {
    /// Whether any term occurs in `text`. `text` must already be lowercase.
    pub fn matches(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// First term (in lexicon order) that occurs in `text`.
    pub fn first_match(&self, text: &str) -> Option<&'static str> {
        self.terms.iter().copied().find(|term| text.contains(term))
    }

    /// Whether any term occurs in any of `texts`.
    pub fn matches_any(&self, texts: &[&str]) -> bool {
        texts.iter().any(|t| self.matches(t))
    }
}

/// Banks, funds and fiduciary creditors.
pub const BANKS: Lexicon = Lexicon {
    name: "banks",
    terms: &[
        "banco",
        "bradesco",
        "itaú",
        "santander",
        "caixa",
        "bb",
        "safra",
        "btg",
        "votorantim",
        "fidc",
        "fundo",
        "financ",
        "credor fiduciário",
    ],
};

/// Heavy vehicles, fleets and equipment.
pub const VEHICLES: Lexicon = Lexicon {
    name: "vehicles",
    terms: &[
        "caminhão",
        "ônibus",
        "frota",
        "carreta",
        "veículo",
        "scania",
        "volvo",
        "mercedes",
        "mills pesados",
        "locação",
        "equipamento",
    ],
};

/// Essentiality of assets to business continuity (Lei 11.101/2005, art. 49 § 3).
pub const ESSENTIALITY: Lexicon = Lexicon {
    name: "essentiality",
    terms: &["essencial", "indispensável", "continuidade", "art. 49", "§ 3"],
};

/// Secured guarantees kept outside the reorganization claims.
pub const GUARANTEES: Lexicon = Lexicon {
    name: "guarantees",
    terms: &[
        "alienação fiduciária",
        "trava bancária",
        "garantia real",
        "cessão fiduciária",
        "fiduciário",
    ],
};

/// Stay period (art. 6) and related shielding.
pub const STAY: Lexicon = Lexicon {
    name: "stay",
    terms: &["stay period", "suspensão", "180 dias", "art. 6", "blindagem"],
};

/// All lexicons, for listing.
pub const ALL: &[Lexicon] = &[BANKS, VEHICLES, ESSENTIALITY, GUARANTEES, STAY];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_are_lowercase() {
        for lexicon in ALL {
            for term in lexicon.terms {
                assert_eq!(*term, term.to_lowercase(), "{}: {term}", lexicon.name);
            }
        }
    }

    #[test]
    fn first_match_follows_lexicon_order() {
        assert_eq!(BANKS.first_match("banco bradesco s.a."), Some("banco"));
        assert_eq!(BANKS.first_match("itaú unibanco"), Some("banco"));
        assert_eq!(VEHICLES.first_match("frota de caminhão"), Some("caminhão"));
        assert_eq!(STAY.first_match("nada aqui"), None);
    }

    #[test]
    fn matches_is_substring_based() {
        assert!(GUARANTEES.matches("credor fiduciário"));
        assert!(ESSENTIALITY.matches("bens essenciais à atividade"));
        assert!(!ESSENTIALITY.matches(""));
        assert!(BANKS.matches_any(&["", "fundo de investimento"]));
        assert!(!BANKS.matches_any(&[]));
    }
}
