//! Ordered rule chains.
//!
//! A [`Chain`] is a list of `(predicate, result)` pairs evaluated in order;
//! the first predicate that holds decides the result, otherwise the default
//! applies. Precedence is the order of the list.

use crate::corpus::CaseText;

pub type Predicate = fn(&CaseText) -> bool;

/// First-match-wins rule list with an explicit default.
#[derive(Debug, Clone, Copy)]
pub struct Chain<T: 'static> {
    pub rules: &'static [(Predicate, T)],
    pub default: T,
}

impl<T: Copy> Chain<T> {
    pub fn eval(&self, text: &CaseText) -> T {
        self.rules
            .iter()
            .find(|(holds, _)| holds(text))
            .map(|&(_, result)| result)
            .unwrap_or(self.default)
    }
}

/// Every result whose trigger holds, in trigger order.
pub fn triggered<T: Copy>(triggers: &[(Predicate, T)], text: &CaseText) -> Vec<T> {
    triggers
        .iter()
        .filter(|(holds, _)| holds(text))
        .map(|&(_, result)| result)
        .collect()
}

const DENIED: &[&str] = &["indeferido", "indeferida"];
const GRANTED: &[&str] = &["deferido", "deferida"];

/// A "granted" term occurs somewhere it is not the tail of a "denied" term.
pub fn granted(text: &str) -> bool {
    GRANTED.iter().any(|term| undenied(text, term))
}

/// `term` occurs somewhere not preceded by the `in` of its denied form.
pub fn undenied(text: &str, term: &str) -> bool {
    text.match_indices(term)
        .any(|(at, _)| !text[..at].ends_with("in"))
}

pub fn denied(text: &str) -> bool {
    DENIED.iter().any(|term| text.contains(term))
}
