//! Reference data catalog.
//!
//! Each field category has a static option list. Widgets never look at the
//! raw list directly; they work with the *enhanced* list, which puts the
//! "None / Not Applicable" and "Other" sentinels in front of the catalog
//! values.

mod data;

pub use data::*;

use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};

use crate::models::Choice;

/// Minimum query length before typo-tolerant matching kicks in.
const FUZZY_MIN_QUERY_LEN: usize = 3;

/// Minimum similarity for a typo-tolerant suggestion.
const FUZZY_THRESHOLD: f64 = 0.8;

/// Field categories that have a suggestion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogKind {
    EyeDiseases,
    EyeSurgeries,
    EyeLasers,
    EyeInjuries,
    EyeDrops,
    EyeMedications,
    MedicalConditions,
    RegularMedications,
    Specialists,
    DrugAllergies,
    Optometrists,
    FamilyDoctors,
}

impl CatalogKind {
    /// Raw option list for this category.
    pub fn options(self) -> &'static [&'static str] {
        match self {
            CatalogKind::EyeDiseases => EYE_DISEASES,
            CatalogKind::EyeSurgeries => EYE_SURGERIES,
            CatalogKind::EyeLasers => EYE_LASERS,
            CatalogKind::EyeInjuries => EYE_INJURIES,
            CatalogKind::EyeDrops | CatalogKind::EyeMedications => EYE_DROPS,
            CatalogKind::MedicalConditions => MEDICAL_CONDITIONS,
            CatalogKind::RegularMedications => REGULAR_MEDICATIONS,
            CatalogKind::Specialists => SPECIALISTS,
            CatalogKind::DrugAllergies => DRUG_ALLERGIES,
            CatalogKind::Optometrists => OPTOMETRISTS,
            CatalogKind::FamilyDoctors => FAMILY_DOCTORS,
        }
    }

    pub fn catalog(self) -> Catalog {
        Catalog::new(self)
    }
}

/// A category's option list plus the injected sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    kind: CatalogKind,
    options: &'static [&'static str],
}

impl Catalog {
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            options: kind.options(),
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn options(&self) -> &'static [&'static str] {
        self.options
    }

    /// Sentinels first ("None / Not Applicable", then "Other"), then the
    /// catalog values in their listed order.
    pub fn enhanced(&self) -> Vec<Choice> {
        let mut choices = Vec::with_capacity(self.options.len() + 2);
        choices.push(Choice::NotApplicable);
        choices.push(Choice::Other);
        choices.extend(
            self.options
                .iter()
                .map(|o| Choice::parse(o))
                .filter(|c| !c.is_sentinel()),
        );
        choices
    }

    /// Exact (case-sensitive) lookup in the enhanced list.
    pub fn resolve(&self, text: &str) -> Option<Choice> {
        let choice = Choice::parse(text.trim());
        match &choice {
            Choice::Value(v) if !self.options.contains(&v.as_str()) => None,
            _ => Some(choice),
        }
    }

    /// Suggestions for `query`.
    ///
    /// Case-insensitive substring match over the enhanced list, skipping
    /// anything `exclude` rejects, capped at `limit`. When nothing matches
    /// and the query is long enough, falls back to ranking catalog values
    /// by string similarity so small typos still find their option.
    pub fn suggest<F>(&self, query: &str, limit: usize, exclude: F) -> Vec<Choice>
    where
        F: Fn(&Choice) -> bool,
    {
        let needle = query.trim().to_lowercase();
        let matches: Vec<Choice> = self
            .enhanced()
            .into_iter()
            .filter(|c| !exclude(c))
            .filter(|c| c.label().to_lowercase().contains(&needle))
            .take(limit)
            .collect();

        if !matches.is_empty() || needle.chars().count() < FUZZY_MIN_QUERY_LEN {
            return matches;
        }
        self.similar(&needle, limit, exclude)
    }

    /// Catalog values ranked by similarity to `query`, best first.
    fn similar<F>(&self, query: &str, limit: usize, exclude: F) -> Vec<Choice>
    where
        F: Fn(&Choice) -> bool,
    {
        let mut scored: Vec<(f64, Choice)> = self
            .options
            .iter()
            .map(|o| Choice::parse(o))
            .filter(|c| !c.is_sentinel() && !exclude(c))
            .map(|c| (similarity(query, c.label()), c))
            .filter(|(score, _)| *score >= FUZZY_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().take(limit).map(|(_, c)| c).collect()
    }
}

/// Best similarity between the query and the option or any of its words.
fn similarity(query: &str, option: &str) -> f64 {
    let option = option.to_lowercase();
    std::iter::once(option.as_str())
        .chain(option.split_whitespace())
        .map(|candidate| {
            // Jaro-Winkler rewards shared prefixes; Levenshtein keeps it honest
            jaro_winkler(query, candidate) * 0.6 + normalized_levenshtein(query, candidate) * 0.4
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhanced_puts_sentinels_first() {
        let enhanced = CatalogKind::DrugAllergies.catalog().enhanced();
        assert_eq!(enhanced[0], Choice::NotApplicable);
        assert_eq!(enhanced[1], Choice::Other);
        assert_eq!(enhanced[2], Choice::from("Penicillin"));
        assert_eq!(enhanced.len(), DRUG_ALLERGIES.len() + 2);
    }

    #[test]
    fn test_suggest_is_case_insensitive_substring() {
        let catalog = CatalogKind::EyeDiseases.catalog();
        let results = catalog.suggest("RETIN", 10, |_| false);
        assert!(results.contains(&Choice::from("Diabetic Retinopathy")));
        assert!(results.contains(&Choice::from("Retinal Detachment")));
        assert!(results.contains(&Choice::from("Retinitis Pigmentosa")));
        assert!(!results.contains(&Choice::from("Glaucoma")));
    }

    #[test]
    fn test_suggest_sentinels_sort_first() {
        let catalog = CatalogKind::EyeDiseases.catalog();
        // "o" appears in "None / Not Applicable", "Other" and many diseases
        let results = catalog.suggest("o", 12, |_| false);
        assert_eq!(results[0], Choice::NotApplicable);
        assert_eq!(results[1], Choice::Other);
        assert_eq!(results.len(), 12);
    }

    #[test]
    fn test_suggest_respects_exclusion() {
        let catalog = CatalogKind::Specialists.catalog();
        let taken = Choice::from("Neurologist");
        let results = catalog.suggest("neuro", 10, |c| *c == taken);
        assert!(results.is_empty() || !results.contains(&taken));
    }

    #[test]
    fn test_suggest_typo_fallback() {
        let catalog = CatalogKind::EyeDiseases.catalog();
        let results = catalog.suggest("glaucomma", 10, |_| false);
        assert_eq!(results.first(), Some(&Choice::from("Glaucoma")));
    }

    #[test]
    fn test_short_query_has_no_fallback() {
        let catalog = CatalogKind::EyeDiseases.catalog();
        assert!(catalog.suggest("zq", 10, |_| false).is_empty());
    }

    #[test]
    fn test_resolve_exact_only() {
        let catalog = CatalogKind::EyeDiseases.catalog();
        assert_eq!(catalog.resolve("Glaucoma"), Some(Choice::from("Glaucoma")));
        assert_eq!(catalog.resolve("glaucoma"), None);
        assert_eq!(catalog.resolve("Other"), Some(Choice::Other));
        assert_eq!(
            catalog.resolve("None / Not Applicable"),
            Some(Choice::NotApplicable)
        );
    }
}
