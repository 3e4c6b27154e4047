//! Category canonicalization and filter matching.
//!
//! Upstream category text is typed by hand and is inconsistently phrased
//! and pluralized ("Tarihi", "Tarihi Yapı", "tarihi mekan"), so filtering
//! goes through a fixed synonym table with a two-way substring test.

use tire_map_place_models::{CategoryFilter, PlaceCategory};

/// Maps each filter category to the canonical labels it covers.
///
/// Every entry includes the category's own canonical name.
static CATEGORY_SYNONYMS: &[(PlaceCategory, &[&str])] = &[
    (
        PlaceCategory::Historic,
        &["tarihi", "tarihi yapı", "tarihi yer", "tarihi mekan"],
    ),
    (
        PlaceCategory::Cultural,
        &["kültürel", "kültür", "kültür merkezi", "müze", "sanat"],
    ),
    (
        PlaceCategory::FoodAndDrink,
        &["yeme-içme", "restoran", "cafe", "lokanta", "yemek"],
    ),
    (
        PlaceCategory::Accommodation,
        &[
            "konaklama",
            "otel",
            "hotel",
            "pansiyon",
            "misafirhane",
            "butik otel",
        ],
    ),
];

/// Labels that select every point.
const ALL_LABELS: &[&str] = &["all", "tümü"];

/// Trims and lowercases a category label.
///
/// The Turkish dotted capital `İ` folds to a plain `i` so that
/// `"Yeme-İçme"` and `"yeme-içme"` compare equal.
#[must_use]
pub fn canonicalize(label: &str) -> String {
    let trimmed = label.trim();
    let mut out = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        if ch == 'İ' {
            out.push('i');
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Returns the canonical labels covered by `category`.
#[must_use]
pub fn synonyms(category: PlaceCategory) -> &'static [&'static str] {
    CATEGORY_SYNONYMS
        .iter()
        .find(|(c, _)| *c == category)
        .map_or(&[], |(_, labels)| labels)
}

/// Returns `true` if a point labeled `point_category` passes `filter`.
#[must_use]
pub fn matches(point_category: &str, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Category(category) => {
            matches_category(&canonicalize(point_category), *category)
        }
        CategoryFilter::Label(label) => {
            let canonical = canonicalize(point_category);
            !canonical.is_empty() && canonical == canonicalize(label)
        }
    }
}

/// Resolves a free-text label to the first taxonomy category it matches.
#[must_use]
pub fn classify(label: &str) -> Option<PlaceCategory> {
    let canonical = canonicalize(label);
    PlaceCategory::all()
        .iter()
        .copied()
        .find(|category| matches_category(&canonical, *category))
}

/// Parses a filter selection.
///
/// `all`/`tümü` select everything, a taxonomy label selects that
/// category, and anything else becomes an exact-label filter.
#[must_use]
pub fn parse_filter(label: &str) -> CategoryFilter {
    let canonical = canonicalize(label);
    if canonical.is_empty() || ALL_LABELS.contains(&canonical.as_str()) {
        return CategoryFilter::All;
    }

    PlaceCategory::all()
        .iter()
        .copied()
        .find(|category| canonicalize(category.as_ref()) == canonical)
        .map_or_else(
            || CategoryFilter::Label(label.trim().to_string()),
            CategoryFilter::Category,
        )
}

/// Two-way substring test against the category's synonym list. An empty
/// label never matches a named category.
fn matches_category(canonical: &str, category: PlaceCategory) -> bool {
    if canonical.is_empty() {
        return false;
    }
    synonyms(category)
        .iter()
        .any(|synonym| canonical.contains(synonym) || synonym.contains(canonical))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_labels() {
        assert_eq!(canonicalize("  Tarihi Yapı "), "tarihi yapı");
        assert_eq!(canonicalize("Yeme-İçme"), "yeme-içme");
        assert_eq!(canonicalize("KÜLTÜREL"), "kültürel");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn all_matches_everything() {
        assert!(matches("Otel", &CategoryFilter::All));
        assert!(matches("", &CategoryFilter::All));
    }

    #[test]
    fn matches_through_synonyms() {
        assert!(matches("Tarihi Yapı", &parse_filter("Tarihi")));
        assert!(matches("Otel", &parse_filter("Konaklama")));
        assert!(matches("Butik Otel", &parse_filter("Konaklama")));
        assert!(matches("Müze", &parse_filter("Kültürel")));
        assert!(matches("Restoranlar", &parse_filter("Yeme-İçme")));
        assert!(matches("tarihi", &parse_filter("tarihi")));
    }

    #[test]
    fn rejects_other_categories() {
        assert!(!matches("Otel", &parse_filter("Tarihi")));
        assert!(!matches("Cami", &parse_filter("Konaklama")));
        assert!(!matches("", &parse_filter("Tarihi")));
    }

    #[test]
    fn label_filters_match_exactly() {
        let filter = parse_filter("Belediye");
        assert_eq!(filter, CategoryFilter::Label("Belediye".to_string()));
        assert!(matches(" belediye", &filter));
        assert!(!matches("Belediye Binası", &filter));
    }

    #[test]
    fn parses_filters() {
        assert_eq!(parse_filter("all"), CategoryFilter::All);
        assert_eq!(parse_filter("Tümü"), CategoryFilter::All);
        assert_eq!(parse_filter(""), CategoryFilter::All);
        assert_eq!(
            parse_filter("yeme-içme"),
            CategoryFilter::Category(PlaceCategory::FoodAndDrink)
        );
        assert_eq!(
            parse_filter("KONAKLAMA"),
            CategoryFilter::Category(PlaceCategory::Accommodation)
        );
    }

    #[test]
    fn classifies_labels() {
        assert_eq!(classify("Tarihi Mekan"), Some(PlaceCategory::Historic));
        assert_eq!(classify("Pansiyon"), Some(PlaceCategory::Accommodation));
        assert_eq!(classify("Kültür Merkezi"), Some(PlaceCategory::Cultural));
        assert_eq!(classify("belediye"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn every_category_has_its_own_name_as_synonym() {
        for category in PlaceCategory::all() {
            assert!(synonyms(*category).contains(&canonicalize(category.as_ref()).as_str()));
        }
    }
}
