use once_cell::sync::Lazy;
use regex::Regex;

static SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:_\d+)+$").expect("valid suffix regex"));

/// Strips trailing `_<digits>` disambiguation suffixes, so `us-gaap_Assets_1`
/// and `us-gaap_Assets_12` both become `us-gaap_Assets`. Stacked suffixes are
/// removed together, which keeps the function idempotent.
pub fn normalize_concept(concept: &str) -> &str {
    match SUFFIX_RE.find(concept) {
        Some(m) => &concept[..m.start()],
        None => concept,
    }
}

/// The concept part of a locator href: everything after the last `#`.
pub fn concept_from_href(href: &str) -> &str {
    href.rsplit('#').next().unwrap_or(href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_numeric_suffix() {
        assert_eq!(normalize_concept("Assets_1"), "Assets");
        assert_eq!(normalize_concept("Assets_12"), "Assets");
        assert_eq!(normalize_concept("us-gaap_Assets_20240101"), "us-gaap_Assets");
    }

    #[test]
    fn test_is_idempotent() {
        for raw in ["Assets_1", "us-gaap_Assets", "loc_1_2", "_7", "plain", ""] {
            let once = normalize_concept(raw);
            assert_eq!(normalize_concept(once), once, "normalizing {:?} twice", raw);
        }
    }

    #[test]
    fn test_only_trailing_digits_are_stripped() {
        assert_eq!(normalize_concept("us-gaap_Assets"), "us-gaap_Assets");
        assert_eq!(normalize_concept("Assets_1a"), "Assets_1a");
        assert_eq!(normalize_concept("Assets1"), "Assets1");
        assert_eq!(normalize_concept("loc_1_2"), "loc");
    }

    #[test]
    fn test_concept_from_href() {
        assert_eq!(
            concept_from_href("https://xbrl.fasb.org/us-gaap/2023/elts/us-gaap-2023.xsd#us-gaap_Assets"),
            "us-gaap_Assets"
        );
        assert_eq!(concept_from_href("us-gaap_Assets"), "us-gaap_Assets");
    }
}
