//! Restaurant name normalization
//!
//! Three normal forms are derived from a restaurant display name:
//!
//! - [`slugify`]: public URL slug, hyphen-separated ("Spice Route" -> "spice-route")
//! - [`collection_key`]: menu scope key, underscore-separated with a fixed
//!   namespace prefix ("Joe's Café" -> "menu_joe_s_cafe")
//! - [`alnum_key`]: alphanumeric-only reduction used by the last-resort slug
//!   lookup tier ("spice--route" -> "spiceroute")
//!
//! All three lowercase and fold common Latin diacritics so that names which
//! only differ in punctuation or accents normalize identically.

/// Fold a character to its ASCII base letter where a common Latin
/// diacritic mapping exists. Characters without a mapping pass through.
fn fold_ascii(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Replace every run of non-alphanumeric characters with `sep`, lowercasing
/// and folding diacritics along the way. Leading/trailing separators are
/// trimmed so the result is stable under repeated application.
fn sanitize(name: &str, sep: char) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.chars().flat_map(char::to_lowercase).map(fold_ascii) {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push(sep);
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Derive the public URL slug for a restaurant name.
///
/// Pure and idempotent: `slugify(slugify(name)) == slugify(name)`.
pub fn slugify(name: &str) -> String {
    sanitize(name, '-')
}

/// Namespace prefix for menu scope keys
const MENU_SCOPE_PREFIX: &str = "menu_";

/// Derive the menu scope key (collection identifier) for a restaurant name.
///
/// Names that differ only in punctuation, spacing or accents produce the
/// same key ("Joe's Café" and "Joe's  Cafe!" both map to "menu_joe_s_cafe").
pub fn collection_key(name: &str) -> String {
    format!("{}{}", MENU_SCOPE_PREFIX, sanitize(name, '_'))
}

/// Reduce a name or slug to lowercase alphanumerics only.
pub fn alnum_key(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(fold_ascii)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Split a name or slug into lowercase alphanumeric tokens.
///
/// Used by the loose slug-match tier: "spice--route" and "Spice Route"
/// both tokenize to `["spice", "route"]`.
pub fn tokens(s: &str) -> Vec<String> {
    s.to_lowercase()
        .chars()
        .map(fold_ascii)
        .collect::<String>()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Spice Route"), "spice-route");
        assert_eq!(slugify("Joe's Café"), "joe-s-cafe");
        assert_eq!(slugify("  The   Golden -- Dragon  "), "the-golden-dragon");
    }

    #[test]
    fn test_slugify_idempotent() {
        let names = ["Spice Route", "Joe's Café", "already-a-slug", "A!B@C"];
        for name in names {
            let once = slugify(name);
            assert_eq!(slugify(&once), once, "slugify not idempotent for {name}");
        }
    }

    #[test]
    fn test_collection_key_collapses_punctuation() {
        assert_eq!(collection_key("Joe's Café"), "menu_joe_s_cafe");
        assert_eq!(collection_key("Joe's  Cafe!"), "menu_joe_s_cafe");
        assert_ne!(collection_key("Joe's Cafe"), collection_key("Joes Diner"));
    }

    #[test]
    fn test_alnum_key() {
        assert_eq!(alnum_key("spice--route"), "spiceroute");
        assert_eq!(alnum_key("Spice Route"), "spiceroute");
        assert_eq!(alnum_key("Café 21"), "cafe21");
    }

    #[test]
    fn test_tokens() {
        assert_eq!(tokens("spice--route"), vec!["spice", "route"]);
        assert_eq!(tokens("Spice Route"), vec!["spice", "route"]);
        assert_eq!(tokens("--"), Vec::<String>::new());
    }
}
