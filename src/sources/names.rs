use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+(jr\.?|sr\.?|ii|iii|iv|v)$").expect("valid suffix pattern"));

/// Matching key for a display name: `"Luka Dončić"` and `"luka doncic"` agree,
/// as do `"Jimmy Butler III"` and `"Jimmy Butler"`.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let unaccented: String = lowered.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    let without_suffix = SUFFIX.replace(&unaccented, "");
    let stripped = without_suffix.replace(['.', '\''], "");

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
