//! English singularization for table names (`authors` -> `author`)
//!
//! Rules are tried from the most specific to the most generic; the first one
//! that matches rewrites the word.

use once_cell::sync::Lazy;
use regex::Regex;

static UNCOUNTABLE: [&str; 10] = [
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

static IRREGULAR: [(&str, &str); 6] = [
    ("people", "person"),
    ("men", "man"),
    ("children", "child"),
    ("sexes", "sex"),
    ("moves", "move"),
    ("zombies", "zombie"),
];

static SINGULAR_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)(database)s$", "$1"),
        (r"(?i)(quiz)zes$", "$1"),
        (r"(?i)(matr)ices$", "${1}ix"),
        (r"(?i)(vert|ind)ices$", "${1}ex"),
        (r"(?i)^(ox)en", "$1"),
        (r"(?i)(alias|status)(es)?$", "$1"),
        (r"(?i)(octop|vir)(us|i)$", "${1}us"),
        (r"(?i)^(a)x[ie]s$", "${1}xis"),
        (r"(?i)(cris|test)(is|es)$", "${1}is"),
        (r"(?i)(shoe)s$", "$1"),
        (r"(?i)(o)es$", "$1"),
        (r"(?i)(bus)(es)?$", "$1"),
        (r"(?i)^(m|l)ice$", "${1}ouse"),
        (r"(?i)(x|ch|ss|sh)es$", "$1"),
        (r"(?i)(m)ovies$", "${1}ovie"),
        (r"(?i)(s)eries$", "${1}eries"),
        (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
        (r"(?i)([lr])ves$", "${1}f"),
        (r"(?i)(tive)s$", "$1"),
        (r"(?i)(hive)s$", "$1"),
        (r"(?i)([^f])ves$", "${1}fe"),
        (r"(?i)(^analy)(sis|ses)$", "${1}sis"),
        (
            r"(?i)((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
            "${1}sis",
        ),
        (r"(?i)([ti])a$", "${1}um"),
        (r"(?i)(n)ews$", "${1}ews"),
        (r"(?i)(ss)$", "$1"),
        (r"(?i)s$", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Prefix of `word` ending in `_` before an ASCII `plural` suffix, matched
/// without case on char boundaries of `word`
fn irregular_stem<'a>(word: &'a str, plural: &str) -> Option<&'a str> {
    let start = word.char_indices().rev().nth(plural.len().checked_sub(1)?)?.0;
    let (stem, tail) = word.split_at(start);
    (stem.ends_with('_') && tail.eq_ignore_ascii_case(plural)).then_some(stem)
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if UNCOUNTABLE.iter().any(|u| lower.ends_with(u)) {
        return word.to_string();
    }
    for (plural, singular) in IRREGULAR {
        if lower == plural {
            return singular.to_string();
        }
        if let Some(stem) = irregular_stem(word, plural) {
            return format!("{stem}{singular}");
        }
    }
    for (re, replacement) in SINGULAR_RULES.iter() {
        if re.is_match(word) {
            return re.replace(word, *replacement).into_owned();
        }
    }
    word.to_string()
}

/// Singular form of a table name, unless it is listed in `exclusions`
pub fn singular(name: &str, exclusions: &[String]) -> String {
    if exclusions.iter().any(|e| e.eq_ignore_ascii_case(name)) {
        return name.to_string();
    }
    match name.to_lowercase().as_str() {
        "campus" | "meta" => return name.to_string(),
        "calories" => return "calorie".to_string(),
        _ => {}
    }
    singularize_word(name)
}
