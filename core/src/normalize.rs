//! Camel-case to snake-case key normalization.
//!
//! Two substitution passes followed by lowercasing. The passes are kept
//! exactly as the wire names require, including the quirk that an underscore
//! already sitting before a capitalized word turns into a double underscore
//! (`CamelCase_Underscore` becomes `camel_case__underscore`).

use std::sync::OnceLock;

use regex::Regex;

/// Convert a camel-case identifier to snake case.
///
/// Acronym runs split before their last capital when a capitalized word
/// follows (`HTTPResponseCode` -> `http_response_code`), and digits stay with
/// the segment before them (`Camel2CaseToo3` -> `camel2_case_too3`).
/// Snake-case input comes back unchanged.
pub fn camel_to_snake_case(name: &str) -> String {
    // Any character followed by a capitalized word: `xWord` -> `x_Word`.
    static RE_WORD: OnceLock<Regex> = OnceLock::new();
    let re_word =
        RE_WORD.get_or_init(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("static pattern"));

    // Lowercase letter or digit followed by a capital: `tH` -> `t_H`.
    static RE_CASE: OnceLock<Regex> = OnceLock::new();
    let re_case =
        RE_CASE.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static pattern"));

    let split_words = re_word.replace_all(name, "${1}_${2}");
    re_case.replace_all(&split_words, "${1}_${2}").to_lowercase()
}
