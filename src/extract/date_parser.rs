use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Cell value the bulletin uses for "no backlog".
pub const CURRENT: &str = "C";

/// `DD` + three-letter month + `YY`, upper or mixed case.
static DATE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})([A-Za-z]{3})(\d{2})").expect("date token regex"));

/// `"01JAN20"` → `"01Jan20"`. Values without the `DDMONYY` shape (`C`, `U`,
/// free text) come back trimmed but otherwise untouched.
pub fn normalize_token(raw: &str) -> String {
    let s = raw.trim();
    match DATE_TOKEN.captures(s) {
        Some(caps) => format!("{}{}{}", &caps[1], capitalize(&caps[2]), &caps[3]),
        None => s.to_string(),
    }
}

/// A category marked current is available as of the bulletin's own month.
pub fn resolve_current(token: String, release_month: &str) -> String {
    if token == CURRENT {
        release_month.to_string()
    } else {
        token
    }
}

/// Fast parse of a normalized `"DDMonYY"` token.
pub fn parse_token(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.len() != 7 || !s.is_ascii() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%d%b%y").ok()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_upper_case_month() {
        assert_eq!(normalize_token("01JAN20"), "01Jan20");
        assert_eq!(normalize_token("15sep13"), "15Sep13");
        assert_eq!(normalize_token(" 22APR12 "), "22Apr12");
    }

    #[test]
    fn passes_through_non_dates() {
        assert_eq!(normalize_token("C"), "C");
        assert_eq!(normalize_token("U"), "U");
        assert_eq!(normalize_token(""), "");
        assert_eq!(normalize_token("1JAN20"), "1JAN20");
    }

    #[test]
    fn current_resolves_to_release_month() {
        assert_eq!(resolve_current("C".into(), "01Mar24"), "01Mar24");
        assert_eq!(resolve_current("01Jan12".into(), "01Mar24"), "01Jan12");
        assert_eq!(resolve_current("U".into(), "01Mar24"), "U");
    }

    #[test]
    fn parses_normalized_tokens() {
        assert_eq!(parse_token("01Jan20"), NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(parse_token("15Aug98"), NaiveDate::from_ymd_opt(1998, 8, 15));
        assert_eq!(parse_token("C"), None);
        assert_eq!(parse_token("31Feb20"), None);
    }
}
