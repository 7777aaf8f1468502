use regex::Regex;

pub(crate) fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

/// Cap on matched text recorded in findings. Keeps full secret values out
/// of reports and persisted results.
pub(crate) const MATCH_PREVIEW_LIMIT: usize = 50;

pub(crate) fn truncate_match(text: &str) -> String {
    if text.chars().count() > MATCH_PREVIEW_LIMIT {
        let head: String = text.chars().take(MATCH_PREVIEW_LIMIT).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_matches_pass_through() {
        assert_eq!(truncate_match("api_key = \"abc\""), "api_key = \"abc\"");
    }

    #[test]
    fn long_matches_are_capped_with_ellipsis() {
        let long = "x".repeat(80);
        let out = truncate_match(&long);
        assert_eq!(out.len(), MATCH_PREVIEW_LIMIT + 3);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn cap_respects_char_boundaries() {
        let long = "é".repeat(60);
        let out = truncate_match(&long);
        assert_eq!(out.chars().count(), MATCH_PREVIEW_LIMIT + 3);
    }
}
