/// Inline italics markers the API leaves in some translations.
const MARKUP_TOKENS: [&str; 2] = ["<i>", "</i>"];

/// Normalize a verse as received, treating a missing text as empty.
pub fn normalize_verse_text(input: Option<&str>) -> String {
    clean_text(input.unwrap_or_default())
}

/// Strip italics markers and collapse whitespace.
///
/// Any run of spaces, tabs, or newlines becomes a single space and the
/// result is trimmed. Nothing else in the text is touched, so running it
/// twice gives the same result as running it once.
pub fn clean_text(input: &str) -> String {
    let stripped = strip_markup(input);
    collapse_whitespace(&stripped)
}

// Removing one marker can splice a new one together ("<<i>i>"), so repeat
// until none are left.
fn strip_markup(input: &str) -> String {
    let mut text = input.to_string();
    while MARKUP_TOKENS.iter().any(|token| text.contains(token)) {
        for token in MARKUP_TOKENS {
            text = text.replace(token, "");
        }
    }
    text
}

fn collapse_whitespace(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for word in input.split_whitespace() {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throne_verse() {
        assert_eq!(clean_text("  The <i>Throne</i>  Verse  "), "The Throne Verse");
    }

    #[test]
    fn test_markers_removed_everywhere() {
        let inputs = [
            "<i>start</i> middle end",
            "a<i>b</i>c",
            "</i>stray close and <i>stray open",
            "<i><i>nested</i></i>",
        ];
        for input in inputs {
            let out = clean_text(input);
            assert!(!out.contains("<i>"), "{out:?}");
            assert!(!out.contains("</i>"), "{out:?}");
        }
        assert_eq!(clean_text("a<i>b</i>c"), "abc");
        assert_eq!(clean_text("<<i>i>>"), ">");
    }

    #[test]
    fn test_other_markup_untouched() {
        assert_eq!(clean_text("<b>bold</b> & <I>caps</I>"), "<b>bold</b> & <I>caps</I>");
    }

    #[test]
    fn test_irregular_whitespace() {
        let out = clean_text("\t Lo!  We\n\nhave given\r\nthee\tAbundance.  \n");
        assert_eq!(out, "Lo! We have given thee Abundance.");
        assert!(!out.contains("  "));
        assert_eq!(out, out.trim());
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "  The <i>Throne</i>  Verse  ",
            "plain",
            "",
            "   ",
            "<<i>i>>",
            "Say:\tHe is Allah,\n the One!",
            "بِسْمِ   ٱللَّهِ",
        ];
        for input in inputs {
            let once = clean_text(input);
            assert_eq!(clean_text(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_absent_text_is_empty() {
        assert_eq!(normalize_verse_text(None), "");
        assert_eq!(normalize_verse_text(Some("  x ")), "x");
    }

    #[test]
    fn test_non_ascii_preserved() {
        assert_eq!(clean_text("بِسْمِ ٱللَّهِ"), "بِسْمِ ٱللَّهِ");
    }
}
