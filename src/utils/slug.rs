//! Slug generation for ad landing URLs.
//!
//! A slug is derived from the ad title and suffixed with a short token. The
//! store is never consulted before insert, so the suffix is what keeps two
//! ads with the same title apart.

use chrono::{DateTime, Utc};
use rand::Rng;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Base length cap for slugs created through the quick-create endpoint.
pub const QUICK_SLUG_MAX_LEN: usize = 60;

/// Base length cap for slugs created through the interactive form.
pub const INTERACTIVE_SLUG_MAX_LEN: usize = 50;

/// Prefix carried by every slug created through the interactive form.
pub const INTERACTIVE_SLUG_PREFIX: &str = "popx";

const RANDOM_SUFFIX_LEN: usize = 4;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Slug layout, one per submission mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugStyle {
    /// `{title}-{last 6 digits of epoch millis}`, base capped at 60.
    Quick,
    /// `popx-{title}-{4 random base-36 chars}`, base capped at 50.
    Interactive,
}

/// Converts free text into a URL-safe slug base.
///
/// The text is lowercased, diacritics are stripped via NFD decomposition,
/// runs of anything outside `[a-z0-9]` collapse into a single `-`, and
/// leading/trailing hyphens are trimmed. The output is capped at `max_len`
/// characters and may be empty.
///
/// ```ignore
/// assert_eq!(slugify("Pão de Queijo!", 60), "pao-de-queijo");
/// ```
pub fn slugify(text: &str, max_len: usize) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    let decomposed = text
        .chars()
        .flat_map(char::to_lowercase)
        .nfd()
        .filter(|c| !is_combining_mark(*c));

    for c in decomposed {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    // Only ASCII remains, so byte and char lengths agree.
    slug.truncate(max_len);
    slug.trim_end_matches('-').to_string()
}

/// Last six digits of the epoch-millisecond clock, zero-padded.
pub fn timestamp_suffix(now: DateTime<Utc>) -> String {
    format!("{:06}", now.timestamp_millis().rem_euclid(1_000_000))
}

/// Short lowercase base-36 token.
pub fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..RANDOM_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// Builds a complete slug for a new ad.
///
/// Always non-empty and matching `^[a-z0-9]+(-[a-z0-9]+)*$`, even when the
/// title has no usable characters.
pub fn generate_slug(title: &str, style: SlugStyle, now: DateTime<Utc>) -> String {
    let (prefix, base, suffix) = match style {
        SlugStyle::Quick => (None, slugify(title, QUICK_SLUG_MAX_LEN), timestamp_suffix(now)),
        SlugStyle::Interactive => (
            Some(INTERACTIVE_SLUG_PREFIX),
            slugify(title, INTERACTIVE_SLUG_MAX_LEN),
            random_suffix(),
        ),
    };

    prefix
        .into_iter()
        .chain((!base.is_empty()).then_some(base.as_str()))
        .chain(std::iter::once(suffix.as_str()))
        .collect::<Vec<_>>()
        .join("-")
}

/// Returns true if `slug` could have been produced by [`generate_slug`].
///
/// Used to reject obviously bogus lookups before touching the store.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 128
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_724_000_123_456).unwrap()
    }

    #[test]
    fn test_slugify_strips_diacritics() {
        assert_eq!(slugify("Pão de Queijo", 60), "pao-de-queijo");
        assert_eq!(slugify("Açaí com Granola", 60), "acai-com-granola");
    }

    #[test]
    fn test_slugify_marks_from_lowercasing() {
        assert_eq!(slugify("İstanbul", 60), "istanbul");
        assert_eq!(slugify("KEBAB İSTANBUL", 60), "kebab-istanbul");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  Bolo -- de   Chocolate!!  ", 60), "bolo-de-chocolate");
    }

    #[test]
    fn test_slugify_lowercases() {
        assert_eq!(slugify("iPhone 15 PRO", 60), "iphone-15-pro");
    }

    #[test]
    fn test_slugify_caps_length_without_trailing_hyphen() {
        let slug = slugify("abcd efgh", 5);
        assert_eq!(slug, "abcd");

        let long = "palavra ".repeat(30);
        let slug = slugify(&long, 60);
        assert!(slug.len() <= 60);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_slugify_empty_and_symbols() {
        assert_eq!(slugify("", 60), "");
        assert_eq!(slugify("!!! ??? ***", 60), "");
        assert_eq!(slugify("日本語", 60), "");
    }

    #[test]
    fn test_timestamp_suffix_is_last_six_digits() {
        assert_eq!(timestamp_suffix(fixed_now()), "123456");

        let small = Utc.timestamp_millis_opt(1_000_000_000_042).unwrap();
        assert_eq!(timestamp_suffix(small), "000042");
    }

    #[test]
    fn test_random_suffix_shape() {
        let suffix = random_suffix();
        assert_eq!(suffix.len(), 4);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_generate_quick_slug() {
        let slug = generate_slug("Bolo de Chocolate", SlugStyle::Quick, fixed_now());
        assert_eq!(slug, "bolo-de-chocolate-123456");
    }

    #[test]
    fn test_generate_interactive_slug() {
        let slug = generate_slug("Bolo de Chocolate", SlugStyle::Interactive, fixed_now());
        assert!(slug.starts_with("popx-bolo-de-chocolate-"));
        assert_eq!(slug.len(), "popx-bolo-de-chocolate-".len() + 4);
        assert!(is_valid_slug(&slug));
    }

    #[test]
    fn test_generate_slug_empty_title_is_suffix_only() {
        let slug = generate_slug("", SlugStyle::Quick, fixed_now());
        assert_eq!(slug, "123456");

        let slug = generate_slug("???", SlugStyle::Interactive, fixed_now());
        assert!(slug.starts_with("popx-"));
        assert!(is_valid_slug(&slug));
    }

    #[test]
    fn test_generated_slugs_are_always_valid() {
        let titles = [
            "Bolo de Chocolate",
            "",
            "---",
            "Ünïcödé Çhârs",
            "   spaced   out   ",
            "emoji 🎂 cake",
            "UPPER lower 123",
            &"x".repeat(200),
        ];

        for title in titles {
            for style in [SlugStyle::Quick, SlugStyle::Interactive] {
                let slug = generate_slug(title, style, fixed_now());
                assert!(is_valid_slug(&slug), "invalid slug {slug:?} for {title:?}");
                assert!(slug.len() <= QUICK_SLUG_MAX_LEN + 12);
            }
        }
    }

    #[test]
    fn test_is_valid_slug_rejects_bad_input() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-abc"));
        assert!(!is_valid_slug("abc-"));
        assert!(!is_valid_slug("a--b"));
        assert!(!is_valid_slug("Abc"));
        assert!(!is_valid_slug("a/b"));
        assert!(is_valid_slug("bolo-de-chocolate-123456"));
    }
}
