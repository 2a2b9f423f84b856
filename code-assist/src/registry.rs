//! Supported language registry.
//!
//! The language set is closed: requests carry free-form tags which are
//! validated case-insensitively against this registry before any engine or
//! rendering work happens. The canonical tag list is also what the
//! languages endpoint exposes.

use std::fmt;

/// A language from the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Php,
    CSharp,
    Cpp,
    Lua,
    JavaScript,
    Python,
    Rust,
    Kotlin,
    Perl,
    Scala,
    Go,
}

/// Every supported language, in listing order.
pub const SUPPORTED_LANGUAGES: [Language; 11] = [
    Language::Php,
    Language::CSharp,
    Language::Cpp,
    Language::Lua,
    Language::JavaScript,
    Language::Python,
    Language::Rust,
    Language::Kotlin,
    Language::Perl,
    Language::Scala,
    Language::Go,
];

impl Language {
    /// Canonical lowercase tag (what the listing and rendered output carry).
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Php => "php",
            Self::CSharp => "c#",
            Self::Cpp => "c++",
            Self::Lua => "lua",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Rust => "rust",
            Self::Kotlin => "kotlin",
            Self::Perl => "perl",
            Self::Scala => "scala",
            Self::Go => "go",
        }
    }

    /// Case-insensitive lookup of a free-form tag. Surrounding whitespace
    /// is ignored; anything outside the closed set is `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        let lowered = tag.trim().to_ascii_lowercase();
        SUPPORTED_LANGUAGES
            .iter()
            .copied()
            .find(|lang| lang.tag() == lowered)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Canonical tags for the languages listing endpoint.
pub fn supported_tags() -> Vec<&'static str> {
    SUPPORTED_LANGUAGES.iter().map(|lang| lang.tag()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_canonical_tag_round_trips() {
        for lang in SUPPORTED_LANGUAGES {
            assert_eq!(Language::parse(lang.tag()), Some(lang));
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Language::parse("PyThOn"), Some(Language::Python));
        assert_eq!(Language::parse("C#"), Some(Language::CSharp));
        assert_eq!(Language::parse(" C++ "), Some(Language::Cpp));
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert_eq!(Language::parse("klingon"), None);
        assert_eq!(Language::parse(""), None);
        assert_eq!(Language::parse("c"), None);
    }

    #[test]
    fn listing_exposes_all_eleven_tags() {
        let tags = supported_tags();
        assert_eq!(tags.len(), 11);
        assert!(tags.contains(&"c#"));
        assert!(tags.contains(&"go"));
    }
}
