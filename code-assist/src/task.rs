//! Request task kinds and their wire names.

use std::fmt;

use crate::errors::Error;

/// The requested transformation category.
///
/// Wire names follow the public request contract: `spiegazione` (explain),
/// `traduzione` (translate), `fix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Step-by-step explanation of the submitted code.
    Explain,
    /// Translation into a different programming language.
    Translate,
    /// Error analysis and correction, with changed lines flagged.
    Fix,
}

impl Task {
    /// Stable wire name, also used in cache keys and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Explain => "spiegazione",
            Self::Translate => "traduzione",
            Self::Fix => "fix",
        }
    }

    /// Parses a wire name. Matching is exact: the request contract fixes
    /// the three values.
    ///
    /// # Errors
    /// [`Error::InvalidTask`] for anything else.
    pub fn parse(value: &str) -> Result<Self, Error> {
        match value {
            "spiegazione" => Ok(Self::Explain),
            "traduzione" => Ok(Self::Translate),
            "fix" => Ok(Self::Fix),
            other => Err(Error::InvalidTask {
                task: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_three_wire_names() {
        assert_eq!(Task::parse("spiegazione").unwrap(), Task::Explain);
        assert_eq!(Task::parse("traduzione").unwrap(), Task::Translate);
        assert_eq!(Task::parse("fix").unwrap(), Task::Fix);
    }

    #[test]
    fn rejects_anything_else() {
        for bad in ["refactor", "FIX", " fix", "spiega", ""] {
            assert!(matches!(
                Task::parse(bad),
                Err(Error::InvalidTask { .. })
            ));
        }
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(Task::Translate.to_string(), "traduzione");
    }
}
