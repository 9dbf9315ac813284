use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The language a project (or library) is written in.
///
/// Project configuration files spell it `Python` / `CSharp`; the
/// `default-language` option spells it `python` / `csharp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Python,
    CSharp,
}

impl Language {
    /// Spelling used by the `default-language` option.
    pub fn option_value(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::CSharp => "csharp",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" => Ok(Language::Python),
            "csharp" => Ok(Language::CSharp),
            other => Err(format!("unknown language '{}'", other)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Python => write!(f, "Python"),
            Language::CSharp => write!(f, "C#"),
        }
    }
}
