use heck::ToTitleCase;
use regex::Regex;

use crate::core::scaffold;
use crate::core::{Error, Result};

const NAME_PATTERN: &str = r"^[a-z][a-z0-9_]*$";
const MAX_NAME_LEN: usize = 50;

/// Reserved words of the backend language. The project name becomes a Python
/// package name, so these can never be used.
const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "break", "class", "continue", "def", "del", "elif", "else", "except",
    "exec", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "not", "or",
    "pass", "print", "raise", "return", "try", "while", "with", "yield",
];

/// A validated replacement project identifier.
///
/// Construction via [`NewName::parse`] is the only way to obtain one, so any
/// `NewName` reaching the planner has already passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewName {
    raw: String,
}

impl NewName {
    /// Validate a proposed project name.
    ///
    /// Rejects empty names, names that fail the shape check, names longer
    /// than 50 characters, Python keywords, and the scaffold name itself.
    /// Each rejection carries the specific reason in the error details.
    pub fn parse(raw: &str) -> Result<NewName> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(Error::rename_invalid_name(name, "Project name cannot be empty"));
        }

        let re = Regex::new(NAME_PATTERN)
            .map_err(|e| Error::internal_unexpected(e.to_string()))?;
        if !re.is_match(name) {
            return Err(Error::rename_invalid_name(
                name,
                "Project name must start with a letter and contain only lowercase letters, numbers, and underscores",
            ));
        }

        if name.len() > MAX_NAME_LEN {
            return Err(Error::rename_invalid_name(
                name,
                "Project name must be 50 characters or less",
            ));
        }

        if PYTHON_KEYWORDS.contains(&name) {
            return Err(Error::rename_invalid_name(
                name,
                format!("'{}' is a Python keyword and cannot be used as a project name", name),
            ));
        }

        if name == scaffold::SOURCE_NAME {
            return Err(Error::rename_invalid_name(
                name,
                "New project name is the same as the current name",
            ));
        }

        Ok(NewName {
            raw: name.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `my_app` → `my-app`
    pub fn hyphenated(&self) -> String {
        self.raw.replace('_', "-")
    }

    /// `my_app` → `My App`
    pub fn title_phrase(&self) -> String {
        self.raw.to_title_case()
    }

    /// `my_app` → `my_app_project`
    pub fn project_module(&self) -> String {
        format!("{}_project", self.raw)
    }

    /// `my_app` → `my_app_project.settings`
    pub fn settings_module(&self) -> String {
        format!("{}.settings", self.project_module())
    }

    /// The fixed ordered list of literal substitutions applied to file
    /// contents. Order matters: the display forms overlap, and sequential
    /// literal replacement reproduces the scaffold's documented behavior.
    pub fn substitutions(&self) -> Vec<(String, String)> {
        vec![
            (scaffold::SOURCE_NAME.to_string(), self.raw.clone()),
            (
                scaffold::SOURCE_NAME_HYPHENATED.to_string(),
                self.hyphenated(),
            ),
            (scaffold::SOURCE_TITLE.to_string(), self.title_phrase()),
            (scaffold::SOURCE_TITLE_LOWER.to_string(), self.title_phrase()),
            (scaffold::SOURCE_PROJECT.to_string(), self.project_module()),
            (
                scaffold::SOURCE_PROJECT_TITLE.to_string(),
                format!("{} project", self.title_phrase()),
            ),
        ]
    }
}

impl std::fmt::Display for NewName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
