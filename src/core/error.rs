use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationMissingArgument,
    ValidationInvalidArgument,

    RenameInvalidName,
    RenameCancelled,

    BackupCopyFailed,

    AssetsManifestMissing,
    AssetsManifestInvalid,
    AssetsEntryMissing,
    AssetsStylesheetMissing,
    AssetsTemplateMissing,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationMissingArgument => "validation.missing_argument",
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::RenameInvalidName => "rename.invalid_name",
            ErrorCode::RenameCancelled => "rename.cancelled",

            ErrorCode::BackupCopyFailed => "backup.copy_failed",

            ErrorCode::AssetsManifestMissing => "assets.manifest_missing",
            ErrorCode::AssetsManifestInvalid => "assets.manifest_invalid",
            ErrorCode::AssetsEntryMissing => "assets.entry_missing",
            ErrorCode::AssetsStylesheetMissing => "assets.stylesheet_missing",
            ErrorCode::AssetsTemplateMissing => "assets.template_missing",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidNameDetails {
    pub name: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledDetails {
    pub stage: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupCopyFailedDetails {
    pub destination: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDetails {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDetails {
    pub entry: String,
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn validation_missing_argument(args: Vec<String>) -> Self {
        Self::new(
            ErrorCode::ValidationMissingArgument,
            "Missing required argument",
            serde_json::json!({ "args": args }),
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = serde_json::to_value(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn rename_invalid_name(name: impl Into<String>, problem: impl Into<String>) -> Self {
        let problem = problem.into();
        let details = serde_json::to_value(InvalidNameDetails {
            name: name.into(),
            problem: problem.clone(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::RenameInvalidName,
            format!("Invalid project name: {}", problem),
            details,
        )
        .with_hint("Project names look like 'my_awesome_project': lowercase, digits, underscores")
    }

    pub fn rename_cancelled(stage: impl Into<String>) -> Self {
        let details = serde_json::to_value(CancelledDetails {
            stage: stage.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::RenameCancelled, "Operation cancelled", details)
    }

    pub fn backup_copy_failed(
        destination: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let details = serde_json::to_value(BackupCopyFailedDetails {
            destination: destination.into(),
            error: error.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::BackupCopyFailed, "Backup creation failed", details)
    }

    pub fn assets_manifest_missing(path: impl Into<String>) -> Self {
        let details = serde_json::to_value(ManifestDetails {
            path: path.into(),
            error: None,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::AssetsManifestMissing,
            "Build manifest not found",
            details,
        )
        .with_hint("Run 'npm run build' in frontend/ to generate the manifest")
    }

    pub fn assets_manifest_invalid(path: impl Into<String>, error: impl Into<String>) -> Self {
        let details = serde_json::to_value(ManifestDetails {
            path: path.into(),
            error: Some(error.into()),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::AssetsManifestInvalid,
            "Build manifest could not be parsed",
            details,
        )
    }

    pub fn assets_entry_missing(entry: impl Into<String>, path: impl Into<String>) -> Self {
        let entry = entry.into();
        let details = serde_json::to_value(EntryDetails {
            entry: entry.clone(),
            path: path.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::AssetsEntryMissing,
            format!("No '{}' entry found in manifest", entry),
            details,
        )
    }

    pub fn assets_stylesheet_missing(entry: impl Into<String>, path: impl Into<String>) -> Self {
        let details = serde_json::to_value(EntryDetails {
            entry: entry.into(),
            path: path.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::AssetsStylesheetMissing,
            "Manifest entry has no stylesheet files",
            details,
        )
    }

    pub fn assets_template_missing(path: impl Into<String>) -> Self {
        let details = serde_json::to_value(ManifestDetails {
            path: path.into(),
            error: None,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::AssetsTemplateMissing,
            "Backend template not found",
            details,
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::to_value(InternalIoErrorDetails {
            error: error.into(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::json!({
            "error": error.into(),
            "context": context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
