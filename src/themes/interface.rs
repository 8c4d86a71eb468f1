use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

// ── Slots ──────────────────────────────────────────────

/// Selects one independently persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Actors,
    Tags,
    #[default]
    Theme,
    Meta,
    Custom,
}

impl FileType {
    pub const ALL: [FileType; 5] = [
        FileType::Actors,
        FileType::Tags,
        FileType::Theme,
        FileType::Meta,
        FileType::Custom,
    ];

    /// Position of this slot in `ALL`.
    pub const fn index(self) -> usize {
        match self {
            FileType::Actors => 0,
            FileType::Tags => 1,
            FileType::Theme => 2,
            FileType::Meta => 3,
            FileType::Custom => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Actors => "actors",
            FileType::Tags => "tags",
            FileType::Theme => "theme",
            FileType::Meta => "meta",
            FileType::Custom => "custom",
        }
    }

    /// `custom` documents are curated by hand; their metadata is not editable over HTTP.
    pub fn accepts_metadata(&self) -> bool {
        !matches!(self, FileType::Custom)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileType::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| ThemeError::InvalidSlot(s.to_string()))
    }
}

// ── Documents ──────────────────────────────────────────

/// One named bucket of item codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub theme: String,
    #[serde(default)]
    pub list: Vec<String>,
}

impl Theme {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            theme: name.into(),
            list: Vec::new(),
        }
    }
}

/// Root object persisted per slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDocument {
    /// Schema tag, carried through untouched.
    pub version: u32,
    #[serde(default)]
    pub theme_name: String,
    #[serde(default)]
    pub description: String,
    /// Display hint for UIs only.
    #[serde(default)]
    pub allow_only_upper_case: bool,
    pub theme_list: Vec<Theme>,
    /// Keys this crate does not know about survive a rewrite.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for ThemeDocument {
    fn default() -> Self {
        Self {
            version: 1,
            theme_name: String::new(),
            description: String::new(),
            allow_only_upper_case: false,
            theme_list: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }
}

// ── Error Types ────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read theme document {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write theme document {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed theme document {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize theme document")]
    Serialize(#[source] serde_json::Error),
    #[error("no document stored for slot '{0}'")]
    Missing(FileType),
    #[error("write rejected for slot '{0}'")]
    Rejected(FileType),
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Theme not found")]
    ThemeNotFound { name: String },
    #[error("Theme already exists")]
    DuplicateTheme { name: String },
    #[error("Theme name cannot be empty")]
    EmptyName,
    #[error("Invalid theme list")]
    InvalidOrder,
    #[error("Invalid file type")]
    InvalidSlot(String),
    #[error("{0}")]
    Validation(String),
    #[error("Invalid item format")]
    InvalidCodes(Vec<String>),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ThemeError {
    /// HTTP status for this error kind.
    pub fn status_code(&self) -> u16 {
        match self {
            ThemeError::ThemeNotFound { .. } => 404,
            ThemeError::DuplicateTheme { .. } => 409,
            ThemeError::EmptyName
            | ThemeError::InvalidOrder
            | ThemeError::InvalidSlot(_)
            | ThemeError::Validation(_)
            | ThemeError::InvalidCodes(_) => 400,
            ThemeError::Storage(_) => 500,
        }
    }

    /// Stable machine-readable kind, logged alongside failures.
    pub fn kind(&self) -> &'static str {
        match self {
            ThemeError::ThemeNotFound { .. } => "theme_not_found",
            ThemeError::DuplicateTheme { .. } => "duplicate_theme",
            ThemeError::EmptyName => "empty_name",
            ThemeError::InvalidOrder => "invalid_order",
            ThemeError::InvalidSlot(_) => "invalid_slot",
            ThemeError::Validation(_) => "validation",
            ThemeError::InvalidCodes(_) => "invalid_codes",
            ThemeError::Storage(_) => "storage",
        }
    }
}

// ── Store Trait ────────────────────────────────────────

/// Persistence port. One document per slot, whole-document reads and writes.
#[async_trait]
pub trait ThemeStore: Send + Sync {
    /// Short identifier for logs (e.g. "json_file", "memory").
    fn backend_tag(&self) -> &'static str;

    /// Read the slot's document. Missing or malformed slots are errors.
    async fn load(&self, slot: FileType) -> Result<ThemeDocument, ThemeError>;

    /// Replace the slot's document.
    async fn save(&self, slot: FileType, document: &ThemeDocument) -> Result<(), ThemeError>;
}
