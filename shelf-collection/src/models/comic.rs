//! Comic record entity and reading status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reading status of a comic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComicStatus {
    /// Already read; carries a 1-5 rating
    Read,
    /// On the to-read pile; rating is always 0
    ToRead,
}

impl fmt::Display for ComicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComicStatus::Read => write!(f, "read"),
            ComicStatus::ToRead => write!(f, "to-read"),
        }
    }
}

impl FromStr for ComicStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(ComicStatus::Read),
            "to-read" => Ok(ComicStatus::ToRead),
            other => Err(format!("unknown comic status: {other}")),
        }
    }
}

/// A persisted comic record. The record store assigns `id` at creation;
/// every other field is owned by the submission workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComicRecord {
    pub id: String,
    pub title: String,
    pub status: ComicStatus,
    /// 0-5; 0 when status is to-read, 1-5 once read and rated
    pub rating: u8,
    /// Canonical URL of the uploaded cover asset, absent when no image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Empty string means "no description"; a missing remote field
    /// deserializes to the same
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field payload sent to the record store on create/update. `None` fields
/// are omitted from the document, leaving stored values untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComicFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ComicStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
