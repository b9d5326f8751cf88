use bookshelf_db::{Document, DocumentId};
use serde::{Deserialize, Serialize};

/// Image stored for authors created without one.
pub const DEFAULT_IMAGE: &str = "default-image.png";

/// Persisted author record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub image: String,
}

impl Document for Author {
    const COLLECTION: &'static str = "authors";

    fn id(&self) -> DocumentId {
        self.id
    }
}

/// Identity and name of an author, as embedded in book listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub first_name: String,
    pub last_name: String,
}

/// Validated payload for creating an author.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub image: Option<String>,
}

impl NewAuthor {
    /// Build the record to persist, filling in defaults.
    pub fn into_author(self, id: DocumentId) -> Author {
        Author {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            nationality: self.nationality,
            image: self.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        }
    }
}

/// Validated partial update; only the fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
