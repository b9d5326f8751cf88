use bookshelf_db::{Document, DocumentId};
use serde::{Deserialize, Serialize, Serializer};

/// Book record, generic over how its author is represented.
///
/// The stored form keeps the raw author reference (`Book<String>`); reads
/// swap it for the referenced author, or `None` when the reference dangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book<A = String> {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub title: String,
    pub author: A,
    pub description: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
}

/// Whole prices are written as JSON integers.
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    if price.fract() == 0.0 && price.abs() <= MAX_EXACT {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

impl Document for Book {
    const COLLECTION: &'static str = "books";

    fn id(&self) -> DocumentId {
        self.id
    }
}

impl Book {
    /// The author reference as an identity, if it is one.
    pub fn author_id(&self) -> Option<DocumentId> {
        DocumentId::parse(&self.author)
    }
}

impl<A> Book<A> {
    /// Replace the author field, keeping everything else.
    pub fn with_author<B>(self, author: B) -> Book<B> {
        Book {
            id: self.id,
            title: self.title,
            author,
            description: self.description,
            price: self.price,
        }
    }
}

/// Validated payload for creating a book.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
}

impl NewBook {
    pub fn into_book(self, id: DocumentId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            description: self.description,
            price: self.price,
        }
    }
}

/// Validated partial update; only the fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}
