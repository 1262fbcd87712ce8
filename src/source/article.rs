//! The record type returned by the posts API.
//!
//! `Article` mirrors one element of the JSON array served by
//! `GET /posts?page=N`.  It is decoded with serde and never mutated after
//! that; presentation concerns live in [`crate::cell`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// A single article as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique identifier used for de-duplication.
    ///
    /// Some backends send numeric ids; both forms are normalised to a string.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,

    /// Headline.
    #[serde(default = "untitled")]
    pub title: String,

    /// Optional summary text.
    #[serde(default)]
    pub description: Option<String>,

    /// Link to the full article.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    /// Publication timestamp, used for sorting.
    pub published_at: DateTime<Utc>,
}

fn untitled() -> String {
    "(untitled)".to_string()
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
