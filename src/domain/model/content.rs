//! Dictionary words and archive songs, plus the shared search/sort rules
//! both storage backends apply to them.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Word {
    pub id: String,
    pub tai_khamyang: String,
    pub english: String,
    pub assamese: String,
    /// Filename reference under the upload directory, if audio was attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_path: Option<String>,
}

/// Validated text fields for a word create/update.
#[derive(Debug, Clone)]
pub struct WordFields {
    pub tai_khamyang: String,
    pub english: String,
    pub assamese: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Song {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Filename reference under the upload directory, if audio was attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Validated fields for a song create/update.
#[derive(Debug, Clone)]
pub struct SongFields {
    pub title: String,
    pub description: Option<String>,
}

/// Normalized list query: optional substring search plus a requested sort
/// field that still needs resolving against the kind's allow-list.
#[derive(Debug, Clone, Default)]
pub struct ContentQuery {
    pub search: Option<String>,
    pub sort_by: Option<String>,
}

/// Sortable columns for words; the first entry is the fallback default.
pub const WORD_SORT_FIELDS: &[&str] = &["tai_khamyang", "english", "assamese"];
/// Sortable columns for songs; the first entry is the fallback default.
pub const SONG_SORT_FIELDS: &[&str] = &["title", "description"];

/// Resolves a requested sort field against an allow-list. Anything not in
/// the list deterministically falls back to the list's first entry, so a
/// hostile `sort_by` can never reach an ORDER BY clause.
pub fn resolve_sort_field<'a>(requested: Option<&str>, allowed: &[&'a str]) -> &'a str {
    requested
        .and_then(|r| allowed.iter().find(|a| **a == r))
        .copied()
        .unwrap_or(allowed[0])
}

/// Case-insensitive substring match over a record's searchable fields.
/// An empty term matches everything.
pub fn matches_search(haystacks: &[&str], term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
}

impl Word {
    pub fn searchable_fields(&self) -> [&str; 3] {
        [&self.tai_khamyang, &self.english, &self.assamese]
    }

    pub fn sort_key(&self, field: &str) -> String {
        match field {
            "english" => self.english.to_lowercase(),
            "assamese" => self.assamese.to_lowercase(),
            _ => self.tai_khamyang.to_lowercase(),
        }
    }
}

impl Song {
    pub fn searchable_fields(&self) -> [&str; 2] {
        [&self.title, self.description.as_deref().unwrap_or("")]
    }

    pub fn sort_key(&self, field: &str) -> String {
        match field {
            "description" => self
                .description
                .as_deref()
                .unwrap_or("")
                .to_lowercase(),
            _ => self.title.to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sort_field_falls_back_to_default() {
        assert_eq!(
            resolve_sort_field(Some("password"), WORD_SORT_FIELDS),
            "tai_khamyang"
        );
        assert_eq!(resolve_sort_field(None, SONG_SORT_FIELDS), "title");
        assert_eq!(
            resolve_sort_field(Some("english"), WORD_SORT_FIELDS),
            "english"
        );
    }

    #[test]
    fn search_is_case_insensitive() {
        assert!(matches_search(&["Water", "পানী"], "water"));
        assert!(matches_search(&["Water"], "WAT"));
        assert!(!matches_search(&["Water"], "fire"));
        assert!(matches_search(&["anything"], ""));
    }
}
