//! Presentation-ready wrappers around [`Article`]s.
//!
//! A [`CellViewModel`] is what the list renders.  Two cells are equal when
//! they wrap the same article id, which is what de-duplication keys on.
//!
//! [`derive_cells`] is the whole batch → list transformation: wrap, drop
//! repeated ids, sort newest first.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};

use crate::source::Article;

#[derive(Debug, Clone)]
pub struct CellViewModel {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub published_at: DateTime<Utc>,
}

impl CellViewModel {
    pub fn new(article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            subtitle: article.description.clone(),
            author: article.author.clone(),
            published_at: article.published_at,
        }
    }

    pub fn date_line(&self) -> String {
        self.published_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl PartialEq for CellViewModel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CellViewModel {}

impl Hash for CellViewModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Turn one raw batch into the list to display.
///
/// The first occurrence of an id wins.  Equal timestamps are ordered by id
/// so the result is the same every time for the same batch.
pub fn derive_cells(articles: &[Article]) -> Vec<CellViewModel> {
    let mut seen = HashSet::with_capacity(articles.len());
    let mut cells = Vec::with_capacity(articles.len());
    for article in articles {
        if seen.insert(article.id.as_str()) {
            cells.push(CellViewModel::new(article));
        }
    }

    cells.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    cells
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Shorthand constructor; `ts` is seconds since the epoch.
    pub(crate) fn make_article(id: &str, title: &str, ts: i64) -> Article {
        Article {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            url: None,
            author: None,
            published_at: Utc.timestamp_opt(ts, 0).unwrap(),
        }
    }

    fn ids(cells: &[CellViewModel]) -> Vec<&str> {
        cells.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn duplicate_collapses_and_newest_first() {
        let batch = vec![
            make_article("a", "A", 10),
            make_article("b", "B", 20),
            make_article("a", "A again", 10),
        ];

        let cells = derive_cells(&batch);

        assert_eq!(ids(&cells), vec!["b", "a"]);
        assert_eq!(cells[1].title, "A", "first occurrence is kept");
    }

    #[test]
    fn each_id_appears_once() {
        let batch: Vec<Article> = (0..30)
            .map(|i| make_article(&format!("id-{}", i % 7), "t", i))
            .collect();

        let cells = derive_cells(&batch);

        assert_eq!(cells.len(), 7);
        let unique: HashSet<_> = cells.iter().map(|c| c.id.clone()).collect();
        assert_eq!(unique.len(), 7);
    }

    #[test]
    fn later_timestamp_sorts_before_earlier() {
        let batch = vec![
            make_article("old", "Old", 1_600_000_000),
            make_article("new", "New", 1_700_000_000),
            make_article("mid", "Mid", 1_650_000_000),
        ];

        let cells = derive_cells(&batch);

        assert_eq!(ids(&cells), vec!["new", "mid", "old"]);
        assert!(cells
            .windows(2)
            .all(|pair| pair[0].published_at >= pair[1].published_at));
    }

    #[test]
    fn derivation_is_repeatable() {
        let batch = vec![
            make_article("x", "X", 5),
            make_article("y", "Y", 5),
            make_article("z", "Z", 5),
            make_article("w", "W", 9),
        ];

        let first = derive_cells(&batch);
        let second = derive_cells(&batch);

        assert_eq!(ids(&first), ids(&second));
        assert_eq!(ids(&first), vec!["w", "x", "y", "z"]);
    }

    #[test]
    fn empty_batch_gives_empty_list() {
        assert!(derive_cells(&[]).is_empty());
    }

    #[test]
    fn equality_is_by_id_only() {
        let a = CellViewModel::new(&make_article("same", "One", 1));
        let b = CellViewModel::new(&make_article("same", "Two", 2));
        assert_eq!(a, b);
    }

    #[test]
    fn date_line_format() {
        let cell = CellViewModel::new(&make_article("d", "D", 0));
        assert_eq!(cell.date_line(), "1970-01-01 00:00");
    }
}
