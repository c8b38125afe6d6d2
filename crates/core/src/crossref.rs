//! Cross-reference between the rating dataset's movie ids and the catalog's
//!
//! The rating matrices are keyed by MovieLens ids while the content catalog
//! uses TMDB ids. Entries without a TMDB id are unreachable from the content
//! side.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the cross-reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieLink {
    /// MovieLens id (rating-matrix namespace).
    pub movie_id: i64,
    /// TMDB id (catalog namespace), if a mapping exists.
    pub tmdb_id: Option<i64>,
    pub title: String,
}

/// Bidirectional id mapping with title lookup on the rating side.
pub struct LinkTable {
    links: Vec<MovieLink>,
    by_movielens: HashMap<i64, usize>,
    by_tmdb: HashMap<i64, usize>,
}

impl LinkTable {
    pub fn new(links: Vec<MovieLink>) -> Self {
        let mut by_movielens = HashMap::with_capacity(links.len());
        let mut by_tmdb = HashMap::new();
        for (pos, link) in links.iter().enumerate() {
            by_movielens.insert(link.movie_id, pos);
            if let Some(tmdb_id) = link.tmdb_id {
                by_tmdb.insert(tmdb_id, pos);
            }
        }
        Self {
            links,
            by_movielens,
            by_tmdb,
        }
    }

    pub fn get(&self, movielens_id: i64) -> Option<&MovieLink> {
        self.by_movielens
            .get(&movielens_id)
            .map(|&pos| &self.links[pos])
    }

    /// TMDB id for a MovieLens id, `None` when unmapped.
    pub fn tmdb_for(&self, movielens_id: i64) -> Option<i64> {
        self.get(movielens_id).and_then(|link| link.tmdb_id)
    }

    /// MovieLens id for a TMDB id, `None` when unmapped.
    pub fn movielens_for(&self, tmdb_id: i64) -> Option<i64> {
        self.by_tmdb
            .get(&tmdb_id)
            .map(|&pos| self.links[pos].movie_id)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_both_directions_and_skips_unmapped() {
        let table = LinkTable::new(vec![
            MovieLink {
                movie_id: 1,
                tmdb_id: Some(100),
                title: "Alpha".to_string(),
            },
            MovieLink {
                movie_id: 2,
                tmdb_id: None,
                title: "Beta".to_string(),
            },
        ]);

        assert_eq!(table.tmdb_for(1), Some(100));
        assert_eq!(table.tmdb_for(2), None);
        assert_eq!(table.movielens_for(100), Some(1));
        assert_eq!(table.movielens_for(999), None);
        assert_eq!(table.get(2).unwrap().title, "Beta");
    }
}
