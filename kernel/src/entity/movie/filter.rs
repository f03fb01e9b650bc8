use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::{CategoryId, MovieRating, ReleaseYear};

/// Optional catalog predicates. Every present field narrows the result (AND semantics).
#[derive(Debug, Clone, Default, PartialEq, References)]
pub struct MovieFilter {
    keyword: Option<String>,
    category_id: Option<CategoryId>,
    release_year: Option<ReleaseYear>,
    min_rating: Option<MovieRating>,
}

impl MovieFilter {
    /// Case-insensitive substring of the title. Blank keywords are ignored.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        let trimmed = keyword.trim();
        self.keyword = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn with_category_id(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_release_year(mut self, release_year: ReleaseYear) -> Self {
        self.release_year = Some(release_year);
        self
    }

    /// Inclusive lower bound on the movie rating.
    pub fn with_min_rating(mut self, min_rating: MovieRating) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keyword.is_none()
            && self.category_id.is_none()
            && self.release_year.is_none()
            && self.min_rating.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieSortKey {
    #[default]
    Title,
    Year,
    Rating,
}

impl MovieSortKey {
    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "year" => Some(Self::Year),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(direction: &str) -> Option<Self> {
        match direction.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct MovieSort {
    pub key: MovieSortKey,
    pub direction: SortDirection,
}

impl MovieSort {
    pub fn new(key: MovieSortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Builds an ordering from raw request values.
    ///
    /// An unrecognized key resets the whole ordering to title ascending,
    /// an unrecognized direction only falls back to ascending.
    pub fn parse(key: Option<&str>, direction: Option<&str>) -> Self {
        let key = match key.filter(|key| !key.trim().is_empty()) {
            None => MovieSortKey::default(),
            Some(key) => match MovieSortKey::parse(key) {
                Some(key) => key,
                None => return Self::default(),
            },
        };
        let direction = direction
            .and_then(SortDirection::parse)
            .unwrap_or_default();
        Self { key, direction }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn blank_keyword_is_dropped() {
        let filter = MovieFilter::default().with_keyword("   ");
        assert!(filter.keyword().is_none());
        assert!(filter.is_empty());

        let filter = MovieFilter::default().with_keyword(" matrix ");
        assert_eq!(filter.keyword().as_deref(), Some("matrix"));
    }

    #[test]
    fn sort_defaults_to_title_ascending() {
        let sort = MovieSort::parse(None, None);
        assert_eq!(sort, MovieSort::new(MovieSortKey::Title, SortDirection::Asc));
    }

    #[test]
    fn known_sort_keys_keep_direction() {
        let sort = MovieSort::parse(Some("rating"), Some("DESC"));
        assert_eq!(sort, MovieSort::new(MovieSortKey::Rating, SortDirection::Desc));

        let sort = MovieSort::parse(Some("year"), Some("sideways"));
        assert_eq!(sort, MovieSort::new(MovieSortKey::Year, SortDirection::Asc));
    }

    #[test]
    fn unknown_sort_key_falls_back_to_title_ascending() {
        let sort = MovieSort::parse(Some("movie_id; DROP TABLE movie"), Some("desc"));
        assert_eq!(sort, MovieSort::default());
    }
}
