//! Product directory queries: search, sort and paginate a fetched product list.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::ProductSummary;

pub const DEFAULT_PER_PAGE: usize = 12;
pub const MAX_PER_PAGE: usize = 100;

/// Directory sort order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Newest,
    MostVoted,
    Alphabetical,
}

impl FromStr for ProductSort {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "newest" => Ok(ProductSort::Newest),
            "most_voted" | "popular" | "votes" => Ok(ProductSort::MostVoted),
            "alphabetical" | "name" => Ok(ProductSort::Alphabetical),
            _ => Err(anyhow::anyhow!("Invalid sort order: {}", s)),
        }
    }
}

/// Directory query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListQuery {
    /// Case-insensitive substring matched against name and tagline
    pub search: Option<String>,
    #[serde(default)]
    pub sort: ProductSort,
    /// 1-based page number
    pub page: usize,
    pub per_page: usize,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort: ProductSort::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl ProductListQuery {
    /// Filter, sort and slice `products` into the requested page.
    ///
    /// Page numbers past the end yield an empty page; `per_page` is clamped to
    /// `1..=MAX_PER_PAGE`.
    pub fn apply(&self, products: &[ProductSummary]) -> Page<ProductSummary> {
        let needle = self
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut matches: Vec<&ProductSummary> = products
            .iter()
            .filter(|product| match &needle {
                Some(needle) => {
                    product.name.to_lowercase().contains(needle)
                        || product.tagline.to_lowercase().contains(needle)
                }
                None => true,
            })
            .collect();

        match self.sort {
            ProductSort::Newest => matches.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ProductSort::MostVoted => matches.sort_by(|a, b| {
                b.vote_count
                    .cmp(&a.vote_count)
                    .then_with(|| b.created_at.cmp(&a.created_at))
            }),
            ProductSort::Alphabetical => {
                matches.sort_by_key(|product| product.name.to_lowercase())
            }
        }

        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        let page = self.page.max(1);
        let total = matches.len();
        let total_pages = total.div_ceil(per_page);

        let items = matches
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .cloned()
            .collect();

        Page {
            items,
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn product(name: &str, tagline: &str, votes: i64, day: u32) -> ProductSummary {
        ProductSummary {
            id: Uuid::new_v4(),
            name: name.to_string(),
            tagline: tagline.to_string(),
            icon_url: None,
            vote_count: votes,
            has_voted: false,
            maker_username: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, day, 0, 0, 0).unwrap(),
        }
    }

    fn fixtures() -> Vec<ProductSummary> {
        vec![
            product("Beacon", "Status pages for makers", 40, 3),
            product("anvil", "Forge your CLI", 12, 5),
            product("Compass", "Find your next idea", 40, 9),
            product("Drift", "Async standups", 3, 1),
        ]
    }

    fn names(page: &Page<ProductSummary>) -> Vec<&str> {
        page.items.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn newest_first_by_default() {
        let page = ProductListQuery::default().apply(&fixtures());
        assert_eq!(names(&page), vec!["Compass", "anvil", "Beacon", "Drift"]);
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn most_voted_breaks_ties_by_recency() {
        let query = ProductListQuery {
            sort: ProductSort::MostVoted,
            ..Default::default()
        };
        let page = query.apply(&fixtures());
        assert_eq!(names(&page), vec!["Compass", "Beacon", "anvil", "Drift"]);
    }

    #[test]
    fn alphabetical_ignores_case() {
        let query = ProductListQuery {
            sort: ProductSort::Alphabetical,
            ..Default::default()
        };
        let page = query.apply(&fixtures());
        assert_eq!(names(&page), vec!["anvil", "Beacon", "Compass", "Drift"]);
    }

    #[test]
    fn search_matches_name_or_tagline() {
        let query = ProductListQuery {
            search: Some("  YOUR ".to_string()),
            ..Default::default()
        };
        let page = query.apply(&fixtures());
        assert_eq!(names(&page), vec!["Compass", "anvil"]);
    }

    #[test]
    fn pagination_slices_and_clamps() {
        let query = ProductListQuery {
            sort: ProductSort::Alphabetical,
            page: 2,
            per_page: 3,
            ..Default::default()
        };
        let page = query.apply(&fixtures());
        assert_eq!(names(&page), vec!["Drift"]);
        assert_eq!(page.total_pages, 2);

        let past_end = ProductListQuery {
            page: 9,
            ..Default::default()
        };
        assert!(past_end.apply(&fixtures()).items.is_empty());

        let zero = ProductListQuery {
            page: 0,
            per_page: 0,
            ..Default::default()
        };
        let page = zero.apply(&fixtures());
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 1);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn sort_parses_aliases() {
        assert_eq!("popular".parse::<ProductSort>().unwrap(), ProductSort::MostVoted);
        assert_eq!("most-voted".parse::<ProductSort>().unwrap(), ProductSort::MostVoted);
        assert!("random".parse::<ProductSort>().is_err());
    }
}
