/// In-memory filter/sort/paginate pipeline for the table views
///
/// The list endpoints return whole collections; everything the tables do
/// — case-insensitive substring search on name, exact category filter
/// (products only), column sort with an ascending/descending toggle, and
/// fixed-size pages — is a pure transformation over the already-fetched
/// rows, recomputed from scratch whenever any input changes. Nothing is
/// cached beyond the current render.
///
/// # Example
///
/// ```
/// use stockroom_client::listing::{CategoryQuery, CategorySort};
/// use stockroom_client::types::CategorySummary;
///
/// let rows = vec![
///     CategorySummary { id: 1, name: "Books".to_string(), image: None },
///     CategorySummary { id: 2, name: "Audio".to_string(), image: None },
/// ];
///
/// let mut query = CategoryQuery::default();
/// query.sort = CategorySort::Name;
///
/// let page = query.apply(&rows);
/// assert_eq!(page.items[0].name, "Audio");
/// ```

use crate::types::{CategorySummary, ProductSummary};
use std::cmp::Ordering;

/// Rows per page in every table view
pub const PAGE_SIZE: usize = 5;

/// Sort direction for a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,

    /// Largest first
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Applies the direction to an ascending ordering
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// One page of a filtered, sorted collection
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Rows on this page
    pub items: Vec<T>,

    /// 1-based page index actually rendered (clamped into range)
    pub page: usize,

    /// Total number of pages (0 when the filtered set is empty)
    pub page_count: usize,

    /// Total rows after filtering
    pub total: usize,
}

/// Slices a filtered+sorted collection into the requested page
fn paginate<T: Clone>(rows: Vec<T>, requested_page: usize) -> Page<T> {
    let total = rows.len();
    let page_count = total.div_ceil(PAGE_SIZE);
    let page = requested_page.clamp(1, page_count.max(1));

    let start = (page - 1) * PAGE_SIZE;
    let items = rows
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .collect();

    Page {
        items,
        page,
        page_count,
        total,
    }
}

/// Case-insensitive substring match on a row name
fn matches_search(name: &str, search: &str) -> bool {
    search.is_empty() || name.to_lowercase().contains(&search.to_lowercase())
}

/// Sortable columns of the category table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySort {
    /// Sort by ID
    #[default]
    Id,

    /// Sort by name (case-insensitive)
    Name,
}

/// View state of the category table
#[derive(Debug, Clone)]
pub struct CategoryQuery {
    /// Substring searched in names, case-insensitive
    pub search: String,

    /// Active sort column
    pub sort: CategorySort,

    /// Sort direction
    pub direction: SortDirection,

    /// Requested 1-based page
    pub page: usize,
}

impl Default for CategoryQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: CategorySort::default(),
            direction: SortDirection::default(),
            page: 1,
        }
    }
}

impl CategoryQuery {
    /// Clicks a column header: same column toggles direction, a new
    /// column sorts ascending
    pub fn toggle_sort(&mut self, column: CategorySort) {
        if self.sort == column {
            self.direction = self.direction.toggled();
        } else {
            self.sort = column;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Runs the full pipeline over the fetched rows
    pub fn apply(&self, rows: &[CategorySummary]) -> Page<CategorySummary> {
        let mut rows: Vec<CategorySummary> = rows
            .iter()
            .filter(|row| matches_search(&row.name, &self.search))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match self.sort {
                CategorySort::Id => a.id.cmp(&b.id),
                CategorySort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            };
            self.direction.apply(ordering)
        });

        paginate(rows, self.page)
    }
}

/// Sortable columns of the product table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Sort by ID
    #[default]
    Id,

    /// Sort by name (case-insensitive)
    Name,

    /// Sort by price
    Price,

    /// Sort by stock level
    Stock,
}

/// View state of the product table
#[derive(Debug, Clone)]
pub struct ProductQuery {
    /// Substring searched in names, case-insensitive
    pub search: String,

    /// Exact-match category filter, if one is selected
    pub category_id: Option<i64>,

    /// Active sort column
    pub sort: ProductSort,

    /// Sort direction
    pub direction: SortDirection,

    /// Requested 1-based page
    pub page: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category_id: None,
            sort: ProductSort::default(),
            direction: SortDirection::default(),
            page: 1,
        }
    }
}

impl ProductQuery {
    /// Clicks a column header: same column toggles direction, a new
    /// column sorts ascending
    pub fn toggle_sort(&mut self, column: ProductSort) {
        if self.sort == column {
            self.direction = self.direction.toggled();
        } else {
            self.sort = column;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Runs the full pipeline over the fetched rows
    pub fn apply(&self, rows: &[ProductSummary]) -> Page<ProductSummary> {
        let mut rows: Vec<ProductSummary> = rows
            .iter()
            .filter(|row| {
                matches_search(&row.name, &self.search)
                    && self
                        .category_id
                        .map_or(true, |category_id| row.category_id == category_id)
            })
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match self.sort {
                ProductSort::Id => a.id.cmp(&b.id),
                ProductSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                ProductSort::Price => a.price.cmp(&b.price),
                ProductSort::Stock => a.stock.cmp(&b.stock),
            };
            self.direction.apply(ordering)
        });

        paginate(rows, self.page)
    }
}
