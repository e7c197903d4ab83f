//! Turns list query parameters into a [`PosterQuery`]: one sort direction and
//! the filters to apply.

use posterboard_kernel::settings::FilterComposition;

use super::models::Poster;

/// Raw `GET /posters` query string parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub sort: Option<String>,
    pub name: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl ListParams {
    /// Collect decoded query pairs. Unknown keys are ignored and a repeated
    /// key keeps its last value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "sort" => &mut params.sort,
                "name" => &mut params.name,
                "min_price" => &mut params.min_price,
                "max_price" => &mut params.max_price,
                _ => continue,
            };
            *slot = Some(value);
        }
        params
    }
}

/// Ordering on `created_at`, ties broken by `id` in the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` selects descending order; anything else, including nothing, is ascending.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    /// SQL keyword for an `ORDER BY` clause.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// One predicate over a poster row.
#[derive(Debug, Clone, PartialEq)]
pub enum PosterFilter {
    /// Case-insensitive substring of `name`.
    NameContains(String),
    /// `price >= bound`
    MinPrice(f64),
    /// `price <= bound`
    MaxPrice(f64),
}

impl PosterFilter {
    /// Name matching folds full Unicode case on both sides.
    pub fn matches(&self, poster: &Poster) -> bool {
        match self {
            PosterFilter::NameContains(term) => poster
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
            PosterFilter::MinPrice(bound) => poster.price >= *bound,
            PosterFilter::MaxPrice(bound) => poster.price <= *bound,
        }
    }
}

/// A composed list request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PosterQuery {
    pub sort: SortDirection,
    pub filters: Vec<PosterFilter>,
}

impl PosterQuery {
    /// Compose a query from request parameters.
    ///
    /// Blank parameters count as absent. Filters are collected in priority
    /// order (`name`, `min_price`, `max_price`); under
    /// [`FilterComposition::Priority`] only the first one survives.
    pub fn compose(params: &ListParams, composition: FilterComposition) -> Self {
        let mut filters = Vec::new();

        if let Some(name) = present(&params.name) {
            filters.push(PosterFilter::NameContains(name.to_string()));
        }
        if let Some(min) = present(&params.min_price) {
            filters.push(PosterFilter::MinPrice(parse_price(min)));
        }
        if let Some(max) = present(&params.max_price) {
            filters.push(PosterFilter::MaxPrice(parse_price(max)));
        }

        if composition == FilterComposition::Priority {
            filters.truncate(1);
        }

        Self {
            sort: SortDirection::from_param(params.sort.as_deref()),
            filters,
        }
    }

    /// True when `poster` passes every filter.
    pub fn matches(&self, poster: &Poster) -> bool {
        self.filters.iter().all(|filter| filter.matches(poster))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Parse a price bound; anything that is not a finite number becomes `0.0`.
pub fn parse_price(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
