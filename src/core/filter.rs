use crate::domain::model::{Dataset, DisplayRow};
use crate::domain::ports::ConfigProvider;
use serde::Serialize;

/// Current sidebar choices: a set of countries and one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub countries: Vec<String>,
    pub year: i32,
}

/// Filter defaults applied when the request carries no choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDefaults {
    pub year: i32,
    pub country_count: usize,
}

impl FilterDefaults {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            year: config.default_year(),
            country_count: config.default_country_count(),
        }
    }
}

fn clamp_year(dataset: &Dataset, year: i32) -> i32 {
    match dataset.year_bounds() {
        Some((min, max)) => year.clamp(min, max),
        None => year,
    }
}

impl Selection {
    /// First `country_count` countries in source order and the default year,
    /// clamped into the dataset's year range.
    pub fn default_for(dataset: &Dataset, defaults: FilterDefaults) -> Self {
        Self {
            countries: dataset
                .countries()
                .into_iter()
                .take(defaults.country_count)
                .map(str::to_string)
                .collect(),
            year: clamp_year(dataset, defaults.year),
        }
    }

    /// Build a selection from a URL query such as `country=Chile&country=Peru&year=2000`.
    ///
    /// No query at all means the defaults. A submitted form with no `country`
    /// keys is an empty selection, not the defaults.
    pub fn from_query(raw_query: Option<&str>, dataset: &Dataset, defaults: FilterDefaults) -> Self {
        let query = match raw_query {
            Some(q) if !q.trim().is_empty() => q,
            _ => return Self::default_for(dataset, defaults),
        };

        let mut countries: Vec<String> = Vec::new();
        let mut year = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "country" => {
                    if !countries.iter().any(|c| c == value.as_ref()) {
                        countries.push(value.into_owned());
                    }
                }
                "year" => year = value.trim().parse::<i32>().ok(),
                _ => {}
            }
        }

        Self {
            countries,
            year: clamp_year(dataset, year.unwrap_or(defaults.year)),
        }
    }

    pub fn contains(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c == country)
    }

    /// "Chile, Argentina"
    pub fn countries_label(&self) -> String {
        self.countries.join(", ")
    }
}

/// Read-only subset of the dataset for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredView {
    pub rows: Vec<DisplayRow>,
}

impl FilteredView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Rows whose country is selected and whose year matches exactly, in source order.
pub fn filter(dataset: &Dataset, selection: &Selection) -> FilteredView {
    let rows = dataset
        .records()
        .iter()
        .filter(|r| r.year == selection.year && selection.contains(&r.country))
        .map(DisplayRow::from)
        .collect();
    FilteredView { rows }
}
