use crate::config::toml_config::PageSettings;
use crate::config::DashboardConfig;
use crate::core::filter::{filter, FilterDefaults, FilteredView, Selection};
use crate::core::loader::load_dataset;
use crate::domain::model::Dataset;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::render::page::render_page;
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// What `/api/meta` and `--dry-run` report about the loaded data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub countries: Vec<String>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Records:   {}", self.records)?;
        write!(f, "Countries: {}", self.countries.len())?;
        if let (Some(min), Some(max)) = (self.min_year, self.max_year) {
            write!(f, "\nYears:     {}-{}", min, max)?;
        }
        Ok(())
    }
}

/// Loaded dataset plus the page settings; every request renders from this.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    page: PageSettings,
    defaults: FilterDefaults,
}

impl Dashboard {
    pub fn new(dataset: Dataset, page: PageSettings, defaults: FilterDefaults) -> Self {
        Self {
            dataset: Arc::new(dataset),
            page,
            defaults,
        }
    }

    pub async fn load<S: Storage>(storage: &S, config: &DashboardConfig) -> Result<Self> {
        let dataset = load_dataset(storage, config.data_path()).await?;
        Ok(Self::new(
            dataset,
            config.page().clone(),
            FilterDefaults::from_config(config),
        ))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self, raw_query: Option<&str>) -> Selection {
        Selection::from_query(raw_query, &self.dataset, self.defaults)
    }

    pub fn view(&self, selection: &Selection) -> FilteredView {
        filter(&self.dataset, selection)
    }

    /// Whole page for the given query string.
    pub fn render(&self, raw_query: Option<&str>) -> String {
        let selection = self.selection(raw_query);
        let view = self.view(&selection);
        tracing::debug!(
            "Rendering {} rows for [{}] in {}",
            view.len(),
            selection.countries_label(),
            selection.year
        );
        render_page(&self.dataset, &selection, &view, &self.page)
    }

    pub fn summary(&self) -> DatasetSummary {
        let bounds = self.dataset.year_bounds();
        DatasetSummary {
            records: self.dataset.len(),
            countries: self
                .dataset
                .countries()
                .into_iter()
                .map(str::to_string)
                .collect(),
            min_year: bounds.map(|(min, _)| min),
            max_year: bounds.map(|(_, max)| max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Record;

    fn dashboard() -> Dashboard {
        let record = |country: &str, year: i32, deaths: f64, births: f64| Record {
            country: country.to_string(),
            code: String::new(),
            year,
            deaths,
            deaths_estimated: 0.0,
            births,
            births_estimated: 0.0,
        };
        Dashboard::new(
            Dataset::new(vec![
                record("Chile", 2000, 95000.0, 250000.0),
                record("Argentina", 2001, 270000.0, 700000.0),
                record("Chile", 2001, 96000.0, 248000.0),
            ]),
            PageSettings::default(),
            FilterDefaults {
                year: 2000,
                country_count: 2,
            },
        )
    }

    #[test]
    fn test_render_without_query_uses_defaults() {
        let html = dashboard().render(None);
        assert!(html.contains("Datos para Chile, Argentina en 2000"));
        assert!(html.contains("155.000"));
    }

    #[test]
    fn test_render_with_query() {
        let html = dashboard().render(Some("country=Argentina&year=2001"));
        assert!(html.contains("Datos para Argentina en 2001"));
        assert!(html.contains("430.000"));
    }

    #[test]
    fn test_summary() {
        let summary = dashboard().summary();
        assert_eq!(summary.records, 3);
        assert_eq!(summary.countries, vec!["Chile", "Argentina"]);
        assert_eq!(summary.min_year, Some(2000));
        assert_eq!(summary.max_year, Some(2001));
        assert_eq!(
            summary.to_string(),
            "Records:   3\nCountries: 2\nYears:     2000-2001"
        );
    }

    #[test]
    fn test_summary_of_empty_dataset_omits_years() {
        let dashboard = Dashboard::new(
            Dataset::default(),
            PageSettings::default(),
            FilterDefaults {
                year: 2000,
                country_count: 2,
            },
        );
        assert_eq!(dashboard.summary().to_string(), "Records:   0\nCountries: 0");
    }
}
