use serde::{Deserialize, Serialize};

pub const COUNTRY: &str = "País";
pub const COUNTRY_CODE: &str = "Código del País";
pub const YEAR: &str = "Año";

/// 一個國家在某一年的出生與死亡數據
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub country: String,
    pub code: String,
    pub year: i32,
    pub deaths: f64,
    pub deaths_estimated: f64,
    pub births: f64,
    pub births_estimated: f64,
}

impl Record {
    pub fn net(&self) -> f64 {
        self.births - self.deaths
    }

    pub fn net_estimated(&self) -> f64 {
        self.births_estimated - self.deaths_estimated
    }

    pub fn value(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Deaths => self.deaths,
            Indicator::DeathsEstimated => self.deaths_estimated,
            Indicator::Births => self.births,
            Indicator::BirthsEstimated => self.births_estimated,
            Indicator::Net => self.net(),
            Indicator::NetEstimated => self.net_estimated(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    Deaths,
    DeathsEstimated,
    Births,
    BirthsEstimated,
    Net,
    NetEstimated,
}

impl Indicator {
    /// The four columns read from the source file.
    pub const BASE: [Indicator; 4] = [
        Indicator::Deaths,
        Indicator::DeathsEstimated,
        Indicator::Births,
        Indicator::BirthsEstimated,
    ];

    /// Order used when reshaping rows for the chart.
    pub const CHART_ORDER: [Indicator; 6] = [
        Indicator::Deaths,
        Indicator::DeathsEstimated,
        Indicator::Births,
        Indicator::BirthsEstimated,
        Indicator::Net,
        Indicator::NetEstimated,
    ];

    /// Column order of the filtered table, after País and Año.
    pub const TABLE_ORDER: [Indicator; 6] = [
        Indicator::Deaths,
        Indicator::Births,
        Indicator::Net,
        Indicator::DeathsEstimated,
        Indicator::BirthsEstimated,
        Indicator::NetEstimated,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Indicator::Deaths => "Muertes",
            Indicator::DeathsEstimated => "Muertes Estimadas",
            Indicator::Births => "Nacimientos",
            Indicator::BirthsEstimated => "Nacimientos Estimadas",
            Indicator::Net => "Neto",
            Indicator::NetEstimated => "Neto Estimado",
        }
    }
}

/// Immutable record set, in source order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique countries in order of first appearance.
    pub fn countries(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.country.as_str()))
            .map(|r| r.country.as_str())
            .collect()
    }

    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}

/// One row of the filtered view, columns in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    #[serde(rename = "País")]
    pub country: String,
    #[serde(rename = "Año")]
    pub year: i32,
    #[serde(rename = "Muertes")]
    pub deaths: f64,
    #[serde(rename = "Nacimientos")]
    pub births: f64,
    #[serde(rename = "Neto")]
    pub net: f64,
    #[serde(rename = "Muertes Estimadas")]
    pub deaths_estimated: f64,
    #[serde(rename = "Nacimientos Estimadas")]
    pub births_estimated: f64,
    #[serde(rename = "Neto Estimado")]
    pub net_estimated: f64,
}

impl DisplayRow {
    pub fn value(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Deaths => self.deaths,
            Indicator::DeathsEstimated => self.deaths_estimated,
            Indicator::Births => self.births,
            Indicator::BirthsEstimated => self.births_estimated,
            Indicator::Net => self.net,
            Indicator::NetEstimated => self.net_estimated,
        }
    }
}

impl From<&Record> for DisplayRow {
    fn from(record: &Record) -> Self {
        Self {
            country: record.country.clone(),
            year: record.year,
            deaths: record.deaths,
            births: record.births,
            net: record.net(),
            deaths_estimated: record.deaths_estimated,
            births_estimated: record.births_estimated,
            net_estimated: record.net_estimated(),
        }
    }
}

/// Long-form chart input: one value per (country, indicator).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    #[serde(rename = "País")]
    pub country: String,
    #[serde(rename = "Indicador", serialize_with = "serialize_indicator")]
    pub indicator: Indicator,
    #[serde(rename = "Cantidad")]
    pub value: f64,
}

fn serialize_indicator<S: serde::Serializer>(
    indicator: &Indicator,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(indicator.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, year: i32, deaths: f64, births: f64) -> Record {
        Record {
            country: country.to_string(),
            code: String::new(),
            year,
            deaths,
            deaths_estimated: 0.0,
            births,
            births_estimated: 0.0,
        }
    }

    #[test]
    fn test_net_is_births_minus_deaths() {
        let r = Record {
            deaths_estimated: 10.0,
            births_estimated: 4.0,
            ..record("Chile", 2000, 95000.0, 250000.0)
        };
        assert_eq!(r.net(), 155000.0);
        assert_eq!(r.net_estimated(), -6.0);
        assert_eq!(r.value(Indicator::NetEstimated), -6.0);
    }

    #[test]
    fn test_countries_keep_first_appearance_order() {
        let dataset = Dataset::new(vec![
            record("Chile", 2000, 1.0, 2.0),
            record("Argentina", 2000, 1.0, 2.0),
            record("Chile", 2001, 1.0, 2.0),
            record("Peru", 1999, 1.0, 2.0),
        ]);
        assert_eq!(dataset.countries(), vec!["Chile", "Argentina", "Peru"]);
        assert_eq!(dataset.year_bounds(), Some((1999, 2001)));
    }

    #[test]
    fn test_empty_dataset_has_no_bounds() {
        assert_eq!(Dataset::default().year_bounds(), None);
    }

    #[test]
    fn test_chart_point_serializes_label() {
        let point = ChartPoint {
            country: "Chile".to_string(),
            indicator: Indicator::BirthsEstimated,
            value: 3.0,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["Indicador"], "Nacimientos Estimadas");
        assert_eq!(json["País"], "Chile");
    }
}
