use crate::domain::model::{Dataset, Indicator, Record, COUNTRY, COUNTRY_CODE, YEAR};
use crate::utils::error::{DashboardError, Result};

/// Source column name → display label.
pub const COLUMN_RENAMES: [(&str, &str); 7] = [
    ("Entity", COUNTRY),
    ("Code", COUNTRY_CODE),
    ("Year", YEAR),
    ("Deaths - Sex: all - Age: all - Variant: estimates", "Muertes"),
    ("Deaths - Sex: all - Age: all - Variant: medium", "Muertes Estimadas"),
    ("Births - Sex: all - Age: all - Variant: estimates", "Nacimientos"),
    ("Births - Sex: all - Age: all - Variant: medium", "Nacimientos Estimadas"),
];

/// CSV contents before any cleaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Trim and relabel headers. Headers that are not source names stay as they are,
/// so running this on already-renamed headers changes nothing.
pub fn rename_headers(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .map(|h| {
            let trimmed = h.trim();
            COLUMN_RENAMES
                .iter()
                .find(|(source, _)| *source == trimmed)
                .map(|(_, label)| label.to_string())
                .unwrap_or_else(|| trimmed.to_string())
        })
        .collect()
}

/// Lenient numeric parse. `None` for anything unparsable or NaN; callers store 0.
pub fn coerce_number(cell: &str) -> Option<f64> {
    match cell.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => Some(v),
        _ => None,
    }
}

fn parse_year(cell: &str) -> Option<i32> {
    let trimmed = cell.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    // "2000.0"
    match trimmed.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 => {
            Some(v as i32)
        }
        _ => None,
    }
}

fn column_index(headers: &[String], column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| DashboardError::MissingColumnError {
            column: column.to_string(),
        })
}

/// Turn a raw table into the immutable record set.
pub fn normalize(table: &RawTable) -> Result<Dataset> {
    let headers = rename_headers(&table.headers);

    let country_idx = column_index(&headers, COUNTRY)?;
    let code_idx = column_index(&headers, COUNTRY_CODE)?;
    let year_idx = column_index(&headers, YEAR)?;
    let mut indicator_idx = [0usize; 4];
    for (slot, indicator) in indicator_idx.iter_mut().zip(Indicator::BASE) {
        *slot = column_index(&headers, indicator.label())?;
    }

    let mut coerced = 0usize;
    let mut records = Vec::with_capacity(table.rows.len());

    for (row_number, row) in table.rows.iter().enumerate() {
        let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

        let year = parse_year(cell(year_idx)).ok_or_else(|| DashboardError::InvalidYearError {
            row: row_number + 1,
            value: cell(year_idx).to_string(),
        })?;

        let mut values = [0.0f64; 4];
        for (value, idx) in values.iter_mut().zip(indicator_idx) {
            match coerce_number(cell(idx)) {
                Some(v) => *value = v,
                None => coerced += 1,
            }
        }

        records.push(Record {
            country: cell(country_idx).to_string(),
            code: cell(code_idx).to_string(),
            year,
            deaths: values[0],
            deaths_estimated: values[1],
            births: values[2],
            births_estimated: values[3],
        });
    }

    tracing::debug!(
        "Normalized {} records ({} numeric cells coerced to 0)",
        records.len(),
        coerced
    );

    Ok(Dataset::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_headers() -> Vec<String> {
        vec![
            " Entity".to_string(),
            "Code ".to_string(),
            "Year".to_string(),
            "Deaths - Sex: all - Age: all - Variant: estimates".to_string(),
            "Deaths - Sex: all - Age: all - Variant: medium".to_string(),
            "Births - Sex: all - Age: all - Variant: estimates ".to_string(),
            "Births - Sex: all - Age: all - Variant: medium".to_string(),
        ]
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_rename_trims_and_relabels() {
        let renamed = rename_headers(&source_headers());
        assert_eq!(
            renamed,
            vec![
                "País",
                "Código del País",
                "Año",
                "Muertes",
                "Muertes Estimadas",
                "Nacimientos",
                "Nacimientos Estimadas"
            ]
        );
    }

    #[test]
    fn test_rename_is_noop_on_renamed_headers() {
        let once = rename_headers(&source_headers());
        let twice = rename_headers(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_headers_are_only_trimmed() {
        let renamed = rename_headers(&["  Population ".to_string()]);
        assert_eq!(renamed, vec!["Population"]);
    }

    #[test]
    fn test_unparsable_numbers_become_zero() {
        let table = RawTable {
            headers: source_headers(),
            rows: vec![row(&["Chile", "CHL", "2000", "abc", "", "NaN", " 12.5 "])],
        };
        let dataset = normalize(&table).unwrap();
        let r = &dataset.records()[0];
        assert_eq!(r.deaths, 0.0);
        assert_eq!(r.deaths_estimated, 0.0);
        assert_eq!(r.births, 0.0);
        assert_eq!(r.births_estimated, 12.5);
        assert_eq!(r.net_estimated(), 12.5);
    }

    #[test]
    fn test_net_columns_derived_exactly() {
        let table = RawTable {
            headers: source_headers(),
            rows: vec![
                row(&["Chile", "CHL", "2000", "95000", "96000", "250000", "249000"]),
                row(&["Japan", "JPN", "2050", "1500000", "1500000", "700000", "700000"]),
            ],
        };
        let dataset = normalize(&table).unwrap();
        for r in dataset.records() {
            assert_eq!(r.net(), r.births - r.deaths);
            assert_eq!(r.net_estimated(), r.births_estimated - r.deaths_estimated);
        }
        assert_eq!(dataset.records()[0].net(), 155000.0);
        assert_eq!(dataset.records()[1].net(), -800000.0);
    }

    #[test]
    fn test_float_year_is_accepted() {
        let table = RawTable {
            headers: source_headers(),
            rows: vec![row(&["Chile", "CHL", "2000.0", "1", "1", "1", "1"])],
        };
        assert_eq!(normalize(&table).unwrap().records()[0].year, 2000);
    }

    #[test]
    fn test_bad_year_reports_row() {
        let table = RawTable {
            headers: source_headers(),
            rows: vec![
                row(&["Chile", "CHL", "2000", "1", "1", "1", "1"]),
                row(&["Chile", "CHL", "dos mil", "1", "1", "1", "1"]),
            ],
        };
        match normalize(&table) {
            Err(DashboardError::InvalidYearError { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "dos mil");
            }
            other => panic!("expected year error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_column_fails() {
        let mut headers = source_headers();
        headers.remove(4);
        let table = RawTable {
            headers,
            rows: vec![],
        };
        match normalize(&table) {
            Err(DashboardError::MissingColumnError { column }) => {
                assert_eq!(column, "Muertes Estimadas")
            }
            other => panic!("expected missing column, got {:?}", other),
        }
    }
}
