use crate::core::normalize::{normalize, RawTable};
use crate::domain::model::Dataset;
use crate::domain::ports::Storage;
use crate::utils::error::{DashboardError, Result};

/// Parse semicolon-delimited CSV bytes.
///
/// Short rows are kept as they are; their missing trailing cells read as empty
/// and get coerced later. Rows wider than the header are rejected.
pub fn read_raw_table(data: &[u8]) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() > headers.len() {
            return Err(DashboardError::RowWidthError {
                row: index + 1,
                fields: record.len(),
                expected: headers.len(),
            });
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

/// Read and normalize the dataset in one go.
pub async fn load_dataset<S: Storage>(storage: &S, path: &str) -> Result<Dataset> {
    tracing::info!("📥 Loading dataset from: {}", path);
    let data = storage.read_file(path).await?;
    tracing::debug!("Read {} bytes", data.len());

    let table = read_raw_table(&data)?;
    let dataset = normalize(&table)?;

    match dataset.year_bounds() {
        Some((min, max)) => tracing::info!(
            "✅ Loaded {} records, {} countries, years {}-{}",
            dataset.len(),
            dataset.countries().len(),
            min,
            max
        ),
        None => tracing::warn!("⚠️ Dataset at {} has no rows", path),
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Entity;Code;Year;Deaths - Sex: all - Age: all - Variant: estimates;Deaths - Sex: all - Age: all - Variant: medium;Births - Sex: all - Age: all - Variant: estimates;Births - Sex: all - Age: all - Variant: medium
Chile;CHL;2000;95000;;250000;
Argentina;ARG;2001;270000;;700000;
";

    struct MemoryStorage(Vec<u8>);

    impl Storage for MemoryStorage {
        async fn read_file(&self, _path: &str) -> Result<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_read_raw_table_splits_on_semicolon() {
        let table = read_raw_table(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.headers.len(), 7);
        assert_eq!(table.headers[0], "Entity");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "Chile");
        assert_eq!(table.rows[0][4], "");
    }

    #[test]
    fn test_short_row_loads_with_zero_indicators() {
        let data = format!("{}Peru;PER;2000;100000\n", SAMPLE);
        let table = read_raw_table(data.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[2].len(), 4);

        let dataset = normalize(&table).unwrap();
        let peru = &dataset.records()[2];
        assert_eq!(peru.country, "Peru");
        assert_eq!(peru.deaths, 100000.0);
        assert_eq!(peru.deaths_estimated, 0.0);
        assert_eq!(peru.births, 0.0);
        assert_eq!(peru.births_estimated, 0.0);
        assert_eq!(peru.net(), -100000.0);
    }

    #[test]
    fn test_long_row_is_rejected() {
        let data = format!("{}Peru;PER;2000;1;2;3;4;5\n", SAMPLE);
        match read_raw_table(data.as_bytes()) {
            Err(DashboardError::RowWidthError {
                row,
                fields,
                expected,
            }) => {
                assert_eq!(row, 3);
                assert_eq!(fields, 8);
                assert_eq!(expected, 7);
            }
            other => panic!("expected row width error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_dataset_normalizes() {
        let storage = MemoryStorage(SAMPLE.as_bytes().to_vec());
        let dataset = load_dataset(&storage, "sample.csv").await.unwrap();

        assert_eq!(dataset.len(), 2);
        let chile = &dataset.records()[0];
        assert_eq!(chile.country, "Chile");
        assert_eq!(chile.year, 2000);
        assert_eq!(chile.net(), 155000.0);
        assert_eq!(chile.births_estimated, 0.0);
        assert_eq!(dataset.year_bounds(), Some((2000, 2001)));
    }
}
