use crate::error::{ApiError, Result};
use crate::models::BookRecord;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Immutable book corpus, loaded once at startup. Rows arrive already
/// cleaned by the offline pipeline; the store only enforces the id
/// uniqueness invariant the rest of the engine relies on.
pub struct RecordStore {
    records: Vec<BookRecord>,
    by_id: HashMap<String, usize>,
}

impl RecordStore {
    pub fn from_records(records: Vec<BookRecord>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if record.id.trim().is_empty() {
                return Err(ApiError::DataLoad(format!(
                    "record at row {} has an empty id",
                    position
                )));
            }
            if by_id.insert(record.id.clone(), position).is_some() {
                return Err(ApiError::DataLoad(format!(
                    "duplicate record id '{}'",
                    record.id
                )));
            }
        }
        Ok(Self { records, by_id })
    }

    /// Load the corpus from the CSV snapshot produced by the offline
    /// classification step.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            ApiError::DataLoad(format!("cannot open {}: {}", path.display(), e))
        })?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: BookRecord = row?;
            records.push(record);
        }

        info!("Loaded {} books from {}", records.len(), path.display());
        Self::from_records(records)
    }

    pub fn get(&self, id: &str) -> Option<&BookRecord> {
        self.by_id.get(id).map(|&position| &self.records[position])
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Category labels present in the corpus, sorted, with the "All"
    /// sentinel first for the UI filter dropdown.
    pub fn categories(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .records
            .iter()
            .map(|record| record.category.clone())
            .collect();
        labels.sort();
        labels.dedup();
        labels.insert(0, crate::services::filter::ALL.to_string());
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV_FIXTURE: &str = "\
isbn13,title,authors,description,simplified_categories,thumbnail,joy,sad,angry,fear,surprise,neutral
9780000000001,The Hollow Valley,A. Author,A quiet town hides an old secret.,Mystery,http://covers.example/1.jpg,0.1,0.8,0.0,0.6,0.1,0.2
9780000000002,Sunrise Road,B. Writer;C. Writer,A hopeful journey across the coast.,Fiction,,0.9,0.0,0.0,0.1,0.3,0.2
";

    fn store_from_fixture() -> RecordStore {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV_FIXTURE.as_bytes()).unwrap();
        RecordStore::from_csv_path(file.path()).unwrap()
    }

    #[test]
    fn loads_csv_rows_with_emotion_columns() {
        let store = store_from_fixture();
        assert_eq!(store.len(), 2);

        let mystery = store.get("9780000000001").unwrap();
        assert_eq!(mystery.category, "Mystery");
        assert_eq!(mystery.sad, 0.8);
        assert!(mystery.thumbnail.is_some());

        let fiction = store.get("9780000000002").unwrap();
        assert_eq!(fiction.authors, "B. Writer;C. Writer");
        assert_eq!(fiction.thumbnail, None);
    }

    #[test]
    fn categories_are_sorted_with_all_first() {
        let store = store_from_fixture();
        assert_eq!(store.categories(), vec!["All", "Fiction", "Mystery"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let record = store_from_fixture().get("9780000000001").unwrap().clone();
        let result = RecordStore::from_records(vec![record.clone(), record]);
        assert!(matches!(result, Err(ApiError::DataLoad(_))));
    }

    #[test]
    fn missing_file_is_a_data_load_error() {
        let result = RecordStore::from_csv_path(Path::new("/nonexistent/books.csv"));
        assert!(matches!(result, Err(ApiError::DataLoad(_))));
    }
}
