use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{DataIntegrityError, LookupError};
use crate::models::{BreedAttribute, BreedComparison, BreedRecord, RawBreed};

/// Raw numeric columns, in [`RawBreed`] field order
const RAW_NUMERIC_COLUMNS: [BreedAttribute; 15] = [
    BreedAttribute::MinHeightMale,
    BreedAttribute::MaxHeightMale,
    BreedAttribute::MinWeightMale,
    BreedAttribute::MaxWeightMale,
    BreedAttribute::MinHeightFemale,
    BreedAttribute::MaxHeightFemale,
    BreedAttribute::MinWeightFemale,
    BreedAttribute::MaxWeightFemale,
    BreedAttribute::MinLifeExpectancy,
    BreedAttribute::MaxLifeExpectancy,
    BreedAttribute::Adaptability,
    BreedAttribute::AllAroundFriendliness,
    BreedAttribute::HealthGrooming,
    BreedAttribute::Trainability,
    BreedAttribute::ExerciseNeeds,
];

/// The enriched, read-only breed catalog.
///
/// Built once by the loader and never mutated afterwards; records keep the
/// row order of the source, which is also the tie-break order for rankings
/// and for the lifespan mode.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<BreedRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Load a catalog from CSV with one header row and one row per breed
    pub fn load<R: Read>(reader: R) -> Result<Self, DataIntegrityError> {
        // Short rows are reported per column by `parse_numeric`, not by csv
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let columns = ColumnIndex::resolve(&headers)?;

        let mut rows = Vec::new();
        for (position, result) in csv_reader.records().enumerate() {
            let record = result?;
            // Row numbers are 1-based and count the header line
            rows.push(columns.parse_row(&record, position + 2)?);
        }

        Self::from_raw(rows)
    }

    /// Load a catalog from a CSV file on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataIntegrityError> {
        let path = path.as_ref();
        tracing::info!("Loading breed catalog from {}", path.display());
        let file = File::open(path)?;
        Self::load(file)
    }

    /// Build a catalog from already-parsed rows, deriving computed fields
    pub fn from_raw<I>(rows: I) -> Result<Self, DataIntegrityError>
    where
        I: IntoIterator<Item = RawBreed>,
    {
        let mut records = Vec::new();
        let mut index = HashMap::new();

        for raw in rows {
            if index.contains_key(&raw.breed) {
                return Err(DataIntegrityError::DuplicateBreed { breed: raw.breed });
            }

            let record = BreedRecord::derive(raw)?;
            tracing::trace!(
                breed = record.breed(),
                average_lifespan = record.average_lifespan(),
                average_size = record.average_size(),
                size_category = %record.size_category(),
                "Derived breed fields"
            );

            index.insert(record.breed().to_string(), records.len());
            records.push(record);
        }

        tracing::info!("Breed catalog loaded with {} breeds", records.len());

        Ok(Self { records, index })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in source row order
    pub fn records(&self) -> &[BreedRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BreedRecord> {
        self.records.iter()
    }

    /// Exact-name lookup
    pub fn get(&self, breed: &str) -> Option<&BreedRecord> {
        self.index.get(breed).map(|&position| &self.records[position])
    }

    /// Exact-name lookup that reports unknown breeds as an error
    pub fn require(&self, breed: &str) -> Result<&BreedRecord, LookupError> {
        self.get(breed).ok_or_else(|| LookupError::UnknownBreed {
            breed: breed.to_string(),
        })
    }

    /// Distinct breed groups in order of first appearance
    pub fn breed_groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for record in &self.records {
            if !groups.contains(&record.breed_group()) {
                groups.push(record.breed_group());
            }
        }
        groups
    }

    /// Records belonging to one breed group
    pub fn in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a BreedRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.breed_group() == group)
    }

    /// Side-by-side values of the given attributes for two breeds
    pub fn compare(
        &self,
        first: &str,
        second: &str,
        attributes: &[BreedAttribute],
    ) -> Result<BreedComparison, LookupError> {
        let first_record = self.require(first)?;
        let second_record = self.require(second)?;

        Ok(BreedComparison {
            first: first_record.breed().to_string(),
            second: second_record.breed().to_string(),
            attributes: attributes.to_vec(),
            first_values: attributes.iter().map(|a| first_record.attribute(*a)).collect(),
            second_values: attributes.iter().map(|a| second_record.attribute(*a)).collect(),
        })
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a BreedRecord;
    type IntoIter = std::slice::Iter<'a, BreedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Header positions of the columns the loader needs
struct ColumnIndex {
    breed: usize,
    breed_group: usize,
    numeric: [usize; 15],
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, DataIntegrityError> {
        let position = |column: &str| {
            headers
                .iter()
                .position(|header| header == column)
                .ok_or_else(|| DataIntegrityError::MissingColumn {
                    column: column.to_string(),
                })
        };

        let mut numeric = [0usize; 15];
        for (slot, attribute) in numeric.iter_mut().zip(RAW_NUMERIC_COLUMNS) {
            *slot = position(attribute.column())?;
        }

        Ok(Self {
            breed: position("breed")?,
            breed_group: position("breed_group")?,
            numeric,
        })
    }

    fn parse_row(&self, record: &StringRecord, row: usize) -> Result<RawBreed, DataIntegrityError> {
        let breed = record.get(self.breed).unwrap_or_default();
        if breed.is_empty() {
            return Err(DataIntegrityError::MissingBreedName { row });
        }

        let mut values = [0f64; 15];
        for ((slot, attribute), column) in values
            .iter_mut()
            .zip(RAW_NUMERIC_COLUMNS)
            .zip(self.numeric)
        {
            *slot = parse_numeric(breed, attribute.column(), record.get(column))?;
        }

        let [min_height_male, max_height_male, min_weight_male, max_weight_male, min_height_female, max_height_female, min_weight_female, max_weight_female, min_life_expectancy, max_life_expectancy, adaptability, all_around_friendliness, health_grooming, trainability, exercise_needs] =
            values;

        Ok(RawBreed {
            breed: breed.to_string(),
            breed_group: record.get(self.breed_group).unwrap_or_default().to_string(),
            min_height_male,
            max_height_male,
            min_weight_male,
            max_weight_male,
            min_height_female,
            max_height_female,
            min_weight_female,
            max_weight_female,
            min_life_expectancy,
            max_life_expectancy,
            adaptability,
            all_around_friendliness,
            health_grooming,
            trainability,
            exercise_needs,
        })
    }
}

fn parse_numeric(breed: &str, column: &str, value: Option<&str>) -> Result<f64, DataIntegrityError> {
    let value = value.unwrap_or_default();
    if value.is_empty() {
        return Err(DataIntegrityError::MissingValue {
            breed: breed.to_string(),
            column: column.to_string(),
        });
    }

    value
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| DataIntegrityError::NonNumeric {
            breed: breed.to_string(),
            column: column.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SizeCategory;

    const HEADER: &str = "breed,breed_group,min_height_male,max_height_male,min_weight_male,max_weight_male,\
min_height_female,max_height_female,min_weight_female,max_weight_female,min_life_expectancy,\
max_life_expectancy,adaptability,all_around_friendliness,health_grooming,trainability,exercise_needs";

    fn csv(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_load_derives_fields() {
        let text = csv(&[
            "Pug,Companion Dogs,10,13,14,18,10,13,14,18,13,15,5,5,3,4,3",
            "Beagle,Hound Dogs,13,15,20,30,13,15,20,30,10,15,4,5,4,3,4",
        ]);

        let catalog = Catalog::load(text.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);

        let pug = catalog.get("Pug").unwrap();
        assert_eq!(pug.average_lifespan(), 14.0);
        assert_eq!(pug.average_size(), 13.75);
        assert_eq!(pug.size_category(), SizeCategory::Small);

        let beagle = catalog.get("Beagle").unwrap();
        assert_eq!(beagle.average_lifespan(), 12.5);
        assert_eq!(beagle.average_size(), 19.5);
        assert_eq!(beagle.size_category(), SizeCategory::Medium);
    }

    #[test]
    fn test_load_keeps_row_order() {
        let text = csv(&[
            "C,G,10,10,10,10,10,10,10,10,10,12,1,1,1,1,1",
            "A,G,10,10,10,10,10,10,10,10,10,12,1,1,1,1,1",
            "B,G,10,10,10,10,10,10,10,10,10,12,1,1,1,1,1",
        ]);

        let catalog = Catalog::load(text.as_bytes()).unwrap();
        let names: Vec<&str> = catalog.iter().map(|r| r.breed()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_load_rejects_missing_column() {
        let text = "breed,breed_group,min_height_male\nPug,Companion Dogs,10";

        let err = Catalog::load(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DataIntegrityError::MissingColumn { .. }));
    }

    #[test]
    fn test_load_rejects_missing_value() {
        let text = csv(&["Pug,Companion Dogs,10,13,14,18,10,13,14,,13,15,5,5,3,4,3"]);

        match Catalog::load(text.as_bytes()).unwrap_err() {
            DataIntegrityError::MissingValue { breed, column } => {
                assert_eq!(breed, "Pug");
                assert_eq!(column, "max_weight_female");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_non_numeric_value() {
        let text = csv(&["Pug,Companion Dogs,10,13,14,18,10,13,14,18,13,fifteen,5,5,3,4,3"]);

        match Catalog::load(text.as_bytes()).unwrap_err() {
            DataIntegrityError::NonNumeric { breed, column, value } => {
                assert_eq!(breed, "Pug");
                assert_eq!(column, "max_life_expectancy");
                assert_eq!(value, "fifteen");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_reports_short_row_column() {
        let text = csv(&["Pug,Companion Dogs,10,13,14,18,10,13,14,18,13,15,5,5,3,4"]);

        match Catalog::load(text.as_bytes()).unwrap_err() {
            DataIntegrityError::MissingValue { breed, column } => {
                assert_eq!(breed, "Pug");
                assert_eq!(column, "exercise_needs");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_non_finite_value() {
        let text = csv(&["Pug,Companion Dogs,10,13,14,18,10,13,14,18,13,15,NaN,5,3,4,3"]);

        let err = Catalog::load(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DataIntegrityError::NonNumeric { .. }));
    }

    #[test]
    fn test_load_rejects_overflowing_lifespan() {
        let text = csv(&["Pug,Companion Dogs,10,13,14,18,10,13,14,18,1e308,1e308,5,5,3,4,3"]);

        match Catalog::load(text.as_bytes()).unwrap_err() {
            DataIntegrityError::NonFiniteDerived { breed, field } => {
                assert_eq!(breed, "Pug");
                assert_eq!(field, "average_lifespan");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_csv_error_message_is_not_prefixed_twice() {
        let bytes: &[u8] = b"breed,\xff\nPug,x\n";

        match Catalog::load(bytes).unwrap_err() {
            DataIntegrityError::Csv(inner) => {
                let expected = inner.to_string();
                let err = DataIntegrityError::Csv(inner);
                assert_eq!(err.to_string(), expected);
                assert!(!err.to_string().starts_with("CSV error: CSV"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_duplicate_breed() {
        let text = csv(&[
            "Pug,Companion Dogs,10,13,14,18,10,13,14,18,13,15,5,5,3,4,3",
            "Pug,Companion Dogs,10,13,14,18,10,13,14,18,13,15,5,5,3,4,3",
        ]);

        match Catalog::load(text.as_bytes()).unwrap_err() {
            DataIntegrityError::DuplicateBreed { breed } => assert_eq!(breed, "Pug"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_missing_breed_name() {
        let text = csv(&[
            "Pug,Companion Dogs,10,13,14,18,10,13,14,18,13,15,5,5,3,4,3",
            ",Companion Dogs,10,13,14,18,10,13,14,18,13,15,5,5,3,4,3",
        ]);

        match Catalog::load(text.as_bytes()).unwrap_err() {
            DataIntegrityError::MissingBreedName { row } => assert_eq!(row, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_size_outside_bins() {
        let text = csv(&["Giant,Working Dogs,100,110,150,200,100,110,150,200,8,10,2,3,2,3,4"]);

        let err = Catalog::load(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DataIntegrityError::SizeOutOfRange { .. }));
    }

    #[test]
    fn test_load_header_only_is_empty_catalog() {
        let catalog = Catalog::load(HEADER.as_bytes()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_breed_groups_and_lookup() {
        let text = csv(&[
            "Pug,Companion Dogs,10,13,14,18,10,13,14,18,13,15,5,5,3,4,3",
            "Beagle,Hound Dogs,13,15,20,30,13,15,20,30,10,15,4,5,4,3,4",
            "Shih Tzu,Companion Dogs,9,10,9,16,9,10,9,16,10,18,5,5,3,4,2",
        ]);
        let catalog = Catalog::load(text.as_bytes()).unwrap();

        assert_eq!(catalog.breed_groups(), vec!["Companion Dogs", "Hound Dogs"]);
        let companions: Vec<&str> = catalog.in_group("Companion Dogs").map(|r| r.breed()).collect();
        assert_eq!(companions, vec!["Pug", "Shih Tzu"]);

        assert!(catalog.get("pug").is_none());
        assert!(matches!(
            catalog.require("Poodle"),
            Err(LookupError::UnknownBreed { .. })
        ));
    }

    #[test]
    fn test_compare_breeds() {
        let text = csv(&[
            "Pug,Companion Dogs,10,13,14,18,10,13,14,18,13,15,5,5,3,4,3",
            "Beagle,Hound Dogs,13,15,20,30,13,15,20,30,10,15,4,5,4,3,4",
        ]);
        let catalog = Catalog::load(text.as_bytes()).unwrap();

        let comparison = catalog
            .compare(
                "Pug",
                "Beagle",
                &[BreedAttribute::Adaptability, BreedAttribute::AverageLifespan],
            )
            .unwrap();

        assert_eq!(comparison.first_values, vec![5.0, 14.0]);
        assert_eq!(comparison.second_values, vec![4.0, 12.5]);
        assert!(catalog.compare("Pug", "Poodle", &[]).is_err());
    }
}
