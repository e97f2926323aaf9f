use std::fmt;
use std::path::{Path, PathBuf};

use har_core::{to_binary_label, ActivityId, ActivityMap, BinaryLabel, FeatureNames};
use log::{info, warn};
use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::activities::load_activity_map;
use crate::error::{DatasetError, Result};
use crate::features::load_feature_names;
use crate::table::{open, read_label_ids, read_matrix};

pub const FEATURES_FILE: &str = "features.txt";
pub const ACTIVITY_LABELS_FILE: &str = "activity_labels.txt";

/// Which half of the published train/test partition a table belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub const ALL: [Split; 2] = [Split::Train, Split::Test];

    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controls how the unchecked invariants of the raw files are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Row-count mismatches and unmapped activity ids abort the load.
    #[default]
    Strict,
    /// Mismatches are logged; unmapped ids get no activity and an inactive label.
    Lenient,
}

/// Locations of the six dataset files relative to the dataset root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetPaths {
    pub root: PathBuf,
    pub features: PathBuf,
    pub activity_labels: PathBuf,
    pub x_train: PathBuf,
    pub y_train: PathBuf,
    pub x_test: PathBuf,
    pub y_test: PathBuf,
}

impl DatasetPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            features: root.join(FEATURES_FILE),
            activity_labels: root.join(ACTIVITY_LABELS_FILE),
            x_train: root.join("train").join("X_train.txt"),
            y_train: root.join("train").join("y_train.txt"),
            x_test: root.join("test").join("X_test.txt"),
            y_test: root.join("test").join("y_test.txt"),
            root,
        }
    }

    pub fn features_for(&self, split: Split) -> &Path {
        match split {
            Split::Train => &self.x_train,
            Split::Test => &self.x_test,
        }
    }

    pub fn labels_for(&self, split: Split) -> &Path {
        match split {
            Split::Train => &self.y_train,
            Split::Test => &self.y_test,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatasetConfig {
    pub root: PathBuf,
    pub validation: ValidationMode,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("UCI HAR Dataset"),
            validation: ValidationMode::Strict,
        }
    }
}

/// Label of a single sample: the raw id, its mapped name and the derived flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityRecord {
    pub id: ActivityId,
    /// `None` only for ids missing from the activity map under lenient validation.
    pub activity: Option<String>,
    pub binary: BinaryLabel,
}

/// Feature values with their column names attached.
#[derive(Clone, Debug)]
pub struct FeatureMatrix {
    columns: FeatureNames,
    values: Array2<f64>,
}

impl FeatureMatrix {
    /// Pairs `values` with `columns`; the name count must equal the matrix width.
    pub fn new(columns: FeatureNames, values: Array2<f64>) -> Result<Self> {
        if columns.len() != values.ncols() {
            return Err(DatasetError::ColumnNames {
                names: columns.len(),
                columns: values.ncols(),
            });
        }
        Ok(Self { columns, values })
    }

    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn columns(&self) -> usize {
        self.values.ncols()
    }

    pub fn column_names(&self) -> &FeatureNames {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn row(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.rows()).then(|| self.values.row(index))
    }

    /// Returns the column with the given (suffixed) name.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.columns
            .position(name)
            .map(|index| self.values.column(index))
    }
}

/// A feature matrix paired with its per-sample labels.
#[derive(Clone, Debug)]
pub struct LabeledSplit {
    pub split: Split,
    pub features: FeatureMatrix,
    pub labels: Vec<ActivityRecord>,
}

impl LabeledSplit {
    /// Number of labelled samples.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn binary_labels(&self) -> impl Iterator<Item = BinaryLabel> + '_ {
        self.labels.iter().map(|record| record.binary)
    }

    pub fn activities(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.labels.iter().map(|record| record.activity.as_deref())
    }

    /// Row indices whose binary label equals `label`.
    ///
    /// Only rows present in both the matrix and the label vector are considered.
    pub fn rows_matching(&self, label: BinaryLabel) -> Vec<usize> {
        let paired = self.features.rows().min(self.labels.len());
        self.labels[..paired]
            .iter()
            .enumerate()
            .filter(|(_, record)| record.binary == label)
            .map(|(index, _)| index)
            .collect()
    }

    /// Copies out the feature rows whose binary label equals `label`.
    pub fn select_rows(&self, label: BinaryLabel) -> Array2<f64> {
        let rows = self.rows_matching(label);
        self.features.values().select(Axis(0), &rows)
    }
}

/// Everything read from one dataset directory.
#[derive(Clone, Debug)]
pub struct HarDataset {
    pub feature_names: FeatureNames,
    pub activity_map: ActivityMap,
    pub train: LabeledSplit,
    pub test: LabeledSplit,
}

impl HarDataset {
    pub fn split(&self, split: Split) -> &LabeledSplit {
        match split {
            Split::Train => &self.train,
            Split::Test => &self.test,
        }
    }
}

/// Loads feature names, activity labels, then the train and test splits.
pub fn load_dataset(config: &DatasetConfig) -> Result<HarDataset> {
    let paths = DatasetPaths::new(&config.root);
    info!(
        target: "har_data::dataset",
        "Loading HAR dataset from {} ({:?} validation)",
        paths.root.display(),
        config.validation
    );

    let feature_names = load_feature_names(&paths.features)?;
    let activity_map = load_activity_map(&paths.activity_labels)?;
    let train = load_split(&paths, Split::Train, &feature_names, &activity_map, config.validation)?;
    let test = load_split(&paths, Split::Test, &feature_names, &activity_map, config.validation)?;

    Ok(HarDataset {
        feature_names,
        activity_map,
        train,
        test,
    })
}

/// Reads one split's matrix and labels, then maps ids to names and binary flags.
pub fn load_split(
    paths: &DatasetPaths,
    split: Split,
    feature_names: &FeatureNames,
    activity_map: &ActivityMap,
    validation: ValidationMode,
) -> Result<LabeledSplit> {
    let matrix_path = paths.features_for(split);
    let values = read_matrix(open(matrix_path)?, matrix_path, Some(feature_names.len()))?;
    if values.nrows() == 0 {
        return Err(DatasetError::Empty {
            path: matrix_path.to_path_buf(),
        });
    }

    let labels_path = paths.labels_for(split);
    let ids = read_label_ids(open(labels_path)?, labels_path)?;
    let labels = map_activity_ids(ids, activity_map, labels_path, validation)?;

    if values.nrows() != labels.len() {
        match validation {
            ValidationMode::Strict => {
                return Err(DatasetError::RowCountMismatch {
                    split,
                    features: values.nrows(),
                    labels: labels.len(),
                });
            }
            ValidationMode::Lenient => warn!(
                target: "har_data::dataset",
                "{} split has {} feature rows but {} labels",
                split,
                values.nrows(),
                labels.len()
            ),
        }
    }

    info!(
        target: "har_data::dataset",
        "Loaded {} split: {} samples x {} features",
        split,
        values.nrows(),
        values.ncols()
    );

    Ok(LabeledSplit {
        split,
        features: FeatureMatrix::new(feature_names.clone(), values)?,
        labels,
    })
}

fn map_activity_ids(
    ids: Vec<(usize, ActivityId)>,
    activity_map: &ActivityMap,
    source: &Path,
    validation: ValidationMode,
) -> Result<Vec<ActivityRecord>> {
    let mut records = Vec::with_capacity(ids.len());
    let mut unmapped = 0usize;
    for (line, id) in ids {
        let record = match activity_map.get(id) {
            Some(activity) => ActivityRecord {
                id,
                activity: Some(activity.to_string()),
                binary: to_binary_label(activity),
            },
            None if validation == ValidationMode::Strict => {
                return Err(DatasetError::UnknownActivity {
                    path: source.to_path_buf(),
                    line,
                    id,
                });
            }
            None => {
                unmapped += 1;
                ActivityRecord {
                    id,
                    activity: None,
                    binary: BinaryLabel::Inactive,
                }
            }
        };
        records.push(record);
    }
    if unmapped > 0 {
        warn!(
            target: "har_data::dataset",
            "{} labels in {} have no activity name; marked inactive",
            unmapped,
            source.display()
        );
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{write_dataset, DatasetFixture};
    use std::fs;

    #[test]
    fn paths_follow_dataset_layout() {
        let paths = DatasetPaths::new("/data/UCI HAR Dataset");
        assert_eq!(paths.features, Path::new("/data/UCI HAR Dataset/features.txt"));
        assert_eq!(
            paths.labels_for(Split::Test),
            Path::new("/data/UCI HAR Dataset/test/y_test.txt")
        );
        assert_eq!(
            paths.features_for(Split::Train),
            Path::new("/data/UCI HAR Dataset/train/X_train.txt")
        );
    }

    #[test]
    fn loads_fixture_dataset() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_dataset(dir.path(), &DatasetFixture::default());

        let config = DatasetConfig {
            root: dir.path().to_path_buf(),
            ..DatasetConfig::default()
        };
        let dataset = load_dataset(&config).expect("load dataset");

        assert_eq!(dataset.feature_names.len(), 3);
        for split in Split::ALL {
            let data = dataset.split(split);
            assert_eq!(data.features.rows(), data.len());
            assert_eq!(data.features.columns(), 3);
        }
        assert_eq!(dataset.train.len(), 6);
        assert_eq!(dataset.test.len(), 2);

        let activities: Vec<Option<&str>> = dataset.test.activities().collect();
        assert_eq!(activities, vec![Some("LAYING"), Some("WALKING_DOWNSTAIRS")]);
    }

    #[test]
    fn binary_labels_follow_activity_ids() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_dataset(dir.path(), &DatasetFixture::default());
        let dataset = load_dataset(&DatasetConfig {
            root: dir.path().to_path_buf(),
            ..DatasetConfig::default()
        })
        .expect("load dataset");

        for record in &dataset.train.labels {
            let expected = if (1..=3).contains(&record.id) {
                BinaryLabel::Active
            } else {
                BinaryLabel::Inactive
            };
            assert_eq!(record.binary, expected, "id {}", record.id);
        }
    }

    #[test]
    fn columns_are_addressable_by_suffixed_name() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_dataset(dir.path(), &DatasetFixture::default());
        let dataset = load_dataset(&DatasetConfig {
            root: dir.path().to_path_buf(),
            ..DatasetConfig::default()
        })
        .expect("load dataset");

        let column = dataset
            .train
            .features
            .column("tBodyAcc-mean()-Y_1")
            .expect("column present");
        assert_eq!(column.len(), 6);
        assert!((column[0] - 0.1).abs() < 1e-12);
        assert!(dataset.train.features.column("tBodyAcc-mean()-Y").is_none());
    }

    #[test]
    fn select_rows_partitions_by_binary_label() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_dataset(dir.path(), &DatasetFixture::default());
        let dataset = load_dataset(&DatasetConfig {
            root: dir.path().to_path_buf(),
            ..DatasetConfig::default()
        })
        .expect("load dataset");

        let active = dataset.train.rows_matching(BinaryLabel::Active);
        let inactive = dataset.train.rows_matching(BinaryLabel::Inactive);
        assert_eq!(active, vec![0, 1, 2]);
        assert_eq!(inactive, vec![3, 4, 5]);
        assert_eq!(dataset.train.select_rows(BinaryLabel::Active).dim(), (3, 3));
    }

    #[test]
    fn row_count_mismatch_is_fatal_when_strict() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_dataset(dir.path(), &DatasetFixture::default());
        fs::write(dir.path().join("test/y_test.txt"), "6\n").expect("truncate labels");

        let err = load_dataset(&DatasetConfig {
            root: dir.path().to_path_buf(),
            validation: ValidationMode::Strict,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::RowCountMismatch {
                split: Split::Test,
                features: 2,
                labels: 1,
            }
        ));
    }

    #[test]
    fn row_count_mismatch_is_tolerated_when_lenient() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_dataset(dir.path(), &DatasetFixture::default());
        fs::write(dir.path().join("test/y_test.txt"), "6\n").expect("truncate labels");

        let dataset = load_dataset(&DatasetConfig {
            root: dir.path().to_path_buf(),
            validation: ValidationMode::Lenient,
        })
        .expect("lenient load");
        assert_eq!(dataset.test.features.rows(), 2);
        assert_eq!(dataset.test.len(), 1);
        assert_eq!(dataset.test.rows_matching(BinaryLabel::Inactive), vec![0]);
    }

    #[test]
    fn unknown_activity_id_depends_on_validation() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_dataset(dir.path(), &DatasetFixture::default());
        fs::write(dir.path().join("test/y_test.txt"), "6\n9\n").expect("write labels");

        let strict = load_dataset(&DatasetConfig {
            root: dir.path().to_path_buf(),
            validation: ValidationMode::Strict,
        })
        .unwrap_err();
        assert!(matches!(
            strict,
            DatasetError::UnknownActivity { line: 2, id: 9, .. }
        ));

        let lenient = load_dataset(&DatasetConfig {
            root: dir.path().to_path_buf(),
            validation: ValidationMode::Lenient,
        })
        .expect("lenient load");
        assert_eq!(
            lenient.test.labels[1],
            ActivityRecord {
                id: 9,
                activity: None,
                binary: BinaryLabel::Inactive,
            }
        );
    }

    #[test]
    fn matrix_width_must_match_feature_names() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_dataset(dir.path(), &DatasetFixture::default());
        fs::write(dir.path().join("train/X_train.txt"), "1.0 2.0\n").expect("write matrix");

        let err = load_dataset(&DatasetConfig {
            root: dir.path().to_path_buf(),
            ..DatasetConfig::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::ColumnCount {
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn feature_matrix_rejects_mismatched_names() {
        let names = FeatureNames::from_entries(vec![
            (1, "a".to_string()),
            (2, "b".to_string()),
            (3, "c".to_string()),
        ]);
        let err = FeatureMatrix::new(names.clone(), Array2::zeros((2, 2))).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::ColumnNames {
                names: 3,
                columns: 2,
            }
        ));

        let matrix = FeatureMatrix::new(names, Array2::zeros((2, 3))).expect("matching width");
        assert_eq!(matrix.column("c_2").map(|column| column.len()), Some(2));
    }

    #[test]
    fn empty_matrix_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_dataset(dir.path(), &DatasetFixture::default());
        fs::write(dir.path().join("test/X_test.txt"), "").expect("empty matrix");

        let err = load_dataset(&DatasetConfig {
            root: dir.path().to_path_buf(),
            ..DatasetConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, DatasetError::Empty { .. }));
    }
}
