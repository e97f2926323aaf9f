use std::fs;
use std::path::Path;

/// Contents of a miniature dataset directory used by the loader tests.
pub struct DatasetFixture {
    pub features: &'static str,
    pub activity_labels: &'static str,
    pub x_train: &'static str,
    pub y_train: &'static str,
    pub x_test: &'static str,
    pub y_test: &'static str,
}

impl Default for DatasetFixture {
    fn default() -> Self {
        Self {
            features: "1 tBodyAcc-mean()-X\n2 tBodyAcc-mean()-Y\n3 tBodyAcc-mean()-X\n",
            activity_labels: "1 WALKING\n2 WALKING_UPSTAIRS\n3 WALKING_DOWNSTAIRS\n4 SITTING\n5 STANDING\n6 LAYING\n",
            x_train: concat!(
                "  2.8858451e-001  1.0000000e-001 -1.3290540e-001\n",
                "  2.7841883e-001 -1.6410568e-002 -1.2352019e-001\n",
                "  2.7965306e-001 -1.9467156e-002 -1.1346169e-001\n",
                "  2.7917394e-001 -2.6200646e-002 -1.2328257e-001\n",
                "  2.7662877e-001 -1.6569655e-002 -1.1536185e-001\n",
                "  2.7719877e-001 -1.0097850e-002 -1.0513725e-001\n",
            ),
            y_train: "1\n2\n3\n4\n5\n6\n",
            x_test: concat!(
                "  2.5717778e-001 -2.3285230e-002 -1.4653762e-002\n",
                "  2.8602671e-001 -1.3163359e-002 -1.1908252e-001\n",
            ),
            y_test: "6\n3\n",
        }
    }
}

pub fn write_dataset(root: &Path, fixture: &DatasetFixture) {
    fs::create_dir_all(root.join("train")).expect("create train dir");
    fs::create_dir_all(root.join("test")).expect("create test dir");
    let files = [
        ("features.txt", fixture.features),
        ("activity_labels.txt", fixture.activity_labels),
        ("train/X_train.txt", fixture.x_train),
        ("train/y_train.txt", fixture.y_train),
        ("test/X_test.txt", fixture.x_test),
        ("test/y_test.txt", fixture.y_test),
    ];
    for (name, contents) in files {
        fs::write(root.join(name), contents).expect("write fixture file");
    }
}
