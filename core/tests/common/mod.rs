use std::path::PathBuf;

pub fn get_test_path(relative_path: &[&str]) -> PathBuf {
    let mut test_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    test_path.push("tests");
    for component in relative_path {
        test_path.push(component);
    }
    test_path
}

/// The reference table shipped at the workspace root.
#[allow(dead_code)]
pub fn get_dataset_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop();
    path.push("data");
    path.push("colors.csv");
    path
}
