use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Test name and execution date attached to every frame of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TestMetadata {
    pub test_name: Option<String>,
    pub test_execution_date: Option<String>,
}

impl TestMetadata {
    pub fn new(test_name: impl Into<String>, test_execution_date: impl Into<String>) -> Self {
        Self {
            test_name: Some(test_name.into()),
            test_execution_date: Some(test_execution_date.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.test_name.is_none() && self.test_execution_date.is_none()
    }
}

/// Where the test metadata of a run comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MetadataSource {
    /// Name and execution date given directly
    Literal { name: String, date: String },
    /// Test report scanned for the name and date lines
    ReportFile(PathBuf),
    #[default]
    None,
}
