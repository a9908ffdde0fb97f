use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named unit of generated content tied to a project: a source file,
/// documentation page, or test suite.
///
/// Records are keyed by `name` in the store. Each stage that touches a file
/// replaces its content wholesale; the persisted code always reflects the
/// latest stage that wrote it. There is no versioning or conflict detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub id: Uuid,
    pub name: String,
    /// Generated content (code, documentation text, or tests).
    pub code: String,
    /// Project identifier this file belongs to.
    pub project: String,
    /// Repository path for the file, when the caller supplied one.
    #[serde(default, rename = "repoPath", skip_serializing_if = "Option::is_none")]
    pub repo_path: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl ProjectFile {
    /// Create a new record with a fresh id and the current timestamp.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            code: code.into(),
            project: project.into(),
            repo_path: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a repository path.
    pub fn with_repo_path(mut self, path: impl Into<String>) -> Self {
        self.repo_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assigns_id_and_timestamp() {
        let file = ProjectFile::new("app.py", "print('hi')", "proj-1");
        assert_eq!(file.name, "app.py");
        assert_eq!(file.code, "print('hi')");
        assert_eq!(file.project, "proj-1");
        assert!(file.repo_path.is_none());
    }

    #[test]
    fn repo_path_is_omitted_from_json_when_absent() {
        let file = ProjectFile::new("a.js", "", "p");
        let json = serde_json::to_value(&file).unwrap();
        assert!(json.get("repoPath").is_none());

        let with_path = ProjectFile::new("a.js", "", "p").with_repo_path("src/a.js");
        let json = serde_json::to_value(&with_path).unwrap();
        assert_eq!(json["repoPath"], "src/a.js");
    }
}
