//! File-backed page store
//!
//! Each page is one pretty-printed JSON file, `<id>.page.json`, wrapped in a
//! versioned envelope.

use super::{PageStore, new_page_id};
use crate::config::EditorConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagecraft_core::{EditorError, EditorResult, PageId};
use pagecraft_model::{
    PageDocument, PageSummary, SCHEMA_VERSION, SavePageRequest, SavePageResponse, parse_layout,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name suffix of stored pages
pub const PAGE_FILE_SUFFIX: &str = ".page.json";

/// On-disk envelope of a stored page
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PageFile {
    schema_version: u32,
    id: PageId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    status: String,
    created_at: DateTime<Utc>,
    /// Kept untyped so a damaged layout still lets the page load
    #[serde(default)]
    layout: Value,
}

impl PageFile {
    fn summary(&self) -> PageSummary {
        PageSummary {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// Page store keeping one JSON file per page in a directory
#[derive(Debug, Clone)]
pub struct FilePageStore {
    dir: PathBuf,
}

impl FilePageStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> EditorResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| EditorError::DirectoryCreate {
                path: dir.clone(),
                message: e.to_string(),
            })?;
        info!(dir = %dir.display(), "Opened page store");
        Ok(Self { dir })
    }

    /// Open the store configured by `store_dir`
    pub async fn from_config(config: &EditorConfig) -> EditorResult<Self> {
        let dir = config
            .store_dir
            .as_ref()
            .ok_or_else(|| EditorError::InvalidConfig("store_dir is not set".to_string()))?;
        Self::open(dir).await
    }

    /// Directory holding the page files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn page_path(&self, id: &PageId) -> EditorResult<PathBuf> {
        let valid = !id.as_str().is_empty()
            && id
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(EditorError::PageNotFound(id.to_string()));
        }
        Ok(self.dir.join(format!("{}{}", id, PAGE_FILE_SUFFIX)))
    }

    async fn read_page_file(path: &Path) -> EditorResult<PageFile> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| EditorError::FileRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let file: PageFile = serde_json::from_str(&json).map_err(|e| EditorError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid page file format: {}", e),
        })?;

        if file.schema_version > SCHEMA_VERSION {
            return Err(EditorError::SchemaVersionMismatch {
                expected: SCHEMA_VERSION,
                found: file.schema_version,
            });
        }
        Ok(file)
    }
}

#[async_trait]
impl PageStore for FilePageStore {
    async fn list_pages(&self) -> EditorResult<Vec<PageSummary>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| EditorError::FileRead {
                path: self.dir.clone(),
                message: e.to_string(),
            })?;

        let mut pages = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_page = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(PAGE_FILE_SUFFIX));
            if !is_page {
                continue;
            }

            match Self::read_page_file(&path).await {
                Ok(file) => pages.push(file),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable page file")
                }
            }
        }

        pages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pages.iter().map(PageFile::summary).collect())
    }

    async fn load_page(&self, id: &PageId) -> EditorResult<PageDocument> {
        let path = self.page_path(id)?;
        if !tokio::fs::try_exists(&path).await? {
            return Err(EditorError::PageNotFound(id.to_string()));
        }

        let file = Self::read_page_file(&path).await?;
        let title = Some(file.title).filter(|t| !t.is_empty());
        let layout = parse_layout(file.layout);
        debug!(%id, elements = layout.len(), "Loaded page file");
        Ok(PageDocument { title, layout })
    }

    async fn save_page(&self, request: &SavePageRequest) -> EditorResult<SavePageResponse> {
        let id = new_page_id();
        let path = self.page_path(&id)?;

        let file = PageFile {
            schema_version: SCHEMA_VERSION,
            id: id.clone(),
            title: request.title.clone(),
            status: request.status.clone(),
            created_at: Utc::now(),
            layout: serde_json::to_value(&request.layout)?,
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| EditorError::FileWrite {
            path: path.clone(),
            message: format!("Failed to serialize page: {}", e),
        })?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|e| EditorError::FileWrite {
                path: path.clone(),
                message: e.to_string(),
            })?;

        info!(%id, path = %path.display(), "Saved page");
        Ok(SavePageResponse { id })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{Element, ElementKind};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn request(title: &str, layout: Vec<Element>) -> SavePageRequest {
        SavePageRequest {
            title: title.to_string(),
            layout,
            status: "draft".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FilePageStore::open(temp_dir.path()).await.unwrap();
        let layout = vec![
            Element::create_default(ElementKind::Button),
            Element::create_default(ElementKind::Separator),
        ];

        let saved = store.save_page(&request("About", layout.clone())).await.unwrap();
        let path = temp_dir
            .path()
            .join(format!("{}{}", saved.id, PAGE_FILE_SUFFIX));
        assert!(path.exists());

        let page = store.load_page(&saved.id).await.unwrap();
        assert_eq!(page.title.as_deref(), Some("About"));
        assert_eq!(page.layout, layout);
    }

    #[tokio::test]
    async fn test_envelope_contents() {
        let temp_dir = TempDir::new().unwrap();
        let store = FilePageStore::open(temp_dir.path()).await.unwrap();
        let saved = store.save_page(&request("Env", vec![])).await.unwrap();

        let path = store.page_path(&saved.id).unwrap();
        let raw: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(raw["schema_version"], SCHEMA_VERSION);
        assert_eq!(raw["status"], "draft");
        assert_eq!(raw["id"], saved.id.as_str());
        assert!(raw["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let store = FilePageStore::open(temp_dir.path()).await.unwrap();

        let first = store.save_page(&request("First", vec![])).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.save_page(&request("Second", vec![])).await.unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let pages = store.list_pages().await.unwrap();
        assert_eq!(
            pages,
            vec![
                PageSummary {
                    id: second.id,
                    title: "Second".to_string()
                },
                PageSummary {
                    id: first.id,
                    title: "First".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_and_invalid_ids() {
        let temp_dir = TempDir::new().unwrap();
        let store = FilePageStore::open(temp_dir.path()).await.unwrap();

        assert!(store.load_page(&PageId::from("absent")).await.unwrap_err().is_not_found());
        assert!(store.load_page(&PageId::from("../etc")).await.unwrap_err().is_not_found());
        assert!(store.load_page(&PageId::from("")).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_damaged_layout_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FilePageStore::open(temp_dir.path()).await.unwrap();
        std::fs::write(
            temp_dir.path().join("old.page.json"),
            r#"{"schema_version":1,"id":"old","title":"",
                "created_at":"2024-01-01T00:00:00Z","layout":{"broken":true}}"#,
        )
        .unwrap();

        let page = store.load_page(&PageId::from("old")).await.unwrap();
        assert_eq!(page.title, None);
        assert!(page.layout.is_empty());
    }

    #[tokio::test]
    async fn test_newer_schema_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = FilePageStore::open(temp_dir.path()).await.unwrap();
        std::fs::write(
            temp_dir.path().join("future.page.json"),
            r#"{"schema_version":99,"id":"future","created_at":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        let err = store.load_page(&PageId::from("future")).await.unwrap_err();
        assert!(matches!(err, EditorError::SchemaVersionMismatch { found: 99, .. }));
        assert!(store.list_pages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_from_config_requires_dir() {
        let err = FilePageStore::from_config(&EditorConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, EditorError::InvalidConfig(_)));

        let temp_dir = TempDir::new().unwrap();
        let config = EditorConfig {
            store_dir: Some(temp_dir.path().join("pages")),
            ..EditorConfig::default()
        };
        let store = FilePageStore::from_config(&config).await.unwrap();
        assert!(store.dir().is_dir());
    }
}
