// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::artifact_repository::{ArtifactError, ArtifactRepository};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// 本地调试存档
///
/// 将截图和页面标记写入调试目录：
/// `{label}_screenshot_{timestamp}.png` / `{label}_page_{timestamp}.html`
pub struct LocalArtifactStore {
    dir: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 标签可能包含用户查询词，落盘前压缩成安全的文件名片段
    fn sanitize(label: &str) -> String {
        label
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect()
    }
}

#[async_trait]
impl ArtifactRepository for LocalArtifactStore {
    async fn persist(
        &self,
        label: &str,
        screenshot: &[u8],
        markup: &str,
    ) -> Result<(), ArtifactError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ArtifactError::Io(e.to_string()))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let label = Self::sanitize(label);

        let screenshot_path = self
            .dir
            .join(format!("{}_screenshot_{}.png", label, timestamp));
        let markup_path = self.dir.join(format!("{}_page_{}.html", label, timestamp));

        fs::write(&screenshot_path, screenshot)
            .await
            .map_err(|e| ArtifactError::Io(e.to_string()))?;
        fs::write(&markup_path, markup)
            .await
            .map_err(|e| ArtifactError::Io(e.to_string()))?;

        tracing::info!(
            screenshot = %screenshot_path.display(),
            markup = %markup_path.display(),
            "debug artifacts saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_persist_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path());

        store
            .persist("shop_block_платье", b"\x89PNG", "<html></html>")
            .await
            .unwrap();

        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        assert_eq!(names.len(), 2);
        assert!(names.iter().any(|n| n.ends_with(".png")));
        assert!(names.iter().any(|n| n.ends_with(".html")));
        // The cyrillic query survives sanitization, separators do not
        assert!(names.iter().all(|n| n.contains("shop-block")));
    }
}
