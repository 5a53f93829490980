// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attachment persistence: decoded media bytes land in a flat directory
//! with collision-free names derived from the sender and a fresh UUID.

use std::path::PathBuf;

use tracing::debug;
use uuid::Uuid;

use covey_core::CoveyError;

/// Result of writing one attachment to disk.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub storage_path: PathBuf,
    pub filename: String,
    pub file_size: u64,
}

/// Flat on-disk attachment store rooted at a configured directory.
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write `bytes` under the store root as `{owner}_{uuid}.{ext}`.
    ///
    /// The root directory is created on demand. The extension comes from the
    /// declared MIME type, falling back to `bin` for anything unmapped.
    pub async fn persist(
        &self,
        bytes: &[u8],
        declared_mime: &str,
        owner: &str,
    ) -> Result<StoredMedia, CoveyError> {
        let extension = extension_for_mime(declared_mime);
        let filename = format!("{owner}_{}.{extension}", Uuid::new_v4());

        tokio::fs::create_dir_all(&self.root).await.map_err(map_io)?;
        let storage_path = self.root.join(&filename);
        tokio::fs::write(&storage_path, bytes).await.map_err(map_io)?;

        debug!(
            path = %storage_path.display(),
            size = bytes.len(),
            mime = declared_mime,
            "stored attachment"
        );
        Ok(StoredMedia {
            storage_path,
            filename,
            file_size: bytes.len() as u64,
        })
    }
}

fn map_io(e: std::io::Error) -> CoveyError {
    CoveyError::Storage { source: Box::new(e) }
}

/// Map a MIME type to a file extension, ignoring any `;`-separated
/// parameters. Unknown types get `bin`.
pub fn extension_for_mime(content_type: &str) -> &'static str {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    match essence {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "audio/mpeg" => "mp3",
        "audio/ogg" => "ogg",
        "audio/mp4" => "m4a",
        "audio/wav" | "audio/x-wav" => "wav",
        "video/mp4" => "mp4",
        "video/3gpp" => "3gp",
        "application/pdf" => "pdf",
        "application/zip" => "zip",
        "text/plain" => "txt",
        "text/vcard" => "vcf",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn extensions_cover_common_types_and_fall_back() {
        assert_eq!(extension_for_mime("image/png"), "png");
        assert_eq!(extension_for_mime("image/jpeg"), "jpg");
        assert_eq!(extension_for_mime("audio/ogg; codecs=opus"), "ogg");
        assert_eq!(extension_for_mime("application/pdf"), "pdf");
        assert_eq!(extension_for_mime("application/x-unknown"), "bin");
        assert_eq!(extension_for_mime(""), "bin");
    }

    #[tokio::test]
    async fn persist_writes_bytes_under_owner_prefixed_name() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path().join("media"));

        let stored = store
            .persist(b"\x89PNG-fake-bytes", "image/png", "1115550000")
            .await
            .unwrap();

        assert!(stored.filename.starts_with("1115550000_"));
        assert!(stored.filename.ends_with(".png"));
        assert_eq!(stored.file_size, 15);
        let on_disk = tokio::fs::read(&stored.storage_path).await.unwrap();
        assert_eq!(on_disk, b"\x89PNG-fake-bytes");
    }

    #[tokio::test]
    async fn persist_creates_missing_root_and_avoids_collisions() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path().join("deep").join("media"));

        let first = store.persist(b"a", "application/x-unknown", "222").await.unwrap();
        let second = store.persist(b"b", "application/x-unknown", "222").await.unwrap();

        assert!(first.filename.ends_with(".bin"));
        assert_ne!(first.filename, second.filename);
        assert!(first.storage_path.exists());
        assert!(second.storage_path.exists());
    }
}
