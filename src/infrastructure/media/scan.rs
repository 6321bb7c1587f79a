//! Directory scanning shared by the media adapters.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::trace;

use crate::domain::entities::MediaImage;

/// File extensions treated as images.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Returns true if `path` has an image extension.
#[must_use]
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Stable identifier derived from the path.
#[must_use]
pub fn media_id(path: &Path) -> u64 {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(path.to_string_lossy().as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

/// Lists images in `dir`, newest modification first, ties by name.
///
/// # Errors
/// Returns error if the directory cannot be read.
pub async fn scan_images(dir: &Path) -> std::io::Result<Vec<MediaImage>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut images = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !is_image_path(&path) {
            continue;
        }
        let Ok(meta) = entry.metadata().await else {
            trace!(path = %path.display(), "Skipping entry without metadata");
            continue;
        };
        if !meta.is_file() {
            continue;
        }

        let modified = meta.modified().ok().map(DateTime::<Utc>::from);
        images.push(to_media(path, modified));
    }

    images.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
    Ok(images)
}

fn to_media(path: PathBuf, modified: Option<DateTime<Utc>>) -> MediaImage {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    MediaImage {
        id: media_id(&path),
        path,
        name,
        modified,
    }
}
