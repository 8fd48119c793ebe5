//! Writes rendered HTML snapshots to disk.

use std::path::Path;

use brandkit_core::assets::snapshot::render_snapshot;
use brandkit_types::asset::AssetBundle;
use brandkit_types::error::RepositoryError;

/// Render `bundle` and write it to `path`, creating parent directories.
pub async fn write_snapshot(path: &Path, bundle: &AssetBundle) -> Result<(), RepositoryError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| RepositoryError::Storage(format!("{}: {e}", parent.display())))?;
    }
    tokio::fs::write(path, render_snapshot(bundle))
        .await
        .map_err(|e| RepositoryError::Storage(format!("{}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), "snapshot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandkit_types::brand::BrandBrief;
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_rendered_page() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out/landing_page.html");
        let bundle = AssetBundle::new(&BrandBrief::new("Flight Mobile", "Prepaid").unwrap());

        write_snapshot(&path, &bundle).await.unwrap();

        let html = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(html.contains("<h1>Flight Mobile</h1>"));
    }
}
