use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// Read a JSON file. Returns `None` when the file does not exist.
pub async fn load_json<T>(path: impl AsRef<Path>) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let bytes = tokio::fs::read(path).await.context("reading JSON file")?;
    let contents =
        serde_json::from_slice(&bytes).context("decoding JSON contents")?;
    Ok(Some(contents))
}

/// Save a serializable object as a pretty-printed JSON file.
pub async fn save_json<T, P>(contents: &T, path: P) -> Result<()>
where
    T: ?Sized + Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .context("creating parent directories")?;
    }
    let json =
        serde_json::to_string_pretty(contents).context("encoding to JSON")?;
    tokio::fs::write(path, json)
        .await
        .context("saving JSON contents")?;
    Ok(())
}
