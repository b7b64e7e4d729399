use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::{
    EMOTION_MODEL_NAME, EMOTION_MODEL_URL, FACE_MODEL_NAME, FACE_MODEL_URL,
};

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Where an analyzer model lives: its file name and its download URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelSource {
    pub name: &'static str,
    pub url: &'static str,
}

pub const FACE_MODEL: ModelSource = ModelSource {
    name: FACE_MODEL_NAME,
    url: FACE_MODEL_URL,
};

pub const EMOTION_MODEL: ModelSource = ModelSource {
    name: EMOTION_MODEL_NAME,
    url: EMOTION_MODEL_URL,
};

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Resolve a model file, checking local locations before downloading.
///
/// Resolution order:
/// 1. User cache directory (platform-specific)
/// 2. Bundled directory, when given
/// 3. Download from the model's URL into the cache
pub fn resolve(
    source: &ModelSource,
    bundled_dir: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    resolve_in(&model_cache_dir()?, source, bundled_dir, progress)
}

/// [`resolve`] against an explicit cache directory.
pub fn resolve_in(
    cache_dir: &Path,
    source: &ModelSource,
    bundled_dir: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let cached_path = cache_dir.join(source.name);
    if cached_path.exists() {
        log::debug!("Using cached model {}", cached_path.display());
        return Ok(cached_path);
    }

    if let Some(dir) = bundled_dir {
        let bundled_path = dir.join(source.name);
        if bundled_path.exists() {
            log::debug!("Using bundled model {}", bundled_path.display());
            return Ok(bundled_path);
        }
    }

    log::info!("Downloading {} from {}", source.name, source.url);
    fs::create_dir_all(cache_dir).map_err(ModelResolveError::CacheDir)?;
    download(source.url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/FaceInsight/models/`
/// - Linux: `$XDG_CACHE_HOME/FaceInsight/models/` or `~/.cache/FaceInsight/models/`
/// - Windows: `%LOCALAPPDATA%/FaceInsight/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("FaceInsight").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("FaceInsight").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let temp_path = dest.with_extension("part");

    let result = download_to(url, dest, &temp_path, progress);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Stream the body into `temp_path`, then rename it onto `dest`.
fn download_to(
    url: &str,
    dest: &Path,
    temp_path: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), ModelResolveError> {
    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ModelResolveError::Write { path, source }
    };

    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| ModelResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    let mut file = fs::File::create(temp_path).map_err(write_err(temp_path))?;
    let mut buf = vec![0u8; 1024 * 1024];
    loop {
        let n = response.read(&mut buf).map_err(write_err(temp_path))?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).map_err(write_err(temp_path))?;
        downloaded += n as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }
    file.flush().map_err(write_err(temp_path))?;
    drop(file);

    fs::rename(temp_path, dest).map_err(write_err(dest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const UNREACHABLE: ModelSource = ModelSource {
        name: "test_model.onnx",
        url: "http://invalid.nonexistent.example.com/model.onnx",
    };

    #[test]
    fn test_resolve_in_prefers_cache() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("cache");
        let bundled = tmp.path().join("bundled");
        fs::create_dir_all(&cache).unwrap();
        fs::create_dir_all(&bundled).unwrap();
        fs::write(cache.join(UNREACHABLE.name), b"cached").unwrap();
        fs::write(bundled.join(UNREACHABLE.name), b"bundled").unwrap();

        let path = resolve_in(&cache, &UNREACHABLE, Some(&bundled), None).unwrap();
        assert_eq!(path, cache.join(UNREACHABLE.name));
    }

    #[test]
    fn test_resolve_in_falls_back_to_bundled() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("cache");
        let bundled = tmp.path().join("bundled");
        fs::create_dir_all(&bundled).unwrap();
        fs::write(bundled.join(UNREACHABLE.name), b"bundled").unwrap();

        let path = resolve_in(&cache, &UNREACHABLE, Some(&bundled), None).unwrap();
        assert_eq!(path, bundled.join(UNREACHABLE.name));
        assert!(!cache.exists());
    }

    #[test]
    fn test_resolve_in_download_failure_is_error() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("cache");

        let err = resolve_in(&cache, &UNREACHABLE, None, None).unwrap_err();
        assert!(matches!(err, ModelResolveError::Download { .. }));
        assert!(!cache.join(UNREACHABLE.name).exists());
    }

    #[test]
    fn test_model_cache_dir_returns_path() {
        let path = model_cache_dir().unwrap();
        assert!(path.to_string_lossy().contains("FaceInsight"));
        assert!(path.to_string_lossy().contains("models"));
    }

    #[test]
    fn test_download_leaves_no_partial_file_on_failure() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("model.onnx");
        let _ = download(UNREACHABLE.url, &dest, None);
        assert!(!dest.exists());
        assert!(!dest.with_extension("part").exists());
    }

    #[test]
    fn test_known_sources_are_onnx() {
        for source in [FACE_MODEL, EMOTION_MODEL] {
            assert!(source.name.ends_with(".onnx"));
            assert!(source.url.starts_with("https://"));
        }
    }
}
