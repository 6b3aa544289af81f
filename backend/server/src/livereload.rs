//! # Live reload
//!
//! Development helper. The page polls `/__livereload` and reloads itself
//! when the returned version changes. The version is a fingerprint over the
//! paths and modification times of every watched file, cached for one poll
//! interval so a busy page does not walk the tree on every request. The walk
//! runs on the blocking pool and never under the cache lock.
use std::{
    fs::{self, Metadata},
    path::{Path, PathBuf},
    time::{Duration, Instant, UNIX_EPOCH},
};

use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use tokio::task::{JoinError, spawn_blocking};
use tracing::debug;

use crate::config::Config;

const IGNORED_DIRS: [&str; 3] = ["__pycache__", ".git", "target"];
const IGNORED_EXTENSIONS: [&str; 3] = ["pyc", "pyo", "swp"];

pub struct LiveReload {
    root: PathBuf,
    targets: Vec<PathBuf>,
    interval: Duration,
    cache: Mutex<Option<(String, Instant)>>,
}

impl LiveReload {
    pub fn new(root: impl Into<PathBuf>, targets: Vec<PathBuf>, interval: Duration) -> Self {
        Self {
            root: root.into(),
            targets,
            interval,
            cache: Mutex::new(None),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.livereload_root.clone(),
            config.livereload_watch.clone(),
            config.livereload_interval,
        )
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Cached fingerprint, recomputed once the interval has elapsed.
    pub async fn token(&self) -> Result<String, JoinError> {
        let now = Instant::now();
        if let Some(token) = self.cached(now) {
            return Ok(token);
        }

        let root = self.root.clone();
        let targets = self.targets.clone();
        let token = spawn_blocking(move || fingerprint(&root, &targets)).await?;

        *self.cache.lock() = Some((token.clone(), now));
        Ok(token)
    }

    fn cached(&self, now: Instant) -> Option<String> {
        self.cache
            .lock()
            .as_ref()
            .filter(|(_, computed)| now.duration_since(*computed) < self.interval)
            .map(|(token, _)| token.clone())
    }

    pub fn compute_token(&self) -> String {
        fingerprint(&self.root, &self.targets)
    }
}

fn fingerprint(root: &Path, targets: &[PathBuf]) -> String {
    let mut hasher = Sha256::new();

    for target in targets {
        let mut files = Vec::new();
        collect_files(&root.join(target), &mut files);
        files.sort();

        for file in files {
            let Ok(metadata) = fs::metadata(&file) else {
                continue;
            };
            let relative = file.strip_prefix(root).unwrap_or(file.as_path());

            hasher.update(relative.to_string_lossy().as_bytes());
            hasher.update(modified_nanos(&metadata).to_string().as_bytes());
        }
    }

    format!("{:x}", hasher.finalize())
}

fn collect_files(path: &Path, files: &mut Vec<PathBuf>) {
    if path.is_file() {
        if !is_ignored_file(path) {
            files.push(path.to_path_buf());
        }
        return;
    }

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Skipping {}: {e}", path.display());
            return;
        }
    };

    for entry in entries.flatten() {
        let child = entry.path();
        let ignored_dir = child
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| IGNORED_DIRS.contains(&name));

        if child.is_dir() && ignored_dir {
            continue;
        }

        collect_files(&child, files);
    }
}

fn is_ignored_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| IGNORED_EXTENSIONS.contains(&extension))
}

fn modified_nanos(metadata: &Metadata) -> u128 {
    metadata
        .modified()
        .ok()
        .and_then(|modified| modified.duration_since(UNIX_EPOCH).ok())
        .map_or(0, |elapsed| elapsed.as_nanos())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn watcher(root: &Path, interval: Duration) -> LiveReload {
        LiveReload::new(root, vec![PathBuf::from("static")], interval)
    }

    #[test]
    fn test_token_is_stable() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("static")).unwrap();
        fs::write(dir.path().join("static/app.js"), "1").unwrap();

        let live_reload = watcher(dir.path(), Duration::ZERO);

        assert_eq!(live_reload.compute_token(), live_reload.compute_token());
        assert_eq!(live_reload.compute_token().len(), 64);
    }

    #[tokio::test]
    async fn test_token_changes_with_new_file() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("static/css")).unwrap();
        fs::write(dir.path().join("static/app.js"), "1").unwrap();

        let live_reload = watcher(dir.path(), Duration::ZERO);
        let before = live_reload.token().await.unwrap();

        fs::write(dir.path().join("static/css/site.css"), "body {}").unwrap();

        assert_ne!(before, live_reload.token().await.unwrap());
    }

    #[tokio::test]
    async fn test_token_cached_within_interval() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("static")).unwrap();

        let live_reload = watcher(dir.path(), Duration::from_secs(3600));
        let before = live_reload.token().await.unwrap();

        fs::write(dir.path().join("static/app.js"), "1").unwrap();

        assert_eq!(before, live_reload.token().await.unwrap());
        assert_ne!(before, live_reload.compute_token());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_polls_do_not_block_the_runtime() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("static/js")).unwrap();
        for i in 0..50 {
            fs::write(dir.path().join(format!("static/js/{i}.js")), "1").unwrap();
        }

        let live_reload = watcher(dir.path(), Duration::ZERO);
        let (first, second, third) =
            tokio::join!(live_reload.token(), live_reload.token(), live_reload.token());

        assert_eq!(first.unwrap(), live_reload.compute_token());
        assert_eq!(second.unwrap(), third.unwrap());
        assert!(live_reload.cache.try_lock().is_some());
    }

    #[test]
    fn test_ignored_entries() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("static/__pycache__")).unwrap();

        let live_reload = watcher(dir.path(), Duration::ZERO);
        let before = live_reload.compute_token();

        fs::write(dir.path().join("static/__pycache__/app.pyc"), "x").unwrap();
        fs::write(dir.path().join("static/.app.js.swp"), "x").unwrap();

        assert_eq!(before, live_reload.compute_token());
    }

    #[test]
    fn test_missing_targets() {
        let dir = tempdir().unwrap();
        let live_reload = watcher(dir.path(), Duration::ZERO);

        assert_eq!(live_reload.compute_token().len(), 64);
    }
}
