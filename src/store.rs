//! Post persistence over a single JSON file.
//!
//! The file holds the whole collection as a pretty-printed JSON array and is
//! the only source of truth: every operation re-reads it, and every mutation
//! rewrites it completely. A missing file is an empty blog.
//!
//! Writes go to `<file>.tmp` first and are renamed over the data file, so a
//! concurrent reader sees either the old document or the new one, never a
//! truncated one. Mutations on one [`PostStore`] are serialized by an async
//! mutex held for the full read-modify-write cycle; two processes sharing a
//! file can still overwrite each other.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tokio::sync::Mutex;
use tracing::debug;

use crate::post::{Post, PostDraft};

/// Errors from reading or writing the data file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but is not a JSON array of posts. It is left as is.
    #[error("{path} is not a valid post collection: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode posts: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Handle on the JSON file backing the blog.
#[derive(Debug)]
pub struct PostStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl PostStore {
    /// Creates a handle; the file is not touched until an operation runs.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole collection in file order.
    pub async fn load(&self) -> Result<Vec<Post>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "data file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read { path: self.path.clone(), source });
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let posts: Vec<Post> = serde_json::from_slice(&bytes).map_err(|source| {
            StoreError::Corrupt { path: self.path.clone(), source }
        })?;
        debug!(path = %self.path.display(), count = posts.len(), "loaded posts");
        Ok(posts)
    }

    /// Replaces the file with `posts`.
    pub async fn save(&self, posts: &[Post]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write(posts).await
    }

    /// Appends a post with id `max + 1` (`1` for an empty blog).
    pub async fn add(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;
        let post = Post::from_draft(next_id(&posts), draft);
        posts.push(post.clone());
        self.write(&posts).await?;
        Ok(post)
    }

    /// The first post with `id`, if any.
    pub async fn fetch(&self, id: u64) -> Result<Option<Post>, StoreError> {
        Ok(self.load().await?.into_iter().find(|post| post.id == id))
    }

    /// Removes the post with `id`. Returns `false`, without writing, when no
    /// such post exists.
    pub async fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;
        let before = posts.len();
        posts.retain(|post| post.id != id);
        if posts.len() == before {
            return Ok(false);
        }
        self.write(&posts).await?;
        Ok(true)
    }

    /// Overwrites the text of the post with `id` in place. Returns `None`,
    /// without writing, when no such post exists.
    pub async fn update(&self, id: u64, draft: PostDraft) -> Result<Option<Post>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;
        let Some(post) = posts.iter_mut().find(|post| post.id == id) else {
            return Ok(None);
        };
        post.apply(draft);
        let updated = post.clone();
        self.write(&posts).await?;
        Ok(Some(updated))
    }

    /// Whole-file replace. Callers hold `write_lock`.
    async fn write(&self, posts: &[Post]) -> Result<(), StoreError> {
        let bytes = encode(posts)?;
        let tmp = tmp_path(&self.path);
        let write_err = |source| StoreError::Write { path: self.path.clone(), source };

        tokio::fs::write(&tmp, &bytes).await.map_err(write_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(write_err)?;
        debug!(path = %self.path.display(), count = posts.len(), "saved posts");
        Ok(())
    }
}

fn next_id(posts: &[Post]) -> u64 {
    posts.iter().map(|post| post.id).max().map_or(1, |max| max + 1)
}

/// JSON array, four-space indent.
fn encode(posts: &[Post]) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    posts.serialize(&mut ser).map_err(StoreError::Encode)?;
    Ok(buf)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
