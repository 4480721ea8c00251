//! JSON file post store.
//!
//! The whole collection is one JSON object mapping post ids to
//! `{author, title, content, likes}` records, pretty-printed with a
//! four-space indent. Older documents stored an array of single-key wrapper
//! objects; those are still readable and get rewritten as a map on the next
//! save. A record that is not a well-formed post is skipped on load without
//! discarding its neighbours.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use blog_core::StoreError;
use blog_core::domain::{Post, PostCollection, PostId};
use blog_core::ports::{PostStore, StoreStats};

use super::stats::StatsRecorder;

/// Post store backed by a single JSON document.
///
/// The file (and its parent directory) is created on the first successful
/// save. Writes go to a sibling `.tmp` file which is fsynced and renamed over
/// the document, so an interrupted write leaves the previous version intact.
pub struct JsonFilePostStore {
    path: PathBuf,
    stats: StatsRecorder,
}

impl JsonFilePostStore {
    pub const DEFAULT_PATH: &'static str = "data/posts.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            stats: StatsRecorder::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Read and decode the document. `Ok(None)` means no document exists yet.
    async fn read_document(&self) -> Result<Option<DecodedDocument>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(self.path.display(), e)),
        };
        decode_document(&bytes).map(Some)
    }

    async fn write_document(&self, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| io_error(parent.display(), e))?;
            }
        }

        let temp_path = self.temp_path();
        let result = async {
            let temp_error = |e| io_error(temp_path.display(), e);
            let mut file = fs::File::create(&temp_path).await.map_err(temp_error)?;
            file.write_all(bytes).await.map_err(temp_error)?;
            file.sync_all().await.map_err(temp_error)?;
            fs::rename(&temp_path, &self.path).await.map_err(|e| {
                io_error(
                    format_args!("{} -> {}", temp_path.display(), self.path.display()),
                    e,
                )
            })
        }
        .await;

        if result.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        result
    }
}

fn io_error(path: impl fmt::Display, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_string(),
        source,
    }
}

impl Default for JsonFilePostStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

#[async_trait]
impl PostStore for JsonFilePostStore {
    async fn load(&self) -> PostCollection {
        self.stats.load();

        match self.read_document().await {
            Ok(Some(document)) => {
                if document.skipped > 0 {
                    self.stats.load_failures(document.skipped);
                }
                tracing::debug!(
                    path = %self.path.display(),
                    count = document.posts.len(),
                    skipped = document.skipped,
                    "Loaded posts"
                );
                document.posts
            }
            Ok(None) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Posts file not found, starting with an empty collection"
                );
                PostCollection::new()
            }
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Error loading posts, falling back to an empty collection"
                );
                self.stats.load_failures(1);
                PostCollection::new()
            }
        }
    }

    async fn save(&self, posts: &PostCollection) -> Result<(), StoreError> {
        if let Err(e) = posts.validate() {
            tracing::error!(error = %e, "Refusing to write malformed posts");
            self.stats.rejected_write();
            return Err(e);
        }

        let written = match encode_document(posts) {
            Ok(bytes) => self.write_document(&bytes).await,
            Err(e) => Err(e),
        };

        match written {
            Ok(()) => {
                tracing::debug!(
                    path = %self.path.display(),
                    count = posts.len(),
                    "Saved posts"
                );
                self.stats.save();
                Ok(())
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Error saving posts");
                self.stats.write_failure();
                Err(e)
            }
        }
    }

    fn stats(&self) -> StoreStats {
        self.stats.snapshot()
    }
}

/// Encode a collection in the canonical document shape.
pub fn encode_document(posts: &PostCollection) -> Result<Vec<u8>, StoreError> {
    let mut bytes = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    posts.serialize(&mut serializer)?;
    Ok(bytes)
}

/// A decoded posts document.
#[derive(Debug, Default)]
pub struct DecodedDocument {
    pub posts: PostCollection,
    /// Records that were dropped because they are not well-formed posts.
    pub skipped: u64,
}

/// Decode a document in either the canonical map shape or the legacy
/// array-of-wrappers shape.
///
/// Records are decoded one by one: a record that is not a well-formed post is
/// logged and skipped, and the remaining posts are kept. Only a document that
/// is not JSON, or not an object or array at the top level, fails as a whole.
pub fn decode_document(bytes: &[u8]) -> Result<DecodedDocument, StoreError> {
    let entries: Vec<(String, Value)> = match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(records) => records.into_iter().collect(),
        Value::Array(wrappers) => {
            tracing::warn!(
                entries = wrappers.len(),
                "Posts file uses the legacy array layout; it will be rewritten as a map on save"
            );
            let mut entries = Vec::new();
            for (index, wrapper) in wrappers.into_iter().enumerate() {
                match wrapper {
                    Value::Object(records) => entries.extend(records),
                    other => entries.push((format!("#{}", index), other)),
                }
            }
            entries
        }
        other => {
            return Err(StoreError::Malformed(format!(
                "expected an object of posts, found {}",
                json_kind(&other)
            )));
        }
    };

    let mut document = DecodedDocument::default();
    for (id, record) in entries {
        match decode_record(record) {
            Ok(post) => {
                document.posts.insert(PostId::from(id), post);
            }
            Err(e) => {
                tracing::error!(post_id = %id, error = %e, "Skipping unreadable post record");
                document.skipped += 1;
            }
        }
    }
    Ok(document)
}

fn decode_record(record: Value) -> Result<Post, StoreError> {
    let post: Post = serde_json::from_value(record)?;
    let blank = post.blank_fields();
    if !blank.is_empty() {
        return Err(StoreError::Malformed(format!("blank {}", blank.join(", "))));
    }
    Ok(post)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
