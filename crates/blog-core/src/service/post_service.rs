//! Post service - list, add, fetch, update, delete and like.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Post, PostCollection, PostId};
use crate::error::DomainError;
use crate::ports::{PostStore, StoreStats};

use super::validator::{FormValidator, PostForm};

/// Post operations over an injected [`PostStore`].
///
/// Every mutation is a read-modify-write of the whole collection. The
/// load-mutate-save cycle runs under one async mutex, so concurrent writers
/// cannot lose each other's updates.
pub struct PostService {
    store: Arc<dyn PostStore>,
    validator: FormValidator,
    write_lock: Mutex<()>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self {
            store,
            validator: FormValidator::default(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_validator(mut self, validator: FormValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Return the full collection.
    pub async fn list(&self) -> PostCollection {
        self.store.load().await
    }

    /// Validate the submission and insert it under a fresh id with no likes.
    pub async fn add(&self, form: &PostForm) -> Result<(PostId, Post), DomainError> {
        let fields = self.validator.validate(form)?;

        let _guard = self.write_lock.lock().await;
        let mut posts = self.store.load().await;

        let id = PostId::generate();
        let post = Post::new(fields.author, fields.title, fields.content);
        posts.insert(id.clone(), post.clone());
        self.persist(&posts).await?;

        tracing::info!(post_id = %id, "Post created");
        Ok((id, post))
    }

    /// Look up a single post.
    pub async fn fetch(&self, id: &PostId) -> Option<Post> {
        self.store.load().await.get(id).cloned()
    }

    /// Replace author, title and content of an existing post; likes are kept.
    ///
    /// An unknown id is reported before the submission is validated.
    pub async fn update(&self, id: &PostId, form: &PostForm) -> Result<Post, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.store.load().await;

        let post = posts
            .get_mut(id)
            .ok_or_else(|| DomainError::post_not_found(id))?;
        let fields = self.validator.validate(form)?;

        post.author = fields.author;
        post.title = fields.title;
        post.content = fields.content;
        let updated = post.clone();
        self.persist(&posts).await?;

        tracing::info!(post_id = %id, "Post updated");
        Ok(updated)
    }

    /// Remove a post. Returns whether anything was removed; an unknown id is
    /// not an error and writes nothing.
    pub async fn delete(&self, id: &PostId) -> Result<bool, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.store.load().await;

        if posts.remove(id).is_none() {
            tracing::debug!(post_id = %id, "Delete of unknown post ignored");
            return Ok(false);
        }
        self.persist(&posts).await?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(true)
    }

    /// Add one like to a post.
    pub async fn like(&self, id: &PostId) -> Result<Post, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.store.load().await;

        let post = posts
            .get_mut(id)
            .ok_or_else(|| DomainError::post_not_found(id))?;
        post.likes = post.likes.saturating_add(1);
        let liked = post.clone();
        self.persist(&posts).await?;

        tracing::debug!(post_id = %id, likes = liked.likes, "Post liked");
        Ok(liked)
    }

    pub fn store_stats(&self) -> StoreStats {
        self.store.stats()
    }

    async fn persist(&self, posts: &PostCollection) -> Result<(), DomainError> {
        self.store.save(posts).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to persist posts");
            DomainError::from(e)
        })
    }
}
