//! Form normalisation for post create/update submissions.

use crate::error::ValidationError;

/// Raw field set submitted for a create or update. Any field may be absent.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub author: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Fields that passed validation: defaulted, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub author: String,
    pub title: String,
    pub content: String,
}

/// Extracts author/title/content from a [`PostForm`].
///
/// Absent author and title fall back to placeholders; content has none.
/// A submission is accepted whole or rejected whole.
#[derive(Debug, Clone)]
pub struct FormValidator {
    default_author: String,
    default_title: String,
}

impl FormValidator {
    pub const DEFAULT_AUTHOR: &'static str = "Anonymous";
    pub const DEFAULT_TITLE: &'static str = "Untitled";

    pub fn new(default_author: impl Into<String>, default_title: impl Into<String>) -> Self {
        Self {
            default_author: default_author.into(),
            default_title: default_title.into(),
        }
    }

    pub fn validate(&self, form: &PostForm) -> Result<PostFields, ValidationError> {
        let author = pick(form.author.as_deref(), &self.default_author);
        let title = pick(form.title.as_deref(), &self.default_title);
        let content = pick(form.content.as_deref(), "");

        let empty_fields: Vec<&'static str> = [
            ("author", author),
            ("title", title),
            ("content", content),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if !empty_fields.is_empty() {
            return Err(ValidationError { empty_fields });
        }

        Ok(PostFields {
            author: author.to_string(),
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_AUTHOR, Self::DEFAULT_TITLE)
    }
}

// Defaults only apply to absent fields; a present-but-blank field stays blank.
fn pick<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    value.unwrap_or(default).trim()
}
