//! The post record and the validation applied to submitted forms.

use serde::{Deserialize, Serialize};

/// A single blog entry as stored in the data file.
///
/// Field order is the serialized key order: `id, author, title, content`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub author: String,
    pub title: String,
    pub content: String,
}

impl Post {
    pub(crate) fn from_draft(id: u64, draft: PostDraft) -> Self {
        Self {
            id,
            author: draft.author,
            title: draft.title,
            content: draft.content,
        }
    }

    /// Overwrites the text fields; id and position are untouched.
    pub(crate) fn apply(&mut self, draft: PostDraft) {
        self.author = draft.author;
        self.title = draft.title;
        self.content = draft.content;
    }
}

/// Author, title and content for a post that has no id yet, or the new text
/// of an existing one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PostDraft {
    pub author: String,
    pub title: String,
    pub content: String,
}

impl PostDraft {
    pub fn new(
        author: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// The add/edit form as submitted. Missing fields decode as empty strings so
/// they are reported as blank rather than as a malformed body.
#[derive(Debug, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl PostForm {
    /// Trims every field and rejects the first one left empty.
    pub fn validate(self) -> Result<PostDraft, ValidationError> {
        let author = required("author", &self.author)?;
        let title = required("title", &self.title)?;
        let content = required("content", &self.content)?;
        Ok(PostDraft::new(author, title, content))
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(trimmed.to_owned())
}

/// A submitted form that cannot become a post.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be blank")]
    Blank { field: &'static str },
}
