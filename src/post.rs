//! The post entity and the JSON fields clients send to create or edit one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

pub type PostId = u64;

/// A blog post. `title` and `content` are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
}

impl Post {
    pub fn new(id: PostId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id, title: title.into(), content: content.into() }
    }
}

/// The two posts every fresh backend starts with.
pub fn samples() -> Vec<Post> {
    vec![
        Post::new(1, "First post", "This is the first post."),
        Post::new(2, "Second post", "This is the second post."),
    ]
}

/// `title` / `content` as sent in a request body. Absent and `null` both
/// deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostFields {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostFields {
    pub fn new(title: Option<&str>, content: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_owned),
            content: content.map(str::to_owned),
        }
    }

    /// Parses a create body. Returns `Ok(None)` when there is no body: an
    /// empty payload, `null`, or an empty object.
    pub fn for_create(body: &[u8]) -> Result<Option<Self>, ApiError> {
        match parse_object(body)? {
            Some(Value::Object(map)) if map.is_empty() => Ok(None),
            Some(value) => from_value(value).map(Some),
            None => Ok(None),
        }
    }

    /// Parses an update body. Returns `Ok(None)` only for an empty payload
    /// or `null`; `{}` is a valid "change nothing" edit.
    pub fn for_update(body: &[u8]) -> Result<Option<Self>, ApiError> {
        parse_object(body)?.map(from_value).transpose()
    }

    /// Both fields, or `MissingFields` naming every one that is absent or
    /// empty, in `title`, `content` order.
    pub fn require_all(self) -> Result<(String, String), ApiError> {
        let title = self.title.filter(|t| !t.is_empty());
        let content = self.content.filter(|c| !c.is_empty());
        match (title, content) {
            (Some(title), Some(content)) => Ok((title, content)),
            (title, content) => {
                let mut missing = Vec::with_capacity(2);
                if title.is_none() {
                    missing.push("title");
                }
                if content.is_none() {
                    missing.push("content");
                }
                Err(ApiError::MissingFields(missing))
            }
        }
    }

    /// Fields that are present must not be empty.
    pub fn reject_empty(&self) -> Result<(), ApiError> {
        let empty: Vec<&'static str> = [("title", &self.title), ("content", &self.content)]
            .into_iter()
            .filter(|(_, value)| value.as_deref() == Some(""))
            .map(|(name, _)| name)
            .collect();
        if empty.is_empty() { Ok(()) } else { Err(ApiError::EmptyFields(empty)) }
    }
}

/// Builds the post a create request asks for, assigning the next id after
/// the ones in `existing`. Does not insert it.
pub(crate) fn draft(existing: &[Post], fields: Option<PostFields>) -> Result<Post, ApiError> {
    let (title, content) = fields.ok_or(ApiError::MissingBody)?.require_all()?;
    Ok(Post { id: next_id(existing), title, content })
}

/// Largest existing id plus one, or 1 for an empty collection.
pub(crate) fn next_id(posts: &[Post]) -> PostId {
    posts.iter().map(|p| p.id).max().unwrap_or(0) + 1
}

/// Parses the payload into a JSON object. `Ok(None)` for an empty payload
/// or `null`; anything that is not an object is malformed.
fn parse_object(body: &[u8]) -> Result<Option<Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) => Ok(None),
        Ok(value @ Value::Object(_)) => Ok(Some(value)),
        Ok(_) => Err(ApiError::MalformedBody("expected a JSON object".to_owned())),
        Err(e) => Err(ApiError::MalformedBody(e.to_string())),
    }
}

fn from_value(value: Value) -> Result<PostFields, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::MalformedBody(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_follows_the_maximum() {
        assert_eq!(next_id(&[]), 1);
        let posts = vec![Post::new(5, "a", "b"), Post::new(2, "c", "d")];
        assert_eq!(next_id(&posts), 6);
    }

    #[test]
    fn create_treats_null_and_empty_object_as_no_body() {
        assert_eq!(PostFields::for_create(b""), Ok(None));
        assert_eq!(PostFields::for_create(b"  null "), Ok(None));
        assert_eq!(PostFields::for_create(b"{}"), Ok(None));
    }

    #[test]
    fn update_accepts_empty_object() {
        assert_eq!(PostFields::for_update(b"{}"), Ok(Some(PostFields::default())));
        assert_eq!(PostFields::for_update(b""), Ok(None));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let fields = PostFields::for_create(br#"{"title":"t","tags":["x"]}"#).unwrap();
        assert_eq!(fields, Some(PostFields::new(Some("t"), None)));
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        assert!(matches!(PostFields::for_create(b"{oops"), Err(ApiError::MalformedBody(_))));
        assert!(matches!(PostFields::for_update(b"[1, 2]"), Err(ApiError::MalformedBody(_))));
        assert!(matches!(
            PostFields::for_create(br#"{"title": 5}"#),
            Err(ApiError::MalformedBody(_))
        ));
    }

    #[test]
    fn require_all_reports_both_missing_fields() {
        let err = PostFields::new(Some(""), None).require_all().unwrap_err();
        assert_eq!(err, ApiError::MissingFields(vec!["title", "content"]));

        let err = PostFields::new(Some("t"), Some("")).require_all().unwrap_err();
        assert_eq!(err, ApiError::MissingFields(vec!["content"]));
    }

    #[test]
    fn reject_empty_ignores_absent_fields() {
        assert!(PostFields::new(None, None).reject_empty().is_ok());
        assert_eq!(
            PostFields::new(Some(""), Some("body")).reject_empty(),
            Err(ApiError::EmptyFields(vec!["title"]))
        );
    }

    #[test]
    fn draft_without_body_is_missing_body() {
        assert_eq!(draft(&samples(), None), Err(ApiError::MissingBody));
        let post = draft(&samples(), Some(PostFields::new(Some("t"), Some("c")))).unwrap();
        assert_eq!(post, Post::new(3, "t", "c"));
    }
}
