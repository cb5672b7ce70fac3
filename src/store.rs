//! The backend post collection.
//!
//! All operations are linear scans over a `Vec`. Each one returns a
//! [`Reported`] outcome; none of them touches a flash log directly.

use std::str::FromStr;

use tracing::debug;

use crate::error::ApiError;
use crate::flash::{FlashMessage, Reported};
use crate::post::{self, Post, PostFields, PostId};

/// Field a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Content,
}

impl SortField {
    fn key(self, post: &Post) -> String {
        match self {
            Self::Title => post.title.to_lowercase(),
            Self::Content => post.content.to_lowercase(),
        }
    }
}

impl FromStr for SortField {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            other => Err(ApiError::InvalidSortField(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ApiError::InvalidDirection(other.to_owned())),
        }
    }
}

/// In-memory, insertion-ordered post collection.
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the two sample posts.
    pub fn seeded() -> Self {
        Self { posts: post::samples() }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// A copy of the collection, optionally sorted case-insensitively.
    ///
    /// Empty `sort` / `direction` values count as absent. The sort is stable
    /// in both directions: equal keys keep their storage order.
    pub fn list(
        &self,
        sort: Option<&str>,
        direction: Option<&str>,
    ) -> Reported<Result<Vec<Post>, ApiError>> {
        match parse_sort(sort, direction) {
            Ok(order) => Reported::quiet(Ok(self.sorted(order))),
            Err(e) => {
                debug!(error = %e, "rejected listing");
                let flash = FlashMessage::error(e.to_string());
                Reported::with(Err(e), flash)
            }
        }
    }

    /// Appends a new post with the next free id.
    pub fn create(&mut self, fields: Option<PostFields>) -> Reported<Result<Post, ApiError>> {
        match post::draft(&self.posts, fields) {
            Ok(post) => {
                debug!(id = post.id, "post created");
                self.posts.push(post.clone());
                let flash = FlashMessage::success(format!(
                    "Post '{}' created with id {}.",
                    post.title, post.id
                ));
                Reported::with(Ok(post), flash)
            }
            Err(e) => Reported::quiet(Err(e)),
        }
    }

    /// Replaces the fields present in `fields`; `Some(default)` changes nothing.
    pub fn update(
        &mut self,
        id: PostId,
        fields: Option<PostFields>,
    ) -> Reported<Result<Post, ApiError>> {
        let Some(fields) = fields else {
            return Reported::quiet(Err(ApiError::MissingBody));
        };
        let Some(post) = self.posts.iter_mut().find(|p| p.id == id) else {
            return not_found(id);
        };
        if let Err(e) = fields.reject_empty() {
            return Reported::quiet(Err(e));
        }
        if let Some(title) = fields.title {
            post.title = title;
        }
        if let Some(content) = fields.content {
            post.content = content;
        }
        debug!(id, "post updated");
        let flash = FlashMessage::success(format!("Post with id {id} has been updated successfully."));
        Reported::with(Ok(post.clone()), flash)
    }

    /// Removes the post. The message in the success flash is also what the
    /// HTTP layer answers with.
    pub fn delete(&mut self, id: PostId) -> Reported<Result<String, ApiError>> {
        let Some(index) = self.posts.iter().position(|p| p.id == id) else {
            return not_found(id);
        };
        self.posts.remove(index);
        debug!(id, "post deleted");
        let message = deleted_message(id);
        let flash = FlashMessage::success(message.clone());
        Reported::with(Ok(message), flash)
    }

    /// Posts whose title contains `title` or whose content contains
    /// `content`, ignoring case. Empty queries match nothing.
    pub fn search(&self, title: Option<&str>, content: Option<&str>) -> Reported<Vec<Post>> {
        let title = title.filter(|q| !q.is_empty()).map(str::to_lowercase);
        let content = content.filter(|q| !q.is_empty()).map(str::to_lowercase);

        let matches: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| {
                title.as_deref().is_some_and(|q| p.title.to_lowercase().contains(q))
                    || content.as_deref().is_some_and(|q| p.content.to_lowercase().contains(q))
            })
            .cloned()
            .collect();

        debug!(matches = matches.len(), "search finished");
        let flash = FlashMessage::info(format!("Found {} matching post(s).", matches.len()));
        Reported::with(matches, flash)
    }

    fn sorted(&self, order: Option<(SortField, Direction)>) -> Vec<Post> {
        let Some((field, direction)) = order else {
            return self.posts.clone();
        };
        let mut keyed: Vec<(String, Post)> =
            self.posts.iter().map(|p| (field.key(p), p.clone())).collect();
        keyed.sort_by(|(a, _), (b, _)| match direction {
            Direction::Asc => a.cmp(b),
            Direction::Desc => b.cmp(a),
        });
        keyed.into_iter().map(|(_, p)| p).collect()
    }
}

fn parse_sort(
    sort: Option<&str>,
    direction: Option<&str>,
) -> Result<Option<(SortField, Direction)>, ApiError> {
    let field = sort.filter(|s| !s.is_empty()).map(str::parse::<SortField>).transpose()?;
    let direction = direction
        .filter(|d| !d.is_empty())
        .map(str::parse::<Direction>)
        .transpose()?
        .unwrap_or_default();
    Ok(field.map(|f| (f, direction)))
}

fn not_found<T>(id: PostId) -> Reported<Result<T, ApiError>> {
    debug!(id, "post not found");
    let err = ApiError::NotFound(id);
    let flash = FlashMessage::error(err.to_string());
    Reported::with(Err(err), flash)
}

fn deleted_message(id: PostId) -> String {
    format!("Post with id {id} has been deleted successfully.")
}
