/// Group service - communities a post can belong to
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::group_repo;
use crate::error::{AppError, Result};
use crate::models::Group;

pub struct GroupService {
    pool: PgPool,
}

impl GroupService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a group. The slug defaults to a slugified title and is not
    /// required to be unique.
    pub async fn create_group(
        &self,
        title: &str,
        slug: Option<&str>,
        description: Option<&str>,
    ) -> Result<Group> {
        if title.trim().is_empty() {
            return Err(AppError::validation("title", "Title is empty"));
        }

        let slug = match slug {
            Some(s) if !s.trim().is_empty() => s.to_string(),
            _ => slugify(title),
        };

        let group = group_repo::create_group(&self.pool, title, &slug, description).await?;
        Ok(group)
    }

    pub async fn get_group(&self, group_id: Uuid) -> Result<Group> {
        group_repo::find_group_by_id(&self.pool, group_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))
    }

    pub async fn list_groups(&self, limit: i64, offset: i64) -> Result<Vec<Group>> {
        Ok(group_repo::list_groups(&self.pool, limit, offset).await?)
    }
}

/// Lowercase the title, keep alphanumerics, collapse everything else into
/// single hyphens.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Rust Enthusiasts"), "rust-enthusiasts");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  a  --  b  "), "a-b");
    }

    #[test]
    fn test_slugify_strips_trailing() {
        assert_eq!(slugify("hello!!!"), "hello");
    }

    #[test]
    fn test_slugify_keeps_digits() {
        assert_eq!(slugify("Top 10 Posts"), "top-10-posts");
    }
}
