use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A movie row. Serializes to exactly the field set clients expect:
/// `{id, title, release_date}`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub release_date: Option<String>,
}

/// Client-supplied movie fields, used for both create and partial update.
/// Absent fields stay `None` and are left untouched on PATCH.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieDraft {
    pub title: Option<String>,
    pub release_date: Option<String>,
}

impl Movie {
    /// Overwrite only the fields the draft actually carries.
    pub fn apply(&mut self, draft: MovieDraft) {
        if let Some(title) = draft.title {
            self.title = title;
        }
        if let Some(release_date) = draft.release_date {
            self.release_date = Some(release_date);
        }
    }
}
