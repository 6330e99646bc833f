//! Todo payloads

use serde::Deserialize;
use thiserror::Error;

use crate::db::Todo;

/// A payload that storage would refuse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// PostgreSQL `TEXT` cannot hold `\0`.
    #[error("{field} must not contain NUL characters")]
    NulCharacter { field: &'static str },
}

/// Mutable fields of a todo, as written to storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TodoInput {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl TodoInput {
    /// Check the fields can be stored by every backend.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("title", &self.title), ("description", &self.description)] {
            if value.contains('\0') {
                return Err(ValidationError::NulCharacter { field });
            }
        }
        Ok(())
    }
}

/// Update body; absent fields keep the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Overlay this patch on an existing record, producing the full set of
    /// mutable fields to write back.
    pub fn apply_to(self, current: &Todo) -> TodoInput {
        TodoInput {
            title: self.title.unwrap_or_else(|| current.title.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            completed: self.completed.unwrap_or(current.completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stored() -> Todo {
        let now = Utc::now();
        Todo {
            id: 7,
            title: "buy milk".into(),
            description: "2 litres".into(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn input_defaults_missing_fields() {
        let input: TodoInput = serde_json::from_str(r#"{"title":"buy milk"}"#).unwrap();
        assert_eq!(input.title, "buy milk");
        assert_eq!(input.description, "");
        assert!(!input.completed);
    }

    #[test]
    fn input_ignores_id_and_unknown_fields() {
        let input: TodoInput =
            serde_json::from_str(r#"{"id":99,"title":"x","priority":"high"}"#).unwrap();
        assert_eq!(input, TodoInput { title: "x".into(), ..TodoInput::default() });
    }

    #[test]
    fn nul_in_text_fields_is_invalid() {
        let input: TodoInput = serde_json::from_str(r#"{"title":"a\u0000b"}"#).unwrap();
        assert_eq!(
            input.validate(),
            Err(ValidationError::NulCharacter { field: "title" })
        );

        let input = TodoInput {
            title: "ok".into(),
            description: "tab\tand\0nul".into(),
            completed: false,
        };
        assert_eq!(
            input.validate(),
            Err(ValidationError::NulCharacter { field: "description" })
        );

        assert!(TodoInput { title: "ok".into(), ..TodoInput::default() }.validate().is_ok());
    }

    #[test]
    fn empty_patch_keeps_everything() {
        let patch: TodoPatch = serde_json::from_str("{}").unwrap();
        let merged = patch.apply_to(&stored());
        assert_eq!(merged.title, "buy milk");
        assert_eq!(merged.description, "2 litres");
        assert!(!merged.completed);
    }

    #[test]
    fn patch_overrides_present_fields() {
        let patch: TodoPatch =
            serde_json::from_str(r#"{"completed":true,"description":""}"#).unwrap();
        let merged = patch.apply_to(&stored());
        assert_eq!(merged.title, "buy milk");
        assert_eq!(merged.description, "");
        assert!(merged.completed);
    }
}
