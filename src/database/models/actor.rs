use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// An actor row. Serializes to `{id, name, gender, age}`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Actor {
    pub id: i32,
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<i32>,
}

/// Client-supplied actor fields for create and partial update. `age` is
/// accepted as a JSON number or a numeric string; existing clients send both.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorDraft {
    pub name: Option<String>,
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "int_or_string")]
    pub age: Option<i32>,
}

impl Actor {
    /// Overwrite only the fields the draft actually carries.
    pub fn apply(&mut self, draft: ActorDraft) {
        if let Some(name) = draft.name {
            self.name = name;
        }
        if let Some(gender) = draft.gender {
            self.gender = Some(gender);
        }
        if let Some(age) = draft.age {
            self.age = Some(age);
        }
    }
}

fn int_or_string<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("age out of range: {}", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("age is not a number: '{}'", s))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "age must be a number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn age_accepts_number_and_numeric_string() {
        let from_number: ActorDraft = serde_json::from_value(json!({ "age": 30 })).unwrap();
        assert_eq!(from_number.age, Some(30));

        let from_string: ActorDraft = serde_json::from_value(json!({ "age": "30" })).unwrap();
        assert_eq!(from_string.age, Some(30));
    }

    #[test]
    fn non_numeric_age_is_rejected() {
        assert!(serde_json::from_value::<ActorDraft>(json!({ "age": "old" })).is_err());
        assert!(serde_json::from_value::<ActorDraft>(json!({ "age": true })).is_err());
    }

    #[test]
    fn apply_preserves_untouched_fields() {
        let mut actor = Actor {
            id: 1,
            name: "John Doe".into(),
            gender: Some("male".into()),
            age: Some(30),
        };
        actor.apply(ActorDraft {
            name: None,
            gender: None,
            age: Some(31),
        });
        assert_eq!(actor.name, "John Doe");
        assert_eq!(actor.gender.as_deref(), Some("male"));
        assert_eq!(actor.age, Some(31));
    }
}
