use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{Course, User};

/// Course record as the record-keeping service sends it.
///
/// Identifier fields are kept apart so the catalog loader can pick between them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCourse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teacher_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teacher_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default = "default_language", deserialize_with = "language_or_default")]
    pub language: String,
    #[serde(default = "default_is_group", deserialize_with = "is_group_or_default")]
    pub is_group: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, rename = "studentsCount", alias = "enrolledCount", deserialize_with = "null_as_default")]
    pub enrolled_count: u32,
    #[serde(default)]
    pub next_session: Option<String>,
    #[serde(default)]
    pub zoom_link: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_language() -> String {
    "en".to_string()
}

fn default_is_group() -> bool {
    true
}

fn language_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(default_language))
}

fn is_group_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_is_group))
}

impl RemoteCourse {
    pub fn canonical_id(&self) -> Option<&str> {
        non_empty(self.id.as_deref())
    }

    pub fn legacy_id(&self) -> Option<&str> {
        non_empty(self.legacy_id.as_deref())
    }

    pub fn into_course(self, id: String) -> Course {
        Course {
            id,
            title: self.title,
            description: self.description,
            teacher_id: self.teacher_id,
            teacher_name: self.teacher_name,
            thumbnail: self.thumbnail,
            category: self.category,
            language: self.language,
            is_group: self.is_group,
            price: self.price,
            rating: self.rating,
            enrolled_count: self.enrolled_count,
            next_session: self.next_session,
            zoom_link: self.zoom_link,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Reply to `POST /courses/{id}/enroll`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    #[serde(alias = "studentsCount")]
    pub enrolled_count: u32,
}

impl EnrollResponse {
    /// Identifiers the reply refers to, canonical first.
    pub fn identifiers(&self) -> Vec<&str> {
        [non_empty(self.id.as_deref()), non_empty(self.legacy_id.as_deref())]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
