use serde::{Deserialize, Serialize};

/// A catalog entry with its identifier already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub teacher_id: String,
    pub teacher_name: String,
    pub thumbnail: String,
    pub category: String,
    pub language: String,
    pub is_group: bool,
    pub price: f64,
    pub rating: f64,
    #[serde(rename = "studentsCount", alias = "enrolledCount")]
    pub enrolled_count: u32,
    pub next_session: Option<String>,
    pub zoom_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    pub title: String,
    pub description: String,
    pub teacher_id: String,
    pub teacher_name: String,
    pub thumbnail: String,
    pub category: String,
    pub language: String,
    pub is_group: bool,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_session: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_link: Option<String>,
}

impl NewCourseRequest {
    /// Builds the local record used when the service never acknowledged the course.
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
            rating: 0.0,
            enrolled_count: 0,
            next_session: self.next_session,
            zoom_link: self.zoom_link,
        }
    }
}
