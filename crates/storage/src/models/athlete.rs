use sqlx::FromRow;
use uuid::Uuid;

/// An athlete row joined with the names of its category and training center.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Athlete {
    pub athlete_id: i32,
    pub id: Uuid,
    pub created_at: chrono::NaiveDateTime,
    pub name: String,
    pub national_id: String,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub sex: String,
    pub category_name: String,
    pub training_center_name: String,
}
