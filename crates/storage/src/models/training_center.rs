use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct TrainingCenter {
    pub training_center_id: i32,
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub owner: String,
}
