use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request payload for creating a training center
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateTrainingCenterRequest {
    #[serde(rename = "nome")]
    #[schema(example = "CT King")]
    #[validate(length(min = 1, max = 20, message = "Name must be between 1 and 20 characters"))]
    pub name: String,

    #[serde(rename = "endereco")]
    #[schema(example = "Rua X, Q02")]
    #[validate(length(min = 1, max = 60, message = "Address must be between 1 and 60 characters"))]
    pub address: String,

    #[serde(rename = "proprietario")]
    #[schema(example = "Marcos")]
    #[validate(length(min = 1, max = 30, message = "Owner must be between 1 and 30 characters"))]
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrainingCenterResponse {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "proprietario")]
    pub owner: String,
}

impl From<crate::models::TrainingCenter> for TrainingCenterResponse {
    fn from(center: crate::models::TrainingCenter) -> Self {
        Self {
            id: center.id,
            name: center.name,
            address: center.address,
            owner: center.owner,
        }
    }
}
