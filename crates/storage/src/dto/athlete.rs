use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Reference to a category by its unique name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CategoryRef {
    #[serde(rename = "nome")]
    #[schema(example = "Scale")]
    #[validate(length(min = 1, max = 10))]
    pub name: String,
}

/// Reference to a training center by its unique name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TrainingCenterRef {
    #[serde(rename = "nome")]
    #[schema(example = "CT King")]
    #[validate(length(min = 1, max = 20))]
    pub name: String,
}

/// Full athlete representation, returned by create, get and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cpf")]
    pub national_id: String,
    #[serde(rename = "idade")]
    pub age: i32,
    #[serde(rename = "peso")]
    pub weight: f64,
    #[serde(rename = "altura")]
    pub height: f64,
    #[serde(rename = "sexo")]
    pub sex: String,
    #[serde(rename = "categoria")]
    pub category: CategoryRef,
    #[serde(rename = "centros_treinamento")]
    pub training_center: TrainingCenterRef,
}

/// Reduced athlete view used by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AthleteSummary {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: CategoryRef,
    #[serde(rename = "centros_treinamento")]
    pub training_center: TrainingCenterRef,
}

/// Request payload for registering an athlete.
///
/// The category and training center are referenced by name and must already exist.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateAthleteRequest {
    #[serde(rename = "nome")]
    #[schema(example = "Joao")]
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,

    #[serde(rename = "cpf")]
    #[schema(example = "12345678900")]
    #[validate(length(equal = 11, message = "National ID must have exactly 11 characters"))]
    pub national_id: String,

    #[serde(rename = "idade")]
    #[schema(example = 25)]
    pub age: i32,

    #[serde(rename = "peso")]
    #[schema(example = 75.5)]
    #[validate(range(exclusive_min = 0.0, message = "Weight must be positive"))]
    pub weight: f64,

    #[serde(rename = "altura")]
    #[schema(example = 1.70)]
    #[validate(range(exclusive_min = 0.0, message = "Height must be positive"))]
    pub height: f64,

    #[serde(rename = "sexo")]
    #[schema(example = "M")]
    #[validate(length(equal = 1, message = "Sex must be a single character"))]
    pub sex: String,

    #[serde(rename = "categoria")]
    #[validate(nested)]
    pub category: CategoryRef,

    #[serde(rename = "centros_treinamento")]
    #[validate(nested)]
    pub training_center: TrainingCenterRef,
}

/// Partial update of an athlete. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateAthleteRequest {
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,

    #[serde(rename = "idade", default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,

    #[serde(rename = "peso", default, skip_serializing_if = "Option::is_none")]
    #[validate(range(exclusive_min = 0.0))]
    pub weight: Option<f64>,

    #[serde(rename = "altura", default, skip_serializing_if = "Option::is_none")]
    #[validate(range(exclusive_min = 0.0))]
    pub height: Option<f64>,
}

/// Query filters for listing athletes. `nome` wins over `cpf` when both are set.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AthleteFilter {
    /// Exact athlete name
    pub nome: Option<String>,
    /// Exact national ID
    pub cpf: Option<String>,
}

/// The single filter applied to an athlete listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AthleteLookup {
    All,
    Name(String),
    NationalId(String),
}

impl AthleteFilter {
    /// Empty strings count as unset
    pub fn lookup(&self) -> AthleteLookup {
        if let Some(name) = non_empty(&self.nome) {
            AthleteLookup::Name(name.to_string())
        } else if let Some(national_id) = non_empty(&self.cpf) {
            AthleteLookup::NationalId(national_id.to_string())
        } else {
            AthleteLookup::All
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl From<crate::models::Athlete> for AthleteResponse {
    fn from(athlete: crate::models::Athlete) -> Self {
        Self {
            id: athlete.id,
            created_at: athlete.created_at,
            name: athlete.name,
            national_id: athlete.national_id,
            age: athlete.age,
            weight: athlete.weight,
            height: athlete.height,
            sex: athlete.sex,
            category: CategoryRef {
                name: athlete.category_name,
            },
            training_center: TrainingCenterRef {
                name: athlete.training_center_name,
            },
        }
    }
}

impl From<crate::models::Athlete> for AthleteSummary {
    fn from(athlete: crate::models::Athlete) -> Self {
        Self {
            id: athlete.id,
            created_at: athlete.created_at,
            name: athlete.name,
            category: CategoryRef {
                name: athlete.category_name,
            },
            training_center: TrainingCenterRef {
                name: athlete.training_center_name,
            },
        }
    }
}
