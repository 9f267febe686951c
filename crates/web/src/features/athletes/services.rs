use sqlx::PgPool;
use storage::{
    dto::{
        athlete::{AthleteFilter, CreateAthleteRequest, UpdateAthleteRequest},
        common::LimitOffsetParams,
    },
    error::{Result, StorageError},
    models::Athlete,
    repository::{
        athlete::AthleteRepository, category::CategoryRepository,
        training_center::TrainingCenterRepository,
    },
};
use uuid::Uuid;

/// List one page of athletes matching the filter, with the total match count
pub async fn list_athletes(
    pool: &PgPool,
    filter: &AthleteFilter,
    page: LimitOffsetParams,
) -> Result<(Vec<Athlete>, i64)> {
    let repo = AthleteRepository::new(pool);
    repo.list(&filter.lookup(), page.limit, page.offset).await
}

/// Get athlete by id
pub async fn get_athlete(pool: &PgPool, id: Uuid) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new athlete.
///
/// The category and training center are resolved by exact name; both must exist.
pub async fn create_athlete(pool: &PgPool, request: &CreateAthleteRequest) -> Result<Athlete> {
    let category = CategoryRepository::new(pool)
        .find_by_name(&request.category.name)
        .await?
        .ok_or_else(|| {
            tracing::warn!(category = %request.category.name, "Unknown category");
            StorageError::InvalidReference(format!(
                "Category '{}' not found",
                request.category.name
            ))
        })?;

    let training_center = TrainingCenterRepository::new(pool)
        .find_by_name(&request.training_center.name)
        .await?
        .ok_or_else(|| {
            tracing::warn!(training_center = %request.training_center.name, "Unknown training center");
            StorageError::InvalidReference(format!(
                "Training center '{}' not found",
                request.training_center.name
            ))
        })?;

    let repo = AthleteRepository::new(pool);
    let athlete = repo
        .create(request, &category, &training_center)
        .await
        .inspect_err(|e| tracing::warn!("Athlete not created: {}", e))?;

    tracing::info!(id = %athlete.id, "Athlete created");
    Ok(athlete)
}

/// Update the provided fields of an athlete
pub async fn update_athlete(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);
    repo.update(id, request).await
}

/// Delete an athlete
pub async fn delete_athlete(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = AthleteRepository::new(pool);
    repo.delete(id).await?;

    tracing::info!(%id, "Athlete deleted");
    Ok(())
}
