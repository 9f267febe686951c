use sqlx::PgPool;
use storage::{
    dto::category::CreateCategoryRequest, error::Result, models::Category,
    repository::category::CategoryRepository,
};
use uuid::Uuid;

/// List all categories
pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>> {
    let repo = CategoryRepository::new(pool);
    repo.list().await
}

/// Get category by id
pub async fn get_category(pool: &PgPool, id: Uuid) -> Result<Category> {
    let repo = CategoryRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new category
pub async fn create_category(pool: &PgPool, request: &CreateCategoryRequest) -> Result<Category> {
    let repo = CategoryRepository::new(pool);
    let category = repo.create(request).await.inspect_err(|e| {
        tracing::warn!(name = %request.name, "Category not created: {}", e);
    })?;

    tracing::info!(id = %category.id, name = %category.name, "Category created");
    Ok(category)
}
