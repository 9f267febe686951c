use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::athlete::{AthleteLookup, CreateAthleteRequest, UpdateAthleteRequest};
use crate::error::{Result, StorageError};
use crate::models::{Athlete, Category, TrainingCenter};

/// Columns of `Athlete`, selected from an `a` relation joined as `c` and `t`
const ATHLETE_COLUMNS: &str = r#"
    a.athlete_id, a.id, a.created_at, a.name, a.national_id, a.age,
    a.weight, a.height, a.sex,
    c.name AS category_name,
    t.name AS training_center_name
"#;

const ATHLETE_JOINS: &str = r#"
    JOIN categories c ON c.category_id = a.category_id
    JOIN training_centers t ON t.training_center_id = a.training_center_id
"#;

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List athletes matching `lookup`, returning one page and the total match count
    pub async fn list(
        &self,
        lookup: &AthleteLookup,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<Athlete>, i64)> {
        let total = self.count(lookup).await?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query.push(ATHLETE_COLUMNS);
        query.push(" FROM athletes a ");
        query.push(ATHLETE_JOINS);
        query.push(" WHERE 1=1");
        push_lookup(&mut query, lookup);
        query.push(" ORDER BY a.athlete_id LIMIT ");
        query.push_bind(i64::from(limit));
        query.push(" OFFSET ");
        query.push_bind(i64::from(offset));

        let athletes = query
            .build_query_as::<Athlete>()
            .fetch_all(self.pool)
            .await?;

        Ok((athletes, total))
    }

    async fn count(&self, lookup: &AthleteLookup) -> Result<i64> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM athletes a WHERE 1=1");
        push_lookup(&mut query, lookup);

        let total = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        Ok(total)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Athlete> {
        let sql = format!("SELECT {ATHLETE_COLUMNS} FROM athletes a {ATHLETE_JOINS} WHERE a.id = $1");

        sqlx::query_as::<_, Athlete>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Insert an athlete linked to already resolved category and training center rows
    pub async fn create(
        &self,
        req: &CreateAthleteRequest,
        category: &Category,
        training_center: &TrainingCenter,
    ) -> Result<Athlete> {
        let sql = format!(
            r#"
            WITH a AS (
                INSERT INTO athletes (
                    id, created_at, name, national_id, age, weight, height, sex,
                    category_id, training_center_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
            )
            SELECT {ATHLETE_COLUMNS} FROM a {ATHLETE_JOINS}
            "#
        );

        let athlete = sqlx::query_as::<_, Athlete>(&sql)
            .bind(Uuid::new_v4())
            .bind(chrono::Utc::now().naive_utc())
            .bind(&req.name)
            .bind(&req.national_id)
            .bind(req.age)
            .bind(req.weight)
            .bind(req.height)
            .bind(&req.sex)
            .bind(category.category_id)
            .bind(training_center.training_center_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                let err = StorageError::from(e);
                if err.is_foreign_key_violation() {
                    return StorageError::InvalidReference(
                        "Category or training center no longer exists".to_string(),
                    );
                }
                err.on_unique_violation(|| {
                    format!(
                        "An athlete with national ID '{}' already exists",
                        req.national_id
                    )
                })
            })?;

        Ok(athlete)
    }

    /// Set the fields present in `req`; columns for absent fields are not written
    pub async fn update(&self, id: Uuid, req: &UpdateAthleteRequest) -> Result<Athlete> {
        let sql = format!(
            r#"
            WITH a AS (
                UPDATE athletes
                SET name = COALESCE($2, name),
                    age = COALESCE($3, age),
                    weight = COALESCE($4, weight),
                    height = COALESCE($5, height)
                WHERE id = $1
                RETURNING *
            )
            SELECT {ATHLETE_COLUMNS} FROM a {ATHLETE_JOINS}
            "#
        );

        sqlx::query_as::<_, Athlete>(&sql)
            .bind(id)
            .bind(req.name.as_deref())
            .bind(req.age)
            .bind(req.weight)
            .bind(req.height)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM athletes WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

fn push_lookup(query: &mut QueryBuilder<'_, Postgres>, lookup: &AthleteLookup) {
    match lookup {
        AthleteLookup::All => {}
        AthleteLookup::Name(name) => {
            query.push(" AND a.name = ");
            query.push_bind(name.clone());
        }
        AthleteLookup::NationalId(national_id) => {
            query.push(" AND a.national_id = ");
            query.push_bind(national_id.clone());
        }
    }
}

fn not_found(id: Uuid) -> StorageError {
    StorageError::NotFound(format!("Athlete with id '{id}' not found"))
}
