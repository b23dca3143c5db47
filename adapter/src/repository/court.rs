use crate::database::{model::court::CourtRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    court::{event::CreateCourt, Court},
    id::CourtId,
};
use kernel::repository::court::CourtRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct CourtRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl CourtRepository for CourtRepositoryImpl {
    async fn create(&self, event: CreateCourt) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO courts (court_id, court_name, description, image_url, is_active)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&event.court_id)
        .bind(&event.court_name)
        .bind(&event.description)
        .bind(&event.image_url)
        .bind(event.is_active)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| match e {
            // コート ID は外部から与えられるため、重複登録は競合として返す
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::EntityAlreadyExists(format!(
                    "コート（{}）はすでに登録されています。",
                    event.court_id
                ))
            }
            e => AppError::SpecificOperationError(e),
        })?;

        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Court>> {
        let rows: Vec<CourtRow> = sqlx::query_as(
            r#"
            SELECT
                court_id,
                court_name,
                description,
                image_url,
                is_active
            FROM courts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Court::from).collect())
    }

    async fn find_by_id(&self, court_id: CourtId) -> AppResult<Option<Court>> {
        let row: Option<CourtRow> = sqlx::query_as(
            r#"
            SELECT
                court_id,
                court_name,
                description,
                image_url,
                is_active
            FROM courts
            WHERE court_id = $1
            "#,
        )
        .bind(&court_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Court::from))
    }
}
