use crate::database::{model::equipment::EquipmentRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    equipment::{event::CreateEquipment, Equipment},
    id::EquipmentId,
};
use kernel::repository::equipment::EquipmentRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct EquipmentRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EquipmentRepository for EquipmentRepositoryImpl {
    async fn create(&self, event: CreateEquipment) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO equipment
            (equipment_id, equipment_name, description, image_url, total_quantity, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&event.equipment_id)
        .bind(&event.equipment_name)
        .bind(&event.description)
        .bind(&event.image_url)
        .bind(event.total_quantity)
        .bind(event.is_active)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::EntityAlreadyExists(format!(
                    "機材（{}）はすでに登録されています。",
                    event.equipment_id
                ))
            }
            e => AppError::SpecificOperationError(e),
        })?;

        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Equipment>> {
        let rows: Vec<EquipmentRow> = sqlx::query_as(
            r#"
            SELECT
                equipment_id,
                equipment_name,
                description,
                image_url,
                total_quantity,
                is_active
            FROM equipment
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Equipment::from).collect())
    }

    async fn find_by_id(&self, equipment_id: EquipmentId) -> AppResult<Option<Equipment>> {
        let row: Option<EquipmentRow> = sqlx::query_as(
            r#"
            SELECT
                equipment_id,
                equipment_name,
                description,
                image_url,
                total_quantity,
                is_active
            FROM equipment
            WHERE equipment_id = $1
            "#,
        )
        .bind(&equipment_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Equipment::from))
    }
}
