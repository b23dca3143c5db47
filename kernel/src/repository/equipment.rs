use crate::model::{
    equipment::{event::CreateEquipment, Equipment},
    id::EquipmentId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    // 機材を登録する
    async fn create(&self, event: CreateEquipment) -> AppResult<()>;
    // すべての機材を取得する
    async fn find_all(&self) -> AppResult<Vec<Equipment>>;
    // 機材 ID から Equipment 型のデータを渡す
    async fn find_by_id(&self, equipment_id: EquipmentId) -> AppResult<Option<Equipment>>;
}
