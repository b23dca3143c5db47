use crate::model::{
    court::{event::CreateCourt, Court},
    id::CourtId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait CourtRepository: Send + Sync {
    // コートを登録する
    async fn create(&self, event: CreateCourt) -> AppResult<()>;
    // すべてのコートを取得する
    async fn find_all(&self) -> AppResult<Vec<Court>>;
    // コート ID から Court 型のデータを渡す
    async fn find_by_id(&self, court_id: CourtId) -> AppResult<Option<Court>>;
}
