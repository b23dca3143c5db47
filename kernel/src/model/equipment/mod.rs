use crate::model::id::EquipmentId;

pub mod event;

#[derive(Debug)]
pub struct Equipment {
    pub equipment_id: EquipmentId,
    pub equipment_name: String,
    pub description: String,
    pub image_url: Option<String>,
    // 期間が重なる予約で共有される総数量
    pub total_quantity: i32,
    pub is_active: bool,
}
