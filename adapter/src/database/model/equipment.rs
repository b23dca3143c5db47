use kernel::model::{equipment::Equipment, id::EquipmentId};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct EquipmentRow {
    pub equipment_id: EquipmentId,
    pub equipment_name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub total_quantity: i32,
    pub is_active: bool,
}

impl From<EquipmentRow> for Equipment {
    fn from(value: EquipmentRow) -> Self {
        let EquipmentRow {
            equipment_id,
            equipment_name,
            description,
            image_url,
            total_quantity,
            is_active,
        } = value;
        Equipment {
            equipment_id,
            equipment_name,
            description,
            image_url,
            total_quantity,
            is_active,
        }
    }
}
