use crate::model::id::EquipmentId;

pub struct CreateEquipment {
    pub equipment_id: EquipmentId,
    pub equipment_name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub total_quantity: i32,
    pub is_active: bool,
}
