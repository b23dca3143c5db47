use garde::Validate;
use kernel::model::{
    equipment::{event::CreateEquipment, Equipment},
    id::EquipmentId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentRequest {
    #[garde(length(min = 1))]
    pub equipment_id: String,
    #[garde(length(min = 1))]
    pub equipment_name: String,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(skip)]
    pub image_url: Option<String>,
    // 総数量は 1 以上
    #[garde(range(min = 1))]
    pub total_quantity: i32,
    #[garde(skip)]
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

impl From<CreateEquipmentRequest> for CreateEquipment {
    fn from(value: CreateEquipmentRequest) -> Self {
        let CreateEquipmentRequest {
            equipment_id,
            equipment_name,
            description,
            image_url,
            total_quantity,
            is_active,
        } = value;
        CreateEquipment {
            equipment_id: EquipmentId::new(equipment_id),
            equipment_name,
            description,
            image_url,
            total_quantity,
            is_active,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentListResponse {
    pub items: Vec<EquipmentResponse>,
}

impl From<Vec<Equipment>> for EquipmentListResponse {
    fn from(value: Vec<Equipment>) -> Self {
        Self {
            items: value.into_iter().map(EquipmentResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentResponse {
    pub equipment_id: EquipmentId,
    pub equipment_name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub total_quantity: i32,
    pub is_active: bool,
}

impl From<Equipment> for EquipmentResponse {
    fn from(value: Equipment) -> Self {
        let Equipment {
            equipment_id,
            equipment_name,
            description,
            image_url,
            total_quantity,
            is_active,
        } = value;
        Self {
            equipment_id,
            equipment_name,
            description,
            image_url,
            total_quantity,
            is_active,
        }
    }
}
