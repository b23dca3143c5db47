use crate::model::id::CourtId;

pub struct CreateCourt {
    pub court_id: CourtId,
    pub court_name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub is_active: bool,
}
