use garde::Validate;
use kernel::model::{
    court::{event::CreateCourt, Court},
    id::CourtId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourtRequest {
    // コート ID は外部で採番された文字列をそのまま使う
    #[garde(length(min = 1))]
    pub court_id: String,
    #[garde(length(min = 1))]
    pub court_name: String,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(skip)]
    pub image_url: Option<String>,
    #[garde(skip)]
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

impl From<CreateCourtRequest> for CreateCourt {
    fn from(value: CreateCourtRequest) -> Self {
        let CreateCourtRequest {
            court_id,
            court_name,
            description,
            image_url,
            is_active,
        } = value;
        CreateCourt {
            court_id: CourtId::new(court_id),
            court_name,
            description,
            image_url,
            is_active,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtsResponse {
    pub items: Vec<CourtResponse>,
}

impl From<Vec<Court>> for CourtsResponse {
    fn from(value: Vec<Court>) -> Self {
        Self {
            items: value.into_iter().map(CourtResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtResponse {
    pub court_id: CourtId,
    pub court_name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl From<Court> for CourtResponse {
    fn from(value: Court) -> Self {
        let Court {
            court_id,
            court_name,
            description,
            image_url,
            is_active,
        } = value;
        Self {
            court_id,
            court_name,
            description,
            image_url,
            is_active,
        }
    }
}
