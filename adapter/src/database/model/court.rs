use kernel::model::{court::Court, id::CourtId};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct CourtRow {
    pub court_id: CourtId,
    pub court_name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl From<CourtRow> for Court {
    fn from(value: CourtRow) -> Self {
        let CourtRow {
            court_id,
            court_name,
            description,
            image_url,
            is_active,
        } = value;
        Court {
            court_id,
            court_name,
            description,
            image_url,
            is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn court_row_converts_into_court() {
        let row = CourtRow {
            court_id: CourtId::new("COURT-A"),
            court_name: "第1コート".into(),
            description: "屋内ハードコート".into(),
            image_url: None,
            is_active: true,
        };
        let court = Court::from(row);
        assert_eq!(court.court_id.raw(), "COURT-A");
        assert!(court.is_active);
    }
}
