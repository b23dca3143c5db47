use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::{
    court::CourtRepositoryImpl, equipment::EquipmentRepositoryImpl,
    health::HealthCheckRepositoryImpl, reservation::ReservationRepositoryImpl,
};
use kernel::repository::{
    court::CourtRepository, equipment::EquipmentRepository, health::HealthCheckRepository,
    reservation::ReservationRepository,
};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    court_repository: Arc<dyn CourtRepository>,
    equipment_repository: Arc<dyn EquipmentRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let court_repository = Arc::new(CourtRepositoryImpl::new(pool.clone()));
        let equipment_repository = Arc::new(EquipmentRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            court_repository,
            equipment_repository,
            reservation_repository,
        }
    }

    // テストでモックリポジトリを差し込むためのコンストラクタ
    pub fn with_repositories(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        court_repository: Arc<dyn CourtRepository>,
        equipment_repository: Arc<dyn EquipmentRepository>,
        reservation_repository: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            health_check_repository,
            court_repository,
            equipment_repository,
            reservation_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn court_repository(&self) -> Arc<dyn CourtRepository> {
        self.court_repository.clone()
    }

    pub fn equipment_repository(&self) -> Arc<dyn EquipmentRepository> {
        self.equipment_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }
}
