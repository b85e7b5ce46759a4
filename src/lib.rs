pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    application_service::ApplicationService, audit_service::AuditService,
    candidate_service::CandidateService, interview_service::InterviewService,
    notification_service::NotificationService, personnel_service::PersonnelService,
    user_service::UserService, vacancy_service::VacancyService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub vacancy_service: VacancyService,
    pub candidate_service: CandidateService,
    pub application_service: ApplicationService,
    pub interview_service: InterviewService,
    pub user_service: UserService,
    pub personnel_service: PersonnelService,
    pub notification_service: NotificationService,
    pub audit_service: AuditService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let vacancy_service = VacancyService::new(pool.clone());
        let candidate_service = CandidateService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let interview_service = InterviewService::new(pool.clone());
        let user_service = UserService::new(pool.clone());
        let personnel_service = PersonnelService::new(pool.clone());
        let notification_service = NotificationService::new(
            config.mailer_url.clone(),
            config.mailer_secret.clone(),
            config.mailer_from_email.clone(),
        );
        let audit_service = AuditService::new(pool.clone());

        Self {
            pool,
            vacancy_service,
            candidate_service,
            application_service,
            interview_service,
            user_service,
            personnel_service,
            notification_service,
            audit_service,
        }
    }
}
