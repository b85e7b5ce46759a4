pub mod application_service;
pub mod audit_service;
pub mod candidate_service;
pub mod export_service;
pub mod interview_service;
pub mod notification_service;
pub mod personnel_service;
pub mod policy_service;
pub mod user_service;
pub mod vacancy_service;
