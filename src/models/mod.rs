pub mod audit_log;
pub mod candidate;
pub mod interview;
pub mod personnel_form;
pub mod user;
pub mod vacancy;
