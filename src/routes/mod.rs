pub mod candidate_routes;
pub mod health;
pub mod interview;
pub mod personnel;
pub mod users;
pub mod vacancy;
