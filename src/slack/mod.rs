pub mod api;
pub mod events;
pub mod interactions;
pub mod routes;
pub mod tokens;
pub mod verification;
pub mod views;
