pub mod errors;
pub mod state;
pub mod schemas;
pub mod routes;
pub mod views;
pub mod openapi;
pub mod startup;

pub use startup::run;
pub use state::ServerState;
