pub mod app;
pub mod data;
pub mod evaluator;
pub mod model;
pub mod session;
pub mod store;
pub mod ui;
pub mod view_models;

pub use app::ChallengeApp;
