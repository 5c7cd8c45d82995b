pub mod challenge;
pub mod loading;
pub mod summary;
pub mod unavailable;
pub mod welcome;
