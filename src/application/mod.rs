/// Application layer - Use cases and read models
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
pub mod read_models;
pub mod transition;
pub mod use_cases;
