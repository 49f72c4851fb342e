pub mod health;
pub mod wellness;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use health::health_check;
pub use wellness::{analyze_blood_pressure, get_health_tip, suggest_exercise};
