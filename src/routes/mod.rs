pub mod alerts;
pub mod health;
pub mod reports;
pub mod vehicles;
pub mod voice;
