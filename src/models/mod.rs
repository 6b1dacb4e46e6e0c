pub mod activity;
pub mod alert;
pub mod counters;
pub mod report;
pub mod security;
pub mod vehicle;
pub mod voice;
