// Service module exports

pub mod calendar;
pub mod database;
pub mod grid;
pub mod period;
pub mod settings;
