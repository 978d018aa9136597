// Calendar Grid Library
// Binds date-attributed records to week and month calendar grids

pub mod models;
pub mod services;
pub mod utils;
