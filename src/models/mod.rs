// Module exports for models

pub mod allowed_range;
pub mod grid_cell;
pub mod record;
pub mod settings;
pub mod time_window;
pub mod view_mode;
