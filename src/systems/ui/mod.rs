pub mod game_over;
pub mod hud;
pub mod main_menu;

pub use game_over::*;
pub use hud::*;
pub use main_menu::*;
