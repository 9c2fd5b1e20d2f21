pub mod camera;
pub mod car;
pub mod coin_spawner;
pub mod collectibles;
pub mod floating_text;
pub mod input;
pub mod pool;
pub mod save;
pub mod scenes;
pub mod trail;
pub mod ui;

pub use camera::*;
pub use car::*;
pub use coin_spawner::*;
pub use collectibles::*;
pub use floating_text::*;
pub use input::*;
pub use pool::*;
pub use save::*;
pub use scenes::*;
pub use trail::*;
pub use ui::*;
