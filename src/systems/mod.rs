//! Bevy ECS Systems - Game logic that operates on components

mod collision;
mod combat;
mod economy;
mod movement;
mod spawn;
mod sync;

pub use collision::*;
pub use combat::*;
pub use economy::*;
pub use movement::*;
pub use spawn::*;
pub use sync::*;
