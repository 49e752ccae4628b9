pub mod blender;
pub mod learner;
pub mod role;
pub mod store;
pub mod types;

pub use blender::{blend, predict, LocationResolver};
pub use learner::{learn_player, update, FormWindow, LearnMode, PlayerUpdates, UpdateEvent};
pub use role::classify;
pub use store::{StoreLayout, WeightStore};
pub use types::{ContextKey, LocationContext, RoleCategory, WeightEntry};
