pub mod ai;
pub mod animation;
pub mod attack;
pub mod combat;
pub mod combo;
pub mod constants;
pub mod error;
pub mod hash;
pub mod init;
pub mod input;
pub mod physics;
pub mod projectiles;
pub mod step;
pub mod types;

pub use constants::*;
pub use error::ConfigError;
pub use hash::*;
pub use init::*;
pub use input::{ControlBinding, Intent, KeyCode, KeySnapshot};
pub use physics::{apply_intent, clamp_to_arena, integrate};
pub use projectiles::{advance_all, is_out_of_bounds, resolve_hits};
pub use step::step;
pub use types::*;
