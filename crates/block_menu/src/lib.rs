mod controller;
mod debounce;
mod document;
mod events;
mod geometry;
pub mod menu;
mod option;
mod timer;

pub use crate::controller::*;
pub use crate::debounce::*;
pub use crate::document::*;
pub use crate::events::*;
pub use crate::geometry::*;
pub use crate::option::*;
pub use crate::timer::*;
