mod definition;
mod item;
mod render;

pub use definition::*;
pub use item::*;
pub use render::*;
