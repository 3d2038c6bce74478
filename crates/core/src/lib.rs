pub mod model;
pub mod error;
pub mod hierarchy;
pub mod treemap;
pub mod color;
pub mod legend;
pub mod interaction;
pub mod config;
pub mod pipeline;
pub mod export;
pub mod search;
pub mod human;
pub mod logging;

pub use model::*;
pub use error::*;
pub use treemap::{layout, LayoutLeaf, Rect, TreemapLayout};
pub use pipeline::Treemap;
