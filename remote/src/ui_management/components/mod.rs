mod component;
pub mod control_list;
pub mod usage;

pub use component::{Component, ComponentRender};
