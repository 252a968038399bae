pub mod boundary;
pub mod closest_child;
pub mod collapse;
pub mod describe;
pub mod settings;
pub mod truncator;

pub use closest_child::{Selector, closest_child};
pub use collapse::{CollapsePlan, CollapseSettings, plan_all, plan_collapse};
pub use describe::describe;
pub use truncator::{truncate, truncate_shaped};
