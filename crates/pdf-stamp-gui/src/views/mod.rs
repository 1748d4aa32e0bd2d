pub mod placer;
pub mod toolbar;

pub use placer::{PlacerEvent, PlacerState, show_placer};
pub use toolbar::{ToolbarAction, show_toolbar};
