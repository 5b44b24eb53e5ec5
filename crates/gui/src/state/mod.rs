pub mod command;
pub mod messages;
pub mod session;

pub use command::{Command, Effect};
pub use messages::AppMessage;
pub use session::{AppState, FileSelection, MapViewState, NavTool, PointPopup, Screen};
