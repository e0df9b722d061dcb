pub mod drag_session;
pub mod location_list;
pub mod location_model;
pub mod reorder;

pub use drag_session::{DragCommit, DragError, DragSession, DragState};
pub use location_list::OrderedLocationList;
pub use location_model::{LocationListModel, Notice, NoticeLevel};
pub use reorder::{available_moves, MoveIntent, ReorderError};
