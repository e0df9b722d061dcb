//! Pointer-driven reorder gesture.
//!
//! `Idle -> Armed -> Dragging -> Idle`. Relocations are applied to the list
//! live while dragging; persistence happens once, when the gesture ends.

use thiserror::Error;

use super::location_list::OrderedLocationList;
use super::reorder::ReorderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer is down on a row's drag handle.
    Armed { source: usize },
    /// `origin` is where the row started, `source` where it is now.
    Dragging {
        origin: usize,
        source: usize,
        relocations: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("a drag is already in progress")]
    AlreadyActive,

    #[error("no drag is in progress")]
    NotDragging,

    #[error(transparent)]
    Reorder(#[from] ReorderError),
}

/// The single persistence request a finished gesture produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragCommit {
    /// Full order of names after the last applied relocation.
    pub sequence: Vec<String>,
    pub origin: usize,
    pub final_index: usize,
    pub relocations: usize,
    pub cancelled: bool,
}

#[derive(Debug, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Swipe-to-dismiss is off for the whole gesture; the list only reorders.
    pub fn swipe_dismiss_enabled(&self) -> bool {
        !self.is_active()
    }

    /// Pointer pressed on the drag handle of row `source`.
    ///
    /// Arming immediately starts the drag, so on success the session is `Dragging`.
    pub fn press_handle(
        &mut self,
        source: usize,
        list: &OrderedLocationList,
    ) -> Result<(), DragError> {
        if self.is_active() {
            return Err(DragError::AlreadyActive);
        }
        if source >= list.len() {
            return Err(ReorderError::InvalidPosition {
                index: source,
                len: list.len(),
            }
            .into());
        }

        self.state = DragState::Armed { source };
        tracing::debug!("Drag armed on row {}", source);
        self.start()
    }

    fn start(&mut self) -> Result<(), DragError> {
        match self.state {
            DragState::Armed { source } => {
                self.state = DragState::Dragging {
                    origin: source,
                    source,
                    relocations: 0,
                };
                Ok(())
            }
            DragState::Dragging { .. } => Err(DragError::AlreadyActive),
            DragState::Idle => Err(DragError::NotDragging),
        }
    }

    /// The dragged row is now over row `target`.
    ///
    /// Returns whether the list changed. An out-of-range target is rejected
    /// and the gesture continues from where it was.
    pub fn drag_over(
        &mut self,
        list: &mut OrderedLocationList,
        target: usize,
    ) -> Result<bool, DragError> {
        let DragState::Dragging {
            origin,
            source,
            relocations,
        } = self.state
        else {
            return Err(DragError::NotDragging);
        };

        if target == source {
            return Ok(false);
        }

        let now_at = list.relocate(source, target)?;
        tracing::debug!("Dragged row {} over {}", source, target);
        self.state = DragState::Dragging {
            origin,
            source: now_at,
            relocations: relocations + 1,
        };
        Ok(true)
    }

    /// Pointer released over a drop target.
    pub fn release(&mut self, list: &OrderedLocationList) -> Option<DragCommit> {
        self.finish(list, false)
    }

    /// Gesture abandoned. Relocations already applied are kept and committed.
    pub fn cancel(&mut self, list: &OrderedLocationList) -> Option<DragCommit> {
        self.finish(list, true)
    }

    fn finish(&mut self, list: &OrderedLocationList, cancelled: bool) -> Option<DragCommit> {
        let (origin, final_index, relocations) = match std::mem::take(&mut self.state) {
            DragState::Idle => return None,
            DragState::Armed { source } => (source, source, 0),
            DragState::Dragging {
                origin,
                source,
                relocations,
            } => (origin, source, relocations),
        };

        tracing::debug!(
            "Drag ended: row {} -> {} after {} relocations{}",
            origin,
            final_index,
            relocations,
            if cancelled { " (cancelled)" } else { "" }
        );

        Some(DragCommit {
            sequence: list.names(),
            origin,
            final_index,
            relocations,
            cancelled,
        })
    }
}
