//! Drag-and-drop ordering of category rows.
//!
//! The DOM layer reports drag start, hover and drop; this module decides the
//! insertion side, computes the new order and the batch payload, and
//! serializes saves so a failed one can be rolled back to what the server
//! last accepted.

use cv_api_types::{CategoryOrderEntry, ReorderCategoriesRequest};
use std::cell::RefCell;

use tracing::{debug, info, warn};

use crate::api::CanventoryApi;
use crate::error::{ApiError, UiError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropPosition {
    Before,
    After,
}

impl DropPosition {
    /// Above the row's vertical midpoint inserts before it.
    pub fn classify(pointer_y: f64, row_top: f64, row_height: f64) -> Self {
        if pointer_y < row_top + row_height / 2.0 {
            DropPosition::Before
        } else {
            DropPosition::After
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            DropPosition::Before => "drag-over-top",
            DropPosition::After => "drag-over-bottom",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryOrder {
    ids: Vec<i64>,
}

impl CategoryOrder {
    pub fn new(ids: Vec<i64>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn position(&self, id: i64) -> Option<usize> {
        self.ids.iter().position(|candidate| *candidate == id)
    }

    /// Move `dragged` next to `target`. Dropping a row on itself is a no-op
    /// and returns `Ok(false)`.
    pub fn move_relative(&mut self, dragged: i64, target: i64, position: DropPosition) -> Result<bool, UiError> {
        let from = self.position(dragged).ok_or(UiError::UnknownCategory(dragged))?;
        if self.position(target).is_none() {
            return Err(UiError::UnknownCategory(target));
        }
        if dragged == target {
            return Ok(false);
        }

        self.ids.remove(from);
        let target_index = self.position(target).ok_or(UiError::UnknownCategory(target))?;
        let insert_at = match position {
            DropPosition::Before => target_index,
            DropPosition::After => target_index + 1,
        };
        self.ids.insert(insert_at, dragged);
        Ok(true)
    }

    /// Zero-based `sort_order` per row, in current order.
    pub fn to_request(&self) -> ReorderCategoriesRequest {
        ReorderCategoriesRequest {
            categories: self
                .ids
                .iter()
                .enumerate()
                .map(|(sort_order, id)| CategoryOrderEntry { id: *id, sort_order })
                .collect(),
        }
    }
}

/// Tracks the row being dragged and the current insertion preview.
#[derive(Debug, Default)]
pub struct DragSession {
    dragged: Option<i64>,
    preview: Option<(i64, DropPosition)>,
}

impl DragSession {
    pub fn start(&mut self, id: i64) {
        self.dragged = Some(id);
        self.preview = None;
    }

    pub fn dragged(&self) -> Option<i64> {
        self.dragged
    }

    pub fn preview(&self) -> Option<(i64, DropPosition)> {
        self.preview
    }

    /// Hovering over `target`. No preview over the dragged row itself or
    /// when nothing is being dragged.
    pub fn hover(&mut self, target: i64, position: DropPosition) -> Option<DropPosition> {
        match self.dragged {
            Some(dragged) if dragged != target => {
                self.preview = Some((target, position));
                Some(position)
            }
            _ => {
                self.preview = None;
                None
            }
        }
    }

    pub fn leave(&mut self, target: i64) {
        if matches!(self.preview, Some((id, _)) if id == target) {
            self.preview = None;
        }
    }

    /// Finish the drag on `target`. Returns the new order only when it moved.
    pub fn drop_on(
        &mut self,
        target: i64,
        position: DropPosition,
        current: &CategoryOrder,
    ) -> Result<Option<CategoryOrder>, UiError> {
        let dragged = self.dragged.take();
        self.preview = None;
        let Some(dragged) = dragged else {
            return Ok(None);
        };

        let mut next = current.clone();
        if !next.move_relative(dragged, target, position)? {
            return Ok(None);
        }
        Ok(Some(next))
    }

    pub fn end(&mut self) {
        self.dragged = None;
        self.preview = None;
    }
}

/// What to do after a save request completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncStep {
    /// A newer order was queued meanwhile; send it next.
    Send(CategoryOrder),
    Idle,
    /// Nothing newer is queued and the last save failed: show this order,
    /// the last one the server accepted.
    RollBack(CategoryOrder),
}

/// Serializes order saves: at most one request is in flight, and drops made
/// meanwhile collapse into a single follow-up carrying the latest order.
/// Every request sends the full order, so the server ends up with whatever
/// the last successful request carried.
#[derive(Debug)]
pub struct ReorderSync {
    confirmed: CategoryOrder,
    in_flight: bool,
    queued: Option<CategoryOrder>,
}

impl ReorderSync {
    /// `confirmed` is the order the page was rendered with.
    pub fn new(confirmed: CategoryOrder) -> Self {
        Self {
            confirmed,
            in_flight: false,
            queued: None,
        }
    }

    pub fn confirmed(&self) -> &CategoryOrder {
        &self.confirmed
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight
    }

    pub fn has_queued(&self) -> bool {
        self.queued.is_some()
    }

    /// A drop produced `order`. Returns it when it should be sent now;
    /// otherwise it replaces whatever was queued.
    pub fn submit(&mut self, order: CategoryOrder) -> Option<CategoryOrder> {
        if self.in_flight {
            self.queued = Some(order);
            return None;
        }
        self.in_flight = true;
        Some(order)
    }

    /// The request carrying `sent` finished.
    pub fn finished(&mut self, sent: CategoryOrder, saved: bool) -> SyncStep {
        if saved {
            self.confirmed = sent;
        }
        if let Some(next) = self.queued.take() {
            return SyncStep::Send(next);
        }
        self.in_flight = false;
        if saved {
            SyncStep::Idle
        } else {
            SyncStep::RollBack(self.confirmed.clone())
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Another save was in flight; this order rides on its follow-up.
    Queued,
    /// Saving failed; the caller restores this order.
    RolledBack(CategoryOrder),
}

/// Send one order.
pub async fn persist<A: CanventoryApi + ?Sized>(api: &A, order: &CategoryOrder) -> Result<(), ApiError> {
    match api.reorder_categories(&order.to_request()).await {
        Ok(()) => {
            info!("saved order of {} categories", order.ids().len());
            Ok(())
        }
        Err(err) => {
            warn!("failed to save category order: {}", err);
            Err(err)
        }
    }
}

/// Save `order` through `sync`, draining any order queued while this call
/// was sending.
pub async fn save_order<A: CanventoryApi + ?Sized>(
    api: &A,
    sync: &RefCell<ReorderSync>,
    order: CategoryOrder,
) -> SaveOutcome {
    let Some(mut sending) = sync.borrow_mut().submit(order) else {
        debug!("order save queued behind one in flight");
        return SaveOutcome::Queued;
    };

    loop {
        let saved = persist(api, &sending).await.is_ok();
        let step = sync.borrow_mut().finished(sending, saved);
        match step {
            SyncStep::Send(next) => sending = next,
            SyncStep::Idle => return SaveOutcome::Saved,
            SyncStep::RollBack(order) => return SaveOutcome::RolledBack(order),
        }
    }
}
