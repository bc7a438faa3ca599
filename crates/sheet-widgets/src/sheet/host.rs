#![forbid(unsafe_code)]

//! One-sheet-at-a-time coordination for a presenting surface.
//!
//! # Policy
//!
//! - Selecting the key of the active sheet dismisses it and does not
//!   re-present.
//! - Selecting a different key dismisses the active sheet and queues the new
//!   selection; its sheet is built and presented by [`SheetHost::tick`] only
//!   after the active sheet finished dismissing and detached.
//! - Selecting while nothing is active presents immediately.
//!
//! # Invariants
//!
//! 1. At most one sheet is attached to the surface at any time.
//! 2. At most one selection is queued; a newer selection replaces it without
//!    ever building it.
//! 3. A queued selection whose presentation fails stays queued and is
//!    retried on the next tick.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use sheet_core::{ConfigurationError, debug};

use super::controller::{Sheet, SheetPhase};
use super::surface::{PresentingSurface, SurfaceHandle};

/// Outcome of [`SheetHost::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The new sheet was presented right away.
    Presented,
    /// The active sheet matched the key and is dismissing.
    Dismissed,
    /// The active sheet is dismissing; the new one waits for it to detach.
    Queued,
}

#[derive(Debug)]
struct Hosted<K, C> {
    key: K,
    sheet: Sheet<C>,
}

type SheetBuilder<C> = Box<dyn FnOnce() -> Sheet<C>>;

enum Deferred<C> {
    Unbuilt(SheetBuilder<C>),
    Built(Sheet<C>),
}

struct Pending<K, C> {
    key: K,
    sheet: Deferred<C>,
}

/// Owns the sheets shown over one surface.
pub struct SheetHost<K, C = ()> {
    surface: SurfaceHandle,
    active: Option<Hosted<K, C>>,
    pending: Option<Pending<K, C>>,
}

impl<K: std::fmt::Debug, C> std::fmt::Debug for SheetHost<K, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetHost")
            .field("active", &self.active.as_ref().map(|h| (&h.key, h.sheet.phase())))
            .field("pending", &self.pending.as_ref().map(|p| &p.key))
            .finish_non_exhaustive()
    }
}

impl<K: PartialEq, C: 'static> SheetHost<K, C> {
    /// Host sheets over `surface`.
    pub fn new<S: PresentingSurface + 'static>(surface: &Rc<RefCell<S>>) -> Self {
        let handle: SurfaceHandle = surface.clone();
        Self::with_handle(handle)
    }

    /// Host sheets over a type-erased surface handle.
    #[must_use]
    pub fn with_handle(surface: SurfaceHandle) -> Self {
        Self {
            surface,
            active: None,
            pending: None,
        }
    }

    /// Apply the selection policy for `key`.
    ///
    /// `build` runs only when the new sheet is about to be presented: right
    /// away when nothing is active, otherwise from [`tick`](Self::tick) once
    /// the active sheet detached. A replaced or dropped selection is never
    /// built.
    pub fn select(
        &mut self,
        key: K,
        build: impl FnOnce() -> Sheet<C> + 'static,
    ) -> Result<Selection, ConfigurationError> {
        self.reap();
        let Some(active) = self.active.as_mut() else {
            let mut sheet = build();
            sheet.present_on(&self.surface)?;
            debug!(message = "sheet.host.presented", sheet = sheet.id().get());
            self.active = Some(Hosted { key, sheet });
            return Ok(Selection::Presented);
        };

        active.sheet.dismiss()?;
        if active.key == key {
            if self.pending.take().is_some() {
                debug!(message = "sheet.host.pending_dropped");
            }
            return Ok(Selection::Dismissed);
        }
        self.pending = Some(Pending {
            key,
            sheet: Deferred::Unbuilt(Box::new(build)),
        });
        Ok(Selection::Queued)
    }

    /// Dismiss the active sheet and forget any queued selection.
    pub fn dismiss(&mut self) -> Result<(), ConfigurationError> {
        self.pending = None;
        match self.active.as_mut() {
            Some(active) => active.sheet.dismiss(),
            None => Ok(()),
        }
    }

    /// Advance the active sheet; present the queued one once it detached.
    ///
    /// If presenting the queued sheet fails, the built sheet stays queued
    /// and the error is returned.
    pub fn tick(&mut self, dt: Duration) -> Result<(), ConfigurationError> {
        if let Some(active) = self.active.as_mut() {
            active.sheet.tick(dt);
        }
        self.reap();
        if self.active.is_some() {
            return Ok(());
        }
        let Some(Pending { key, sheet }) = self.pending.take() else {
            return Ok(());
        };
        let mut sheet = match sheet {
            Deferred::Unbuilt(build) => build(),
            Deferred::Built(sheet) => sheet,
        };
        if let Err(err) = sheet.present_on(&self.surface) {
            debug!(message = "sheet.host.present_failed", sheet = sheet.id().get(), error = %err);
            self.pending = Some(Pending {
                key,
                sheet: Deferred::Built(sheet),
            });
            return Err(err);
        }
        debug!(message = "sheet.host.presented", sheet = sheet.id().get());
        self.active = Some(Hosted { key, sheet });
        Ok(())
    }

    #[must_use]
    pub fn active(&self) -> Option<&Sheet<C>> {
        self.active.as_ref().map(|h| &h.sheet)
    }

    pub fn active_mut(&mut self) -> Option<&mut Sheet<C>> {
        self.active.as_mut().map(|h| &mut h.sheet)
    }

    #[must_use]
    pub fn active_key(&self) -> Option<&K> {
        self.active.as_ref().map(|h| &h.key)
    }

    #[must_use]
    pub fn pending_key(&self) -> Option<&K> {
        self.pending.as_ref().map(|p| &p.key)
    }

    fn reap(&mut self) {
        let detached = self
            .active
            .as_ref()
            .is_some_and(|h| h.sheet.phase() == SheetPhase::Detached);
        if detached {
            self.active = None;
        }
    }
}
