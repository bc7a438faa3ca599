#![forbid(unsafe_code)]

//! The host surface a sheet is presented over.
//!
//! The sheet never owns the surface. It captures a `Weak` handle at
//! presentation so that the surface can be torn down independently; every
//! later access goes through [`SurfaceRef::with`], which reports
//! [`ConfigurationError::SurfaceReleased`] once the host is gone.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use sheet_core::ConfigurationError;

/// Shared handle to a presenting surface.
pub type SurfaceHandle = Rc<RefCell<dyn PresentingSurface>>;

/// Identity of one sheet instance, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetId(u64);

static NEXT_SHEET_ID: AtomicU64 = AtomicU64::new(1);

impl SheetId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SHEET_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric id.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SheetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sheet#{}", self.0)
    }
}

/// A view that hosts sheets.
///
/// Offsets are measured from the top of the surface: `0` is fully covered,
/// `height()` is fully hidden.
pub trait PresentingSurface {
    /// Current height of the surface. Read once per presentation.
    fn height(&self) -> f64;

    /// Attach the sheet's view at `offset`.
    ///
    /// `fixed_height` pins the sheet's own height to the surface height for
    /// the duration of the entrance animation, so the content does not
    /// reflow while it slides in.
    fn attach_sheet(&mut self, id: SheetId, offset: f64, fixed_height: f64);

    /// Move the sheet's top edge to `offset`.
    fn set_sheet_offset(&mut self, id: SheetId, offset: f64);

    /// Drop the fixed-height constraint installed by `attach_sheet`.
    fn release_fixed_height(&mut self, id: SheetId);

    /// Remove the sheet's view.
    fn detach_sheet(&mut self, id: SheetId);
}

/// Non-owning reference to the surface a sheet was presented on.
#[derive(Clone)]
pub(crate) struct SurfaceRef {
    inner: Weak<RefCell<dyn PresentingSurface>>,
}

impl SurfaceRef {
    pub(crate) fn new(handle: &SurfaceHandle) -> Self {
        Self {
            inner: Rc::downgrade(handle),
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Run `f` against the surface if it is still alive.
    pub(crate) fn with<R>(
        &self,
        f: impl FnOnce(&mut dyn PresentingSurface) -> R,
    ) -> Result<R, ConfigurationError> {
        let surface = self
            .inner
            .upgrade()
            .ok_or(ConfigurationError::SurfaceReleased)?;
        let mut guard = surface.borrow_mut();
        Ok(f(&mut *guard))
    }

    /// Like [`with`](Self::with), but gives up instead of panicking when the
    /// surface is already borrowed. Used from `Drop`.
    pub(crate) fn try_with(&self, f: impl FnOnce(&mut dyn PresentingSurface)) {
        let Some(surface) = self.inner.upgrade() else {
            return;
        };
        if let Ok(mut guard) = surface.try_borrow_mut() {
            f(&mut *guard);
        }
    }
}

impl std::fmt::Debug for SurfaceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceRef")
            .field("alive", &self.is_alive())
            .finish()
    }
}
