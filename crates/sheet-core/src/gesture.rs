#![forbid(unsafe_code)]

//! Vertical drag recognition and drag-delta tracking.
//!
//! [`VerticalDragRecognizer`] turns raw pointer samples into the drag
//! lifecycle a sheet consumes ([`DragEvent`]). [`DragTracker`] converts the
//! relative translation of an active drag into an absolute top offset.
//!
//! # State Machine
//!
//! ```text
//! Idle ──Down──▶ Pressed ──Move past threshold──▶ Dragging ──Up──▶ Idle
//!                   │                                 │
//!                   └──Up / Cancel──▶ Idle            └──Cancel──▶ Idle
//! ```
//!
//! # Invariants
//!
//! 1. `Began` is always followed by exactly one `Ended` or `Cancelled`.
//! 2. Translations are measured from the pointer-down position, so the
//!    threshold slop is part of the first `Changed` translation.
//! 3. A press released before crossing the threshold produces no events.
//!
//! # Failure Modes
//!
//! - A `Move` or `Up` without a prior `Down` is ignored.
//! - A second `Down` while pressed restarts the press at the new position.

/// Drag lifecycle consumed by a sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// A drag started.
    Began,
    /// The pointer moved; `translation_y` is measured from the drag origin.
    Changed { translation_y: f64 },
    /// The pointer was released.
    Ended { translation_y: f64 },
    /// The drag was aborted (escape, focus loss, pointer capture lost).
    Cancelled,
}

/// Raw vertical pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed at `y`.
    Down { y: f64 },
    /// Pointer moved to `y` with the button held.
    Move { y: f64 },
    /// Primary button released at `y`.
    Up { y: f64 },
    /// Pointer capture lost.
    Cancel,
}

/// Thresholds for drag recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    /// Minimum vertical distance before a drag starts (default: 4.0).
    pub threshold: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self { threshold: 4.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RecognizerState {
    Idle,
    Pressed { origin_y: f64 },
    Dragging { origin_y: f64 },
}

/// Converts pointer samples into [`DragEvent`]s.
#[derive(Debug, Clone)]
pub struct VerticalDragRecognizer {
    config: DragConfig,
    state: RecognizerState,
}

impl Default for VerticalDragRecognizer {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl VerticalDragRecognizer {
    /// Create a recognizer with the given thresholds.
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            state: RecognizerState::Idle,
        }
    }

    /// Process a pointer sample, returning the drag events it produces.
    ///
    /// Crossing the threshold produces both `Began` and the first `Changed`.
    pub fn process(&mut self, event: PointerEvent) -> Vec<DragEvent> {
        let mut out = Vec::with_capacity(2);
        match (self.state, event) {
            (RecognizerState::Dragging { .. }, PointerEvent::Down { y }) => {
                out.push(DragEvent::Cancelled);
                self.state = RecognizerState::Pressed { origin_y: y };
            }
            (_, PointerEvent::Down { y }) => {
                self.state = RecognizerState::Pressed { origin_y: y };
            }
            (RecognizerState::Pressed { origin_y }, PointerEvent::Move { y }) => {
                let translation_y = y - origin_y;
                if translation_y.abs() >= self.config.threshold {
                    self.state = RecognizerState::Dragging { origin_y };
                    out.push(DragEvent::Began);
                    out.push(DragEvent::Changed { translation_y });
                }
            }
            (RecognizerState::Dragging { origin_y }, PointerEvent::Move { y }) => {
                out.push(DragEvent::Changed {
                    translation_y: y - origin_y,
                });
            }
            (RecognizerState::Dragging { origin_y }, PointerEvent::Up { y }) => {
                self.state = RecognizerState::Idle;
                out.push(DragEvent::Ended {
                    translation_y: y - origin_y,
                });
            }
            (RecognizerState::Dragging { .. }, PointerEvent::Cancel) => {
                self.state = RecognizerState::Idle;
                out.push(DragEvent::Cancelled);
            }
            (RecognizerState::Pressed { .. }, PointerEvent::Up { .. } | PointerEvent::Cancel) => {
                self.state = RecognizerState::Idle;
            }
            (RecognizerState::Idle, _) => {}
        }
        out
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, RecognizerState::Dragging { .. })
    }

    /// Abort any press or drag, returning `Cancelled` if a drag was active.
    pub fn cancel(&mut self) -> Option<DragEvent> {
        let was_dragging = self.is_dragging();
        self.state = RecognizerState::Idle;
        was_dragging.then_some(DragEvent::Cancelled)
    }

    /// Get the current configuration.
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Update the configuration. An in-progress press keeps its origin.
    pub fn set_config(&mut self, config: DragConfig) {
        self.config = config;
    }
}

/// Tracks the absolute top offset of an active drag.
///
/// The origin is snapshotted once on `begin`; every translation is applied
/// to that origin rather than accumulated, so dropped samples never drift.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragTracker {
    origin: Option<f64>,
}

impl DragTracker {
    /// Create an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the live offset as the drag origin.
    pub fn begin(&mut self, current_offset: f64) {
        self.origin = Some(current_offset);
    }

    /// Absolute offset for `translation_y`, or `None` when no drag is active.
    #[must_use]
    pub fn offset_for(&self, translation_y: f64) -> Option<f64> {
        self.origin.map(|origin| origin + translation_y)
    }

    /// Finish the drag, returning the released absolute offset.
    pub fn end(&mut self, translation_y: f64) -> Option<f64> {
        self.origin.take().map(|origin| origin + translation_y)
    }

    /// Abandon the drag, returning the origin it started from.
    pub fn cancel(&mut self) -> Option<f64> {
        self.origin.take()
    }

    /// Offset snapshotted at drag start.
    #[must_use]
    pub fn origin(&self) -> Option<f64> {
        self.origin
    }

    /// Whether a drag is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }
}
