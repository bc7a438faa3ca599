#![forbid(unsafe_code)]

//! The stateful sheet controller.
//!
//! # Lifecycle
//!
//! ```text
//!  Idle ──present──▶ Presenting ──complete──▶ Settled ◀──complete── Settling
//!                        │                     │  ▲                   ▲
//!                        │                 drag│  │cancel/end         │
//!                        │                     ▼  │                   │
//!                        │                   Dragging ──end───────────┘
//!                        │
//!   any attached ──dismiss──▶ Dismissing ──complete──▶ Detached
//! ```
//!
//! # Invariants
//!
//! 1. At most one offset animation is in flight. Starting another bumps the
//!    generation, and only an animation whose generation matches the current
//!    one may complete.
//! 2. `current_position` is `None` until the first completion and afterwards
//!    always names the last position a completed animation settled into.
//! 3. Drag updates move the surface and notify position-changed
//!    synchronously; animation frames move the surface without notifying.
//!    Every completion notifies once with the exact target offset.
//! 4. `Detached` is terminal: subscribers are dropped and every mutating
//!    operation reports [`ConfigurationError::Detached`] or is a no-op.
//!
//! # Failure Modes
//!
//! - **Surface dropped by its owner**: the next operation that needs it
//!   reports [`ConfigurationError::SurfaceReleased`] and the sheet moves to
//!   `Detached` without firing callbacks. A tick does the same silently.
//! - **Re-entrant surface borrow**: surface methods are called through a
//!   `RefCell`; calling back into the sheet from inside a surface method
//!   panics.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use sheet_core::animation::{Animation, AnimationConfig, FrameTicker, OffsetAnimation};
use sheet_core::config::SheetConfig;
use sheet_core::gesture::{DragEvent, DragTracker};
use sheet_core::position::{coverage_for_offset, offset_for_position, position_for_coverage};
use sheet_core::{ConfigurationError, CoverageConfig, Position, debug, debug_span, trace, warn};
use web_time::Instant;

use super::header::{SheetAction, SheetHeader};
use super::notify::{Notifier, Subscription};
use super::surface::{PresentingSurface, SheetId, SurfaceHandle, SurfaceRef};

/// Where a sheet is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetPhase {
    /// Created, not yet presented.
    Idle,
    /// Entrance animation toward the initial position.
    Presenting,
    /// Resting at `current_position`.
    Settled,
    /// Following a drag.
    Dragging,
    /// Animating toward a presentable position.
    Settling,
    /// Animating toward `Dismissed`.
    Dismissing,
    /// Removed from the surface for good.
    Detached,
}

impl SheetPhase {
    /// Whether the sheet's view is on the surface.
    #[must_use]
    pub fn is_attached(self) -> bool {
        !matches!(self, Self::Idle | Self::Detached)
    }

    /// Whether drag input is interpreted in this phase.
    #[must_use]
    pub fn accepts_drag(self) -> bool {
        matches!(self, Self::Settled | Self::Settling | Self::Dragging)
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Presenting => "presenting",
            Self::Settled => "settled",
            Self::Dragging => "dragging",
            Self::Settling => "settling",
            Self::Dismissing => "dismissing",
            Self::Detached => "detached",
        }
    }
}

impl std::fmt::Display for SheetPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a sheet for render collaborators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSnapshot {
    pub id: SheetId,
    pub phase: SheetPhase,
    /// Live top offset.
    pub offset: f64,
    pub position: Option<Position>,
    pub surface_height: Option<f64>,
    /// Visible fraction of the surface, `1 - offset / height`.
    pub coverage: Option<f64>,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Present,
    Settle,
}

#[derive(Debug)]
struct InFlight {
    animation: OffsetAnimation,
    transition: Transition,
}

#[derive(Debug, Default)]
struct SheetObservers {
    presented: Notifier<()>,
    dismissed: Notifier<()>,
    expanded: Notifier<()>,
    collapsed: Notifier<()>,
    position_changed: Notifier<f64>,
}

impl SheetObservers {
    fn clear(&mut self) {
        self.presented.clear();
        self.dismissed.clear();
        self.expanded.clear();
        self.collapsed.clear();
        self.position_changed.clear();
    }
}

/// A draggable bottom sheet presented over a [`PresentingSurface`].
///
/// One `Sheet` is one presentation: after it dismisses it is detached for
/// good and a new instance must be created.
///
/// # Example
///
/// ```ignore
/// let mut sheet = Sheet::new(content).with_header(SheetHeader::new().title("Filters"));
/// let _presented = sheet.on_presented(|| println!("up"));
/// sheet.present(&surface)?;
/// sheet.tick(Duration::from_millis(16));
/// ```
#[derive(Debug)]
pub struct Sheet<C = ()> {
    id: SheetId,
    header: SheetHeader,
    content: C,
    config: SheetConfig,
    reduced_motion: bool,
    phase: SheetPhase,
    current_offset: f64,
    current_position: Option<Position>,
    surface_height: Option<f64>,
    surface: Option<SurfaceRef>,
    fixed_height_pending: bool,
    drag: DragTracker,
    in_flight: Option<InFlight>,
    generation: u64,
    ticker: FrameTicker,
    observers: SheetObservers,
    retained: Vec<Subscription>,
}

impl<C> Sheet<C> {
    /// Create an idle sheet around `content` with default configuration.
    pub fn new(content: C) -> Self {
        Self {
            id: SheetId::next(),
            header: SheetHeader::default(),
            content,
            config: SheetConfig::default(),
            reduced_motion: false,
            phase: SheetPhase::Idle,
            current_offset: 0.0,
            current_position: None,
            surface_height: None,
            surface: None,
            fixed_height_pending: false,
            drag: DragTracker::new(),
            in_flight: None,
            generation: 0,
            ticker: FrameTicker::new(),
            observers: SheetObservers::default(),
            retained: Vec::new(),
        }
    }

    /// Set header chrome.
    #[must_use]
    pub fn with_header(mut self, header: SheetHeader) -> Self {
        self.header = header;
        self
    }

    // --- configuration -----------------------------------------------------

    /// Choose the position reached by the entrance animation.
    ///
    /// Only allowed before presentation.
    pub fn set_initial_position(&mut self, position: Position) -> Result<(), ConfigurationError> {
        if !position.is_presentable() {
            return Err(ConfigurationError::DismissedInitialPosition);
        }
        if self.phase != SheetPhase::Idle {
            return Err(ConfigurationError::AlreadyPresented);
        }
        self.config.initial_position = position;
        Ok(())
    }

    /// Validate and install coverage fractions.
    ///
    /// Takes effect at the next animation; the sheet is not re-snapped.
    pub fn set_coverage_percentage(
        &mut self,
        collapsed: f64,
        expanded: f64,
    ) -> Result<(), ConfigurationError> {
        self.config.coverage = CoverageConfig::new(collapsed, expanded)?;
        Ok(())
    }

    /// Install an already validated coverage configuration.
    pub fn set_coverage(&mut self, coverage: CoverageConfig) {
        self.config.coverage = coverage;
    }

    /// Validate and install settle animation timing.
    pub fn set_animation_config(&mut self, animation: AnimationConfig) -> Result<(), ConfigurationError> {
        animation.validate()?;
        self.config.animation = animation;
        Ok(())
    }

    /// Replace the configured timing with the reduced-motion preset while set.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Install a complete configuration before presentation.
    ///
    /// Reports the first problem [`SheetConfig::validate`] finds.
    pub fn apply_config(&mut self, config: SheetConfig) -> Result<(), ConfigurationError> {
        if self.phase != SheetPhase::Idle {
            return Err(ConfigurationError::AlreadyPresented);
        }
        if let Some(first) = config.validate().into_iter().next() {
            return Err(first);
        }
        self.config = config;
        Ok(())
    }

    // --- subscriptions -----------------------------------------------------

    /// Fires once the entrance animation completes.
    pub fn on_presented(&mut self, callback: impl Fn() + 'static) -> Subscription {
        self.observers.presented.subscribe(move |()| callback())
    }

    /// Fires once the dismissal animation completes, before detaching.
    pub fn on_dismissed(&mut self, callback: impl Fn() + 'static) -> Subscription {
        self.observers.dismissed.subscribe(move |()| callback())
    }

    /// Fires when a settle animation reaches `Expanded`.
    pub fn on_expanded(&mut self, callback: impl Fn() + 'static) -> Subscription {
        self.observers.expanded.subscribe(move |()| callback())
    }

    /// Fires when a settle animation reaches `Collapsed`.
    pub fn on_collapsed(&mut self, callback: impl Fn() + 'static) -> Subscription {
        self.observers.collapsed.subscribe(move |()| callback())
    }

    /// Fires with the live offset on every drag update and once with the
    /// target offset at the end of every animation.
    pub fn on_position_changed(&mut self, callback: impl Fn(f64) + 'static) -> Subscription {
        self.observers
            .position_changed
            .subscribe(move |offset: &f64| callback(*offset))
    }

    /// Keep `subscription` alive until the sheet detaches or is dropped.
    pub fn retain_subscription(&mut self, subscription: Subscription) {
        if self.phase != SheetPhase::Detached {
            self.retained.push(subscription);
        }
    }

    // --- lifecycle ---------------------------------------------------------

    /// Present over `surface`.
    pub fn present<S>(&mut self, surface: &Rc<RefCell<S>>) -> Result<(), ConfigurationError>
    where
        S: PresentingSurface + 'static,
    {
        let handle: SurfaceHandle = surface.clone();
        self.present_on(&handle)
    }

    /// Present over a type-erased surface handle.
    ///
    /// Attaches at the dismissed offset with the sheet's height pinned to the
    /// surface height, then animates to the initial position.
    pub fn present_on(&mut self, surface: &SurfaceHandle) -> Result<(), ConfigurationError> {
        match self.phase {
            SheetPhase::Idle => {}
            SheetPhase::Detached => return Err(ConfigurationError::Detached),
            _ => return Err(ConfigurationError::AlreadyPresented),
        }
        let _span = debug_span!("sheet.present", sheet = self.id.get()).entered();

        let height = surface.borrow().height();
        if !height.is_finite() || height <= 0.0 {
            return Err(ConfigurationError::InvalidSurfaceHeight { height });
        }
        let offset = offset_for_position(Position::Dismissed, height, &self.config.coverage);
        surface.borrow_mut().attach_sheet(self.id, offset, height);

        self.surface = Some(SurfaceRef::new(surface));
        self.surface_height = Some(height);
        self.current_offset = offset;
        self.fixed_height_pending = true;
        self.ticker.reset();
        debug!(
            message = "sheet.present",
            sheet = self.id.get(),
            height,
            initial = %self.config.initial_position
        );
        self.start(self.config.initial_position, Transition::Present);
        Ok(())
    }

    /// Animate to `Dismissed`, then detach.
    ///
    /// A no-op while already dismissing or after detachment.
    pub fn dismiss(&mut self) -> Result<(), ConfigurationError> {
        match self.phase {
            SheetPhase::Idle => Err(ConfigurationError::NotPresented),
            SheetPhase::Dismissing | SheetPhase::Detached => {
                trace!(message = "sheet.dismiss.ignored", sheet = self.id.get(), phase = self.phase.as_str());
                Ok(())
            }
            _ => self.animate_to(Position::Dismissed),
        }
    }

    /// Animate from the live offset to `target`, superseding any animation
    /// or drag in progress.
    pub fn animate_to(&mut self, target: Position) -> Result<(), ConfigurationError> {
        match self.phase {
            SheetPhase::Idle => return Err(ConfigurationError::NotPresented),
            SheetPhase::Detached => return Err(ConfigurationError::Detached),
            _ => {}
        }
        self.ensure_surface()?;
        if self.drag.cancel().is_some() {
            trace!(message = "sheet.drag.abandoned", sheet = self.id.get());
        }
        self.start(target, Transition::Settle);
        Ok(())
    }

    /// Route a header action. Close and escape both dismiss.
    pub fn handle_action(&mut self, action: SheetAction) -> Result<(), ConfigurationError> {
        if self.header.dismisses_on(action) {
            self.dismiss()
        } else {
            Ok(())
        }
    }

    /// Resolver offset for `position` against the captured surface height.
    pub fn offset_for(&self, position: Position) -> Result<f64, ConfigurationError> {
        self.surface_height
            .map(|height| offset_for_position(position, height, &self.config.coverage))
            .ok_or(ConfigurationError::NotPresented)
    }

    // --- drag --------------------------------------------------------------

    /// Feed one drag lifecycle event.
    ///
    /// Events arriving in a phase that does not accept drags are ignored.
    pub fn handle_drag(&mut self, event: DragEvent) -> Result<(), ConfigurationError> {
        match event {
            DragEvent::Began => self.drag_began(),
            DragEvent::Changed { translation_y } => self.drag_changed(translation_y),
            DragEvent::Ended { translation_y } => self.drag_ended(translation_y),
            DragEvent::Cancelled => self.drag_cancelled(),
        }
    }

    /// Snapshot the live offset as the drag origin.
    ///
    /// A settle animation in flight is superseded and never completes.
    pub fn drag_began(&mut self) -> Result<(), ConfigurationError> {
        if !self.phase.accepts_drag() {
            trace!(message = "sheet.drag.ignored", sheet = self.id.get(), phase = self.phase.as_str());
            return Ok(());
        }
        self.ensure_surface()?;
        if self.in_flight.take().is_some() {
            self.generation += 1;
            debug!(
                message = "sheet.animation.superseded",
                sheet = self.id.get(),
                generation = self.generation,
                by = "drag"
            );
        }
        self.drag.begin(self.current_offset);
        self.phase = SheetPhase::Dragging;
        Ok(())
    }

    /// Move the sheet to `origin + translation_y` and notify.
    ///
    /// Offsets are neither clamped nor animated.
    pub fn drag_changed(&mut self, translation_y: f64) -> Result<(), ConfigurationError> {
        if self.phase != SheetPhase::Dragging {
            return Ok(());
        }
        let Some(offset) = self.drag.offset_for(translation_y) else {
            return Ok(());
        };
        self.current_offset = offset;
        let id = self.id;
        self.surface_call(|surface| surface.set_sheet_offset(id, offset))?;
        self.observers.position_changed.notify(&offset);
        Ok(())
    }

    /// Resolve the released offset to a position and animate there.
    pub fn drag_ended(&mut self, translation_y: f64) -> Result<(), ConfigurationError> {
        if self.phase != SheetPhase::Dragging {
            return Ok(());
        }
        let Some(released) = self.drag.end(translation_y) else {
            return Ok(());
        };
        let height = self.surface_height.ok_or(ConfigurationError::NotPresented)?;
        self.current_offset = released;
        let id = self.id;
        self.surface_call(|surface| surface.set_sheet_offset(id, released))?;

        let target = position_for_coverage(
            coverage_for_offset(released, height),
            &self.config.coverage,
        );
        debug!(
            message = "sheet.drag.end",
            sheet = self.id.get(),
            released,
            target = %target
        );
        self.start(target, Transition::Settle);
        Ok(())
    }

    /// Abandon the drag and settle back to the last settled position.
    pub fn drag_cancelled(&mut self) -> Result<(), ConfigurationError> {
        if self.phase != SheetPhase::Dragging || self.drag.cancel().is_none() {
            return Ok(());
        }
        self.ensure_surface()?;
        let target = self
            .current_position
            .unwrap_or(self.config.initial_position);
        self.start(target, Transition::Settle);
        Ok(())
    }

    // --- time --------------------------------------------------------------

    /// Advance the in-flight animation by `dt` and push the offset to the
    /// surface. Completes the animation when its duration has elapsed.
    pub fn tick(&mut self, dt: Duration) {
        if self.in_flight.is_none() {
            return;
        }
        if !self.surface.as_ref().is_some_and(SurfaceRef::is_alive) {
            self.surface_lost();
            return;
        }
        let Some(flight) = self.in_flight.as_mut() else {
            return;
        };
        flight.animation.tick(dt);
        let offset = flight.animation.value();
        let finished = flight.animation.is_complete();

        self.current_offset = offset;
        let id = self.id;
        if self
            .surface_call(|surface| surface.set_sheet_offset(id, offset))
            .is_err()
        {
            return;
        }
        if finished {
            if let Some(done) = self.in_flight.take() {
                self.complete(done);
            }
        }
    }

    /// Advance using a host frame timestamp. The first frame after
    /// presentation advances by zero.
    pub fn tick_at(&mut self, now: Instant) {
        let dt = self.ticker.advance(now);
        self.tick(dt);
    }

    // --- accessors ---------------------------------------------------------

    #[must_use]
    pub fn id(&self) -> SheetId {
        self.id
    }

    #[must_use]
    pub fn header(&self) -> &SheetHeader {
        &self.header
    }

    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    #[must_use]
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> SheetPhase {
        self.phase
    }

    /// Live top offset.
    #[must_use]
    pub fn current_offset(&self) -> f64 {
        self.current_offset
    }

    /// Last position an animation settled into.
    #[must_use]
    pub fn current_position(&self) -> Option<Position> {
        self.current_position
    }

    /// Height captured at presentation.
    #[must_use]
    pub fn surface_height(&self) -> Option<f64> {
        self.surface_height
    }

    /// Number of animations started or superseded so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Target of the in-flight animation, if any.
    #[must_use]
    pub fn animation_target(&self) -> Option<Position> {
        self.in_flight.as_ref().map(|flight| flight.animation.target())
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    #[must_use]
    pub fn snapshot(&self) -> SheetSnapshot {
        SheetSnapshot {
            id: self.id,
            phase: self.phase,
            offset: self.current_offset,
            position: self.current_position,
            surface_height: self.surface_height,
            coverage: self
                .surface_height
                .map(|height| coverage_for_offset(self.current_offset, height)),
            generation: self.generation,
        }
    }

    // --- internals ---------------------------------------------------------

    fn animation_config(&self) -> AnimationConfig {
        if self.reduced_motion {
            AnimationConfig::reduced_motion()
        } else {
            self.config.animation
        }
    }

    fn start(&mut self, target: Position, transition: Transition) {
        let Some(height) = self.surface_height else {
            return;
        };
        self.generation += 1;
        if self.in_flight.take().is_some() {
            debug!(
                message = "sheet.animation.superseded",
                sheet = self.id.get(),
                generation = self.generation,
                target = %target
            );
        }
        let to = offset_for_position(target, height, &self.config.coverage);
        let animation = OffsetAnimation::new(
            self.current_offset,
            to,
            target,
            self.generation,
            &self.animation_config(),
        );
        self.in_flight = Some(InFlight {
            animation,
            transition,
        });
        self.phase = match (target, transition) {
            (Position::Dismissed, _) => SheetPhase::Dismissing,
            (_, Transition::Present) => SheetPhase::Presenting,
            (_, Transition::Settle) => SheetPhase::Settling,
        };
    }

    fn complete(&mut self, done: InFlight) {
        if done.animation.generation() != self.generation {
            trace!(
                message = "sheet.animation.stale",
                sheet = self.id.get(),
                generation = done.animation.generation()
            );
            return;
        }
        let target = done.animation.target();
        let offset = done.animation.to();
        let _span = debug_span!("sheet.settle", sheet = self.id.get(), position = %target).entered();

        self.current_offset = offset;
        self.current_position = Some(target);
        if self.fixed_height_pending && target.is_presentable() {
            self.fixed_height_pending = false;
            let id = self.id;
            if self
                .surface_call(|surface| surface.release_fixed_height(id))
                .is_err()
            {
                return;
            }
        }
        debug!(message = "sheet.settle", sheet = self.id.get(), position = %target, offset);

        match (done.transition, target) {
            (_, Position::Dismissed) => {
                self.observers.dismissed.notify(&());
                self.observers.position_changed.notify(&offset);
                self.detach();
            }
            (Transition::Present, _) => {
                self.phase = SheetPhase::Settled;
                self.observers.presented.notify(&());
                self.observers.position_changed.notify(&offset);
            }
            (Transition::Settle, Position::Expanded) => {
                self.phase = SheetPhase::Settled;
                self.observers.expanded.notify(&());
                self.observers.position_changed.notify(&offset);
            }
            (Transition::Settle, Position::Collapsed) => {
                self.phase = SheetPhase::Settled;
                self.observers.collapsed.notify(&());
                self.observers.position_changed.notify(&offset);
            }
        }
    }

    fn detach(&mut self) {
        let id = self.id;
        if let Some(surface) = self.surface.take() {
            if surface.with(|s| s.detach_sheet(id)).is_err() {
                trace!(message = "sheet.detach.surface_gone", sheet = id.get());
            }
        }
        self.teardown();
        debug!(message = "sheet.detach", sheet = id.get());
    }

    fn surface_lost(&mut self) {
        warn!(message = "sheet.surface_released", sheet = self.id.get(), phase = self.phase.as_str());
        self.surface = None;
        self.teardown();
    }

    fn teardown(&mut self) {
        self.phase = SheetPhase::Detached;
        self.in_flight = None;
        self.drag.cancel();
        self.ticker.reset();
        self.observers.clear();
        self.retained.clear();
    }

    fn ensure_surface(&mut self) -> Result<(), ConfigurationError> {
        match self.surface.as_ref().map(SurfaceRef::is_alive) {
            Some(true) => Ok(()),
            Some(false) => {
                self.surface_lost();
                Err(ConfigurationError::SurfaceReleased)
            }
            None => Err(ConfigurationError::NotPresented),
        }
    }

    fn surface_call<R>(
        &mut self,
        f: impl FnOnce(&mut dyn PresentingSurface) -> R,
    ) -> Result<R, ConfigurationError> {
        let result = match &self.surface {
            Some(surface) => surface.with(f),
            None => Err(ConfigurationError::NotPresented),
        };
        if matches!(result, Err(ConfigurationError::SurfaceReleased)) {
            self.surface_lost();
        }
        result
    }
}

impl<C> Drop for Sheet<C> {
    fn drop(&mut self) {
        if !self.phase.is_attached() {
            return;
        }
        if let Some(surface) = self.surface.take() {
            let id = self.id;
            surface.try_with(|s| s.detach_sheet(id));
        }
    }
}
