#![forbid(unsafe_code)]

//! Ordered capture of sheet notifications.

use std::cell::RefCell;
use std::rc::Rc;

use sheet_widgets::{Sheet, Subscription};

/// One notification delivered by a sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetEvent {
    Presented,
    Dismissed,
    Expanded,
    Collapsed,
    PositionChanged(f64),
}

impl SheetEvent {
    /// Single-line JSON form.
    #[must_use]
    pub fn to_json(&self) -> String {
        let value = match self {
            Self::Presented => serde_json::json!({ "event": "presented" }),
            Self::Dismissed => serde_json::json!({ "event": "dismissed" }),
            Self::Expanded => serde_json::json!({ "event": "expanded" }),
            Self::Collapsed => serde_json::json!({ "event": "collapsed" }),
            Self::PositionChanged(offset) => {
                serde_json::json!({ "event": "position_changed", "offset": offset })
            }
        };
        value.to_string()
    }
}

/// Subscribes to every notification of one sheet and keeps them in order.
///
/// The recorder holds the subscription guards; dropping it unsubscribes.
#[derive(Debug)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<SheetEvent>>>,
    _subscriptions: Vec<Subscription>,
}

impl EventRecorder {
    /// Subscribe to all five notifications of `sheet`.
    pub fn attach<C>(sheet: &mut Sheet<C>) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut subscriptions = Vec::with_capacity(5);

        let log = Rc::clone(&events);
        subscriptions.push(sheet.on_presented(move || log.borrow_mut().push(SheetEvent::Presented)));
        let log = Rc::clone(&events);
        subscriptions.push(sheet.on_dismissed(move || log.borrow_mut().push(SheetEvent::Dismissed)));
        let log = Rc::clone(&events);
        subscriptions.push(sheet.on_expanded(move || log.borrow_mut().push(SheetEvent::Expanded)));
        let log = Rc::clone(&events);
        subscriptions.push(sheet.on_collapsed(move || log.borrow_mut().push(SheetEvent::Collapsed)));
        let log = Rc::clone(&events);
        subscriptions.push(sheet.on_position_changed(move |offset| {
            log.borrow_mut().push(SheetEvent::PositionChanged(offset));
        }));

        Self {
            events,
            _subscriptions: subscriptions,
        }
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<SheetEvent> {
        self.events.borrow().clone()
    }

    /// Drain the record.
    pub fn take(&self) -> Vec<SheetEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Lifecycle events only, without position changes.
    #[must_use]
    pub fn lifecycle(&self) -> Vec<SheetEvent> {
        self.events
            .borrow()
            .iter()
            .copied()
            .filter(|e| !matches!(e, SheetEvent::PositionChanged(_)))
            .collect()
    }

    /// Offsets from position-changed events, in order.
    #[must_use]
    pub fn offsets(&self) -> Vec<f64> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                SheetEvent::PositionChanged(offset) => Some(*offset),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn count(&self, event: SheetEvent) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    /// JSONL lines for the whole record.
    #[must_use]
    pub fn to_jsonl(&self) -> Vec<String> {
        self.events.borrow().iter().map(SheetEvent::to_json).collect()
    }
}
