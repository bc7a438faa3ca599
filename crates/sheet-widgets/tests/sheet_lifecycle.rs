#![forbid(unsafe_code)]

//! End-to-end sheet lifecycles against a recording surface.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use sheet_core::animation::AnimationConfig;
use sheet_core::gesture::{PointerEvent, VerticalDragRecognizer};
use sheet_core::{ConfigurationError, Position};
use sheet_harness::{EventRecorder, FrameClock, RecordingSurface, SheetEvent, SurfaceOp};
use sheet_widgets::{Sheet, SheetPhase};

const MAX_FRAMES: usize = 500;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn settled_sheet(surface: &Rc<RefCell<RecordingSurface>>) -> (Sheet, FrameClock) {
    let mut sheet = Sheet::new(());
    let mut clock = FrameClock::new(Duration::from_millis(16));
    sheet.present(surface).expect("present");
    clock
        .run_until_idle(&mut sheet, MAX_FRAMES)
        .expect("presentation settles");
    (sheet, clock)
}

#[test]
fn presentation_attaches_offscreen_then_settles_collapsed() {
    let surface = RecordingSurface::shared(1000.0);
    let mut sheet = Sheet::new(());
    let recorder = EventRecorder::attach(&mut sheet);
    sheet.present(&surface).expect("present");
    let id = sheet.id();

    FrameClock::new(Duration::from_millis(16))
        .run_until_idle(&mut sheet, MAX_FRAMES)
        .expect("settles");

    let ops = surface.borrow().ops().to_vec();
    assert_eq!(
        ops.first(),
        Some(&SurfaceOp::Attach {
            sheet: id,
            offset: 1000.0,
            fixed_height: 1000.0
        })
    );
    assert_eq!(
        ops.last(),
        Some(&SurfaceOp::ReleaseFixedHeight { sheet: id })
    );
    assert_eq!(
        recorder.events(),
        vec![SheetEvent::Presented, SheetEvent::PositionChanged(500.0)]
    );
    assert_eq!(sheet.current_position(), Some(Position::Collapsed));
    assert_eq!(surface.borrow().offset_of(id), Some(500.0));
}

#[test]
fn drag_up_from_collapsed_expands() {
    let surface = RecordingSurface::shared(1000.0);
    let (mut sheet, mut clock) = settled_sheet(&surface);
    let recorder = EventRecorder::attach(&mut sheet);

    let mut recognizer = VerticalDragRecognizer::default();
    let mut feed = |sheet: &mut Sheet, event: PointerEvent| {
        for drag in recognizer.process(event) {
            sheet.handle_drag(drag).expect("drag event");
        }
    };
    feed(&mut sheet, PointerEvent::Down { y: 600.0 });
    feed(&mut sheet, PointerEvent::Move { y: 300.0 });
    assert_eq!(sheet.phase(), SheetPhase::Dragging);
    assert_eq!(sheet.current_offset(), 200.0);
    feed(&mut sheet, PointerEvent::Up { y: 300.0 });

    clock
        .run_until_idle(&mut sheet, MAX_FRAMES)
        .expect("settles");

    let events = recorder.events();
    assert_eq!(events[0], SheetEvent::PositionChanged(200.0));
    assert_eq!(events[1], SheetEvent::Expanded);
    match events[2] {
        SheetEvent::PositionChanged(offset) => assert!(approx(offset, 100.0), "{offset}"),
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(events.len(), 3);
    assert_eq!(sheet.current_position(), Some(Position::Expanded));
}

#[test]
fn drag_updates_fire_synchronously_per_update() {
    let surface = RecordingSurface::shared(800.0);
    let (mut sheet, _clock) = settled_sheet(&surface);
    let recorder = EventRecorder::attach(&mut sheet);

    sheet.drag_began().expect("begin");
    for t in [-10.0, -20.0, 35.0, 1000.0] {
        sheet.drag_changed(t).expect("update");
    }
    assert_eq!(recorder.offsets(), vec![390.0, 380.0, 435.0, 1400.0]);
    assert_eq!(
        surface.borrow().offsets_for(sheet.id()).last(),
        Some(&1400.0)
    );
}

#[test]
fn dismissal_detaches_and_present_fails() {
    let surface = RecordingSurface::shared(1000.0);
    let (mut sheet, mut clock) = settled_sheet(&surface);
    let recorder = EventRecorder::attach(&mut sheet);

    sheet.dismiss().expect("dismiss");
    clock
        .run_until_idle(&mut sheet, MAX_FRAMES)
        .expect("settles");

    assert_eq!(
        recorder.events(),
        vec![SheetEvent::Dismissed, SheetEvent::PositionChanged(1000.0)]
    );
    assert_eq!(sheet.phase(), SheetPhase::Detached);
    assert_eq!(surface.borrow().attached_count(), 0);
    assert_eq!(sheet.present(&surface), Err(ConfigurationError::Detached));
}

#[test]
fn superseding_animation_continues_from_live_offset() {
    let surface = RecordingSurface::shared(1000.0);
    let (mut sheet, mut clock) = settled_sheet(&surface);
    let recorder = EventRecorder::attach(&mut sheet);

    sheet.animate_to(Position::Expanded).expect("expand");
    clock.drive(&mut sheet, 1);
    clock.drive(&mut sheet, 5);
    let live = sheet.current_offset();
    assert!(live < 500.0 && live > 0.0, "{live}");

    sheet.dismiss().expect("dismiss");
    let next = clock.advance();
    sheet.tick_at(next);
    let first = surface
        .borrow()
        .offsets_for(sheet.id())
        .last()
        .copied()
        .expect("offset pushed");
    assert!((first - live).abs() < 100.0, "jumped from {live} to {first}");

    clock
        .run_until_idle(&mut sheet, MAX_FRAMES)
        .expect("settles");
    assert_eq!(recorder.lifecycle(), vec![SheetEvent::Dismissed]);
}

#[test]
fn instant_animations_complete_on_next_tick() {
    let surface = RecordingSurface::shared(640.0);
    let mut sheet = Sheet::new(());
    sheet
        .set_animation_config(AnimationConfig::instant())
        .expect("instant");
    sheet
        .set_initial_position(Position::Expanded)
        .expect("expanded");
    sheet.present(&surface).expect("present");
    sheet.tick(Duration::ZERO);
    assert_eq!(sheet.current_position(), Some(Position::Expanded));
    assert!(approx(sheet.current_offset(), 64.0));
}
