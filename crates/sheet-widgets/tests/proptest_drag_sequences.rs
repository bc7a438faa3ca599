#![forbid(unsafe_code)]

//! Property tests for drag-driven settling.

use std::time::Duration;

use proptest::prelude::*;
use sheet_core::animation::AnimationConfig;
use sheet_core::position::position_for_offset;
use sheet_core::{CoverageConfig, Position};
use sheet_harness::{EventRecorder, FrameClock, RecordingSurface, SheetEvent};
use sheet_widgets::{Sheet, SheetPhase};

fn coverage() -> impl Strategy<Value = CoverageConfig> {
    (0.05f64..0.9, 0.05f64..=1.0).prop_filter_map("ordered coverage", |(collapsed, t)| {
        CoverageConfig::new(collapsed, collapsed + (1.0 - collapsed) * t).ok()
    })
}

fn settle_event(position: Position) -> SheetEvent {
    match position {
        Position::Dismissed => SheetEvent::Dismissed,
        Position::Collapsed => SheetEvent::Collapsed,
        Position::Expanded => SheetEvent::Expanded,
    }
}

proptest! {
    #[test]
    fn released_drag_settles_where_the_resolver_says(
        height in 100.0f64..2000.0,
        coverage in coverage(),
        updates in prop::collection::vec(-2500.0f64..2500.0, 1..12),
        fast in any::<bool>(),
    ) {
        let surface = RecordingSurface::shared(height);
        let mut sheet = Sheet::new(());
        sheet.set_coverage(coverage);
        if fast {
            sheet.set_animation_config(AnimationConfig::instant()).expect("instant");
        }
        sheet.present(&surface).expect("present");
        let mut clock = FrameClock::new(Duration::from_millis(16));
        clock.run_until_idle(&mut sheet, 1000).expect("presentation settles");

        let recorder = EventRecorder::attach(&mut sheet);
        let origin = sheet.current_offset();
        sheet.drag_began().expect("begin");
        for t in &updates {
            sheet.drag_changed(*t).expect("update");
        }
        let expected_live: Vec<f64> = updates.iter().map(|t| origin + t).collect();
        prop_assert_eq!(recorder.offsets(), expected_live);

        let last = *updates.last().expect("non-empty");
        sheet.drag_ended(last).expect("end");
        let target = position_for_offset(origin + last, height, &coverage);
        prop_assert_eq!(sheet.animation_target(), Some(target));

        clock.run_until_idle(&mut sheet, 1000).expect("settles");
        let final_offset = sheet.offset_for(target).expect("height captured");
        prop_assert_eq!(sheet.current_position(), Some(target));
        prop_assert_eq!(sheet.current_offset(), final_offset);

        let tail: Vec<SheetEvent> = recorder.events().split_off(updates.len());
        prop_assert_eq!(tail, vec![settle_event(target), SheetEvent::PositionChanged(final_offset)]);
        if target == Position::Dismissed {
            prop_assert_eq!(sheet.phase(), SheetPhase::Detached);
            prop_assert_eq!(surface.borrow().attached_count(), 0);
        } else {
            prop_assert_eq!(sheet.phase(), SheetPhase::Settled);
        }
    }

    #[test]
    fn repeated_retargeting_fires_only_the_last_completion(
        targets in prop::collection::vec(prop_oneof![
            Just(Position::Collapsed),
            Just(Position::Expanded),
        ], 1..8),
        frames_between in 0usize..5,
    ) {
        let surface = RecordingSurface::shared(900.0);
        let mut sheet = Sheet::new(());
        sheet.present(&surface).expect("present");
        let mut clock = FrameClock::new(Duration::from_millis(16));
        clock.run_until_idle(&mut sheet, 1000).expect("presentation settles");
        let recorder = EventRecorder::attach(&mut sheet);

        for target in &targets {
            sheet.animate_to(*target).expect("animate");
            for _ in 0..frames_between {
                sheet.tick(clock.step());
            }
        }
        clock.run_until_idle(&mut sheet, 1000).expect("settles");

        let last = *targets.last().expect("non-empty");
        prop_assert_eq!(recorder.lifecycle(), vec![settle_event(last)]);
        prop_assert_eq!(recorder.offsets().len(), 1);
        prop_assert_eq!(sheet.current_position(), Some(last));
    }
}
