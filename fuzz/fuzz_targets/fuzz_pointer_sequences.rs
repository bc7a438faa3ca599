#![no_main]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use sheet_core::gesture::{PointerEvent, VerticalDragRecognizer};
use sheet_widgets::{PresentingSurface, Sheet, SheetId, SheetPhase};

#[derive(Debug, Arbitrary)]
enum Step {
    Down(i16),
    Move(i16),
    Up(i16),
    Cancel,
    Tick(u8),
    Dismiss,
    Expand,
}

#[derive(Default)]
struct CountingSurface {
    attached: usize,
}

impl PresentingSurface for CountingSurface {
    fn height(&self) -> f64 {
        1000.0
    }
    fn attach_sheet(&mut self, _id: SheetId, _offset: f64, _fixed_height: f64) {
        self.attached += 1;
    }
    fn set_sheet_offset(&mut self, _id: SheetId, offset: f64) {
        assert!(offset.is_finite(), "non-finite offset {offset}");
    }
    fn release_fixed_height(&mut self, _id: SheetId) {}
    fn detach_sheet(&mut self, _id: SheetId) {
        self.attached -= 1;
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(steps) = u.arbitrary::<Vec<Step>>() else {
        return;
    };

    let surface = Rc::new(RefCell::new(CountingSurface::default()));
    let mut sheet = Sheet::new(());
    if sheet.present(&surface).is_err() {
        return;
    }
    let mut recognizer = VerticalDragRecognizer::default();
    let mut last_generation = sheet.generation();

    for step in steps {
        let pointer = match step {
            Step::Down(y) => Some(PointerEvent::Down { y: f64::from(y) }),
            Step::Move(y) => Some(PointerEvent::Move { y: f64::from(y) }),
            Step::Up(y) => Some(PointerEvent::Up { y: f64::from(y) }),
            Step::Cancel => Some(PointerEvent::Cancel),
            Step::Tick(ms) => {
                sheet.tick(Duration::from_millis(u64::from(ms)));
                None
            }
            Step::Dismiss => {
                let _ = sheet.dismiss();
                None
            }
            Step::Expand => {
                let _ = sheet.animate_to(sheet_core::Position::Expanded);
                None
            }
        };
        if let Some(pointer) = pointer {
            for drag in recognizer.process(pointer) {
                let _ = sheet.handle_drag(drag);
            }
        }

        assert!(sheet.generation() >= last_generation, "generation went backwards");
        last_generation = sheet.generation();
        assert!(surface.borrow().attached <= 1);
        if sheet.phase() == SheetPhase::Detached {
            assert_eq!(surface.borrow().attached, 0);
        }
    }
});
