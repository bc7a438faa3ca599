#![forbid(unsafe_code)]

//! A presenting surface that records every call.

use std::cell::RefCell;
use std::rc::Rc;

use sheet_widgets::{PresentingSurface, SheetId};

/// One call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Attach {
        sheet: SheetId,
        offset: f64,
        fixed_height: f64,
    },
    Offset {
        sheet: SheetId,
        offset: f64,
    },
    ReleaseFixedHeight {
        sheet: SheetId,
    },
    Detach {
        sheet: SheetId,
    },
}

impl SurfaceOp {
    /// Sheet addressed by this call.
    #[must_use]
    pub fn sheet(&self) -> SheetId {
        match self {
            Self::Attach { sheet, .. }
            | Self::Offset { sheet, .. }
            | Self::ReleaseFixedHeight { sheet }
            | Self::Detach { sheet } => *sheet,
        }
    }

    /// Single-line JSON form.
    #[must_use]
    pub fn to_json(&self) -> String {
        let value = match self {
            Self::Attach {
                sheet,
                offset,
                fixed_height,
            } => serde_json::json!({
                "op": "attach",
                "sheet": sheet.get(),
                "offset": offset,
                "fixed_height": fixed_height,
            }),
            Self::Offset { sheet, offset } => serde_json::json!({
                "op": "offset",
                "sheet": sheet.get(),
                "offset": offset,
            }),
            Self::ReleaseFixedHeight { sheet } => serde_json::json!({
                "op": "release_fixed_height",
                "sheet": sheet.get(),
            }),
            Self::Detach { sheet } => serde_json::json!({
                "op": "detach",
                "sheet": sheet.get(),
            }),
        };
        value.to_string()
    }
}

/// Surface with a fixed height that logs calls and tracks attached sheets.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    height: f64,
    ops: Vec<SurfaceOp>,
    attached: Vec<(SheetId, f64)>,
    max_attached: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(height: f64) -> Self {
        Self {
            height,
            ops: Vec::new(),
            attached: Vec::new(),
            max_attached: 0,
        }
    }

    /// Wrap in the shared handle sheets expect.
    #[must_use]
    pub fn shared(height: f64) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(height)))
    }

    /// Change the reported height. Sheets only read it at presentation.
    pub fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Drain the log.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Offsets pushed for `sheet`, in order.
    #[must_use]
    pub fn offsets_for(&self, sheet: SheetId) -> Vec<f64> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Offset { sheet: s, offset } if *s == sheet => Some(*offset),
                _ => None,
            })
            .collect()
    }

    /// Current offset of an attached sheet.
    #[must_use]
    pub fn offset_of(&self, sheet: SheetId) -> Option<f64> {
        self.attached
            .iter()
            .find(|(id, _)| *id == sheet)
            .map(|(_, offset)| *offset)
    }

    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Most sheets ever attached at the same time.
    #[must_use]
    pub fn max_attached(&self) -> usize {
        self.max_attached
    }

    /// JSONL lines for the whole log.
    #[must_use]
    pub fn to_jsonl(&self) -> Vec<String> {
        self.ops.iter().map(SurfaceOp::to_json).collect()
    }
}

impl PresentingSurface for RecordingSurface {
    fn height(&self) -> f64 {
        self.height
    }

    fn attach_sheet(&mut self, id: SheetId, offset: f64, fixed_height: f64) {
        self.ops.push(SurfaceOp::Attach {
            sheet: id,
            offset,
            fixed_height,
        });
        self.attached.push((id, offset));
        self.max_attached = self.max_attached.max(self.attached.len());
    }

    fn set_sheet_offset(&mut self, id: SheetId, offset: f64) {
        self.ops.push(SurfaceOp::Offset { sheet: id, offset });
        if let Some(entry) = self.attached.iter_mut().find(|(s, _)| *s == id) {
            entry.1 = offset;
        }
    }

    fn release_fixed_height(&mut self, id: SheetId) {
        self.ops.push(SurfaceOp::ReleaseFixedHeight { sheet: id });
    }

    fn detach_sheet(&mut self, id: SheetId) {
        self.ops.push(SurfaceOp::Detach { sheet: id });
        self.attached.retain(|(s, _)| *s != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_widgets::Sheet;

    #[test]
    fn tracks_attach_offset_detach() {
        let surface = RecordingSurface::shared(400.0);
        let mut sheet = Sheet::new(());
        sheet.present(&surface).expect("present");
        let id = sheet.id();
        assert_eq!(surface.borrow().attached_count(), 1);
        assert_eq!(surface.borrow().offset_of(id), Some(400.0));
        drop(sheet);
        assert_eq!(surface.borrow().attached_count(), 0);
        assert_eq!(surface.borrow().max_attached(), 1);
    }

    #[test]
    fn jsonl_names_each_op() {
        let surface = RecordingSurface::shared(400.0);
        let mut sheet = Sheet::new(());
        sheet.present(&surface).expect("present");
        let lines = surface.borrow().to_jsonl();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\"op\":\"attach\""), "{}", lines[0]);
        assert!(lines[0].contains("\"fixed_height\":400.0"), "{}", lines[0]);
    }

    #[test]
    fn take_ops_drains() {
        let surface = RecordingSurface::shared(400.0);
        let mut sheet = Sheet::new(());
        sheet.present(&surface).expect("present");
        assert_eq!(surface.borrow_mut().take_ops().len(), 1);
        assert!(surface.borrow().ops().is_empty());
    }
}
