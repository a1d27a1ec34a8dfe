//! Graphics state tracked by the drawing context
//!
//! The PDF content stream keeps its own state through `q`/`Q`; this mirror
//! lets the context answer questions about the current transform and paint
//! without re-reading what it wrote.

use tiny_skia_path::Transform;
use crate::error::{Error, Result};

/// How text is painted (`Tr` operator)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDrawingMode {
    Fill,
    Invisible,
}

impl TextDrawingMode {
    /// Operand of the `Tr` operator
    pub fn render_mode(self) -> i64 {
        match self {
            TextDrawingMode::Fill => 0,
            TextDrawingMode::Invisible => 3,
        }
    }
}

/// RGB colour with components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
}

/// One level of the graphics state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphicsState {
    /// Current transformation matrix relative to the page
    pub ctm: Transform,
    pub fill_color: Rgb,
    /// Fill alpha from the fill colour
    pub fill_alpha: f32,
    /// Global alpha multiplied into every paint operation
    pub global_alpha: f32,
    pub text_mode: TextDrawingMode,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: Transform::identity(),
            fill_color: Rgb::BLACK,
            fill_alpha: 1.0,
            global_alpha: 1.0,
            text_mode: TextDrawingMode::Fill,
        }
    }
}

impl GraphicsState {
    /// Alpha actually applied to fills
    pub fn effective_fill_alpha(&self) -> f32 {
        self.fill_alpha * self.global_alpha
    }
}

/// Current graphics state plus the states saved beneath it
#[derive(Debug, Clone, Default)]
pub struct GraphicsStateStack {
    current: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl GraphicsStateStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &GraphicsState {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut GraphicsState {
        &mut self.current
    }

    /// Number of saved states
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub fn restore(&mut self) -> Result<()> {
        self.current = self.saved.pop().ok_or(Error::GraphicsStateUnderflow)?;
        Ok(())
    }

    /// Drop every saved state and start again from the default state
    pub fn reset(&mut self) {
        self.current = GraphicsState::default();
        self.saved.clear();
    }

    /// Apply a transform in user space, the way the `cm` operator does
    pub fn concat(&mut self, transform: Transform) {
        self.current.ctm = self.current.ctm.pre_concat(transform);
    }
}

/// Translation by (tx, ty)
pub fn translation(tx: f32, ty: f32) -> Transform {
    Transform::from_row(1.0, 0.0, 0.0, 1.0, tx, ty)
}

/// Counter-clockwise rotation by `angle` radians
pub fn rotation(angle: f32) -> Transform {
    let (sin, cos) = angle.sin_cos();
    Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0)
}

/// Scale by (sx, sy)
pub fn scale(sx: f32, sy: f32) -> Transform {
    Transform::from_row(sx, 0.0, 0.0, sy, 0.0, 0.0)
}

/// The six `cm` operands [a b c d e f] of a transform
pub fn matrix_operands(transform: &Transform) -> [f32; 6] {
    [
        transform.sx,
        transform.ky,
        transform.kx,
        transform.sy,
        transform.tx,
        transform.ty,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_save_restore_round_trip() {
        let mut stack = GraphicsStateStack::new();
        stack.save();
        stack.concat(translation(10.0, 20.0));
        stack.current_mut().global_alpha = 0.3;
        assert_eq!(stack.depth(), 1);

        stack.restore().unwrap();
        assert_eq!(stack.depth(), 0);
        assert_eq!(*stack.current(), GraphicsState::default());
    }

    #[test]
    fn test_restore_without_save() {
        let mut stack = GraphicsStateStack::new();
        assert!(matches!(stack.restore(), Err(Error::GraphicsStateUnderflow)));
    }

    #[test]
    fn test_rotations_accumulate() {
        let mut stack = GraphicsStateStack::new();
        stack.concat(translation(260.0, 200.0));
        for _ in 0..6 {
            stack.concat(rotation(2.0 * PI / 6.0));
        }

        // A full turn brings the transform back to the translation alone
        let ctm = stack.current().ctm;
        assert!(approx(ctm.sx, 1.0));
        assert!(approx(ctm.ky, 0.0));
        assert!(approx(ctm.kx, 0.0));
        assert!(approx(ctm.sy, 1.0));
        assert!(approx(ctm.tx, 260.0));
        assert!(approx(ctm.ty, 200.0));
    }

    #[test]
    fn test_translation_is_in_user_space() {
        let mut stack = GraphicsStateStack::new();
        stack.concat(rotation(PI / 2.0));
        stack.concat(translation(10.0, 0.0));

        // Moving along the rotated x axis goes up the page
        let ctm = stack.current().ctm;
        assert!(approx(ctm.tx, 0.0));
        assert!(approx(ctm.ty, 10.0));
    }

    #[test]
    fn test_matrix_operands_order() {
        let operands = matrix_operands(&rotation(PI / 6.0));
        assert!(approx(operands[0], (PI / 6.0).cos()));
        assert!(approx(operands[1], (PI / 6.0).sin()));
        assert!(approx(operands[2], -(PI / 6.0).sin()));
        assert!(approx(operands[3], (PI / 6.0).cos()));
    }

    #[test]
    fn test_effective_alpha() {
        let state = GraphicsState {
            fill_alpha: 0.5,
            global_alpha: 0.3,
            ..GraphicsState::default()
        };
        assert!(approx(state.effective_fill_alpha(), 0.15));
    }
}
