//! Page geometry calculations
//!
//! Page boxes are [`tiny_skia_path::Rect`] values in PDF user space (points,
//! origin at the bottom-left corner, y growing upwards). tiny-skia names the
//! lower y edge `top()`, so code here sticks to `x()`, `y()`, `width()` and
//! `height()`.

use tiny_skia_path::Rect;

/// Page dimensions in points (1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
}

impl PageDimensions {
    /// US Letter size (8.5" × 11")
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
        }
    }

    /// The page as a box anchored at the origin
    pub fn to_rect(self) -> Option<Rect> {
        Rect::from_xywh(0.0, 0.0, self.width, self.height)
    }
}

/// Build a box from the four numbers of a PDF rectangle array.
///
/// PDF allows any two opposite corners, so the corners are sorted first.
pub fn rect_from_corners(llx: f32, lly: f32, urx: f32, ury: f32) -> Option<Rect> {
    Rect::from_ltrb(llx.min(urx), lly.min(ury), llx.max(urx), lly.max(ury))
}

/// Move a box so its origin sits at (0, 0), keeping its size
pub fn normalize_origin(rect: Rect) -> Rect {
    Rect::from_xywh(0.0, 0.0, rect.width(), rect.height()).unwrap_or(rect)
}

/// Whole-pixel size enclosing a box at 1 pixel per point
pub fn pixel_size(rect: Rect) -> (u32, u32) {
    (
        rect.width().ceil().max(1.0) as u32,
        rect.height().ceil().max(1.0) as u32,
    )
}

/// Angle of the diagonal from the lower-left to the upper-right corner, in radians
pub fn diagonal_angle(rect: Rect) -> f32 {
    (rect.height() / rect.width()).atan()
}

/// Centre point of a box
pub fn center(rect: Rect) -> (f32, f32) {
    (
        rect.x() + rect.width() / 2.0,
        rect.y() + rect.height() / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_size() {
        let letter = PageDimensions::letter();
        assert_eq!(letter.width, 612.0);
        assert_eq!(letter.height, 792.0);

        let rect = letter.to_rect().unwrap();
        assert_eq!(rect.x(), 0.0);
        assert_eq!(rect.width(), 612.0);
    }

    #[test]
    fn test_rect_from_swapped_corners() {
        let rect = rect_from_corners(612.0, 792.0, 0.0, 0.0).unwrap();
        assert_eq!(rect.x(), 0.0);
        assert_eq!(rect.y(), 0.0);
        assert_eq!(rect.width(), 612.0);
        assert_eq!(rect.height(), 792.0);
    }

    #[test]
    fn test_normalize_origin() {
        let rect = rect_from_corners(10.0, 20.0, 110.0, 220.0).unwrap();
        let normalized = normalize_origin(rect);
        assert_eq!(normalized.x(), 0.0);
        assert_eq!(normalized.y(), 0.0);
        assert_eq!(normalized.width(), 100.0);
        assert_eq!(normalized.height(), 200.0);
    }

    #[test]
    fn test_pixel_size_rounds_up() {
        let rect = Rect::from_xywh(0.0, 0.0, 612.0, 792.0).unwrap();
        assert_eq!(pixel_size(rect), (612, 792));

        let rect = Rect::from_xywh(0.0, 0.0, 595.28, 841.89).unwrap();
        assert_eq!(pixel_size(rect), (596, 842));
    }

    #[test]
    fn test_diagonal_angle() {
        let square = Rect::from_xywh(0.0, 0.0, 100.0, 100.0).unwrap();
        assert!((diagonal_angle(square) - std::f32::consts::FRAC_PI_4).abs() < 1e-6);

        let letter = PageDimensions::letter().to_rect().unwrap();
        assert!((diagonal_angle(letter) - (792.0f32 / 612.0).atan()).abs() < 1e-6);
    }

    #[test]
    fn test_center() {
        let rect = Rect::from_xywh(0.0, 0.0, 612.0, 792.0).unwrap();
        assert_eq!(center(rect), (306.0, 396.0));
    }
}
