/// Viewport rectangle in physical window pixels (top-left origin).
///
/// The origin may be negative when a configured screen offset pushes the
/// drawable area past the window edge; use [`ViewportRect::clip_to`] before
/// handing the rectangle to the GPU.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ViewportRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ViewportRect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(self) -> i64 {
        self.y as i64 + self.height as i64
    }

    #[inline]
    pub fn intersect(self, other: ViewportRect) -> Option<ViewportRect> {
        let x0 = (self.x as i64).max(other.x as i64);
        let y0 = (self.y as i64).max(other.y as i64);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(ViewportRect::new(
                x0 as i32,
                y0 as i32,
                (x1 - x0) as u32,
                (y1 - y0) as u32,
            ))
        }
    }

    /// Clips the rectangle to a `width` x `height` render target.
    ///
    /// Returns `None` when nothing of the viewport is visible.
    #[inline]
    pub fn clip_to(self, width: u32, height: u32) -> Option<ViewportRect> {
        self.intersect(ViewportRect::from_size(width, height))
    }

    /// Returns `true` if the rectangle lies entirely inside a `width` x `height` target.
    #[inline]
    pub fn fits_within(self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= width as i64 && self.bottom() <= height as i64
    }
}
