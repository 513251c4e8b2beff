use glam::{Mat4, Vec2};

use crate::coords::ViewportRect;

use super::{Rotation, ScreenGeometry};

/// How configured screen offsets affect the viewport.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum OffsetPolicy {
    /// Shift the viewport by the offsets inside the window.
    #[default]
    Honor,
    /// Anchor the viewport at the window origin; offsets are reported but unused.
    Ignore,
}

/// The part of a [`Projection`] that lands on a render target.
///
/// `matrix` maps logical coordinates to clip space relative to `viewport`,
/// so content outside the target is cropped, never rescaled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VisibleProjection {
    pub viewport: ViewportRect,
    pub matrix: Mat4,
}

/// Viewport plus the matrices mapping logical screen coordinates to clip space.
///
/// The transform is `ortho * rotate(z) * translate(anchor)`:
/// - `ortho` maps `(0,0)..(unrotated_w, unrotated_h)` to clip space, +Y down,
///   with near/far at `-1.0`/`1.0`
/// - the rotation turns the logical screen clockwise by the configured steps
/// - the anchor translation re-seats the rotated screen inside the viewport
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    viewport: ViewportRect,
    rotation: Rotation,
    translation: Vec2,
    ortho: Mat4,
}

impl Projection {
    pub fn new(geometry: &ScreenGeometry, policy: OffsetPolicy) -> Self {
        let width = geometry.unrotated_width();
        let height = geometry.unrotated_height();

        let viewport = match policy {
            OffsetPolicy::Honor => ViewportRect::new(
                geometry.screen_offset_x(),
                geometry.screen_offset_y(),
                width,
                height,
            ),
            OffsetPolicy::Ignore => ViewportRect::from_size(width, height),
        };

        let ortho = Mat4::orthographic_rh(
            0.0,
            width.max(1) as f32,
            height.max(1) as f32,
            0.0,
            -1.0,
            1.0,
        );

        let rotation = geometry.rotation();
        let translation =
            rotation.anchor_translation(geometry.screen_width(), geometry.screen_height());

        Self {
            viewport,
            rotation,
            translation,
            ortho,
        }
    }

    /// Viewport in physical window pixels, top-left origin.
    #[inline]
    pub fn viewport(&self) -> ViewportRect {
        self.viewport
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Anchor translation in post-swap logical units.
    #[inline]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    #[inline]
    pub fn ortho(&self) -> Mat4 {
        self.ortho
    }

    /// Logical screen space to unrotated viewport pixels.
    pub fn model(&self) -> Mat4 {
        Mat4::from_rotation_z(self.rotation.radians())
            * Mat4::from_translation(self.translation.extend(0.0))
    }

    /// Full logical-to-clip transform uploaded to shaders.
    pub fn matrix(&self) -> Mat4 {
        self.ortho * self.model()
    }

    /// Crops the projection to a `width` x `height` render target.
    ///
    /// The ortho bounds shrink with the viewport, so every logical point keeps
    /// the window pixel it has in the uncropped viewport. Returns `None` when
    /// no part of the viewport is on the target.
    pub fn visible_on(&self, width: u32, height: u32) -> Option<VisibleProjection> {
        let requested = self.viewport;
        let viewport = requested.clip_to(width, height)?;
        if viewport == requested {
            return Some(VisibleProjection {
                viewport,
                matrix: self.matrix(),
            });
        }

        let (rx, ry) = (requested.x as i64, requested.y as i64);
        let ortho = Mat4::orthographic_rh(
            (viewport.x as i64 - rx) as f32,
            (viewport.right() - rx) as f32,
            (viewport.bottom() - ry) as f32,
            (viewport.y as i64 - ry) as f32,
            -1.0,
            1.0,
        );

        Some(VisibleProjection {
            viewport,
            matrix: ortho * self.model(),
        })
    }

    /// Maps a logical point to unrotated viewport pixels.
    pub fn to_viewport(&self, logical: Vec2) -> Vec2 {
        self.model().transform_point3(logical.extend(0.0)).truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::geometry::resolve_geometry;

    const EPS: f32 = 1e-3;

    fn geometry(rotation: Rotation) -> ScreenGeometry {
        let config = DisplayConfig {
            window_width: Some(800),
            window_height: Some(600),
            rotation,
            ..Default::default()
        };
        resolve_geometry(&config, (800, 600))
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < EPS
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn no_rotation_is_plain_ortho() {
        let p = Projection::new(&geometry(Rotation::Deg0), OffsetPolicy::Honor);
        assert_eq!(p.viewport(), ViewportRect::new(0, 0, 800, 600));
        assert_eq!(p.rotation().degrees(), 0);
        assert_eq!(p.translation(), Vec2::ZERO);
        assert!(p.model().abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn quarter_turn_uses_unrotated_viewport() {
        let g = geometry(Rotation::Deg90);
        assert_eq!((g.window_width(), g.window_height()), (600, 800));
        assert_eq!((g.screen_width(), g.screen_height()), (600, 800));

        let p = Projection::new(&g, OffsetPolicy::Honor);
        assert_eq!(p.viewport(), ViewportRect::new(0, 0, 800, 600));
        assert_eq!(p.rotation().degrees(), 90);
        assert_eq!(p.translation(), Vec2::new(0.0, -800.0));
    }

    #[test]
    fn half_turn_translates_both_axes() {
        let p = Projection::new(&geometry(Rotation::Deg180), OffsetPolicy::Honor);
        assert_eq!(p.rotation().degrees(), 180);
        assert_eq!(p.translation(), Vec2::new(-800.0, -600.0));
    }

    #[test]
    fn three_quarter_turn_translates_x() {
        let p = Projection::new(&geometry(Rotation::Deg270), OffsetPolicy::Honor);
        assert_eq!(p.rotation().degrees(), 270);
        assert_eq!(p.translation(), Vec2::new(-600.0, 0.0));
    }

    // ── corner mapping ────────────────────────────────────────────────────

    /// Where the logical top-left lands for each clockwise turn.
    #[test]
    fn logical_origin_follows_clockwise_turn() {
        let expected = [
            (Rotation::Deg0, Vec2::new(0.0, 0.0)),
            (Rotation::Deg90, Vec2::new(800.0, 0.0)),
            (Rotation::Deg180, Vec2::new(800.0, 600.0)),
            (Rotation::Deg270, Vec2::new(0.0, 600.0)),
        ];
        for (rotation, corner) in expected {
            let p = Projection::new(&geometry(rotation), OffsetPolicy::Honor);
            let got = p.to_viewport(Vec2::ZERO);
            assert!(approx(got, corner), "{rotation:?}: origin mapped to {got}");
        }
    }

    #[test]
    fn logical_corners_cover_viewport_for_every_rotation() {
        let viewport_corners = [
            Vec2::new(0.0, 0.0),
            Vec2::new(800.0, 0.0),
            Vec2::new(0.0, 600.0),
            Vec2::new(800.0, 600.0),
        ];

        for rotation in Rotation::ALL {
            let g = geometry(rotation);
            let p = Projection::new(&g, OffsetPolicy::Honor);
            let (w, h) = (g.screen_width() as f32, g.screen_height() as f32);

            for logical in [
                Vec2::new(0.0, 0.0),
                Vec2::new(w, 0.0),
                Vec2::new(0.0, h),
                Vec2::new(w, h),
            ] {
                let mapped = p.to_viewport(logical);
                assert!(
                    viewport_corners.iter().any(|c| approx(*c, mapped)),
                    "{rotation:?}: {logical} mapped to {mapped}, outside the viewport corners"
                );
            }
        }
    }

    #[test]
    fn logical_x_axis_runs_down_after_quarter_turn() {
        let p = Projection::new(&geometry(Rotation::Deg90), OffsetPolicy::Honor);
        let a = p.to_viewport(Vec2::new(0.0, 0.0));
        let b = p.to_viewport(Vec2::new(100.0, 0.0));
        assert!(approx(b - a, Vec2::new(0.0, 100.0)));
    }

    // ── clip space ────────────────────────────────────────────────────────

    #[test]
    fn top_left_maps_to_clip_top_left() {
        let p = Projection::new(&geometry(Rotation::Deg0), OffsetPolicy::Honor);
        let clip = p.matrix().project_point3(glam::Vec3::ZERO);
        assert!((clip.x + 1.0).abs() < EPS);
        assert!((clip.y - 1.0).abs() < EPS);
        assert!((0.0..=1.0).contains(&clip.z));
    }

    #[test]
    fn bottom_right_maps_to_clip_bottom_right() {
        let p = Projection::new(&geometry(Rotation::Deg0), OffsetPolicy::Honor);
        let clip = p.matrix().project_point3(glam::Vec3::new(800.0, 600.0, 0.0));
        assert!((clip.x - 1.0).abs() < EPS);
        assert!((clip.y + 1.0).abs() < EPS);
    }

    // ── offsets ───────────────────────────────────────────────────────────

    fn offset_geometry() -> ScreenGeometry {
        let config = DisplayConfig {
            window_width: Some(800),
            window_height: Some(600),
            screen_width: Some(640),
            screen_height: Some(480),
            screen_offset_x: 80,
            screen_offset_y: 60,
            ..Default::default()
        };
        resolve_geometry(&config, (800, 600))
    }

    #[test]
    fn honored_offsets_shift_viewport() {
        let p = Projection::new(&offset_geometry(), OffsetPolicy::Honor);
        assert_eq!(p.viewport(), ViewportRect::new(80, 60, 640, 480));
    }

    #[test]
    fn ignored_offsets_anchor_viewport_at_origin() {
        let p = Projection::new(&offset_geometry(), OffsetPolicy::Ignore);
        assert_eq!(p.viewport(), ViewportRect::new(0, 0, 640, 480));
    }

    /// Logical point to window pixels the way the GPU resolves it: clip space
    /// through the cropped matrix, then the viewport transform.
    fn to_window(visible: &VisibleProjection, logical: Vec2) -> Vec2 {
        let clip = visible.matrix.project_point3(logical.extend(0.0));
        let vp = visible.viewport;
        Vec2::new(
            vp.x as f32 + (clip.x + 1.0) * 0.5 * vp.width as f32,
            vp.y as f32 + (1.0 - clip.y) * 0.5 * vp.height as f32,
        )
    }

    fn near_pixel(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 0.01
    }

    fn overflowing_offset_geometry(rotation: Rotation) -> ScreenGeometry {
        let config = DisplayConfig {
            window_width: Some(800),
            window_height: Some(600),
            screen_offset_x: 80,
            screen_offset_y: 60,
            rotation,
            ..Default::default()
        };
        resolve_geometry(&config, (800, 600))
    }

    #[test]
    fn contained_viewport_keeps_full_matrix() {
        let p = Projection::new(&offset_geometry(), OffsetPolicy::Honor);
        let visible = p.visible_on(800, 600).unwrap();
        assert_eq!(visible.viewport, ViewportRect::new(80, 60, 640, 480));
        assert_eq!(visible.matrix, p.matrix());
    }

    #[test]
    fn overflowing_offset_crops_instead_of_scaling() {
        let p = Projection::new(&overflowing_offset_geometry(Rotation::Deg0), OffsetPolicy::Honor);
        assert_eq!(p.viewport(), ViewportRect::new(80, 60, 800, 600));

        let visible = p.visible_on(800, 600).unwrap();
        assert_eq!(visible.viewport, ViewportRect::new(80, 60, 720, 540));

        for (logical, pixel) in [
            (Vec2::new(0.0, 0.0), Vec2::new(80.0, 60.0)),
            (Vec2::new(400.0, 300.0), Vec2::new(480.0, 360.0)),
            (Vec2::new(720.0, 540.0), Vec2::new(800.0, 600.0)),
        ] {
            let got = to_window(&visible, logical);
            assert!(near_pixel(got, pixel), "{logical} landed at {got}, expected {pixel}");
        }
    }

    #[test]
    fn overflowing_offset_crops_rotated_screen() {
        let g = overflowing_offset_geometry(Rotation::Deg90);
        let p = Projection::new(&g, OffsetPolicy::Honor);
        let visible = p.visible_on(800, 600).unwrap();
        assert_eq!(visible.viewport, ViewportRect::new(80, 60, 720, 540));

        // Each logical point keeps the pixel of the uncropped viewport.
        for logical in [
            Vec2::new(200.0, 750.0),
            Vec2::new(300.0, 400.0),
            Vec2::new(500.0, 100.0),
        ] {
            let expected = p.to_viewport(logical) + Vec2::new(80.0, 60.0);
            let got = to_window(&visible, logical);
            assert!(near_pixel(got, expected), "{logical} landed at {got}, expected {expected}");
        }
    }

    #[test]
    fn viewport_off_target_is_invisible() {
        let config = DisplayConfig {
            window_width: Some(800),
            window_height: Some(600),
            screen_offset_x: 900,
            ..Default::default()
        };
        let p = Projection::new(&resolve_geometry(&config, (800, 600)), OffsetPolicy::Honor);
        assert!(p.visible_on(800, 600).is_none());
    }

    #[test]
    fn degenerate_screen_keeps_matrix_finite() {
        let p = Projection::new(&ScreenGeometry::default(), OffsetPolicy::Honor);
        assert!(p.matrix().is_finite());
    }
}
