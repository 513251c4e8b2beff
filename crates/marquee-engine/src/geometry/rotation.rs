use glam::Vec2;

/// Clockwise quarter-turn applied to the logical screen.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Exact conversion from a quarter-turn count in `0..=3`.
    pub const fn from_steps(steps: u32) -> Option<Self> {
        match steps {
            0 => Some(Rotation::Deg0),
            1 => Some(Rotation::Deg90),
            2 => Some(Rotation::Deg180),
            3 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    /// Lenient conversion from a stored setting; values outside `0..=3` wrap.
    pub fn from_setting(value: i64) -> Self {
        let steps = value.rem_euclid(4) as u32;
        if value != steps as i64 {
            log::warn!("rotation {value} outside 0..=3; using {steps}");
        }
        Self::ALL[steps as usize]
    }

    #[inline]
    pub const fn steps(self) -> u32 {
        self as u32
    }

    #[inline]
    pub const fn degrees(self) -> u32 {
        self.steps() * 90
    }

    #[inline]
    pub fn radians(self) -> f32 {
        (self.degrees() as f32).to_radians()
    }

    /// 90° and 270° exchange the horizontal and vertical axes.
    #[inline]
    pub const fn swaps_axes(self) -> bool {
        self.steps() & 1 == 1
    }

    /// Translation applied before the rotation so the rotated logical screen
    /// (`screen_width` x `screen_height`, post-swap) lands back on the
    /// unrotated viewport.
    ///
    /// X shifts for 180° and 270°, Y shifts for 90° and 180°.
    pub fn anchor_translation(self, screen_width: u32, screen_height: u32) -> Vec2 {
        let steps = self.steps();
        let x = if steps & 2 != 0 { -(screen_width as f32) } else { 0.0 };
        let y = if steps == 1 || steps == 2 { -(screen_height as f32) } else { 0.0 };
        Vec2::new(x, y)
    }
}
