use glam::{IVec2, Vec3};

/// Rectangular play area in screen pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayArea {
    pub width: i32,
    pub height: i32,
}

impl PlayArea {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.width / 2, self.height / 2)
    }

    /// Upper bound of the centre coordinate on each axis for a circle of `radius`
    pub fn max_center(&self, radius: i32) -> IVec2 {
        IVec2::new(self.width - radius, self.height - radius)
    }

    /// True if a circle of `radius` centred at `pos` lies fully inside the area
    pub fn holds_circle(&self, pos: IVec2, radius: i32) -> bool {
        let max = self.max_center(radius);
        pos.x >= radius && pos.x <= max.x && pos.y >= radius && pos.y <= max.y
    }

    /// Map a normalised landmark (x, y in [0,1]) to a pixel, truncating
    pub fn to_pixel(&self, point: Vec3) -> IVec2 {
        IVec2::new(
            (point.x * self.width as f32) as i32,
            (point.y * self.height as f32) as i32,
        )
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::new(crate::Params::AREA_WIDTH, crate::Params::AREA_HEIGHT)
    }
}

impl From<&crate::Config> for PlayArea {
    fn from(config: &crate::Config) -> Self {
        Self::new(config.area_width, config.area_height)
    }
}
