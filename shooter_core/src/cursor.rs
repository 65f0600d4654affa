use glam::IVec2;

/// Exponentially smoothed crosshair position in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub pos: IVec2,
    pub alpha: f64,
}

impl Cursor {
    pub fn new(pos: IVec2, alpha: f64) -> Self {
        Self { pos, alpha }
    }

    /// Move a fraction `alpha` of the way toward `target`, truncating to whole pixels
    pub fn track(&mut self, target: IVec2) {
        self.pos = IVec2::new(
            smooth(self.pos.x, target.x, self.alpha),
            smooth(self.pos.y, target.y, self.alpha),
        );
    }
}

fn smooth(current: i32, target: i32, alpha: f64) -> i32 {
    (current as f64 + (target - current) as f64 * alpha) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step() {
        let mut cursor = Cursor::new(IVec2::ZERO, 0.3);
        cursor.track(IVec2::new(100, 100));
        assert_eq!(cursor.pos, IVec2::new(30, 30));
    }

    #[test]
    fn test_truncates_toward_zero_when_moving_back() {
        let mut cursor = Cursor::new(IVec2::new(100, 100), 0.3);
        cursor.track(IVec2::new(1, 55));
        // 100 - 29.7 = 70.3, 100 - 13.5 = 86.5
        assert_eq!(cursor.pos, IVec2::new(70, 86));
    }

    #[test]
    fn test_never_overshoots() {
        let mut cursor = Cursor::new(IVec2::new(450, 300), 0.3);
        let target = IVec2::new(800, 100);
        for _ in 0..200 {
            cursor.track(target);
            assert!(cursor.pos.x <= target.x);
            assert!(cursor.pos.y >= target.y);
        }
    }

    #[test]
    fn test_converges_close_to_target() {
        let mut cursor = Cursor::new(IVec2::new(450, 300), 0.3);
        let target = IVec2::new(800, 100);
        for _ in 0..50 {
            cursor.track(target);
        }
        // Truncation can stall the last few pixels short of the target
        assert!((cursor.pos - target).abs().max_element() <= 3);
    }

    #[test]
    fn test_alpha_one_snaps() {
        let mut cursor = Cursor::new(IVec2::new(3, 4), 1.0);
        cursor.track(IVec2::new(640, 480));
        assert_eq!(cursor.pos, IVec2::new(640, 480));
    }
}
