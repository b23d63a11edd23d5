use foundation::time::Time;

/// Per-frame metadata handed to every controller.
///
/// Hosts call [`Frame::advance`] once per display refresh with the measured
/// delta. The delta is clamped so a backgrounded tab resuming after seconds
/// of inactivity does not teleport animations.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta time of this frame (seconds).
    pub dt_s: f64,
    /// Accumulated scene time at the end of the frame (seconds).
    pub time: Time,
}

/// Largest delta accepted for a single frame.
pub const MAX_FRAME_DT_S: f64 = 0.25;

impl Frame {
    pub fn first() -> Self {
        Self {
            index: 0,
            dt_s: 0.0,
            time: Time::ZERO,
        }
    }

    pub fn advance(self, dt_s: f64) -> Self {
        let dt_s = if dt_s.is_finite() {
            dt_s.clamp(0.0, MAX_FRAME_DT_S)
        } else {
            0.0
        };
        Self {
            index: self.index + 1,
            dt_s,
            time: self.time.advanced(dt_s),
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::first()
    }
}
