//! Fixed-step frame clock

use serde::{Deserialize, Serialize};

/// Monotonic frame counter and elapsed simulated time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    /// Ticks since the run started
    pub frame: u64,
    /// Simulated seconds since the run started
    pub elapsed: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step forward by one fixed delta
    pub fn advance(&mut self, dt: f64) {
        self.frame += 1;
        self.elapsed += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_clock_advances() {
        let mut clock = Clock::new();
        for _ in 0..60 {
            clock.advance(SIM_DT);
        }
        assert_eq!(clock.frame, 60);
        assert!((clock.elapsed - 1.0).abs() < 1e-9);
    }
}
