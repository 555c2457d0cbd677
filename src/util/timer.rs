//! A simple RAII-based timer for measuring tick and run durations

use instant::Instant;

pub struct Timer {
    start_t: Instant,
    lap_t: Instant,
    is_running: bool,
    msg: &'static str,
}

impl Timer {
    pub fn new(msg: &'static str) -> Self {
        let now = Instant::now();
        Timer {
            start_t: now,
            lap_t: now,
            is_running: true,
            msg,
        }
    }

    /// Nanoseconds since the previous lap, or since the start for the first lap.
    pub fn lap(&mut self) -> u128 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.lap_t).as_nanos();
        self.lap_t = now;
        elapsed
    }

    pub fn stop(&mut self) -> u128 {
        if !self.is_running {
            return 0;
        }
        let elapsed = self.stop_silent();
        info!("{} finished in {}", self.msg, time_from(elapsed));
        elapsed
    }

    pub fn stop_silent(&mut self) -> u128 {
        self.is_running = false;
        self.start_t.elapsed().as_nanos()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if self.is_running {
            self.stop();
        }
    }
}

/// Format nanoseconds as `secs:millis:micros:nanos`.
pub fn time_from(mut t: u128) -> String {
    let nanos = t % 1000;
    t /= 1000;
    let micros = t % 1000;
    t /= 1000;
    let millis = t % 1000;
    t /= 1000;
    let secs = t;
    format!("{}:{}:{}:{}", secs, millis, micros, nanos)
}
