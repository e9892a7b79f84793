use std::time::{Duration, Instant};

const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Counts frames and produces a window title once per second.
pub struct FrameTiming {
    last_report_time: Instant,
    frame_count: u32,
    base_title: String,
}

impl FrameTiming {
    pub fn new(base_title: String, now: Instant) -> Self {
        Self {
            last_report_time: now,
            frame_count: 0,
            base_title,
        }
    }

    pub fn frame_drawn(&mut self) {
        self.frame_count = self.frame_count.saturating_add(1);
    }

    /// New title when a full interval has passed since the last one.
    pub fn update(&mut self, now: Instant, width: u32, height: u32) -> Option<String> {
        let elapsed = now.saturating_duration_since(self.last_report_time);
        if elapsed < REPORT_INTERVAL {
            return None;
        }
        let title = format!(
            "{}: {} Frames Per Second @ {} x {}",
            self.base_title, self.frame_count, width, height
        );
        self.frame_count = 0;
        self.last_report_time = now;
        Some(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_second() {
        let start = Instant::now();
        let mut timing = FrameTiming::new("Scene Editor demo".to_string(), start);
        for _ in 0..42 {
            timing.frame_drawn();
        }
        assert_eq!(timing.update(start + Duration::from_millis(500), 960, 640), None);
        assert_eq!(
            timing.update(start + Duration::from_millis(1000), 960, 640).as_deref(),
            Some("Scene Editor demo: 42 Frames Per Second @ 960 x 640")
        );

        timing.frame_drawn();
        assert_eq!(timing.update(start + Duration::from_millis(1500), 800, 600), None);
        assert_eq!(
            timing.update(start + Duration::from_millis(2100), 800, 600).as_deref(),
            Some("Scene Editor demo: 1 Frames Per Second @ 800 x 600")
        );
    }
}
