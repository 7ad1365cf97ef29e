// file: src/utils/telemetry.rs
// description: stage timing for pipeline runs

use std::time::{Duration, Instant};
use tracing::info;

/// Wall-clock duration of one named stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageTiming {
    pub stage: String,
    pub duration: Duration,
}

pub struct StageTimer {
    stage: String,
    start: Instant,
}

impl StageTimer {
    pub fn start(stage: &str) -> Self {
        Self {
            stage: stage.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self) -> StageTiming {
        let duration = self.elapsed();
        info!("{} took {} seconds", self.stage, duration.as_secs());
        StageTiming {
            stage: self.stage,
            duration,
        }
    }
}

/// Seconds, minutes and hours of a total run time, as reported at shutdown.
pub fn log_overall_duration(duration: Duration) {
    let secs = duration.as_secs();
    info!("Overall execution time in seconds: {}", secs);
    info!("Overall execution time in minutes: {:.2}", secs as f64 / 60.0);
    info!("Overall execution time in hours: {:.4}", secs as f64 / 3600.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_timer() {
        let timer = StageTimer::start("Cloning");
        std::thread::sleep(Duration::from_millis(10));
        let timing = timer.finish();
        assert_eq!(timing.stage, "Cloning");
        assert!(timing.duration >= Duration::from_millis(10));
    }
}
