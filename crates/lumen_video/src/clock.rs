//! 模拟媒体时钟

use std::time::Instant;

use lumen_store::VideoLayerState;

use crate::VideoError;

/// 按墙上时间推进的播放位置
#[derive(Debug, Clone)]
pub struct MediaClock {
    duration: f64,
    base: f64,
    started_at: Option<Instant>,
}

impl MediaClock {
    pub fn new(duration: f64) -> Result<Self, VideoError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(VideoError::InvalidDuration(duration));
        }
        Ok(Self {
            duration,
            base: 0.0,
            started_at: None,
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn position(&self, now: Instant) -> f64 {
        let elapsed = self
            .started_at
            .map(|t| now.saturating_duration_since(t).as_secs_f64())
            .unwrap_or(0.0);
        (self.base + elapsed).min(self.duration)
    }

    pub fn snapshot(&self, now: Instant) -> VideoLayerState {
        VideoLayerState::new(self.position(now), self.duration)
    }

    pub fn play(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn pause(&mut self, now: Instant) {
        self.base = self.position(now);
        self.started_at = None;
    }

    /// 跳转，返回钳制到 `[0, duration]` 后的实际位置
    pub fn seek(&mut self, position: f64, now: Instant) -> Result<f64, VideoError> {
        if !position.is_finite() {
            return Err(VideoError::InvalidPosition(position));
        }
        self.base = position.clamp(0.0, self.duration);
        if self.started_at.is_some() {
            self.started_at = Some(now);
        }
        Ok(self.base)
    }

    pub fn at_end(&self, now: Instant) -> bool {
        self.position(now) >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_rejects_bad_duration() {
        assert_eq!(
            MediaClock::new(-1.0).unwrap_err(),
            VideoError::InvalidDuration(-1.0)
        );
        assert!(MediaClock::new(f64::NAN).is_err());
        assert!(MediaClock::new(0.0).is_ok());
    }

    #[test]
    fn test_advances_only_while_playing() {
        let t0 = Instant::now();
        let mut clock = MediaClock::new(60.0).unwrap();
        assert_eq!(clock.position(t0 + Duration::from_secs(5)), 0.0);

        clock.play(t0);
        let t1 = t0 + Duration::from_secs(2);
        assert_eq!(clock.position(t1), 2.0);

        clock.pause(t1);
        assert_eq!(clock.position(t1 + Duration::from_secs(10)), 2.0);
    }

    #[test]
    fn test_seek_clamps() {
        let now = Instant::now();
        let mut clock = MediaClock::new(30.0).unwrap();
        assert_eq!(clock.seek(42.5, now).unwrap(), 30.0);
        assert_eq!(clock.seek(-3.0, now).unwrap(), 0.0);
        assert_eq!(clock.seek(12.25, now).unwrap(), 12.25);
        assert!(clock.seek(f64::INFINITY, now).is_err());
    }

    #[test]
    fn test_seek_while_playing_restarts_from_target() {
        let t0 = Instant::now();
        let mut clock = MediaClock::new(100.0).unwrap();
        clock.play(t0);

        let t1 = t0 + Duration::from_secs(3);
        clock.seek(50.0, t1).unwrap();
        assert_eq!(clock.position(t1 + Duration::from_secs(1)), 51.0);
    }

    #[test]
    fn test_position_stops_at_duration() {
        let t0 = Instant::now();
        let mut clock = MediaClock::new(1.0).unwrap();
        clock.play(t0);
        let later = t0 + Duration::from_secs(5);
        assert_eq!(clock.position(later), 1.0);
        assert!(clock.at_end(later));
    }
}
