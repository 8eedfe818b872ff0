//! Tick driver
//!
//! Owns the session and gesture classifier, pulls the latest pose from a
//! [`PoseSource`] each tick and pushes the resulting snapshot and events to
//! a [`PresentationSink`]. Scheduling is the caller's concern: call
//! [`TickDriver::advance`] once per frame with the current clock.

use crate::consts::CALIBRATION_SECS;
use crate::error::ConfigError;
use crate::pose::{GestureClassifier, PoseSource};
use crate::settings::SessionConfig;
use crate::sim::{GameEvent, GamePhase, GameSession, SessionState, TickInput, tick};

/// Receiver for per-tick output (rendering, audio, HUD)
pub trait PresentationSink {
    fn present(&mut self, state: &SessionState, events: &[GameEvent]);
}

/// Sink that drops everything (headless runs)
impl PresentationSink for () {
    fn present(&mut self, _state: &SessionState, _events: &[GameEvent]) {}
}

pub struct TickDriver<S, P> {
    session: GameSession,
    classifier: GestureClassifier,
    source: S,
    sink: P,
    calibration_secs: f64,
    calibration_started: Option<f64>,
}

impl<S: PoseSource, P: PresentationSink> TickDriver<S, P> {
    pub fn new(config: &SessionConfig, source: S, sink: P) -> Result<Self, ConfigError> {
        Ok(Self {
            session: GameSession::new(config)?,
            classifier: GestureClassifier::new(),
            source,
            sink,
            calibration_secs: CALIBRATION_SECS,
            calibration_started: None,
        })
    }

    /// Override the calibration countdown
    pub fn with_calibration_secs(mut self, secs: f64) -> Self {
        self.calibration_secs = secs.max(0.0);
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    /// Run one tick at clock time `now` (seconds).
    ///
    /// While calibrating, the countdown starts on the first call and the
    /// baseline is taken from whatever pose is current when it expires.
    pub fn advance(&mut self, now: f64) -> Vec<GameEvent> {
        let frame = self.source.latest_frame();

        let events = match self.session.phase {
            GamePhase::Calibrating => {
                let started = *self.calibration_started.get_or_insert(now);
                if now - started >= self.calibration_secs {
                    let cal = self.session.calibrate(frame.as_ref());
                    vec![GameEvent::Calibrated {
                        baseline: cal.baseline,
                        fallback: cal.fallback,
                    }]
                } else {
                    Vec::new()
                }
            }
            GamePhase::Running => {
                let input = TickInput::new(now, frame);
                tick(&mut self.session, &mut self.classifier, &input)
            }
            GamePhase::Over => Vec::new(),
        };

        let state = self.session.snapshot();
        self.sink.present(&state, &events);
        events
    }

    /// Start a new round at the same difficulty
    pub fn restart(&mut self) {
        self.session.restart();
        self.classifier.reset();
        self.calibration_started = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::LandmarkFrame;

    /// Records everything presented
    #[derive(Default)]
    struct Recorder {
        states: Vec<SessionState>,
        events: Vec<GameEvent>,
    }

    impl PresentationSink for Recorder {
        fn present(&mut self, state: &SessionState, events: &[GameEvent]) {
            self.states.push(state.clone());
            self.events.extend_from_slice(events);
        }
    }

    fn driver(source: Option<LandmarkFrame>) -> TickDriver<Option<LandmarkFrame>, Recorder> {
        let config = SessionConfig::new("easy", 800.0, 600.0).unwrap();
        TickDriver::new(&config, source, Recorder::default()).unwrap()
    }

    #[test]
    fn test_calibration_countdown() {
        let mut d = driver(None);
        assert!(d.advance(10.0).is_empty());
        assert!(d.advance(12.9).is_empty());
        assert_eq!(d.session().phase, GamePhase::Calibrating);

        let events = d.advance(13.0);
        assert_eq!(
            events,
            vec![GameEvent::Calibrated {
                baseline: crate::consts::DEFAULT_BASELINE,
                fallback: true
            }]
        );
        assert_eq!(d.session().phase, GamePhase::Running);
    }

    #[test]
    fn test_calibration_uses_current_pose() {
        let mut d = driver(Some(LandmarkFrame::default())).with_calibration_secs(0.0);
        let events = d.advance(0.0);
        assert!(matches!(events[0], GameEvent::Calibrated { fallback: false, .. }));
    }

    #[test]
    fn test_presents_every_tick() {
        let mut d = driver(None).with_calibration_secs(0.0);
        for i in 0..10 {
            d.advance(i as f64 * 0.5);
        }
        assert_eq!(d.sink().states.len(), 10);
        assert!(matches!(d.sink().events[0], GameEvent::Calibrated { .. }));
        assert!(d.sink().events.iter().any(|e| matches!(e, GameEvent::Spawned { .. })));
    }

    #[test]
    fn test_runs_to_game_over_without_pose() {
        let mut d = driver(None).with_calibration_secs(0.0);
        let mut now = 0.0;
        while !d.session().is_over() {
            now += 1.0 / 60.0;
            d.advance(now);
            assert!(now < 120.0, "session never ended");
        }
        let last = d.sink().states.last().unwrap();
        assert_eq!(last.lives, 0);
        assert_eq!(last.phase, GamePhase::Over);
        assert!(matches!(d.sink().events.last(), Some(GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_restart_recalibrates() {
        let mut d = driver(None).with_calibration_secs(1.0);
        d.advance(0.0);
        d.advance(1.0);
        assert_eq!(d.session().phase, GamePhase::Running);

        d.restart();
        assert_eq!(d.session().phase, GamePhase::Calibrating);
        assert!(d.advance(50.0).is_empty());
        assert!(!d.advance(51.0).is_empty());
        assert_eq!(d.session().phase, GamePhase::Running);
    }

    #[test]
    fn test_source_swapped_mid_session() {
        let mut d = driver(None).with_calibration_secs(0.0);
        d.advance(0.0);
        *d.source_mut() = Some(LandmarkFrame::default());
        d.advance(0.1);
        assert!(!d.session().gestures.hands_joined);
        assert!(!d.classifier().is_squatting());
    }
}
