//! Per-tick session update
//!
//! One tick runs to completion: classify gestures, spawn, step objects,
//! resolve catches and misses, then check for the end of the session.
//! The clock is supplied by the caller so tests can drive it directly.

use glam::Vec2;

use super::state::{GameEvent, GameOutcome, GamePhase, GameSession};
use crate::pose::{GestureClassifier, GestureFlags, LandmarkFrame};
use crate::to_screen;

/// Inputs for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Clock time in seconds
    pub now: f64,
    /// Most recent pose, if any
    pub frame: Option<LandmarkFrame>,
}

impl TickInput {
    pub fn new(now: f64, frame: Option<LandmarkFrame>) -> Self {
        Self { now, frame }
    }
}

/// Advance the session by one tick, returning the events it produced.
///
/// Does nothing unless the session is Running.
pub fn tick(
    session: &mut GameSession,
    classifier: &mut GestureClassifier,
    input: &TickInput,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if session.phase != GamePhase::Running {
        return events;
    }

    let (width, height) = (session.screen_width, session.screen_height);
    let frame = input.frame.as_ref();

    session.gestures = frame
        .map(|f| classifier.classify(f, &session.profile))
        .unwrap_or_default();

    // Single-object spawn gate
    if session.objects.is_empty()
        && input.now - session.last_spawn_time > session.profile.spawn_interval_secs
    {
        let anchor_x = frame
            .map(|f| to_screen(f.nose().pos(), width, height).x)
            .unwrap_or(width / 2.0);
        let obj = session.spawn_object(anchor_x, input.now);
        events.push(GameEvent::Spawned {
            id: obj.id,
            x: obj.pos.x,
        });
    }

    let hands = catching_hands(frame, session.gestures, width, height);

    for mut obj in std::mem::take(&mut session.objects) {
        if !obj.step(height) {
            session.lives = session.lives.saturating_sub(1);
            log::debug!("Missed object {}, {} lives left", obj.id, session.lives);
            events.push(GameEvent::Missed {
                id: obj.id,
                lives: session.lives,
            });
            continue;
        }

        if let Some(hands) = hands
            && hands.iter().any(|&p| obj.contains_point(p))
        {
            session.score += 1;
            session.remaining_target = session.remaining_target.saturating_sub(1);
            log::debug!("Caught object {}, score {}", obj.id, session.score);
            events.push(GameEvent::Caught {
                id: obj.id,
                score: session.score,
            });
            continue;
        }

        session.objects.push(obj);
    }

    if session.lives == 0 || session.remaining_target == 0 {
        let outcome = if session.remaining_target == 0 {
            GameOutcome::Cleared
        } else {
            GameOutcome::OutOfLives
        };
        session.phase = GamePhase::Over;
        log::info!("Game over ({outcome:?}), final score {}", session.score);
        events.push(GameEvent::GameOver {
            score: session.score,
            outcome,
        });
    }

    events
}

/// Both wrists in mirrored screen space, if the catch gesture is held
fn catching_hands(
    frame: Option<&LandmarkFrame>,
    gestures: GestureFlags,
    width: f32,
    height: f32,
) -> Option<[Vec2; 2]> {
    if !gestures.can_catch() {
        return None;
    }
    let (left, right) = frame?.wrists();
    Some([
        to_screen(left.pos(), width, height),
        to_screen(right.pos(), width, height),
    ])
}
