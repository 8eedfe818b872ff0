//! Squat Catch entry point
//!
//! The browser build is driven from JavaScript through `bridge`. Natively
//! this runs a headless demo: a scripted player squats and reaches for each
//! object while a simulated 60 Hz clock drives the session.
//!
//! Usage: `squat-catch [easy|medium|hard] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::cell::Cell;
    use std::rc::Rc;

    use glam::Vec2;
    use squat_catch::consts::*;
    use squat_catch::{
        ConfigError, GameEvent, Landmark, LandmarkFrame, PoseSource, PresentationSink,
        SessionConfig, SessionState, TickDriver,
    };

    const SCREEN: (f32, f32) = (1280.0, 720.0);
    const FRAME_DT: f64 = 1.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_TICKS: u32 = 60 * 60 * 10;

    /// Scripted player reaching for the last object it saw
    struct DemoPlayer {
        target: Rc<Cell<Option<Vec2>>>,
    }

    impl PoseSource for DemoPlayer {
        fn latest_frame(&mut self) -> Option<LandmarkFrame> {
            let (w, h) = SCREEN;
            let mut frame = LandmarkFrame::default();
            for (id, x, y) in [
                (NOSE, 0.5, 0.2),
                (LEFT_SHOULDER, 0.45, 0.3),
                (RIGHT_SHOULDER, 0.55, 0.3),
                (LEFT_ANKLE, 0.45, 0.9),
                (RIGHT_ANKLE, 0.55, 0.9),
            ] {
                frame.set(id, Landmark::new(x, y, 0.9));
            }

            match self.target.get() {
                Some(target) => {
                    // Hands together over the object, knees bent
                    let hands = Vec2::new(1.0 - target.x / w, target.y / h);
                    frame.set(LEFT_ELBOW, Landmark::new(hands.x + 0.08, hands.y + 0.1, 0.9));
                    frame.set(RIGHT_ELBOW, Landmark::new(hands.x - 0.08, hands.y + 0.1, 0.9));
                    frame.set(LEFT_WRIST, Landmark::new(hands.x + 0.01, hands.y, 0.9));
                    frame.set(RIGHT_WRIST, Landmark::new(hands.x - 0.01, hands.y, 0.9));
                    frame.set(RIGHT_HIP, Landmark::new(0.55, 0.55, 0.9));
                    frame.set(RIGHT_KNEE, Landmark::new(0.65, 0.68, 0.9));
                    frame.set(RIGHT_ANKLE, Landmark::new(0.55, 0.9, 0.9));
                }
                None => {
                    // Standing, arms at the sides
                    frame.set(LEFT_ELBOW, Landmark::new(0.4, 0.45, 0.9));
                    frame.set(RIGHT_ELBOW, Landmark::new(0.6, 0.45, 0.9));
                    frame.set(LEFT_WRIST, Landmark::new(0.38, 0.6, 0.9));
                    frame.set(RIGHT_WRIST, Landmark::new(0.62, 0.6, 0.9));
                    frame.set(RIGHT_HIP, Landmark::new(0.55, 0.55, 0.9));
                    frame.set(RIGHT_KNEE, Landmark::new(0.55, 0.72, 0.9));
                    frame.set(RIGHT_ANKLE, Landmark::new(0.55, 0.9, 0.9));
                }
            }
            Some(frame)
        }
    }

    /// Prints events and tells the player where the object is
    struct ConsoleSink {
        target: Rc<Cell<Option<Vec2>>>,
    }

    impl PresentationSink for ConsoleSink {
        fn present(&mut self, state: &SessionState, events: &[GameEvent]) {
            self.target.set(state.object_positions.first().copied());
            for event in events {
                match event {
                    GameEvent::Calibrated { baseline, fallback } => {
                        println!("calibrated: baseline {baseline:.1}{}", if *fallback { " (default)" } else { "" })
                    }
                    GameEvent::Spawned { id, x } => println!("object {id} launched at x={x:.0}"),
                    GameEvent::Caught { id, score } => println!("object {id} caught! score {score}"),
                    GameEvent::Missed { id, lives } => println!("object {id} missed, {lives} lives left"),
                    GameEvent::GameOver { score, outcome } => {
                        println!("game over ({outcome:?}) - final score {score}")
                    }
                }
            }
        }
    }

    pub fn run() -> Result<(), ConfigError> {
        let mut args = std::env::args().skip(1);
        let selector = args.next().unwrap_or_else(|| "easy".to_string());
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0);

        let config = SessionConfig::new(&selector, SCREEN.0, SCREEN.1)?.with_seed(seed);
        log::info!("Starting {} session (seed {seed})", config.difficulty);

        let target = Rc::new(Cell::new(None));
        let player = DemoPlayer {
            target: target.clone(),
        };
        let sink = ConsoleSink { target };
        let mut driver = TickDriver::new(&config, player, sink)?;

        let mut now = 0.0;
        for _ in 0..MAX_TICKS {
            driver.advance(now);
            if driver.session().is_over() {
                break;
            }
            now += FRAME_DT;
        }

        let state = driver.session().snapshot();
        println!(
            "\nscore {} | lives {} | remaining {} | {:?} after {:.1}s",
            state.score, state.lives, state.remaining_target, state.phase, now
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = demo::run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(2);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is bridge::wasm_start, this is just to satisfy the compiler
}
