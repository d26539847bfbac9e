//! Fixed-timestep game loop
//!
//! Decouples the display refresh from the simulation rate. Every displayed
//! frame adds the real time since the previous frame to an accumulator, runs
//! as many fixed-size simulation updates as the accumulator holds, then
//! renders once:
//!
//! ```text
//! frame_time   = now - last_timestamp
//! accumulator += frame_time            (clamped to max_steps * fixed_step)
//! while accumulator >= fixed_step:
//!     update(fixed_step)
//!     accumulator -= fixed_step
//! render()
//! ```
//!
//! The clamp keeps a long stall (a backgrounded window, a debugger pause)
//! from turning into hundreds of catch-up updates in one frame. Backlog
//! beyond the clamp is discarded and reported in [`FrameReport::dropped`].
//!
//! The loop itself does not own a thread or a window. A host either calls
//! [`GameLoop::tick`] from its own per-refresh callback, or hands control to
//! [`GameLoop::run`], which paces frames with `std::thread::sleep`.

use crate::config::{Config, LoopConfig};
use crate::engine::EngineError;
use crate::foundation::time::{Clock, SystemClock};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Receives the loop's update and render calls
pub trait LoopHost {
    /// Advance the simulation by one fixed step
    fn update(&mut self, delta_time: f32) -> Result<(), EngineError>;

    /// Draw the latest simulated state
    fn render(&mut self) -> Result<(), EngineError>;
}

/// [`LoopHost`] built from two closures
pub struct Callbacks<U, R> {
    update: U,
    render: R,
}

impl<U, R> Callbacks<U, R>
where
    U: FnMut(f32) -> Result<(), EngineError>,
    R: FnMut() -> Result<(), EngineError>,
{
    /// Pair an update and a render closure
    pub fn new(update: U, render: R) -> Self {
        Self { update, render }
    }
}

impl<U, R> LoopHost for Callbacks<U, R>
where
    U: FnMut(f32) -> Result<(), EngineError>,
    R: FnMut() -> Result<(), EngineError>,
{
    fn update(&mut self, delta_time: f32) -> Result<(), EngineError> {
        (self.update)(delta_time)
    }

    fn render(&mut self) -> Result<(), EngineError> {
        (self.render)()
    }
}

/// Loop state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// No frames are processed
    #[default]
    Stopped,
    /// Frames are processed on every tick
    Running,
}

/// Shared start/stop switch of a [`GameLoop`]
///
/// Clone it into update or render code to stop the loop from inside a
/// frame. The current frame finishes; no later frame runs callbacks.
#[derive(Debug, Clone, Default)]
pub struct LoopControl {
    state: Rc<Cell<LoopState>>,
}

impl LoopControl {
    /// A stopped control not yet attached to a loop
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that no further frames run. Idempotent.
    pub fn stop(&self) {
        self.state.set(LoopState::Stopped);
    }

    /// Current state
    pub fn state(&self) -> LoopState {
        self.state.get()
    }

    /// Whether the loop is running
    pub fn is_running(&self) -> bool {
        self.state.get() == LoopState::Running
    }

    fn set_running(&self) {
        self.state.set(LoopState::Running);
    }
}

/// What one frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Real time since the previous frame
    pub frame_time: Duration,
    /// Fixed updates run this frame
    pub updates: u32,
    /// Backlog discarded by the catch-up cap
    pub dropped: Duration,
    /// Whether render was called
    pub rendered: bool,
}

/// Fixed-timestep update/render scheduler
pub struct GameLoop<H, C = SystemClock> {
    config: LoopConfig,
    fixed_step: Duration,
    max_backlog: Duration,
    host: H,
    clock: C,
    control: LoopControl,

    last_timestamp: Duration,
    accumulator: Duration,

    fps: u32,
    fps_frames: u32,
    fps_elapsed: Duration,

    frame_count: u64,
    update_count: u64,
}

impl<H: LoopHost> GameLoop<H, SystemClock> {
    /// Create a stopped loop driven by the system clock
    pub fn new(config: LoopConfig, host: H) -> Result<Self, EngineError> {
        Self::with_clock(config, host, SystemClock::new())
    }
}

impl<U, R> GameLoop<Callbacks<U, R>, SystemClock>
where
    U: FnMut(f32) -> Result<(), EngineError>,
    R: FnMut() -> Result<(), EngineError>,
{
    /// Create a stopped loop from an update and a render closure
    pub fn from_callbacks(config: LoopConfig, update: U, render: R) -> Result<Self, EngineError> {
        Self::new(config, Callbacks::new(update, render))
    }
}

impl<H: LoopHost, C: Clock> GameLoop<H, C> {
    /// Create a stopped loop reading time from `clock`
    pub fn with_clock(config: LoopConfig, host: H, clock: C) -> Result<Self, EngineError> {
        config.validate()?;

        let fixed_step = config.fixed_step();
        let max_backlog = config.max_backlog();
        log::debug!(
            "Game loop configured: {} Hz fixed step ({:?}), at most {} updates per frame",
            config.target_fps,
            fixed_step,
            config.max_steps_per_frame
        );

        Ok(Self {
            config,
            fixed_step,
            max_backlog,
            host,
            clock,
            control: LoopControl::new(),
            last_timestamp: Duration::ZERO,
            accumulator: Duration::ZERO,
            fps: 0,
            fps_frames: 0,
            fps_elapsed: Duration::ZERO,
            frame_count: 0,
            update_count: 0,
        })
    }

    /// Builder pattern: share an existing control handle
    ///
    /// The loop adopts the handle's current state.
    pub fn with_control(mut self, control: LoopControl) -> Self {
        self.control = control;
        self
    }

    /// Start processing frames. No-op while running.
    pub fn start(&mut self) {
        if self.control.is_running() {
            log::debug!("Game loop already running");
            return;
        }

        self.last_timestamp = self.clock.now();
        self.accumulator = Duration::ZERO;
        self.fps = 0;
        self.fps_frames = 0;
        self.fps_elapsed = Duration::ZERO;
        self.control.set_running();
        log::info!("Game loop started at {} Hz", self.config.target_fps);
    }

    /// Stop processing frames. No-op while stopped.
    pub fn stop(&mut self) {
        if !self.control.is_running() {
            return;
        }
        self.control.stop();
        log::info!(
            "Game loop stopped after {} frames and {} updates",
            self.frame_count,
            self.update_count
        );
    }

    /// Whether the loop is running
    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    /// Handle for stopping the loop from inside callbacks
    pub fn control(&self) -> LoopControl {
        self.control.clone()
    }

    /// Process one displayed frame using the clock
    ///
    /// Call once per display refresh. Does nothing while stopped. An error
    /// from the host stops the loop and is returned.
    pub fn tick(&mut self) -> Result<FrameReport, EngineError> {
        if !self.control.is_running() {
            return Ok(FrameReport::default());
        }

        let now = self.clock.now();
        let frame_time = now.saturating_sub(self.last_timestamp);
        self.last_timestamp = now;

        self.run_frame(frame_time)
    }

    /// Process one frame as if `delay` had passed since the previous one
    ///
    /// Ignores the clock and the running state, so tests and tools can drive
    /// the loop deterministically.
    pub fn step(&mut self, delay: Duration) -> Result<FrameReport, EngineError> {
        self.run_frame(delay)
    }

    /// Start the loop and process frames until it is stopped
    ///
    /// Frames are paced to the fixed step with `std::thread::sleep`, standing
    /// in for a display refresh signal on hosts that have none.
    pub fn run(&mut self) -> Result<(), EngineError> {
        self.start();

        while self.control.is_running() {
            let frame_start = self.clock.now();
            self.tick()?;

            let spent = self.clock.now().saturating_sub(frame_start);
            if let Some(remaining) = self.fixed_step.checked_sub(spent) {
                std::thread::sleep(remaining);
            }
        }

        self.stop();
        Ok(())
    }

    fn run_frame(&mut self, frame_time: Duration) -> Result<FrameReport, EngineError> {
        let mut report = FrameReport {
            frame_time,
            ..FrameReport::default()
        };

        self.accumulator = self.accumulator.saturating_add(frame_time);
        if self.accumulator > self.max_backlog {
            report.dropped = self.accumulator - self.max_backlog;
            self.accumulator = self.max_backlog;
            log::warn!(
                "Frame took {:?}; discarding {:?} of simulation backlog",
                frame_time,
                report.dropped
            );
        }

        let delta_time = self.fixed_step.as_secs_f32();
        while self.accumulator >= self.fixed_step {
            if let Err(err) = self.host.update(delta_time) {
                return Err(self.fail(err));
            }
            self.accumulator -= self.fixed_step;
            self.update_count += 1;
            report.updates += 1;
        }

        if let Err(err) = self.host.render() {
            return Err(self.fail(err));
        }
        report.rendered = true;

        self.frame_count += 1;
        self.fps_frames += 1;
        self.fps_elapsed = self.fps_elapsed.saturating_add(frame_time);
        if self.fps_elapsed >= FPS_WINDOW {
            self.fps = self.fps_frames;
            self.fps_frames = 0;
            self.fps_elapsed = Duration::ZERO;
        }

        log::trace!(
            "Frame {}: {:?} elapsed, {} updates, {:?} left over",
            self.frame_count,
            frame_time,
            report.updates,
            self.accumulator
        );
        Ok(report)
    }

    fn fail(&mut self, err: EngineError) -> EngineError {
        log::error!("Game loop callback failed: {}", err);
        self.stop();
        err
    }

    /// Frames counted in the last completed one-second window
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Simulation step length
    pub fn fixed_step(&self) -> Duration {
        self.fixed_step
    }

    /// Unsimulated time carried into the next frame
    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    /// Frames rendered since creation
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Fixed updates run since creation
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Loop settings
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// The update/render receiver
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the update/render receiver
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the loop, returning the host
    pub fn into_host(self) -> H {
        self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::time::ManualClock;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Counter {
        updates: u32,
        renders: u32,
        deltas: Vec<f32>,
    }

    impl LoopHost for Counter {
        fn update(&mut self, delta_time: f32) -> Result<(), EngineError> {
            self.updates += 1;
            self.deltas.push(delta_time);
            Ok(())
        }

        fn render(&mut self) -> Result<(), EngineError> {
            self.renders += 1;
            Ok(())
        }
    }

    fn manual_loop() -> (GameLoop<Counter, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let game_loop = GameLoop::with_clock(LoopConfig::default(), Counter::default(), clock.clone()).unwrap();
        (game_loop, clock)
    }

    #[test]
    fn test_start_and_stop_are_idempotent() {
        let (mut game_loop, _) = manual_loop();
        assert!(!game_loop.is_running());

        game_loop.start();
        game_loop.start();
        assert!(game_loop.is_running());
        assert_eq!(game_loop.control().state(), LoopState::Running);

        game_loop.stop();
        game_loop.stop();
        assert!(!game_loop.is_running());
    }

    #[test]
    fn test_short_frame_only_renders() {
        let (mut game_loop, _) = manual_loop();

        let report = game_loop.step(Duration::from_millis(10)).unwrap();

        assert_eq!(report.updates, 0);
        assert!(report.rendered);
        assert_eq!(game_loop.accumulator(), Duration::from_millis(10));
        assert_eq!(game_loop.host().renders, 1);
    }

    #[test]
    fn test_accumulator_carries_remainder() {
        let (mut game_loop, _) = manual_loop();

        assert_eq!(game_loop.step(Duration::from_millis(10)).unwrap().updates, 0);
        assert_eq!(game_loop.step(Duration::from_millis(10)).unwrap().updates, 1);
        assert_eq!(game_loop.step(Duration::from_millis(40)).unwrap().updates, 2);
        assert_eq!(game_loop.host().updates, 3);
        assert_eq!(game_loop.host().renders, 3);
    }

    #[test]
    fn test_updates_use_fixed_delta() {
        let (mut game_loop, _) = manual_loop();

        game_loop.step(Duration::from_millis(50)).unwrap();

        let expected = Duration::from_nanos(16_666_666).as_secs_f32();
        assert!(game_loop.host().deltas.iter().all(|&dt| dt == expected));
    }

    #[test]
    fn test_exactly_one_step_runs_one_update() {
        let (mut game_loop, _) = manual_loop();
        let step = game_loop.fixed_step();

        assert_eq!(game_loop.step(step).unwrap().updates, 1);
    }

    #[test]
    fn test_spiral_of_death_is_capped() {
        let (mut game_loop, _) = manual_loop();
        let report = game_loop.step(Duration::from_millis(5_000)).unwrap();
        assert_eq!(report.updates, 5);
        assert!(report.dropped > Duration::from_millis(4_900));

        let (mut game_loop, _) = manual_loop();
        let report = game_loop.step(Duration::from_millis(50_000)).unwrap();
        assert_eq!(report.updates, 5);
        assert_eq!(game_loop.accumulator(), Duration::ZERO);
    }

    #[test]
    fn test_huge_delay_after_partial_frame_stays_capped() {
        let (mut game_loop, _) = manual_loop();
        assert_eq!(game_loop.step(Duration::from_millis(10)).unwrap().updates, 0);

        let report = game_loop.step(Duration::MAX).unwrap();

        assert_eq!(report.updates, 5);
        assert!(report.rendered);
        assert_eq!(game_loop.accumulator(), Duration::ZERO);

        assert_eq!(game_loop.step(Duration::MAX).unwrap().updates, 5);
    }

    #[test]
    fn test_tick_reads_clock_while_running() {
        let (mut game_loop, clock) = manual_loop();

        clock.advance(Duration::from_millis(100));
        assert_eq!(game_loop.tick().unwrap(), FrameReport::default());
        assert_eq!(game_loop.host().renders, 0);

        game_loop.start();
        clock.advance(Duration::from_millis(34));
        let report = game_loop.tick().unwrap();

        assert_eq!(report.frame_time, Duration::from_millis(34));
        assert_eq!(report.updates, 2);
        assert_eq!(game_loop.host().renders, 1);
    }

    #[test]
    fn test_restart_discards_time_spent_stopped() {
        let (mut game_loop, clock) = manual_loop();
        game_loop.start();
        clock.advance(Duration::from_millis(10));
        game_loop.tick().unwrap();
        game_loop.stop();

        clock.advance(Duration::from_secs(30));
        game_loop.start();
        clock.advance(Duration::from_millis(17));
        let report = game_loop.tick().unwrap();

        assert_eq!(report.frame_time, Duration::from_millis(17));
        assert_eq!(report.updates, 1);
        assert_eq!(report.dropped, Duration::ZERO);
    }

    #[test]
    fn test_fps_reports_completed_window() {
        let (mut game_loop, _) = manual_loop();

        for _ in 0..58 {
            game_loop.step(Duration::from_millis(17)).unwrap();
        }
        assert_eq!(game_loop.fps(), 0);

        game_loop.step(Duration::from_millis(17)).unwrap();
        assert_eq!(game_loop.fps(), 59);

        for _ in 0..10 {
            game_loop.step(Duration::from_millis(100)).unwrap();
        }
        assert_eq!(game_loop.fps(), 10);
    }

    #[test]
    fn test_target_fps_sets_step() {
        let config = LoopConfig {
            target_fps: 30,
            ..Default::default()
        };
        let mut game_loop = GameLoop::with_clock(config, Counter::default(), ManualClock::new()).unwrap();

        assert_eq!(game_loop.step(Duration::from_millis(100)).unwrap().updates, 3);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = LoopConfig {
            target_fps: 0,
            ..Default::default()
        };
        let result = GameLoop::with_clock(config, Counter::default(), ManualClock::new());
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_stop_from_inside_update() {
        let clock = ManualClock::new();
        let control = LoopControl::new();
        let inner = control.clone();
        let renders = Rc::new(RefCell::new(0));
        let render_count = renders.clone();

        let mut game_loop = GameLoop::with_clock(
            LoopConfig::default(),
            Callbacks::new(
                move |_| {
                    inner.stop();
                    Ok(())
                },
                move || {
                    *render_count.borrow_mut() += 1;
                    Ok(())
                },
            ),
            clock.clone(),
        )
        .unwrap()
        .with_control(control);

        game_loop.start();
        clock.advance(Duration::from_millis(20));
        game_loop.tick().unwrap();
        assert!(!game_loop.is_running());
        assert_eq!(*renders.borrow(), 1);

        clock.advance(Duration::from_millis(20));
        game_loop.tick().unwrap();
        assert_eq!(*renders.borrow(), 1);
    }

    #[test]
    fn test_callback_error_stops_loop() {
        let clock = ManualClock::new();
        let mut game_loop = GameLoop::with_clock(
            LoopConfig::default(),
            Callbacks::new(
                |_| Err(EngineError::Application("level data missing".into())),
                || Ok(()),
            ),
            clock.clone(),
        )
        .unwrap();

        game_loop.start();
        clock.advance(Duration::from_millis(20));

        assert!(game_loop.tick().is_err());
        assert!(!game_loop.is_running());
    }

    #[test]
    fn test_run_returns_once_stopped() {
        let control = LoopControl::new();
        let inner = control.clone();
        let frames = Rc::new(Cell::new(0));
        let seen = frames.clone();

        let mut game_loop = GameLoop::from_callbacks(
            LoopConfig {
                target_fps: 240,
                ..Default::default()
            },
            |_| Ok(()),
            move || {
                seen.set(seen.get() + 1);
                if seen.get() == 3 {
                    inner.stop();
                }
                Ok(())
            },
        )
        .unwrap()
        .with_control(control);

        game_loop.run().unwrap();

        assert_eq!(frames.get(), 3);
        assert!(!game_loop.is_running());
    }
}
