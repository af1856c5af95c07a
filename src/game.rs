//! Game loop orchestration
//!
//! `GameLoop` owns the simulation state and drives it from scheduler
//! callbacks: one `tick` per display frame, a fixed-interval spawn timer, and
//! (in timed mode) a one-second round clock. Basket input arrives through
//! separate callbacks and never interleaves with a running frame.
//!
//! Phases: `Idle` -> `Running` -> `Stopped`. Stopping cancels the pending frame
//! and both timers through their handles. Balls in flight when the round
//! ends freeze where they are; their views stay until `reset` or `shutdown`.

use std::collections::{BTreeMap, VecDeque};

use glam::Vec2;
use serde::Serialize;

use crate::Viewport;
use crate::consts::COUNTDOWN_PERIOD_MS;
use crate::input::{FeatureSet, JointSample, SensorFeed, SessionConfig, SubscriptionId};
use crate::platform::{FrameRequest, IntervalId, ManualScheduler, Scheduler, Timer, Wakeup};
use crate::settings::Settings;
use crate::sim::{
    BallId, BasketTracker, ClockTick, GamePhase, GameState, InputMode, Outcome, RoundClock,
    TickInput, tick,
};
use crate::view::{Hud, Presenter, ViewHandle};

/// Oldest events are dropped past this many undrained
pub const MAX_PENDING_EVENTS: usize = 256;

/// Notable things that happened, for the host to log or display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    BallSpawned { id: BallId, x: f32 },
    BallCaught { id: BallId },
    BallMissed { id: BallId },
    ClockTicked { time_left_secs: u32 },
    RoundOver { score: u64 },
    SessionConfigChanged { config: SessionConfig },
}

/// Frame-driven game orchestrator
pub struct GameLoop<S: Scheduler, P: Presenter> {
    settings: Settings,
    state: GameState,
    basket: BasketTracker,
    clock: RoundClock,
    sensor: SensorFeed,
    sensor_subscription: Option<SubscriptionId>,
    viewport: Viewport,
    views: BTreeMap<BallId, ViewHandle>,
    frame: Option<FrameRequest>,
    spawn_timer: Option<IntervalId>,
    countdown_timer: Option<IntervalId>,
    events: VecDeque<GameEvent>,
    scheduler: S,
    presenter: P,
}

impl<S: Scheduler, P: Presenter> GameLoop<S, P> {
    /// Create an idle game. The RNG is seeded from `settings.seed` (0 when
    /// unset; hosts fill in a wall-clock seed).
    pub fn new(settings: Settings, viewport: Viewport, scheduler: S, presenter: P) -> Self {
        let mut game = Self {
            state: GameState::new(settings.seed.unwrap_or_default()),
            basket: BasketTracker::new(InputMode::Pointer),
            clock: RoundClock::new(),
            sensor: SensorFeed::new(settings.sensor),
            sensor_subscription: None,
            viewport,
            views: BTreeMap::new(),
            frame: None,
            spawn_timer: None,
            countdown_timer: None,
            events: VecDeque::new(),
            scheduler,
            presenter,
            settings,
        };
        game.basket.set_position(viewport.width / 2.0);
        game.set_input_mode(game.settings.input_mode);
        game.presenter.update_basket(game.basket.x);
        game.push_hud();
        game
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn basket_x(&self) -> f32 {
        self.basket.x
    }

    pub fn input_mode(&self) -> InputMode {
        self.basket.input_mode
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Round clock (only started in timed mode)
    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    pub fn sensor(&self) -> &SensorFeed {
        &self.sensor
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.state.score,
            time_left_secs: self
                .settings
                .round_duration()
                .map(|_| self.clock.time_left_secs()),
            phase: self.state.phase,
        }
    }

    /// Idle -> Running: arm the timers and request the first frame.
    /// Returns false if the game was not idle.
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::Idle {
            log::warn!("start() ignored in {:?}", self.state.phase);
            return false;
        }
        self.state.phase = GamePhase::Running;

        if let Some(duration) = self.settings.round_duration() {
            self.clock.start(duration);
            self.countdown_timer = self
                .scheduler
                .set_interval(Timer::Countdown, COUNTDOWN_PERIOD_MS);
            if self.countdown_timer.is_none() {
                log::warn!("Round clock could not be scheduled");
            }
        }

        self.spawn_timer = self
            .scheduler
            .set_interval(Timer::Spawn, self.settings.spawn_interval_ms());
        if self.spawn_timer.is_none() {
            log::warn!("Spawn timer could not be scheduled");
        }
        self.request_frame();
        self.push_hud();

        log::info!(
            "Game started ({} mode, seed {}, spawn every {}ms)",
            self.settings.mode.as_str(),
            self.state.seed,
            self.settings.spawn_interval_ms()
        );
        true
    }

    /// Running -> Stopped: cancel the frame and timers. Idempotent; returns
    /// false if the game was not running.
    pub fn stop(&mut self) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        self.state.phase = GamePhase::Stopped;
        self.clock.halt();

        if let Some(request) = self.frame.take() {
            self.scheduler.cancel_frame(request);
        }
        if let Some(id) = self.spawn_timer.take() {
            self.scheduler.clear_interval(id);
        }
        if let Some(id) = self.countdown_timer.take() {
            self.scheduler.clear_interval(id);
        }

        self.push_event(GameEvent::RoundOver {
            score: self.state.score,
        });
        self.push_hud();
        log::info!(
            "Game stopped: score {}, {} balls left in flight",
            self.state.score,
            self.state.live_count()
        );
        true
    }

    /// Stop, clear every ball and the score, and return to `Idle`. The
    /// sensor subscription is restored if `shutdown` released it.
    pub fn reset(&mut self) {
        self.stop();
        self.destroy_all_views();
        self.state.reset();
        self.clock = RoundClock::new();
        self.set_input_mode(self.basket.input_mode);
        self.push_hud();
        log::info!("Game reset");
    }

    /// Stop and release everything: views and the sensor subscription
    pub fn shutdown(&mut self) {
        self.stop();
        self.destroy_all_views();
        if let Some(id) = self.sensor_subscription.take() {
            self.sensor.unsubscribe(id);
            self.push_session_config();
        }
        self.state.phase = GamePhase::Stopped;
        log::info!("Game shut down");
    }

    /// Display-refresh callback: run one tick, present, request the next frame
    pub fn on_frame(&mut self) {
        self.frame = None;
        if self.state.phase != GamePhase::Running {
            log::trace!("Frame ignored in {:?}", self.state.phase);
            return;
        }

        let input = TickInput {
            basket_x: self.basket.x,
            viewport: self.viewport,
            basket_height: self.settings.basket_height,
            catch_radius: self.settings.catch_radius,
        };
        let report = tick(&mut self.state, &input);

        for ball in self.state.live_balls() {
            if let Some(&view) = self.views.get(&ball.id) {
                self.presenter.update_ball_view(view, ball);
            }
        }

        let mut scored = false;
        for retirement in &report.retired {
            if let Some(view) = self.views.remove(&retirement.id) {
                if let Some(ball) = self.state.ball(retirement.id) {
                    self.presenter.update_ball_view(view, ball);
                }
                self.presenter.destroy_ball_view(view);
            }
            let event = match retirement.outcome {
                Outcome::Caught => {
                    scored = true;
                    log::debug!("Ball {:?} caught", retirement.id);
                    GameEvent::BallCaught { id: retirement.id }
                }
                Outcome::Missed => {
                    log::debug!("Ball {:?} missed", retirement.id);
                    GameEvent::BallMissed { id: retirement.id }
                }
            };
            self.push_event(event);
        }
        if scored {
            self.push_hud();
        }

        self.request_frame();
    }

    /// Interval callback
    pub fn on_timer(&mut self, timer: Timer) {
        match timer {
            Timer::Spawn => self.on_spawn_timer(),
            Timer::Countdown => self.on_countdown(),
        }
    }

    fn on_spawn_timer(&mut self) {
        if self.state.phase != GamePhase::Running {
            log::trace!("Spawn ignored in {:?}", self.state.phase);
            return;
        }
        if self.settings.round_duration().is_some() && !self.clock.is_running() {
            log::trace!("Spawn ignored: round clock not running");
            return;
        }
        let x = self.state.random_unit();
        self.spawn_ball(x, 0.0);
    }

    fn on_countdown(&mut self) {
        match self.clock.tick() {
            ClockTick::Idle => log::trace!("Countdown tick ignored: clock not running"),
            ClockTick::Remaining(time_left_secs) => {
                self.push_event(GameEvent::ClockTicked { time_left_secs });
                self.push_hud();
            }
            ClockTick::Expired => {
                self.push_event(GameEvent::ClockTicked { time_left_secs: 0 });
                log::info!("Round clock expired");
                self.stop();
            }
        }
    }

    /// Add a ball at `x_fraction` of the viewport width (not clamped) and
    /// height `y`, with the configured acceleration
    pub fn spawn_ball(&mut self, x_fraction: f32, y: f32) -> BallId {
        let x = x_fraction * self.viewport.width;
        let id = self.state.spawn_ball(
            Vec2::new(x, y),
            self.settings.ball_acceleration,
            self.settings.max_velocity,
        );

        let view = self.presenter.create_ball_view(id);
        if let Some(ball) = self.state.ball(id) {
            self.presenter.update_ball_view(view, ball);
        }
        self.views.insert(id, view);

        self.push_event(GameEvent::BallSpawned { id, x });
        log::debug!("Ball {:?} spawned at x={:.1}", id, x);
        id
    }

    /// Raw pointer movement (client x in viewport pixels)
    pub fn on_pointer_move(&mut self, client_x: f32) {
        if self.basket.apply(InputMode::Pointer, client_x) {
            self.presenter.update_basket(client_x);
        }
    }

    /// Tracked-joint sample from the sensor feed
    pub fn on_sensor_sample(&mut self, sample: &JointSample) {
        let Some(x) = self.sensor.position(sample, self.viewport.width) else {
            return;
        };
        if self.basket.apply(InputMode::External, x) {
            self.presenter.update_basket(x);
        }
    }

    /// Switch the basket's input. The sensor feed is subscribed only while
    /// in `External` mode.
    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.basket.input_mode = mode;
        match (mode, self.sensor_subscription) {
            (InputMode::External, None) => {
                self.sensor_subscription = Some(self.sensor.subscribe(FeatureSet::BODIES));
                self.push_session_config();
            }
            (InputMode::Pointer, Some(id)) => {
                self.sensor.unsubscribe(id);
                self.sensor_subscription = None;
                self.push_session_config();
            }
            _ => return,
        }
        log::info!("Input mode: {}", mode.as_str());
    }

    /// Viewport changed; takes effect on the next frame and spawn
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    fn request_frame(&mut self) {
        self.frame = self.scheduler.request_frame();
        if self.frame.is_none() {
            log::warn!("Frame could not be scheduled; game loop halted");
        }
    }

    fn destroy_all_views(&mut self) {
        for (_, view) in std::mem::take(&mut self.views) {
            self.presenter.destroy_ball_view(view);
        }
    }

    fn push_hud(&mut self) {
        let hud = self.hud();
        self.presenter.update_hud(&hud);
    }

    fn push_session_config(&mut self) {
        self.push_event(GameEvent::SessionConfigChanged {
            config: self.sensor.session_config(),
        });
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Headless driving with virtual time
impl<P: Presenter> GameLoop<ManualScheduler, P> {
    /// Advance one display frame and deliver everything that became due
    pub fn advance_frame(&mut self) {
        let frame_ms = self.scheduler.frame_ms();
        self.scheduler.advance(frame_ms);
        while let Some(wakeup) = self.scheduler.pop_due() {
            match wakeup {
                Wakeup::Frame(_) => self.on_frame(),
                Wakeup::Timer(timer) => self.on_timer(timer),
            }
        }
    }

    /// Advance whole frames covering `ms` of virtual time
    pub fn run_for_ms(&mut self, ms: f64) {
        let frames = (ms / self.scheduler.frame_ms()).ceil() as u64;
        for _ in 0..frames {
            self.advance_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::GameMode;
    use crate::view::RecordingPresenter;

    type TestGame = GameLoop<ManualScheduler, RecordingPresenter>;

    const VIEWPORT: Viewport = Viewport {
        width: 1000.0,
        height: 600.0,
    };

    fn game(settings: Settings) -> TestGame {
        GameLoop::new(
            Settings {
                seed: Some(12345),
                ..settings
            },
            VIEWPORT,
            ManualScheduler::new(),
            RecordingPresenter::new(),
        )
    }

    fn count(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn test_start_arms_frame_and_spawn_timer() {
        let mut game = game(Settings::default());
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.scheduler().pending_frames(), 0);

        assert!(game.start());
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.scheduler().pending_frames(), 1);
        assert!(game.scheduler().has_interval(Timer::Spawn));
        assert!(!game.scheduler().has_interval(Timer::Countdown));

        assert!(!game.start());
    }

    #[test]
    fn test_endless_spawns_every_two_seconds() {
        let mut game = game(Settings::default());
        game.start();
        game.run_for_ms(6_100.0);

        let events = game.drain_events();
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::BallSpawned { .. })),
            3
        );
        // One frame pending at all times while running
        assert_eq!(game.scheduler().pending_frames(), 1);
    }

    #[test]
    fn test_spawn_uses_viewport_and_settings() {
        let mut game = game(Settings {
            ball_acceleration: 1.25,
            ..Settings::default()
        });
        let id = game.spawn_ball(0.25, 0.0);

        let ball = game.state().ball(id).unwrap();
        assert_eq!(ball.pos, Vec2::new(250.0, 0.0));
        assert_eq!(ball.acceleration, 1.25);
        assert_eq!(game.presenter().live_views(), 1);
        assert_eq!(game.presenter().view_of(id).unwrap().x, 250.0);

        // Out-of-range fractions are placed as given
        let id = game.spawn_ball(1.5, 0.0);
        assert_eq!(game.state().ball(id).unwrap().pos.x, 1500.0);
    }

    #[test]
    fn test_catch_destroys_view_and_scores() {
        let mut game = game(Settings::default());
        game.start();
        game.on_pointer_move(400.0);

        let id = game.spawn_ball(0.47, VIEWPORT.height - BASKET_HEIGHT);
        game.advance_frame();

        assert_eq!(game.score(), 1);
        assert_eq!(game.presenter().hud.score, 1);
        assert_eq!(game.presenter().live_views(), 0);
        assert_eq!(game.presenter().destroyed, 1);
        assert!(game.drain_events().contains(&GameEvent::BallCaught { id }));
    }

    #[test]
    fn test_miss_destroys_view_without_score() {
        let mut game = game(Settings::default());
        game.start();
        game.on_pointer_move(0.0);

        let id = game.spawn_ball(0.9, VIEWPORT.height - 1.0);
        for _ in 0..10 {
            game.advance_frame();
        }

        assert_eq!(game.score(), 0);
        assert_eq!(game.presenter().live_views(), 0);
        assert!(game.drain_events().contains(&GameEvent::BallMissed { id }));
    }

    #[test]
    fn test_views_follow_balls() {
        let mut game = game(Settings::default());
        game.start();
        let id = game.spawn_ball(0.1, 0.0);
        for _ in 0..3 {
            game.advance_frame();
        }
        let ball = game.state().ball(id).unwrap().clone();
        let view = game.presenter().view_of(id).unwrap();
        assert_eq!(view.y, ball.pos.y);
        assert_eq!(view.acceleration, BALL_ACCELERATION);
        assert!(!view.caught);
        assert!(ball.pos.y > 0.0);
    }

    #[test]
    fn test_timed_round_stops_after_duration() {
        let mut game = game(Settings::from_mode(GameMode::Timed));
        game.start();
        assert_eq!(game.presenter().hud.time_left_secs, Some(30));

        game.run_for_ms(29_900.0);
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.clock().time_left_secs(), 1);

        game.run_for_ms(200.0);
        assert_eq!(game.phase(), GamePhase::Stopped);
        assert!(!game.clock().is_running());
        assert_eq!(game.presenter().hud.time_left_secs, Some(0));

        let events = game.drain_events();
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::ClockTicked { .. })),
            30
        );
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::RoundOver { .. })),
            1
        );
        let spawned = count(&events, |e| matches!(e, GameEvent::BallSpawned { .. }));
        assert!((19..=20).contains(&spawned), "spawned {}", spawned);

        // Everything is cancelled
        assert_eq!(game.scheduler().pending_frames(), 0);
        assert_eq!(game.scheduler().active_intervals(), 0);
    }

    #[test]
    fn test_late_timers_after_round_do_nothing() {
        let mut game = game(Settings::from_mode(GameMode::Timed));
        game.start();
        game.run_for_ms(31_000.0);
        assert_eq!(game.phase(), GamePhase::Stopped);
        game.drain_events();
        let balls = game.state().balls.len();

        // A spawn timer that keeps firing, and extra countdown listeners
        for _ in 0..5 {
            game.on_timer(Timer::Spawn);
            game.on_timer(Timer::Countdown);
        }

        assert_eq!(game.state().balls.len(), balls);
        assert!(game.drain_events().is_empty());
        assert!(!game.stop());
    }

    #[test]
    fn test_spawn_gated_by_round_clock() {
        let mut game = game(Settings::from_mode(GameMode::Timed));
        game.start();
        // Clock halted from outside while the loop still runs
        game.clock.halt();
        game.on_timer(Timer::Spawn);
        assert!(game.state().balls.is_empty());
    }

    #[test]
    fn test_stop_freezes_balls_in_flight() {
        let mut game = game(Settings::default());
        game.start();
        let id = game.spawn_ball(0.5, 0.0);
        for _ in 0..10 {
            game.advance_frame();
        }

        assert!(game.stop());
        let frozen = game.state().ball(id).unwrap().pos;
        let frames = game.state().frames;

        // A frame callback that was already queued fires harmlessly
        game.on_frame();
        game.run_for_ms(1_000.0);

        assert_eq!(game.state().ball(id).unwrap().pos, frozen);
        assert_eq!(game.state().frames, frames);
        assert_eq!(game.presenter().live_views(), 1);
        assert_eq!(game.scheduler().pending_frames(), 0);
        assert_eq!(game.scheduler().active_intervals(), 0);
    }

    #[test]
    fn test_reset_allows_new_round() {
        let mut game = game(Settings::default());
        game.start();
        game.on_pointer_move(500.0);
        game.spawn_ball(0.5, VIEWPORT.height - BASKET_HEIGHT);
        game.spawn_ball(0.1, 0.0);
        game.advance_frame();
        assert_eq!(game.score(), 1);

        game.reset();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.score(), 0);
        assert!(game.state().balls.is_empty());
        assert_eq!(game.presenter().live_views(), 0);
        assert_eq!(game.presenter().stale_destroys, 0);

        assert!(game.start());
        assert_eq!(game.scheduler().pending_frames(), 1);
    }

    #[test]
    fn test_pointer_ignored_in_external_mode() {
        let mut game = game(Settings {
            input_mode: InputMode::External,
            ..Settings::default()
        });
        assert_eq!(game.sensor().subscriptions(), 1);

        game.on_pointer_move(10.0);
        assert_eq!(game.basket_x(), VIEWPORT.width / 2.0);

        game.on_sensor_sample(&JointSample {
            depth_x: 0.5,
            camera_z: 1.0,
        });
        assert!((game.basket_x() - 350.0).abs() < 1e-3);
        assert!((game.presenter().basket_x - 350.0).abs() < 1e-3);

        // Too far from the camera
        game.on_sensor_sample(&JointSample {
            depth_x: 0.9,
            camera_z: 2.5,
        });
        assert!((game.basket_x() - 350.0).abs() < 1e-3);
    }

    #[test]
    fn test_switching_input_mode_manages_subscription() {
        let mut game = game(Settings::default());
        assert_eq!(game.sensor().subscriptions(), 0);

        game.set_input_mode(InputMode::External);
        assert_eq!(game.sensor().subscriptions(), 1);
        game.set_input_mode(InputMode::External);
        assert_eq!(game.sensor().subscriptions(), 1);

        game.set_input_mode(InputMode::Pointer);
        assert_eq!(game.sensor().subscriptions(), 0);

        // Sensor samples are dropped once unsubscribed
        game.on_sensor_sample(&JointSample {
            depth_x: 0.1,
            camera_z: 1.0,
        });
        assert_eq!(game.basket_x(), VIEWPORT.width / 2.0);

        let configs: Vec<_> = game
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::SessionConfigChanged { config } => Some(config.body_events),
                _ => None,
            })
            .collect();
        assert_eq!(configs, vec![true, false]);
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let mut game = game(Settings {
            input_mode: InputMode::External,
            ..Settings::default()
        });
        game.start();
        game.spawn_ball(0.2, 0.0);
        game.spawn_ball(0.8, 0.0);

        game.shutdown();
        assert_eq!(game.phase(), GamePhase::Stopped);
        assert_eq!(game.presenter().live_views(), 0);
        assert_eq!(game.sensor().subscriptions(), 0);
        assert_eq!(game.scheduler().pending_frames(), 0);
        assert_eq!(game.scheduler().active_intervals(), 0);
    }

    #[test]
    fn test_reset_after_shutdown_restores_sensor() {
        let mut game = game(Settings {
            input_mode: InputMode::External,
            ..Settings::default()
        });
        game.start();
        game.shutdown();
        assert_eq!(game.sensor().subscriptions(), 0);

        game.reset();
        assert_eq!(game.input_mode(), InputMode::External);
        assert_eq!(game.sensor().subscriptions(), 1);
        assert!(game.start());

        game.on_sensor_sample(&JointSample {
            depth_x: 0.5,
            camera_z: 1.0,
        });
        assert!((game.basket_x() - 350.0).abs() < 1e-3);

        // A plain reset keeps the single subscription
        game.reset();
        assert_eq!(game.sensor().subscriptions(), 1);
    }

    #[test]
    fn test_non_finite_samples_leave_basket_alone() {
        let mut game = game(Settings {
            input_mode: InputMode::External,
            ..Settings::default()
        });
        game.start();
        for sample in [
            JointSample {
                depth_x: 0.5,
                camera_z: f32::NAN,
            },
            JointSample {
                depth_x: f32::NAN,
                camera_z: 1.0,
            },
            JointSample {
                depth_x: f32::INFINITY,
                camera_z: 1.0,
            },
        ] {
            game.on_sensor_sample(&sample);
        }
        assert_eq!(game.basket_x(), VIEWPORT.width / 2.0);

        // Catching still works afterwards
        game.spawn_ball(0.5, VIEWPORT.height - BASKET_HEIGHT);
        game.advance_frame();
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_resize_moves_miss_line() {
        let mut game = game(Settings::default());
        game.start();
        game.on_pointer_move(0.0);
        let id = game.spawn_ball(0.9, 550.0);

        game.resize(1000.0, 500.0);
        game.advance_frame();

        assert!(game.drain_events().contains(&GameEvent::BallMissed { id }));
    }

    #[test]
    fn test_event_buffer_is_bounded() {
        let mut game = game(Settings::default());
        for _ in 0..(MAX_PENDING_EVENTS + 10) {
            game.spawn_ball(0.5, 0.0);
        }
        let events = game.drain_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        // The ten oldest spawns were dropped
        assert!(matches!(
            events.first(),
            Some(GameEvent::BallSpawned { id, .. }) if *id == BallId(11)
        ));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_events_serialize_with_type_tag() {
        let json = serde_json::to_string(&GameEvent::BallCaught { id: BallId(3) }).unwrap();
        assert_eq!(json, r#"{"type":"BallCaught","id":3}"#);
    }
}
