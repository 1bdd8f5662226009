use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::input::{ActionStates, KeyBindings};
use super::metrics::StatsAccumulator;
use super::{InputSnapshot, Session, SessionCommand, StatsHandle};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub stats_log_interval: Duration,
    pub bindings: KeyBindings,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Echo Chambers".to_string(),
            window_width: 1280,
            window_height: 720,
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            stats_log_interval: Duration::from_secs(1),
            bindings: KeyBindings::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(config: LoopConfig, session: Box<dyn Session>) -> Result<(), AppError> {
    run_app_with_stats(config, session, StatsHandle::default())
}

pub fn run_app_with_stats(
    config: LoopConfig,
    session: Box<dyn Session>,
    stats_handle: StatsHandle,
) -> Result<(), AppError> {
    run_loop(config, session, stats_handle)
}

fn run_loop(
    config: LoopConfig,
    mut session: Box<dyn Session>,
    stats_handle: StatsHandle,
) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .with_inner_size(LogicalSize::new(
            config.window_width as f64,
            config.window_height as f64,
        ))
        .build(&event_loop)
        .map_err(AppError::CreateWindow)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let target_tps = config.target_tps.max(1);
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let stats_log_interval =
        normalize_non_zero_duration(config.stats_log_interval, Duration::from_secs(1));
    let fixed_dt = Duration::from_secs_f64(1.0 / target_tps as f64);
    let fixed_dt_seconds = fixed_dt.as_secs_f32();
    let mut input_collector = InputCollector::new(config.bindings.clone());

    session.start();
    info!(
        target_tps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame,
        stats_log_interval_ms = stats_log_interval.as_millis() as u64,
        "loop_config"
    );

    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();
    let mut stats_accumulator = StatsAccumulator::new(stats_log_interval);
    let mut last_applied_title: Option<String> = None;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    input_collector.mark_quit_requested();
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;

                    let clamped_frame_dt = clamp_frame_delta(raw_frame_dt, max_frame_delta);
                    accumulator = accumulator.saturating_add(clamped_frame_dt);

                    let step_plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
                    for _ in 0..step_plan.ticks_to_run {
                        let input_snapshot = input_collector.snapshot_for_tick();
                        let command = session.update(fixed_dt_seconds, &input_snapshot);
                        if command == SessionCommand::Quit {
                            info!(reason = "session_quit", "shutdown_requested");
                            window_target.exit();
                        }
                        stats_accumulator.record_tick();
                    }
                    accumulator = step_plan.remaining_accumulator;

                    if step_plan.dropped_backlog > Duration::ZERO {
                        warn!(
                            dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                            max_ticks_per_frame, "sim_clamp_triggered"
                        );
                    }

                    let next_title = session.title();
                    if next_title != last_applied_title {
                        match &next_title {
                            Some(title) => window.set_title(title),
                            None => window.set_title(&config.window_title),
                        }
                        last_applied_title = next_title;
                    }
                    stats_accumulator.record_frame(raw_frame_dt);

                    if let Some(snapshot) = stats_accumulator.maybe_snapshot(now) {
                        stats_handle.publish(snapshot);
                        info!(
                            fps = snapshot.fps,
                            tps = snapshot.tps,
                            avg_frame_ms = snapshot.avg_frame_ms,
                            max_frame_ms = snapshot.max_frame_ms,
                            "loop_stats"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                session.shutdown();
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Default)]
struct InputCollector {
    bindings: KeyBindings,
    quit_requested: bool,
    held: ActionStates,
    was_down: ActionStates,
    pressed_edges: ActionStates,
    save_key_is_down: bool,
    save_pressed_edge: bool,
    close_key_is_down: bool,
    close_pressed_edge: bool,
}

impl InputCollector {
    fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    fn mark_quit_requested(&mut self) {
        self.quit_requested = true;
    }

    fn handle_keyboard_input(&mut self, key_event: &winit::event::KeyEvent) {
        let PhysicalKey::Code(code) = key_event.physical_key else {
            return;
        };
        let is_pressed = key_event.state == ElementState::Pressed;
        self.handle_key_state(code, is_pressed);
    }

    fn handle_key_state(&mut self, code: KeyCode, is_pressed: bool) {
        if is_save_key(code) {
            if is_pressed {
                if !self.save_key_is_down {
                    self.save_pressed_edge = true;
                }
                self.save_key_is_down = true;
            } else {
                self.save_key_is_down = false;
            }
            return;
        }

        if is_close_key(code) {
            if is_pressed {
                if !self.close_key_is_down {
                    self.close_pressed_edge = true;
                }
                self.close_key_is_down = true;
            } else {
                self.close_key_is_down = false;
            }
            return;
        }

        let Some(action) = self.bindings.action_for(code) else {
            return;
        };
        if is_pressed && !self.was_down.is_down(action) {
            self.pressed_edges.set(action, true);
        }
        self.held.set(action, is_pressed);
        self.was_down.set(action, is_pressed);
    }

    fn snapshot_for_tick(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot::new(
            self.quit_requested,
            self.save_pressed_edge,
            self.close_pressed_edge,
            self.held,
            self.pressed_edges,
        );
        self.pressed_edges = ActionStates::default();
        self.save_pressed_edge = false;
        self.close_pressed_edge = false;
        snapshot
    }
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: accumulator,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn is_save_key(code: KeyCode) -> bool {
    code == KeyCode::F5
}

fn is_close_key(code: KeyCode) -> bool {
    code == KeyCode::Escape
}

#[cfg(test)]
mod tests {
    use super::super::PlayerAction;
    use super::*;

    #[test]
    fn clamp_frame_delta_caps_large_frame() {
        let max_frame_delta = Duration::from_millis(250);
        let raw_frame_dt = Duration::from_millis(600);

        assert_eq!(
            clamp_frame_delta(raw_frame_dt, max_frame_delta),
            max_frame_delta
        );
    }

    #[test]
    fn plan_sim_steps_runs_expected_ticks_without_drop() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(48), fixed_dt, 5);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::ZERO);
    }

    #[test]
    fn plan_sim_steps_drops_backlog_when_tick_cap_hit() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(120), fixed_dt, 3);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::from_millis(72));
    }

    #[test]
    fn held_movement_key_stays_down_across_ticks() {
        let mut input = InputCollector::new(KeyBindings::default());
        input.handle_key_state(KeyCode::KeyW, true);

        let first = input.snapshot_for_tick();
        let second = input.snapshot_for_tick();

        assert!(first.is_down(PlayerAction::MoveForward));
        assert!(second.is_down(PlayerAction::MoveForward));
    }

    #[test]
    fn pressed_edge_is_reported_for_a_single_tick() {
        let mut input = InputCollector::new(KeyBindings::default());
        input.handle_key_state(KeyCode::KeyE, true);

        let first = input.snapshot_for_tick();
        let second = input.snapshot_for_tick();

        assert!(first.pressed(PlayerAction::Interact));
        assert!(!second.pressed(PlayerAction::Interact));
        assert!(second.is_down(PlayerAction::Interact));
    }

    #[test]
    fn held_key_does_not_retrigger_edge_without_release() {
        let mut input = InputCollector::new(KeyBindings::default());

        input.handle_key_state(KeyCode::KeyE, true);
        assert!(input.snapshot_for_tick().pressed(PlayerAction::Interact));

        input.handle_key_state(KeyCode::KeyE, true);
        assert!(!input.snapshot_for_tick().pressed(PlayerAction::Interact));

        input.handle_key_state(KeyCode::KeyE, false);
        input.handle_key_state(KeyCode::KeyE, true);
        assert!(input.snapshot_for_tick().pressed(PlayerAction::Interact));
    }

    #[test]
    fn rebound_key_feeds_the_new_action() {
        let mut bindings = KeyBindings::default();
        bindings.rebind(PlayerAction::Interact, KeyCode::KeyQ);
        let mut input = InputCollector::new(bindings);

        input.handle_key_state(KeyCode::KeyQ, true);
        let snapshot = input.snapshot_for_tick();

        assert!(snapshot.pressed(PlayerAction::Interact));
        assert!(snapshot.is_down(PlayerAction::Interact));
    }

    #[test]
    fn unbound_key_is_ignored() {
        let mut input = InputCollector::new(KeyBindings::default());
        input.handle_key_state(KeyCode::KeyZ, true);

        let snapshot = input.snapshot_for_tick();
        for action in PlayerAction::ALL {
            assert!(!snapshot.is_down(action));
            assert!(!snapshot.pressed(action));
        }
    }

    #[test]
    fn save_key_edge_is_single_tick() {
        let mut input = InputCollector::new(KeyBindings::default());
        input.handle_key_state(KeyCode::F5, true);

        assert!(input.snapshot_for_tick().save_pressed());
        assert!(!input.snapshot_for_tick().save_pressed());

        input.handle_key_state(KeyCode::F5, false);
        input.handle_key_state(KeyCode::F5, true);
        assert!(input.snapshot_for_tick().save_pressed());
    }

    #[test]
    fn escape_close_edge_is_single_tick() {
        let mut input = InputCollector::new(KeyBindings::default());
        input.handle_key_state(KeyCode::Escape, true);

        assert!(input.snapshot_for_tick().close_pressed());
        assert!(!input.snapshot_for_tick().close_pressed());
    }
}
