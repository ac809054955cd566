//! Tracker service: the hexagonal core.
//!
//! [`TrackerService`] owns the detector, tracker, controller, serializer
//! and transmit sequencer.  It exposes a clean, host-agnostic API.  All I/O
//! flows through the [`ActuatorLink`] and [`EventSink`] injected at call
//! sites, making the entire loop testable with mock adapters.
//!
//! ```text
//!  regions ──▶ ┌──────────────────────────────────────┐ ──▶ ActuatorLink
//!              │            TrackerService             │
//!              │ detect · track · control · sequence   │ ──▶ EventSink
//!              └──────────────────────────────────────┘
//! ```
//!
//! Frames must be processed one at a time; `&mut self` enforces that within
//! Rust and [`FrameGate`](super::gate::FrameGate) helps hosts that deliver
//! frames from a capture thread.

use log::{debug, info, warn};

use crate::config::{ControlConfig, HsvRange, TrackingColor};
use crate::control::actuator::{ActuatorCommand, ActuatorController, ControllerTuning, Direction};
use crate::error::{Error, LinkError, Result};
use crate::link::{ActuatorLink, CommandSerializer, Payload};
use crate::tracking::{TrackingState, TrackingUpdate};
use crate::vision::detector::TargetDetector;
use crate::vision::{Region, ScreenCenter, TargetObservation};

use super::commands::AppCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::EventSink;
use super::sequencer::{Plan, Sequencer};

// ───────────────────────────────────────────────────────────────
// Frame report
// ───────────────────────────────────────────────────────────────

/// What happened to the command this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// No session is running; the frame was ignored.
    Inactive,
    /// The command matches what is already on the wire.
    Unchanged,
    /// Every write of the plan succeeded.
    Sent { writes: usize },
    /// The link refused the command; it stays pending.
    Dropped(LinkError),
    /// The command could not be encoded; nothing was sent.
    NotEncoded,
}

/// Result of one pass of the control loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Tracker outcome, `None` when no session is running.
    pub update: Option<TrackingUpdate>,
    pub command: ActuatorCommand,
    pub delivery: Delivery,
}

impl FrameReport {
    fn inactive() -> Self {
        Self {
            update: None,
            command: ActuatorCommand::NEUTRAL,
            delivery: Delivery::Inactive,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// TrackerService
// ───────────────────────────────────────────────────────────────

/// The tracker service orchestrates the vision-to-actuator loop.
pub struct TrackerService {
    config: ControlConfig,
    detector: TargetDetector,
    tracking: TrackingState,
    controller: ActuatorController,
    serializer: CommandSerializer,
    sequencer: Sequencer,
    /// Set on session start, cleared on stop.
    screen: Option<ScreenCenter>,
    frames_processed: u64,
    frames_skipped: u64,
    payloads_sent: u64,
    link_failures: u64,
}

impl TrackerService {
    /// Construct the service from a validated configuration.
    ///
    /// Does **not** start a session; call [`start`](Self::start) once the
    /// frame size is known.
    pub fn new(config: ControlConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            detector: TargetDetector::new(config.min_contour_area),
            tracking: TrackingState::new(config.miss_count_threshold),
            controller: ActuatorController::new(ControllerTuning::from(&config)),
            serializer: CommandSerializer::new(config.pwm, config.wire_format),
            sequencer: Sequencer::new(),
            screen: None,
            frames_processed: 0,
            frames_skipped: 0,
            payloads_sent: 0,
            link_failures: 0,
            config,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Begin a capture session.  Fixes the screen centre for the session
    /// and clears any leftover tracking state.
    pub fn start(&mut self, width: u32, height: u32, sink: &mut impl EventSink) -> Result<()> {
        let screen = ScreenCenter::from_frame(width, height)
            .ok_or(Error::Config("frame dimensions must be non-zero"))?;
        self.clear_state();
        self.screen = Some(screen);
        sink.emit(&AppEvent::Started { width, height });
        info!(
            "session started {}x{}, screen center {:?}",
            width,
            height,
            screen.point()
        );
        Ok(())
    }

    /// End the capture session: force neutral, make a best-effort final
    /// transmission and reset everything so the next start begins clean.
    pub fn stop(&mut self, link: &mut impl ActuatorLink, sink: &mut impl EventSink) -> Delivery {
        self.clear_state();
        let delivery = self.write_neutral(link);
        self.sequencer.reset();

        self.screen = None;
        sink.emit(&AppEvent::Stopped);
        info!("session stopped ({:?})", delivery);
        delivery
    }

    // ── Per-frame orchestration ───────────────────────────────

    /// Run one full pass: detect → track → control → sequence → transmit.
    pub fn process_frame<R: Region>(
        &mut self,
        regions: &[R],
        link: &mut impl ActuatorLink,
        sink: &mut impl EventSink,
    ) -> FrameReport {
        if self.screen.is_none() {
            self.frames_skipped += 1;
            return FrameReport::inactive();
        }
        let obs = self.detector.detect(regions);
        self.step(obs, link, sink)
    }

    /// Same pass for hosts that run their own target selection.  An
    /// observation at or below the minimum area counts as no target.
    pub fn process_observation(
        &mut self,
        obs: Option<TargetObservation>,
        link: &mut impl ActuatorLink,
        sink: &mut impl EventSink,
    ) -> FrameReport {
        if self.screen.is_none() {
            self.frames_skipped += 1;
            return FrameReport::inactive();
        }
        let min_area = self.config.min_contour_area;
        self.step(obs.filter(|o| o.area > min_area), link, sink)
    }

    fn step(
        &mut self,
        obs: Option<TargetObservation>,
        link: &mut impl ActuatorLink,
        sink: &mut impl EventSink,
    ) -> FrameReport {
        let Some(screen) = self.screen else {
            return FrameReport::inactive();
        };
        self.frames_processed += 1;

        let prev_direction = self.controller.direction();
        let had_target = self.tracking.has_target();

        // 1. Debounce
        let update = self.tracking.observe(obs);

        // 2. Control law
        match update {
            TrackingUpdate::Tracking(target) => {
                if !had_target {
                    sink.emit(&AppEvent::TargetAcquired(target));
                }
                self.controller.update_target_pwm(
                    &screen,
                    Some(target.center),
                    self.config.boundaries(),
                );
            }
            TrackingUpdate::Lost => {
                self.controller.reset();
                self.sequencer.reset();
                sink.emit(&AppEvent::TargetLost);
            }
            // Hold the previous command through short dropouts.
            TrackingUpdate::Coasting { .. } | TrackingUpdate::Searching => {}
        }

        let direction = self.controller.direction();
        if direction != prev_direction {
            sink.emit(&AppEvent::DirectionChanged {
                from: prev_direction,
                to: direction,
            });
        }

        // 3. Sequence and transmit
        let delivery = self.transmit(link, sink);

        FrameReport {
            update: Some(update),
            command: self.controller.command(),
            delivery,
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a host command (settings change, operator stop).
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        link: &mut impl ActuatorLink,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::UpdateConfig(new_config) => match new_config.validate() {
                Ok(()) => {
                    self.apply_config(new_config);
                    sink.emit(&AppEvent::ConfigApplied);
                    info!("configuration updated at runtime");
                }
                Err(e) => {
                    warn!("configuration rejected: {}", e);
                    sink.emit(&AppEvent::ConfigRejected(e));
                }
            },
            AppCommand::SetTrackingColor(color) => {
                self.config.tracking_color = color;
                info!("tracking colour set to {:?}", color);
            }
            AppCommand::EmergencyStop => {
                warn!("emergency stop");
                let had_target = self.tracking.has_target();
                let prev_direction = self.controller.direction();
                self.clear_state();
                if had_target {
                    sink.emit(&AppEvent::TargetLost);
                }
                if prev_direction != Direction::Neutral {
                    sink.emit(&AppEvent::DirectionChanged {
                        from: prev_direction,
                        to: Direction::Neutral,
                    });
                }
                match self.write_neutral(link) {
                    Delivery::Sent { .. } => sink.emit(&AppEvent::CommandSent {
                        frame: self.serializer.frame(&ActuatorCommand::NEUTRAL),
                        primed: false,
                    }),
                    Delivery::Dropped(e) => sink.emit(&AppEvent::CommandDropped(e)),
                    _ => {}
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current state.
    pub fn telemetry(&self) -> TelemetryData {
        let cmd = self.controller.command();
        TelemetryData {
            session_active: self.screen.is_some(),
            screen_center: self.screen.map(|s| s.point()),
            target: self.tracking.last_target(),
            miss_count: self.tracking.miss_count(),
            direction: cmd.direction,
            steering: cmd.steering,
            throttle: cmd.throttle,
            frames_processed: self.frames_processed,
            frames_skipped: self.frames_skipped,
            payloads_sent: self.payloads_sent,
            link_failures: self.link_failures,
        }
    }

    pub fn is_active(&self) -> bool {
        self.screen.is_some()
    }

    pub fn command(&self) -> ActuatorCommand {
        self.controller.command()
    }

    pub fn direction(&self) -> Direction {
        self.controller.direction()
    }

    pub fn is_reversing(&self) -> bool {
        self.controller.is_reversing()
    }

    pub fn target(&self) -> Option<TargetObservation> {
        self.tracking.last_target()
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn tracking_color(&self) -> TrackingColor {
        self.config.tracking_color
    }

    /// HSV bounds the upstream segmenter should threshold with.
    pub fn hsv_range(&self) -> HsvRange {
        self.config.tracking_color.hsv_range()
    }

    /// Payload most recently put on the wire, if any.
    pub fn last_sent(&self) -> Option<&Payload> {
        self.sequencer.last_sent()
    }

    // ── Internal ──────────────────────────────────────────────

    fn clear_state(&mut self) {
        self.tracking.reset();
        self.controller.reset();
        self.sequencer.reset();
    }

    fn apply_config(&mut self, config: ControlConfig) {
        self.detector.set_min_area(config.min_contour_area);
        self.tracking.set_miss_threshold(config.miss_count_threshold);
        self.controller.set_tuning(ControllerTuning::from(&config));
        self.serializer = CommandSerializer::new(config.pwm, config.wire_format);
        self.config = config;
    }

    /// Best-effort neutral write, outside the per-frame plan.  A delivered
    /// neutral becomes the last sent payload.
    fn write_neutral(&mut self, link: &mut impl ActuatorLink) -> Delivery {
        let neutral = match self.serializer.neutral() {
            Ok(n) => n,
            Err(e) => {
                warn!("neutral not encoded: {}", e);
                return Delivery::NotEncoded;
            }
        };
        if !link.is_ready() {
            debug!("link not connected, neutral not sent");
            return Delivery::Dropped(LinkError::Unavailable);
        }
        match send(link, &neutral) {
            Ok(()) => {
                self.payloads_sent += 1;
                self.sequencer.commit(neutral, Plan::Send);
                Delivery::Sent { writes: 1 }
            }
            Err(e) => {
                self.link_failures += 1;
                warn!("neutral not delivered: {}", e);
                Delivery::Dropped(e)
            }
        }
    }

    /// Encode the current command and put it on the wire if it changed.
    fn transmit(&mut self, link: &mut impl ActuatorLink, sink: &mut impl EventSink) -> Delivery {
        let command = self.controller.command();
        let payload = match self.serializer.encode(&command) {
            Ok(p) => p,
            Err(e) => {
                warn!("command {:?} not encoded: {}", command, e);
                sink.emit(&AppEvent::EncodeFailed(e.into()));
                return Delivery::NotEncoded;
            }
        };

        let plan = self.sequencer.plan(&payload, self.controller.is_reversing());
        if plan == Plan::Skip {
            return Delivery::Unchanged;
        }

        if !link.is_ready() {
            debug!("link not connected, dropping command");
            sink.emit(&AppEvent::CommandDropped(LinkError::Unavailable));
            return Delivery::Dropped(LinkError::Unavailable);
        }

        info!(
            "update actuator: target={:?} miss={} plan={:?}",
            self.tracking.last_target(),
            self.tracking.miss_count(),
            plan
        );

        let written = if plan == Plan::PrimeReverse {
            let neutral = match self.serializer.neutral() {
                Ok(n) => n,
                Err(e) => {
                    warn!("neutral not encoded: {}", e);
                    sink.emit(&AppEvent::EncodeFailed(e.into()));
                    return Delivery::NotEncoded;
                }
            };
            send_burst(link, &payload, &neutral)
        } else {
            send(link, &payload)
        };

        match written {
            Ok(()) => {
                let writes = plan.writes();
                self.payloads_sent += writes as u64;
                sink.emit(&AppEvent::CommandSent {
                    frame: self.serializer.frame(&command),
                    primed: plan == Plan::PrimeReverse,
                });
                self.sequencer.commit(payload, plan);
                Delivery::Sent { writes }
            }
            Err(e) => {
                self.link_failures += 1;
                warn!("command not delivered: {}", e);
                sink.emit(&AppEvent::CommandDropped(e));
                Delivery::Dropped(e)
            }
        }
    }
}

fn send(link: &mut impl ActuatorLink, payload: &Payload) -> core::result::Result<(), LinkError> {
    info!("sending PWM values: {}", payload.escape_ascii());
    link.write(payload)
}

/// `payload`, neutral, `payload` as one burst.
fn send_burst(
    link: &mut impl ActuatorLink,
    payload: &Payload,
    neutral: &Payload,
) -> core::result::Result<(), LinkError> {
    info!("sending PWM values: {} (neutral primed)", payload.escape_ascii());
    link.write_burst(&[payload.as_slice(), neutral.as_slice(), payload.as_slice()])
}
