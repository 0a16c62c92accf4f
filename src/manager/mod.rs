pub mod inventory;
pub mod runner;

use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use self::inventory::default_params_for_effect;
use self::runner::{EffectRunner, DEFAULT_FRAME_DELAY};
use crate::config::StripSettings;
use crate::interface::controller::{Color, Controller};
use crate::resource::controller::neopixel_udp::NeoPixelUdpController;
use crate::resource::strip::matrix::MatrixLayout;
use crate::resource::strip::PixelStrip;

pub(crate) type ControllerRef = Arc<Mutex<Box<dyn Controller>>>;
pub(crate) type StripRef = Arc<Mutex<PixelStrip>>;

/// The public surface of the crate: owns the shared strip state, the
/// transport, and at most one animation session.
///
/// Direct setters and the animation loop run on different threads but go
/// through the same mutexes, so mutation + flush stays coherent per frame;
/// across the two writers the ordering is last-writer-wins.
pub struct LightingManager {
    strip: StripRef,
    controller: ControllerRef,
    runner: Mutex<Option<EffectRunner>>,
    active_effect_id: Mutex<Option<String>>,
}

impl LightingManager {
    /// Build a manager over the UDP transport described by `settings`.
    pub fn connect(settings: &StripSettings) -> Result<Self, String> {
        let controller = NeoPixelUdpController::new(&settings.endpoint())?;
        Ok(Self::new(Box::new(controller), settings))
    }

    /// Build a manager over an arbitrary controller (tests, alternate
    /// transports).
    pub fn new(controller: Box<dyn Controller>, settings: &StripSettings) -> Self {
        let mut strip = PixelStrip::new(settings.leds_count);
        if strip.set_brightness(settings.leds_brightness).is_err() {
            log::warn!(
                brightness = settings.leds_brightness;
                "Ignoring out-of-range configured brightness"
            );
        }

        let manager = Self {
            strip: Arc::new(Mutex::new(strip)),
            controller: Arc::new(Mutex::new(controller)),
            runner: Mutex::new(None),
            active_effect_id: Mutex::new(None),
        };

        // Push one initial all-black frame so the device reflects our state.
        if let Err(err) = manager.flush() {
            log::warn!(err:display = err; "Initial frame flush failed");
        }

        manager
    }

    pub fn led_count(&self) -> usize {
        self.strip.lock().unwrap().len()
    }

    pub fn brightness(&self) -> u8 {
        self.strip.lock().unwrap().brightness()
    }

    pub fn endpoint(&self) -> String {
        self.controller.lock().unwrap().endpoint()
    }

    /// Serialize the current strip state and transmit it.
    pub fn flush(&self) -> Result<(), String> {
        let strip = self.strip.lock().unwrap();
        let mut controller = self.controller.lock().unwrap();
        controller.update(strip.pixels(), strip.brightness())
    }

    /// Set every pixel to `color` and transmit.
    pub fn set_color(&self, color: Color) -> Result<(), String> {
        {
            let mut strip = self.strip.lock().unwrap();
            strip.fill(color);
        }
        self.flush()
    }

    /// Set one pixel without transmitting; batch with `flush`. An
    /// out-of-range index is silently ignored.
    pub fn set_pixel(&self, index: usize, color: Color) {
        self.strip.lock().unwrap().set(index, color);
    }

    /// Set one pixel through the configured matrix layout, without
    /// transmitting. No-op when no layout is configured or the coordinate is
    /// out of range.
    pub fn set_pixel_at(&self, x: usize, y: usize, color: Color) {
        self.strip.lock().unwrap().set_at(x, y, color);
    }

    pub fn configure_matrix(&self, layout: Option<MatrixLayout>) {
        self.strip.lock().unwrap().set_matrix(layout);
    }

    /// Paint a gradient across the strip.
    ///
    /// Not implemented: the gradient picker owns the stop format, and
    /// guessing an interpolation here would bake in the wrong one.
    /// TODO: interpolate across gradient stops once the picker's stop format
    /// is settled.
    pub fn set_gradient(&self, _colors: &[Color], _points: &[f32]) -> Result<(), String> {
        Ok(())
    }

    /// Update brightness for subsequent frames. Values above 100 are
    /// rejected and the prior setting is kept.
    pub fn set_brightness(&self, value: u8) -> Result<(), String> {
        self.strip.lock().unwrap().set_brightness(value)
    }

    /// Start an animation, superseding any running session. The outgoing
    /// loop is joined first so two loops never interleave writes; the join is
    /// bounded by roughly one frame delay.
    ///
    /// A missing or non-positive `delay` falls back to the 0.04 s default.
    pub fn start_animation(&self, effect_id: &str, delay: Option<f64>) -> Result<(), String> {
        {
            let mut runner = self.runner.lock().unwrap();
            if let Some(prev) = runner.take() {
                prev.stop();
            }
        }
        *self.active_effect_id.lock().unwrap() = None;

        let delay = delay.filter(|d| *d > 0.0);
        let frame_delay = delay
            .map(Duration::from_secs_f64)
            .unwrap_or(DEFAULT_FRAME_DELAY);

        let runner = EffectRunner::start(
            effect_id,
            self.strip.clone(),
            self.controller.clone(),
            frame_delay,
        )?;

        // Registry defaults first, then the caller's delay on top.
        let mut params = default_params_for_effect(effect_id).unwrap_or_default();
        if let Some(d) = delay {
            params.insert("delay".to_string(), Value::from(d));
        }
        if !params.is_empty() {
            runner.update_params(Value::Object(params));
        }

        *self.runner.lock().unwrap() = Some(runner);
        *self.active_effect_id.lock().unwrap() = Some(effect_id.to_string());

        Ok(())
    }

    /// Cooperative, non-blocking stop: the loop observes the cleared flag at
    /// its next frame boundary (bounded by one frame delay). Calling this
    /// with no active session is a no-op.
    pub fn stop_animation(&self) {
        if let Some(runner) = self.runner.lock().unwrap().take() {
            runner.cancel();
        }
        *self.active_effect_id.lock().unwrap() = None;
    }

    pub fn is_animating(&self) -> bool {
        self.runner
            .lock()
            .unwrap()
            .as_ref()
            .map(EffectRunner::is_running)
            .unwrap_or(false)
    }

    pub fn active_effect(&self) -> Option<String> {
        self.active_effect_id.lock().unwrap().clone()
    }

    /// Apply new settings wholesale: re-target the transport and replace the
    /// strip with a fresh all-black buffer of the new length. A running
    /// animation is left running; it picks up the new buffer on its next
    /// frame.
    pub fn reconfigure(&self, settings: &StripSettings) -> Result<(), String> {
        {
            let mut controller = self.controller.lock().unwrap();
            controller.reconfigure(&settings.endpoint())?;
        }
        let mut strip = self.strip.lock().unwrap();
        strip.reconfigure(settings.leds_count, settings.leds_brightness);
        Ok(())
    }

    /// Best-effort liveness probe of the endpoint.
    pub fn is_reachable(&self) -> bool {
        self.controller.lock().unwrap().is_reachable()
    }
}

impl Drop for LightingManager {
    fn drop(&mut self) {
        self.stop_animation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointConfig;

    /// Records every transmitted frame instead of touching the network.
    struct CaptureController {
        frames: Arc<Mutex<Vec<(usize, u8)>>>,
    }

    impl Controller for CaptureController {
        fn endpoint(&self) -> String {
            "capture".to_string()
        }

        fn model(&self) -> String {
            "capture".to_string()
        }

        fn update(&mut self, colors: &[Color], brightness: u8) -> Result<(), String> {
            self.frames.lock().unwrap().push((colors.len(), brightness));
            Ok(())
        }

        fn reconfigure(&mut self, _endpoint: &EndpointConfig) -> Result<(), String> {
            Ok(())
        }
    }

    fn capture_manager(leds: usize) -> (LightingManager, Arc<Mutex<Vec<(usize, u8)>>>) {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let controller = CaptureController {
            frames: frames.clone(),
        };
        let settings = StripSettings {
            leds_count: leds,
            ..StripSettings::default()
        };
        (LightingManager::new(Box::new(controller), &settings), frames)
    }

    #[test]
    fn construction_pushes_an_initial_frame() {
        let (_manager, frames) = capture_manager(10);
        assert_eq!(frames.lock().unwrap().as_slice(), &[(10, 100)]);
    }

    #[test]
    fn set_color_flushes_once() {
        let (manager, frames) = capture_manager(5);
        manager.set_color(Color::new(1, 2, 3)).unwrap();
        assert_eq!(frames.lock().unwrap().len(), 2);
    }

    #[test]
    fn stop_animation_is_idempotent_when_idle() {
        let (manager, _frames) = capture_manager(5);
        manager.stop_animation();
        manager.stop_animation();
        assert!(!manager.is_animating());
    }

    #[test]
    fn unknown_effect_is_an_error() {
        let (manager, _frames) = capture_manager(5);
        let err = manager.start_animation("disco_inferno", None).unwrap_err();
        assert!(err.contains("not found"), "unexpected error: {}", err);
        assert!(!manager.is_animating());
    }

    #[test]
    fn superseding_start_leaves_one_session() {
        let (manager, _frames) = capture_manager(5);
        manager.start_animation("color_fade", Some(0.001)).unwrap();
        manager
            .start_animation("running_rainbow", Some(0.001))
            .unwrap();
        assert!(manager.is_animating());
        assert_eq!(manager.active_effect().as_deref(), Some("running_rainbow"));
        manager.stop_animation();
    }

    #[test]
    fn gradient_is_a_documented_noop() {
        let (manager, frames) = capture_manager(5);
        let before = frames.lock().unwrap().len();
        manager
            .set_gradient(&[Color::new(255, 0, 0), Color::new(0, 0, 255)], &[0.0, 1.0])
            .unwrap();
        assert_eq!(frames.lock().unwrap().len(), before);
    }

    #[test]
    fn reconfigure_resets_the_strip() {
        let (manager, _frames) = capture_manager(5);
        let settings = StripSettings {
            leds_count: 12,
            leds_brightness: 30,
            ..StripSettings::default()
        };
        manager.reconfigure(&settings).unwrap();
        assert_eq!(manager.led_count(), 12);
        assert_eq!(manager.brightness(), 30);
    }
}
