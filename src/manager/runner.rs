use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::inventory::create_effect;
use super::{ControllerRef, StripRef};

/// Fallback frame period when the caller supplies none.
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(40);

/// One animation session: a background loop ticking an effect into the shared
/// strip and flushing every frame until cancelled.
///
/// Cancellation is cooperative: the flag is checked once per frame, so after
/// `cancel()` the loop quiesces within roughly one frame delay. `stop()` also
/// joins, for callers that need the loop fully gone before continuing.
pub struct EffectRunner {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
    params_tx: flume::Sender<Value>,
}

impl EffectRunner {
    pub(super) fn start(
        effect_id: &str,
        strip: StripRef,
        controller: ControllerRef,
        frame_delay: Duration,
    ) -> Result<Self, String> {
        let mut effect =
            create_effect(effect_id).ok_or_else(|| format!("Effect '{}' not found", effect_id))?;

        let (params_tx, params_rx) = flume::unbounded::<Value>();
        let running = Arc::new(AtomicBool::new(true));
        let running_thread = running.clone();
        let effect_id = effect_id.to_string();

        let thread = thread::spawn(move || {
            let started = Instant::now();
            let mut frame_delay = frame_delay;

            while running_thread.load(Ordering::Relaxed) {
                // Apply pending parameter updates before rendering the frame.
                while let Ok(params) = params_rx.try_recv() {
                    if let Some(delay) = params.get("delay").and_then(Value::as_f64) {
                        if delay > 0.0 {
                            frame_delay = Duration::from_secs_f64(delay);
                        }
                    }
                    effect.update_params(params);
                }

                {
                    let mut strip = strip.lock().unwrap();
                    let brightness = strip.brightness();
                    effect.tick(started.elapsed(), strip.pixels_mut());

                    let mut controller = controller.lock().unwrap();
                    if let Err(err) = controller.update(strip.pixels(), brightness) {
                        // The strip being offline must not kill the loop; the
                        // next frame simply tries again.
                        log::warn!(
                            effect = effect_id.as_str(),
                            err:display = err;
                            "[runner] Frame flush failed"
                        );
                    }
                }

                // No locks are held while sleeping.
                thread::sleep(frame_delay);
            }
        });

        Ok(Self {
            running,
            thread: Some(thread),
            params_tx,
        })
    }

    pub fn update_params(&self, params: Value) {
        let _ = self.params_tx.send(params);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Non-blocking cooperative stop: the loop exits at its next frame
    /// boundary.
    pub fn cancel(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Stop and wait for the loop to exit.
    pub fn stop(mut self) {
        self.cancel();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        // An abandoned runner must not leave a detached loop spinning.
        self.cancel();
    }
}
