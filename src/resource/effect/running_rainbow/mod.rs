use crate::interface::controller::Color;
use crate::interface::effect::{Effect, EffectMetadata, EffectParam, EffectParamKind};
use crate::resource::effect::wheel;
use inventory;
use std::time::Duration;

/// A full-spectrum band stretched across the strip, rotating one pixel per
/// frame. A complete revolution takes `len` frames.
pub struct RunningRainbowEffect {
    step: usize,
}

const RUNNING_RAINBOW_PARAMS: [EffectParam; 1] = [EffectParam {
    key: "delay",
    label: "Frame delay (s)",
    kind: EffectParamKind::Slider {
        min: 0.001,
        max: 1.0,
        step: 0.001,
        default: 0.04,
    },
}];

impl Effect for RunningRainbowEffect {
    fn id(&self) -> String {
        "running_rainbow".to_string()
    }

    fn name(&self) -> String {
        "Running Rainbow".to_string()
    }

    fn tick(&mut self, _elapsed: Duration, buffer: &mut [Color]) {
        let len = buffer.len();
        if len == 0 {
            return;
        }
        if self.step >= len {
            // The strip shrank under us; restart the revolution.
            self.step = 0;
        }

        for (i, pixel) in buffer.iter_mut().enumerate() {
            let loc = (i + self.step) % len;
            *pixel = wheel((loc * 256 / len) as u8);
        }

        self.step = (self.step + 1) % len;
    }
}

fn factory() -> Box<dyn Effect> {
    Box::new(RunningRainbowEffect { step: 0 })
}

inventory::submit!(EffectMetadata {
    id: "running_rainbow",
    name: "Running Rainbow",
    description: Some("Rotating full-spectrum band"),
    group: Some("Animations"),
    params: &RUNNING_RAINBOW_PARAMS,
    factory,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_spreads_the_wheel_across_the_strip() {
        let mut effect = RunningRainbowEffect { step: 0 };
        let mut buffer = vec![Color::BLACK; 4];
        effect.tick(Duration::ZERO, &mut buffer);

        assert_eq!(buffer[0], wheel(0));
        assert_eq!(buffer[1], wheel(64));
        assert_eq!(buffer[2], wheel(128));
        assert_eq!(buffer[3], wheel(192));
    }

    #[test]
    fn band_advances_one_pixel_per_frame() {
        let mut effect = RunningRainbowEffect { step: 0 };
        let mut buffer = vec![Color::BLACK; 4];
        effect.tick(Duration::ZERO, &mut buffer);
        let first = buffer.clone();

        effect.tick(Duration::ZERO, &mut buffer);
        // Frame 2 shows the same colors shifted by one position.
        assert_eq!(buffer[0], first[1]);
        assert_eq!(buffer[3], first[0]);
    }

    #[test]
    fn revolution_wraps_after_len_frames() {
        let mut effect = RunningRainbowEffect { step: 0 };
        let mut buffer = vec![Color::BLACK; 4];
        effect.tick(Duration::ZERO, &mut buffer);
        let first = buffer.clone();
        for _ in 0..4 {
            effect.tick(Duration::ZERO, &mut buffer);
        }
        assert_eq!(buffer, first);
    }

    #[test]
    fn empty_buffer_is_a_noop() {
        let mut effect = RunningRainbowEffect { step: 0 };
        effect.tick(Duration::ZERO, &mut []);
    }
}
