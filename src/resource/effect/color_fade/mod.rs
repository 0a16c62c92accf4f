use crate::interface::controller::Color;
use crate::interface::effect::{Effect, EffectMetadata, EffectParam, EffectParamKind};
use crate::resource::effect::wheel;
use inventory;
use std::time::Duration;

/// The whole strip fades through the color wheel, one wheel position per
/// frame; a full cycle is 256 frames.
pub struct ColorFadeEffect {
    position: u8,
}

const COLOR_FADE_PARAMS: [EffectParam; 1] = [EffectParam {
    key: "delay",
    label: "Frame delay (s)",
    kind: EffectParamKind::Slider {
        min: 0.001,
        max: 1.0,
        step: 0.001,
        default: 0.04,
    },
}];

impl Effect for ColorFadeEffect {
    fn id(&self) -> String {
        "color_fade".to_string()
    }

    fn name(&self) -> String {
        "Color Fade".to_string()
    }

    fn tick(&mut self, _elapsed: Duration, buffer: &mut [Color]) {
        if buffer.is_empty() {
            return;
        }
        buffer.fill(wheel(self.position));
        self.position = self.position.wrapping_add(1);
    }
}

fn factory() -> Box<dyn Effect> {
    Box::new(ColorFadeEffect { position: 0 })
}

inventory::submit!(EffectMetadata {
    id: "color_fade",
    name: "Color Fade",
    description: Some("Uniform fade through the color wheel"),
    group: Some("Animations"),
    params: &COLOR_FADE_PARAMS,
    factory,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_the_strip_with_successive_wheel_colors() {
        let mut effect = ColorFadeEffect { position: 0 };
        let mut buffer = vec![Color::BLACK; 8];

        effect.tick(Duration::ZERO, &mut buffer);
        assert!(buffer.iter().all(|c| *c == wheel(0)));

        effect.tick(Duration::ZERO, &mut buffer);
        assert!(buffer.iter().all(|c| *c == wheel(1)));
    }

    #[test]
    fn position_wraps_after_a_full_cycle() {
        let mut effect = ColorFadeEffect { position: 255 };
        let mut buffer = vec![Color::BLACK; 2];
        effect.tick(Duration::ZERO, &mut buffer);
        assert!(buffer.iter().all(|c| *c == wheel(255)));
        effect.tick(Duration::ZERO, &mut buffer);
        assert!(buffer.iter().all(|c| *c == wheel(0)));
    }

    #[test]
    fn empty_buffer_is_a_noop() {
        let mut effect = ColorFadeEffect { position: 7 };
        effect.tick(Duration::ZERO, &mut []);
        assert_eq!(effect.position, 7);
    }
}
