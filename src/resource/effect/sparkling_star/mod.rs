use crate::interface::controller::Color;
use crate::interface::effect::{Effect, EffectMetadata, EffectParam, EffectParamKind};
use inventory;
use rand::Rng;
use std::time::Duration;

const BASE: Color = Color { r: 10, g: 10, b: 10 };
const SPARK: Color = Color {
    r: 255,
    g: 255,
    b: 255,
};
const AFTERGLOW: Color = Color {
    r: 180,
    g: 180,
    b: 180,
};

/// One twinkle is two frames: a random pixel flashes white against a dim gray
/// base, then fades to light gray on the next frame.
pub struct SparklingStarEffect {
    afterglow_pending: bool,
    pixel: usize,
}

const SPARKLING_STAR_PARAMS: [EffectParam; 1] = [EffectParam {
    key: "delay",
    label: "Frame delay (s)",
    kind: EffectParamKind::Slider {
        min: 0.001,
        max: 1.0,
        step: 0.001,
        default: 0.04,
    },
}];

impl Effect for SparklingStarEffect {
    fn id(&self) -> String {
        "sparkling_star".to_string()
    }

    fn name(&self) -> String {
        "Sparkling Star".to_string()
    }

    fn tick(&mut self, _elapsed: Duration, buffer: &mut [Color]) {
        if buffer.is_empty() {
            return;
        }

        if self.afterglow_pending {
            // The strip may have been reconfigured since the spark frame.
            if self.pixel < buffer.len() {
                buffer[self.pixel] = AFTERGLOW;
            }
            self.afterglow_pending = false;
        } else {
            buffer.fill(BASE);
            self.pixel = rand::thread_rng().gen_range(0..buffer.len());
            buffer[self.pixel] = SPARK;
            self.afterglow_pending = true;
        }
    }
}

fn factory() -> Box<dyn Effect> {
    Box::new(SparklingStarEffect {
        afterglow_pending: false,
        pixel: 0,
    })
}

inventory::submit!(EffectMetadata {
    id: "sparkling_star",
    name: "Sparkling Star",
    description: Some("Random white twinkles on a dim gray base"),
    group: Some("Animations"),
    params: &SPARKLING_STAR_PARAMS,
    factory,
});
