use super::controller::Color;
use serde_json::Value;
use std::time::Duration;

/// An animation pattern. Each `tick` renders exactly one frame into `buffer`;
/// the runner flushes that frame to the controller and sleeps once afterwards,
/// so any multi-frame choreography (e.g. a two-step twinkle) is carried as
/// internal state across ticks.
pub trait Effect: Send {
    fn id(&self) -> String;

    fn name(&self) -> String;

    fn tick(&mut self, elapsed: Duration, buffer: &mut [Color]);

    fn update_params(&mut self, _params: Value) {}
}

#[derive(Clone, Copy, Debug)]
pub enum EffectParamKind {
    Slider { min: f64, max: f64, step: f64, default: f64 },
}

#[derive(Clone, Copy, Debug)]
pub struct EffectParam {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: EffectParamKind,
}

pub struct EffectMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub group: Option<&'static str>,
    pub params: &'static [EffectParam],
    pub factory: fn() -> Box<dyn Effect>,
}

inventory::collect!(EffectMetadata);
