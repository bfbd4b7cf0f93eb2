use flocking_core::{Flock, Vector2D};

/// Desire amounts bound to the number keys 1 to 4
pub const DESIRE_PRESETS: [f32; 4] = [1.0, 2.0, 10.0, 20.0];

const DESIRE_STEP: f32 = 0.1;
const WIND_STEP: f32 = 0.2;

/// What a key press does to the running flock
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    SetDesire(f32),
    NudgeDesire(f32),
    NudgeWind(Vector2D),
    Reset,
    /// Holding the key drops obstacles under the pointer every frame
    PaintObstacles,
}

/// Map a `KeyboardEvent.key` value to an action.
///
/// Arrow keys steer the wind when the flock has one and tune the cohesion
/// desire otherwise.
pub fn key_action(key: &str, flock: &Flock) -> Option<KeyAction> {
    let windy = flock.config.wind.is_some();

    match key {
        "1" | "2" | "3" | "4" => {
            let index = key.parse::<usize>().ok()? - 1;
            Some(KeyAction::SetDesire(DESIRE_PRESETS[index]))
        }
        "ArrowUp" if windy => Some(KeyAction::NudgeWind(Vector2D::new(0.0, -WIND_STEP))),
        "ArrowDown" if windy => Some(KeyAction::NudgeWind(Vector2D::new(0.0, WIND_STEP))),
        "ArrowLeft" if windy => Some(KeyAction::NudgeWind(Vector2D::new(-WIND_STEP, 0.0))),
        "ArrowRight" if windy => Some(KeyAction::NudgeWind(Vector2D::new(WIND_STEP, 0.0))),
        "ArrowUp" => Some(KeyAction::NudgeDesire(DESIRE_STEP)),
        "ArrowDown" => Some(KeyAction::NudgeDesire(-DESIRE_STEP)),
        "c" | "C" => Some(KeyAction::Reset),
        "o" | "O" => Some(KeyAction::PaintObstacles),
        _ => None,
    }
}

/// Apply a one-shot action; `PaintObstacles` is handled per frame by the caller
pub fn apply(action: KeyAction, flock: &mut Flock) {
    match action {
        KeyAction::SetDesire(amount) => flock.config.set_desire_amount(amount),
        KeyAction::NudgeDesire(delta) => flock.config.adjust_desire_amount(delta),
        KeyAction::NudgeWind(delta) => flock.config.adjust_wind(delta),
        KeyAction::Reset => flock.reset(),
        KeyAction::PaintObstacles => {}
    }
}
