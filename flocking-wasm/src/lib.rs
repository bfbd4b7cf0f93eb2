use flocking_core::{render, Canvas, Flock, FlockConfig, Preset, Vector2D};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    CanvasRenderingContext2d, Element, HtmlCanvasElement, ImageData, KeyboardEvent, MouseEvent,
};

pub mod keys;

use keys::KeyAction;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

/// Size of obstacles dropped with the pointer
const PAINTED_OBSTACLE_SIZE: f32 = 10.0;

#[wasm_bindgen]
pub struct FlockSimulation {
    flock: Flock,
    raster: Canvas,
    rng: StdRng,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    pointer: Option<Vector2D>,
    pointer_down: bool,
    painting_obstacles: bool,
}

#[wasm_bindgen]
impl FlockSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        preset: &str,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<FlockSimulation, JsValue> {
        let preset: Preset = preset
            .parse()
            .map_err(|e: flocking_shared::UnknownPreset| JsValue::from_str(&e.to_string()))?;

        let mut config = FlockConfig::preset(preset);
        if let Some(width) = width {
            config.width = width as f32;
        }
        if let Some(height) = height {
            config.height = height as f32;
        }
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        console_log!(
            "Initializing {} flock on a {}x{} canvas",
            preset,
            config.width,
            config.height
        );

        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let mut flock = Flock::new(config);
        let raster = Canvas::for_flock(&flock);

        canvas.set_width(raster.width);
        canvas.set_height(raster.height);

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut rng = StdRng::from_entropy();
        flock.release_brush(&mut rng);

        Ok(FlockSimulation {
            flock,
            raster,
            rng,
            canvas,
            context,
            pointer: None,
            pointer_down: false,
            painting_obstacles: false,
        })
    }

    /// Apply held inputs, advance one tick and draw
    pub fn frame(&mut self) -> Result<(), JsValue> {
        if let Some(position) = self.pointer {
            if self.painting_obstacles {
                self.flock.add_obstacle(position, PAINTED_OBSTACLE_SIZE);
            }
            if self.pointer_down {
                self.flock.spawn_at(position, &mut self.rng);
            }
        }

        self.step();
        self.render()
    }

    pub fn step(&mut self) {
        self.flock.step(&mut self.rng);
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        render(&self.flock, &mut self.raster);

        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&self.raster.pixels[..]),
            self.raster.width,
            self.raster.height,
        )?;
        self.context.put_image_data(&image, 0.0, 0.0)
    }

    pub fn spawn_at(&mut self, x: f64, y: f64) {
        self.flock
            .spawn_at(Vector2D::new(x as f32, y as f32), &mut self.rng);
    }

    pub fn add_obstacle_at(&mut self, x: f64, y: f64) {
        self.flock
            .add_obstacle(Vector2D::new(x as f32, y as f32), PAINTED_OBSTACLE_SIZE);
    }

    /// End of a drag: the next drag paints in a new colour
    pub fn release_brush(&mut self) {
        self.flock.release_brush(&mut self.rng);
    }

    pub fn handle_mouse_down(&mut self, event: MouseEvent) {
        self.pointer = Some(self.canvas_position(&event));
        self.pointer_down = true;
    }

    pub fn handle_mouse_move(&mut self, event: MouseEvent) {
        self.pointer = Some(self.canvas_position(&event));
    }

    pub fn handle_mouse_up(&mut self, _event: MouseEvent) {
        if self.pointer_down {
            self.pointer_down = false;
            self.release_brush();
        }
    }

    pub fn handle_key_down(&mut self, event: KeyboardEvent) {
        self.handle_key(&event.key());
    }

    pub fn handle_key_up(&mut self, event: KeyboardEvent) {
        if keys::key_action(&event.key(), &self.flock) == Some(KeyAction::PaintObstacles) {
            self.painting_obstacles = false;
        }
    }

    pub fn handle_key(&mut self, key: &str) {
        match keys::key_action(key, &self.flock) {
            Some(KeyAction::PaintObstacles) => self.painting_obstacles = true,
            Some(action) => {
                keys::apply(action, &mut self.flock);
                console_log!(
                    "{:?}: desire {:.2}, wind {:?}",
                    action,
                    self.flock.config.desire_amount,
                    self.flock.config.wind
                );
            }
            None => {}
        }
    }

    pub fn clear(&mut self) {
        self.flock.clear();
    }

    pub fn reset(&mut self) {
        self.flock.reset();
    }

    pub fn boid_count(&self) -> usize {
        self.flock.boids.len()
    }

    pub fn set_desire_amount(&mut self, amount: f64) {
        self.flock.config.set_desire_amount(amount as f32);
    }

    pub fn set_max_speed(&mut self, speed: f64) -> Result<(), JsValue> {
        self.flock
            .config
            .set_max_speed(speed as f32)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_wind(&mut self, x: f64, y: f64) {
        self.flock.config.set_wind(Vector2D::new(x as f32, y as f32));
    }

    pub fn status_json(&self, fps: u32) -> Result<String, JsValue> {
        serde_json::to_string(&self.flock.status(fps))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.flock.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn canvas_position(&self, event: &MouseEvent) -> Vector2D {
        let canvas_element: &Element = self.canvas.as_ref();
        let rect = canvas_element.get_bounding_client_rect();
        let x = event.client_x() as f64 - rect.left();
        let y = event.client_y() as f64 - rect.top();
        Vector2D::new(x as f32, y as f32)
    }
}
