use crate::color::Rgba;
use crate::flock::Flock;
use crate::vector::Vector2D;

/// An RGBA8 pixel buffer, row-major with the origin at the top left
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Size the canvas to the flock's world
    pub fn for_flock(flock: &Flock) -> Self {
        Self::new(flock.width().max(0.0) as u32, flock.height().max(0.0) as u32)
    }

    pub fn clear(&mut self, color: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color.to_array());
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.pixels[i..i + 4];
        Some(Rgba {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }

    /// Fill `[x0, x1) × [y0, y1)`, clipped to the canvas
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        let x0 = x0.clamp(0, self.width as i32) as usize;
        let x1 = x1.clamp(0, self.width as i32) as usize;
        let y0 = y0.clamp(0, self.height as i32) as usize;
        let y1 = y1.clamp(0, self.height as i32) as usize;

        let rgba = color.to_array();
        let stride = self.width as usize * 4;

        for y in y0..y1 {
            let row = &mut self.pixels[y * stride..(y + 1) * stride];
            for px in row[x0 * 4..x1 * 4].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }
}

/// Draw one frame: black background, obstacles, then boids on top
pub fn render(flock: &Flock, canvas: &mut Canvas) {
    canvas.clear(Rgba::BLACK);

    for obstacle in &flock.obstacles {
        let half = 2i32.saturating_add((obstacle.size / 4.0) as i32);
        draw_square(canvas, obstacle.position, half, obstacle.color);
    }

    for boid in &flock.boids {
        draw_square(canvas, boid.position, boid.size as i32, boid.color);
    }
}

/// `[x - half, x + half)` around the truncated centre; far-off squares saturate
fn draw_square(canvas: &mut Canvas, center: Vector2D, half: i32, color: Rgba) {
    let x = center.x as i32;
    let y = center.y as i32;
    canvas.fill_rect(
        x.saturating_sub(half),
        y.saturating_sub(half),
        x.saturating_add(half),
        y.saturating_add(half),
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boid::Boid;
    use crate::config::FlockConfig;

    #[test]
    fn test_fill_rect_clips_to_canvas() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(-2, -2, 2, 1, Rgba::rgb(9, 9, 9));

        assert_eq!(canvas.pixel(0, 0), Some(Rgba::rgb(9, 9, 9)));
        assert_eq!(canvas.pixel(1, 0), Some(Rgba::rgb(9, 9, 9)));
        assert_eq!(canvas.pixel(2, 0), Some(Rgba::default()));
        assert_eq!(canvas.pixel(0, 1), Some(Rgba::default()));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_render_draws_boid_square() {
        let mut config = FlockConfig::groups();
        config.width = 20.0;
        config.height = 20.0;
        let mut flock = Flock::new(config);
        let mut boid = Boid::new(Vector2D::new(10.0, 10.0), Vector2D::zero(), Rgba::rgb(200, 0, 0));
        boid.size = 2;
        flock.add_boid(boid);

        let mut canvas = Canvas::for_flock(&flock);
        render(&flock, &mut canvas);

        assert_eq!(canvas.pixel(8, 8), Some(Rgba::rgb(200, 0, 0)));
        assert_eq!(canvas.pixel(11, 11), Some(Rgba::rgb(200, 0, 0)));
        assert_eq!(canvas.pixel(12, 12), Some(Rgba::BLACK));
        assert_eq!(canvas.pixel(7, 10), Some(Rgba::BLACK));
    }

    #[test]
    fn test_render_boid_at_edge_does_not_panic() {
        let mut config = FlockConfig::groups();
        config.width = 10.0;
        config.height = 10.0;
        let mut flock = Flock::new(config);
        flock.add_boid(Boid::new(Vector2D::new(10.0, 10.0), Vector2D::zero(), Rgba::rgb(1, 1, 1)));

        let mut canvas = Canvas::for_flock(&flock);
        render(&flock, &mut canvas);
        assert_eq!(canvas.pixel(9, 9), Some(Rgba::rgb(1, 1, 1)));
    }

    #[test]
    fn test_render_far_or_huge_obstacles_does_not_panic() {
        let mut config = FlockConfig::groups();
        config.width = 20.0;
        config.height = 20.0;
        let mut flock = Flock::new(config);
        flock.add_obstacle(Vector2D::new(-1.0e10, 10.0), 0.0);
        flock.add_obstacle(Vector2D::new(1.0e10, 1.0e10), 0.0);
        flock.add_obstacle(Vector2D::new(10.0, 10.0), 1.0e12);

        let mut canvas = Canvas::for_flock(&flock);
        render(&flock, &mut canvas);

        // the huge obstacle covers the whole canvas
        assert_eq!(canvas.pixel(0, 0), Some(flock.config.obstacle_color));
        assert_eq!(canvas.pixel(19, 19), Some(flock.config.obstacle_color));
    }
}
