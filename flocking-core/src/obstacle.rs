use crate::color::Rgba;
use crate::config::WallLayout;
use crate::vector::Vector2D;

/// A static point the flock steers away from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub position: Vector2D,
    pub size: f32,
    pub color: Rgba,
}

impl Obstacle {
    pub fn new(position: Vector2D, size: f32, color: Rgba) -> Self {
        Self {
            position,
            size,
            color,
        }
    }
}

/// Obstacles every `layout.spacing` units along all four sides, `layout.inset`
/// units in from the border.
pub fn wall_ring(width: f32, height: f32, layout: &WallLayout, color: Rgba) -> Vec<Obstacle> {
    let mut walls = Vec::new();

    for x in steps(width, layout.spacing) {
        let x = x + layout.offset;
        walls.push(Obstacle::new(Vector2D::new(x, layout.inset), 0.0, color));
        walls.push(Obstacle::new(Vector2D::new(x, height - layout.inset), 0.0, color));
    }

    for y in steps(height, layout.spacing) {
        let y = y + layout.offset;
        walls.push(Obstacle::new(Vector2D::new(layout.inset, y), 0.0, color));
        walls.push(Obstacle::new(Vector2D::new(width - layout.inset, y), 0.0, color));
    }

    walls
}

fn steps(limit: f32, spacing: f32) -> impl Iterator<Item = f32> {
    let count = if spacing > 0.0 {
        (limit / spacing).ceil().max(0.0) as usize
    } else {
        0
    };
    (0..count).map(move |i| i as f32 * spacing)
}
