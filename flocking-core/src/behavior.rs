//! The steering rules.
//!
//! Every rule only reads the boid and its surroundings and returns a velocity
//! contribution; [`Steering`] collects them and applies the weights. Distances
//! are Manhattan distances, and a neighbour or obstacle sitting exactly on the
//! boid (distance zero) is ignored.

use crate::boid::Boid;
use crate::config::FlockConfig;
use crate::obstacle::Obstacle;
use crate::vector::Vector2D;
use rand::Rng;

/// Indices of every other boid whose x and y deltas are both below `radius`
pub fn neighbours(index: usize, boids: &[Boid], radius: f32) -> Vec<usize> {
    let center = boids[index].position;

    boids
        .iter()
        .enumerate()
        .filter(|(j, other)| *j != index && other.position.within_box(&center, radius))
        .map(|(j, _)| j)
        .collect()
}

/// Headings of nearby boids, closer ones counting more
pub fn alignment<'a, I>(boid: &Boid, friends: I, config: &FlockConfig) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    friends
        .into_iter()
        .filter_map(|other| {
            let d = boid.position.manhattan_distance(&other.position);
            (d > 0.0 && d < config.friend_radius).then(|| other.velocity.normalize() / d)
        })
        .sum()
}

/// Push away from boids inside the crowd radius
pub fn separation<'a, I>(boid: &Boid, friends: I, config: &FlockConfig) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    repel(boid.position, friends.into_iter().map(|f| f.position), config.crowd_radius)
}

/// Push away from obstacles inside the avoid radius
pub fn avoidance<'a, I>(boid: &Boid, obstacles: I, config: &FlockConfig) -> Vector2D
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    repel(boid.position, obstacles.into_iter().map(|o| o.position), config.avoid_radius)
}

/// Head for the centre of the boids inside the cohesion radius
pub fn cohesion<'a, I>(boid: &Boid, friends: I, config: &FlockConfig) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in friends {
        let d = boid.position.manhattan_distance(&other.position);
        if d > 0.0 && d < config.cohese_radius {
            sum += other.position;
            count += 1;
        }
    }

    if count > 0 {
        let desired = sum / count as f32 - boid.position;
        desired.normalize() * config.desire_amount
    } else {
        Vector2D::zero()
    }
}

/// Uniform noise in `[-scale, scale]` on both axes
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, scale: f32) -> Vector2D {
    Vector2D::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)) * scale
}

fn repel<I>(position: Vector2D, others: I, radius: f32) -> Vector2D
where
    I: Iterator<Item = Vector2D>,
{
    others
        .filter_map(|other| {
            let d = position.manhattan_distance(&other);
            (d > 0.0 && d < radius).then(|| (position - other).normalize() / d)
        })
        .sum()
}

/// Every rule's contribution for one boid and one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    pub alignment: Vector2D,
    pub cohesion: Vector2D,
    pub separation: Vector2D,
    pub avoidance: Vector2D,
    pub jitter: Vector2D,
}

impl Steering {
    pub fn compute<'a, F, R>(
        boid: &Boid,
        friends: F,
        obstacles: &[Obstacle],
        config: &FlockConfig,
        rng: &mut R,
    ) -> Self
    where
        F: Iterator<Item = &'a Boid> + Clone,
        R: Rng + ?Sized,
    {
        Self {
            alignment: alignment(boid, friends.clone(), config),
            cohesion: cohesion(boid, friends.clone(), config),
            separation: separation(boid, friends, config),
            avoidance: avoidance(boid, obstacles, config),
            jitter: jitter(rng, config.noise),
        }
    }

    /// Weighted sum of the rules
    pub fn total(&self, config: &FlockConfig) -> Vector2D {
        self.alignment * config.alignment_weight
            + self.cohesion * config.cohesion_weight
            + self.separation * config.separation_weight
            + self.avoidance * config.avoidance_weight
            + self.jitter
    }

    /// The velocity this steering produces before the speed is pinned.
    ///
    /// With wind on, the steered velocity is added a second time together
    /// with half the wind, so the flock keeps its momentum and leans downwind.
    pub fn apply(&self, velocity: Vector2D, config: &FlockConfig) -> Vector2D {
        let steered = velocity + self.total(config);
        match config.wind {
            Some(wind) => steered + steered + wind * 0.5,
            None => steered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn boid_at(x: f32, y: f32, vx: f32, vy: f32) -> Boid {
        Boid::new(Vector2D::new(x, y), Vector2D::new(vx, vy), Rgba::BLACK)
    }

    #[test]
    fn test_neighbours_excludes_self_and_far_boids() {
        let boids = vec![
            boid_at(0.0, 0.0, 0.0, 0.0),
            boid_at(5.0, 5.0, 0.0, 0.0),
            boid_at(10.0, 0.0, 0.0, 0.0),
            boid_at(-9.0, 9.0, 0.0, 0.0),
        ];
        assert_eq!(neighbours(0, &boids, 10.0), vec![1, 3]);
        assert_eq!(neighbours(1, &boids, 10.0), vec![0, 2]);
    }

    #[test]
    fn test_no_friends_gives_zero_vectors() {
        let config = FlockConfig::walls();
        let boid = boid_at(10.0, 10.0, 1.0, 0.0);
        let none: Vec<Boid> = Vec::new();
        let no_obstacles: Vec<Obstacle> = Vec::new();

        assert_eq!(alignment(&boid, &none, &config), Vector2D::zero());
        assert_eq!(cohesion(&boid, &none, &config), Vector2D::zero());
        assert_eq!(separation(&boid, &none, &config), Vector2D::zero());
        assert_eq!(avoidance(&boid, &no_obstacles, &config), Vector2D::zero());
    }

    #[test]
    fn test_coincident_friend_is_ignored() {
        let config = FlockConfig::walls();
        let boid = boid_at(10.0, 10.0, 1.0, 0.0);
        let twin = [boid_at(10.0, 10.0, 0.0, 1.0)];

        assert_eq!(alignment(&boid, &twin, &config), Vector2D::zero());
        assert_eq!(separation(&boid, &twin, &config), Vector2D::zero());
        assert_eq!(cohesion(&boid, &twin, &config), Vector2D::zero());
    }

    #[test]
    fn test_alignment_weighted_by_inverse_distance() {
        let config = FlockConfig::walls();
        let boid = boid_at(0.0, 0.0, 1.0, 0.0);
        let friends = [boid_at(2.0, 0.0, 0.0, 5.0), boid_at(0.0, 4.0, 3.0, 0.0)];

        let a = alignment(&boid, &friends, &config);
        assert!((a.x - 0.25).abs() < 1e-6);
        assert!((a.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_separation_points_away() {
        let config = FlockConfig::walls();
        let boid = boid_at(10.0, 10.0, 0.0, 0.0);
        let friends = [boid_at(12.0, 10.0, 0.0, 0.0)];

        let s = separation(&boid, &friends, &config);
        assert!((s.x + 0.5).abs() < 1e-6);
        assert_eq!(s.y, 0.0);
    }

    #[test]
    fn test_separation_respects_crowd_radius() {
        let config = FlockConfig::walls();
        let boid = boid_at(0.0, 0.0, 0.0, 0.0);
        // Manhattan distance 20 is past the walls crowd radius of ~16.7
        let friends = [boid_at(10.0, 10.0, 0.0, 0.0)];
        assert_eq!(separation(&boid, &friends, &config), Vector2D::zero());
    }

    #[test]
    fn test_cohesion_scaled_by_desire() {
        let mut config = FlockConfig::walls();
        config.desire_amount = 2.0;
        let boid = boid_at(0.0, 0.0, 0.0, 0.0);
        let friends = [boid_at(4.0, 0.0, 0.0, 0.0), boid_at(4.0, 6.0, 0.0, 0.0)];

        let c = cohesion(&boid, &friends, &config);
        // centroid (4, 3) -> unit (0.8, 0.6) * 2
        assert!((c.x - 1.6).abs() < 1e-5);
        assert!((c.y - 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_avoidance_uses_avoid_radius() {
        let config = FlockConfig::walls();
        let boid = boid_at(100.0, 100.0, 0.0, 0.0);
        let near = Obstacle::new(Vector2D::new(100.0, 104.0), 0.0, Rgba::STONE);
        let far = Obstacle::new(Vector2D::new(100.0, 130.0), 0.0, Rgba::STONE);

        let v = avoidance(&boid, &[near, far], &config);
        assert_eq!(v.x, 0.0);
        assert!((v.y + 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_jitter_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let j = jitter(&mut rng, 0.05);
            assert!(j.x.abs() <= 0.05 && j.y.abs() <= 0.05);
        }
    }

    #[test]
    fn test_steering_weights() {
        let mut config = FlockConfig::walls();
        config.alignment_weight = 2.0;
        config.cohesion_weight = 0.0;
        let steering = Steering {
            alignment: Vector2D::new(1.0, 0.0),
            cohesion: Vector2D::new(5.0, 5.0),
            separation: Vector2D::new(0.0, 1.0),
            avoidance: Vector2D::new(0.0, 1.0),
            jitter: Vector2D::new(0.5, 0.0),
        };
        assert_eq!(steering.total(&config), Vector2D::new(2.5, 2.0));
    }

    #[test]
    fn test_wind_doubles_momentum() {
        let mut config = FlockConfig::groups();
        config.wind = Some(Vector2D::new(2.0, 0.0));
        let steering = Steering::default();
        let v = steering.apply(Vector2D::new(0.0, 1.0), &config);
        assert_eq!(v, Vector2D::new(1.0, 2.0));
    }
}
