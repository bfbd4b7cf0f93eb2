use flocking_cli::{parse_obstacle, parse_spawn, RunSettings, Runner};
use flocking_core::FlockConfig;
use flocking_shared::{FlockSettings, FlockSnapshot, Preset};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Collects everything the runner writes so the test can read it back
#[derive(Clone, Default)]
struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    fn lines(&self) -> Vec<String> {
        let bytes = self.bytes.lock().unwrap();
        String::from_utf8(bytes.clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn run_settings(ticks: u64, boids: usize, every: u64) -> RunSettings {
    RunSettings {
        ticks,
        boids,
        seed: Some(42),
        every,
        snapshots: None,
    }
}

#[test]
fn writes_one_snapshot_per_report() {
    let buffer = SharedBuffer::default();
    let settings = run_settings(30, 12, 10);

    let mut runner = Runner::new(FlockConfig::groups(), &settings, &[])
        .unwrap()
        .with_snapshots(Box::new(buffer.clone()));
    let summary = runner.run(settings.ticks).unwrap();

    assert_eq!(summary.seed, 42);
    assert_eq!(summary.snapshots_written, 3);
    assert_eq!(summary.last_status.tick, 30);
    assert_eq!(summary.last_status.boid_count, 12);

    let lines = buffer.lines();
    assert_eq!(lines.len(), 3);

    let ticks: Vec<u64> = lines
        .iter()
        .map(|line| serde_json::from_str::<FlockSnapshot>(line).unwrap().tick)
        .collect();
    assert_eq!(ticks, vec![10, 20, 30]);
}

#[test]
fn scripted_spawns_join_the_flock() {
    let settings = run_settings(0, 5, 1);
    let spawns = vec![
        parse_spawn("100,100,10").unwrap(),
        parse_spawn("300,200").unwrap(),
    ];

    let runner = Runner::new(FlockConfig::classic(), &settings, &spawns).unwrap();
    let boids = &runner.flock().boids;

    assert_eq!(boids.len(), 16);
    // boids from one spawn share the brush colour
    assert!(boids[5..15].iter().all(|b| b.color == boids[5].color));
}

#[test]
fn obstacles_are_added_to_the_walls() {
    let settings = run_settings(0, 0, 1);
    let mut runner = Runner::new(FlockConfig::walls(), &settings, &[]).unwrap();
    let walls = runner.flock().obstacles.len();

    runner.place_obstacles(&[
        parse_obstacle("200,200,10").unwrap(),
        parse_obstacle("300,250").unwrap(),
    ]);

    let obstacles = &runner.flock().obstacles;
    assert_eq!(obstacles.len(), walls + 2);
    assert_eq!(obstacles[walls].size, 10.0);
}

#[test]
fn invalid_configuration_is_rejected() {
    let settings = FlockSettings {
        preset: Preset::Walls,
        friend_radius: Some(-1.0),
        ..FlockSettings::default()
    };

    let config = FlockConfig::from_settings(&settings);
    assert!(Runner::new(config, &run_settings(1, 1, 1), &[]).is_err());
}

#[test]
fn same_seed_same_result() {
    let run = || {
        let buffer = SharedBuffer::default();
        let settings = run_settings(20, 20, 20);
        let mut runner = Runner::new(FlockConfig::walls(), &settings, &[])
            .unwrap()
            .with_snapshots(Box::new(buffer.clone()));
        runner.run(settings.ticks).unwrap();
        buffer.lines()
    };

    assert_eq!(run(), run());
}
