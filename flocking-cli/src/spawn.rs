use flocking_shared::{ObstacleRequest, Position, SpawnRequest};

/// Parse `X,Y` or `X,Y,COUNT` into a spawn request
pub fn parse_spawn(s: &str) -> Result<SpawnRequest, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();

    let (x, y, count) = match parts.as_slice() {
        [x, y] => (*x, *y, "1"),
        [x, y, count] => (*x, *y, *count),
        _ => return Err(format!("expected X,Y or X,Y,COUNT, got '{}'", s)),
    };

    let x: f32 = x.parse().map_err(|_| format!("invalid x coordinate '{}'", x))?;
    let y: f32 = y.parse().map_err(|_| format!("invalid y coordinate '{}'", y))?;
    let count: usize = count
        .parse()
        .map_err(|_| format!("invalid boid count '{}'", count))?;

    if !x.is_finite() || !y.is_finite() {
        return Err(format!("coordinates must be finite, got '{}'", s));
    }

    Ok(SpawnRequest {
        position: Position::new(x, y),
        count,
        color: None,
    })
}

/// Parse `X,Y` or `X,Y,SIZE` into an obstacle request
pub fn parse_obstacle(s: &str) -> Result<ObstacleRequest, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();

    let (x, y, size) = match parts.as_slice() {
        [x, y] => (*x, *y, "0"),
        [x, y, size] => (*x, *y, *size),
        _ => return Err(format!("expected X,Y or X,Y,SIZE, got '{}'", s)),
    };

    let parse = |name: &str, value: &str| -> Result<f32, String> {
        value
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid {} '{}'", name, value))
    };

    Ok(ObstacleRequest {
        position: Position::new(parse("x coordinate", x)?, parse("y coordinate", y)?),
        size: parse("size", size)?.max(0.0),
    })
}
