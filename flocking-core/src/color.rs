use rand::Rng;

/// An 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Wall obstacles in the walls preset
    pub const STONE: Rgba = Rgba::rgb(55, 55, 55);
    /// User-placed obstacles in the groups preset
    pub const SHADOW: Rgba = Rgba::rgb(25, 25, 25);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Every channel in 55..255, never too dark to see
    pub fn bright<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::rgb(
            rng.gen_range(55..255),
            rng.gen_range(55..255),
            rng.gen_range(55..255),
        )
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::rgb(rng.gen_range(0..255), rng.gen_range(0..255), rng.gen_range(0..255))
    }

    /// One saturated channel with the other two muted
    pub fn dominant<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..3) {
            0 => Self::rgb(255, rng.gen_range(50..150), rng.gen_range(50..150)),
            1 => Self::rgb(rng.gen_range(50..150), 255, rng.gen_range(50..150)),
            _ => Self::rgb(rng.gen_range(50..250), rng.gen_range(50..150), 255),
        }
    }

    /// Move each channel toward the mean of `others`.
    ///
    /// Channels are treated as positions on a circle of 255 steps, so the
    /// shortest way round is taken and the result wraps instead of clamping.
    pub fn drift_toward<I>(self, others: I, blend: f32) -> Rgba
    where
        I: IntoIterator<Item = Rgba>,
    {
        let mut totals = [0i32; 3];
        let mut count = 0;

        for other in others {
            totals[0] += hue_delta(self.r, other.r);
            totals[1] += hue_delta(self.g, other.g);
            totals[2] += hue_delta(self.b, other.b);
            count += 1;
        }

        if count == 0 {
            return self;
        }

        let shift = |channel: u8, total: i32| -> u8 {
            let mean = total as f32 / count as f32;
            let moved = (channel as f32 + mean * blend) as i32;
            moved.rem_euclid(255) as u8
        };

        Rgba::rgb(
            shift(self.r, totals[0]),
            shift(self.g, totals[1]),
            shift(self.b, totals[2]),
        )
    }
}

/// Signed step from `from` to `to`, taking the short way round 255
pub fn hue_delta(from: u8, to: u8) -> i32 {
    let d = to as i32 - from as i32;
    if d < -128 {
        d + 255
    } else if d > 128 {
        d - 255
    } else {
        d
    }
}
