use std::fmt;

use rand::Rng;

use crate::error::{FloraError, FloraResult};

/// Straight-alpha RGBA color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// Hue/saturation/lightness color, the space flower palettes are generated
/// in. Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Random pastel: the doubled hue draw is intentionally biased toward
    /// low hues before the modulo wraps; only the [0, 360) range is
    /// guaranteed, not uniformity. Saturation lands in [50, 80), lightness
    /// in [70, 90), both floored to whole percents.
    pub fn random_pastel(rng: &mut impl Rng) -> Self {
        let h = (rng.random::<f64>() * rng.random::<f64>() * 3600.0) % 360.0;
        let s = (rng.random::<f64>() * 30.0).floor() + 50.0;
        let l = (rng.random::<f64>() * 20.0).floor() + 70.0;
        Self { h, s, l }
    }

    /// Lightness-shifted variant, wrapping modulo 100. Hue and saturation
    /// are unchanged.
    pub fn darken(self, amount: f64) -> Self {
        Self {
            l: (self.l + amount) % 100.0,
            ..self
        }
    }

    /// Parse the `hsl(H, S%, L%)` textual form produced by [`fmt::Display`].
    pub fn parse(text: &str) -> FloraResult<Self> {
        let inner = text
            .trim()
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| FloraError::color(format!("not an hsl() color: '{text}'")))?;

        let mut parts = inner.split(',').map(str::trim);
        let h = parse_component(parts.next(), "")?;
        let s = parse_component(parts.next(), "%")?;
        let l = parse_component(parts.next(), "%")?;
        if parts.next().is_some() {
            return Err(FloraError::color(format!(
                "too many components in '{text}'"
            )));
        }
        Ok(Self { h, s, l })
    }

    /// Convert to straight-alpha RGBA for painting.
    pub fn to_rgba8(self) -> Rgba8 {
        let h = (self.h.rem_euclid(360.0)) / 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            let v = channel_to_u8(l);
            return Rgba8::opaque(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Rgba8::opaque(
            channel_to_u8(hue_channel(p, q, h + 1.0 / 3.0)),
            channel_to_u8(hue_channel(p, q, h)),
            channel_to_u8(hue_channel(p, q, h - 1.0 / 3.0)),
        )
    }
}

impl Default for Hsl {
    /// Neutral pastel grey, the recovery color when generation goes wrong.
    fn default() -> Self {
        Self::new(0.0, 0.0, 85.0)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// The textual form a flower's petal color is generated as.
pub fn random_pastel_css(rng: &mut impl Rng) -> String {
    Hsl::random_pastel(rng).to_string()
}

fn parse_component(part: Option<&str>, suffix: &str) -> FloraResult<f64> {
    let raw = part.ok_or_else(|| FloraError::color("missing hsl component"))?;
    let raw = raw
        .strip_suffix(suffix)
        .ok_or_else(|| FloraError::color(format!("expected '{suffix}' suffix on '{raw}'")))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| FloraError::color(format!("invalid hsl component '{raw}'")))
}

fn hue_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn channel_to_u8(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
