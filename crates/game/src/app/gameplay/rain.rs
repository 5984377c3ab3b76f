use engine::{Color, Rect, Surface, SurfaceError};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

const DROP_COUNT: usize = 100;
const DROP_WIDTH: f32 = 1.0;
pub(crate) const DROP_COLOR: Color = Color::rgba(0xAD, 0xD8, 0xE6, 0x99);

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RainDrop {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) speed: f32,
    pub(crate) length: f32,
}

/// Cosmetic rain over the field.
#[derive(Debug, Clone)]
pub(crate) struct Rain {
    width: f32,
    height: f32,
    drops: Vec<RainDrop>,
    rng: ChaCha8Rng,
}

impl Rain {
    pub(crate) fn new(width: f32, height: f32, mut rng: ChaCha8Rng) -> Self {
        let drops = (0..DROP_COUNT)
            .map(|_| RainDrop {
                x: rng.random_range(0.0..width),
                y: rng.random_range(0.0..height),
                speed: rng.random_range(2.0..5.0),
                length: rng.random_range(5.0..15.0),
            })
            .collect();
        Self {
            width,
            height,
            drops,
            rng,
        }
    }

    #[cfg(test)]
    pub(crate) fn drops(&self) -> &[RainDrop] {
        &self.drops
    }

    pub(crate) fn update(&mut self) {
        for drop in &mut self.drops {
            drop.y += drop.speed;
            if drop.y > self.height {
                drop.y = -drop.length;
                drop.x = self.rng.random_range(0.0..self.width);
            }
        }
    }

    pub(crate) fn render(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        for drop in &self.drops {
            surface.fill_rect(
                Rect::new(drop.x, drop.y, DROP_WIDTH, drop.length),
                DROP_COLOR,
            )?;
        }
        Ok(())
    }
}
