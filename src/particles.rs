//! Decorative floating particles in the hero section.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One absolutely positioned particle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Width in pixels, 1 to 5.
    pub width: f64,
    /// Height in pixels, 1 to 5.
    pub height: f64,
    /// 0.2 to 0.7.
    pub opacity: f64,
    /// Horizontal position, percent of the container.
    pub left: f64,
    /// Vertical position, percent of the container.
    pub top: f64,
    /// Float animation duration in seconds, 10 to 20.
    pub duration: f64,
    /// Animation delay in seconds, 0 to 5.
    pub delay: f64,
}

impl Particle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            width: rng.gen_range(1.0..5.0),
            height: rng.gen_range(1.0..5.0),
            opacity: rng.gen_range(0.2..0.7),
            left: rng.gen_range(0.0..100.0),
            top: rng.gen_range(0.0..100.0),
            duration: rng.gen_range(10.0..20.0),
            delay: rng.gen_range(0.0..5.0),
        }
    }

    /// Inline style of the particle node.
    pub fn style(&self) -> String {
        format!(
            "position: absolute; width: {}px; height: {}px; \
             background: rgba(255, 255, 255, {}); border-radius: 50%; \
             left: {}%; top: {}%; \
             animation: float {}s linear infinite; animation-delay: {}s;",
            self.width, self.height, self.opacity, self.left, self.top, self.duration, self.delay
        )
    }
}

/// The particle layer of the hero. Always cleared before being refilled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleLayer {
    particles: Vec<Particle>,
}

impl ParticleLayer {
    /// Replace the layer with `count` fresh particles.
    pub fn spawn<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        self.particles.clear();
        self.particles
            .extend((0..count).map(|_| Particle::random(rng)));
        tracing::debug!(count, "particles spawned");
    }

    pub fn clear(&mut self) {
        if !self.particles.is_empty() {
            tracing::debug!("particles removed");
        }
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_particle_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = Particle::random(&mut rng);
            assert!((1.0..5.0).contains(&p.width));
            assert!((1.0..5.0).contains(&p.height));
            assert!((0.2..0.7).contains(&p.opacity));
            assert!((0.0..100.0).contains(&p.left));
            assert!((10.0..20.0).contains(&p.duration));
            assert!((0.0..5.0).contains(&p.delay));
        }
    }

    #[test]
    fn test_spawn_replaces_layer() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut layer = ParticleLayer::default();

        layer.spawn(50, &mut rng);
        assert_eq!(layer.len(), 50);
        layer.spawn(10, &mut rng);
        assert_eq!(layer.len(), 10);
        layer.clear();
        assert!(layer.is_empty());
    }

    #[test]
    fn test_style() {
        let p = Particle {
            width: 2.0,
            height: 3.0,
            opacity: 0.5,
            left: 10.0,
            top: 20.0,
            duration: 12.0,
            delay: 1.5,
        };
        let style = p.style();
        assert!(style.contains("width: 2px"));
        assert!(style.contains("rgba(255, 255, 255, 0.5)"));
        assert!(style.contains("animation: float 12s linear infinite"));
        assert!(style.contains("animation-delay: 1.5s"));
    }
}
