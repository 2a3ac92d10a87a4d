use common::Vector3;

use crate::config::ProjectileConfig;
use crate::error::{PoseError, Result};
use crate::registry::Character;
use crate::skeleton::UserId;

/// A shot travelling in a straight line from the hand that fired it.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vector3,
    pub origin: Vector3,
    /// Raw forearm direction until the first advance, unit length afterwards.
    pub direction: Vector3,
    pub owner: UserId,
    pub character: Character,
    speed: f32,
    max_distance: f32,
    normalized: bool,
}

impl Projectile {
    pub fn new(
        origin: Vector3,
        direction: Vector3,
        owner: UserId,
        character: Character,
        config: &ProjectileConfig,
    ) -> Self {
        Self {
            position: origin,
            origin,
            direction,
            owner,
            character,
            speed: config.speed,
            max_distance: config.max_distance,
            normalized: false,
        }
    }

    /// Alive until it has travelled further than its maximum range.
    pub fn is_alive(&self) -> bool {
        self.displacement() <= self.max_distance
    }

    pub fn displacement(&self) -> f32 {
        self.origin.distance(&self.position)
    }

    /// Moves one tick along the direction. A zero direction normalises to
    /// zero, so such a shot stays put instead of turning into NaN.
    pub fn next_position(&mut self) {
        if !self.normalized {
            self.direction = self.direction.normalize_or_zero();
            self.normalized = true;
        }
        self.position += self.direction * self.speed;
    }
}

/// Unit vector along `direction`, or an error naming `context` when the
/// direction has no length.
pub fn normalized_checked(direction: Vector3, context: &'static str) -> Result<Vector3> {
    direction
        .try_normalize()
        .ok_or(PoseError::DegenerateVector { context })
}

/// Live projectiles of one character, in firing order.
#[derive(Debug, Clone, Default)]
pub struct ProjectileRoster {
    projectiles: Vec<Projectile>,
}

impl ProjectileRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    /// Advances every projectile one tick and drops the ones out of range.
    /// Returns how many were dropped.
    pub fn advance(&mut self) -> usize {
        for projectile in &mut self.projectiles {
            projectile.next_position();
        }
        let before = self.projectiles.len();
        self.projectiles.retain(Projectile::is_alive);
        before - self.projectiles.len()
    }

    /// Removes and returns the projectiles matching `hit`.
    pub fn take_where<F>(&mut self, mut hit: F) -> Vec<Projectile>
    where
        F: FnMut(&Projectile) -> bool,
    {
        let mut taken = Vec::new();
        let mut index = 0;
        while index < self.projectiles.len() {
            if hit(&self.projectiles[index]) {
                taken.push(self.projectiles.remove(index));
            } else {
                index += 1;
            }
        }
        taken
    }

    pub fn as_slice(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }
}
