use common::Vector3;

/// A fire drifting towards the players. Every hit takes one hit point.
#[derive(Debug, Clone, PartialEq)]
pub struct Flame {
    pub position: Vector3,
    hp: u32,
}

impl Flame {
    pub fn new(position: Vector3, hp: u32) -> Self {
        Self { position, hp }
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Removes one hit point and returns what is left.
    pub fn extinguish(&mut self) -> u32 {
        self.hp = self.hp.saturating_sub(1);
        self.hp
    }

    pub fn advance(&mut self, distance: f32) {
        self.position.z += distance;
    }

    /// Half the side of the hit box; bigger flames are easier to hit.
    pub fn half_extent(&self) -> f32 {
        50.0 + 100.0 * self.hp as f32
    }

    pub fn is_in_bounding_box(&self, point: &Vector3) -> bool {
        let extent = self.half_extent();
        (point.x - self.position.x).abs() < extent
            && (point.y - self.position.y).abs() < extent
            && (point.z - self.position.z).abs() < extent
    }
}
