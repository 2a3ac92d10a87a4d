//! Three-component vector math used by every skeletal test.
//!
//! Positions come from the depth sensor in millimetres. The axes follow the
//! sensor convention: X grows to the sensor's right, Y grows upward and Z grows
//! away from the sensor, so a limb pointing at the sensor points along `-Z`.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Magnitudes below this are treated as zero-length.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Unit vector along +X.
pub const AXIS_X: Vector3 = Vector3::new(1.0, 0.0, 0.0);
/// Unit vector along +Y.
pub const AXIS_Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);
/// Unit vector along +Z.
pub const AXIS_Z: Vector3 = Vector3::new(0.0, 0.0, 1.0);
/// Unit vector along -X.
pub const AXIS_NEG_X: Vector3 = Vector3::new(-1.0, 0.0, 0.0);
/// Unit vector along -Y.
pub const AXIS_NEG_Y: Vector3 = Vector3::new(0.0, -1.0, 0.0);
/// Unit vector along -Z.
pub const AXIS_NEG_Z: Vector3 = Vector3::new(0.0, 0.0, -1.0);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Vector pointing from `start` to `end`.
    pub fn between(start: Vector3, end: Vector3) -> Self {
        end - start
    }

    pub fn magnitude(&self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn dot(&self, other: &Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn distance(&self, other: &Vector3) -> f32 {
        (*other - *self).magnitude()
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.magnitude() > DEGENERATE_EPSILON)
    }

    /// Unit vector with the same direction, or `None` for a zero-length
    /// (or non-finite) vector.
    pub fn try_normalize(&self) -> Option<Vector3> {
        let magnitude = self.magnitude();
        if magnitude > DEGENERATE_EPSILON && magnitude.is_finite() {
            Some(*self / magnitude)
        } else {
            None
        }
    }

    /// Unit vector with the same direction; the zero vector maps to itself.
    pub fn normalize_or_zero(&self) -> Vector3 {
        self.try_normalize().unwrap_or(Vector3::ZERO)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(value: [f32; 3]) -> Self {
        Vector3::new(value[0], value[1], value[2])
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Vector3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f32) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: f32) -> Vector3 {
        Vector3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

/// Angle between two vectors in degrees, in `[0, 180]`.
///
/// The cosine is clamped to `[-1, 1]` before `acos`, so rounding overshoot on
/// nearly parallel vectors never produces NaN. Returns `None` when either
/// vector has zero length.
pub fn angle_between(u: &Vector3, v: &Vector3) -> Option<f32> {
    let u = u.try_normalize()?;
    let v = v.try_normalize()?;
    let cos = u.dot(&v).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}
