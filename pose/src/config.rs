use serde::Deserialize;

use crate::error::{PoseError, Result};

/// Thresholds and timings for pose detection.
///
/// Every field has a default, so a config file only needs to name the values
/// it overrides. Angles are degrees, distances are sensor millimetres and
/// durations are seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoseConfig {
    /// Joints reported below this confidence are unusable.
    pub min_confidence: f32,
    /// Maximum elbow bend for an arm to count as straight in transformation
    /// and ability poses.
    pub straight_range_deg: f32,
    /// Maximum deviation between a limb and the axis it should point along.
    pub axis_tolerance_deg: f32,
    /// Maximum elbow bend for a firing arm.
    pub fire_straight_deg: f32,
    /// Minimum elbow bend for the ice rod to count as lowered.
    pub rod_bent_deg: f32,
    /// Forearms are crossed when the angle between them lies in this band.
    pub crossed_band_deg: [f32; 2],
    /// Vertical slack when comparing a hand with its shoulder.
    pub hand_height_margin: f32,
    pub cannon: CannonConfig,
    pub ice: IceConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CannonConfig {
    /// How long the transformation pose must be held.
    pub hold_secs: f64,
    /// Progress percentages at which the hold moves to stage 2 and stage 3.
    pub stage_bands_pct: [u32; 2],
    pub ability_hold_secs: f64,
    /// Firing ticks skipped between two accepted shots.
    pub shot_delay_ticks: u32,
    pub projectile: ProjectileConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IceConfig {
    /// Hold time after the third stage pose before the transformation completes.
    pub finish_hold_secs: f64,
    pub ability_hold_secs: f64,
    pub projectile: ProjectileConfig,
    /// Offsets added to the forearm direction, one projectile per entry.
    pub volley_offsets: Vec<[f32; 3]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Distance travelled per tick.
    pub speed: f32,
    /// Displacement from the origin after which the projectile dies.
    pub max_distance: f32,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            straight_range_deg: 60.0,
            axis_tolerance_deg: 30.0,
            fire_straight_deg: 30.0,
            rod_bent_deg: 90.0,
            crossed_band_deg: [60.0, 120.0],
            hand_height_margin: 150.0,
            cannon: CannonConfig::default(),
            ice: IceConfig::default(),
        }
    }
}

impl Default for CannonConfig {
    fn default() -> Self {
        Self {
            hold_secs: 3.5,
            stage_bands_pct: [35, 70],
            ability_hold_secs: 0.0,
            shot_delay_ticks: 2,
            projectile: ProjectileConfig {
                speed: 1.5,
                max_distance: 10_000.0,
            },
        }
    }
}

impl Default for IceConfig {
    fn default() -> Self {
        Self {
            finish_hold_secs: 0.0,
            ability_hold_secs: 0.0,
            projectile: ProjectileConfig {
                speed: 0.5,
                max_distance: 10_000.0,
            },
            volley_offsets: vec![[0.0, 0.0, 0.0], [8.0, 8.0, 0.0], [-8.0, 8.0, 0.0]],
        }
    }
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            max_distance: 10_000.0,
        }
    }
}

impl PoseConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(PoseError::invalid(
                "min_confidence",
                format!("{} is outside [0, 1]", self.min_confidence),
            ));
        }

        check_angle("straight_range_deg", self.straight_range_deg)?;
        check_angle("axis_tolerance_deg", self.axis_tolerance_deg)?;
        check_angle("fire_straight_deg", self.fire_straight_deg)?;
        check_angle("rod_bent_deg", self.rod_bent_deg)?;

        let [low, high] = self.crossed_band_deg;
        check_angle("crossed_band_deg", low)?;
        check_angle("crossed_band_deg", high)?;
        if low > high {
            return Err(PoseError::invalid(
                "crossed_band_deg",
                format!("lower bound {} exceeds upper bound {}", low, high),
            ));
        }

        if self.fire_straight_deg >= self.rod_bent_deg {
            return Err(PoseError::invalid(
                "rod_bent_deg",
                "must be larger than fire_straight_deg so raising and lowering never overlap",
            ));
        }

        if !(self.hand_height_margin >= 0.0) {
            return Err(PoseError::invalid(
                "hand_height_margin",
                "must be non-negative",
            ));
        }

        check_duration("cannon.hold_secs", self.cannon.hold_secs)?;
        check_duration("cannon.ability_hold_secs", self.cannon.ability_hold_secs)?;
        check_duration("ice.finish_hold_secs", self.ice.finish_hold_secs)?;
        check_duration("ice.ability_hold_secs", self.ice.ability_hold_secs)?;

        let [stage_two, stage_three] = self.cannon.stage_bands_pct;
        if !(0 < stage_two && stage_two < stage_three && stage_three < 100) {
            return Err(PoseError::invalid(
                "cannon.stage_bands_pct",
                format!(
                    "bands must be strictly increasing inside (0, 100), got [{}, {}]",
                    stage_two, stage_three
                ),
            ));
        }

        check_projectile("cannon.projectile", &self.cannon.projectile)?;
        check_projectile("ice.projectile", &self.ice.projectile)?;

        if self.ice.volley_offsets.is_empty() {
            return Err(PoseError::invalid(
                "ice.volley_offsets",
                "at least one offset is required",
            ));
        }

        Ok(())
    }
}

fn check_angle(field: &'static str, value: f32) -> Result<()> {
    if (0.0..=180.0).contains(&value) {
        Ok(())
    } else {
        Err(PoseError::invalid(
            field,
            format!("{} is outside [0, 180] degrees", value),
        ))
    }
}

fn check_duration(field: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PoseError::invalid(
            field,
            format!("{} is not a non-negative duration", value),
        ))
    }
}

fn check_projectile(field: &'static str, projectile: &ProjectileConfig) -> Result<()> {
    if !(projectile.speed > 0.0) {
        return Err(PoseError::invalid(field, "speed must be positive"));
    }
    if !(projectile.max_distance > 0.0) {
        return Err(PoseError::invalid(field, "max_distance must be positive"));
    }
    Ok(())
}
