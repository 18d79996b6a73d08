// lumen_sim/src/simulation/core/transforms.rs

use bevy::prelude::{Quat as BevyQuat, Resource, Transform as BevyTransform, Vec2 as BevyVec2};
use lumen_core::prelude::Pose;
use nalgebra::Point2;

// =========================================================================
// == Raster <-> Bevy World Frame ==
// =========================================================================

/// Describes where the background raster sits in the Bevy world.
///
/// The raster frame has its origin at the top-left pixel with `y` pointing
/// down; the Bevy 2D world has `y` pointing up. The raster is drawn centred
/// on the world origin, so
/// `world = (px - width/2, height/2 - py)`.
/// Because the y axis flips, a clockwise heading in the raster frame is a
/// negative rotation about Bevy's `z` axis.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct RasterFrame {
    pub width: f64,
    pub height: f64,
}

impl RasterFrame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
        }
    }

    /// Converts a raster point to a Bevy world position.
    pub fn to_world(&self, p: Point2<f64>) -> BevyVec2 {
        BevyVec2::new(
            (p.x - self.width / 2.0) as f32,
            (self.height / 2.0 - p.y) as f32,
        )
    }

    /// Converts a Bevy world position to a raster point.
    pub fn to_raster(&self, v: BevyVec2) -> Point2<f64> {
        Point2::new(
            v.x as f64 + self.width / 2.0,
            self.height / 2.0 - v.y as f64,
        )
    }

    /// Rotation of a sprite whose artwork faces +x, for a raster heading in degrees.
    pub fn heading_to_rotation(heading_deg: f64) -> BevyQuat {
        BevyQuat::from_rotation_z(-(heading_deg.to_radians()) as f32)
    }

    /// The transform of the agent sprite for `pose`, drawn at depth `z`.
    pub fn pose_to_transform(&self, pose: &Pose, z: f32) -> BevyTransform {
        let xy = self.to_world(pose.position);
        BevyTransform::from_xyz(xy.x, xy.y, z).with_rotation(Self::heading_to_rotation(pose.heading_deg))
    }
}

// --- Unit Test Module ---
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bevy::prelude::Vec3 as BevyVec3;

    const F32_EPSILON: f32 = 1e-4;

    fn frame() -> RasterFrame {
        RasterFrame::new(1280, 720)
    }

    #[test]
    fn raster_corners_map_to_world_corners() {
        let f = frame();
        let top_left = f.to_world(Point2::new(0.0, 0.0));
        assert_abs_diff_eq!(top_left.x, -640.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(top_left.y, 360.0, epsilon = F32_EPSILON);

        let centre = f.to_world(Point2::new(640.0, 360.0));
        assert_abs_diff_eq!(centre.x, 0.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(centre.y, 0.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn world_and_raster_round_trip() {
        let f = frame();
        let p = Point2::new(123.5, 654.25);
        let back = f.to_raster(f.to_world(p));
        assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-3);
        assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-3);
    }

    #[test]
    fn heading_rotates_sprite_clockwise_on_screen() {
        // Heading +90 in the raster frame points down the screen, i.e. -y in the world.
        let forward = RasterFrame::heading_to_rotation(90.0) * BevyVec3::X;
        assert_abs_diff_eq!(forward.x, 0.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(forward.y, -1.0, epsilon = F32_EPSILON);

        // The default heading of -90 points up the screen.
        let up = RasterFrame::heading_to_rotation(-90.0) * BevyVec3::X;
        assert_abs_diff_eq!(up.y, 1.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn pose_to_transform_places_and_orients() {
        let f = frame();
        let tf = f.pose_to_transform(&Pose::new(740.0, 260.0, 0.0), 1.0);
        assert_abs_diff_eq!(tf.translation.x, 100.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(tf.translation.y, 100.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(tf.translation.z, 1.0, epsilon = F32_EPSILON);
        let forward = tf.rotation * BevyVec3::X;
        assert_abs_diff_eq!(forward.x, 1.0, epsilon = F32_EPSILON);
    }
}
