//! Camera description and the ray math used for hover picking.
//!
//! Nothing here references platform APIs; the web frontend converts pointer
//! coordinates to normalized device coordinates before calling in.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::constants::{CAMERA_FOVY_DEG, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR};

/// Right-handed camera with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// World-space ray through a point given in normalized device coordinates
    /// (x right, y up, both in \[-1, 1\]).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            dir: (p1 - self.eye).normalize(),
        }
    }

    /// Project a world point to NDC. `None` when the point is behind the eye.
    pub fn project_to_ndc(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Intersection with the plane `z = plane_z`.
    pub fn hit_plane_z(&self, plane_z: f32) -> Option<Vec3> {
        if self.dir.z.abs() <= 1e-6 {
            return None;
        }
        let t = (plane_z - self.origin.z) / self.dir.z;
        (t >= 0.0).then(|| self.at(t))
    }
}

/// Distance along `ray` to a rectangle lying in the local XY plane of `model`,
/// centred on the local origin with the given half extents.
pub fn ray_rect(ray: &Ray, model: &Mat4, half_extents: Vec2) -> Option<f32> {
    let inv = model.inverse();
    let o = inv.transform_point3(ray.origin);
    let d = inv.transform_vector3(ray.dir);
    if d.z.abs() <= 1e-9 {
        return None;
    }
    let t_local = -o.z / d.z;
    if t_local < 0.0 {
        return None;
    }
    let p = o + d * t_local;
    if p.x.abs() > half_extents.x || p.y.abs() > half_extents.y {
        return None;
    }
    // Report the distance in world units so hits on differently scaled items compare.
    let world_hit = model.transform_point3(p);
    Some((world_hit - ray.origin).length())
}
