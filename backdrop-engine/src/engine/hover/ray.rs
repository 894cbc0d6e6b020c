use bevy::math::{Ray3d, Vec3};
use bevy::transform::components::Transform;

use crate::engine::scene::HitVolume;

/// Distance along the ray to the volume's nearest positive hit.
pub fn ray_hits_volume(ray: &Ray3d, volume: &HitVolume) -> Option<f32> {
    let dir = ray.direction.as_vec3();
    match *volume {
        HitVolume::Sphere { center, radius } => ray_hits_sphere(ray.origin, dir, center, radius),
        HitVolume::Obb { transform, size } => ray_hits_obb(ray.origin, dir, &transform, size),
        HitVolume::Segment {
            start,
            end,
            threshold,
        } => ray_hits_segment(ray.origin, dir, start, end, threshold),
    }
}

/// Distance along the ray to its closest approach with the segment, when that
/// approach is within `threshold`.
pub fn ray_hits_segment(
    origin: Vec3,
    dir: Vec3,
    start: Vec3,
    end: Vec3,
    threshold: f32,
) -> Option<f32> {
    let dir = dir.try_normalize()?;
    let seg = end - start;
    let seg_len_sq = seg.length_squared();
    let w = origin - start;

    let (s, u) = if seg_len_sq <= f32::EPSILON {
        ((-w.dot(dir)).max(0.0), 0.0)
    } else {
        let b = dir.dot(seg);
        let d = dir.dot(w);
        let e = seg.dot(w);
        let denom = seg_len_sq - b * b;
        let s = if denom > f32::EPSILON {
            ((b * e - seg_len_sq * d) / denom).max(0.0)
        } else {
            0.0
        };
        // Clamp onto the segment, then re-project onto the ray.
        let u = ((e + s * b) / seg_len_sq).clamp(0.0, 1.0);
        ((u * b - d).max(0.0), u)
    };

    let on_ray = origin + dir * s;
    let on_segment = start + seg * u;
    (on_ray.distance_squared(on_segment) <= threshold * threshold).then_some(s)
}

pub fn ray_hits_obb(origin: Vec3, dir: Vec3, transform: &Transform, size: Vec3) -> Option<f32> {
    // The transform is affine, so `t` measured in local space is the world `t`.
    let inv = transform.compute_matrix().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    let he = size * 0.5;
    ray_aabb_hit_t(o_local, d_local, -he, he)
}

pub fn ray_hits_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_origin = origin - center;
    let a = dir.length_squared();
    if a == 0.0 {
        return None;
    }
    let b = to_origin.dot(dir);
    let c = to_origin.length_squared() - radius * radius;
    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = (-b - root) / a;
    let far = (-b + root) / a;
    if far < 0.0 {
        return None;
    }
    Some(if near >= 0.0 { near } else { far })
}

/// Slab-method ray/AABB intersection; `Some(t)` of the first non-negative hit.
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = ray_direction.recip();
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for axis in 0..3 {
        if ray_direction[axis] == 0.0 {
            // Parallel to this slab: miss unless the origin sits inside it.
            if ray_origin[axis] < min[axis] || ray_origin[axis] > max[axis] {
                return None;
            }
            continue;
        }
        let mut t0 = (min[axis] - ray_origin[axis]) * inv[axis];
        let mut t1 = (max[axis] - ray_origin[axis]) * inv[axis];
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        tmin = tmin.max(t0);
        tmax = tmax.min(t1);
        if tmin > tmax {
            return None;
        }
    }

    if tmax < 0.0 {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::{Dir3, Quat};

    #[test]
    fn aabb_hit_from_outside_and_inside() {
        let t = ray_aabb_hit_t(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, -Vec3::ONE, Vec3::ONE);
        assert_eq!(t, Some(9.0));

        let inside = ray_aabb_hit_t(Vec3::ZERO, Vec3::X, -Vec3::ONE, Vec3::ONE);
        assert_eq!(inside, Some(1.0));

        let behind = ray_aabb_hit_t(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, -Vec3::ONE, Vec3::ONE);
        assert_eq!(behind, None);

        let parallel_miss =
            ray_aabb_hit_t(Vec3::new(0.0, 5.0, 10.0), Vec3::NEG_Z, -Vec3::ONE, Vec3::ONE);
        assert_eq!(parallel_miss, None);
    }

    #[test]
    fn rotated_box_is_hit_on_its_corner() {
        // A cube turned 45 degrees about Z reaches sqrt(2) along the X axis.
        let transform = Transform {
            translation: Vec3::ZERO,
            rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_4),
            scale: Vec3::ONE,
        };
        let origin = Vec3::new(1.3, 0.0, 10.0);
        assert!(ray_hits_obb(origin, Vec3::NEG_Z, &transform, Vec3::splat(2.0)).is_some());
        let axis_aligned = Transform::IDENTITY;
        assert!(ray_hits_obb(origin, Vec3::NEG_Z, &axis_aligned, Vec3::splat(2.0)).is_none());
    }

    #[test]
    fn segment_hit_within_threshold() {
        let origin = Vec3::new(0.0, 0.0, 70.0);
        let start = Vec3::new(-10.0, 0.5, 10.0);
        let end = Vec3::new(10.0, 0.5, 10.0);

        let t = ray_hits_segment(origin, Vec3::NEG_Z, start, end, 1.0).unwrap();
        assert!((t - 60.0).abs() < 1e-4);

        assert_eq!(ray_hits_segment(origin, Vec3::NEG_Z, start, end, 0.4), None);

        // Past the segment's end the gap is measured to the endpoint.
        let beside = Vec3::new(10.8, 0.5, 70.0);
        assert!(ray_hits_segment(beside, Vec3::NEG_Z, start, end, 1.0).is_some());
        let beyond = Vec3::new(11.5, 0.5, 70.0);
        assert_eq!(ray_hits_segment(beyond, Vec3::NEG_Z, start, end, 1.0), None);

        // Segments behind the eye are never hit.
        assert_eq!(ray_hits_segment(origin, Vec3::Z, start, end, 1.0), None);
    }

    #[test]
    fn sphere_hits_front_surface() {
        let ray = Ray3d::new(Vec3::new(0.0, 0.0, 70.0), Dir3::NEG_Z);
        let volume = HitVolume::Sphere {
            center: Vec3::ZERO,
            radius: 2.0,
        };
        let t = ray_hits_volume(&ray, &volume).unwrap();
        assert!((t - 68.0).abs() < 1e-4);

        let off = Ray3d::new(Vec3::new(3.0, 0.0, 70.0), Dir3::NEG_Z);
        assert_eq!(ray_hits_volume(&off, &volume), None);
    }
}
