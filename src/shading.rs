use ultraviolet::Vec3;

use crate::primitives::{Ray, EPSILON, FAR};
use crate::surfaces::{Scene, Surface};

/// Everything the shading engine reads: the geometry, one point light and
/// the color returned for rays that escape the scene.
pub struct World {
    pub scene: Scene,
    pub light: Vec3,
    pub background: Vec3,
}

#[derive(Clone, Copy)]
pub struct TraceOptions {
    pub shadows: bool,
    pub reflection: bool,
    pub reflection_depth: u32,
}

impl Default for TraceOptions {
    fn default() -> Self {
        TraceOptions {
            shadows: true,
            reflection: true,
            reflection_depth: 3,
        }
    }
}

/// Color seen along `ray`, over the half-open interval `[t_min, t_max)`.
///
/// Ambient is always contributed. A shadowed point keeps only its ambient
/// term; otherwise Blinn-Phong diffuse and specular are added, and a mirror
/// bounce recurses while `depth` lasts. Channels are not clamped here.
pub fn shade(
    world: &World,
    ray: &Ray,
    t_min: f32,
    t_max: f32,
    depth: u32,
    opts: &TraceOptions,
) -> Vec3 {
    let hit = match world.scene.intersect(ray, t_min, t_max) {
        Some(hit) => hit,
        None => return world.background,
    };

    let light_dir = (world.light - hit.pos).normalized();
    let mut col = hit.mat.ambient;

    if opts.shadows {
        let shadow_ray = Ray {
            origin: hit.pos + light_dir * EPSILON,
            direction: light_dir,
        };
        // Any occluder at all means fully shadowed.
        if world.scene.intersect(&shadow_ray, EPSILON, FAR).is_some() {
            return col;
        }
    }

    let diffuse = hit.norm.dot(light_dir).max(0.0);
    let half = ((-ray.direction).normalized() + light_dir).normalized();
    let specular = hit.norm.dot(half).max(0.0).powf(hit.mat.shininess);
    col += hit.mat.diffuse * diffuse + hit.mat.specular * specular;

    if opts.reflection && depth > 0 && hit.mat.mirror != 0.0 {
        let reflected = ray.direction - hit.norm * 2.0 * ray.direction.dot(hit.norm);
        let mirror_ray = Ray {
            origin: hit.pos + reflected * EPSILON,
            direction: reflected,
        };
        col += shade(world, &mirror_ray, EPSILON, FAR, depth - 1, opts) * hit.mat.mirror;
    }

    col
}
