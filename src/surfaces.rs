use ultraviolet::Vec3;

use crate::materials::Material;
use crate::primitives::{Ray, Sphere, Triangle, FAR};

/// Anything a ray can hit.
pub trait Surface {
    /// Nearest hit with `t_min <= t < t_max`, or `None`.
    fn intersect(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<Hit>;

    /// Unit outward normal; only defined for points on the surface.
    fn normal(&self, pos: Vec3) -> Vec3;
}

pub struct Hit<'a> {
    pub t: f32,
    pub pos: Vec3,
    pub norm: Vec3,
    pub mat: &'a Material,
}

pub struct SphereSurface {
    pub sphere: Sphere,
    pub mat: Material,
}

impl Surface for SphereSurface {
    fn intersect(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<Hit> {
        let t = self.sphere.intersect(ray, t_min, t_max);
        if t == FAR {
            return None;
        }

        let pos = ray.at(t);
        Some(Hit {
            t,
            pos,
            norm: self.normal(pos),
            mat: &self.mat,
        })
    }

    fn normal(&self, pos: Vec3) -> Vec3 {
        self.sphere.normal(pos)
    }
}

pub struct TriangleSurface {
    pub tri: Triangle,
    pub mat: Material,
}

impl Surface for TriangleSurface {
    fn intersect(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<Hit> {
        let t = self.tri.intersect(ray, t_min, t_max);
        if t == FAR {
            return None;
        }

        Some(Hit {
            t,
            pos: ray.at(t),
            norm: self.tri.normal(),
            mat: &self.mat,
        })
    }

    fn normal(&self, _pos: Vec3) -> Vec3 {
        self.tri.normal()
    }
}

/// The whole scene as one surface, so every ray query goes through the same
/// dispatch path.
pub struct Scene {
    pub objects: Vec<Box<dyn Surface>>,
}

impl Surface for Scene {
    fn intersect(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<Hit> {
        let mut hit: Option<Hit> = None;

        for object in self.objects.iter() {
            let temp_hit = object.intersect(ray, t_min, t_max);

            if let Some(Hit { t, .. }) = hit {
                if let Some(new_hit) = temp_hit {
                    if new_hit.t < t {
                        hit = Some(new_hit);
                    }
                }
            } else {
                hit = temp_hit;
            }
        }
        hit
    }

    fn normal(&self, _pos: Vec3) -> Vec3 {
        // Physical queries go to leaf surfaces, never the aggregate.
        unreachable!("normal() called on a Scene aggregate")
    }
}
