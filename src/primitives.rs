use ultraviolet::Vec3;

/// Offset applied to shadow and reflection ray origins so they do not
/// re-intersect the surface they start on.
pub const EPSILON: f32 = 0.00001;

/// Distance meaning "no hit found so far" while scanning. Callers of the
/// raw intersect routines map it back to `None`; it never leaves the
/// `Option<Hit>` contract.
pub const FAR: f32 = 1e32;

pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Nearest root of the ray/sphere quadratic inside `[t_min, t_max)`,
    /// or `FAR` when both roots fall outside.
    ///
    /// The quadratic is solved in the `b = d.(o - c)` scaling with an
    /// explicit division by `d.d`; ray directions are not unit length by
    /// convention here.
    pub fn intersect(&self, ray: &Ray, t_min: f32, t_max: f32) -> f32 {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = ray.direction.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;
        let descrim = b * b - a * c;

        if descrim < 0.0 {
            return FAR;
        }

        let desc_sqrt = descrim.sqrt();
        let mut t1 = (-b - desc_sqrt) / a;
        let mut t2 = (-b + desc_sqrt) / a;
        if t1 < t_min || t1 >= t_max {
            t1 = FAR;
        }
        if t2 < t_min || t2 >= t_max {
            t2 = FAR;
        }
        t1.min(t2)
    }

    pub fn normal(&self, pos: Vec3) -> Vec3 {
        (pos - self.center) / self.radius
    }
}

pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

impl Triangle {
    /// Cramer's-rule solution of the barycentric 3x3 system, checked in the
    /// order t, gamma, beta. Returns `FAR` when the ray misses.
    pub fn intersect(&self, ray: &Ray, t_min: f32, t_max: f32) -> f32 {
        let a = self.v0.x - self.v1.x;
        let b = self.v0.y - self.v1.y;
        let c = self.v0.z - self.v1.z;
        let d = self.v0.x - self.v2.x;
        let e = self.v0.y - self.v2.y;
        let f = self.v0.z - self.v2.z;
        let g = ray.direction.x;
        let h = ray.direction.y;
        let i = ray.direction.z;
        let j = self.v0.x - ray.origin.x;
        let k = self.v0.y - ray.origin.y;
        let l = self.v0.z - ray.origin.z;

        let ei_hf = e * i - h * f;
        let gf_di = g * f - d * i;
        let dh_eg = d * h - e * g;
        let ak_jb = a * k - j * b;
        let jc_al = j * c - a * l;
        let bl_kc = b * l - k * c;

        // No guard for m near zero: a degenerate triangle is a scene-setup
        // precondition violation and the division propagates.
        let m = a * ei_hf + b * gf_di + c * dh_eg;

        let t = -(f * ak_jb + e * jc_al + d * bl_kc) / m;
        if t < t_min || t >= t_max {
            return FAR;
        }

        let gamma = (i * ak_jb + h * jc_al + g * bl_kc) / m;
        if !(0.0..=1.0).contains(&gamma) {
            return FAR;
        }

        let beta = (j * ei_hf + k * gf_di + l * dh_eg) / m;
        if beta < 0.0 || beta > 1.0 - gamma {
            return FAR;
        }

        t
    }

    /// Outward unit normal assuming the vertices are wound for it.
    /// Constant over the triangle, recomputed per call.
    pub fn normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(self.v2 - self.v0).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_returns_near_root() {
        let sphere = Sphere {
            center: Vec3::new(0.0, 0.0, -5.0),
            radius: 1.0,
        };
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };

        // Through the center: roots at center distance -/+ radius.
        let t = sphere.intersect(&ray, 0.0, FAR);
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_clips_near_root_to_interval() {
        let sphere = Sphere {
            center: Vec3::new(0.0, 0.0, -5.0),
            radius: 1.0,
        };
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };

        // With t_min past the near root only the far root survives.
        let t = sphere.intersect(&ray, 4.5, FAR);
        assert!((t - 6.0).abs() < 1e-5);

        // And with t_max before it, nothing does.
        assert_eq!(sphere.intersect(&ray, 4.5, 5.5), FAR);
    }

    #[test]
    fn sphere_miss_when_closest_approach_exceeds_radius() {
        let sphere = Sphere {
            center: Vec3::new(0.0, 0.0, -5.0),
            radius: 1.0,
        };
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 1.0, 0.0),
        };
        assert_eq!(sphere.intersect(&ray, 0.0, FAR), FAR);
    }

    #[test]
    fn sphere_interval_is_half_open() {
        let sphere = Sphere {
            center: Vec3::new(0.0, 0.0, -5.0),
            radius: 1.0,
        };
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        // t_min is inclusive, t_max exclusive.
        assert!((sphere.intersect(&ray, 4.0, FAR) - 4.0).abs() < 1e-5);
        assert_eq!(sphere.intersect(&ray, 0.0, 4.0), FAR);
    }

    #[test]
    fn triangle_hit_inside() {
        let tri = Triangle {
            v0: Vec3::new(-1.0, -1.0, -2.0),
            v1: Vec3::new(1.0, -1.0, -2.0),
            v2: Vec3::new(0.0, 1.0, -2.0),
        };
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let t = tri.intersect(&ray, 0.0, FAR);
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn triangle_miss_outside_projection() {
        let tri = Triangle {
            v0: Vec3::new(-1.0, -1.0, -2.0),
            v1: Vec3::new(1.0, -1.0, -2.0),
            v2: Vec3::new(0.0, 1.0, -2.0),
        };
        let ray = Ray {
            origin: Vec3::new(5.0, 5.0, 0.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        assert_eq!(tri.intersect(&ray, 0.0, FAR), FAR);
    }

    #[test]
    fn triangle_miss_behind_ray() {
        let tri = Triangle {
            v0: Vec3::new(-1.0, -1.0, 2.0),
            v1: Vec3::new(1.0, -1.0, 2.0),
            v2: Vec3::new(0.0, 1.0, 2.0),
        };
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        assert_eq!(tri.intersect(&ray, 0.0, FAR), FAR);
    }

    #[test]
    fn triangle_normal_follows_winding() {
        let tri = Triangle {
            v0: Vec3::new(-1.0, -1.0, -2.0),
            v1: Vec3::new(1.0, -1.0, -2.0),
            v2: Vec3::new(0.0, 1.0, -2.0),
        };
        let n = tri.normal();
        assert!((n - Vec3::new(0.0, 0.0, 1.0)).mag() < 1e-6);
    }
}
