use ultraviolet::Vec3;

/// Shading parameters for one surface. Immutable once built; stored by
/// value in the surface that owns it.
#[derive(Clone, Copy)]
pub struct Material {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub ambient: Vec3,
    pub shininess: f32,
    pub mirror: f32,
}

impl Material {
    /// Purely diffuse material with no highlight or mirror term.
    pub fn matte(col: Vec3) -> Self {
        Material {
            diffuse: col,
            specular: Vec3::zero(),
            ambient: col * 0.1,
            shininess: 1.0,
            mirror: 0.0,
        }
    }
}
