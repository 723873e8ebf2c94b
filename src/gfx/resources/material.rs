//! Material descriptors for generated geometry
//!
//! Provides the CPU-side material definition attached to each render group of a
//! [`Mesh`](crate::gfx::geometry::Mesh), plus the solid-colour texture the
//! generators assign when no texture is supplied. Uploading either to a GPU is
//! the rendering backend's job.

/// Material definition with PBR properties
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            emissive: [0.0, 0.0, 0.0],
        }
    }
}

impl Material {
    /// Builder pattern: Set base color from RGB values
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.base_color = [r, g, b, self.base_color[3]];
        self
    }

    /// Builder pattern: Set alpha transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.base_color[3] = alpha.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set metallic factor
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set emissive color
    pub fn with_emission(mut self, r: f32, g: f32, b: f32) -> Self {
        self.emissive = [r, g, b];
        self
    }
}

/// A 1x1 RGBA8 texture holding a single colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidTexture {
    pub rgba: [u8; 4],
}

impl SolidTexture {
    /// Quantizes a floating point colour (components in 0..=1) to RGBA8.
    pub fn from_color(color: [f32; 4]) -> Self {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            rgba: [
                quantize(color[0]),
                quantize(color[1]),
                quantize(color[2]),
                quantize(color[3]),
            ],
        }
    }

    /// Raw texel bytes, ready for upload.
    pub fn bytes(&self) -> &[u8] {
        &self.rgba
    }
}

impl Default for SolidTexture {
    fn default() -> Self {
        Self::from_color([1.0, 1.0, 1.0, 1.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_builder_clamps() {
        let material = Material::default()
            .with_color(1.0, 0.0, 0.0)
            .with_metallic(2.0)
            .with_roughness(-1.0)
            .with_alpha(0.5);

        assert_eq!(material.base_color, [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(material.metallic, 1.0);
        assert_eq!(material.roughness, 0.0);
    }

    #[test]
    fn test_solid_texture_quantizes() {
        let texture = SolidTexture::from_color([1.0, 0.5, 0.0, 2.0]);
        assert_eq!(texture.rgba, [255, 128, 0, 255]);
        assert_eq!(texture.bytes().len(), 4);
    }
}
