use bytemuck::{Pod, Zeroable};
use orbview_scene::SphereParams;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Generate a UV sphere: `sectors` longitudinal slices, `stacks` latitudinal
/// rings, shared-seam vertices duplicated so UVs stay continuous.
pub fn sphere_mesh(params: SphereParams) -> (Vec<SphereVertex>, Vec<u32>) {
    let SphereParams {
        radius,
        sectors,
        stacks,
    } = params;

    let mut vertices = Vec::with_capacity(((stacks + 1) * (sectors + 1)) as usize);
    for i in 0..=stacks {
        // Polar angle from the +Y pole.
        let phi = std::f32::consts::PI * i as f32 / stacks as f32;
        let y = phi.cos();
        let ring = phi.sin();
        for j in 0..=sectors {
            let theta = std::f32::consts::TAU * j as f32 / sectors as f32;
            let normal = [ring * theta.cos(), y, ring * theta.sin()];
            vertices.push(SphereVertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
                uv: [j as f32 / sectors as f32, i as f32 / stacks as f32],
            });
        }
    }

    let mut indices = Vec::new();
    for i in 0..stacks {
        let k1 = i * (sectors + 1);
        let k2 = k1 + sectors + 1;
        for j in 0..sectors {
            // Pole rings contribute one triangle per sector, not two.
            if i != 0 {
                indices.extend_from_slice(&[k1 + j, k2 + j, k1 + j + 1]);
            }
            if i != stacks - 1 {
                indices.extend_from_slice(&[k1 + j + 1, k2 + j, k2 + j + 1]);
            }
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SphereParams {
        SphereParams {
            radius: 1.0,
            sectors: 32,
            stacks: 32,
        }
    }

    #[test]
    fn vertex_and_index_counts() {
        let (vertices, indices) = sphere_mesh(params());
        assert_eq!(vertices.len(), 33 * 33);
        // 2 triangles per quad except single triangles at both pole rings.
        let triangles = 2 * 32 * 32 - 2 * 32;
        assert_eq!(indices.len(), triangles * 3);
        assert_eq!(indices.len() % 3, 0);
    }

    #[test]
    fn indices_are_in_range() {
        let (vertices, indices) = sphere_mesh(params());
        let max = *indices.iter().max().unwrap();
        assert!((max as usize) < vertices.len());
    }

    #[test]
    fn normals_are_unit_and_match_positions() {
        let (vertices, _) = sphere_mesh(SphereParams {
            radius: 2.0,
            sectors: 16,
            stacks: 16,
        });
        for v in &vertices {
            let n = glam::Vec3::from(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4);
            let p = glam::Vec3::from(v.position);
            assert!((p.length() - 2.0).abs() < 1e-4);
            // Normal points along the position for a sphere at the origin.
            assert!((p.normalize() - n).length() < 1e-4);
        }
    }

    #[test]
    fn uvs_cover_the_unit_square() {
        let (vertices, _) = sphere_mesh(params());
        for v in &vertices {
            assert!((0.0..=1.0).contains(&v.uv[0]));
            assert!((0.0..=1.0).contains(&v.uv[1]));
        }
        assert!(vertices.iter().any(|v| v.uv[1] == 0.0));
        assert!(vertices.iter().any(|v| v.uv[1] == 1.0));
    }
}
