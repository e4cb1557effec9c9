/// WGSL for the lit, textured sphere.
///
/// `modes` packs the debug-panel state: x = gamma-encode output, y = texture
/// decode mode (0 none, 1 linear, 2 sRGB), z = environment present,
/// w = base texture present. Lighting is computed in linear space; the
/// surface format is non-sRGB so encoding is explicit here.
pub const SPHERE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    inv_view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    light_dir: vec4<f32>,
    light_color: vec4<f32>,
    base_color: vec4<f32>,
    modes: vec4<u32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;
@group(0) @binding(1)
var base_texture: texture_2d<f32>;
@group(0) @binding(2)
var base_sampler: sampler;
@group(0) @binding(3)
var env_map: texture_cube<f32>;

fn srgb_to_linear(c: vec3<f32>) -> vec3<f32> {
    return pow(c, vec3<f32>(2.2));
}

fn linear_to_srgb(c: vec3<f32>) -> vec3<f32> {
    return pow(c, vec3<f32>(1.0 / 2.2));
}

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.world_pos = vertex.position;
    out.world_normal = vertex.normal;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    var albedo = uniforms.base_color.rgb;
    if (uniforms.modes.w == 1u) {
        var texel = textureSample(base_texture, base_sampler, in.uv).rgb;
        if (uniforms.modes.y == 2u) {
            texel = srgb_to_linear(texel);
        }
        albedo = albedo * texel;
    }

    let n = normalize(in.world_normal);
    let diffuse = max(dot(n, uniforms.light_dir.xyz), 0.0) * uniforms.light_dir.w;

    var ambient = vec3<f32>(0.03);
    var reflection = vec3<f32>(0.0);
    if (uniforms.modes.z == 1u) {
        // Environment lighting: irradiance along the normal, mirror
        // reflection sharpened by low roughness.
        ambient = srgb_to_linear(textureSample(env_map, base_sampler, n).rgb) * 0.3;
        let view = normalize(in.world_pos - uniforms.camera_pos.xyz);
        let r = reflect(view, n);
        let gloss = 1.0 - uniforms.base_color.a;
        reflection = srgb_to_linear(textureSample(env_map, base_sampler, r).rgb) * gloss * 0.5;
    }

    var color = albedo * (ambient + diffuse * uniforms.light_color.rgb / 3.14159265) + reflection;
    if (uniforms.modes.x == 1u) {
        color = linear_to_srgb(color);
    }
    return vec4<f32>(color, 1.0);
}
"#;

/// WGSL for the sky box: a fullscreen triangle whose fragments unproject
/// back to a world-space ray and sample the cube map. Depth is pinned to
/// 1.0 so the sphere always wins the depth test.
pub const SKY_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    inv_view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    light_dir: vec4<f32>,
    light_color: vec4<f32>,
    base_color: vec4<f32>,
    modes: vec4<u32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;
@group(0) @binding(2)
var base_sampler: sampler;
@group(0) @binding(3)
var env_map: texture_cube<f32>;

fn srgb_to_linear(c: vec3<f32>) -> vec3<f32> {
    return pow(c, vec3<f32>(2.2));
}

fn linear_to_srgb(c: vec3<f32>) -> vec3<f32> {
    return pow(c, vec3<f32>(1.0 / 2.2));
}

struct SkyOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) ndc: vec2<f32>,
};

@vertex
fn vs_sky(@builtin(vertex_index) index: u32) -> SkyOutput {
    // Oversized triangle covering the screen.
    let x = f32(i32(index) / 2) * 4.0 - 1.0;
    let y = f32(i32(index) % 2) * 4.0 - 1.0;
    var out: SkyOutput;
    out.clip_position = vec4<f32>(x, y, 1.0, 1.0);
    out.ndc = vec2<f32>(x, y);
    return out;
}

@fragment
fn fs_sky(in: SkyOutput) -> @location(0) vec4<f32> {
    let far = uniforms.inv_view_proj * vec4<f32>(in.ndc, 1.0, 1.0);
    let dir = normalize(far.xyz / far.w - uniforms.camera_pos.xyz);
    var color = srgb_to_linear(textureSample(env_map, base_sampler, dir).rgb);
    if (uniforms.modes.x == 1u) {
        color = linear_to_srgb(color);
    }
    return vec4<f32>(color, 1.0);
}
"#;
