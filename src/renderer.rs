//! Frame sinks. [`SoftwareRenderer`] rasterizes the scene graph on the CPU
//! into a [`Canvas`]; presentation to a window is a separate step.

use glam::{Mat4, Vec3, Vec4};
use log::trace;

use crate::core::canvas::{Canvas, Rgba};
use crate::error::RenderError;
use crate::math::Color;
use crate::scene::{Light, Material, NodeId, NodeKind, SceneGraph};

/// Per-frame statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderInfo {
    /// Filled triangles that survived culling and clipping
    pub triangles: usize,
    /// Line segments drawn (wireframes and helpers)
    pub lines: usize,
    /// Visible meshes submitted
    pub meshes: usize,
}

pub trait Renderer {
    /// Output size in logical pixels
    fn set_size(&mut self, width: u32, height: u32);

    fn set_pixel_ratio(&mut self, ratio: f32);

    fn size(&self) -> (u32, u32);

    fn pixel_ratio(&self) -> f32;

    /// Draw `scene` as seen from the camera node `camera`
    fn render(&mut self, scene: &SceneGraph, camera: NodeId) -> Result<RenderInfo, RenderError>;
}

const AXIS_COLORS: [Color; 3] = [Color::RED, Color::GREEN, Color::BLUE];

/// Lights gathered once per frame in world space
#[derive(Debug, Default)]
struct LightRig {
    ambient: Color,
    directional: Vec<(Vec3, Color)>,
    point: Vec<(Vec3, Color, f32)>,
}

impl LightRig {
    fn collect(scene: &SceneGraph, visible: &[(NodeId, Mat4)]) -> Self {
        let mut rig = LightRig { ambient: Color::BLACK, ..Default::default() };
        for (id, world) in visible {
            let Some(NodeKind::Light(light)) = scene.get(*id).map(|n| &n.kind) else {
                continue;
            };
            let position = world.transform_point3(Vec3::ZERO);
            match *light {
                Light::Ambient { color, intensity } => rig.ambient = rig.ambient.add(color.scale(intensity)),
                Light::Directional { color, intensity } => {
                    // shines from its position toward the origin
                    let towards_light = position.normalize_or(Vec3::Y);
                    rig.directional.push((towards_light, color.scale(intensity)));
                }
                Light::Point { color, intensity, distance } => {
                    rig.point.push((position, color.scale(intensity), distance));
                }
            }
        }
        rig
    }

    /// Lambert irradiance at `point` with face normal `normal`
    fn shade(&self, point: Vec3, normal: Vec3) -> Color {
        let mut total = self.ambient;
        for (direction, color) in &self.directional {
            total = total.add(color.scale(normal.dot(*direction).max(0.0)));
        }
        for (position, color, distance) in &self.point {
            let to_light = *position - point;
            let d = to_light.length();
            let falloff = if *distance > 0.0 { (1.0 - d / distance).max(0.0) } else { 1.0 };
            let lambert = normal.dot(to_light / d.max(f32::EPSILON)).max(0.0);
            total = total.add(color.scale(lambert * falloff));
        }
        total
    }
}

/// CPU rasterizer: flat-shaded triangles, wireframes and helper lines
#[derive(Debug, Clone)]
pub struct SoftwareRenderer {
    canvas: Canvas,
    width: u32,
    height: u32,
    pixel_ratio: f32,
    clear_color: Color,
    clear_alpha: f32,
}

impl SoftwareRenderer {
    /// Create renderer clearing to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        let mut renderer = Self {
            canvas: Canvas::new(1, 1),
            width: width.max(1),
            height: height.max(1),
            pixel_ratio: 1.0,
            clear_color: Color::BLACK,
            clear_alpha: 0.0,
        };
        renderer.resize_canvas();
        renderer
    }

    pub fn set_clear_color(&mut self, color: Color, alpha: f32) {
        self.clear_color = color;
        self.clear_alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn clear_color(&self) -> (Color, f32) {
        (self.clear_color, self.clear_alpha)
    }

    /// Last rendered frame
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Physical size of the backing canvas
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    fn resize_canvas(&mut self) {
        let scale = |v: u32| ((v as f32 * self.pixel_ratio).round() as u32).max(1);
        self.canvas.resize(scale(self.width), scale(self.height));
    }

    /// Visible nodes with their world matrices; a hidden node hides its subtree
    fn visible_nodes(scene: &SceneGraph) -> Vec<(NodeId, Mat4)> {
        let mut out = Vec::with_capacity(scene.len());
        let mut stack = vec![(scene.root(), Mat4::IDENTITY)];
        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = scene.get(id) else { continue };
            if !node.visible {
                continue;
            }
            let world = parent_world * node.transform.matrix();
            out.push((id, world));
            for &child in scene.children(id).iter().rev() {
                stack.push((child, world));
            }
        }
        out
    }
}

/// Projects world positions to screen space for one frame
struct Projector {
    view_projection: Mat4,
    width: f32,
    height: f32,
}

impl Projector {
    /// Screen position with NDC depth, or None when behind the near plane
    fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip: Vec4 = self.view_projection * world.extend(1.0);
        if clip.w <= f32::EPSILON || clip.z < -clip.w {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec3::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
            ndc.z,
        ))
    }
}

impl Renderer for SoftwareRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.resize_canvas();
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        if ratio.is_finite() && ratio > 0.0 {
            self.pixel_ratio = ratio;
            self.resize_canvas();
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn render(&mut self, scene: &SceneGraph, camera: NodeId) -> Result<RenderInfo, RenderError> {
        let projection = scene.camera(camera)?.projection_matrix();
        let view = scene.world_matrix(camera).inverse();
        let (width, height) = self.canvas.dimensions();
        let projector = Projector {
            view_projection: projection * view,
            width: width as f32,
            height: height as f32,
        };

        self.canvas.clear(self.clear_color.to_rgba8((self.clear_alpha * 255.0).round() as u8));

        let visible = Self::visible_nodes(scene);
        let lights = LightRig::collect(scene, &visible);
        let mut info = RenderInfo::default();

        for (id, world) in &visible {
            let Some(node) = scene.get(*id) else { continue };
            match &node.kind {
                NodeKind::Mesh(mesh) => {
                    info.meshes += 1;
                    let data = mesh.data();
                    for [a, b, c] in data.triangles() {
                        let corners = [world.transform_point3(a), world.transform_point3(b), world.transform_point3(c)];
                        let (Some(sa), Some(sb), Some(sc)) = (
                            projector.project(corners[0]),
                            projector.project(corners[1]),
                            projector.project(corners[2]),
                        ) else {
                            continue;
                        };

                        if mesh.material.wireframe() {
                            let color = mesh.material.color().to_rgba8(255);
                            for (from, to) in [(sa, sb), (sb, sc), (sc, sa)] {
                                self.canvas.draw_line(from, to, color);
                                info.lines += 1;
                            }
                            continue;
                        }

                        // counter-clockwise in NDC turns clockwise once y points down
                        let signed = (sb.x - sa.x) * (sc.y - sa.y) - (sb.y - sa.y) * (sc.x - sa.x);
                        if signed >= 0.0 {
                            continue;
                        }

                        let color = face_color(&mesh.material, &lights, corners);
                        if self.canvas.fill_triangle(sa, sb, sc, color) > 0 {
                            info.triangles += 1;
                        }
                    }
                }
                NodeKind::AxesHelper { size } => {
                    let Some(origin) = projector.project(world.transform_point3(Vec3::ZERO)) else {
                        continue;
                    };
                    for (axis, color) in [Vec3::X, Vec3::Y, Vec3::Z].into_iter().zip(AXIS_COLORS) {
                        if let Some(tip) = projector.project(world.transform_point3(axis * *size)) {
                            self.canvas.draw_line(origin, tip, color.to_rgba8(255));
                            info.lines += 1;
                        }
                    }
                }
                NodeKind::Group | NodeKind::Camera(_) | NodeKind::Light(_) => {}
            }
        }

        trace!("rendered {info:?}");
        Ok(info)
    }
}

fn face_color(material: &Material, lights: &LightRig, corners: [Vec3; 3]) -> Rgba {
    let base = material.color();
    if !material.is_lit() {
        return base.to_rgba8(255);
    }
    let normal = (corners[1] - corners[0]).cross(corners[2] - corners[0]).normalize_or_zero();
    let centroid = (corners[0] + corners[1] + corners[2]) / 3.0;
    base.modulate(lights.shade(centroid, normal)).to_rgba8(255)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use crate::math::Geometry;
    use crate::scene::Node;

    fn scene_with_camera() -> (SceneGraph, NodeId) {
        let mut scene = SceneGraph::new();
        let camera = scene.spawn(Node::camera(PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0)).at(0.0, 0.0, 3.0));
        (scene, camera)
    }

    #[test]
    fn empty_scene_clears_transparent() {
        let (scene, camera) = scene_with_camera();
        let mut renderer = SoftwareRenderer::new(16, 16);
        let info = renderer.render(&scene, camera).unwrap();
        assert_eq!(info, RenderInfo::default());
        assert!(renderer.canvas().pixels().iter().all(|p| *p == [0, 0, 0, 0]));
    }

    #[test]
    fn unlit_cube_fills_center() {
        let (mut scene, camera) = scene_with_camera();
        scene.spawn(Node::mesh(Geometry::cube(1.0), Material::basic(Color::RED)));

        let mut renderer = SoftwareRenderer::new(32, 32);
        let info = renderer.render(&scene, camera).unwrap();

        assert_eq!(info.meshes, 1);
        // only the face toward the camera survives culling: two triangles
        assert_eq!(info.triangles, 2);
        assert_eq!(renderer.canvas().pixel(16, 16), Some([255, 0, 0, 255]));
    }

    #[test]
    fn lit_material_without_lights_is_black() {
        let (mut scene, camera) = scene_with_camera();
        scene.spawn(Node::mesh(Geometry::cube(1.0), Material::standard(Color::WHITE)));

        let mut renderer = SoftwareRenderer::new(32, 32);
        renderer.render(&scene, camera).unwrap();
        assert_eq!(renderer.canvas().pixel(16, 16), Some([0, 0, 0, 255]));
    }

    #[test]
    fn ambient_light_tints_standard_material() {
        let (mut scene, camera) = scene_with_camera();
        scene.spawn(Node::mesh(Geometry::cube(1.0), Material::standard(Color::WHITE)));
        scene.spawn(Node::light(Light::Ambient { color: Color::WHITE, intensity: 0.5 }));

        let mut renderer = SoftwareRenderer::new(32, 32);
        renderer.render(&scene, camera).unwrap();
        assert_eq!(renderer.canvas().pixel(16, 16), Some([128, 128, 128, 255]));
    }

    #[test]
    fn hidden_parent_hides_subtree() {
        let (mut scene, camera) = scene_with_camera();
        let group = scene.spawn(Node::group());
        scene
            .add(group, Node::mesh(Geometry::cube(1.0), Material::basic(Color::RED)))
            .unwrap();
        scene.get_mut(group).unwrap().visible = false;

        let mut renderer = SoftwareRenderer::new(16, 16);
        let info = renderer.render(&scene, camera).unwrap();
        assert_eq!(info.meshes, 0);
    }

    #[test]
    fn mesh_behind_camera_is_rejected() {
        let (mut scene, camera) = scene_with_camera();
        scene.spawn(Node::mesh(Geometry::cube(1.0), Material::basic(Color::RED)).at(0.0, 0.0, 10.0));

        let mut renderer = SoftwareRenderer::new(16, 16);
        let info = renderer.render(&scene, camera).unwrap();
        assert_eq!(info.meshes, 1);
        assert_eq!(info.triangles, 0);
    }

    #[test]
    fn axes_helper_draws_three_lines() {
        let (mut scene, camera) = scene_with_camera();
        scene.spawn(Node::axes_helper(1.0));

        let mut renderer = SoftwareRenderer::new(32, 32);
        let info = renderer.render(&scene, camera).unwrap();
        assert_eq!(info.lines, 3);
    }

    #[test]
    fn render_requires_camera_node() {
        let (mut scene, _) = scene_with_camera();
        let group = scene.spawn(Node::group());
        let mut renderer = SoftwareRenderer::new(8, 8);
        assert!(matches!(renderer.render(&scene, group), Err(RenderError::Scene(_))));
    }

    #[test]
    fn pixel_ratio_scales_canvas() {
        let mut renderer = SoftwareRenderer::new(100, 50);
        renderer.set_pixel_ratio(2.0);
        assert_eq!(renderer.size(), (100, 50));
        assert_eq!(renderer.drawing_buffer_size(), (200, 100));
        renderer.set_pixel_ratio(0.0);
        assert_eq!(renderer.pixel_ratio(), 2.0);
    }
}
