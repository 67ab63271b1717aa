//! Interactive Rose Day card built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the card state (rose scene,
//! falling petals, star field, camera, message panel) and implements
//! [`eframe::App`] to draw it as stacked layers:
//!
//! 1. the lit 3D rose over a star field (central panel, background);
//! 2. the falling petal overlay (same painter, drawn afterwards);
//! 3. header, message card and share button (interactive areas);
//! 4. a vignette on the foreground layer, which never takes input.

use std::{f64::consts::PI, sync::Arc};

use eframe::App;
use egui::{Align2, Color32, Pos2, RichText, Stroke};
use glam::Vec2;
use rand::rng;
use rose_core::{
    camera::OrbitCamera,
    config::{BloomConfig, MotionConfig, ParticleConfig},
    generator::TextGenerator,
    lighting::LightRig,
    panel::MessagePanel,
    particle::ParticleField,
    scene::Scene,
    stars::{StarConfig, StarField},
    types::{Rgb, wrap_angle},
};
use tokio::runtime::Handle;

const ROSE_50: Color32 = Color32::from_rgb(0xff, 0xf1, 0xf2);
const ROSE_200: Color32 = Color32::from_rgb(0xfe, 0xcd, 0xd3);
const ROSE_300: Color32 = Color32::from_rgb(0xfd, 0xa4, 0xaf);
const ROSE_400: Color32 = Color32::from_rgb(0xfb, 0x71, 0x85);
const ROSE_500: Color32 = Color32::from_rgb(0xf4, 0x3f, 0x5e);
const ROSE_600: Color32 = Color32::from_rgb(0xe1, 0x1d, 0x48);

/// Main application state for the card.
///
/// ### Fields
/// - `scene` - The rose: static petal descriptors plus the per-frame spin.
/// - `particles` - Falling petals, drawn once at startup.
/// - `stars` - Background star shell, drawn once at startup.
/// - `camera` - Orbit camera driven by pointer drags.
/// - `rig` - Lights, fog and background colour.
///
/// - `panel` - Message card state machine.
/// - `generator` - Text-generation service used by the panel.
/// - `runtime` - Tokio runtime the generation requests run on.
///
/// - `share_notice` - Acknowledgement shown after pressing share, until dismissed.
pub struct Viewer {
    scene: Scene,
    particles: ParticleField,
    stars: StarField,
    camera: OrbitCamera,
    rig: LightRig,

    panel: MessagePanel,
    generator: Arc<dyn TextGenerator>,
    runtime: Handle,

    share_notice: Option<&'static str>,
}

impl Viewer {
    /// Creates the card with freshly generated geometry and the default message.
    ///
    /// Particles and stars are randomized here, once; they stay fixed for
    /// the rest of the session.
    pub fn new(runtime: Handle, generator: Arc<dyn TextGenerator>) -> Self {
        let mut rng = rng();
        Self {
            scene: Scene::new(&BloomConfig::default(), MotionConfig::default()),
            particles: ParticleField::random(&ParticleConfig::default(), &mut rng),
            stars: StarField::random(&StarConfig::default(), &mut rng),
            camera: OrbitCamera::default(),
            rig: LightRig::default(),
            panel: MessagePanel::default(),
            generator,
            runtime,
            share_notice: None,
        }
    }

    /// Asks the panel for a new message; ignored while one is being written.
    fn regenerate(&mut self) {
        self.panel.trigger(&self.runtime, Arc::clone(&self.generator));
    }

    fn share(&mut self) {
        self.share_notice = Some(self.panel.share());
    }

    /// Paints the rose, back to front, into `painter`.
    fn paint_rose(&self, painter: &egui::Painter, rect: egui::Rect, elapsed: f64) {
        let size = Vec2::new(rect.width(), rect.height());
        let eye = self.camera.eye();

        let mut faces = Vec::new();
        for tri in self.scene.triangles(elapsed) {
            if !tri.double_sided && tri.normal.dot(eye - tri.centroid()) < 0.0 {
                continue;
            }
            let [a, b, c] = tri.vertices;
            let (Some(a), Some(b), Some(c)) = (
                self.camera.project(a, size),
                self.camera.project(b, size),
                self.camera.project(c, size),
            ) else {
                continue;
            };

            let depth = (a.depth + b.depth + c.depth) / 3.0;
            let color = to_color32(self.rig.shade(&tri, eye, depth), tri.alpha);
            let points = [a, b, c].map(|p| rect.min + egui::vec2(p.screen.x, p.screen.y));
            faces.push((depth, points, color));
        }

        // Painter's algorithm: farthest first.
        faces.sort_by(|l, r| r.0.total_cmp(&l.0));

        let mut mesh = egui::Mesh::default();
        for (_, points, color) in faces {
            let base = mesh.vertices.len() as u32;
            for p in points {
                mesh.colored_vertex(p, color);
            }
            mesh.add_triangle(base, base + 1, base + 2);
        }
        painter.add(egui::Shape::mesh(mesh));
    }

    fn paint_stars(&self, painter: &egui::Painter, rect: egui::Rect, elapsed: f64) {
        let size = Vec2::new(rect.width(), rect.height());
        let color = to_color32(self.stars.cfg.color, 0.9);

        for star in &self.stars.stars {
            let Some(p) = self.camera.project(star.position, size) else {
                continue;
            };
            let pos = rect.min + egui::vec2(p.screen.x, p.screen.y);
            if !rect.contains(pos) {
                continue;
            }
            let radius = (self.stars.point_size(star, p.depth, elapsed) * 0.5).max(0.5);
            painter.circle_filled(pos, radius, color);
        }
    }

    fn paint_petals(&self, painter: &egui::Painter, rect: egui::Rect, elapsed: f64) {
        let cfg = self.particles.config();

        for particle in &self.particles.particles {
            let frame = self.particles.frame_at(particle, elapsed, rect.height());
            let top_left = rect.min
                + egui::vec2(
                    particle.x / 100.0 * rect.width(),
                    particle.y / 100.0 * rect.height(),
                );
            let center = top_left
                + egui::vec2(particle.size, particle.size * cfg.aspect) * 0.5
                + egui::vec2(frame.offset.x, frame.offset.y);

            let outline = petal_outline(center, particle.size, cfg.aspect, frame.rotation);
            painter.add(egui::Shape::convex_polygon(
                outline,
                to_color32(cfg.color, frame.opacity),
                Stroke::NONE,
            ));
        }
    }

    /// Full-window scene: background, stars, rose and falling petals.
    ///
    /// Dragging anywhere on it orbits the camera.
    fn ui_scene(&mut self, ctx: &egui::Context, elapsed: f64) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
                let rect = response.rect;

                if response.dragged() {
                    let delta = response.drag_delta();
                    self.camera.orbit(Vec2::new(delta.x, delta.y), rect.height());
                }

                let painter = ui.painter_at(rect);
                painter.rect_filled(rect, 0.0, to_color32(self.rig.background, 1.0));
                self.paint_stars(&painter, rect, elapsed);
                self.paint_rose(&painter, rect, elapsed);
                self.paint_petals(&painter, rect, elapsed);
            });
    }

    fn ui_header(&self, ctx: &egui::Context, elapsed: f64) {
        egui::Area::new("header".into())
            .anchor(Align2::CENTER_TOP, egui::vec2(0.0, 32.0))
            .interactable(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("Happy Rose Day")
                            .size(56.0)
                            .color(ROSE_200.gamma_multiply(pulse(elapsed))),
                    );
                    ui.label(RichText::new("Rohit").size(40.0).italics().color(Color32::WHITE));
                });
            });
    }

    /// The floating message card with its regenerate control.
    fn ui_card(&mut self, ctx: &egui::Context) {
        let generating = self.panel.is_generating();
        let mut clicked = false;

        egui::Area::new("card".into())
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 60.0))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(Color32::from_black_alpha(102))
                    .stroke(Stroke::new(1.0, ROSE_500.gamma_multiply(0.3)))
                    .corner_radius(24.0)
                    .inner_margin(egui::Margin::same(24))
                    .show(ui, |ui| {
                        ui.set_width(380.0);

                        ui.horizontal(|ui| {
                            ui.label(RichText::new("❤").size(24.0).color(ROSE_500));
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                // The spinner stands in for the button, so there is nothing to click.
                                if generating {
                                    ui.add(egui::Spinner::new().size(20.0).color(ROSE_300));
                                } else {
                                    let icon = RichText::new("✨").size(20.0).color(ROSE_300);
                                    clicked = ui
                                        .add(egui::Button::new(icon).frame(false))
                                        .on_hover_text("Write a new message")
                                        .clicked();
                                }
                            });
                        });

                        let message = self.panel.message();
                        ui.add_space(12.0);
                        ui.label(RichText::new(&message.title).size(22.0).color(ROSE_200));
                        ui.add_space(8.0);
                        ui.label(
                            RichText::new(format!("\"{}\"", message.content))
                                .size(18.0)
                                .italics()
                                .color(ROSE_50.gamma_multiply(0.8)),
                        );
                        ui.add_space(12.0);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                            ui.label(
                                RichText::new(format!("— {}", message.author))
                                    .size(20.0)
                                    .color(ROSE_400),
                            );
                        });
                    });
            });

        if clicked {
            self.regenerate();
        }
    }

    fn ui_footer(&mut self, ctx: &egui::Context) {
        egui::Area::new("footer".into())
            .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, -40.0))
            .show(ctx, |ui| {
                let button = egui::Button::new(RichText::new("➤  Send to Rohit").size(18.0).color(Color32::WHITE))
                    .fill(ROSE_600)
                    .corner_radius(24.0)
                    .min_size(egui::vec2(180.0, 44.0));
                if ui.add(button).clicked() {
                    self.share();
                }
            });
    }

    fn ui_share_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.share_notice else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Rose Day")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(notice);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.share_notice = None;
        }
    }

    fn paint_vignette(&self, ctx: &egui::Context) {
        let layer = egui::LayerId::new(egui::Order::Foreground, egui::Id::new("vignette"));
        let rect = ctx.screen_rect();
        ctx.layer_painter(layer)
            .add(egui::Shape::mesh(vignette_mesh(rect, 200.0, Color32::from_black_alpha(230))));
    }
}

impl App for Viewer {
    /// eframe callback that builds every layer for each frame.
    ///
    /// This method:
    /// - Collects a finished message request, if any.
    /// - Spins the rose one step further.
    /// - Draws the scene, the UI areas and the vignette, in that order.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.panel.poll();

        let elapsed = ctx.input(|i| i.time);
        self.scene.advance_frame();

        self.ui_scene(ctx, elapsed);
        self.ui_header(ctx, elapsed);
        self.ui_card(ctx);
        self.ui_footer(ctx);
        self.ui_share_notice(ctx);
        self.paint_vignette(ctx);

        // Continuous animation.
        ctx.request_repaint();
    }
}

fn to_color32(color: Rgb, alpha: f32) -> Color32 {
    let [r, g, b] = color.to_u8();
    Color32::from_rgba_unmultiplied(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Opacity of the header: 1 → 0.5 → 1 every two seconds.
fn pulse(elapsed: f64) -> f32 {
    0.75 + 0.25 * wrap_angle(PI * elapsed).cos()
}

/// Outline of a falling petal: an ellipse `size` wide and `size * aspect`
/// tall, rotated by `rotation_deg` about its centre.
fn petal_outline(center: Pos2, size: f32, aspect: f32, rotation_deg: f32) -> Vec<Pos2> {
    const SEGMENTS: usize = 16;
    let radii = egui::vec2(size * 0.5, size * aspect * 0.5);
    let rot = egui::emath::Rot2::from_angle(rotation_deg.to_radians());

    (0..SEGMENTS)
        .map(|i| {
            let a = i as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
            center + rot * egui::vec2(a.cos() * radii.x, a.sin() * radii.y)
        })
        .collect()
}

/// A dark frame fading from `color` at the window edge to transparent
/// `inset` pixels inside.
fn vignette_mesh(rect: egui::Rect, inset: f32, color: Color32) -> egui::Mesh {
    let inset = inset.min(rect.width() * 0.5).min(rect.height() * 0.5).max(0.0);
    let inner = rect.shrink(inset);

    let mut mesh = egui::Mesh::default();
    let outer = [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()];
    let inner = [inner.left_top(), inner.right_top(), inner.right_bottom(), inner.left_bottom()];
    for p in outer {
        mesh.colored_vertex(p, color);
    }
    for p in inner {
        mesh.colored_vertex(p, Color32::TRANSPARENT);
    }

    for i in 0..4u32 {
        let j = (i + 1) % 4;
        mesh.add_triangle(i, j, 4 + i);
        mesh.add_triangle(j, 4 + j, 4 + i);
    }
    mesh
}
