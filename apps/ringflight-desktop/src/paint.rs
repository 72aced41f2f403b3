use egui::{Color32, Mesh, Pos2, Rect, Shape, Stroke, pos2};
use glam::Vec2;
use ringflight_render::{DrawCommand, DrawList, Rgb};

const CROSSHAIR_WIDTH: f32 = 1.5;
/// Fraction of the crosshair arm left empty around the center.
const CROSSHAIR_GAP: f32 = 0.35;

fn to_pos(v: Vec2) -> Pos2 {
    pos2(v.x, v.y)
}

pub fn color(rgb: Rgb, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(rgb.r, rgb.g, rgb.b, a)
}

/// Vertical two-stop gradient over `rect`.
pub fn gradient(rect: Rect, top: Color32, bottom: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(1, 3, 2);
    mesh
}

/// Translate a draw list into egui shapes, preserving order.
pub fn shapes(list: &DrawList) -> Vec<Shape> {
    let mut out = Vec::with_capacity(list.len() + 4);
    for command in list {
        match *command {
            DrawCommand::Background {
                size,
                horizon,
                sky_top,
                sky_horizon,
                ground_horizon,
                ground_bottom,
            } => {
                if horizon > 0.0 {
                    let sky = Rect::from_min_max(pos2(0.0, 0.0), pos2(size.x, horizon));
                    out.push(Shape::mesh(gradient(
                        sky,
                        color(sky_top, 1.0),
                        color(sky_horizon, 1.0),
                    )));
                }
                if horizon < size.y {
                    let ground = Rect::from_min_max(pos2(0.0, horizon), pos2(size.x, size.y));
                    out.push(Shape::mesh(gradient(
                        ground,
                        color(ground_horizon, 1.0),
                        color(ground_bottom, 1.0),
                    )));
                }
            }
            DrawCommand::Line {
                from,
                to,
                color: rgb,
                alpha,
                width,
            } => {
                out.push(Shape::line_segment(
                    [to_pos(from), to_pos(to)],
                    Stroke::new(width, color(rgb, alpha)),
                ));
            }
            DrawCommand::Ring {
                center,
                radius,
                color: rgb,
                alpha,
                width,
            } => {
                out.push(Shape::circle_stroke(
                    to_pos(center),
                    radius,
                    Stroke::new(width, color(rgb, alpha)),
                ));
            }
            DrawCommand::Crosshair {
                center,
                size,
                color: rgb,
            } => {
                let stroke = Stroke::new(CROSSHAIR_WIDTH, color(rgb, 0.9));
                let gap = size * CROSSHAIR_GAP;
                for dir in [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y] {
                    out.push(Shape::line_segment(
                        [to_pos(center + dir * gap), to_pos(center + dir * size)],
                        stroke,
                    ));
                }
            }
        }
    }
    out
}

/// Paint a frame's draw list onto `painter`.
pub fn paint(painter: &egui::Painter, list: &DrawList) {
    painter.extend(shapes(list));
}
