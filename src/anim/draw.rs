use std::f32::consts::{FRAC_PI_4, TAU};

use eframe::egui::epaint::{PathShape, QuadraticBezierShape};
use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Stroke, Vec2, pos2, vec2};

use super::balloon::{Balloon, HIT_RADIUS_FACTOR};
use super::text_layout;

const STRING_COLOR: Color32 = Color32::from_rgb(201, 167, 75);
const STRING_WIDTH: f32 = 1.8;
const BODY_EDGE: Color32 = Color32::from_rgb(240, 240, 240);
const TEXT_COLOR: Color32 = Color32::from_rgb(10, 30, 64);
const ELLIPSE_SEGMENTS: usize = 48;

/// Paints one balloon. Order matters for occlusion: string, knot, body,
/// neck, label text, hover ring.
pub fn draw_balloon(painter: &Painter, origin: Pos2, balloon: &Balloon) {
    let anchor = to_screen(origin, balloon.anchor());
    let knot = to_screen(origin, balloon.knot());
    let center = to_screen(origin, balloon.center());
    let radius = balloon.radius();
    let knot_size = balloon.knot_size();
    let tilt = balloon.tilt();

    draw_string(painter, anchor, knot);
    draw_knot(painter, knot, knot_size);
    draw_body(painter, center, radius, tilt);
    draw_neck(painter, center, knot, radius, knot_size);
    draw_label(painter, balloon, center, radius, tilt);

    if balloon.hovered() {
        painter.circle_stroke(
            center,
            radius * HIT_RADIUS_FACTOR,
            Stroke::new(2.0, Color32::from_rgba_unmultiplied(201, 167, 75, 200)),
        );
    }
}

fn to_screen(origin: Pos2, local: Pos2) -> Pos2 {
    origin + local.to_vec2()
}

/// A sagging curve from the baseline anchor up to the knot.
fn draw_string(painter: &Painter, anchor: Pos2, knot: Pos2) {
    let control = pos2(
        anchor.x + (knot.x - anchor.x) * 0.5,
        anchor.y - (anchor.y - knot.y) * 0.2,
    );

    painter.add(QuadraticBezierShape::from_points_stroke(
        [anchor, control, knot],
        false,
        Color32::TRANSPARENT,
        Stroke::new(STRING_WIDTH, STRING_COLOR),
    ));
}

fn draw_knot(painter: &Painter, knot: Pos2, knot_size: f32) {
    painter.circle_filled(knot, knot_size, BODY_EDGE);
    painter.circle_stroke(
        knot,
        knot_size,
        Stroke::new(0.8, Color32::from_rgba_unmultiplied(0, 0, 0, 38)),
    );
    // Inner shade and a small highlight give the knot its depth.
    painter.circle_filled(
        knot,
        knot_size * 0.7,
        Color32::from_rgba_unmultiplied(0, 0, 0, 13),
    );
    painter.circle_filled(
        knot + vec2(-knot_size * 0.3, -knot_size * 0.3),
        knot_size * 0.3,
        Color32::from_rgba_unmultiplied(255, 255, 255, 128),
    );
}

fn draw_body(painter: &Painter, center: Pos2, radius: f32, tilt: f32) {
    // Soft drop shadow under the body.
    painter.add(PathShape::convex_polygon(
        ellipse_points(center + vec2(3.0, 6.0), radius, radius * 1.05, tilt),
        Color32::from_rgba_unmultiplied(0, 0, 0, 28),
        Stroke::NONE,
    ));

    // Concentric offset layers stand in for the canvas radial gradient:
    // edge tone outside, bright highlight tone toward the upper left.
    painter.add(PathShape::convex_polygon(
        ellipse_points(center, radius, radius * 1.05, tilt),
        BODY_EDGE,
        Stroke::new(0.5, Color32::from_rgba_unmultiplied(0, 0, 0, 13)),
    ));

    let layers = [
        (0.78, vec2(-0.12, -0.12), Color32::from_rgb(245, 245, 245)),
        (0.50, vec2(-0.18, -0.18), Color32::from_rgb(253, 253, 253)),
        (0.26, vec2(-0.20, -0.20), Color32::WHITE),
    ];
    for (scale, offset, color) in layers {
        let layer_center = local_point(center, offset * radius, tilt);
        painter.add(PathShape::convex_polygon(
            ellipse_points(layer_center, radius * scale, radius * scale * 1.05, tilt),
            color,
            Stroke::NONE,
        ));
    }

    // Highlight spots.
    let main = local_point(center, vec2(-0.3, -0.4) * radius, tilt);
    painter.add(PathShape::convex_polygon(
        ellipse_points(main, radius * 0.4, radius * 0.3, tilt - FRAC_PI_4),
        Color32::from_rgba_unmultiplied(255, 255, 255, 178),
        Stroke::NONE,
    ));

    painter.circle_filled(
        local_point(center, vec2(-0.1, -0.1) * radius, tilt),
        radius * 0.15,
        Color32::from_rgba_unmultiplied(255, 255, 255, 128),
    );

    let edge = local_point(center, vec2(0.4, 0.3) * radius, tilt);
    painter.add(PathShape::convex_polygon(
        ellipse_points(edge, radius * 0.1, radius * 0.08, tilt + FRAC_PI_4),
        Color32::from_rgba_unmultiplied(255, 255, 255, 77),
        Stroke::NONE,
    ));
}

/// Pinched neck between the body and the knot, oriented along the
/// center-to-knot direction.
fn draw_neck(painter: &Painter, center: Pos2, knot: Pos2, radius: f32, knot_size: f32) {
    let toward_knot = knot - center;
    let length = toward_knot.length();
    if length <= f32::EPSILON {
        return;
    }
    let direction = toward_knot / length;
    let perpendicular = vec2(-direction.y, direction.x);

    let base = center + direction * (radius * 0.92);
    let points = vec![
        base + perpendicular * (knot_size * 1.5),
        knot + perpendicular * (knot_size * 0.5),
        knot - perpendicular * (knot_size * 0.5),
        base - perpendicular * (knot_size * 1.5),
    ];

    painter.add(PathShape::convex_polygon(
        points,
        BODY_EDGE,
        Stroke::new(0.5, Color32::from_rgba_unmultiplied(0, 0, 0, 13)),
    ));
}

fn draw_label(painter: &Painter, balloon: &Balloon, center: Pos2, radius: f32, tilt: f32) {
    let opacity = balloon.text_opacity();
    if opacity <= 0.01 {
        return;
    }

    let lines = balloon.display_lines();
    let font = text_layout::font_size(lines, radius);
    let line_height = font * 1.2;
    let start_y = -(line_height * lines.len() as f32) / 2.0 + line_height / 2.0;
    let color = TEXT_COLOR.gamma_multiply(opacity);

    for (index, line) in lines.iter().enumerate() {
        let offset = vec2(0.0, start_y + index as f32 * line_height);
        painter.text(
            local_point(center, offset, tilt),
            Align2::CENTER_CENTER,
            line,
            FontId::proportional(font),
            color,
        );
    }
}

/// A local offset rotated by the balloon tilt, in screen space.
fn local_point(center: Pos2, offset: Vec2, tilt: f32) -> Pos2 {
    let (sin, cos) = tilt.sin_cos();
    pos2(
        center.x + offset.x * cos - offset.y * sin,
        center.y + offset.x * sin + offset.y * cos,
    )
}

/// Sampled rotated-ellipse outline; epaint has no rotated primitive.
fn ellipse_points(center: Pos2, rx: f32, ry: f32, rotation: f32) -> Vec<Pos2> {
    let (sin, cos) = rotation.sin_cos();
    (0..ELLIPSE_SEGMENTS)
        .map(|segment| {
            let angle = segment as f32 / ELLIPSE_SEGMENTS as f32 * TAU;
            let x = angle.cos() * rx;
            let y = angle.sin() * ry;
            pos2(center.x + x * cos - y * sin, center.y + x * sin + y * cos)
        })
        .collect()
}
