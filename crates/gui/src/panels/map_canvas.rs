//! Map canvas panel: raster, markers, bearing arrows, axes and navigation.

use std::f32::consts::FRAC_PI_2;

use egui::epaint::TextShape;
use egui::{
    Align2, Color32, CursorIcon, FontId, Painter, PointerButton, Pos2, Rect, Sense, Stroke,
    TextureHandle, Vec2,
};

use geotrack_colormap::{downsample_rgba, surface_to_rgba, MapStyle};
use geotrack_core::pick::{nearest_marker, PICK_TOLERANCE};
use geotrack_core::scene::{MAP_TITLE, X_LABEL, Y_LABEL};
use geotrack_core::view::{nice_ticks, ViewBounds};
use geotrack_core::{LayerState, MapScene, RasterSurface};

use crate::state::{AppState, Command, MapViewState, NavTool};

// Space around the plot area for title, tick labels and axis labels
const MARGIN_LEFT: f32 = 100.0;
const MARGIN_RIGHT: f32 = 20.0;
const MARGIN_TOP: f32 = 30.0;
const MARGIN_BOTTOM: f32 = 46.0;

const MARKER_RADIUS: f32 = 3.6;
const WHEEL_STEP: f64 = 1.2;
const TICK_LEN: f32 = 4.0;

fn marker_color() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 0, 0, 179)
}

const SELECTED_MARKER: Color32 = Color32::YELLOW;
const ARROW_COLOR: Color32 = Color32::BLUE;

/// Texture and drag bookkeeping that lives across frames.
#[derive(Default)]
pub struct MapCanvasState {
    texture: Option<TextureHandle>,
    /// Screen corners of an in-progress zoom rectangle.
    rect_drag: Option<(Pos2, Pos2)>,
    /// Cursor position in map units, for the status line.
    pub cursor_map: Option<(f64, f64)>,
    /// Pixel size of the plot area last frame, used for image export.
    pub plot_size: Option<[usize; 2]>,
}

impl MapCanvasState {
    /// Drop the raster texture (new scene or map style).
    pub fn invalidate_texture(&mut self) {
        self.texture = None;
    }
}

/// Linear mapping between the view window and the plot rectangle.
///
/// The raster is stretched to fill the plot, so x and y scales differ.
#[derive(Debug, Clone, Copy)]
pub struct PlotTransform {
    rect: Rect,
    view: ViewBounds,
}

impl PlotTransform {
    pub fn new(rect: Rect, view: ViewBounds) -> Self {
        Self { rect, view }
    }

    pub fn to_screen(&self, (x, y): (f64, f64)) -> Pos2 {
        let fx = (x - self.view.x_min) / self.view.width();
        let fy = (y - self.view.y_min) / self.view.height();
        Pos2::new(
            self.rect.left() + (fx * self.rect.width() as f64) as f32,
            self.rect.bottom() - (fy * self.rect.height() as f64) as f32,
        )
    }

    pub fn to_map(&self, pos: Pos2) -> (f64, f64) {
        let fx = ((pos.x - self.rect.left()) / self.rect.width()) as f64;
        let fy = ((self.rect.bottom() - pos.y) / self.rect.height()) as f64;
        (
            self.view.x_min + fx * self.view.width(),
            self.view.y_min + fy * self.view.height(),
        )
    }

    /// Map-space offset for a screen-space delta.
    pub fn delta_to_map(&self, delta: Vec2) -> (f64, f64) {
        (
            delta.x as f64 / self.rect.width() as f64 * self.view.width(),
            -delta.y as f64 / self.rect.height() as f64 * self.view.height(),
        )
    }

    /// Screen point at a fraction of the axes, origin bottom-left.
    fn axes_fraction(&self, fx: f32, fy: f32) -> Pos2 {
        Pos2::new(
            self.rect.left() + fx * self.rect.width(),
            self.rect.bottom() - fy * self.rect.height(),
        )
    }
}

/// Render the map into the given UI area. Returns the commands raised by
/// hover, click, wheel and drag input.
pub fn show_map_canvas(
    ui: &mut egui::Ui,
    state: &AppState,
    canvas: &mut MapCanvasState,
) -> Vec<Command> {
    let mut commands = Vec::new();

    let Some(scene) = state.scene.as_ref() else {
        ui.centered_and_justified(|ui| {
            ui.label("No data loaded. Use Historical Tracking to select files.");
        });
        return commands;
    };

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
    let outer = response.rect;
    let plot_rect = Rect::from_min_max(
        outer.min + Vec2::new(MARGIN_LEFT, MARGIN_TOP),
        outer.max - Vec2::new(MARGIN_RIGHT, MARGIN_BOTTOM),
    );
    if plot_rect.width() < 20.0 || plot_rect.height() < 20.0 {
        return commands;
    }
    let pixels = plot_rect.size() * ui.ctx().pixels_per_point();
    canvas.plot_size = Some([pixels.x.round() as usize, pixels.y.round() as usize]);

    let view = &state.view;
    let xf = PlotTransform::new(plot_rect, view.view);
    let text_color = ui.visuals().text_color();
    let plot_painter = painter.with_clip_rect(plot_rect);

    painter.rect_filled(plot_rect, 0.0, ui.visuals().extreme_bg_color);

    match &scene.raster {
        LayerState::Loaded(surface) => {
            ensure_texture(canvas, surface, state.map_style, ui.ctx());
            if let Some(texture) = canvas.texture.as_ref() {
                let extent = surface.extent();
                let image_rect = Rect::from_two_pos(
                    xf.to_screen((extent.min_x, extent.max_y)),
                    xf.to_screen((extent.max_x, extent.min_y)),
                );
                plot_painter.image(
                    texture.id(),
                    image_rect,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
        }
        LayerState::Failed(message) => {
            plot_painter.text(
                xf.axes_fraction(0.5, 0.5),
                Align2::CENTER_CENTER,
                message,
                FontId::proportional(13.0),
                text_color,
            );
        }
    }

    let markers: Vec<Pos2> = match &scene.points {
        LayerState::Loaded(layer) => {
            let markers: Vec<Pos2> = layer.plotted.iter().map(|&p| xf.to_screen(p)).collect();
            draw_markers(&plot_painter, &markers, view.selected);
            if let Some(indicators) = &layer.indicators {
                for quiver in indicators.iter().flatten() {
                    let origin = xf.to_screen(quiver.origin);
                    let tip = xf.to_screen(quiver.tip());
                    plot_painter.arrow(origin, tip - origin, Stroke::new(1.5, ARROW_COLOR));
                }
            }
            markers
        }
        LayerState::Failed(message) => {
            plot_painter.text(
                xf.axes_fraction(0.5, 0.3),
                Align2::CENTER_CENTER,
                message,
                FontId::proportional(13.0),
                text_color,
            );
            Vec::new()
        }
    };

    draw_axes(&painter, &xf, scene, text_color);

    let hover = response.hover_pos().filter(|p| plot_rect.contains(*p));
    canvas.cursor_map = hover.map(|p| xf.to_map(p));

    if state.is_interactive() {
        let hovered = hover.and_then(|p| {
            nearest_marker(
                markers.iter().map(|m| (m.x as f64, m.y as f64)),
                (p.x as f64, p.y as f64),
                PICK_TOLERANCE,
            )
        });
        if hovered != view.hovered {
            commands.push(Command::HoverMarker(hovered));
        }
        if response.clicked() {
            if let Some(index) = hovered {
                commands.push(Command::PickMarker(index));
            }
        }
        if hovered.is_some() && view.tool == NavTool::None {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }

        navigate(ui, &response, &xf, view, canvas, &mut commands);
    } else {
        canvas.rect_drag = None;
    }

    if let Some((a, b)) = canvas.rect_drag {
        let rect = Rect::from_two_pos(a, b);
        plot_painter.rect_filled(rect, 0.0, Color32::from_rgba_unmultiplied(42, 130, 218, 40));
        plot_painter.rect_stroke(rect, 0.0, Stroke::new(1.0, text_color));
    }

    if let (Some(index), Some(table)) = (view.hovered, scene.table.as_ref()) {
        if let Some(&anchor) = markers.get(index) {
            let lines = table.tooltip_lines(index);
            if !lines.is_empty() && marker_in_view(scene, index, &view.view) {
                draw_annotation(&painter, anchor, &lines.join("\n"), outer);
            }
        }
    }

    if let Some((x, y)) = canvas.cursor_map {
        painter.text(
            Pos2::new(outer.right() - 4.0, outer.bottom() - 2.0),
            Align2::RIGHT_BOTTOM,
            format!(
                "x={}  y={}",
                scene.axis_format.format(x),
                scene.axis_format.format(y)
            ),
            FontId::monospace(10.0),
            text_color.gamma_multiply(0.7),
        );
    }

    commands
}

/// Wheel zoom everywhere; drag behavior depends on the active tool.
fn navigate(
    ui: &egui::Ui,
    response: &egui::Response,
    xf: &PlotTransform,
    view: &MapViewState,
    canvas: &mut MapCanvasState,
    commands: &mut Vec<Command>,
) {
    let scroll = ui.input(|i| i.raw_scroll_delta.y);
    if scroll != 0.0 && response.hovered() {
        if let Some(anchor) = canvas.cursor_map {
            let factor = if scroll > 0.0 {
                1.0 / WHEEL_STEP
            } else {
                WHEEL_STEP
            };
            commands.push(Command::ZoomAt { factor, anchor });
        }
    }

    let pointer = ui.input(|i| i.pointer.latest_pos());
    match view.tool {
        NavTool::None => {}
        NavTool::Pan => {
            if response.hovered() {
                let icon = if response.dragged() {
                    CursorIcon::Grabbing
                } else {
                    CursorIcon::Grab
                };
                ui.ctx().set_cursor_icon(icon);
            }
            if response.dragged_by(PointerButton::Primary) {
                let (dx, dy) = xf.delta_to_map(response.drag_delta());
                commands.push(Command::PanBy { dx: -dx, dy: -dy });
            } else if response.dragged_by(PointerButton::Secondary) {
                // Right-drag: right/up zooms in around the press point
                let delta = response.drag_delta();
                let amount = (delta.x - delta.y) as f64;
                let origin = ui.input(|i| i.pointer.press_origin());
                if let Some(origin) = origin {
                    commands.push(Command::ZoomAt {
                        factor: (-amount * 0.01).exp(),
                        anchor: xf.to_map(origin),
                    });
                }
            }
        }
        NavTool::ZoomRect => {
            if response.hovered() {
                ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
            }
            let clamp = |p: Pos2| p.clamp(xf.rect.min, xf.rect.max);
            if response.drag_started_by(PointerButton::Primary) {
                if let Some(p) = pointer {
                    canvas.rect_drag = Some((clamp(p), clamp(p)));
                }
            }
            if let (Some((start, _)), Some(p)) = (canvas.rect_drag, pointer) {
                canvas.rect_drag = Some((start, clamp(p)));
            }
            if response.drag_stopped() {
                if let Some((a, b)) = canvas.rect_drag.take() {
                    commands.push(Command::ZoomToRect {
                        a: xf.to_map(a),
                        b: xf.to_map(b),
                    });
                }
            }
        }
    }
    if view.tool != NavTool::ZoomRect {
        canvas.rect_drag = None;
    }
}

/// Whether the plotted marker at `index` lies inside the view window.
fn marker_in_view(scene: &MapScene, index: usize, view: &ViewBounds) -> bool {
    scene
        .points
        .loaded()
        .and_then(|layer| layer.plotted.get(index))
        .is_some_and(|&(x, y)| view.contains(x, y))
}

fn ensure_texture(
    canvas: &mut MapCanvasState,
    surface: &RasterSurface,
    style: MapStyle,
    ctx: &egui::Context,
) {
    if canvas.texture.is_some() {
        return;
    }
    let mut rgba = surface_to_rgba(surface, style);
    if rgba.width == 0 || rgba.height == 0 {
        return;
    }
    let max_side = ctx.input(|i| i.max_texture_side);
    if rgba.width > max_side || rgba.height > max_side {
        tracing::info!(
            width = rgba.width,
            height = rgba.height,
            max_side,
            "Downsampling raster to fit the texture limit"
        );
        rgba = downsample_rgba(&rgba, max_side);
    }
    let image = egui::ColorImage::from_rgba_unmultiplied([rgba.width, rgba.height], &rgba.pixels);
    canvas.texture = Some(ctx.load_texture("map_raster", image, egui::TextureOptions::NEAREST));
}

fn draw_markers(painter: &Painter, markers: &[Pos2], selected: Option<usize>) {
    for (i, &pos) in markers.iter().enumerate() {
        if Some(i) != selected {
            painter.circle_filled(pos, MARKER_RADIUS, marker_color());
        }
    }
    // Selected marker on top
    if let Some(&pos) = selected.and_then(|i| markers.get(i)) {
        painter.circle_filled(pos, MARKER_RADIUS + 0.5, SELECTED_MARKER);
        painter.circle_stroke(pos, MARKER_RADIUS + 0.5, Stroke::new(0.5, Color32::BLACK));
    }
}

/// Frame, ticks, tick labels, title and axis labels.
fn draw_axes(painter: &Painter, xf: &PlotTransform, scene: &MapScene, color: Color32) {
    let rect = xf.rect;
    let view = xf.view;
    let stroke = Stroke::new(1.0, color);
    let tick_font = FontId::proportional(11.0);

    painter.rect_stroke(rect, 0.0, stroke);

    let x_target = ((rect.width() / 110.0) as usize).max(2);
    for x in nice_ticks(view.x_min, view.x_max, x_target) {
        let sx = xf.to_screen((x, view.y_min)).x;
        painter.line_segment(
            [
                Pos2::new(sx, rect.bottom()),
                Pos2::new(sx, rect.bottom() + TICK_LEN),
            ],
            stroke,
        );
        painter.text(
            Pos2::new(sx, rect.bottom() + TICK_LEN + 2.0),
            Align2::CENTER_TOP,
            scene.axis_format.format(x),
            tick_font.clone(),
            color,
        );
    }

    let y_target = ((rect.height() / 70.0) as usize).max(2);
    for y in nice_ticks(view.y_min, view.y_max, y_target) {
        let sy = xf.to_screen((view.x_min, y)).y;
        painter.line_segment(
            [
                Pos2::new(rect.left() - TICK_LEN, sy),
                Pos2::new(rect.left(), sy),
            ],
            stroke,
        );
        painter.text(
            Pos2::new(rect.left() - TICK_LEN - 2.0, sy),
            Align2::RIGHT_CENTER,
            scene.axis_format.format(y),
            tick_font.clone(),
            color,
        );
    }

    painter.text(
        Pos2::new(rect.center().x, rect.top() - 8.0),
        Align2::CENTER_BOTTOM,
        MAP_TITLE,
        FontId::proportional(15.0),
        color,
    );
    painter.text(
        Pos2::new(rect.center().x, rect.bottom() + 22.0),
        Align2::CENTER_TOP,
        X_LABEL,
        FontId::proportional(12.0),
        color,
    );

    let galley = painter.layout_no_wrap(Y_LABEL.to_string(), FontId::proportional(12.0), color);
    let pos = Pos2::new(
        rect.left() - MARGIN_LEFT + 4.0,
        rect.center().y + galley.size().x / 2.0,
    );
    painter.add(TextShape::new(pos, galley, color).with_angle(-FRAC_PI_2));
}

/// Yellow call-out box offset up and to the right of the marker.
fn draw_annotation(painter: &Painter, anchor: Pos2, text: &str, bounds: Rect) {
    let padding = Vec2::splat(6.0);
    let galley = painter.layout_no_wrap(text.to_string(), FontId::proportional(12.0), Color32::BLACK);
    let size = galley.size() + padding * 2.0;

    let mut min = Pos2::new(anchor.x + 20.0, anchor.y - 20.0 - size.y);
    if min.x + size.x > bounds.right() {
        min.x = anchor.x - 20.0 - size.x;
    }
    if min.y < bounds.top() {
        min.y = anchor.y + 20.0;
    }
    let rect = Rect::from_min_size(min, size);
    let nearest_corner = rect.clamp(anchor);

    painter.line_segment([anchor, nearest_corner], Stroke::new(1.0, Color32::BLACK));
    painter.rect_filled(rect, 6.0, Color32::from_rgba_unmultiplied(255, 255, 0, 204));
    painter.rect_stroke(rect, 6.0, Stroke::new(1.0, Color32::BLACK));
    painter.galley(rect.min + padding, galley, Color32::BLACK);
}
