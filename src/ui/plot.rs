use std::f32::consts::TAU;
use std::hash::Hash;
use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_extras::{Size, StripBuilder};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, MarkerShape, Plot, PlotPoints,
    Points,
};

use crate::chart::{
    BoxStats, ChartData, ChartRequest, ChartStyle, CountTable, Histogram, PieSlice, PieStyle,
};
use crate::color::{hex_color, series_color, shade};

/// Screen pixels per figure inch.
const PIXELS_PER_INCH: f32 = 80.0;
/// Font points to pixels.
const POINT_TO_PIXEL: f32 = 4.0 / 3.0;
/// Room above each chart for its caption and title.
const HEADER_SPACE: f32 = 56.0;
/// Share of a category slot covered by its bars.
const GROUP_WIDTH: f64 = 0.8;
/// Arc resolution of pie slices, radians.
const ARC_STEP: f32 = 0.035;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Draw charts side by side in equal-width columns, each with an optional
/// caption above its title.
pub fn chart_row(ui: &mut Ui, id_salt: &str, cells: &[(Option<&str>, &ChartRequest)]) {
    if cells.is_empty() {
        return;
    }
    let height = cells
        .iter()
        .map(|(_, c)| figure_size(&c.style).y)
        .fold(0.0, f32::max)
        + HEADER_SPACE;

    ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        StripBuilder::new(ui)
            .sizes(Size::remainder(), cells.len())
            .horizontal(|mut strip| {
                for (i, (caption, chart)) in cells.iter().enumerate() {
                    strip.cell(|ui: &mut Ui| {
                        if let Some(caption) = caption {
                            ui.label(RichText::new(*caption).heading());
                        }
                        chart_view(ui, (id_salt, i), chart);
                    });
                }
            });
    });
}

fn figure_size(style: &ChartStyle) -> Vec2 {
    egui::vec2(
        style.figure_size[0] * PIXELS_PER_INCH,
        style.figure_size[1] * PIXELS_PER_INCH,
    )
}

/// Draw one chart request: title, then the chart body.
pub fn chart_view(ui: &mut Ui, id_salt: impl Hash, chart: &ChartRequest) {
    let style = &chart.style;
    let size = figure_size(style).min(egui::vec2(ui.available_width(), f32::INFINITY));

    ui.label(RichText::new(&style.title).strong());
    match &chart.data {
        ChartData::Histogram(h) => histogram(ui, id_salt, h, style, size),
        ChartData::BoxPlot { groups } => box_plot(ui, id_salt, groups, style, size),
        ChartData::Pie { slices } => pie(ui, slices, style, size),
        ChartData::CountPlot(table) => count_plot(ui, id_salt, table, style, size),
    }
}

// ---------------------------------------------------------------------------
// egui_plot charts
// ---------------------------------------------------------------------------

fn base_plot<'a>(id_salt: impl Hash, style: &ChartStyle, size: Vec2) -> Plot<'a> {
    let mut plot = Plot::new(id_salt)
        .width(size.x)
        .height(size.y)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show_x(false);
    if let Some(x) = &style.x_label {
        plot = plot.x_axis_label(x.clone());
    }
    if let Some(y) = &style.y_label {
        plot = plot.y_axis_label(y.clone());
    }
    if style.legend_title.is_some() {
        plot = plot.legend(Legend::default());
    }
    plot
}

/// Label integer x positions with category names.
fn category_axis(plot: Plot<'_>, labels: Vec<String>) -> Plot<'_> {
    plot.x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let v = mark.value;
        if v < 0.0 || (v - v.round()).abs() > 1e-6 {
            return String::new();
        }
        labels.get(v.round() as usize).cloned().unwrap_or_default()
    })
}

fn edge_stroke(style: &ChartStyle, fallback: Color32) -> Stroke {
    let color = style
        .edge_color
        .as_deref()
        .map(hex_color)
        .unwrap_or(fallback);
    Stroke::new(1.0, color)
}

fn histogram(ui: &mut Ui, id_salt: impl Hash, h: &Histogram, style: &ChartStyle, size: Vec2) {
    let fill = series_color(&style.palette, 0);
    let stroke = edge_stroke(style, shade(fill, 0.6));

    let bars: Vec<Bar> = h
        .counts
        .iter()
        .zip(h.edges.windows(2))
        .map(|(&n, edge)| {
            Bar::new((edge[0] + edge[1]) / 2.0, n as f64)
                .width(edge[1] - edge[0])
                .fill(fill)
                .stroke(stroke)
        })
        .collect();

    base_plot(id_salt, style, size).show(ui, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars).color(fill));
    });
}

fn box_plot(ui: &mut Ui, id_salt: impl Hash, groups: &[BoxStats], style: &ChartStyle, size: Vec2) {
    let boxes: Vec<BoxElem> = groups
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let color = series_color(&style.palette, i);
            BoxElem::new(
                i as f64,
                BoxSpread::new(g.lower_whisker, g.q1, g.median, g.q3, g.upper_whisker),
            )
            .name(&g.group)
            .box_width(0.6)
            .whisker_width(0.3)
            .fill(color)
            .stroke(Stroke::new(1.2, shade(color, 0.45)))
        })
        .collect();

    let outliers: Vec<[f64; 2]> = groups
        .iter()
        .enumerate()
        .flat_map(|(i, g)| g.outliers.iter().map(move |&v| [i as f64, v]))
        .collect();

    let labels = groups.iter().map(|g| g.group.clone()).collect();
    category_axis(base_plot(id_salt, style, size), labels).show(ui, |plot_ui| {
        plot_ui.box_plot(BoxPlot::new(boxes));
        if !outliers.is_empty() {
            plot_ui.points(
                Points::new(PlotPoints::new(outliers))
                    .shape(MarkerShape::Diamond)
                    .radius(2.5)
                    .color(Color32::DARK_GRAY),
            );
        }
    });
}

fn count_plot(ui: &mut Ui, id_salt: impl Hash, table: &CountTable, style: &ChartStyle, size: Vec2) {
    let bar_width = GROUP_WIDTH / table.groups.len().max(1) as f64;

    let charts: Vec<BarChart> = table
        .groups
        .iter()
        .enumerate()
        .map(|(gi, group)| {
            let color = series_color(&style.palette, gi);
            let stroke = edge_stroke(style, shade(color, 0.6));
            let bars = table
                .counts
                .iter()
                .enumerate()
                .map(|(ci, row)| {
                    let x = ci as f64 - GROUP_WIDTH / 2.0 + bar_width * (gi as f64 + 0.5);
                    Bar::new(x, row[gi] as f64)
                        .width(bar_width)
                        .fill(color)
                        .stroke(stroke)
                })
                .collect();
            BarChart::new(bars).color(color).name(group)
        })
        .collect();

    if let Some(title) = &style.legend_title {
        ui.label(RichText::new(format!("Legend: {title}")).small().weak());
    }
    category_axis(base_plot(id_salt, style, size), table.categories.clone()).show(
        ui,
        |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        },
    );
}

// ---------------------------------------------------------------------------
// Pie chart (painted directly)
// ---------------------------------------------------------------------------

/// Unit vector at `angle` radians, counter-clockwise on screen.
fn direction(angle: f32) -> Vec2 {
    egui::vec2(angle.cos(), -angle.sin())
}

/// Wedge split into convex pieces of at most a quarter turn.
fn wedge(center: Pos2, radius: f32, from: f32, to: f32) -> Vec<Vec<Pos2>> {
    let mut pieces = Vec::new();
    let mut start = from;
    while to - start > 1e-4 {
        let end = (start + TAU / 4.0).min(to);
        let steps = ((end - start) / ARC_STEP).ceil().max(1.0) as usize;
        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for k in 0..=steps {
            let a = start + (end - start) * k as f32 / steps as f32;
            points.push(center + direction(a) * radius);
        }
        pieces.push(points);
        start = end;
    }
    pieces
}

fn pie(ui: &mut Ui, slices: &[PieSlice], style: &ChartStyle, size: Vec2) {
    let opts: PieStyle = style.pie.clone().unwrap_or_default();
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let explode = opts.explode as f32;
    // Leave room for the outside labels.
    let radius = rect.width().min(rect.height()) * 0.36 / (1.0 + explode);
    let font = FontId::proportional(opts.font_size * POINT_TO_PIXEL);
    let text_color = ui.visuals().text_color();

    let total: f64 = slices.iter().map(|s| s.value).sum();
    if total <= 0.0 {
        painter.text(
            center,
            Align2::CENTER_CENTER,
            "no data",
            font,
            ui.visuals().weak_text_color(),
        );
        return;
    }

    let mut angle = (opts.start_angle as f32).to_radians();
    let mut wedges = Vec::with_capacity(slices.len());
    for (i, slice) in slices.iter().enumerate() {
        let sweep = (slice.value / total) as f32 * TAU;
        let mid = angle + sweep / 2.0;
        let origin = center + direction(mid) * explode * radius;
        wedges.push((i, slice, origin, angle, angle + sweep, mid));
        angle += sweep;
    }

    if opts.shadow {
        let offset = egui::vec2(radius * 0.03, radius * 0.03);
        for &(_, _, origin, from, to, _) in &wedges {
            for piece in wedge(origin + offset, radius, from, to) {
                painter.add(Shape::convex_polygon(
                    piece,
                    Color32::from_black_alpha(60),
                    Stroke::NONE,
                ));
            }
        }
    }

    for &(i, _, origin, from, to, _) in &wedges {
        let fill = series_color(&style.palette, i);
        for piece in wedge(origin, radius, from, to) {
            painter.add(Shape::convex_polygon(piece, fill, Stroke::new(1.0, Color32::WHITE)));
        }
    }

    for &(_, slice, origin, _, _, mid) in &wedges {
        let dir = direction(mid);
        let anchor = if dir.x >= 0.0 {
            Align2::LEFT_CENTER
        } else {
            Align2::RIGHT_CENTER
        };
        painter.text(
            origin + dir * radius * 1.1,
            anchor,
            &slice.label,
            font.clone(),
            text_color,
        );
        painter.text(
            origin + dir * radius * 0.6,
            Align2::CENTER_CENTER,
            format!("{:.*}%", opts.pct_decimals, slice.percent),
            font.clone(),
            Color32::BLACK,
        );
    }
}
