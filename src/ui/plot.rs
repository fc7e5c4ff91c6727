use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

use crate::color::generate_palette;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Line chart
// ---------------------------------------------------------------------------

/// Line through `values`, one point per label. Hovering shows the label.
pub fn line_chart(ui: &mut Ui, id: &str, labels: Vec<String>, values: &[f64], y_label: &str) {
    let points: PlotPoints = values
        .iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v])
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .y_axis_label(y_label)
        .allow_scroll(false)
        .label_formatter(move |_name, point| {
            let idx = point.x.round();
            let label = if idx >= 0.0 {
                labels.get(idx as usize).map(String::as_str).unwrap_or("")
            } else {
                ""
            };
            format!("{label}\n{:.2}", point.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(Color32::LIGHT_BLUE).width(2.0));
        });
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// One bar per `(label, value)`, coloured by `color_of`, with a legend under
/// the plot.
pub fn bar_chart(
    ui: &mut Ui,
    id: &str,
    bars: &[(String, f64)],
    y_label: &str,
    color_of: impl Fn(usize, &str) -> Color32,
) {
    let colored: Vec<(String, f64, Color32)> = bars
        .iter()
        .enumerate()
        .map(|(i, (label, value))| (label.clone(), *value, color_of(i, label.as_str())))
        .collect();

    let chart = BarChart::new(
        colored
            .iter()
            .enumerate()
            .map(|(i, (label, value, color))| {
                Bar::new(i as f64, *value).name(label).fill(*color).width(0.7)
            })
            .collect(),
    );

    Plot::new(id)
        .height(CHART_HEIGHT)
        .y_axis_label(y_label)
        .allow_scroll(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));

    legend(ui, colored.iter().map(|(label, _, color)| (label.as_str(), *color)));
}

/// Colour bars by position from an evenly spaced palette.
pub fn palette_colors(n: usize) -> impl Fn(usize, &str) -> Color32 {
    let colors = generate_palette(n);
    move |i: usize, _: &str| colors.get(i).copied().unwrap_or(Color32::GRAY)
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Share of each value in the total. Non-positive values get no slice.
pub fn slice_fractions(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    values
        .iter()
        .map(|&v| if total > 0.0 && v > 0.0 { v / total } else { 0.0 })
        .collect()
}

/// Pie with a percentage on each slice and a legend underneath.
pub fn pie_chart(ui: &mut Ui, slices: &[(String, f64)], color_of: impl Fn(usize, &str) -> Color32) {
    let values: Vec<f64> = slices.iter().map(|(_, v)| *v).collect();
    let fractions = slice_fractions(&values);
    let size = CHART_HEIGHT.min(ui.available_width());
    let (response, painter) = ui.allocate_painter(egui::vec2(size, size), Sense::hover());
    let center = response.rect.center();
    let radius = size * 0.45;

    let mut start = -FRAC_PI_2;
    for (i, ((label, _), fraction)) in slices.iter().zip(&fractions).enumerate() {
        if *fraction <= 0.0 {
            continue;
        }
        let sweep = *fraction as f32 * TAU;
        let color = color_of(i, label.as_str());

        // Split into pieces of at most a quarter turn so each stays convex.
        let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
        for p in 0..pieces {
            let a0 = start + sweep * p as f32 / pieces as f32;
            let a1 = start + sweep * (p + 1) as f32 / pieces as f32;
            let steps = 24;
            let mut points = vec![center];
            for s in 0..=steps {
                let a = a0 + (a1 - a0) * s as f32 / steps as f32;
                points.push(center + egui::vec2(a.cos(), a.sin()) * radius);
            }
            painter.add(Shape::convex_polygon(points, color, Stroke::new(1.0, Color32::WHITE)));
        }

        let mid = start + sweep / 2.0;
        painter.text(
            center + egui::vec2(mid.cos(), mid.sin()) * radius * 0.65,
            Align2::CENTER_CENTER,
            format!("{:.1}%", fraction * 100.0),
            FontId::proportional(12.0),
            Color32::BLACK,
        );
        start += sweep;
    }

    legend(
        ui,
        slices
            .iter()
            .enumerate()
            .map(|(i, (label, _))| (label.as_str(), color_of(i, label.as_str()))),
    );
}

fn legend<'a>(ui: &mut Ui, entries: impl Iterator<Item = (&'a str, Color32)>) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (label, color) in entries {
            ui.label(RichText::new("■").color(color));
            ui.label(label);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_sum_to_one() {
        let f = slice_fractions(&[1.0, 3.0]);
        assert_eq!(f, vec![0.25, 0.75]);
    }

    #[test]
    fn fractions_skip_non_positive() {
        assert_eq!(slice_fractions(&[0.0, -2.0, 5.0]), vec![0.0, 0.0, 1.0]);
        assert_eq!(slice_fractions(&[]), Vec::<f64>::new());
        assert_eq!(slice_fractions(&[0.0]), vec![0.0]);
    }
}
