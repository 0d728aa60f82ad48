use std::ops::RangeInclusive;

use chrono::DateTime;
use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{
    AxisHints, BoxElem, BoxPlot, BoxSpread, GridMark, HPlacement, Legend, Line, LineStyle, Plot,
    PlotPoint, Points,
};

use crate::color::ColorMap;
use crate::data::filter::{group_by_test, samples_for};
use crate::data::model::{Sample, UnifiedDataset};
use crate::data::stats::BoxStats;
use crate::state::Resource;

const PLOT_HEIGHT: f32 = 380.0;

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

fn clock_label(seconds: f64) -> String {
    DateTime::from_timestamp(seconds.floor() as i64, 0)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

fn time_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    clock_label(mark.value)
}

fn hover_label(name: &str, point: &PlotPoint) -> String {
    format!("{name}\n{}\n{:.1}%", clock_label(point.x), point.y)
}

fn time_plot(id: &str, y_label: &str) -> Plot<'static> {
    Plot::new(id)
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Time")
        .y_axis_label(y_label.to_string())
        .x_axis_formatter(time_axis)
        .label_formatter(hover_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
}

fn cpu_of(s: &Sample) -> f64 {
    s.cpu_percent
}

fn ram_of(s: &Sample) -> f64 {
    s.ram_percent
}

/// Linear map from the right-axis (RAM) range onto the left-axis (CPU)
/// range, so both resources fill the plot while each axis keeps its own scale.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SecondaryScale {
    primary: (f64, f64),
    secondary: (f64, f64),
}

fn span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        (0.0, 100.0)
    } else if hi - lo < 1e-9 {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

impl SecondaryScale {
    fn fit(primary: impl Iterator<Item = f64>, secondary: impl Iterator<Item = f64>) -> Self {
        Self {
            primary: span(primary),
            secondary: span(secondary),
        }
    }

    /// Secondary value → plot coordinate.
    fn forward(&self, v: f64) -> f64 {
        let (p0, p1) = self.primary;
        let (s0, s1) = self.secondary;
        p0 + (v - s0) / (s1 - s0) * (p1 - p0)
    }

    /// Plot coordinate → secondary value, for the right axis labels.
    fn inverse(&self, y: f64) -> f64 {
        let (p0, p1) = self.primary;
        let (s0, s1) = self.secondary;
        s0 + (y - p0) / (p1 - p0) * (s1 - s0)
    }
}

fn series<'a>(
    samples: impl IntoIterator<Item = &'a Sample>,
    value: impl Fn(&Sample) -> f64,
) -> Vec<[f64; 2]> {
    samples
        .into_iter()
        .map(|s| [s.epoch_seconds(), value(s)])
        .collect()
}

// ---------------------------------------------------------------------------
// Time series, one line per test run
// ---------------------------------------------------------------------------

/// CPU or RAM usage over time, split by test run.
pub fn usage_over_time(
    ui: &mut Ui,
    dataset: &UnifiedDataset,
    colors: &ColorMap,
    resource: Resource,
) {
    let (title, y_label, value): (&str, &str, fn(&Sample) -> f64) = match resource {
        Resource::Ram => ("RAM usage over time", "RAM (%)", ram_of),
        _ => ("CPU usage over time", "CPU (%)", cpu_of),
    };
    ui.strong(title);

    let groups = group_by_test(dataset);
    time_plot("usage_over_time", y_label).show(ui, |plot_ui| {
        for (test_id, samples) in &groups {
            let line = Line::new(series(samples.iter().copied(), value))
                .name(*test_id)
                .color(colors.color_for(test_id))
                .width(1.5);
            plot_ui.line(line);
        }
    });
}

/// CPU on the left axis and RAM on the right, two series per test run.
/// RAM is rescaled onto the CPU range; the right axis labels the RAM values.
pub fn usage_overlay(ui: &mut Ui, dataset: &UnifiedDataset, colors: &ColorMap) {
    ui.strong("CPU and RAM usage over time");

    let scale = SecondaryScale::fit(
        dataset.samples.iter().map(cpu_of),
        dataset.samples.iter().map(ram_of),
    );
    let groups = group_by_test(dataset);
    time_plot("usage_overlay", "CPU (%)")
        .label_formatter(move |name, point| {
            let y = if name.ends_with(" - RAM") {
                scale.inverse(point.y)
            } else {
                point.y
            };
            format!("{name}\n{}\n{y:.1}%", clock_label(point.x))
        })
        .custom_y_axes(vec![
            AxisHints::new_y().label("CPU (%)"),
            AxisHints::new_y()
                .label("RAM (%)")
                .placement(HPlacement::Right)
                .formatter(move |mark, _range| format!("{:.1}", scale.inverse(mark.value))),
        ])
        .show(ui, |plot_ui| {
            for (test_id, samples) in &groups {
                let cpu = Line::new(series(samples.iter().copied(), cpu_of))
                    .name(format!("{test_id} - CPU"))
                    .color(colors.color_for(test_id))
                    .width(1.5);
                let ram = Line::new(series(samples.iter().copied(), |s| {
                    scale.forward(s.ram_percent)
                }))
                .name(format!("{test_id} - RAM"))
                .color(colors.ram_color_for(test_id))
                .style(LineStyle::dashed_loose())
                .width(1.5);
                plot_ui.line(cpu);
                plot_ui.line(ram);
            }
        });
}

// ---------------------------------------------------------------------------
// Direct comparison: grouped box plot
// ---------------------------------------------------------------------------

fn box_elem(x: f64, stats: &BoxStats, name: String, color: Color32) -> BoxElem {
    BoxElem::new(
        x,
        BoxSpread::new(
            stats.lower_whisker,
            stats.q1,
            stats.median,
            stats.q3,
            stats.upper_whisker,
        ),
    )
    .name(name)
    .box_width(0.35)
    .whisker_width(0.2)
    .fill(color.gamma_multiply(0.35))
    .stroke(Stroke::new(1.5, color))
}

/// Distribution of CPU and RAM usage per test run.
pub fn comparison_box_plot(ui: &mut Ui, dataset: &UnifiedDataset, colors: &ColorMap) {
    ui.strong("Resource usage distribution per test");

    let groups = group_by_test(dataset);
    let mut cpu_boxes = Vec::new();
    let mut ram_boxes = Vec::new();
    let mut outliers: Vec<[f64; 2]> = Vec::new();

    for (i, (test_id, samples)) in groups.iter().enumerate() {
        let cpu: Vec<f64> = samples.iter().map(|s| s.cpu_percent).collect();
        let ram: Vec<f64> = samples.iter().map(|s| s.ram_percent).collect();
        let x = i as f64;

        if let Some(stats) = BoxStats::from_values(&cpu) {
            outliers.extend(stats.outliers.iter().map(|&v| [x - 0.2, v]));
            let color = colors.color_for(test_id);
            cpu_boxes.push(box_elem(x - 0.2, &stats, format!("{test_id} - CPU"), color));
        }
        if let Some(stats) = BoxStats::from_values(&ram) {
            outliers.extend(stats.outliers.iter().map(|&v| [x + 0.2, v]));
            let color = colors.ram_color_for(test_id);
            ram_boxes.push(box_elem(x + 0.2, &stats, format!("{test_id} - RAM"), color));
        }
    }

    let names: Vec<String> = groups.iter().map(|(id, _)| id.to_string()).collect();
    Plot::new("comparison_box_plot")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Test")
        .y_axis_label("Usage (%)")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(cpu_boxes).name("CPU"));
            plot_ui.box_plot(BoxPlot::new(ram_boxes).name("RAM"));
            if !outliers.is_empty() {
                plot_ui.points(
                    Points::new(outliers)
                        .name("Outliers")
                        .color(Color32::GRAY)
                        .radius(2.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// CPU-RAM relation: scatter coloured by test run
// ---------------------------------------------------------------------------

pub fn cpu_ram_scatter(ui: &mut Ui, dataset: &UnifiedDataset, colors: &ColorMap) {
    ui.strong("Relation between CPU and RAM usage");

    let groups = group_by_test(dataset);
    Plot::new("cpu_ram_scatter")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("CPU usage (%)")
        .y_axis_label("RAM usage (%)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (test_id, samples) in &groups {
                let points: Vec<[f64; 2]> = samples
                    .iter()
                    .map(|s| [s.cpu_percent, s.ram_percent])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(*test_id)
                        .color(colors.color_for(test_id))
                        .radius(3.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Per-test detail
// ---------------------------------------------------------------------------

/// CPU and RAM of a single run. An unknown id draws empty axes.
pub fn test_detail(ui: &mut Ui, dataset: &UnifiedDataset, test_id: &str, colors: &ColorMap) {
    ui.strong(format!("Resource usage - {test_id}"));

    let samples: Vec<&Sample> = samples_for(dataset, test_id).collect();
    time_plot("test_detail", "Usage (%)").show(ui, |plot_ui| {
        plot_ui.line(
            Line::new(series(samples.iter().copied(), cpu_of))
                .name("cpu_percent")
                .color(colors.color_for(test_id))
                .width(1.5),
        );
        plot_ui.line(
            Line::new(series(samples.iter().copied(), ram_of))
                .name("ram_percent")
                .color(colors.ram_color_for(test_id))
                .width(1.5),
        );
    });
}
