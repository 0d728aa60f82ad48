use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::stats::{format_percent, ResourceSummary};
use crate::state::{AppState, Resource, Visualization};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Analytics view (Testing mode)
// ---------------------------------------------------------------------------

/// Headline number with a caption, in the style of a metric card.
fn metric(ui: &mut Ui, caption: &str, value: Option<f64>) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(caption).small());
            ui.label(RichText::new(format_percent(value)).size(24.0).strong());
        });
    });
}

pub fn testing_page(ui: &mut Ui, state: &mut AppState) {
    // Clone the handle so selections on `state` can change while drawing.
    let Some(dataset) = state.dataset.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No capture data loaded  (Reload or Open folder… in the sidebar)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Performance charts");

            // ---- Summary metrics ----
            ui.strong("Summary");
            let overall = state
                .summary
                .as_ref()
                .map(|s| s.overall)
                .unwrap_or_default();
            ui.columns(3, |cols| {
                metric(&mut cols[0], "Max CPU", overall.max_cpu);
                metric(&mut cols[1], "Mean CPU", overall.mean_cpu);
                metric(&mut cols[2], "Max RAM", overall.max_ram);
            });
            ui.add_space(8.0);

            // ---- Visualization selector ----
            egui::ComboBox::from_label("Visualization")
                .selected_text(state.visualization.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for vis in Visualization::ALL {
                        ui.selectable_value(&mut state.visualization, vis, vis.label());
                    }
                });

            match state.visualization {
                Visualization::TimeSeries => {
                    ui.horizontal(|ui: &mut Ui| {
                        ui.label("Resource:");
                        for res in Resource::ALL {
                            ui.radio_value(&mut state.resource, res, res.label());
                        }
                    });
                    if state.resource == Resource::Both {
                        plot::usage_overlay(ui, &dataset, &state.color_map);
                    } else {
                        plot::usage_over_time(ui, &dataset, &state.color_map, state.resource);
                    }
                }
                Visualization::DirectComparison => {
                    plot::comparison_box_plot(ui, &dataset, &state.color_map);
                }
                Visualization::CpuRamRelation => {
                    plot::cpu_ram_scatter(ui, &dataset, &state.color_map);
                }
            }

            ui.add_space(12.0);
            ui.separator();

            // ---- Per-test detail ----
            ui.heading("Per-test detail");
            let current = state.selected_test.clone().unwrap_or_default();
            egui::ComboBox::from_label("Test run")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for test_id in &dataset.test_ids {
                        if ui.selectable_label(current == *test_id, test_id).clicked() {
                            state.selected_test = Some(test_id.clone());
                        }
                    }
                });

            let Some(test_id) = state.selected_test.clone() else {
                return;
            };
            let detail: ResourceSummary = state.selected_summary();
            ui.columns(2, |cols| {
                metric(&mut cols[0], &format!("Max CPU ({test_id})"), detail.max_cpu);
                metric(&mut cols[1], &format!("Max RAM ({test_id})"), detail.max_ram);
            });
            plot::test_detail(ui, &dataset, &test_id, &state.color_map);
        });
}
