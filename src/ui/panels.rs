use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Mode};

// ---------------------------------------------------------------------------
// Left side panel – mode selector and data source
// ---------------------------------------------------------------------------

/// Render the left sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Settings");
    ui.separator();

    ui.strong("Choose a view:");
    for mode in Mode::ALL {
        ui.radio_value(&mut state.mode, mode, mode.label());
    }
    ui.separator();

    ui.strong("Data");
    ui.label(RichText::new(state.source.dir.display().to_string()).small());
    ui.horizontal(|ui: &mut Ui| {
        if ui
            .button("Reload")
            .on_hover_text("Re-read the capture files if they changed")
            .clicked()
        {
            // Errors are kept in `status_message` for display.
            let _ = state.reload(false);
        }
        if ui.small_button("Force").on_hover_text("Re-read every file").clicked() {
            let _ = state.reload(true);
        }
        if ui.button("Open folder…").clicked() {
            open_folder_dialog(state);
        }
    });

    if let Some(ds) = &state.dataset {
        ui.add_space(4.0);
        ui.label(format!("{} test runs", ds.test_ids.len()));
        for test_id in &ds.test_ids {
            ui.label(RichText::new(test_id).color(state.color_map.color_for(test_id)));
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with the load status.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Browser resource dashboard");
        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} samples from {} test runs",
                ds.len(),
                ds.test_ids.len()
            ));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open capture directory")
        .set_directory(&state.source.dir)
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("Switching data directory to {}", dir.display());
        // A failure leaves the message in `status_message`.
        let _ = state.set_data_dir(dir);
    }
}
