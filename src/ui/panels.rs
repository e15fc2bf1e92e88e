use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{VocSplit, VocYear};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – dataset browser
// ---------------------------------------------------------------------------

/// Render the left browser panel: year/split selection, list options, and
/// the resolved image list.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Browse");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let mut list_changed = false;

    // ---- Year / split selectors ----
    egui::ComboBox::from_label("Year")
        .selected_text(match state.year {
            Some(year) => year.to_string(),
            None => "all".to_string(),
        })
        .show_ui(ui, |ui: &mut Ui| {
            list_changed |= ui.selectable_value(&mut state.year, None, "all").changed();
            for year in VocYear::ALL {
                list_changed |= ui
                    .selectable_value(&mut state.year, Some(year), year.to_string())
                    .changed();
            }
        });

    egui::ComboBox::from_label("Split")
        .selected_text(state.split.name())
        .show_ui(ui, |ui: &mut Ui| {
            for split in VocSplit::ALL {
                list_changed |= ui
                    .selectable_value(&mut state.split, split, split.name())
                    .changed();
            }
        });

    // ---- List limit ----
    ui.horizontal(|ui: &mut Ui| {
        let mut limited = state.settings.max_images.is_some();
        if ui.checkbox(&mut limited, "Limit").changed() {
            state.settings.max_images = limited.then_some(100);
            state.persist_settings();
            list_changed = true;
        }
        if let Some(max) = &mut state.settings.max_images {
            let response = ui.add(egui::DragValue::new(max).range(1..=10_000));
            if response.changed() {
                list_changed = true;
            }
            if response.drag_stopped() || response.lost_focus() {
                state.persist_settings();
            }
        }
    });

    // ---- Overlay opacity ----
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Overlay");
        let response = ui.add(egui::Slider::new(
            &mut state.settings.overlay_alpha,
            0.0..=1.0,
        ));
        if response.changed() {
            state.rerender_selected();
        }
        if response.drag_stopped() {
            state.persist_settings();
        }
    });

    if list_changed {
        state.refresh_image_list();
    }
    ui.separator();

    // ---- Image list ----
    // Stems plus an annotated flag, computed up front so the click handler
    // can borrow the state mutably.
    let entries: Vec<(String, bool)> = {
        let dataset = state.dataset.as_ref().expect("checked above");
        state
            .image_paths
            .iter()
            .map(|p| {
                let stem = p
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default()
                    .to_string();
                let annotated = dataset.annotation(&stem).is_some();
                (stem, annotated)
            })
            .collect()
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (index, (stem, annotated)) in entries.iter().enumerate() {
                let selected = state.selected == Some(index);
                let text = if *annotated {
                    RichText::new(stem)
                } else {
                    RichText::new(stem).weak()
                };
                if ui.selectable_label(selected, text).clicked() {
                    state.select_image(index);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open VOCdevkit…").clicked() {
                open_root_dialog(state);
                ui.close_menu();
            }
            let recent = state.settings.recent_roots.clone();
            if !recent.is_empty() {
                ui.menu_button("Open recent", |ui: &mut Ui| {
                    for root in recent {
                        if ui.button(root.display().to_string()).clicked() {
                            state.open_dataset(root);
                            ui.close_menu();
                        }
                    }
                });
            }
        });

        ui.separator();

        if let Some(dataset) = &state.dataset {
            ui.label(dataset.to_string())
                .on_hover_text(dataset.root().display().to_string());
            ui.separator();
            ui.label(format!(
                "{} {} images listed",
                state.image_paths.len(),
                state.split.name()
            ));
            ui.separator();
            ui.weak(dataset.competition_code(state.split));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_root_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open VOCdevkit root")
        .pick_folder();

    if let Some(root) = folder {
        state.open_dataset(root);
    }
}
