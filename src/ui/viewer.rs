use eframe::egui::{self, ColorImage, Context, RichText, ScrollArea, TextureOptions, Ui};
use image::RgbaImage;

use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Annotation viewer (central panel)
// ---------------------------------------------------------------------------

/// Render the annotation views of the selected image in the central panel.
pub fn annotation_viewer(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a VOCdevkit root to browse annotations  (File → Open…)");
        });
        return;
    }

    if state.views_dirty {
        rebuild_textures(ui.ctx(), state);
        state.views_dirty = false;
    }

    if state.views.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select an image on the left");
        });
        return;
    }

    legend(ui, state);
    ui.separator();

    ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for (label, texture) in &state.textures {
                    ui.vertical(|ui: &mut Ui| {
                        ui.strong(label);
                        ui.add(egui::Image::new(texture).max_width(420.0));
                    });
                    ui.add_space(8.0);
                }
            });
        });
}

/// Category legend for the classes present in the selected annotation.
fn legend(ui: &mut Ui, state: &AppState) {
    let (Some(views), Some(dataset)) = (&state.views, &state.dataset) else {
        return;
    };
    let categories = dataset.categories();
    let display = color::generate_palette(categories.len());
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.strong(&views.name);
        ui.separator();
        if views.categories.is_empty() {
            ui.label("no categories");
        }
        for &index in &views.categories {
            ui.label(RichText::new(categories[index]).color(display[index]).strong());
        }
    });
}

/// Upload the rendered views as textures, photo first, masks and overlays
/// after.
fn rebuild_textures(ctx: &Context, state: &mut AppState) {
    state.textures.clear();
    let Some(views) = &state.views else {
        return;
    };

    let labeled: [(&str, &RgbaImage); 5] = [
        ("image", &views.photo),
        ("class annotation", &views.class_mask),
        ("object annotation", &views.object_mask),
        ("overlayed shape annotation", &views.overlay),
        ("shape annotation", &views.shapes),
    ];
    for (label, img) in labeled {
        let size = [img.width() as usize, img.height() as usize];
        let pixels = ColorImage::from_rgba_unmultiplied(size, img.as_raw());
        let name = format!("{} {label}", views.name);
        let handle = ctx.load_texture(name, pixels, TextureOptions::LINEAR);
        state.textures.push((label.to_string(), handle));
    }
}
