use std::path::PathBuf;

use eframe::egui::TextureHandle;

use crate::data::model::{VocDataset, VocImageType, VocSplit, VocYear};
use crate::data::overlay::{render_views, AnnotationViews};
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state. Everything except the uploaded textures is
/// independent of rendering.
pub struct AppState {
    /// Open dataset (None until the user picks a VOCdevkit root).
    pub dataset: Option<VocDataset>,

    /// Year restriction for the image list; None lists all years.
    pub year: Option<VocYear>,

    /// Split whose images are listed.
    pub split: VocSplit,

    /// Resolved image paths for the current year/split (cached).
    pub image_paths: Vec<PathBuf>,

    /// Index into `image_paths` of the selected image.
    pub selected: Option<usize>,

    /// Rendered annotation views for the selected image.
    pub views: Option<AnnotationViews>,

    /// Set when `views` changed and textures must be re-uploaded.
    pub views_dirty: bool,

    /// Uploaded textures for `views`, label → handle, in display order.
    pub textures: Vec<(String, TextureHandle)>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Persisted viewer settings.
    pub settings: Settings,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            year: None,
            split: VocSplit::Trainval,
            image_paths: Vec::new(),
            selected: None,
            views: None,
            views_dirty: false,
            textures: Vec::new(),
            status_message: None,
            settings: Settings::load(),
        }
    }
}

impl AppState {
    /// Open the dataset at `root`, remember it, and refresh the image list.
    pub fn open_dataset(&mut self, root: PathBuf) {
        match VocDataset::open(&root) {
            Ok(dataset) => {
                log::info!("{dataset}");
                let missing = dataset.missing_paths().len();
                self.status_message =
                    (missing > 0).then(|| format!("{missing} expected paths missing (see log)"));
                self.dataset = Some(dataset);
                self.settings.remember_root(&root);
                self.persist_settings();
                self.refresh_image_list();
            }
            Err(e) => {
                log::error!("failed to open dataset: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Re-resolve the listed image paths for the current year/split and
    /// drop any stale selection.
    pub fn refresh_image_list(&mut self) {
        self.image_paths.clear();
        self.selected = None;
        self.views = None;
        self.views_dirty = true;

        let Some(dataset) = &self.dataset else {
            return;
        };
        let years: Vec<VocYear> = match self.year {
            Some(y) => vec![y],
            None => VocYear::ALL.to_vec(),
        };
        match dataset.image_paths(
            &years,
            self.split,
            VocImageType::Jpeg,
            self.settings.max_images,
        ) {
            Ok(paths) => self.image_paths = paths,
            Err(e) => {
                log::error!("resolving image paths: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Select the image at `index` and render its annotation views.
    pub fn select_image(&mut self, index: usize) {
        self.selected = Some(index);
        self.views = None;
        self.views_dirty = true;

        let Some(dataset) = &self.dataset else {
            return;
        };
        let Some(path) = self.image_paths.get(index) else {
            return;
        };
        match render_views(dataset, path, self.settings.overlay_alpha) {
            Ok(Some(views)) => {
                self.views = Some(views);
                self.status_message = None;
            }
            Ok(None) => {
                self.status_message =
                    Some(format!("no segmentation annotation for {}", path.display()));
            }
            Err(e) => {
                log::error!("rendering annotation views: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Re-render the current selection (after an overlay alpha change).
    pub fn rerender_selected(&mut self) {
        if let Some(index) = self.selected {
            self.select_image(index);
        }
    }

    pub fn persist_settings(&self) {
        if let Err(e) = self.settings.save() {
            log::warn!("failed to persist settings: {e:#}");
        }
    }
}
