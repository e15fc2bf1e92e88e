use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use image::RgbImage;

use super::error::DatasetError;
use super::paths;
use crate::color;

// ---------------------------------------------------------------------------
// Dataset enumerations
// ---------------------------------------------------------------------------

/// A VOC release year. Each has its own `VOC<year>` directory under the
/// devkit root with the full `JPEGImages` / `ImageSets` / `Segmentation*`
/// tree inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocYear {
    Voc2007,
    Voc2012,
}

impl VocYear {
    /// All years the devkit convention covers.
    pub const ALL: [VocYear; 2] = [VocYear::Voc2007, VocYear::Voc2012];

    pub fn number(self) -> u16 {
        match self {
            VocYear::Voc2007 => 2007,
            VocYear::Voc2012 => 2012,
        }
    }

    /// Directory name under the dataset root, e.g. `VOC2012`.
    pub fn dir_name(self) -> String {
        format!("VOC{}", self.number())
    }
}

impl fmt::Display for VocYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A named subset of the dataset, selected by a manifest file under
/// `ImageSets/Segmentation/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocSplit {
    Train,
    Val,
    Trainval,
    Test,
}

impl VocSplit {
    pub const ALL: [VocSplit; 4] = [
        VocSplit::Train,
        VocSplit::Val,
        VocSplit::Trainval,
        VocSplit::Test,
    ];

    /// Manifest stem, e.g. `trainval` for `trainval.txt`.
    pub fn name(self) -> &'static str {
        match self {
            VocSplit::Train => "train",
            VocSplit::Val => "val",
            VocSplit::Trainval => "trainval",
            VocSplit::Test => "test",
        }
    }
}

impl fmt::Display for VocSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The kind of per-image file to resolve. Each kind lives in its own
/// directory with a fixed extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocImageType {
    /// Source photograph: `JPEGImages/<name>.jpg`.
    Jpeg,
    /// Per-pixel category mask: `SegmentationClass/<name>.png`.
    ClassMask,
    /// Per-pixel instance mask: `SegmentationObject/<name>.png`.
    ObjectMask,
}

impl VocImageType {
    pub fn dir_name(self) -> &'static str {
        match self {
            VocImageType::Jpeg => "JPEGImages",
            VocImageType::ClassMask => "SegmentationClass",
            VocImageType::ObjectMask => "SegmentationObject",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            VocImageType::Jpeg => "jpg",
            VocImageType::ClassMask => "png",
            VocImageType::ObjectMask => "png",
        }
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// The 21 VOC categories, indexed as the class masks encode them
/// (0 = background).
pub const CATEGORIES: [&str; 21] = [
    "background",
    "aeroplane",
    "bicycle",
    "bird",
    "boat",
    "bottle",
    "bus",
    "car",
    "cat",
    "chair",
    "cow",
    "diningtable",
    "dog",
    "horse",
    "motorbike",
    "person",
    "pottedplant",
    "sheep",
    "sofa",
    "train",
    "tvmonitor",
];

// ---------------------------------------------------------------------------
// SegAnnotation – one image's ground truth, loaded lazily
// ---------------------------------------------------------------------------

/// Paths to one image's class and object masks. The PNGs are only decoded
/// when a loader is called.
#[derive(Debug, Clone)]
pub struct SegAnnotation {
    class_mask_path: PathBuf,
    object_mask_path: PathBuf,
}

impl SegAnnotation {
    pub fn new(class_mask_path: PathBuf, object_mask_path: PathBuf) -> Self {
        Self {
            class_mask_path,
            object_mask_path,
        }
    }

    /// Decode the per-pixel category mask.
    pub fn load_class_mask(&self) -> Result<RgbImage, DatasetError> {
        load_rgb(&self.class_mask_path)
    }

    /// Decode the per-pixel instance mask.
    pub fn load_object_mask(&self) -> Result<RgbImage, DatasetError> {
        load_rgb(&self.object_mask_path)
    }
}

fn load_rgb(path: &Path) -> Result<RgbImage, DatasetError> {
    let img = image::open(path).map_err(|source| DatasetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}

// ---------------------------------------------------------------------------
// VocDataset – root, categories, palette, and the annotation index
// ---------------------------------------------------------------------------

/// A segmentation view over a VOCdevkit directory.
///
/// Construction resolves the expected manifests and the `trainval` image
/// set, records every expected-but-absent path, and builds the name →
/// annotation index once. Read-only afterwards.
#[derive(Debug)]
pub struct VocDataset {
    root: PathBuf,
    palette: Vec<[u8; 3]>,
    annotations: BTreeMap<String, SegAnnotation>,
    missing: Vec<PathBuf>,
}

impl VocDataset {
    /// Open the dataset rooted at `root` (the directory holding the
    /// `VOC<year>` subdirectories) and build the annotation index.
    ///
    /// The only fatal condition is the root itself being absent. Expected
    /// manifests or masks that are missing are collected, logged, and
    /// available through [`missing_paths`](Self::missing_paths).
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(DatasetError::RootNotFound(root));
        }

        let manifests = paths::split_manifests(&root, &VocYear::ALL, &VocSplit::ALL);
        let mut missing = paths::missing_paths(&manifests);

        let mut dataset = VocDataset {
            root,
            palette: color::voc_palette(CATEGORIES.len()),
            annotations: BTreeMap::new(),
            missing: Vec::new(),
        };
        dataset.build_index(&mut missing)?;

        for path in &missing {
            log::warn!("missing expected path: {}", path.display());
        }
        dataset.missing = missing;
        Ok(dataset)
    }

    /// Index every `trainval` image whose class and object masks both exist,
    /// keyed by filename stem. Masks live in the `SegmentationClass` /
    /// `SegmentationObject` directories parallel to `JPEGImages`.
    fn build_index(&mut self, missing: &mut Vec<PathBuf>) -> Result<(), DatasetError> {
        let image_paths = self.image_paths(
            &VocYear::ALL,
            VocSplit::Trainval,
            VocImageType::Jpeg,
            None,
        )?;

        for image_path in image_paths {
            let Some(name) = image_path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // JPEGImages/<name>.jpg → the year directory is two levels up.
            let Some(year_dir) = image_path.parent().and_then(Path::parent) else {
                continue;
            };
            let class_mask = year_dir
                .join(VocImageType::ClassMask.dir_name())
                .join(format!("{name}.{}", VocImageType::ClassMask.extension()));
            let object_mask = year_dir
                .join(VocImageType::ObjectMask.dir_name())
                .join(format!("{name}.{}", VocImageType::ObjectMask.extension()));

            let mut complete = true;
            for mask in [&class_mask, &object_mask] {
                if !mask.is_file() {
                    missing.push(mask.clone());
                    complete = false;
                }
            }
            if complete {
                self.annotations
                    .insert(name.to_string(), SegAnnotation::new(class_mask, object_mask));
            }
        }
        Ok(())
    }

    /// Resolve the image paths listed by the given years' manifests for
    /// `split`, optionally truncated to `max_count` entries.
    pub fn image_paths(
        &self,
        years: &[VocYear],
        split: VocSplit,
        image_type: VocImageType,
        max_count: Option<usize>,
    ) -> Result<Vec<PathBuf>, DatasetError> {
        let manifests = paths::split_manifests(&self.root, years, &[split]);
        let mut image_paths = paths::image_paths_from_manifests(&manifests, image_type)?;
        paths::truncate_paths(&mut image_paths, max_count);
        Ok(image_paths)
    }

    /// Challenge submission code for `split`, e.g. `comp5_seg_val`.
    pub fn competition_code(&self, split: VocSplit) -> String {
        format!("comp5_seg_{}", split.name())
    }

    /// Look up an annotation by image name (filename stem).
    pub fn annotation(&self, name: &str) -> Option<&SegAnnotation> {
        self.annotations.get(name)
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn categories(&self) -> &'static [&'static str] {
        &CATEGORIES
    }

    /// Canonical VOC colors for [`categories`](Self::categories), index-aligned.
    pub fn palette(&self) -> &[[u8; 3]] {
        &self.palette
    }

    /// Expected paths (manifests and masks) that were absent at open time.
    pub fn missing_paths(&self) -> &[PathBuf] {
        &self.missing
    }
}

impl fmt::Display for VocDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Segmentation dataset at {} ({} annotated images)",
            self.root.display(),
            self.annotation_count()
        )
    }
}
