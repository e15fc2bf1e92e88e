/// Data layer: VOC conventions, the annotation index, and overlay rendering.
///
/// Architecture:
/// ```text
///  VOCdevkit/VOC<year>/ImageSets/Segmentation/<split>.txt
///        │
///        ▼
///   ┌──────────┐
///   │  paths    │  manifests → expected image paths, missing-path report
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ VocDataset  │  name → SegAnnotation index (built once at open)
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ overlay   │  photo + masks → AnnotationViews for the UI
///   └──────────┘
/// ```
pub mod error;
pub mod model;
pub mod overlay;
pub mod paths;

#[cfg(test)]
pub(crate) mod test_fixtures {
    use std::fs;
    use std::path::{Path, PathBuf};

    use image::{ImageBuffer, Rgb, RgbImage};
    use tempfile::TempDir;

    /// Miniature VOCdevkit tree holding a single `VOC2012` year directory.
    pub struct SampleTree {
        dir: TempDir,
    }

    impl SampleTree {
        /// Build a tree whose `trainval` manifest lists `names`, with a JPEG
        /// and both masks present for each.
        pub fn new(names: &[&str]) -> Self {
            let dir = tempfile::tempdir().expect("create temp dir");
            let year_dir = dir.path().join("VOC2012");
            for sub in ["JPEGImages", "SegmentationClass", "SegmentationObject"] {
                fs::create_dir_all(year_dir.join(sub)).unwrap();
            }
            write_manifest(&year_dir, "trainval", names);
            for name in names {
                write_jpeg(&year_dir.join("JPEGImages"), name);
                write_mask(&year_dir.join("SegmentationClass"), name, [0, 0, 0]);
                write_mask(&year_dir.join("SegmentationObject"), name, [0, 0, 0]);
            }
            Self { dir }
        }

        pub fn root(&self) -> &Path {
            self.dir.path()
        }

        pub fn year_dir(&self) -> PathBuf {
            self.dir.path().join("VOC2012")
        }
    }

    pub fn write_manifest(year_dir: &Path, split: &str, names: &[&str]) {
        let dir = year_dir.join("ImageSets").join("Segmentation");
        fs::create_dir_all(&dir).unwrap();
        let mut body = names.join("\n");
        body.push('\n');
        fs::write(dir.join(format!("{split}.txt")), body).unwrap();
    }

    pub fn write_jpeg(dir: &Path, name: &str) {
        let img: RgbImage = ImageBuffer::from_pixel(4, 4, Rgb([200, 40, 40]));
        img.save(dir.join(format!("{name}.jpg"))).unwrap();
    }

    pub fn write_mask(dir: &Path, name: &str, color: [u8; 3]) {
        let img: RgbImage = ImageBuffer::from_pixel(4, 4, Rgb(color));
        img.save(dir.join(format!("{name}.png"))).unwrap();
    }
}
