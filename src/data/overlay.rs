use std::collections::BTreeSet;
use std::path::Path;

use image::{DynamicImage, Rgba, RgbaImage};

use super::error::DatasetError;
use super::model::{VocDataset, CATEGORIES};
use crate::color;

// ---------------------------------------------------------------------------
// AnnotationViews – everything the viewer shows for one image
// ---------------------------------------------------------------------------

/// The rendered views for one annotated image: the source photo, the raw
/// masks, the category overlay on the photo, and the same overlay on a
/// black canvas.
pub struct AnnotationViews {
    pub name: String,
    pub photo: RgbaImage,
    pub class_mask: RgbaImage,
    pub object_mask: RgbaImage,
    pub overlay: RgbaImage,
    pub shapes: RgbaImage,
    /// Category indices present in the class mask, background excluded.
    pub categories: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the annotation views for the image at `image_path`.
///
/// Looks the image up in the dataset's index by filename stem. An image
/// without an annotation yields `Ok(None)` and a debug log line; this is a
/// debugging aid, not an error path.
pub fn render_views(
    dataset: &VocDataset,
    image_path: &Path,
    alpha: f32,
) -> Result<Option<AnnotationViews>, DatasetError> {
    let Some(name) = image_path.file_stem().and_then(|s| s.to_str()) else {
        return Ok(None);
    };
    let Some(annotation) = dataset.annotation(name) else {
        log::debug!("no annotation indexed for {name}");
        return Ok(None);
    };

    let photo = image::open(image_path)
        .map_err(|source| DatasetError::Image {
            path: image_path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let class_mask = annotation.load_class_mask()?;
    let object_mask = annotation.load_object_mask()?;

    let display = color::generate_palette_rgb(CATEGORIES.len());
    let voc = dataset.palette();

    let (width, height) = photo.dimensions();
    let mut overlay = photo.clone();
    let mut shapes = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    let mut present = BTreeSet::new();

    // Masks share the photo's dimensions in a well-formed devkit; clamp to
    // the common area rather than assuming it.
    let (mask_w, mask_h) = class_mask.dimensions();
    for y in 0..height.min(mask_h) {
        for x in 0..width.min(mask_w) {
            let rgb = class_mask.get_pixel(x, y).0;
            if rgb == color::VOID_COLOR {
                continue;
            }
            let Some(index) = color::class_index_for(rgb, voc) else {
                continue; // unexpected color
            };
            if index == 0 {
                continue; // background
            }
            present.insert(index);
            let tint = display[index];
            blend(overlay.get_pixel_mut(x, y), tint, alpha);
            shapes.put_pixel(x, y, Rgba([tint[0], tint[1], tint[2], 255]));
        }
    }

    Ok(Some(AnnotationViews {
        name: name.to_string(),
        photo,
        class_mask: DynamicImage::ImageRgb8(class_mask).to_rgba8(),
        object_mask: DynamicImage::ImageRgb8(object_mask).to_rgba8(),
        overlay,
        shapes,
        categories: present.into_iter().collect(),
    }))
}

/// Linear blend of `src` over `dst` at the given opacity, alpha preserved.
fn blend(dst: &mut Rgba<u8>, src: [u8; 3], alpha: f32) {
    let a = alpha.clamp(0.0, 1.0);
    for c in 0..3 {
        dst.0[c] = (dst.0[c] as f32 * (1.0 - a) + src[c] as f32 * a).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_fixtures::SampleTree;
    use image::{ImageBuffer, Rgb, RgbImage};

    fn striped_class_mask(tree: &SampleTree, name: &str) {
        // Left half aeroplane (class 1), right half background.
        let mask: RgbImage = ImageBuffer::from_fn(4, 4, |x, _| {
            if x < 2 {
                Rgb([128, 0, 0])
            } else {
                Rgb([0, 0, 0])
            }
        });
        mask.save(
            tree.year_dir()
                .join("SegmentationClass")
                .join(format!("{name}.png")),
        )
        .unwrap();
    }

    #[test]
    fn blend_is_a_linear_lerp() {
        let mut px = Rgba([0u8, 0, 0, 255]);
        blend(&mut px, [200, 100, 0], 0.5);
        assert_eq!(px.0, [100, 50, 0, 255]);

        let mut px = Rgba([40u8, 40, 40, 255]);
        blend(&mut px, [200, 100, 0], 0.0);
        assert_eq!(px.0, [40, 40, 40, 255]);

        let mut px = Rgba([40u8, 40, 40, 255]);
        blend(&mut px, [200, 100, 0], 1.0);
        assert_eq!(px.0, [200, 100, 0, 255]);
    }

    #[test]
    fn views_cover_masked_pixels_and_list_categories() {
        let tree = SampleTree::new(&["2012_000001"]);
        striped_class_mask(&tree, "2012_000001");
        let dataset = crate::data::model::VocDataset::open(tree.root()).unwrap();
        let image_path = tree.year_dir().join("JPEGImages").join("2012_000001.jpg");

        let views = render_views(&dataset, &image_path, 0.5)
            .unwrap()
            .expect("annotation is indexed");

        assert_eq!(views.name, "2012_000001");
        assert_eq!(views.categories, vec![1]);
        assert_eq!(views.photo.dimensions(), views.overlay.dimensions());

        // Masked pixel: tinted on the photo, colored on the black canvas.
        assert_ne!(views.overlay.get_pixel(0, 0), views.photo.get_pixel(0, 0));
        assert_ne!(views.shapes.get_pixel(0, 0).0, [0, 0, 0, 255]);
        // Background pixel: untouched photo, black canvas.
        assert_eq!(views.overlay.get_pixel(3, 0), views.photo.get_pixel(3, 0));
        assert_eq!(views.shapes.get_pixel(3, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn unindexed_image_renders_nothing() {
        let tree = SampleTree::new(&["2012_000001"]);
        let dataset = crate::data::model::VocDataset::open(tree.root()).unwrap();
        let stranger = tree.year_dir().join("JPEGImages").join("2012_000099.jpg");
        assert!(render_views(&dataset, &stranger, 0.5).unwrap().is_none());
    }
}
