//! Generate a miniature VOCdevkit tree for trying the viewer without the
//! real benchmark download.
//!
//! Writes `sample_data/VOCdevkit/VOC2012` with a handful of synthetic
//! photos, class/object masks in the canonical VOC colors, and the
//! segmentation split manifests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageBuffer, Rgb, RgbImage};

const VOID_COLOR: [u8; 3] = [224, 224, 192];
const WIDTH: u32 = 96;
const HEIGHT: u32 = 72;

/// Canonical VOC colormap entry for a label (bit-interleave algorithm).
fn voc_color(label: usize) -> [u8; 3] {
    let mut id = label;
    let (mut r, mut g, mut b) = (0u8, 0u8, 0u8);
    for shift in (0..8).rev() {
        r |= ((id & 1) as u8) << shift;
        g |= (((id >> 1) & 1) as u8) << shift;
        b |= (((id >> 2) & 1) as u8) << shift;
        id >>= 3;
    }
    [r, g, b]
}

/// One synthetic object: a category, an instance id, and its rectangle.
struct Blob {
    category: usize,
    instance: usize,
    rect: (u32, u32, u32, u32), // x0, y0, x1, y1 (exclusive)
}

struct SampleImage {
    name: &'static str,
    splits: &'static [&'static str],
    blobs: &'static [Blob],
}

const SAMPLES: [SampleImage; 3] = [
    SampleImage {
        name: "2012_000001",
        splits: &["train", "trainval"],
        blobs: &[
            Blob {
                category: 1, // aeroplane
                instance: 1,
                rect: (10, 10, 50, 40),
            },
            Blob {
                category: 15, // person
                instance: 2,
                rect: (60, 30, 88, 66),
            },
        ],
    },
    SampleImage {
        name: "2012_000002",
        splits: &["train", "trainval"],
        blobs: &[Blob {
            category: 12, // dog
            instance: 1,
            rect: (24, 16, 72, 60),
        }],
    },
    SampleImage {
        name: "2012_000003",
        splits: &["val", "trainval"],
        blobs: &[
            Blob {
                category: 7, // car
                instance: 1,
                rect: (6, 40, 44, 64),
            },
            Blob {
                category: 7,
                instance: 2,
                rect: (50, 42, 90, 66),
            },
        ],
    },
];

fn fill_rect(img: &mut RgbImage, rect: (u32, u32, u32, u32), color: [u8; 3]) {
    let (x0, y0, x1, y1) = rect;
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, Rgb(color));
        }
    }
}

/// A one-pixel void border around a rectangle, as the real masks have.
fn outline_rect(img: &mut RgbImage, rect: (u32, u32, u32, u32)) {
    let (x0, y0, x1, y1) = rect;
    for x in x0.saturating_sub(1)..(x1 + 1).min(img.width()) {
        for y in [y0.saturating_sub(1), y1.min(img.height() - 1)] {
            img.put_pixel(x, y, Rgb(VOID_COLOR));
        }
    }
    for y in y0.saturating_sub(1)..(y1 + 1).min(img.height()) {
        for x in [x0.saturating_sub(1), x1.min(img.width() - 1)] {
            img.put_pixel(x, y, Rgb(VOID_COLOR));
        }
    }
}

fn photo_for(sample: &SampleImage) -> RgbImage {
    // Sky-to-ground gradient with flat gray blobs where the objects sit.
    let mut img: RgbImage = ImageBuffer::from_fn(WIDTH, HEIGHT, |_, y| {
        let t = y as f32 / HEIGHT as f32;
        Rgb([
            (120.0 + 60.0 * t) as u8,
            (170.0 - 60.0 * t) as u8,
            (220.0 - 120.0 * t) as u8,
        ])
    });
    for blob in sample.blobs {
        let shade = 70 + (blob.category * 7 % 120) as u8;
        fill_rect(&mut img, blob.rect, [shade, shade, shade]);
    }
    img
}

fn class_mask_for(sample: &SampleImage) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::from_pixel(WIDTH, HEIGHT, Rgb([0, 0, 0]));
    for blob in sample.blobs {
        fill_rect(&mut img, blob.rect, voc_color(blob.category));
        outline_rect(&mut img, blob.rect);
    }
    img
}

fn object_mask_for(sample: &SampleImage) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::from_pixel(WIDTH, HEIGHT, Rgb([0, 0, 0]));
    for blob in sample.blobs {
        fill_rect(&mut img, blob.rect, voc_color(blob.instance));
        outline_rect(&mut img, blob.rect);
    }
    img
}

fn save(img: &RgbImage, path: &Path) -> Result<()> {
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let year_dir = PathBuf::from("sample_data").join("VOCdevkit").join("VOC2012");
    for sub in [
        "JPEGImages",
        "SegmentationClass",
        "SegmentationObject",
        "ImageSets/Segmentation",
    ] {
        fs::create_dir_all(year_dir.join(sub))
            .with_context(|| format!("creating {sub}"))?;
    }

    for sample in &SAMPLES {
        save(
            &photo_for(sample),
            &year_dir.join("JPEGImages").join(format!("{}.jpg", sample.name)),
        )?;
        save(
            &class_mask_for(sample),
            &year_dir
                .join("SegmentationClass")
                .join(format!("{}.png", sample.name)),
        )?;
        save(
            &object_mask_for(sample),
            &year_dir
                .join("SegmentationObject")
                .join(format!("{}.png", sample.name)),
        )?;
    }

    for split in ["train", "val", "trainval"] {
        let names: Vec<&str> = SAMPLES
            .iter()
            .filter(|s| s.splits.contains(&split))
            .map(|s| s.name)
            .collect();
        let mut body = names.join("\n");
        body.push('\n');
        let path = year_dir
            .join("ImageSets")
            .join("Segmentation")
            .join(format!("{split}.txt"));
        fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    }

    println!(
        "Sample dataset written to {} ({} images)",
        year_dir.display(),
        SAMPLES.len()
    );
    Ok(())
}
