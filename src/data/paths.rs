use std::fs;
use std::path::{Path, PathBuf};

use super::error::DatasetError;
use super::model::{VocImageType, VocSplit, VocYear};

// ---------------------------------------------------------------------------
// Directory conventions
// ---------------------------------------------------------------------------

/// Year directory under the dataset root, e.g. `<root>/VOC2012`.
pub fn year_dir(root: &Path, year: VocYear) -> PathBuf {
    root.join(year.dir_name())
}

/// Segmentation split manifest for one year, e.g.
/// `<root>/VOC2012/ImageSets/Segmentation/trainval.txt`.
pub fn manifest_path(root: &Path, year: VocYear, split: VocSplit) -> PathBuf {
    year_dir(root, year)
        .join("ImageSets")
        .join("Segmentation")
        .join(format!("{}.txt", split.name()))
}

/// Expected manifest paths for the cross product of `years` and `splits`.
/// No existence check: the caller decides whether absence matters.
pub fn split_manifests(root: &Path, years: &[VocYear], splits: &[VocSplit]) -> Vec<PathBuf> {
    let mut manifests = Vec::with_capacity(years.len() * splits.len());
    for &year in years {
        for &split in splits {
            manifests.push(manifest_path(root, year, split));
        }
    }
    manifests
}

// ---------------------------------------------------------------------------
// Manifest → image paths
// ---------------------------------------------------------------------------

/// Resolve the image paths listed by the given manifests.
///
/// Each manifest holds one image name per line; blanks are skipped. A
/// manifest that does not exist is skipped with a log line rather than an
/// error — missing paths are diagnostics, not failures. Reading a manifest
/// that exists but cannot be read *is* an error.
pub fn image_paths_from_manifests(
    manifests: &[PathBuf],
    image_type: VocImageType,
) -> Result<Vec<PathBuf>, DatasetError> {
    let mut image_paths = Vec::new();
    for manifest in manifests {
        if !manifest.is_file() {
            log::debug!("skipping absent manifest {}", manifest.display());
            continue;
        }
        let body = fs::read_to_string(manifest).map_err(|source| DatasetError::Manifest {
            path: manifest.clone(),
            source,
        })?;
        // <year dir>/ImageSets/Segmentation/<split>.txt
        let Some(year_dir) = manifest.ancestors().nth(3) else {
            continue;
        };
        let image_dir = year_dir.join(image_type.dir_name());
        for line in body.lines() {
            let name = line.trim();
            if name.is_empty() {
                continue;
            }
            image_paths.push(image_dir.join(format!("{name}.{}", image_type.extension())));
        }
    }
    Ok(image_paths)
}

/// Truncate `paths` to at most `max_count` entries when a limit is given.
pub fn truncate_paths(paths: &mut Vec<PathBuf>, max_count: Option<usize>) {
    if let Some(max) = max_count {
        paths.truncate(max);
    }
}

/// The subset of `paths` that does not exist on disk.
pub fn missing_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|p| !p.exists())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_fixtures::{write_manifest, SampleTree};

    #[test]
    fn manifest_path_follows_the_convention() {
        let p = manifest_path(Path::new("/data/VOCdevkit"), VocYear::Voc2007, VocSplit::Val);
        assert_eq!(
            p,
            Path::new("/data/VOCdevkit/VOC2007/ImageSets/Segmentation/val.txt")
        );
    }

    #[test]
    fn split_manifests_cover_the_cross_product() {
        let manifests = split_manifests(
            Path::new("/data/VOCdevkit"),
            &VocYear::ALL,
            &[VocSplit::Train, VocSplit::Val],
        );
        assert_eq!(manifests.len(), 4);
        assert!(manifests.contains(&PathBuf::from(
            "/data/VOCdevkit/VOC2012/ImageSets/Segmentation/train.txt"
        )));
    }

    #[test]
    fn resolved_paths_match_manifest_entries_exactly() {
        let tree = SampleTree::new(&[]);
        write_manifest(
            &tree.year_dir(),
            "val",
            &["2012_000010", "2012_000011", "2012_000012"],
        );
        let manifests = vec![manifest_path(tree.root(), VocYear::Voc2012, VocSplit::Val)];

        let jpegs = image_paths_from_manifests(&manifests, VocImageType::Jpeg).unwrap();
        let expected: Vec<_> = ["2012_000010", "2012_000011", "2012_000012"]
            .iter()
            .map(|n| tree.year_dir().join("JPEGImages").join(format!("{n}.jpg")))
            .collect();
        assert_eq!(jpegs, expected);

        let masks = image_paths_from_manifests(&manifests, VocImageType::ClassMask).unwrap();
        assert_eq!(
            masks[0],
            tree.year_dir()
                .join("SegmentationClass")
                .join("2012_000010.png")
        );
    }

    #[test]
    fn blank_manifest_lines_are_skipped() {
        let tree = SampleTree::new(&[]);
        write_manifest(&tree.year_dir(), "train", &["2012_000001", "", "  "]);
        let manifests = vec![manifest_path(tree.root(), VocYear::Voc2012, VocSplit::Train)];
        let paths = image_paths_from_manifests(&manifests, VocImageType::Jpeg).unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn absent_manifest_is_skipped_without_error() {
        let tree = SampleTree::new(&[]);
        let manifests = vec![manifest_path(tree.root(), VocYear::Voc2007, VocSplit::Train)];
        let paths = image_paths_from_manifests(&manifests, VocImageType::Jpeg).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn truncation_yields_min_of_limit_and_total() {
        let mut paths: Vec<PathBuf> = (0..5).map(|i| PathBuf::from(format!("{i}.jpg"))).collect();
        truncate_paths(&mut paths, Some(3));
        assert_eq!(paths.len(), 3);
        truncate_paths(&mut paths, Some(100));
        assert_eq!(paths.len(), 3);
        truncate_paths(&mut paths, None);
        assert_eq!(paths.len(), 3);
    }

    #[test]
    fn missing_paths_flags_only_the_absent() {
        let tree = SampleTree::new(&["2012_000001"]);
        let present = tree.year_dir().join("JPEGImages").join("2012_000001.jpg");
        let absent = tree.year_dir().join("JPEGImages").join("2012_000099.jpg");
        let missing = missing_paths(&[present.clone(), absent.clone()]);
        assert_eq!(missing, vec![absent]);
        assert!(!missing.contains(&present));
    }
}
