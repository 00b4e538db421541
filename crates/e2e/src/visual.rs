//! Screenshot baseline comparison
//!
//! Scenarios that capture screenshots can be checked against committed
//! baselines. Comparison is a sha256 fast path followed by a per-pixel diff;
//! mismatching pixels are written out as a red-overlay diff image.

use std::path::{Path, PathBuf};

use image::{GenericImageView, Rgba, RgbaImage};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{E2eError, E2eResult};

/// Result of comparing one screenshot against its baseline.
#[derive(Debug, Clone)]
pub struct VisualDiff {
    pub matches: bool,
    pub diff_percent: f64,
    pub diff_pixels: u64,
    pub total_pixels: u64,
    pub diff_image_path: Option<PathBuf>,
}

/// Configuration for visual comparison.
#[derive(Debug, Clone)]
pub struct VisualConfig {
    pub baseline_dir: PathBuf,
    pub actual_dir: PathBuf,
    pub diff_dir: PathBuf,

    /// Allowed pixel difference, 0.0 - 100.0 percent
    pub threshold: f64,

    /// Adopt the actual screenshot as baseline when none exists
    pub auto_update: bool,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            baseline_dir: PathBuf::from("test-results/baselines"),
            actual_dir: PathBuf::from("test-results/screenshots"),
            diff_dir: PathBuf::from("test-results/diffs"),
            threshold: 0.5,
            auto_update: false,
        }
    }
}

pub struct VisualTester {
    config: VisualConfig,
}

impl VisualTester {
    pub fn new(config: VisualConfig) -> E2eResult<Self> {
        std::fs::create_dir_all(&config.baseline_dir)?;
        std::fs::create_dir_all(&config.actual_dir)?;
        std::fs::create_dir_all(&config.diff_dir)?;
        Ok(Self { config })
    }

    /// Compare a named screenshot against its baseline.
    pub fn compare(&self, name: &str) -> E2eResult<VisualDiff> {
        let actual_path = self.config.actual_dir.join(format!("{name}.png"));
        let baseline_path = self.config.baseline_dir.join(format!("{name}.png"));

        if !actual_path.exists() {
            return Err(E2eError::Visual(format!(
                "screenshot not found: {}",
                actual_path.display()
            )));
        }

        if !baseline_path.exists() {
            if self.config.auto_update {
                info!("adopting baseline for '{name}'");
                std::fs::copy(&actual_path, &baseline_path)?;
                return Ok(VisualDiff {
                    matches: true,
                    diff_percent: 0.0,
                    diff_pixels: 0,
                    total_pixels: 0,
                    diff_image_path: None,
                });
            }
            return Err(E2eError::BaselineNotFound(
                baseline_path.to_string_lossy().to_string(),
            ));
        }

        if hash_file(&actual_path)? == hash_file(&baseline_path)? {
            debug!("'{name}' matches baseline exactly");
            let img = image::open(&actual_path)?;
            let total = u64::from(img.width()) * u64::from(img.height());
            return Ok(VisualDiff {
                matches: true,
                diff_percent: 0.0,
                diff_pixels: 0,
                total_pixels: total,
                diff_image_path: None,
            });
        }

        let actual = image::open(&actual_path)?.to_rgba8();
        let baseline = image::open(&baseline_path)?.to_rgba8();

        if actual.dimensions() != baseline.dimensions() {
            return Err(E2eError::Visual(format!(
                "'{name}' dimensions differ: actual {:?} vs baseline {:?}",
                actual.dimensions(),
                baseline.dimensions()
            )));
        }

        let (width, height) = actual.dimensions();
        let total_pixels = u64::from(width) * u64::from(height);
        let mut diff_pixels = 0u64;
        let mut diff_img = RgbaImage::new(width, height);

        for y in 0..height {
            for x in 0..width {
                let a = actual.get_pixel(x, y);
                let b = baseline.get_pixel(x, y);
                if a == b {
                    // Dim matching pixels so differences stand out
                    let Rgba([r, g, bl, _]) = *a;
                    diff_img.put_pixel(x, y, Rgba([r / 3, g / 3, bl / 3, 255]));
                } else {
                    diff_pixels += 1;
                    diff_img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
                }
            }
        }

        let diff_percent = (diff_pixels as f64 / total_pixels as f64) * 100.0;
        let matches = diff_percent <= self.config.threshold;

        let diff_image_path = if matches {
            None
        } else {
            let path = self.config.diff_dir.join(format!("{name}.diff.png"));
            diff_img.save(&path)?;
            Some(path)
        };

        Ok(VisualDiff {
            matches,
            diff_percent,
            diff_pixels,
            total_pixels,
            diff_image_path,
        })
    }

    /// Promote the current screenshot to baseline.
    pub fn update_baseline(&self, name: &str) -> E2eResult<()> {
        let actual = self.config.actual_dir.join(format!("{name}.png"));
        let baseline = self.config.baseline_dir.join(format!("{name}.png"));
        std::fs::copy(&actual, &baseline)?;
        info!("baseline updated: {name}");
        Ok(())
    }

    /// Promote every captured screenshot to baseline.
    pub fn update_all_baselines(&self) -> E2eResult<()> {
        for entry in std::fs::read_dir(&self.config.actual_dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "png").unwrap_or(false) {
                if let Some(name) = path.file_stem() {
                    self.update_baseline(&name.to_string_lossy())?;
                }
            }
        }
        Ok(())
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }
}

fn hash_file(path: &Path) -> E2eResult<String> {
    let bytes = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, color: Rgba<u8>) {
        let mut img = RgbaImage::new(16, 16);
        for p in img.pixels_mut() {
            *p = color;
        }
        img.save(path).unwrap();
    }

    fn tester(root: &Path, threshold: f64, auto_update: bool) -> VisualTester {
        VisualTester::new(VisualConfig {
            baseline_dir: root.join("baselines"),
            actual_dir: root.join("actual"),
            diff_dir: root.join("diffs"),
            threshold,
            auto_update,
        })
        .unwrap()
    }

    #[test]
    fn identical_images_match() {
        let tmp = tempfile::tempdir().unwrap();
        let t = tester(tmp.path(), 0.5, false);
        write_png(&tmp.path().join("actual/shot.png"), Rgba([10, 20, 30, 255]));
        write_png(&tmp.path().join("baselines/shot.png"), Rgba([10, 20, 30, 255]));

        let diff = t.compare("shot").unwrap();
        assert!(diff.matches);
        assert_eq!(diff.diff_pixels, 0);
    }

    #[test]
    fn fully_different_images_fail_and_emit_a_diff() {
        let tmp = tempfile::tempdir().unwrap();
        let t = tester(tmp.path(), 0.5, false);
        write_png(&tmp.path().join("actual/shot.png"), Rgba([255, 255, 255, 255]));
        write_png(&tmp.path().join("baselines/shot.png"), Rgba([0, 0, 0, 255]));

        let diff = t.compare("shot").unwrap();
        assert!(!diff.matches);
        assert_eq!(diff.diff_pixels, 16 * 16);
        assert!(diff.diff_image_path.as_ref().unwrap().exists());
    }

    #[test]
    fn missing_baseline_errors_without_auto_update() {
        let tmp = tempfile::tempdir().unwrap();
        let t = tester(tmp.path(), 0.5, false);
        write_png(&tmp.path().join("actual/shot.png"), Rgba([1, 2, 3, 255]));

        match t.compare("shot") {
            Err(E2eError::BaselineNotFound(_)) => {}
            other => panic!("expected BaselineNotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_baseline_is_adopted_with_auto_update() {
        let tmp = tempfile::tempdir().unwrap();
        let t = tester(tmp.path(), 0.5, true);
        write_png(&tmp.path().join("actual/shot.png"), Rgba([1, 2, 3, 255]));

        let diff = t.compare("shot").unwrap();
        assert!(diff.matches);
        assert!(tmp.path().join("baselines/shot.png").exists());
    }
}
