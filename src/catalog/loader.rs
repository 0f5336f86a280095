//! Prioritized catalog loading
//!
//! Sources are tried in a fixed order and the first one that both exists and
//! parses wins:
//! 1. Precomputed bundle (bincode): movies + similarity matrix
//! 2. JSON movie records, paired with a uniform similarity matrix
//! 3. Compiled-in sample movies, paired with a uniform similarity matrix
//!
//! Loading never fails; the worst case is the built-in sample.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::{
    catalog::{Catalog, CatalogBundle, CatalogSource},
    config::Config,
    error::{AppError, AppResult},
    models::Movie,
};

/// Result of trying a single catalog source
#[derive(Debug)]
pub enum SourceOutcome {
    Loaded(Catalog),
    /// Nothing at this location, try the next one
    Missing,
    /// Present but unreadable or malformed, try the next one
    Invalid(String),
}

/// Ordered candidate locations for each catalog source
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    bundle_paths: Vec<PathBuf>,
    records_paths: Vec<PathBuf>,
}

impl CatalogLoader {
    pub fn new(bundle_paths: Vec<PathBuf>, records_paths: Vec<PathBuf>) -> Self {
        Self {
            bundle_paths,
            records_paths,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.catalog_bundle_paths.clone(),
            config.catalog_records_paths.clone(),
        )
    }

    /// Walks the source chain and returns the first catalog that loads
    pub fn load(&self) -> Catalog {
        let bundles = self.bundle_paths.iter().map(|p| (p, try_bundle(p)));
        let records = self.records_paths.iter().map(|p| (p, try_records(p)));

        for (path, outcome) in bundles.chain(records) {
            match outcome {
                SourceOutcome::Loaded(catalog) => {
                    tracing::info!(
                        source = %catalog.source(),
                        movies = catalog.len(),
                        "Catalog loaded"
                    );
                    return catalog;
                }
                SourceOutcome::Missing => {
                    tracing::debug!(path = %path.display(), "Catalog source not found");
                }
                SourceOutcome::Invalid(reason) => {
                    tracing::warn!(
                        path = %path.display(),
                        reason = %reason,
                        "Catalog source unusable, trying next"
                    );
                }
            }
        }

        let catalog = builtin_sample();
        tracing::warn!(
            movies = catalog.len(),
            "No catalog data found, using built-in sample movies"
        );
        catalog
    }
}

/// Attempts to read a bincode bundle of movies + similarity matrix
pub fn try_bundle(path: &Path) -> SourceOutcome {
    if !path.is_file() {
        return SourceOutcome::Missing;
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return SourceOutcome::Invalid(format!("read failed: {}", e)),
    };

    let bundle: CatalogBundle = match bincode::deserialize(&bytes) {
        Ok(bundle) => bundle,
        Err(e) => return SourceOutcome::Invalid(format!("decode failed: {}", e)),
    };

    match Catalog::new(
        bundle.movies,
        bundle.similarity,
        CatalogSource::Bundle(path.to_path_buf()),
    ) {
        Ok(catalog) => SourceOutcome::Loaded(catalog),
        Err(e) => SourceOutcome::Invalid(e.to_string()),
    }
}

/// Attempts to read a JSON array of movie records
pub fn try_records(path: &Path) -> SourceOutcome {
    if !path.is_file() {
        return SourceOutcome::Missing;
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => return SourceOutcome::Invalid(format!("read failed: {}", e)),
    };

    match serde_json::from_str::<Vec<Movie>>(&contents) {
        Ok(movies) => SourceOutcome::Loaded(Catalog::with_uniform_similarity(
            movies,
            CatalogSource::Records(path.to_path_buf()),
        )),
        Err(e) => SourceOutcome::Invalid(format!("parse failed: {}", e)),
    }
}

/// Small hand-tagged catalog used when no data files are available
pub fn builtin_sample() -> Catalog {
    let movies = vec![
        Movie::new(278, "The Shawshank Redemption", Some("Drama")),
        Movie::new(238, "The Godfather", Some("Crime Drama")),
        Movie::new(155, "The Dark Knight", Some("Action Crime")),
        Movie::new(680, "Pulp Fiction", Some("Crime Drama")),
        Movie::new(13, "Forrest Gump", Some("Drama Romance")),
        Movie::new(27205, "Inception", Some("Sci-Fi Thriller")),
        Movie::new(603, "The Matrix", Some("Sci-Fi Action")),
        Movie::new(24428, "Interstellar", Some("Sci-Fi Drama")),
    ];
    Catalog::with_uniform_similarity(movies, CatalogSource::BuiltinSample)
}

/// Writes movies + similarity matrix in the bundle format read by [`try_bundle`]
pub fn save_bundle(path: &Path, movies: &[Movie], similarity: &[Vec<f32>]) -> AppResult<()> {
    #[derive(serde::Serialize)]
    struct BundleRef<'a> {
        movies: &'a [Movie],
        similarity: &'a [Vec<f32>],
    }

    let file = File::create(path)
        .map_err(|e| AppError::Catalog(format!("Failed to create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, &BundleRef { movies, similarity })
        .map_err(|e| AppError::Catalog(format!("Failed to write bundle: {}", e)))?;
    Ok(())
}
