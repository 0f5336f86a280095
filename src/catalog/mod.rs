//! Movie catalog and its precomputed similarity matrix
//!
//! Both are loaded once at startup and shared read-only for the lifetime of the
//! process. Row/column `i` of the matrix always describes `movies[i]`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::PathBuf;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogStatus, Movie},
};

pub mod loader;

pub use loader::{builtin_sample, save_bundle, CatalogLoader, SourceOutcome};

/// Similarity assigned to every pair when no matrix is available
pub const UNIFORM_SIMILARITY: f32 = 1.0;

/// Where the catalog in use was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Precomputed movies + similarity bundle
    Bundle(PathBuf),
    /// JSON movie records with a uniform similarity matrix
    Records(PathBuf),
    /// Compiled-in sample movies
    BuiltinSample,
}

impl CatalogSource {
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogSource::Bundle(_) => "bundle",
            CatalogSource::Records(_) => "records",
            CatalogSource::BuiltinSample => "builtin_sample",
        }
    }
}

impl Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Bundle(path) => write!(f, "bundle {}", path.display()),
            CatalogSource::Records(path) => write!(f, "records {}", path.display()),
            CatalogSource::BuiltinSample => write!(f, "builtin sample"),
        }
    }
}

/// On-disk layout of the precomputed bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogBundle {
    pub movies: Vec<Movie>,
    pub similarity: Vec<Vec<f32>>,
}

/// Immutable movie table aligned with its similarity matrix
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Movie>,
    similarity: Vec<Vec<f32>>,
    source: CatalogSource,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Creates a catalog, rejecting matrices that are not N×N for N movies
    pub fn new(
        movies: Vec<Movie>,
        similarity: Vec<Vec<f32>>,
        source: CatalogSource,
    ) -> AppResult<Self> {
        let n = movies.len();
        if similarity.len() != n {
            return Err(AppError::Catalog(format!(
                "similarity matrix has {} rows for {} movies",
                similarity.len(),
                n
            )));
        }

        if let Some((row, values)) = similarity.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(AppError::Catalog(format!(
                "similarity row {} has {} columns, expected {}",
                row,
                values.len(),
                n
            )));
        }

        Ok(Self {
            movies,
            similarity,
            source,
            loaded_at: Utc::now(),
        })
    }

    /// Creates a catalog where every pair is equally similar.
    /// Ranking then degenerates to catalog order.
    pub fn with_uniform_similarity(movies: Vec<Movie>, source: CatalogSource) -> Self {
        let n = movies.len();
        Self {
            similarity: vec![vec![UNIFORM_SIMILARITY; n]; n],
            movies,
            source,
            loaded_at: Utc::now(),
        }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Index of the first movie whose title matches exactly (case-sensitive)
    pub fn position(&self, title: &str) -> Option<usize> {
        self.movies.iter().position(|m| m.title == title)
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    /// Similarity of `index` to every movie, in catalog order
    pub fn similarity_row(&self, index: usize) -> Option<&[f32]> {
        self.similarity.get(index).map(Vec::as_slice)
    }

    pub fn status(&self) -> CatalogStatus {
        CatalogStatus {
            source: self.source.kind().to_string(),
            movies: self.len(),
            loaded_at: self.loaded_at,
        }
    }
}
