pub mod genres;
pub mod posters;
pub mod recommendations;

pub use genres::GenreIndex;
pub use posters::{PosterResolver, PosterSource};
pub use recommendations::Recommender;
