pub mod youtube;

pub use youtube::YouTubeExtractor;
