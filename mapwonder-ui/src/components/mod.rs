mod landing;
mod map_screen;
mod region_search;

pub use landing::Landing;
pub use map_screen::MapScreen;
pub use region_search::RegionSearch;
