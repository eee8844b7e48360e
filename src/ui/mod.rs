pub mod fonts;
pub mod info;
pub mod map;
pub mod panels;
