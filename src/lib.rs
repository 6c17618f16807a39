//MIT License
pub mod expressions;
pub mod series;
pub mod utils;
