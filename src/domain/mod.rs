pub mod article;
pub mod notion;
