pub mod animation;
pub mod app;
pub mod canvas;
pub mod editor;
pub mod theme;
