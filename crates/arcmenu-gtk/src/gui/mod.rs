pub mod app;
pub mod demo;
pub mod presenter;
pub mod theme;
pub mod view;
