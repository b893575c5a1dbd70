//! Radial contextual action menu: arc layout, touch tracking and the session
//! controller that drives them. Rendering is left to a [`controller::Presenter`].

pub mod macros;

pub mod binding;
pub mod config;
pub mod controller;
pub mod events;
pub mod geometry;
pub mod highlight;
pub mod item;
pub mod menu;
pub mod script;
