//! GTK demo presenter for `arcmenu`.

pub mod events;
pub mod gui;
pub mod sys;
