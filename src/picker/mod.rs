pub mod state;
pub mod view;
pub mod widget;
