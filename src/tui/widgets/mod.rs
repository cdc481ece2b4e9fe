pub mod badge;
pub mod bar_chart;
pub mod counter;
pub mod header;
pub mod popup;
pub mod ring;
pub mod statusbar;
pub mod tabbar;
