pub mod help_bar;
pub mod loading_indicator;
pub mod screen_title;
