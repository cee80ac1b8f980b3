pub mod header;
pub mod status_bar;
pub mod summary_view;
