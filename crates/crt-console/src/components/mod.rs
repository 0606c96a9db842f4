pub mod header;
pub mod help_overlay;
pub mod log_panel;
pub mod paste_overlay;
pub mod playlist_panel;
pub mod upload_prompt;
pub mod video_grid;
