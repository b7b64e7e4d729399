pub mod frame_display;
