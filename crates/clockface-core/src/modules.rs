pub mod clock_display;
