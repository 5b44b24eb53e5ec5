pub mod attribute_table;
pub mod controls;
pub mod file_select;
pub mod map_canvas;
pub mod modals;
pub mod welcome;
