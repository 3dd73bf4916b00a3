pub mod info_pane;
pub mod settings_form;
pub mod typing_area;
