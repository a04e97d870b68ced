pub mod birthday_celebration;
pub mod birthday_form;
pub mod confetti;
pub mod scene_canvas;
pub mod sparkles;
