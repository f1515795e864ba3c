#[path = "io/document.rs"]
mod document;
#[path = "io/path_data.rs"]
mod path_data;
