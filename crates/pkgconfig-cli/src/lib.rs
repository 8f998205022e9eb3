//! gen-dart-package-config library - expose modules for testing

pub mod common;
pub mod generate;
