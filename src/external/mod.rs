//! SDL2 host collaborators: a window that renders the framebuffer and a
//! keyboard that feeds the key-state array.
use crate::core::error::VmError;
use thiserror::Error;

pub mod input;
pub mod output;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("SDL error: {0}")]
    Sdl(String),
    #[error(transparent)]
    Window(#[from] sdl2::video::WindowBuildError),
    #[error(transparent)]
    Canvas(#[from] sdl2::IntegerOrSdlError),
    #[error(transparent)]
    Machine(#[from] VmError),
}

impl From<String> for DriverError {
    fn from(message: String) -> Self {
        DriverError::Sdl(message)
    }
}
