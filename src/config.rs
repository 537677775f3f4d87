// Command-line configuration (clap derive).
use crate::types::Operation;
use crate::view::View;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Paint closed loops over a photo to cut it out of its background.
///
/// Hold the left mouse button and draw a loop; releasing closes it.
/// Keys: A/1 add, S/2 subtract, Tab toggle mode, V cycle view,
/// R reset, Enter save mask + cut-out, Esc quit.
#[derive(Parser, Debug)]
#[command(name = "crop-tool", version)]
pub struct Args {
    /// Photo to cut out (PNG, JPEG, WEBP, ...).
    #[arg(value_name = "PHOTO")]
    pub photo: PathBuf,

    /// Directory the mask and cut-out PNGs are written to.
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Largest window width; bigger photos are scaled down.
    #[arg(long, default_value_t = 1024, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_width: u32,

    /// Largest window height; bigger photos are scaled down.
    #[arg(long, default_value_t = 768, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_height: u32,

    /// Mode for the first stroke.
    #[arg(long, value_enum, default_value_t = Mode::Add)]
    pub mode: Mode,

    /// What the window shows at start.
    #[arg(long, value_enum, default_value_t = ViewArg::Overlay)]
    pub view: ViewArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Add,
    Subtract,
}

impl From<Mode> for Operation {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Add => Operation::Union,
            Mode::Subtract => Operation::Subtraction,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Overlay,
    Mask,
    Cutout,
}

impl From<ViewArg> for View {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Overlay => View::Overlay,
            ViewArg::Mask => View::Mask,
            ViewArg::Cutout => View::Cutout,
        }
    }
}

impl Args {
    /// File stem used to name the saved outputs.
    pub fn output_stem(&self) -> String {
        self.photo
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "crop".to_owned())
    }
}
