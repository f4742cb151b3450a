// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;
use crate::scenes::SceneKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "scene-loop")]
#[command(about = "Real-time 3D scene runtime", long_about = None)]
pub struct Cli {
    /// Scene to build
    #[arg(long, value_enum, default_value_t = SceneKind::Transforms)]
    pub scene: SceneKind,

    /// JSON config file; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// glTF file for the model scene
    #[arg(long)]
    pub model: Option<PathBuf>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    #[arg(long)]
    pub max_pixel_ratio: Option<f32>,

    /// Hide the debug panel
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

impl Cli {
    /// Layer command-line overrides on top of `config`
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(ratio) = self.max_pixel_ratio {
            config.max_pixel_ratio = ratio;
        }
        if self.no_ui {
            config.show_panel = false;
        }
    }
}
