use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use scene_loop::cli::Cli;
use scene_loop::config::AppConfig;
use scene_loop::core::{
    AppContext, AppWindow, FrameDriver, InputAction, SurfacePresenter, Viewport, WinitInput,
};
use scene_loop::debug::{self, DebugPanel};
use scene_loop::renderer::SoftwareRenderer;
use scene_loop::{build_scene, SceneSetup, Stage};

// === Runtime ===

/// Everything that exists once a window is up
struct Runtime {
    window: AppWindow,
    presenter: SurfacePresenter,
    input: WinitInput,
    ctx: AppContext<SoftwareRenderer>,
    panel: DebugPanel<Stage>,
    driver: FrameDriver,
    show_panel: bool,
}

impl Runtime {
    fn new(event_loop: &ActiveEventLoop, config: &AppConfig, setup: SceneSetup) -> Result<Self> {
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title(config.window.title.clone())
                    .with_inner_size(winit::dpi::LogicalSize::new(config.window.width, config.window.height)),
            )
            .context("failed to create window")?;
        let window = Arc::new(window);
        let presenter = pollster::block_on(SurfacePresenter::new(window.clone()))?;
        let mut window = AppWindow::new(window);

        let scale_factor = window.scale_factor();
        let size = window.dimensions();
        let viewport = Viewport::with_max_pixel_ratio(size.width, size.height, scale_factor as f32, config.max_pixel_ratio);

        let mut renderer = SoftwareRenderer::new(viewport.width, viewport.height);
        renderer.set_clear_color(config.clear_color()?, config.clear_alpha);

        let ctx = AppContext::new(setup.stage, renderer, viewport);
        let mut driver = FrameDriver::new(config.physics_hz, config.max_physics_steps);
        driver.start(Instant::now(), &mut window);

        Ok(Self {
            window,
            presenter,
            input: WinitInput::new(scale_factor),
            ctx,
            panel: setup.panel,
            driver,
            show_panel: config.show_panel,
        })
    }

    fn redraw(&mut self) {
        if let Err(e) = self.driver.tick(&mut self.ctx, &mut self.window) {
            error!("Render error: {e}");
        }

        let Self { presenter, ctx, panel, driver, show_panel, .. } = self;
        let fps = driver.fps();
        let paused = driver.is_paused();
        let result = presenter.present(ctx.renderer.canvas(), |egui_ctx| {
            show_fps(egui_ctx, fps, paused);
            if *show_panel {
                debug::ui::show_window(egui_ctx, panel, &mut ctx.stage);
            }
        });
        if let Err(e) = result {
            error!("Present error: {e:#}");
        }
    }

    fn apply(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::None => {}
            InputAction::ToggleFullscreen => self.window.toggle_fullscreen(),
            InputAction::TogglePanel => self.show_panel = !self.show_panel,
            InputAction::TogglePause => {
                let paused = self.driver.toggle_pause();
                info!("{}", if paused { "paused" } else { "resumed" });
            }
            InputAction::Exit => {
                self.driver.stop();
                event_loop.exit();
            }
        }
    }
}

fn show_fps(ctx: &egui::Context, fps: f32, paused: bool) {
    egui::Window::new("FPS")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 10.0))
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("{fps:.0}"))
                        .size(24.0)
                        .color(egui::Color32::from_rgb(74, 158, 255)),
                );
                ui.label(egui::RichText::new(if paused { "FPS (paused)" } else { "FPS" }).color(egui::Color32::GRAY));
            });
        });
}

// === Application ===

struct App {
    config: AppConfig,
    setup: Option<SceneSetup>,
    runtime: Option<Runtime>,
}

impl App {
    fn new(config: AppConfig, setup: SceneSetup) -> Self {
        Self { config, setup: Some(setup), runtime: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.runtime.is_some() {
            return;
        }
        let Some(setup) = self.setup.take() else { return };

        match Runtime::new(event_loop, &self.config, setup) {
            Ok(runtime) => self.runtime = Some(runtime),
            Err(e) => {
                error!("Failed to start: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(runtime) = &mut self.runtime else { return };

        // Let egui handle the event first
        if runtime.presenter.on_window_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                runtime.driver.stop();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => runtime.redraw(),
            event => {
                if let WindowEvent::Resized(size) = &event {
                    runtime.presenter.resize(size.width, size.height);
                }
                for input in runtime.input.map(&event, Instant::now()) {
                    let action = runtime.ctx.handle_input(input);
                    runtime.apply(action, event_loop);
                }
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    cli.apply(&mut config);

    let setup = build_scene(cli.scene, cli.model.as_deref()).context("failed to build scene")?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, setup);

    info!("Controls: double-click fullscreen, H panel, Space pause, scroll zoom, Escape quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
