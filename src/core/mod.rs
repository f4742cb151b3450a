pub mod canvas;
pub mod clock;
pub mod context;
pub mod driver;
pub mod frame;
pub mod gpu_context;
pub mod input;
pub mod input_adapter;
pub mod scheduler;
pub mod surface_renderer;
pub mod timer;
pub mod viewport;
pub mod window;

pub use canvas::{Canvas, Rgba};
pub use clock::Clock;
pub use context::AppContext;
pub use driver::{FrameDriver, DEFAULT_MAX_PHYSICS_STEPS, DEFAULT_PHYSICS_HZ};
pub use frame::FrameTime;
pub use input::{InputAction, InputEvent, Key, PointerButton, PointerState};
pub use input_adapter::WinitInput;
pub use scheduler::{FrameScheduler, ManualScheduler};
pub use surface_renderer::SurfacePresenter;
pub use timer::{Accumulator, FpsCounter};
pub use viewport::{Viewport, MAX_PIXEL_RATIO};
pub use window::{AppWindow, WindowDimensions};
