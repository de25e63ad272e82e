/// Terminal host for the software renderer
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::{debug, info, warn};
use sr3d_core::{obj, Camera, Mesh, NodeId, RenderStats, Scene, Target, Vec3};
use std::collections::HashMap;
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub mod config;
pub mod input;
pub mod renderer;

pub use config::{AppConfig, DisplayConfig, ModelConfig};
pub use input::{Action, InputState};
pub use renderer::BlockRenderer;

/// Build a scene with one mesh instance per model under a fresh root.
///
/// Models naming the same file share one loaded mesh.
pub fn build_scene(models: &[ModelConfig]) -> anyhow::Result<(Scene, NodeId)> {
    let mut scene = Scene::new();
    let root = scene.add_group(None)?;
    let mut meshes: HashMap<Option<PathBuf>, Arc<Mesh>> = HashMap::new();

    for model in models {
        let mesh = match meshes.get(&model.path) {
            Some(mesh) => Arc::clone(mesh),
            None => {
                let mesh = Arc::new(match &model.path {
                    Some(path) => obj::load(path)?,
                    None => Mesh::cube(1.0),
                });
                meshes.insert(model.path.clone(), Arc::clone(&mesh));
                mesh
            }
        };

        let node = scene.add_mesh_instance(Some(root), mesh)?;
        scene.set_position(node, Vec3::from(model.position))?;
        scene.set_rotation(node, Vec3::from(model.rotation_degrees).map(f32::to_radians))?;
        scene.set_scale(node, model.scale)?;
        scene.set_color(node, model.color)?;
    }

    info!("scene ready: {} models, {} distinct meshes", models.len(), meshes.len());
    Ok((scene, root))
}

/// Time allotted to one frame; a zero rate is treated as 1 fps
fn frame_budget(target_fps: u32) -> Duration {
    Duration::from_secs(1) / target_fps.max(1)
}

/// Undo every terminal mode `run` enabled, even when an earlier step fails.
///
/// Returns the first error encountered.
fn restore_terminal<W: Write>(
    out: &mut W,
    reports_release: bool,
    disable_raw_mode: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let flags = if reports_release {
        execute!(out, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let screen = execute!(out, DisableMouseCapture, terminal::LeaveAlternateScreen, cursor::Show);
    let raw = disable_raw_mode();

    flags.and(screen).and(raw)
}

/// Main application state for terminal rendering
pub struct TerminalApp {
    scene: Scene,
    root: NodeId,
    camera: Camera,
    input: InputState,
    renderer: BlockRenderer,
    pixels: Vec<u32>,
    display: DisplayConfig,
    running: bool,
    last_update: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    stats: RenderStats,
}

impl TerminalApp {
    pub fn new(scene: Scene, root: NodeId, camera: Camera, display: DisplayConfig) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let input = InputState::new(false, display.mouse_gain, display.look_step);

        let mut app = Self {
            scene,
            root,
            camera,
            input,
            renderer: BlockRenderer::new(1, 1, 1),
            pixels: Vec::new(),
            display,
            running: true,
            last_update: Instant::now(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            stats: RenderStats::default(),
        };
        app.resize(columns, rows);
        Ok(app)
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        let reports_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if reports_release {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        self.input = InputState::new(reports_release, self.display.mouse_gain, self.display.look_step);
        debug!("key release reporting: {}", reports_release);

        let result = self.main_loop();
        let cleanup = restore_terminal(&mut stdout(), reports_release, terminal::disable_raw_mode);

        result.and(cleanup)
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = frame_budget(self.display.target_fps);
        self.last_update = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                let action = self.input.handle_event(&event);
                self.apply(action);
            }

            // Update
            let dt = frame_start.duration_since(self.last_update).as_secs_f32();
            self.last_update = frame_start;
            self.camera.update_position(&self.input.keys, dt);
            self.input.end_frame();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.running = false,
            Action::Look { dx, dy } => self.camera.update_orientation(dx, dy),
            Action::Resize { columns, rows } => self.resize(columns, rows),
        }
    }

    /// Row 0 holds the status line; the image fills the rest
    fn resize(&mut self, columns: u16, rows: u16) {
        let columns = columns.max(1);
        let image_rows = rows.saturating_sub(1).max(1);
        self.renderer = BlockRenderer::new(columns, image_rows, 1);

        let (width, height) = self.renderer.pixel_size();
        if let Err(err) = self.camera.update_viewport(width, height) {
            warn!("{}", err);
        }
        self.pixels = vec![self.display.background.0; self.renderer.pixel_count()];
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear framebuffer
        match Target::for_camera(&mut self.pixels, &self.camera) {
            Ok(mut target) => target.clear(self.display.background),
            Err(err) => warn!("{}", err),
        }

        // Render scene
        match self.scene.render(self.root, &self.camera, &mut self.pixels) {
            Ok(stats) => self.stats = stats,
            Err(err) => warn!("frame skipped: {}", err),
        }

        // Output to terminal
        let mut stdout = stdout();
        self.renderer.draw(&self.pixels, &mut stdout)?;

        // Status line
        let position = self.camera.position;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "SR3D | FPS: {:.1} | faces {} drawn {} culled | pos ({:.0}, {:.0}, {:.0}) | WASD=Move Arrows/Mouse=Look Q=Quit",
                self.fps,
                self.stats.faces_drawn,
                self.stats.faces_culled,
                position.x,
                position.y,
                position.z
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
