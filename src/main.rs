//! Tile Sandbox entry point
//!
//! Native builds run a headless session: generate a world, drive it with a
//! scripted 60 Hz input stream and print the area around the actor.
//!
//! Usage: `tile-sandbox [seed] [frames] [config.json] [keep|respawn|snap]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::process::ExitCode;

    use tile_sandbox::{Config, ConfigError, ReseedPolicy, Session, TickInput};

    const DEFAULT_SEED: i32 = 42;
    const DEFAULT_FRAMES: u32 = 600;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frames between scripted jumps
    const JUMP_EVERY: u32 = 45;
    const VIEW_COLS: i32 = 48;
    const VIEW_ROWS: i32 = 20;

    struct Args {
        seed: i32,
        frames: u32,
        config: Option<String>,
        reseed_policy: Option<ReseedPolicy>,
    }

    fn parse_args() -> Result<Args, String> {
        let mut args = std::env::args().skip(1);
        let seed = match args.next() {
            Some(s) => s.parse().map_err(|_| format!("invalid seed: {s}"))?,
            None => DEFAULT_SEED,
        };
        let frames = match args.next() {
            Some(s) => s.parse().map_err(|_| format!("invalid frame count: {s}"))?,
            None => DEFAULT_FRAMES,
        };
        // Remaining args: a reseed policy name and/or a config path
        let mut config = None;
        let mut reseed_policy = None;
        for arg in args {
            match ReseedPolicy::from_str(&arg) {
                Some(policy) => reseed_policy = Some(policy),
                None => config = Some(arg),
            }
        }
        Ok(Args {
            seed,
            frames,
            config,
            reseed_policy,
        })
    }

    /// Walk right, hop periodically, regenerate once halfway through
    fn scripted_input(frame: u32, total: u32) -> TickInput {
        TickInput {
            right: true,
            jump: frame % JUMP_EVERY == 0,
            regenerate: total > 1 && frame == total / 2,
            ..Default::default()
        }
    }

    fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Config::load(path),
            None => Ok(Config::default()),
        }
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        log::info!("Tile Sandbox (native) starting...");

        let args = match parse_args() {
            Ok(args) => args,
            Err(e) => {
                log::error!("{e}");
                eprintln!("usage: tile-sandbox [seed] [frames] [config.json] [keep|respawn|snap]");
                return ExitCode::FAILURE;
            }
        };
        let mut config = match load_config(args.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Config error: {e}");
                return ExitCode::FAILURE;
            }
        };
        if let Some(policy) = args.reseed_policy {
            config.reseed_policy = policy;
        }
        let mut session = match Session::new(config, args.seed) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Failed to start session: {e}");
                return ExitCode::FAILURE;
            }
        };

        let mut token = session.start();
        for frame in 0..args.frames {
            let input = scripted_input(frame, args.frames);
            match session.frame(token, frame as f64 * FRAME_MS, &input) {
                Some(next) => token = next,
                None => break,
            }
        }

        match serde_json::to_string(&session.debug_snapshot()) {
            Ok(json) => log::info!("Final state: {json}"),
            Err(e) => log::warn!("Could not serialize debug snapshot: {e}"),
        }

        let actor = session.actor();
        let ts = session.grid().tile_size();
        let col = (actor.pos.x / ts).floor() as i32;
        let row = (actor.pos.y / ts).floor() as i32;
        println!(
            "seed {} | actor ({:.1}, {:.1}) | grounded {}",
            session.seed(),
            actor.pos.x,
            actor.pos.y,
            actor.on_ground
        );
        print!(
            "{}",
            session
                .grid()
                .ascii(col - VIEW_COLS / 2, row - VIEW_ROWS / 2, VIEW_COLS, VIEW_ROWS)
        );
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds drive `Session::frame` from the host's animation loop
}
