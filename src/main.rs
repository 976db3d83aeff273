// Allow unused code for designed-but-not-yet-used APIs
#![allow(dead_code)]

mod config;
mod control;
mod display;
mod fb;
mod stimulus;
mod util;

use config::{Measurements, RigProfile, DEFAULT_PROFILE_PATH};
use control::{Command, Controller};
use display::{draw_text, Display, InputEvent, PixelBuffer, RenderTarget};
use sdl2::keyboard::Keycode;
use stimulus::{CalibrationBoard, Stimulus, SweepMarker};
use util::FpsCounter;

#[derive(PartialEq)]
enum AppMode {
    Sweep,
    Calibration,
}

struct Options {
    /// Positional <distance_mm> <box_width_mm>, if given
    argv_measurements: Option<Measurements>,
    profile_path: String,
    mirror_device: Option<String>,
    vsync: bool,
}

/// Parse command line arguments.
/// Unparseable positional values become 0 and force calibration mode,
/// matching how the original rig treated bad argv.
fn parse_args(args: &[String]) -> Options {
    let mut opts = Options {
        argv_measurements: None,
        profile_path: DEFAULT_PROFILE_PATH.to_string(),
        mirror_device: None,
        vsync: true,
    };
    let mut positional: Vec<u32> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => opts.vsync = false,
            "--fb" => {
                if i + 1 < args.len() {
                    opts.mirror_device = Some(args[i + 1].clone());
                    i += 1;
                }
            },
            "--profile" => {
                if i + 1 < args.len() {
                    opts.profile_path = args[i + 1].clone();
                    i += 1;
                }
            },
            "--help" => {
                println!(
                    "Usage: saccade [OPTIONS] [<distance_to_screen_mm> <calibration_box_width_mm>]"
                );
                println!();
                println!("Without both measurements the display starts in calibration-only mode.");
                println!();
                println!("Options:");
                println!("  --fb DEV        Mirror the calibration frame once to a framebuffer");
                println!("                  device at startup (e.g. /dev/fb1)");
                println!(
                    "  --profile PATH  Rig profile file (default: {})",
                    DEFAULT_PROFILE_PATH
                );
                println!("  --no-vsync      Disable VSync for uncapped framerate");
                println!("  --help          Show this help message");
                std::process::exit(0);
            },
            other => positional.push(other.parse().unwrap_or(0)),
        }
        i += 1;
    }

    if !positional.is_empty() {
        opts.argv_measurements = Some(Measurements {
            distance_mm: positional.first().copied().unwrap_or(0),
            box_width_mm: positional.get(1).copied().unwrap_or(0),
        });
    }

    opts
}

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    let invoked_as = args
        .first()
        .cloned()
        .unwrap_or_else(|| "saccade".to_string());
    let opts = parse_args(&args);

    let profile = RigProfile::load(&opts.profile_path).unwrap_or_default();
    let measurements = profile.merged(opts.argv_measurements);
    let force_calibration = !measurements.is_complete();
    if force_calibration {
        eprintln!(
            "No usable rig measurements on the command line or in {}",
            opts.profile_path
        );
        eprintln!("Starting in calibration only mode");
    }

    // One-shot mirror onto the secondary TFT, before the main surface comes up.
    // A configured-but-broken panel is a setup error, so this is fatal.
    let mirror_device = opts
        .mirror_device
        .clone()
        .or_else(|| profile.mirror_device.clone());
    if let Some(device) = mirror_device {
        fb::mirror_calibration(&device).map_err(|e| e.to_string())?;
    }

    let (mut display, texture_creator) = Display::fullscreen("saccade", opts.vsync)?;
    let width = display.width();
    let height = display.height();
    let mut target = RenderTarget::with_size(&texture_creator, width, height)?;
    let mut buffer = PixelBuffer::with_size(width, height);

    // FPS counter with 60 sample rolling average
    let mut fps_counter = FpsCounter::new(60);
    let mut show_fps = false;

    let mut sweep = SweepMarker::new();
    let board = CalibrationBoard::new(&measurements, &invoked_as);

    let controller = match Controller::new() {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Remote control disabled: {}", e);
            None
        },
    };

    println!("=== saccade ===");
    println!("Resolution: {}x{}", width, height);
    if opts.vsync {
        println!("VSync: ON (locked to panel refresh). Use --no-vsync for uncapped.");
    } else {
        println!("VSync: OFF (uncapped framerate)");
    }
    println!(
        "Distance to screen: {} mm, calibration box width: {} mm",
        measurements.distance_mm, measurements.box_width_mm
    );
    if controller.is_some() {
        println!("Remote control: {}", Controller::socket_path());
    }
    println!("Controls:");
    println!("  + / -      - Sweep speed up / down");
    println!("  C          - Toggle calibration board");
    println!("  F          - Toggle FPS display");
    println!("  Q, Escape  - Quit");

    let mut mode = if force_calibration {
        AppMode::Calibration
    } else {
        AppMode::Sweep
    };

    'main: loop {
        let (dt, avg_fps) = fps_counter.tick();

        for event in display.poll_events() {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::KeyDown(key) => match key {
                    Keycode::Escape | Keycode::Q => break 'main,
                    Keycode::Plus | Keycode::KpPlus => {
                        println!("speed up to {}", sweep.faster());
                    },
                    Keycode::Minus | Keycode::KpMinus => {
                        println!("speed down to {}", sweep.slower());
                    },
                    Keycode::C => {
                        mode = if mode == AppMode::Sweep {
                            AppMode::Calibration
                        } else {
                            AppMode::Sweep
                        };
                        let active = if mode == AppMode::Calibration {
                            board.name()
                        } else {
                            sweep.name()
                        };
                        println!("Pressed c, toggled to {}", active);
                        if force_calibration {
                            println!("Measurements missing, calibration board stays up");
                        }
                    },
                    Keycode::F => show_fps = !show_fps,
                    other => {
                        println!("Key {} has no function attached", other.name());
                    },
                },
            }
        }

        if let Some(controller) = &controller {
            for cmd in controller.poll() {
                match cmd {
                    Command::ToggleCalibration => {
                        mode = if mode == AppMode::Sweep {
                            AppMode::Calibration
                        } else {
                            AppMode::Sweep
                        };
                        println!("Remote toggle calibration");
                    },
                    Command::Faster => println!("speed up to {}", sweep.faster()),
                    Command::Slower => println!("speed down to {}", sweep.slower()),
                    Command::ToggleFps => show_fps = !show_fps,
                    Command::Quit => break 'main,
                }
            }
        }

        // Exactly one of the two draw states renders each frame; missing
        // measurements pin the board regardless of the toggle
        let calibrating = mode == AppMode::Calibration || force_calibration;
        if !calibrating {
            sweep.update(dt);
        }
        let active: &dyn Stimulus = if calibrating { &board } else { &sweep };
        active.render(&mut buffer);

        // FPS overlay (press F to toggle)
        if show_fps {
            let (min_fps, max_fps) = fps_counter.min_max_fps();
            let ms = fps_counter.avg_frame_time_ms();
            let fps_text = format!(
                "FPS {} AVG  {} MIN  {} MAX  {}MS",
                avg_fps as u32, min_fps as u32, max_fps as u32, ms as u32
            );
            // Draw at bottom of screen with shadow for visibility
            let y = buffer.height() as i32 - 12;
            draw_text(&mut buffer, 5, y + 1, &fps_text, 0, 0, 0);
            draw_text(&mut buffer, 4, y, &fps_text, 255, 255, 0);
        }

        display.present(&mut target, &buffer)?;
    }

    Ok(())
}
