//! Atari 2600 emulator binary.
//!
//! Runs a cartridge headless for a number of frames, optionally
//! saving a screenshot, tracing execution or stopping at a
//! breakpoint.

use std::path::PathBuf;
use std::process;

use emu_atari_2600::{Atari2600, AtariConfig, FrameResult};

struct CliArgs {
    rom_path: Option<PathBuf>,
    frames: u32,
    screenshot_path: Option<PathBuf>,
    record_dir: Option<PathBuf>,
    trace: bool,
    break_address: Option<u16>,
}

fn parse_hex(s: &str) -> Option<u16> {
    let s = s
        .trim_start_matches("0x")
        .trim_start_matches("0X")
        .trim_start_matches('$');
    u16::from_str_radix(s, 16).ok()
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        rom_path: None,
        frames: 200,
        screenshot_path: None,
        record_dir: None,
        trace: false,
        break_address: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rom" => {
                i += 1;
                cli.rom_path = args.get(i).map(PathBuf::from);
            }
            "--frames" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.frames = s.parse().unwrap_or(200);
                }
            }
            "--screenshot" => {
                i += 1;
                cli.screenshot_path = args.get(i).map(PathBuf::from);
            }
            "--record" => {
                i += 1;
                cli.record_dir = args.get(i).map(PathBuf::from);
            }
            "--trace" => {
                cli.trace = true;
            }
            "--break" => {
                i += 1;
                match args.get(i).and_then(|s| parse_hex(s)) {
                    Some(address) => cli.break_address = Some(address),
                    None => {
                        eprintln!("--break needs a hex address");
                        process::exit(1);
                    }
                }
            }
            "--help" | "-h" => {
                eprintln!("Usage: emu-atari-2600 --rom <file> [OPTIONS]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --rom <file>         Cartridge ROM (2K, 4K or 8K F8)");
                eprintln!("  --frames <n>         Number of frames to run [default: 200]");
                eprintln!("  --screenshot <file>  Save a PNG of the last frame");
                eprintln!("  --record <dir>       Record every frame as a PNG");
                eprintln!("  --trace              Disassemble each instruction to stderr");
                eprintln!("  --break <addr>       Stop when PC reaches the hex address");
                process::exit(0);
            }
            other if cli.rom_path.is_none() && !other.starts_with('-') => {
                cli.rom_path = Some(PathBuf::from(other));
            }
            other => {
                eprintln!("Unknown argument: {other}");
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn make_atari(cli: &CliArgs) -> Atari2600 {
    let Some(ref rom_path) = cli.rom_path else {
        eprintln!("No ROM given; see --help");
        process::exit(1);
    };

    let rom = match std::fs::read(rom_path) {
        Ok(rom) => rom,
        Err(e) => {
            eprintln!("Cannot read {}: {e}", rom_path.display());
            process::exit(1);
        }
    };

    match Atari2600::new(&AtariConfig { rom }) {
        Ok(atari) => atari,
        Err(e) => {
            eprintln!("Cannot start {}: {e}", rom_path.display());
            process::exit(1);
        }
    }
}

fn main() {
    let cli = parse_args();
    let mut atari = make_atari(&cli);
    atari.set_trace(cli.trace);

    if let Some(address) = cli.break_address {
        if let Err(e) = atari.run_until(address) {
            eprintln!("CPU fault: {e}");
            process::exit(1);
        }
        eprintln!("Breakpoint at ${address:04X}");
        eprintln!("{}", atari.dump());
        return;
    }

    if let Some(ref dir) = cli.record_dir {
        #[cfg(feature = "native")]
        {
            if let Err(e) = emu_atari_2600::capture::record(&mut atari, dir, cli.frames) {
                eprintln!("Record error: {e}");
                process::exit(1);
            }
            return;
        }
        #[cfg(not(feature = "native"))]
        {
            let _ = dir;
            eprintln!("Recording needs the `native` feature");
            process::exit(1);
        }
    }

    for i in 0..cli.frames {
        match atari.run_frame() {
            Ok(FrameResult::Completed) => {}
            Ok(FrameResult::Quit) => break,
            Err(e) => {
                eprintln!("CPU fault: {e}");
                process::exit(1);
            }
        }
        if i % 60 == 0 {
            eprintln!("Frame {i}: PC=${:04X}", atari.cpu().regs.pc);
        }
    }

    if let Some(ref path) = cli.screenshot_path {
        #[cfg(feature = "native")]
        {
            if let Err(e) = emu_atari_2600::capture::save_screenshot(&atari, path) {
                eprintln!("Screenshot error: {e}");
                process::exit(1);
            }
            eprintln!("Screenshot saved to {}", path.display());
        }
        #[cfg(not(feature = "native"))]
        {
            let _ = path;
            eprintln!("Screenshots need the `native` feature");
            process::exit(1);
        }
    }
}
