use anyhow::Context;
use chip8::consts;
use chip8::core::processor::{CycleStatus, Processor};
use chip8::core::quirks::Quirks;
use chip8::core::rom;
use chip8::core::timer::TickClock;
use chip8::external::input::{HostEvent, KeyboardDriver};
use chip8::external::output::DisplayDriver;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

/// Run a CHIP-8 program in an SDL window.
#[derive(Parser, Debug)]
#[command(name = "chip8", version)]
struct Args {
    /// Raw program image, loaded at 0x200
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = consts::DEFAULT_IPS,
          value_parser = clap::value_parser!(u32).range(1..=1_000_000))]
    ips: u32,

    /// Window pixels per CHIP-8 pixel
    #[arg(long, default_value_t = consts::SCALE_FACTOR,
          value_parser = clap::value_parser!(u32).range(1..=64))]
    scale: u32,

    /// Shift Vy into Vx for 8xy6/8xyE, as the COSMAC VIP did
    #[arg(long)]
    shift_uses_vy: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let prog = rom::Rom::from_path(&args.rom)
        .with_context(|| format!("could not load {}", args.rom.display()))?;
    let mut chip8 = Processor::new().with_quirks(Quirks {
        shift_uses_vy: args.shift_uses_vy,
    });
    chip8.load_rom(&prog)?;

    let context = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = DisplayDriver::new(&context, "CHIP-8", args.scale)?;
    let mut keyboard = KeyboardDriver::new(&context)?;

    let mut cpu_clock = TickClock::new(args.ips);
    let mut timer_clock = TickClock::new(consts::TIMER_HZ);
    let mut last = Instant::now();
    let mut sounding = false;

    loop {
        if keyboard.poll(&mut chip8.keyboard_buffer)? == HostEvent::Quit {
            info!("quit requested");
            break;
        }

        let now = Instant::now();
        let elapsed = now - last;
        last = now;

        for _ in 0..cpu_clock.advance(elapsed) {
            match chip8.cycle() {
                CycleStatus::Continue => {}
                // Give the keyboard a chance before retrying Fx0A.
                CycleStatus::Waiting => break,
                CycleStatus::Faulted(fault) => {
                    return Err(fault).context("program halted");
                }
            }
        }
        for _ in 0..timer_clock.advance(elapsed) {
            chip8.tick_timers();
        }

        if chip8.sound_active() != sounding {
            sounding = !sounding;
            debug!("tone {}", if sounding { "on" } else { "off" });
        }
        if chip8.take_redraw() {
            display.draw(chip8.display())?;
        }
        thread::sleep(Duration::from_millis(1));
    }
    Ok(())
}
