//! The `run` command: hosts the interval clock on a tokio tick loop.
//!
//! The loop owns the single polling registration for the process. Polling
//! happens every `timer.tick_ms`; rendering goes through the display gate;
//! Ctrl-C is the Stop action.

use std::io::Write;
use std::time::Duration;

use chime_core::timer::format_secs;
use chime_core::{
    Config, DisplayGate, Event, IntervalClock, IntervalLength, Notifier, NullNotifier, Presenter,
    SystemClock, Volume,
};
use clap::Args;

#[derive(Args)]
pub struct RunArgs {
    /// Repeat duration in seconds; unparsable or non-positive values fall
    /// back to the 3-second default
    #[arg(long, value_name = "SECS")]
    interval: Option<String>,
    /// Stop after the first ring
    #[arg(long)]
    once: bool,
    /// Stop after N rings
    #[arg(long, value_name = "N", conflicts_with = "once",
          value_parser = clap::value_parser!(u64).range(1..))]
    rings: Option<u64>,
    /// Notification volume (0-100), overriding notifications.volume
    #[arg(long, value_name = "LEVEL")]
    volume: Option<u32>,
    /// Mute the audible cue
    #[arg(long)]
    silent: bool,
    /// Print events as JSON lines instead of the live countdown
    #[arg(long)]
    json: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_loop(args, config))
}

async fn run_loop(args: RunArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let interval = match args.interval.as_deref() {
        Some(raw) => IntervalLength::parse_or_default(Some(raw)),
        None => IntervalLength::new(config.timer.interval_secs).unwrap_or_default(),
    };
    let volume = if args.silent || !config.notifications.enabled {
        Volume::MUTED
    } else {
        args.volume
            .map(Volume::new)
            .unwrap_or(config.notifications.volume)
    };
    let ring_budget = if args.once { Some(1) } else { args.rings };

    let mut notifier: Box<dyn Notifier> = if volume.is_muted() {
        Box::new(NullNotifier)
    } else {
        Box::new(TerminalBell)
    };
    let mut presenter = TerminalPresenter;
    let mut timer = IntervalClock::new(SystemClock, interval);
    let mut gate = DisplayGate::new(config.timer.tick_ms, config.timer.display_window_ms);

    let armed = timer.arm(interval);
    dispatch(&armed, &args, volume, notifier.as_mut());
    if !args.json {
        presenter.show_current_interval(&format_secs(interval.as_secs()));
        if let Some(text) = gate.force(timer.remaining_secs()) {
            presenter.show_remaining(&text);
        }
    }

    // The one polling registration for this run. Re-arming only happens
    // through a fresh `chime run`, so a second ticker cannot exist.
    let mut ticker = tokio::time::interval(Duration::from_millis(config.timer.tick_ms.max(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                for event in timer.poll() {
                    dispatch(&event, &args, volume, notifier.as_mut());
                }
                if let Some(n) = ring_budget {
                    if timer.running() && timer.rings() >= n {
                        // A catch-up burst overshot the budget before the
                        // lazy flag could be set.
                        if let Some(stopped) = timer.stop() {
                            dispatch(&stopped, &args, volume, notifier.as_mut());
                        }
                    } else if timer.rings() + 1 == n {
                        // Read lazily at ring time, exactly like the
                        // "stop after next ring" checkbox.
                        timer.set_stop_after_next_ring(true);
                    }
                }
                if !timer.running() {
                    break;
                }
                if !args.json {
                    if let Some(text) = gate.poll(timer.remaining_ms()) {
                        presenter.show_remaining(&text);
                    }
                }
            }
            _ = &mut ctrl_c => {
                if let Some(stopped) = timer.stop() {
                    dispatch(&stopped, &args, volume, notifier.as_mut());
                }
                break;
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string(&timer.snapshot())?);
    } else {
        println!();
    }
    Ok(())
}

fn dispatch(event: &Event, args: &RunArgs, volume: Volume, notifier: &mut dyn Notifier) {
    if args.json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("event serialization error: {e}"),
        }
    }
    match event {
        Event::TimerArmed { .. } | Event::Ring { .. } => {
            // A dead sound device must not stall ring detection.
            if let Err(e) = notifier.ring(volume) {
                eprintln!("notifier error: {e}");
            }
        }
        _ => {}
    }
    if !args.json {
        match event {
            Event::Ring { seq, .. } => println!("\rring {seq}        "),
            Event::TimerStopped { rings, .. } => println!("\rstopped after {rings} ring(s)"),
            _ => {}
        }
    }
}

/// Rings by writing the terminal bell. The bell has no amplitude control,
/// so zero gain mutes and any positive gain sounds.
struct TerminalBell;

impl Notifier for TerminalBell {
    fn ring(&mut self, volume: Volume) -> Result<(), Box<dyn std::error::Error>> {
        if volume.gain() <= 0.0 {
            return Ok(());
        }
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

/// Rewrites one status line instead of scrolling; the terminal equivalent
/// of swapping a text node.
struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn show_remaining(&mut self, text: &str) {
        print!("\r{text}  ");
        let _ = std::io::stdout().flush();
    }

    fn show_current_interval(&mut self, text: &str) {
        println!("interval {text}s");
    }
}
