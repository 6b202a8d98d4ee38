use anyhow::Result;
use clap::Parser;
use geigermon::config::Config;
use geigermon::format::{fmt_duration, fmt_value, Justify};
use geigermon::monitor::{Monitor, Reading};
use geigermon::persist;
use geigermon::source::CounterSource;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "geigermon", about = "sliding-window rate monitor for cumulative pulse counters", version = "0.1")]
struct Cli {
    /// Counter source: a file re-read each tick, or "-" for one running total per stdin line
    #[arg(default_value = "-")]
    source: String,

    /// Sampling interval in milliseconds (overrides config)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Emit one JSON object per sample instead of text lines
    #[arg(long)]
    json: bool,

    /// Read a single sample, print its reading, and exit
    #[arg(long)]
    once: bool,

    /// Do not persist the cumulative count across runs
    #[arg(long)]
    no_persist: bool,

    /// Delete the persisted cumulative count and exit
    #[arg(long)]
    forget: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.config {
        return run_print_config();
    }
    if cli.forget {
        persist::forget();
        println!("Persisted counter state cleared.");
        return Ok(());
    }

    let mut cfg = Config::load();
    if let Some(ms) = cli.interval {
        cfg.general.tick_ms = ms.max(10);
    }
    if cli.no_persist {
        cfg.general.persist = false;
    }

    run_monitor(&cfg, &cli)
}

fn run_monitor(cfg: &Config, cli: &Cli) -> Result<()> {
    let mut source = CounterSource::from_arg(&cli.source);
    let mut mon = Monitor::new(cfg);

    if cfg.general.persist {
        if let Some(saved) = persist::load() {
            eprintln!("geigermon: continuing series from persisted total {}", saved);
            mon.restore(saved);
        }
    }

    let tick = Duration::from_millis(cfg.general.tick_ms.max(10));
    let mut samples: u64 = 0;

    loop {
        match source.read_cumulative() {
            Ok(total) => {
                mon.record(total);
                samples += 1;
                let r = mon.reading();
                if cli.json {
                    print_json(&r);
                } else {
                    print_line(&r);
                }
                if cfg.general.persist {
                    persist::save(mon.total());
                }
            }
            Err(e) => {
                eprintln!("geigermon: {e:#}");
                // A file counter may reappear next tick; a dead stdin
                // stream will not.
                if matches!(source, CounterSource::Stdin) {
                    break;
                }
            }
        }

        if cli.once {
            break;
        }
        // Stdin paces itself by line arrival; only file sources poll.
        if matches!(source, CounterSource::File(_)) {
            std::thread::sleep(tick);
        }
    }

    let monitored_secs = samples * cfg.general.tick_ms / 1000;
    eprintln!(
        "geigermon: stopped after {} sample(s) ({}), final total {}",
        samples,
        fmt_duration(monitored_secs),
        mon.total()
    );
    Ok(())
}

fn print_line(r: &Reading) {
    let now = chrono::Local::now().format("%H:%M:%S");
    let dose = match r.dose {
        Some(l) => format!("  [{}] {}", l.severity.label(), l.long_label.trim_end()),
        None    => String::new(),
    };
    // '~' marks readings whose window is not fully backed by history yet.
    let marker = if r.significant { ' ' } else { '~' };
    println!(
        "{} {}{} cpm {}  {} uSv/h{}",
        now,
        marker,
        fmt_value(r.cpm, 0, 6, Justify::Right),
        r.trend.glyph(),
        fmt_value(r.usv_h, 3, 8, Justify::Right),
        dose
    );
}

fn print_json(r: &Reading) {
    use serde_json::json;

    let obj = json!({
        "timestamp":    chrono::Local::now().to_rfc3339(),
        "total":        r.total,
        "cpm":          r.cpm,
        "avg_cpm":      r.avg_cpm,
        "usv_per_hour": r.usv_h,
        "msv_per_year": r.msv_year,
        "trend":        r.trend.label(),
        "significant":  r.significant,
        "dose": r.dose.map(|l| json!({
            "threshold_msv_year": l.msv_per_year,
            "label":              l.long_label.trim_end(),
            "severity":           l.severity.label(),
        })),
    });
    println!("{}", obj);
}

fn run_print_config() -> Result<()> {
    let cfg = Config::load();
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  tick_ms  = {}", cfg.general.tick_ms);
    println!("  capacity = {}", cfg.general.capacity);
    println!("  persist  = {}", cfg.general.persist);
    println!();
    println!("[tube]");
    println!("  cpm_per_usv_h = {}", cfg.tube.cpm_per_usv_h);
    println!();
    println!("[windows]");
    println!("  short_ticks = {}", cfg.windows.short_ticks);
    println!("  long_ticks  = {}", cfg.windows.long_ticks);
    Ok(())
}
