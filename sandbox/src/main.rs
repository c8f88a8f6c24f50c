use clap::Parser;

mod bridge;
mod droplets;
mod init;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// RON file with the surface tunables.
    #[arg(short, long)]
    config: Option<String>,

    /// Seed for the ripple decay jitter (entropy when omitted).
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seconds between spawned droplets.
    #[arg(short, long, default_value_t = 1.5)]
    drop_interval: f32,

    /// Write the default tunables to this path as RON, then exit.
    #[arg(long)]
    emit_config: Option<String>,
}

fn main() {
    let args = Args::parse();

    if let Some(path) = args.emit_config {
        if let Err(err) = init::write_default_config(&path) {
            eprintln!("Failed to write default config to {path}: {err}");
            std::process::exit(1);
        }
        println!("Wrote default surface config to {path}");
        return;
    }

    // Validate drop_interval before spinning up the app
    if args.drop_interval <= 0.0 {
        eprintln!("Error: drop_interval must be positive.");
        eprintln!("Got: {}", args.drop_interval);
        std::process::exit(1);
    }

    init::run(args.config, args.seed, args.drop_interval);
}
