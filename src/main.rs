use buspro_rs::util::hex::{encode_hex, parse_hex_lenient};
use buspro_rs::{
    build_status_request, decode_telegram, init_logger, log_info, pack_frame, BusConfig,
    SensorConfig, SensorIdentity, SensorState, SensorType,
};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "buspro-cli")]
#[command(about = "CLI tool for HDL Buspro sensor telegrams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one bus frame or UDP datagram
    Decode { hex: String },
    /// Feed frames through a sensor and print its state
    Apply {
        #[command(flatten)]
        sensor: SensorArgs,
        #[arg(required = true)]
        frames: Vec<String>,
    },
    /// Print the status request frame for a sensor
    Request {
        #[command(flatten)]
        sensor: SensorArgs,
    },
}

#[derive(Args)]
struct SensorArgs {
    /// "subnet.device" or "subnet.device.channel"
    #[arg(short, long)]
    address: String,
    /// Device kind: dlp, dry_contact, sensors_in_one, pir, 12in1, 8in1
    #[arg(short, long, default_value = "")]
    device: String,
    #[arg(short, long)]
    universal_switch: Option<u8>,
    #[arg(short, long)]
    switch: Option<u8>,
}

impl SensorArgs {
    fn identity(&self) -> anyhow::Result<SensorIdentity> {
        let config = SensorConfig {
            address: self.address.clone(),
            name: String::new(),
            sensor_type: SensorType::Temperature,
            device: self.device.clone(),
            scan_interval: 0,
            offset: 0,
        };
        let mut identity = config.identity()?;
        identity.universal_switch_number = self.universal_switch;
        identity.switch_number = self.switch;
        Ok(identity)
    }
}

/// Applies every frame in order. A frame that fails to parse or decode is logged
/// and skipped; the frames after it are still applied.
fn apply_frames(identity: &SensorIdentity, frames: &[String]) -> SensorState {
    let mut state = SensorState::new();
    for (index, frame) in frames.iter().enumerate() {
        let bytes = match parse_hex_lenient(frame) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("frame {index}: not valid hex: {e}");
                continue;
            }
        };
        let telegram = match decode_telegram(&bytes) {
            Ok(telegram) => telegram,
            Err(e) if e.is_silent() => {
                log::debug!("frame {index}: ignored: {e}");
                continue;
            }
            Err(e) => {
                log::warn!("frame {index}: {e}");
                continue;
            }
        };
        match state.apply(identity, &telegram) {
            Ok(true) => log_info(&format!(
                "frame {index}: applied {:?}",
                telegram.operate_code
            )),
            Ok(false) => log_info(&format!("frame {index}: ignored")),
            Err(e) => log::warn!("frame {index}: {e}"),
        }
    }
    state
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { hex } => {
            let bytes = parse_hex_lenient(&hex)?;
            let telegram = decode_telegram(&bytes)?;
            println!("{telegram:#?}");
        }
        Commands::Apply { sensor, frames } => {
            let identity = sensor.identity()?;
            let state = apply_frames(&identity, &frames);

            println!("sensor:        {identity}");
            println!("flavor:        {:?}", identity.flavor());
            match state.temperature(identity.kind) {
                Some(temperature) => println!("temperature:   {temperature}"),
                None => println!("temperature:   unknown"),
            }
            println!("brightness:    {}", state.brightness());
            println!("movement:      {}", state.movement());
            println!("dry contact 1: {}", state.dry_contact_1_is_on());
            println!("dry contact 2: {}", state.dry_contact_2_is_on());
            println!("universal sw:  {}", state.universal_switch_is_on());
            println!("channel:       {}", state.single_channel_is_on());
            println!("switch:        {}", state.switch_status_is_on());
        }
        Commands::Request { sensor } => {
            let identity = sensor.identity()?;
            let request = build_status_request(&identity);
            let frame = pack_frame(&request.to_telegram(&BusConfig::default()))?;
            log_info(&format!("{request:?}"));
            println!("{}", encode_hex(&frame));
        }
    }

    Ok(())
}
