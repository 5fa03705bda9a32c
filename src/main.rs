use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use lora_modem::app::{DEFAULT_LORA_PORT, DEFAULT_PERIOD};
use lora_modem::types::KEY_LEN;
use lora_modem::{
    AppConfig, Application, Credentials, Eui, Modem, SerialConfig, SimulatedTemperature,
    list_ports, provision,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_SERIAL: &str = "/dev/ttyUSB0";

/// Drive a LoRaWAN modem attached to a USB-serial adapter
#[derive(Parser)]
#[command(name = "lora-modem")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Join the network and send a temperature sample every period
    Run {
        /// Serial port the modem is attached to
        #[arg(short, long, default_value = DEFAULT_SERIAL)]
        serial: String,

        /// Application port for uplinks
        #[arg(short, long, default_value_t = DEFAULT_LORA_PORT)]
        port: u8,

        /// Poll ticks between uplinks
        #[arg(long, default_value_t = DEFAULT_PERIOD)]
        period: u32,

        /// Event poll interval in milliseconds
        #[arg(long, default_value_t = 1000)]
        poll_ms: u64,

        /// Request confirmed uplinks
        #[arg(long)]
        confirmed: bool,
    },
    /// Write device credentials and verify them
    Provision {
        /// Serial port the modem is attached to
        #[arg(short, long, default_value = DEFAULT_SERIAL)]
        serial: String,

        /// Device EUI (16 hex digits)
        #[arg(long)]
        deveui: Eui,

        /// Join EUI (16 hex digits)
        #[arg(long)]
        joineui: Eui,

        /// Network root key (32 hex digits)
        #[arg(long, value_parser = parse_key)]
        nwkkey: [u8; KEY_LEN],
    },
    /// List available serial ports
    Ports,
}

fn parse_key(s: &str) -> Result<[u8; KEY_LEN], String> {
    let bytes = hex::decode(s).map_err(|e| format!("invalid key: {e}"))?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| format!("key must be {KEY_LEN} bytes, got {}", b.len()))
}

fn execute(command: Command) -> lora_modem::Result<()> {
    match command {
        Command::Run {
            serial,
            port,
            period,
            poll_ms,
            confirmed,
        } => {
            let modem = Modem::with_serial_config(SerialConfig::new(serial))?;
            let config = AppConfig::default()
                .lora_port(port)
                .period(period)
                .poll_interval(Duration::from_millis(poll_ms))
                .confirmed(confirmed);
            info!(
                "uplink on port {port} every {period} ticks of {poll_ms} ms{}",
                if confirmed { " (confirmed)" } else { "" }
            );
            Application::new(modem, SimulatedTemperature, config).run()
        }
        Command::Provision {
            serial,
            deveui,
            joineui,
            nwkkey,
        } => {
            let mut modem = Modem::serial(serial)?;
            let credentials = Credentials {
                dev_eui: deveui,
                join_eui: joineui,
                nwk_key: nwkkey,
            };
            provision(&mut modem, &credentials)
        }
        Command::Ports => {
            for port in list_ports()? {
                println!("{port}");
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    match execute(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
