//! FOX Board G20 command line tool
//!
//! Drive connector pins, Daisy modules and one-wire sensors from the shell.
//!
//! # Usage
//!
//! ```bash
//! # Show the connector tables
//! fox-daisy connectors list
//! fox-daisy connectors show D2
//!
//! # Raw GPIO by connector pin
//! fox-daisy pin lookup J7 3
//! fox-daisy gpio set J7 3 1
//! fox-daisy gpio get J7 3
//!
//! # Daisy modules
//! fox-daisy daisy relay D5 DIP2 on
//! fox-daisy daisy button D3 P1
//!
//! # One-wire sensors
//! fox-daisy w1 list
//! fox-daisy w1 watch 0000025a1b2c --interval 5
//!
//! # Daisy-24 LCD on I2C bus 0
//! fox-daisy lcd print "Hello" --row 0
//! ```

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use fox_daisy::daisy::{Daisy11, Daisy19, Daisy4, Daisy5, Position};
use fox_daisy::gpio::{Direction, Level, Sysfs};
use fox_daisy::onewire::{Ds18b20, Ds28ea00, W1Bus};
use fox_daisy::pins::{self, Pin};
use fox_daisy::{FoxConfig, HardwareError};

/// FOX Board G20 I/O tool
#[derive(Parser)]
#[command(name = "fox-daisy")]
#[command(version = "0.1.0")]
#[command(about = "GPIO, Daisy module and one-wire access for the FOX Board G20")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Connector pin tables
    #[command(subcommand)]
    Connectors(ConnectorCommands),

    /// Connector pin resolution
    #[command(subcommand)]
    Pin(PinCommands),

    /// Raw GPIO operations
    #[command(subcommand)]
    Gpio(GpioCommands),

    /// GPIO based Daisy modules
    #[command(subcommand)]
    Daisy(DaisyCommands),

    /// One-wire temperature sensors
    #[command(subcommand)]
    W1(W1Commands),

    /// Daisy-24 character LCD (I2C)
    #[cfg(target_os = "linux")]
    #[command(subcommand)]
    Lcd(LcdCommands),

    /// Daisy-22 I/O expander (I2C)
    #[cfg(target_os = "linux")]
    #[command(subcommand)]
    Expander(ExpanderCommands),

    /// Daisy-15 graphic LCD (requires --features serial)
    #[cfg(feature = "serial")]
    #[command(subcommand)]
    Display(DisplayCommands),
}

#[derive(Subcommand)]
enum ConnectorCommands {
    /// List all connectors
    List,

    /// Show the pin table of a connector
    Show {
        /// Connector name
        connector: String,
    },
}

#[derive(Subcommand)]
enum PinCommands {
    /// Resolve a connector pin to its kernel GPIO id
    Lookup {
        /// Connector name (J6, J7, D1..D8)
        connector: String,
        /// Pin label
        pin: String,
    },
}

#[derive(Subcommand)]
enum GpioCommands {
    /// Export a pin
    Export { connector: String, pin: String },

    /// Unexport a pin
    Unexport { connector: String, pin: String },

    /// Set direction (in, out, low, high)
    Direction {
        connector: String,
        pin: String,
        direction: Direction,
    },

    /// Drive a pin
    Set {
        connector: String,
        pin: String,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
        value: u8,
    },

    /// Read a pin
    Get { connector: String, pin: String },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Switch {
    On,
    Off,
    Get,
}

#[derive(Subcommand)]
enum DaisyCommands {
    /// Daisy-4 relay
    Relay {
        connector: String,
        /// DIP1..DIP8
        dip: String,
        #[arg(value_enum)]
        action: Switch,
    },

    /// Daisy-11 LED
    Led {
        connector: String,
        /// L1..L8
        led: String,
        #[arg(value_enum)]
        action: Switch,
    },

    /// Daisy-19 mosfet output
    Mosfet {
        connector: String,
        /// O1..O4
        output: String,
        #[arg(value_enum)]
        action: Switch,
        /// Connector half the module occupies (first, second)
        #[arg(short, long, default_value = "first")]
        position: Position,
    },

    /// Daisy-5 button state
    Button {
        connector: String,
        /// P1..P8
        button: String,
    },
}

#[derive(Subcommand)]
enum W1Commands {
    /// List sensors on the bus
    List {
        /// Family code (28 = DS18B20, 42 = DS28EA00)
        #[arg(short, long, default_value = "28")]
        family: String,
    },

    /// Read one sensor
    Temp {
        /// Sensor serial id (without family prefix)
        id: String,
        /// Sensor is a DS28EA00
        #[arg(long)]
        ds28ea00: bool,
    },

    /// Poll a sensor and print timestamped readings
    Watch {
        id: String,
        #[arg(long)]
        ds28ea00: bool,
        /// Seconds between readings
        #[arg(short, long, default_value = "2")]
        interval: u64,
        /// Stop after this many readings
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },
}

#[cfg(target_os = "linux")]
#[derive(Subcommand)]
enum LcdCommands {
    /// Print text at a position
    Print {
        text: String,
        #[arg(long, default_value = "0")]
        col: u8,
        #[arg(long, default_value = "0")]
        row: u8,
        /// Clear the screen first
        #[arg(long)]
        clear: bool,
    },

    /// Clear the screen
    Clear,
}

#[cfg(target_os = "linux")]
#[derive(Subcommand)]
enum ExpanderCommands {
    /// Set one line high
    On(ExpanderLine),
    /// Set one line low
    Off(ExpanderLine),
    /// Read one line
    Get(ExpanderLine),
    /// Read all eight lines
    Read(ExpanderLine),
    /// Write all eight lines
    Write {
        #[command(flatten)]
        target: ExpanderLine,
        /// Byte value (decimal or 0x-prefixed hex)
        #[arg(value_parser = parse_byte)]
        value: u8,
    },
}

#[cfg(target_os = "linux")]
#[derive(clap::Args)]
struct ExpanderLine {
    /// I2C address
    #[arg(short, long, default_value = "0x20", value_parser = parse_byte)]
    address: u8,
    /// Line 0-7
    #[arg(short, long, default_value = "0")]
    line: u8,
}

#[cfg(feature = "serial")]
#[derive(Subcommand)]
enum DisplayCommands {
    /// Print text at a text position
    Send {
        /// Daisy connector with the display (D1, D2, D3, D5, D6, D8)
        connector: String,
        col: u8,
        row: u8,
        text: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => FoxConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => FoxConfig::default(),
    };

    match cli.command {
        Commands::Connectors(cmd) => handle_connectors(cmd),
        Commands::Pin(PinCommands::Lookup { connector, pin }) => handle_lookup(&connector, &pin),
        Commands::Gpio(cmd) => handle_gpio(cmd, &config),
        Commands::Daisy(cmd) => handle_daisy(cmd, &config),
        Commands::W1(cmd) => handle_w1(cmd, &config),
        #[cfg(target_os = "linux")]
        Commands::Lcd(cmd) => handle_lcd(cmd, &config),
        #[cfg(target_os = "linux")]
        Commands::Expander(cmd) => handle_expander(cmd, &config),
        #[cfg(feature = "serial")]
        Commands::Display(cmd) => handle_display(cmd, &config),
    }
}

fn handle_connectors(cmd: ConnectorCommands) -> Result<()> {
    match cmd {
        ConnectorCommands::List => {
            println!("{}", "=".repeat(60));
            println!("{}", "FOX Board G20 Connectors".cyan().bold());
            println!("{}", "=".repeat(60));

            for name in pins::connector_names() {
                let conn = pins::connector(name)?;
                let serial = pins::serial_port_path(name).unwrap_or("-");
                println!(
                    "\n  {}: {}",
                    name.white().bold(),
                    conn.description
                );
                println!("    GPIO lines: {}", conn.gpio_pins().count());
                println!("    Serial: {}", serial);
            }

            println!("\n{}", "=".repeat(60));
            println!(
                "Use {} to see the pin table",
                "fox-daisy connectors show <connector>".cyan()
            );
        }

        ConnectorCommands::Show { connector } => {
            let conn = pins::connector(&connector)?;

            println!("{}", "=".repeat(50));
            println!("{}", format!("Connector {}", conn.name).cyan().bold());
            println!("{}", "=".repeat(50));
            println!("  {:<6} {:<10} {}", "Pin", "GPIO", "Signal");

            for entry in conn.pins() {
                let gpio = match entry.pin() {
                    Pin::Id(id) => id.to_string().green(),
                    _ => "-".dimmed(),
                };
                println!(
                    "  {:<6} {:<10} {}",
                    entry.label,
                    gpio,
                    entry.signal.unwrap_or("")
                );
            }
        }
    }

    Ok(())
}

fn handle_lookup(connector: &str, pin: &str) -> Result<()> {
    match pins::lookup(connector, pin)? {
        Pin::Id(id) => println!("{}", id),
        other => println!("{} {}", "[N.C.]".yellow(), other),
    }
    Ok(())
}

/// Resolve to a kernel id, refusing power and ground pins
fn gpio_id(connector: &str, pin: &str) -> Result<u32> {
    pins::lookup(connector, pin)?
        .kernel_id()
        .ok_or_else(|| anyhow::anyhow!("{} pin {} has no GPIO line", connector, pin))
}

fn handle_gpio(cmd: GpioCommands, config: &FoxConfig) -> Result<()> {
    let sysfs = Sysfs::from_config(config);

    match cmd {
        GpioCommands::Export { connector, pin } => {
            let id = gpio_id(&connector, &pin)?;
            sysfs.export(id)?;
            println!("{} gpio{} exported", "[OK]".green().bold(), id);
        }

        GpioCommands::Unexport { connector, pin } => {
            let id = gpio_id(&connector, &pin)?;
            sysfs.unexport(id)?;
            println!("{} gpio{} unexported", "[OK]".green().bold(), id);
        }

        GpioCommands::Direction {
            connector,
            pin,
            direction,
        } => {
            let id = gpio_id(&connector, &pin)?;
            sysfs.set_direction(id, direction)?;
            println!("{} gpio{} direction {}", "[OK]".green().bold(), id, direction);
        }

        GpioCommands::Set {
            connector,
            pin,
            value,
        } => {
            let id = gpio_id(&connector, &pin)?;
            sysfs.set_value(id, Level::from(value == 1))?;
            println!("{} gpio{} = {}", "[OK]".green().bold(), id, value);
        }

        GpioCommands::Get { connector, pin } => {
            let pin = pins::lookup(&connector, &pin)?;
            match sysfs.get_value(pin)? {
                Some(value) => println!("{}", value),
                None => println!("{} {}", "[N.C.]".yellow(), pin),
            }
        }
    }

    Ok(())
}

fn print_state(name: &str, on: bool) {
    let state = if on { "on".green().bold() } else { "off".dimmed() };
    println!("{}: {}", name, state);
}

fn handle_daisy(cmd: DaisyCommands, config: &FoxConfig) -> Result<()> {
    let sysfs = Sysfs::from_config(config);

    match cmd {
        DaisyCommands::Relay {
            connector,
            dip,
            action,
        } => {
            let relay = Daisy4::new(sysfs, &connector, &dip)?;
            match action {
                Switch::On => relay.on()?,
                Switch::Off => relay.off()?,
                Switch::Get => {}
            }
            print_state(&dip, relay.get()?);
        }

        DaisyCommands::Led {
            connector,
            led,
            action,
        } => {
            let daisy = Daisy11::new(sysfs, &connector, &led)?;
            match action {
                Switch::On => daisy.on()?,
                Switch::Off => daisy.off()?,
                Switch::Get => {}
            }
            print_state(&led, daisy.get()?);
        }

        DaisyCommands::Mosfet {
            connector,
            output,
            action,
            position,
        } => {
            let out = Daisy19::new(sysfs, &connector, position, &output)?;
            match action {
                Switch::On => out.on()?,
                Switch::Off => out.off()?,
                Switch::Get => {}
            }
            print_state(&output, out.get()?);
        }

        DaisyCommands::Button { connector, button } => {
            let daisy = Daisy5::new(sysfs, &connector, &button)?;
            let state = if daisy.pressed()? {
                "pressed".green().bold()
            } else {
                "released".dimmed()
            };
            println!("{}: {}", button, state);
        }
    }

    Ok(())
}

/// Read either sensor family
fn read_temp(bus: &W1Bus, id: &str, ds28ea00: bool) -> Result<(f64, &'static str)> {
    let reading = if ds28ea00 {
        (Ds28ea00::try_new(bus, id)?.get_temp()?, "raw")
    } else {
        (Ds18b20::try_new(bus, id)?.get_temp()?, "°C")
    };
    Ok(reading)
}

fn handle_w1(cmd: W1Commands, config: &FoxConfig) -> Result<()> {
    let bus = W1Bus::from_config(config);

    match cmd {
        W1Commands::List { family } => {
            let ids = bus.list_family(&family)?;
            if ids.is_empty() {
                println!("{}", "No sensors found".yellow());
                println!("\n{}", "Troubleshooting:".white().bold());
                println!("  1. Check the sensor wiring and pull-up resistor");
                println!("  2. Check that the w1 modules are loaded: lsmod | grep w1");
            } else {
                for id in ids {
                    println!("{}-{}", family.dimmed(), id.white().bold());
                }
            }
        }

        W1Commands::Temp { id, ds28ea00 } => {
            let (value, unit) = read_temp(&bus, &id, ds28ea00)?;
            println!("{:.3} {}", value, unit);
        }

        W1Commands::Watch {
            id,
            ds28ea00,
            interval,
            count,
        } => {
            let mut taken = 0u32;
            loop {
                let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
                match read_temp(&bus, &id, ds28ea00) {
                    Ok((value, unit)) => {
                        println!("{} {} {:.3} {}", format!("[{}]", timestamp).dimmed(), id, value, unit)
                    }
                    Err(e) if matches!(
                        e.downcast_ref::<HardwareError>(),
                        Some(HardwareError::CrcMismatch { .. })
                    ) =>
                    {
                        println!("{} {} {}", format!("[{}]", timestamp).dimmed(), id, "wrong CRC".yellow())
                    }
                    Err(e) => return Err(e),
                }

                taken += 1;
                if count.is_some_and(|n| taken >= n) {
                    break;
                }
                thread::sleep(Duration::from_secs(interval));
            }
        }
    }

    Ok(())
}

#[cfg(target_os = "linux")]
fn handle_lcd(cmd: LcdCommands, config: &FoxConfig) -> Result<()> {
    use fox_daisy::daisy::Daisy24;

    let mut lcd = Daisy24::open(config.i2c_bus)
        .with_context(|| format!("Failed to open LCD on {}", config.i2c_device_path().display()))?;

    match cmd {
        LcdCommands::Print {
            text,
            col,
            row,
            clear,
        } => {
            if clear {
                lcd.clear()?;
            }
            lcd.set_cursor(col, row)?;
            lcd.put_string(&text)?;
        }
        LcdCommands::Clear => lcd.clear()?,
    }

    Ok(())
}

#[cfg(target_os = "linux")]
fn parse_byte(s: &str) -> std::result::Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| format!("invalid byte {:?}: {}", s, e))
}

#[cfg(target_os = "linux")]
fn handle_expander(cmd: ExpanderCommands, config: &FoxConfig) -> Result<()> {
    use fox_daisy::daisy::Daisy22;

    let open = |target: &ExpanderLine| {
        Daisy22::open(config.i2c_bus, target.address, target.line).with_context(|| {
            format!(
                "Failed to open expander {:#04x} on {}",
                target.address,
                config.i2c_device_path().display()
            )
        })
    };

    match cmd {
        ExpanderCommands::On(target) => open(&target)?.on()?,
        ExpanderCommands::Off(target) => open(&target)?.off()?,
        ExpanderCommands::Get(target) => println!("{}", open(&target)?.get()?),
        ExpanderCommands::Read(target) => {
            let value = open(&target)?.read_byte()?;
            println!("{:#04x} ({:08b})", value, value);
        }
        ExpanderCommands::Write { target, value } => open(&target)?.write_byte(value)?,
    }

    Ok(())
}

#[cfg(feature = "serial")]
fn handle_display(cmd: DisplayCommands, config: &FoxConfig) -> Result<()> {
    use fox_daisy::daisy::Daisy15;

    match cmd {
        DisplayCommands::Send {
            connector,
            col,
            row,
            text,
        } => {
            let mut display = Daisy15::open(&connector, config)
                .with_context(|| format!("Failed to open display on {}", connector))?;
            display.send(col, row, &text)?;
            println!("{} Sent to {}", "[OK]".green().bold(), connector);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_gpio_set() {
        let cli = Cli::try_parse_from(["fox-daisy", "gpio", "set", "J7", "3", "1"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Gpio(GpioCommands::Set { value: 1, .. })
        ));
        assert!(Cli::try_parse_from(["fox-daisy", "gpio", "set", "J7", "3", "2"]).is_err());
    }

    #[test]
    fn test_parse_direction() {
        let cli =
            Cli::try_parse_from(["fox-daisy", "gpio", "direction", "D1", "2", "low"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Gpio(GpioCommands::Direction {
                direction: Direction::Low,
                ..
            })
        ));
    }

    #[test]
    fn test_gpio_id_rejects_power_pins() {
        assert_eq!(gpio_id("J7", "3").unwrap(), 82);
        assert!(gpio_id("D1", "1").is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_parse_byte() {
        assert_eq!(parse_byte("0x3E").unwrap(), 0x3E);
        assert_eq!(parse_byte("32").unwrap(), 32);
        assert!(parse_byte("0x100").is_err());
    }
}
