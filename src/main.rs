//! VM Simulator - Main Entry Point
//!
//! Usage: vmm-sim [OPTIONS] <BACKING_STORE> <ADDRESSES>
//!
//! Translates every logical address of the address file, loading pages from
//! the backing store on demand, and prints one result line per address
//! followed by page fault and TLB statistics.
//!
//! Diagnostics go to standard output and the process exits with status 1
//! if the arguments are wrong, a file cannot be opened, or translation fails.
//! Logging goes to standard error; `RUST_LOG` overrides the level.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use env_logger::{Builder, Env};
use log::warn;

use vmm_sim::backing_store::BackingStore;
use vmm_sim::io::AddressReader;
use vmm_sim::{Result, VmConfig, VmManager, NUM_FRAMES, TLB_ENTRIES};

/// Command-line configuration
#[derive(Parser, Debug)]
#[command(name = "vmm-sim")]
#[command(about = "Demand-paged virtual memory translation simulator")]
#[command(version)]
struct Cli {
    /// Binary file pages are loaded from
    backing_store: PathBuf,

    /// Text file with one logical address per line
    addresses: PathBuf,

    /// Translate without a TLB, going straight to the page table
    #[arg(long)]
    no_tlb: bool,

    /// Number of TLB entries
    #[arg(long, default_value_t = TLB_ENTRIES)]
    tlb_entries: usize,

    /// Number of physical frames
    #[arg(long, default_value_t = NUM_FRAMES)]
    frames: usize,

    /// Log every translation with its outcome
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn vm_config(&self) -> VmConfig {
        VmConfig {
            tlb_enabled: !self.no_tlb,
            tlb_entries: self.tlb_entries,
            frame_count: self.frames,
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                process::exit(0);
            }
            ErrorKind::MissingRequiredArgument
            | ErrorKind::UnknownArgument
            | ErrorKind::TooManyValues
            | ErrorKind::WrongNumberOfValues => {
                println!("Please include the backing store and address file respectively as arguments.");
                process::exit(1);
            }
            _ => {
                let rendered = e.to_string();
                println!("{}", rendered.lines().next().unwrap_or("Invalid arguments"));
                process::exit(1);
            }
        },
    };

    let default_level = if cli.verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format_module_path(false)
        .init();

    // Run the simulator and handle any errors
    if let Err(e) = run(&cli) {
        warn!("session aborted: {}", e);
        println!("{}", e);
        process::exit(1);
    }
}

/// Main logic separated from main() for cleaner error handling
fn run(cli: &Cli) -> Result<()> {
    let config = cli.vm_config();
    config.validate()?;

    // Step 1: Open inputs, backing store first
    let disk = BackingStore::open(&cli.backing_store)?;
    let addresses = AddressReader::open(&cli.addresses)?;

    // Step 2: Translate each address as it is read
    let mut vm = VmManager::new(disk, &config)?;
    let mut out = BufWriter::new(io::stdout().lock());

    for la in addresses {
        let translation = vm.translate_address(la?)?;
        writeln!(out, "{}", translation)?;
    }

    // Step 3: Statistics
    writeln!(out)?;
    writeln!(out, "{}", vm.stats().summary(vm.tlb_enabled()))?;
    out.flush()?;

    Ok(())
}
