use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use archive::{decode_archive, encode_archive, name_hash, CompressionMode, DecodeOptions};
use clap::{Parser, Subcommand, ValueEnum};
use definitions::Domain;
use glob::Pattern;
use jagcfg_tools::{
    decode_domain, entry_file_name, format_decode_pretty, inspect_archive, schema_report,
    InspectReport,
};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jagcfg", version, about = "jagcfg archive and config tools")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Per-entry decompression policy used when reading archives.
    #[arg(long, global = true, value_enum, default_value_t = Policy::Literal)]
    policy: Policy,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the entry id of a name.
    Hash {
        name: String,
    },
    /// Inspect archive headers and entry tables.
    Inspect {
        /// Path to an archive, or a directory of archives.
        path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
    },
    /// Write every entry of an archive to `<id>.bin`.
    Extract {
        archive: PathBuf,
        out_dir: PathBuf,
    },
    /// Re-encode an archive with another compression mode.
    Repack {
        archive: PathBuf,
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = Mode::PerEntry)]
        mode: Mode,
    },
    /// Decode a domain's records.
    Decode {
        archive: PathBuf,
        /// Domain name, e.g. `obj` or `loc`.
        #[arg(long)]
        domain: String,
        /// Only decode this record.
        #[arg(long)]
        id: Option<i32>,
        /// Include properties still at their defaults.
        #[arg(long)]
        all: bool,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Print a domain's opcode table and fingerprint.
    Schema {
        #[arg(long)]
        domain: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Literal,
    SizeAware,
}

impl From<Policy> for DecodeOptions {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Literal => Self::literal(),
            Policy::SizeAware => Self::size_aware(),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    None,
    PerEntry,
    Whole,
}

impl From<Mode> for CompressionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::None => Self::None,
            Mode::PerEntry => Self::PerEntry,
            Mode::Whole => Self::Whole,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let options = DecodeOptions::from(cli.policy);

    match cli.command {
        Command::Hash { name } => {
            let id = name_hash(&name);
            println!("{id} (0x{:08x})", id as u32);
        }
        Command::Inspect { path, glob } => {
            if path.is_dir() {
                for entry in collect_archive_entries(&path, glob.as_deref())? {
                    let bytes = read(&entry.path)?;
                    let report = inspect_archive(&bytes, &options)
                        .with_context(|| format!("inspect {}", entry.path.display()))?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    print_inspect_report(&report);
                }
            } else {
                let bytes = read(&path)?;
                let report = inspect_archive(&bytes, &options)
                    .with_context(|| format!("inspect {}", path.display()))?;
                print_inspect_report(&report);
            }
        }
        Command::Extract { archive, out_dir } => {
            let decoded = load(&archive, &options)?;
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("create dir {}", out_dir.display()))?;
            for entry in &decoded {
                let path = out_dir.join(entry_file_name(entry.id()));
                fs::write(&path, entry.bytes())
                    .with_context(|| format!("write entry {}", path.display()))?;
            }
            println!("extracted {} entries to {}", decoded.len(), out_dir.display());
        }
        Command::Repack { archive, out, mode } => {
            let decoded = load(&archive, &options)?;
            let bytes = encode_archive(&decoded, mode.into()).context("encode archive")?;
            fs::write(&out, &bytes).with_context(|| format!("write archive {}", out.display()))?;
            println!(
                "repacked {} entries ({} bytes) to {}",
                decoded.len(),
                bytes.len(),
                out.display()
            );
        }
        Command::Decode {
            archive,
            domain,
            id,
            all,
            format,
        } => {
            let domain = parse_domain(&domain)?;
            let decoded = load(&archive, &options)?;
            let records = decode_domain(&decoded, domain, id, all)
                .with_context(|| format!("decode {domain} records"))?;
            if let (Some(id), true) = (id, records.is_empty()) {
                bail!("{domain} has no record {id}");
            }
            match format {
                DecodeFormat::Json => {
                    let json = serde_json::to_string_pretty(&records).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_decode_pretty(&records));
                }
            }
        }
        Command::Schema { domain } => {
            let report = schema_report(parse_domain(&domain)?);
            println!("domain: {} fingerprint: 0x{:016x}", report.domain, report.fingerprint);
            for row in &report.rows {
                let default = serde_json::to_string(&row.default).context("serialize default")?;
                println!("  {:>3} {:<28} {:<36} default {default}", row.opcode, row.name, row.codec);
            }
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_domain(name: &str) -> Result<Domain> {
    Domain::from_name(name).with_context(|| {
        let known: Vec<&str> = Domain::ALL.iter().map(|domain| domain.name()).collect();
        format!("unknown domain {name:?}, expected one of {}", known.join(", "))
    })
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read archive {}", path.display()))
}

fn load(path: &Path, options: &DecodeOptions) -> Result<archive::Archive> {
    let bytes = read(path)?;
    decode_archive(&bytes, options).with_context(|| format!("decode archive {}", path.display()))
}

struct ArchiveFile {
    path: PathBuf,
    size: u64,
}

fn collect_archive_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<ArchiveFile>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                debug!(path = %path.display(), "skipping file outside glob");
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(ArchiveFile { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn print_inspect_report(report: &InspectReport) {
    println!(
        "total: {} bytes extracted: {} bytes stored: {} bytes",
        report.total_len, report.extracted_len, report.stored_len
    );
    println!("compression: {}", report.flavour.label());
    println!("entries: {}", report.entries.len());
    for entry in &report.entries {
        let name = entry.name.as_deref().unwrap_or("?");
        let marker = if entry.compressed { " bzip2" } else { "" };
        println!(
            "  {:>11} {:<12} {:>8} -> {:>8}{marker}",
            entry.id, name, entry.stored_len, entry.extracted_len
        );
    }
}
