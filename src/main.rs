use clap::{Args, Parser, Subcommand};
use numfield::codec::{Codec, CodecKind, CodecSpec};
use numfield::config::{Config, FieldRegistry};
use numfield::field::FormattedInput;
use numfield::NumfieldError;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "numfield")]
#[command(about = "Parse, format and edit numbers as typed into an input field", long_about = None)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CodecArgs {
    /// Codec to use: float, percent or si
    #[arg(long, default_value = "float")]
    codec: CodecKind,

    /// Named field from the config file (requires --config)
    #[arg(long)]
    field: Option<String>,

    /// TOML file with a [default] codec and [fields.<name>] codecs
    #[arg(long)]
    config: Option<String>,
}

#[derive(Args)]
struct FormatArgs {
    /// Fractional digits (float, percent)
    #[arg(long)]
    decimals: Option<usize>,

    /// Separator between three-digit groups (float)
    #[arg(long)]
    thousand_sep: Option<String>,

    /// Decimal point to print (float)
    #[arg(long)]
    decimal_point: Option<String>,

    /// Print '+' before non-negative values (float)
    #[arg(long)]
    explicit_plus: bool,

    /// Significant digits (si)
    #[arg(long)]
    significant_digits: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse text the way an input field would
    Parse {
        /// Text as typed (e.g. "2.5k", "1 234,5")
        #[arg(allow_hyphen_values = true)]
        text: String,

        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Format a number for display
    Format {
        /// Number to format
        #[arg(allow_hyphen_values = true)]
        value: f64,

        #[command(flatten)]
        codec: CodecArgs,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Replay input events (focus, blur, edit:<text>) through an editable field
    Edit {
        /// Canonical value held by the owner; omit for "no value"
        #[arg(long, allow_hyphen_values = true)]
        value: Option<f64>,

        /// Feed every parsed value back as the new canonical value
        #[arg(long)]
        accept: bool,

        /// Events in order, e.g. focus "edit:2.5k" blur
        #[arg(required = true, allow_hyphen_values = true)]
        events: Vec<String>,

        #[command(flatten)]
        codec: CodecArgs,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// List the fields defined in a config file
    Fields {
        /// TOML config file
        config: String,
    },
}

#[derive(Serialize)]
struct ParseReport<'a> {
    codec: CodecKind,
    input: &'a str,
    parseable: bool,
    value: Option<f64>,
    formatted: String,
}

enum FieldEvent {
    Focus,
    Blur,
    Edit(String),
}

impl std::str::FromStr for FieldEvent {
    type Err = NumfieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(FieldEvent::Focus),
            "blur" => Ok(FieldEvent::Blur),
            _ => s
                .strip_prefix("edit:")
                .map(|text| FieldEvent::Edit(text.to_string()))
                .ok_or_else(|| {
                    NumfieldError::InvalidArgument(format!(
                        "unknown event '{}' (expected focus, blur or edit:<text>)",
                        s
                    ))
                }),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Parse { text, codec } => parse_text(&text, &codec),
        Commands::Format {
            value,
            codec,
            format,
        } => format_value(value, &codec, &format),
        Commands::Edit {
            value,
            accept,
            events,
            codec,
            format,
        } => replay_events(value, accept, &events, &codec, &format),
        Commands::Fields { config } => list_fields(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Codec spec from (in order) a config field, the config default, or --codec
fn resolve_spec(args: &CodecArgs) -> Result<CodecSpec, Box<dyn std::error::Error>> {
    let spec = match (&args.field, &args.config) {
        (Some(field), Some(path)) => load_registry(path)?.field_spec(field)?.clone(),
        (Some(_), None) => {
            return Err(
                NumfieldError::InvalidArgument("--field requires --config".to_string()).into(),
            )
        }
        (None, Some(path)) => load_registry(path)?.default_spec().clone(),
        (None, None) => args.codec.default_spec(),
    };
    debug!(codec = %spec.kind(), "resolved codec");
    Ok(spec)
}

/// Load a config and compile all of its codecs, so a bad pattern in any field
/// is reported
fn load_registry(path: &str) -> Result<FieldRegistry, Box<dyn std::error::Error>> {
    let config = Config::load_from_file(path)?;
    Ok(FieldRegistry::new(&config)?)
}

fn apply_format_args(spec: &mut CodecSpec, args: &FormatArgs) {
    match spec {
        CodecSpec::Float(settings) => {
            if let Some(decimals) = args.decimals {
                settings.decimals = decimals;
            }
            if let Some(sep) = &args.thousand_sep {
                settings.thousand_sep = sep.clone();
            }
            if let Some(point) = &args.decimal_point {
                settings.decimal_point = point.clone();
            }
            if args.explicit_plus {
                settings.explicit_plus = true;
            }
        }
        CodecSpec::Percent(options) => {
            if let Some(decimals) = args.decimals {
                options.decimals = decimals;
            }
        }
        CodecSpec::Si(settings) => {
            if let Some(digits) = args.significant_digits {
                settings.significant_digits = digits;
            }
        }
    }
}

fn parse_text(text: &str, args: &CodecArgs) -> Result<(), Box<dyn std::error::Error>> {
    let spec = resolve_spec(args)?;
    let codec = spec.build()?;
    let value = codec.parse(text);

    let report = ParseReport {
        codec: codec.kind(),
        input: text,
        parseable: value.is_some(),
        value,
        formatted: codec.format(&value),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn format_value(
    value: f64,
    codec_args: &CodecArgs,
    format_args: &FormatArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut spec = resolve_spec(codec_args)?;
    apply_format_args(&mut spec, format_args);
    let codec = spec.build()?;
    println!("{}", codec.format(&Some(value)));
    Ok(())
}

fn replay_events(
    value: Option<f64>,
    accept: bool,
    events: &[String],
    codec_args: &CodecArgs,
    format_args: &FormatArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let events = events
        .iter()
        .map(|e| e.parse::<FieldEvent>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut spec = resolve_spec(codec_args)?;
    apply_format_args(&mut spec, format_args);
    let codec = spec.build()?;

    let changes: Rc<RefCell<Vec<Option<f64>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    let mut input = FormattedInput::with_codec(value, codec)
        .on_change(move |v| sink.borrow_mut().push(v));

    println!("initial: {:?}", input.text());
    for event in events {
        match event {
            FieldEvent::Focus => {
                input.handle_focus();
                println!("focus: {:?}", input.text());
            }
            FieldEvent::Blur => {
                input.handle_blur();
                println!("blur: {:?}", input.text());
            }
            FieldEvent::Edit(text) => {
                input.handle_change(&text);
                let parsed = changes.borrow().last().copied().flatten();
                match parsed {
                    Some(v) => println!("edit: {:?} (on_change: {})", input.text(), v),
                    None => println!("edit: {:?} (on_change: unparseable)", input.text()),
                }
                if accept {
                    if let Some(v) = parsed.filter(|v| !v.is_nan()) {
                        input.set_value(Some(v));
                    }
                }
            }
        }
    }

    println!("value: {:?}", input.value());
    Ok(())
}

fn list_fields(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let registry = load_registry(path)?;

    println!("Default codec: {}", registry.default_codec().kind());
    println!("\nFields ({}):", registry.list_fields().len());
    for name in registry.list_fields() {
        println!("  - {} ({})", name, registry.codec_for(name).kind());
    }
    Ok(())
}
