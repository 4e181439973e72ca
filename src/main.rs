use calcuip::config::Settings;
use calcuip::models::ValidationError;
use calcuip::output::{csv_header, csv_rows, render_json, render_report, summary_text};
use calcuip::processing::page_subnets;
use calcuip::{calculate, Calculation};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::process::ExitCode;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Coloured report with the subnet list
    Text,
    /// Plain five-line summary, as copied to the clipboard
    Summary,
    /// JSON report
    Json,
    /// CSV listing of the subnets
    Csv,
}

#[derive(Parser, Debug)]
#[command(version, about = "calcuip - IPv4 network and subnet calculator")]
struct Args {
    /// IPv4 address, host bits allowed (e.g. 192.168.0.5)
    address: String,
    /// Prefix length as /N or N [default: CALCUIP_DEFAULT_PREFIX or /24]
    prefix: Option<String>,
    /// Split the network into subnets of this prefix [default: the network's own]
    #[arg(short, long)]
    subnet_prefix: Option<u8>,
    /// Show this page (1-based) of the subnet list instead of the preview
    #[arg(short, long)]
    page: Option<u64>,
    /// Subnets per page [default: CALCUIP_PAGE_SIZE or 50]
    #[arg(long, requires = "page")]
    page_size: Option<u64>,
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

fn init_logging() {
    if let Err(e) = log4rs::init_file("log4rs.yml", Default::default()) {
        let stderr = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {l} {t} - {m}{n}")))
            .build();
        let config = Config::builder()
            .appender(Appender::builder().build("stderr", Box::new(stderr)))
            .build(Root::builder().appender("stderr").build(LevelFilter::Warn));
        match config {
            Ok(config) => {
                if log4rs::init_config(config).is_ok() {
                    log::debug!("log4rs.yml not loaded ({e}), logging to stderr");
                }
            }
            Err(e) => eprintln!("Error initializing logging: {e}"),
        }
    }
}

fn run(args: &Args) -> Result<String, Box<dyn Error>> {
    let settings = Settings::from_env()?;
    let prefix = args
        .prefix
        .clone()
        .unwrap_or_else(|| format!("/{}", settings.default_prefix));

    let Calculation { result, mut subnets } =
        calculate(&args.address, &prefix, args.subnet_prefix, &settings)?;

    if let Some(page) = args.page {
        let page_size = args.page_size.unwrap_or(settings.page_size).max(1);
        subnets = page_subnets(
            result.network,
            subnets.new_prefix,
            page.saturating_sub(1),
            page_size,
        )?;
    }

    let out = match args.format {
        Format::Text => render_report(&result, &subnets),
        Format::Summary => summary_text(&result),
        Format::Json => render_json(&result, &subnets)? + "\n",
        Format::Csv => {
            let mut lines = vec![csv_header()];
            lines.extend(csv_rows(&subnets));
            lines.join("\n") + "\n"
        }
    };
    Ok(out)
}

fn main() -> ExitCode {
    init_logging();
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    match run(&args) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.downcast_ref::<ValidationError>() {
                Some(v) => {
                    log::warn!("Rejected input {:?} {:?}: {v}", args.address, args.prefix);
                    eprintln!("{}", v.user_message());
                }
                None => {
                    log::error!("{e}");
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::FAILURE
        }
    }
}
