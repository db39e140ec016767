use clap::Parser;
use dashdash_lib::dashdash_generate::dash_dash;
use dashdash_lib::{Options, PrefixOrder};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

const DASHDASH_INTRO: &str = r#"
        __           __         __           __
   ____/ /___ ______/ /_  ____/ /___ ______/ /_
  / __  / __ `/ ___/ __ \/ __  / __ `/ ___/ __ \
 / /_/ / /_/ (__  ) / / / /_/ / /_/ (__  ) / / /
 \__,_/\__,_/____/_/ /_/\__,_/\__,_/____/_/ /_/

    `--` shorthand selectors in, CSS custom properties out.
"#;

#[derive(Parser)]
#[command(name = "dashdash")]
#[command(about = "Rewrite `--` shorthand rules into CSS custom property fallbacks")]
struct Args {
    /// Input stylesheets.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON configuration file (`prefixOrder`, `aliases`).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to write rewritten files to. Prints to stdout when omitted.
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Put the selector prefix before the media query prefix.
    #[arg(long)]
    selector_first: bool,

    /// Media query alias, e.g. `--alias "(min-width: 768px)=tablet"`.
    #[arg(long = "alias", value_name = "RAW=REPLACEMENT", value_parser = parse_alias)]
    aliases: Vec<(String, String)>,

    /// Minify the output.
    #[arg(long)]
    minify: bool,
}

fn parse_alias(raw: &str) -> Result<(String, String), String> {
    match raw.rsplit_once('=') {
        Some((query, replacement)) if !query.trim().is_empty() => {
            Ok((query.trim().to_string(), replacement.trim().to_string()))
        }
        _ => Err(format!("expected RAW=REPLACEMENT, got `{}`", raw)),
    }
}

fn load_options(args: &Args) -> dashdash_lib::Result<Options> {
    let mut options = match &args.config {
        Some(path) => Options::from_path(path)?,
        None => Options::default(),
    };
    if args.selector_first {
        options.prefix_order = PrefixOrder::SelectorFirst;
    }
    options.aliases.extend(args.aliases.iter().cloned());
    debug!("using options {:?}", options);
    Ok(options)
}

fn write_output(out_dir: &Path, input: &Path, css: &str) -> std::io::Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let file_name = input.file_name().unwrap_or(input.as_os_str());
    let target = out_dir.join(file_name);
    fs::write(&target, css)?;
    Ok(target)
}

fn main() {
    env_logger::init();
    eprintln!("{}", DASHDASH_INTRO);

    // parse the args given in terminal
    let args: Args = Args::parse();

    let options = match load_options(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    let results = dash_dash::process_files(&args.inputs, &options, args.minify);

    let mut failed = false;
    for (input, result) in args.inputs.iter().zip(results) {
        match result {
            Ok(css) => match &args.out_dir {
                Some(out_dir) => match write_output(out_dir, input, &css) {
                    Ok(target) => eprintln!("Wrote {}", target.display()),
                    Err(e) => {
                        eprintln!("Error writing output for {}: {}", input.display(), e);
                        failed = true;
                    }
                },
                None => print!("{}", css),
            },
            Err(e) => {
                eprintln!("Error processing {}: {}", input.display(), e);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}
