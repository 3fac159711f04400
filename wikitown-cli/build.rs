use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["ir-json", "treeviz", "edit-tree", "round-trip"];

const FORMATS: &[&str] = &["wiki", "html", "treeviz"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("wikitown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and managing wikitown articles")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect transforms")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("store")
                .long("store")
                .value_hint(ValueHint::DirPath),
        )
        .subcommand(
            Command::new("inspect")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("transform")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
                        ))
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("convert")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(Command::new("slug").arg(Arg::new("title").index(1)))
        .subcommand(
            Command::new("page")
                .subcommand(
                    Command::new("show")
                        .arg(Arg::new("slug").index(1))
                        .arg(
                            Arg::new("to")
                                .long("to")
                                .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                        ),
                )
                .subcommand(
                    Command::new("save")
                        .arg(Arg::new("slug").index(1))
                        .arg(Arg::new("input").index(2).value_hint(ValueHint::FilePath))
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("summary").long("summary"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("key").long("key").value_hint(ValueHint::Other)),
                )
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("query").long("query").short('q'))
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(Command::new("categories")),
        )
        .subcommand(Command::new("media").arg(Arg::new("filename").index(1)));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "wikitown", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "wikitown", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "wikitown", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
