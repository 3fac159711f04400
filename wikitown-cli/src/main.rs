// Command-line interface for wikitown
//
// This binary converts article markup to and from HTML, inspects how a page renders, and
// reads or writes the page and media stores.
//
// The inspect command is a development aid: it shows the intermediate trees a page goes
// through on its way to the editor and back.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file
// extension, while being overwrittable by an explicit --from flag.
// Usage:
//  wikitown <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  wikitown convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  wikitown inspect <path> [<transform>]     - Execute a transform (defaults to "treeviz")
//  wikitown slug <title>                     - Print the slug for a page title
//  wikitown page show|save|list|categories   - Work with the page store
//  wikitown media <filename>                 - Look up a media file
//  wikitown --list-formats                   - List available formats and transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format/transform.
// Example:
//  wikitown page.wiki --to html --extra-standalone --extra-title "Old Mill"

mod transforms;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wikitown_babel::formats::html::{serialize_to_html_with_options, HtmlFormat, HtmlOptions};
use wikitown_babel::{html_to_markup, slugify, FormatRegistry, UrlBases};
use wikitown_config::{Loader, WikitownConfig, LOCAL_CONFIG_FILE};
use wikitown_store::{ArticleUpdate, DirStore, MediaStore, PageStore, StoreError};

const SUBCOMMANDS: &[&str] = &["inspect", "convert", "slug", "page", "media", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            // Check if the next arg is a value or another flag/end
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("wikitown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and managing wikitown articles")
        .long_about(
            "wikitown is a command-line tool for working with wikitown article markup.\n\n\
            Commands:\n  \
            - convert: Transform between markup, HTML and a tree view\n  \
            - inspect: View the intermediate trees of a page\n  \
            - page:    Show, save, list and categorize stored pages\n  \
            - media:   Look up stored media files\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            wikitown page.wiki --to html                      # Render markup to HTML (stdout)\n  \
            wikitown edited.html --to wiki -o page.wiki       # Turn editor HTML back into markup\n  \
            wikitown inspect page.wiki                        # Tree visualization\n  \
            wikitown page save old-mill page.wiki --title 'Old Mill' --key <secret>"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a wikitown.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("store")
                .long("store")
                .value_name("DIR")
                .help("Store directory (overrides store.root from the configuration)")
                .value_hint(ValueHint::DirPath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the intermediate trees of a page")
                .long_about(
                    "View the structure of a page at different processing stages.\n\n\
                    Transforms:\n  \
                    - treeviz:     IR as tree visualization (default)\n  \
                    - ir-json:     IR as JSON\n  \
                    - edit-tree:   Editable tree as JSON\n  \
                    - round-trip:  Markup a save would store\n\n\
                    Examples:\n  \
                    wikitown inspect page.wiki                  # Tree visualization (default)\n  \
                    wikitown inspect edited.html edit-tree      # What the editor handed back"
                )
                .arg(
                    Arg::new("path")
                        .help("Path to a markup or HTML file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - wiki:     Article markup (.wiki, .txt)\n  \
                    - html:     HTML fragment or standalone page (.html, .htm)\n  \
                    - treeviz:  Tree visualization (output only)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    wikitown convert page.wiki --to html               # Render to HTML (stdout)\n  \
                    wikitown convert edited.html --to wiki -o page.wiki\n  \
                    wikitown page.wiki --to treeviz                    # 'convert' is optional"
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("slug")
                .about("Print the slug a page title is stored and linked under")
                .arg(
                    Arg::new("title")
                        .help("Page title")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("page")
                .about("Work with stored pages")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("show")
                        .about("Print a stored page")
                        .arg(Arg::new("slug").help("Page slug").required(true).index(1))
                        .arg(
                            Arg::new("to")
                                .long("to")
                                .help("Output format")
                                .default_value("wiki")
                                .value_parser(["wiki", "html", "treeviz"]),
                        ),
                )
                .subcommand(
                    Command::new("save")
                        .about("Create or replace a page from a markup or editor HTML file")
                        .long_about(
                            "Create or replace a page.\n\n\
                            HTML input (.html, .htm) is read as an editor snapshot and turned\n\
                            into markup first; any other input is stored as markup verbatim.\n\
                            Saving needs the editor key configured for the store."
                        )
                        .arg(Arg::new("slug").help("Page slug").required(true).index(1))
                        .arg(
                            Arg::new("input")
                                .help("Markup or HTML file")
                                .required(true)
                                .index(2)
                                .value_hint(ValueHint::FilePath),
                        )
                        .arg(
                            Arg::new("title")
                                .long("title")
                                .help("Page title")
                                .required(true),
                        )
                        .arg(Arg::new("summary").long("summary").help("One-line summary"))
                        .arg(Arg::new("category").long("category").help("Category name"))
                        .arg(
                            Arg::new("key")
                                .long("key")
                                .help("Editor key")
                                .value_hint(ValueHint::Other),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List pages ordered by title")
                        .arg(
                            Arg::new("query")
                                .long("query")
                                .short('q')
                                .help("Case-insensitive search over title, summary and content"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Only pages in this category"),
                        ),
                )
                .subcommand(
                    Command::new("categories").about("List categories and their lead images"),
                ),
        )
        .subcommand(
            Command::new("media")
                .about("Print the MIME type and size of a stored media file")
                .arg(
                    Arg::new("filename")
                        .help("Media filename")
                        .required(true)
                        .index(1),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A first argument that is not a flag or a subcommand is taken as a file to convert
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_one::<String>("store").map(|s| s.as_str()),
    );
    init_tracing(&config.log.level);
    tracing::debug!(
        store = %config.store.root.display(),
        media_base = %config.render.media_base,
        wiki_base = %config.render.wiki_base,
        "loaded configuration"
    );
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("treeviz");
            let from = resolve_from(sub_matches, path);
            handle_inspect_command(path, &from, transform, &extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let from = resolve_from(sub_matches, input);
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("slug", sub_matches)) => {
            let title = sub_matches
                .get_one::<String>("title")
                .expect("title is required");
            println!("{}", slugify(title));
        }
        Some(("page", sub_matches)) => handle_page_command(sub_matches, &config),
        Some(("media", sub_matches)) => {
            let filename = sub_matches
                .get_one::<String>("filename")
                .expect("filename is required");
            handle_media_command(filename, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Use --from when given, else detect the format from the file extension
fn resolve_from(sub_matches: &ArgMatches, input: &str) -> String {
    if let Some(from) = sub_matches.get_one::<String>("from") {
        return from.to_string();
    }
    match FormatRegistry::default().detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

/// Registry whose html format uses the configured URL bases
fn configured_registry(config: &WikitownConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::with_defaults();
    registry.register(HtmlFormat::new(UrlBases::from(&config.render)));
    registry
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    from: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &WikitownConfig,
) {
    let source = read_input(path);

    let output = transforms::Source::from_format(from)
        .and_then(|kind| {
            transforms::execute_transform(
                &source,
                kind,
                transform,
                &UrlBases::from(&config.render),
                extra_params,
            )
        })
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &WikitownConfig,
) {
    let registry = configured_registry(config);

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_input(input);

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let mut format_options = HashMap::new();
    if to == "html" && config.convert.html.standalone {
        format_options.insert("standalone".to_string(), "true".to_string());
    }
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }

    let result = registry
        .serialize_with_options(&doc, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    tracing::debug!(
        input,
        from,
        to,
        bytes = result.len(),
        options = format_options.len(),
        "converted document"
    );

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

fn open_store(config: &WikitownConfig) -> DirStore {
    DirStore::new(config.store.root.clone(), config.store.editor_key())
}

fn exit_on_store_error(err: StoreError) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(1);
}

/// Handle the page subcommands
fn handle_page_command(matches: &ArgMatches, config: &WikitownConfig) {
    let store = open_store(config);

    match matches.subcommand() {
        Some(("show", sub_matches)) => {
            let slug = sub_matches
                .get_one::<String>("slug")
                .expect("slug is required");
            let to = sub_matches
                .get_one::<String>("to")
                .map(|s| s.as_str())
                .unwrap_or("wiki");
            handle_page_show(&store, slug, to, config);
        }
        Some(("save", sub_matches)) => {
            let get = |name: &str| sub_matches.get_one::<String>(name).cloned();
            let slug = get("slug").expect("slug is required");
            let input = get("input").expect("input is required");
            let update = ArticleUpdate {
                title: get("title").expect("title is required"),
                content: read_page_input(&input, config),
                summary: get("summary").unwrap_or_default(),
                category: get("category").unwrap_or_default(),
            };
            let key = get("key").unwrap_or_default();
            tracing::debug!(slug = %slug, input = %input, "saving page");

            let article = store
                .upsert(&slug, update, &key)
                .unwrap_or_else(|err| exit_on_store_error(err));
            println!("Saved {} ({} bytes)", article.slug, article.content.len());
        }
        Some(("list", sub_matches)) => {
            let query = sub_matches.get_one::<String>("query").map(|s| s.as_str());
            let category = sub_matches
                .get_one::<String>("category")
                .map(|s| s.as_str());
            let pages = store
                .list(query, category)
                .unwrap_or_else(|err| exit_on_store_error(err));
            for page in pages {
                println!("{}\t{}\t{}", page.slug, page.title, page.category);
            }
        }
        Some(("categories", _)) => {
            let categories = store
                .categories()
                .unwrap_or_else(|err| exit_on_store_error(err));
            for info in categories {
                println!(
                    "{}\t{}",
                    info.category,
                    info.image.as_deref().unwrap_or("-")
                );
            }
        }
        _ => {
            eprintln!("Unknown page subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn handle_page_show(store: &DirStore, slug: &str, to: &str, config: &WikitownConfig) {
    let article = match store.get(slug) {
        Ok(Some(article)) => article,
        Ok(None) => exit_on_store_error(StoreError::NotFound(format!("page '{slug}'"))),
        Err(err) => exit_on_store_error(err),
    };

    match to {
        "html" => {
            let mut options = HtmlOptions::new(UrlBases::from(&config.render));
            if config.convert.html.standalone {
                options = options.standalone(article.title.clone());
            }
            let doc = wikitown_babel::render(&article.content);
            let html = serialize_to_html_with_options(&doc, &options).unwrap_or_else(|e| {
                eprintln!("Serialization error: {e}");
                std::process::exit(1);
            });
            print!("{html}");
        }
        "treeviz" => {
            let doc = wikitown_babel::render(&article.content);
            print!(
                "{}",
                wikitown_babel::formats::treeviz::to_treeviz_str(&doc)
            );
        }
        _ => print!("{}", article.content),
    }
}

/// Read the content to save: editor HTML is turned into markup, anything else is markup
fn read_page_input(path: &str, config: &WikitownConfig) -> String {
    let source = read_input(path);
    let is_html = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));

    if !is_html {
        return source;
    }
    html_to_markup(&source, &UrlBases::from(&config.render)).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    })
}

/// Handle the media command
fn handle_media_command(filename: &str, config: &WikitownConfig) {
    let blob = open_store(config)
        .fetch(filename)
        .unwrap_or_else(|err| exit_on_store_error(err));
    println!("{}\t{} bytes", blob.mime, blob.bytes.len());
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Conversion formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        if let Ok(format) = registry.get(&format_name) {
            println!("  {format_name:<10} {}", format.description());
        }
    }
    println!("\nInspect transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>, store_root: Option<&str>) -> WikitownConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = match store_root {
        Some(root) => loader.set_override("store.root", root),
        None => Ok(loader),
    };
    loader.and_then(Loader::build).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Move config-level extras into the configuration, leaving format options behind
fn apply_config_overrides(
    config: &mut WikitownConfig,
    extra_params: &mut HashMap<String, String>,
) {
    if let Some(base) = extra_params.remove("media-base") {
        config.render.media_base = base;
    }
    if let Some(base) = extra_params.remove("wiki-base") {
        config.render.wiki_base = base;
    }
    if let Some(raw) = extra_params.remove("standalone") {
        config.convert.html.standalone = parse_bool_arg("standalone", &raw);
    }
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
