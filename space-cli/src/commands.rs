//! Subcommand handlers

use crate::generator::ProcessGenerator;
use clap::ArgMatches;
use space_config::SpaceConfig;
use space_parser::space::formats::{FormatError, FormatRegistry, TreevizFormatter};
use space_parser::space::generation::{
    append_generated, error_record_text, generate_into, GenerateError, STARTER_TEMPLATE,
};
use space_parser::space::loader::{DocumentLoader, LoaderError};
use space_parser::space::serializer::serialize_with_preamble;
use std::fmt;
use std::io::Read;
use tracing::{info, warn};

/// Error surfaced to the user by a subcommand
#[derive(Debug)]
pub enum CliError {
    Load(LoaderError),
    Format(FormatError),
    Generate(GenerateError),
    Io(std::io::Error),
    Usage(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Load(e) => write!(f, "{}", e),
            CliError::Format(e) => write!(f, "{}", e),
            CliError::Generate(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Usage(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<LoaderError> for CliError {
    fn from(err: LoaderError) -> Self {
        CliError::Load(err)
    }
}

impl From<FormatError> for CliError {
    fn from(err: FormatError) -> Self {
        CliError::Format(err)
    }
}

impl From<GenerateError> for CliError {
    fn from(err: GenerateError) -> Self {
        CliError::Generate(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

type CliResult = Result<(), CliError>;

fn path_of(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-")
}

fn load(path: &str) -> Result<DocumentLoader, CliError> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(DocumentLoader::from_string(source))
    } else {
        Ok(DocumentLoader::from_path(path)?)
    }
}

/// Print to stdout, or write back to the source file with `--write`.
fn emit(matches: &ArgMatches, path: &str, mut text: String) -> CliResult {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    if matches.get_flag("write") {
        if path == "-" {
            return Err(CliError::Usage(
                "--write needs a file path, not stdin".to_string(),
            ));
        }
        std::fs::write(path, text)?;
        info!(path, "wrote document");
    } else {
        print!("{}", text);
    }
    Ok(())
}

pub fn inspect(config: &SpaceConfig, matches: &ArgMatches) -> CliResult {
    let path = path_of(matches);
    let doc = load(path)?.parse();
    if doc.error_count() > 0 {
        warn!(path, errors = doc.error_count(), "document has malformed headers");
    }

    let mut options = config.inspect.treeviz_options();
    options.show_line_numbers |= matches.get_flag("line-numbers");

    let mut registry = FormatRegistry::with_defaults();
    registry.register(TreevizFormatter::new(options));

    let format = matches
        .get_one::<String>("format")
        .unwrap_or(&config.output.format);
    let output = registry.serialize(&doc, format).map_err(|e| match e {
        FormatError::FormatNotFound(name) => CliError::Usage(format!(
            "Format '{}' not found. Available formats: {}",
            name,
            registry.list_formats().join(", ")
        )),
        other => CliError::Format(other),
    })?;

    print!("{}", output);
    Ok(())
}

pub fn format(config: &SpaceConfig, matches: &ArgMatches) -> CliResult {
    let path = path_of(matches);
    let doc = load(path)?.parse();

    let keep_preamble = config.output.keep_preamble || matches.get_flag("keep-preamble");
    let preamble = if keep_preamble { doc.preamble.as_str() } else { "" };

    emit(matches, path, serialize_with_preamble(preamble, &doc.records))
}

pub fn prompt(config: &SpaceConfig, matches: &ArgMatches) -> CliResult {
    let loader = load(path_of(matches))?;
    let command = matches
        .get_one::<String>("command")
        .map(String::as_str)
        .unwrap_or_default();

    let request = config.generation.request(command, Some(loader.source()));
    if matches.get_flag("system") {
        println!("{}", request.system_instruction);
    }
    println!("{}", request.prompt);
    Ok(())
}

pub fn append(config: &SpaceConfig, matches: &ArgMatches) -> CliResult {
    let path = path_of(matches);
    let loader = load(path)?;
    let command = matches
        .get_one::<String>("message")
        .map(String::as_str)
        .unwrap_or_default();
    let exec: Vec<String> = matches
        .get_many::<String>("exec")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let generator = ProcessGenerator::from_args(&exec)
        .ok_or_else(|| CliError::Usage("append needs a generator program".to_string()))?;
    let request = config.generation.request(command, Some(loader.source()));

    let text = match generate_into(&generator, &request, loader.source()) {
        Ok(text) => text,
        Err(e) if matches.get_flag("inline-errors") => {
            warn!(error = %e, "generator failed, appending error record");
            append_generated(loader.source(), &error_record_text(&e))
        }
        Err(e) => return Err(e.into()),
    };

    let doc = space_parser::parse(&text);
    info!(records = doc.record_count(), "document after append");
    emit(matches, path, text)
}

pub fn template() -> CliResult {
    println!("{}", STARTER_TEMPLATE);
    Ok(())
}

pub fn list_formats() -> CliResult {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");
    for (name, description) in registry.describe() {
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
    Ok(())
}
