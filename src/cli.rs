//! Minimal CLI: load schema documents → (check | emit)
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use horatio_model::{SchemaDocument, TypeRegistry, emit_schema};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// load JSON schema documents into one type graph, then check or print it
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// more logging (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// report every type reference that does not resolve
    Check(CheckOut),
    /// print the resolved type graph as JSON
    Emit(EmitOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// do not predefine the built-in primitive types
    #[arg(long, default_value_t = false)]
    no_primitives: bool,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

#[derive(clap::Parser, Debug)]
struct EmitOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// emit even when some references do not resolve
    #[arg(long, default_value_t = false)]
    allow_unresolved: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_registry(&self) -> Result<TypeRegistry> {
        let mut registry = if self.no_primitives {
            TypeRegistry::new()
        } else {
            TypeRegistry::with_primitives()
        };
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read(&source_path)
                .with_context(|| format!("failed to read source file ({source_path_str})"))?;
            let document = SchemaDocument::from_json_slice(&source, &source_path_str)?;
            let ids = document
                .load_into(&mut registry)
                .with_context(|| format!("failed to load schema document ({source_path_str})"))?;
            log::info!("{source_path_str}: {} type(s)", ids.len());
        }
        Ok(registry)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn init_logging(&self) {
        let default_level = default_log_level(self.verbose);
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .try_init();
    }

    pub fn run(&self) -> Result<ExitCode> {
        match &self.cmd {
            Command::Check(target) => {
                let registry = target.input_settings.load_registry()?;
                let missing = registry.unresolved();
                if missing.is_empty() {
                    println!("ok: {} type(s), all references resolve", registry.len());
                    return Ok(ExitCode::SUCCESS);
                }
                for entry in &missing {
                    let owner = registry.name_of(entry.owner)?;
                    println!("{owner}: unresolved type reference `{}`", entry.key);
                }
                Ok(ExitCode::FAILURE)
            }
            Command::Emit(target) => {
                let registry = target.input_settings.load_registry()?;
                if !target.allow_unresolved {
                    registry.check()?;
                }
                let schema = emit_schema(&registry);
                let schema_src = serde_json::to_string_pretty(&schema)?;
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(out, &schema_src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    println!("{schema_src}");
                }
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["a.json", "dir/b.json"]).unwrap();
        assert_eq!(paths, [PathBuf::from("a.json"), PathBuf::from("dir/b.json")]);
    }

    #[test]
    fn empty_glob_is_an_error() {
        let err = resolve_file_path_patterns(["/definitely/not/here/*.json"]).unwrap_err();
        assert!(err.to_string().contains("matched no files"));
    }

    #[test]
    fn each_verbose_flag_raises_one_level() {
        let levels: Vec<_> = (0..=4).map(default_log_level).collect();
        assert_eq!(levels, ["warn", "info", "debug", "trace", "trace"]);

        let cli = CommandLineInterface::try_parse_from(["horatio", "-vv", "check", "-i", "a.json"]).unwrap();
        assert_eq!(default_log_level(cli.verbose), "debug");
    }

    #[test]
    fn parses_emit_arguments() {
        let cli = CommandLineInterface::try_parse_from([
            "horatio", "-v", "emit", "-i", "a.json", "b/*.json", "--allow-unresolved",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.cmd {
            Command::Emit(target) => {
                assert_eq!(target.input_settings.input, ["a.json", "b/*.json"]);
                assert!(target.allow_unresolved);
                assert!(target.out.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
