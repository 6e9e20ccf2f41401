//! Command-line interface implementation for copydir.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::copier::{TemplateData, TemplateScope};
use crate::error::{Error, Result};
use crate::rename::RenamePolicy;

/// Command-line arguments structure for copydir.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "copydir: copy a directory with optional transformations",
    long_about = None
)]
pub struct Args {
    /// Directory to copy
    #[arg(value_name = "SRC_DIR")]
    pub src_dir: PathBuf,

    /// Existing directory the source is copied below
    #[arg(value_name = "DST_DIR")]
    pub dst_dir: PathBuf,

    /// Template data of the form k1=v1 k2=v2 ...; enables template processing
    #[arg(value_name = "KEYVALS")]
    pub keyvals: Vec<String>,

    /// Rename each dot.something directory to .something
    #[arg(long)]
    pub dot: bool,

    /// Only process files ending in .template; copy everything else verbatim
    #[arg(long)]
    pub only_suffixed: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn rename_policy(&self) -> RenamePolicy {
        RenamePolicy::from_dot_flag(self.dot)
    }

    pub fn template_scope(&self) -> TemplateScope {
        if self.only_suffixed {
            TemplateScope::SuffixedOnly
        } else {
            TemplateScope::AllFiles
        }
    }
}

/// Converts strings of the form `key=value` into template data.
///
/// Each string is split on its first `=`, so values may themselves contain
/// `=`. A repeated key keeps the last value given.
///
/// # Errors
/// * `Error::UsageError` if a string contains no `=`
pub fn parse_key_values<S: AsRef<str>>(keyvals: &[S]) -> Result<TemplateData> {
    let mut data = TemplateData::new();
    for kv in keyvals {
        let kv = kv.as_ref();
        let (key, value) = kv
            .split_once('=')
            .ok_or_else(|| Error::UsageError(format!("missing '=' in {kv}")))?;
        data.insert(key.to_string(), value.to_string());
    }
    Ok(data)
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
