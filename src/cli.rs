use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use takeoff_table::table::{ExportKind, FormatOptions, ProjectInfo};

#[derive(Parser, Debug)]
#[command(
    name = "takeoff",
    version,
    about = "Interpret model-generated take-off and BOQ tables"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Parse(ParseArgs),
    Export(ExportArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CurrencyArgs {
    #[arg(long, default_value = "LKR")]
    pub currency_label: String,

    #[arg(long, default_value = "Sri Lankan Rupees")]
    pub currency_name: String,
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Text file to read, or `-` for stdin.
    #[arg(long, default_value = "-")]
    pub input: PathBuf,

    #[command(flatten)]
    pub currency: CurrencyArgs,

    #[arg(long, default_value_t = false)]
    pub unit_after_quantity: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl ParseArgs {
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            currency_label: self.currency.currency_label.clone(),
            currency_name: self.currency.currency_name.clone(),
            unit_after_quantity: self.unit_after_quantity,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportKindArg {
    TakeOff,
    Boq,
}

impl ExportKindArg {
    pub fn as_kind(self) -> ExportKind {
        match self {
            Self::TakeOff => ExportKind::TakeOff,
            Self::Boq => ExportKind::BillOfQuantities,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Text file to read, or `-` for stdin.
    #[arg(long, default_value = "-")]
    pub input: PathBuf,

    #[arg(long, default_value = ".cache/takeoff")]
    pub output_dir: PathBuf,

    /// Name of the analysed drawing; drives the suggested download name.
    #[arg(long)]
    pub source_name: Option<String>,

    #[arg(long, value_enum, default_value_t = ExportKindArg::TakeOff)]
    pub kind: ExportKindArg,

    #[arg(long)]
    pub project_name: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub client: Option<String>,

    #[command(flatten)]
    pub currency: CurrencyArgs,
}

impl ExportArgs {
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            currency_label: self.currency.currency_label.clone(),
            currency_name: self.currency.currency_name.clone(),
            unit_after_quantity: false,
        }
    }

    pub fn project_info(&self) -> ProjectInfo {
        ProjectInfo {
            project_name: self.project_name.clone(),
            location: self.location.clone(),
            client: self.client.clone(),
        }
    }
}
