use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "formdesk",
    version,
    about = "Manage lead-generation intake forms and their steps"
)]
pub struct Cli {
    /// Forms API base URL [default: $FORMDESK_API_URL or http://127.0.0.1:3100]
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token for the forms API [default: $FORMDESK_API_TOKEN]
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds [default: $FORMDESK_TIMEOUT_SECS or 30]
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print version information
    Version,

    /// List the field types a step can use, or describe one
    FieldTypes {
        /// Field type to describe (e.g. "radio", "textArea")
        name: Option<String>,
    },

    /// Print the form id derived from a title
    FormId { title: String },

    /// Manage the form catalog
    Forms {
        #[command(subcommand)]
        action: FormCommands,
    },

    /// Manage the steps of a form
    Steps {
        #[command(subcommand)]
        action: StepCommands,
    },

    /// Check lead values against a form's steps
    Leads {
        #[command(subcommand)]
        action: LeadCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum FormCommands {
    /// List all forms
    List,
    /// Create a form; its id is derived from the title
    Create {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Delete a form by its `_id`
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum StepCommands {
    /// List the steps of a form
    List {
        /// The form's `_id`
        form: String,
    },
    /// Add a step from a JSON or YAML file
    Add {
        form: String,
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Replace an existing step with the contents of a JSON or YAML file
    Update {
        form: String,
        step: String,
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Delete a step
    Delete { form: String, step: String },
    /// Validate a step file without sending it
    Check {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum LeadCommands {
    /// Check submitted values against a steps file
    Check {
        /// Steps of the form (a list, or a document with a `steps` key)
        #[arg(long)]
        steps: PathBuf,
        /// Submitted values (a map of field name to value, or `{formTitle, values}`)
        #[arg(long)]
        lead: PathBuf,
    },
}
