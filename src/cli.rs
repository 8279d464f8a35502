use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args as ClapArgs, Parser, Subcommand};

use etl_console_domain::{DatabaseField, MappingField};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the ETL service, e.g. http://localhost:8080/openmrs/ws/etllite
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Log request activity at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage ETL mappings
    #[command(subcommand)]
    Mappings(MappingsCommand),
    /// Manage source database connections
    #[command(subcommand)]
    Databases(DatabasesCommand),
    /// Inspect or create the settings file
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand, Debug)]
pub enum MappingsCommand {
    /// List all mappings
    List,
    /// Create a mapping
    Create {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        source: Option<String>,
        #[command(flatten)]
        fields: MappingAssignments,
    },
    /// Update fields of an existing mapping
    Update {
        id: i64,
        #[command(flatten)]
        fields: MappingAssignments,
    },
    /// Delete a mapping
    Delete {
        id: i64,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
    /// Run extract and transform for a mapping and show the rows
    Test { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum DatabasesCommand {
    /// List configured databases and the services string
    List,
    /// Add a database and save the configuration
    Add {
        #[arg(long)]
        name: String,
        /// MySQL, MSSQL or PostgreSQL
        #[arg(long = "type")]
        db_type: String,
        /// JDBC URL; defaults to the type's template
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        user: String,
        #[arg(long)]
        password: String,
        /// Connectivity test query
        #[arg(long)]
        query: Option<String>,
    },
    /// Update fields of a database and save the configuration
    Update {
        name: String,
        #[command(flatten)]
        fields: DatabaseAssignments,
    },
    /// Save the configuration, optionally replacing the services string
    Save {
        #[arg(long)]
        services: Option<String>,
    },
    /// Delete a database
    Delete {
        name: String,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
    /// Check that the service can reach a database
    Test { name: String },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print the effective settings
    Show,
    /// Write a settings file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ClapArgs, Debug, Default)]
pub struct MappingAssignments {
    /// Field assignment such as `cronExpression=0 0 * * * ?` (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment::<MappingField>)]
    pub assignments: Vec<(MappingField, String)>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct DatabaseAssignments {
    /// Field assignment such as `url=jdbc:mysql://db:3306/etl` (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment::<DatabaseField>)]
    pub assignments: Vec<(DatabaseField, String)>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct ConfirmArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

fn parse_assignment<F>(raw: &str) -> Result<(F, String), String>
where
    F: FromStr<Err = String>,
{
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{raw}`"))?;
    Ok((field.trim().parse()?, value.to_string()))
}
