//! # CLI Module
//!
//! Command-line access to manifest-driven documentation.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Build the OpenAPI document for a route manifest:
//!
//! ```bash
//! routedoc generate --manifest routes.yaml --output openapi.yaml
//! ```
//!
//! Options:
//! - `--manifest <FILE>` - Route manifest, YAML or JSON (required)
//! - `--output <FILE>` - Write the document here instead of stdout
//! - `--format <json|yaml>` - Output format; inferred from `--output` when omitted
//! - `--default-docs` - Document routes that declare no docs with placeholder models
//! - `--config <FILE>` - Docs configuration (also `ROUTEDOC_CONFIG`)
//!
//! ### `routes`
//!
//! List the documented operations:
//!
//! ```bash
//! routedoc routes --manifest routes.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use routedoc::cli::{execute, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! execute(&cli.command, &mut std::io::stdout())?;
//! ```

mod commands;


pub use commands::{execute, operation_lines, run_cli, Cli, Commands, FormatArg};
