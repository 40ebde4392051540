//! Command-line interface for ka
//!
//! This module provides the CLI commands and argument parsing, the console
//! output context, and the driver that routes each verb to the package
//! manager or the external toolchain.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::error::{KaResult, ToolchainError};
use crate::package::{Fetcher, PackageManager, Project, ProjectLayout};
use crate::toolchain::{Delegate, ToolchainConfig};

/// A blazing-fast package manager for Orus
#[derive(Parser)]
#[command(name = "ka")]
#[command(about = "A blazing-fast package manager for Orus.")]
#[command(long_about = "ka is a next-generation package manager for the Orus programming language, designed to be fast, reliable, and easy to use.")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Set the working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Initialize a new Orus project
    Init,

    /// Add dependency to orus.toml
    Add {
        /// Dependency in name=version form
        #[arg(value_name = "PACKAGE=VERSION")]
        package: String,
    },

    /// Install dependencies
    Install,

    /// Run the main project file or specified .orus file
    Run {
        /// Source file to run
        #[arg(default_value = "src/main.orus")]
        file: PathBuf,

        /// Arguments to pass to the program
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Builds the Orus project
    Build,

    /// Tests the Orus project
    Test,

    /// Checks for known security issues in dependencies
    Audit,

    /// Integrates with Orus VM's benchmarking system
    Bench,

    /// Generates HTML documentation from Orus source and comments
    Doc,

    /// Formats Orus code
    Fmt,

    /// Authenticates with the registry
    Login,

    /// Logs out from the registry
    Logout,

    /// Publishes the package to the Orus public registry
    Publish,

    /// Removes a package
    Remove {
        package: String,
    },

    /// Runs a script from orus.toml
    RunScript {
        script: String,
    },

    /// Upgrades all packages
    Upgrade,

    /// Manages workspaces
    Workspace,
}

/// CLI execution context
#[derive(Debug, Clone)]
pub struct CliContext {
    pub verbose: bool,
    pub quiet: bool,
}

impl CliContext {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print info message if not quiet
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    /// Print verbose message if verbose mode enabled
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("{} {}", "verbose:".dimmed(), message.dimmed());
        }
    }

    /// Print warning message
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", "warning:".yellow().bold(), message);
        }
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }

    /// Print success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "success:".green().bold(), message);
        }
    }

    /// Create a progress bar, only shown in verbose mode
    pub fn progress_bar(&self, len: u64, message: &str) -> Option<ProgressBar> {
        if self.quiet || !self.verbose {
            return None;
        }

        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message(message.to_string());
        Some(pb)
    }
}

/// Routes parsed commands to their handlers.
///
/// Everything a handler needs is constructed once at startup and owned here;
/// no handler reads the process environment on its own.
pub struct Driver {
    context: CliContext,
    packages: PackageManager,
    toolchain: ToolchainConfig,
    fetcher: Box<dyn Fetcher>,
}

impl Driver {
    pub fn new(
        context: CliContext,
        layout: ProjectLayout,
        toolchain: ToolchainConfig,
        fetcher: Box<dyn Fetcher>,
    ) -> Self {
        Self {
            context,
            packages: PackageManager::new(layout),
            toolchain,
            fetcher,
        }
    }

    /// Execute a command and return the exit status for the process
    pub fn dispatch(&self, command: &Commands) -> KaResult<i32> {
        match command {
            Commands::Init => self.init(),
            Commands::Add { package } => self.add(package),
            Commands::Install => self.install(),
            Commands::Run { file, args } => self.run(file, args),
            Commands::Build => self.require_toolchain("Building project..."),
            Commands::Test => self.require_toolchain("Testing project..."),
            Commands::Audit => self.acknowledge("Auditing dependencies..."),
            Commands::Bench => self.acknowledge("Benchmarking..."),
            Commands::Doc => self.acknowledge("Generating documentation..."),
            Commands::Fmt => self.acknowledge("Formatting code..."),
            Commands::Login => self.acknowledge("Logging in..."),
            Commands::Logout => self.acknowledge("Logging out..."),
            Commands::Publish => self.acknowledge("Publishing package..."),
            Commands::Remove { package } => self.acknowledge(&format!("Removing package {}...", package)),
            Commands::RunScript { script } => self.acknowledge(&format!("Running script {}...", script)),
            Commands::Upgrade => self.acknowledge("Upgrading all packages..."),
            Commands::Workspace => self.acknowledge("Managing workspaces..."),
        }
    }

    fn init(&self) -> KaResult<i32> {
        let report = Project::init(self.packages.layout())?;
        for path in &report.created {
            self.context.verbose(&format!("created {}", path.display()));
        }
        for path in &report.existing {
            self.context.verbose(&format!("kept existing {}", path.display()));
        }
        self.context.info("Initialized new Orus project in the current directory.");
        Ok(0)
    }

    fn add(&self, package: &str) -> KaResult<i32> {
        let (dep, previous) = self.packages.add(package)?;
        if let Some(previous) = previous.filter(|p| *p != dep.locator) {
            self.context.warn(&format!("{} was {}, replacing", dep.name, previous));
        }
        self.context.info(&format!("Added {} {}", dep.name, dep.locator));
        Ok(0)
    }

    fn install(&self) -> KaResult<i32> {
        let report = self.packages.install(&self.context, &*self.fetcher)?;
        if !report.is_empty() {
            self.context.verbose(&format!(
                "{} installed, {} skipped",
                report.installed.len(),
                report.skipped.len()
            ));
        }
        Ok(0)
    }

    /// Delegate a source file to the toolchain and mirror its exit status
    fn run(&self, file: &Path, args: &[String]) -> KaResult<i32> {
        let root = self.packages.layout().root();
        let source = root.join(file);
        if !source.is_file() {
            return Err(ToolchainError::SourceNotFound(file.to_path_buf()).into());
        }

        let program = self.toolchain.locate()?;
        self.context.verbose(&format!("running {} {}", program.display(), file.display()));

        let mut argv = vec![file.as_os_str().to_os_string()];
        argv.extend(args.iter().map(Into::into));
        let termination = Delegate::run(&program, argv, root)?;
        Ok(termination.exit_code())
    }

    fn require_toolchain(&self, message: &str) -> KaResult<i32> {
        let program = self.toolchain.locate()?;
        self.context.verbose(&format!("using toolchain at {}", program.display()));
        self.context.info(message);
        Ok(0)
    }

    fn acknowledge(&self, message: &str) -> KaResult<i32> {
        self.context.info(message);
        Ok(0)
    }
}
