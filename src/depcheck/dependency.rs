//! Dependency descriptors.
//!
//! A [`Dependency`] is one checkable external requirement: human-facing
//! metadata, a single verification routine and a platform dispatch table
//! for install instructions. Descriptors are assembled with a
//! [`DependencyBuilder`], usually inside a closure handed to
//! [`DependencyRegistry::define`](super::DependencyRegistry::define).
//!
//! # Example
//!
//! ```
//! use platform_probe::depcheck::{apt_get_install, Dependency};
//!
//! let gcc = Dependency::builder("gcc")
//!     .name("GNU C compiler")
//!     .website("http://gcc.gnu.org/")
//!     .check_for_command("gcc")
//!     .on("debian", || apt_get_install("build-essential"))
//!     .build()
//!     .unwrap();
//!
//! let tags = vec!["ubuntu".to_string(), "debian".to_string()];
//! assert_eq!(
//!     gcc.install_instructions(&tags),
//!     "Please install it with apt-get install build-essential"
//! );
//! ```

use std::fmt;
use std::sync::{Mutex, OnceLock};

use super::compile::{CompiledProbe, Language};
use super::dispatch::{DispatchTable, DispatchTag};
use super::host::Host;
use super::loadable::check_loadable_library;
use super::status::CheckOutcome;
use super::version::check_command_version;
use crate::error::{ProbeError, Result};

/// Generic advice when nothing better is known.
pub const SEARCH_FALLBACK: &str = "Search for it on the web.";

/// A dependency's verification routine.
pub type CheckFn = Box<dyn Fn(&dyn Host) -> Result<CheckOutcome> + Send + Sync>;

/// One checkable external requirement.
pub struct Dependency {
    identifier: String,
    name: Option<String>,
    website: Option<String>,
    website_comments: Option<String>,
    install_instructions: Option<String>,
    checker: CheckFn,
    dispatch: DispatchTable,
    check_result: Mutex<Option<CheckOutcome>>,
    resolved_instructions: OnceLock<String>,
}

impl Dependency {
    /// Start describing the dependency registered as `identifier`.
    pub fn builder(identifier: impl Into<String>) -> DependencyBuilder {
        DependencyBuilder::new(identifier)
    }

    /// Registry key, possibly carrying a version constraint (`"cmake >= 3.10"`).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Human-facing name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name to show users: the explicit name or else the identifier.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.identifier)
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn website_comments(&self) -> Option<&str> {
        self.website_comments.as_deref()
    }

    /// Run the verification routine, at most once per instance.
    ///
    /// A routine that fails (e.g. no temp executable directory for a
    /// compile probe) leaves the dependency unchecked so the error
    /// surfaces again on the next call.
    pub fn check(&self, host: &dyn Host) -> Result<CheckOutcome> {
        let mut slot = self.check_result.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(outcome) = slot.as_ref() {
            return Ok(outcome.clone());
        }

        let outcome = (self.checker)(host)?;
        tracing::debug!(
            "Checked {}: {}{}",
            self.identifier,
            outcome.status,
            outcome
                .detail
                .as_deref()
                .map(|d| format!(" ({})", d))
                .unwrap_or_default()
        );
        *slot = Some(outcome.clone());
        Ok(outcome)
    }

    /// The memoized check result, if [`check`](Self::check) has run.
    pub fn checked(&self) -> Option<CheckOutcome> {
        self.check_result
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Install instructions for a machine with the given platform tags.
    ///
    /// Precedence: the dispatch entry for the platform, then explicit
    /// instructions, then a pointer to the website, then generic advice.
    /// Resolved once; later calls return the first answer.
    pub fn install_instructions(&self, platform_tags: &[String]) -> String {
        self.resolved_instructions
            .get_or_init(|| {
                self.dispatch
                    .resolve(platform_tags)
                    .unwrap_or_else(|| self.fallback_instructions())
            })
            .clone()
    }

    /// Install instructions for the host's own platform tags.
    pub fn resolve_install_instructions(&self, host: &dyn Host) -> String {
        self.install_instructions(&host.platform_tags())
    }

    fn fallback_instructions(&self) -> String {
        if let Some(instructions) = &self.install_instructions {
            instructions.clone()
        } else if let Some(website) = &self.website {
            let mut text = format!("Please download it from {}", website);
            if let Some(comments) = &self.website_comments {
                text.push_str(&format!("\n({})", comments));
            }
            text
        } else {
            SEARCH_FALLBACK.to_string()
        }
    }
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependency")
            .field("identifier", &self.identifier)
            .field("name", &self.name)
            .field("website", &self.website)
            .field("dispatch", &self.dispatch)
            .field("check_result", &self.checked())
            .finish_non_exhaustive()
    }
}

/// Assembles a [`Dependency`].
pub struct DependencyBuilder {
    identifier: String,
    name: Option<String>,
    website: Option<String>,
    website_comments: Option<String>,
    install_instructions: Option<String>,
    checkers: Vec<CheckFn>,
    dispatch: DispatchTable,
}

impl DependencyBuilder {
    /// Start an empty descriptor for `identifier`.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: None,
            website: None,
            website_comments: None,
            install_instructions: None,
            checkers: Vec::new(),
            dispatch: DispatchTable::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn website(mut self, url: impl Into<String>) -> Self {
        self.website = Some(url.into());
        self
    }

    pub fn website_comments(mut self, comments: impl Into<String>) -> Self {
        self.website_comments = Some(comments.into());
        self
    }

    /// Instructions used when no dispatch entry matches.
    pub fn install_instructions(mut self, text: impl Into<String>) -> Self {
        self.install_instructions = Some(text.into());
        self
    }

    /// Use an arbitrary verification routine.
    pub fn checker<F>(mut self, check: F) -> Self
    where
        F: Fn(&dyn Host) -> Result<CheckOutcome> + Send + Sync + 'static,
    {
        self.checkers.push(Box::new(check));
        self
    }

    /// Available when `command` is an executable on `PATH`; detail is its path.
    pub fn check_for_command(self, command: impl Into<String>) -> Self {
        let command = command.into();
        self.checker(move |host| {
            Ok(match host.find_command(&command) {
                Some(path) => CheckOutcome::available_with(path.display().to_string()),
                None => CheckOutcome::unavailable(),
            })
        })
    }

    /// Available when header `name` compiles.
    pub fn check_for_header(
        self,
        name: &str,
        language: Language,
        cflags: Option<&str>,
        link_flags: Option<&str>,
    ) -> Self {
        let mut probe = CompiledProbe::header(name, language);
        probe.cflags = cflags.map(str::to_string);
        probe.link_flags = link_flags.map(str::to_string);
        self.check_by_compiling(probe)
    }

    /// Available when a program links against library `name`.
    pub fn check_for_library(self, name: &str) -> Self {
        self.check_by_compiling(CompiledProbe::library(name))
    }

    /// Available when `probe` compiles.
    pub fn check_by_compiling(self, probe: CompiledProbe) -> Self {
        self.checker(move |host| probe.run(host))
    }

    /// Available when shared library `name` loads into this process.
    pub fn check_for_loadable_library(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.checker(move |_| Ok(check_loadable_library(&name)))
    }

    /// Available when `command` reports at least version `minimum`.
    pub fn check_command_version(
        self,
        command: impl Into<String>,
        args: &[&str],
        minimum: impl Into<String>,
    ) -> Self {
        let command = command.into();
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let minimum = minimum.into();
        self.checker(move |host| Ok(check_command_version(host, &command, &args, &minimum)))
    }

    /// Add a dispatch entry for platform `tag` (or `"other_platforms"`).
    pub fn on<F>(mut self, tag: &str, produce: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.dispatch.push(DispatchTag::from(tag), Box::new(produce));
        self
    }

    /// Add the catch-all dispatch entry.
    pub fn on_other_platforms<F>(mut self, produce: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.dispatch
            .push(DispatchTag::OtherPlatforms, Box::new(produce));
        self
    }

    /// Finish the descriptor.
    ///
    /// Fails when there is not exactly one checker or the dispatch table is
    /// malformed; both are mistakes in the descriptor, not the machine.
    pub fn build(mut self) -> Result<Dependency> {
        let malformed = |message: String| ProbeError::MalformedDescriptor {
            identifier: self.identifier.clone(),
            message,
        };

        if self.checkers.len() != 1 {
            return Err(malformed(format!(
                "expected exactly one checker, found {}",
                self.checkers.len()
            )));
        }
        self.dispatch.validate().map_err(malformed)?;

        let checker = self.checkers.remove(0);
        Ok(Dependency {
            identifier: self.identifier,
            name: self.name,
            website: self.website,
            website_comments: self.website_comments,
            install_instructions: self.install_instructions,
            checker,
            dispatch: self.dispatch,
            check_result: Mutex::new(None),
            resolved_instructions: OnceLock::new(),
        })
    }
}

/// `apt-get` instructions.
pub fn apt_get_install(package: &str) -> String {
    format!("Please install it with apt-get install {}", package)
}

/// `urpmi` instructions.
pub fn urpmi(package: &str) -> String {
    format!("Please install it with urpmi {}", package)
}

/// `yum` instructions.
pub fn yum_install(package: &str) -> String {
    format!("Please install it with yum install {}", package)
}

/// `emerge` instructions.
pub fn emerge(package: &str) -> String {
    format!("Please install it with emerge -av {}", package)
}

/// Homebrew instructions.
pub fn brew_install(package: &str) -> String {
    format!("Please install it with brew install {}", package)
}

/// RubyGems instructions.
pub fn gem_install(package: &str) -> String {
    format!(
        "Please make sure RubyGems is installed, then run gem install {}",
        package
    )
}
