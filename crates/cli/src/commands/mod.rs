//! CLI command implementations.

pub mod account;
pub mod cart;
pub mod catalog;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use thiserror::Error;
use tranquil_trails_core::IdError;
use tranquil_trails_widget::{
    CartWidget, ConfigError, Document, FileStore, PageKind, StorageError, WidgetConfig,
    WidgetError,
};

const DEFAULT_STORE_PATH: &str = ".trails-cart.json";
const DEFAULT_CATALOG_PATH: &str = "catalog.yaml";

/// Location the CLI's page pretends to be at.
pub const PAGE_LOCATION: &str = "/cart/";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The storage file could not be opened or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The widget failed.
    #[error("{0}")]
    Widget(#[from] WidgetError),

    /// An id argument was blank.
    #[error("Invalid id: {0}")]
    InvalidId(#[from] IdError),

    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The catalog file is not valid YAML.
    #[error("Invalid catalog: {0}")]
    CatalogParse(#[from] serde_yaml::Error),

    /// No product with that SKU.
    #[error("Unknown SKU: {0}")]
    UnknownSku(String),

    /// Reading the confirmation answer failed.
    #[error("Failed to read answer: {0}")]
    Prompt(#[source] io::Error),
}

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store_path: PathBuf,
    pub catalog_path: PathBuf,
    pub widget: WidgetConfig,
}

impl Settings {
    /// Load settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if a widget variable is invalid.
    pub fn from_env(store_override: Option<PathBuf>) -> Result<Self, CliError> {
        // Also loads `.env`, so it runs before the lookups below.
        let widget = WidgetConfig::from_env()?;
        Ok(Self::resolve(widget, store_override, |key| {
            std::env::var(key).ok()
        }))
    }

    /// Resolve the file paths through `lookup`, treating blank values as
    /// unset.
    fn resolve(
        widget: WidgetConfig,
        store_override: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let store_path = store_override
            .or_else(|| get("TRAILS_STORE_PATH").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));
        let catalog_path = get("TRAILS_CATALOG")
            .map_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH), PathBuf::from);
        Self {
            store_path,
            catalog_path,
            widget,
        }
    }

    /// The catalog to use, preferring an explicit `--catalog`.
    #[must_use]
    pub fn catalog_path(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit.unwrap_or_else(|| self.catalog_path.clone())
    }
}

/// One simulated page load.
pub struct Session {
    pub widget: CartWidget<FileStore>,
    pub doc: Document,
}

impl Session {
    /// Open the storage file and mount the widget on a storefront page.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage file is unreadable or the views fail
    /// to render.
    pub fn open(settings: &Settings) -> Result<Self, CliError> {
        let store = FileStore::open(&settings.store_path)?;
        tracing::debug!(store = %store.path().display(), "Opening page");
        let mut doc = Document::storefront(PAGE_LOCATION).with_cart_page();
        let mut widget = CartWidget::load(store, settings.widget.clone(), PageKind::Storefront);
        widget.mount(&mut doc)?;
        Ok(Self { widget, doc })
    }

    /// Print every message the page showed, in order of kind.
    #[allow(clippy::print_stdout)]
    pub fn print_messages(&self) {
        for message in self.doc.alerts() {
            println!("{message}");
        }
        for toast in self.doc.toasts() {
            println!("{}", toast.message);
        }
        for url in self.doc.navigations() {
            println!("-> {url}");
        }
    }
}

/// Ask a yes/no question on the terminal; anything but `y`/`yes` is no.
///
/// # Errors
///
/// Returns `CliError::Prompt` if the terminal cannot be read.
#[allow(clippy::print_stdout)]
pub fn ask(question: &str) -> Result<bool, CliError> {
    print!("{question} [y/N] ");
    io::stdout().flush().map_err(CliError::Prompt)?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(CliError::Prompt)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
