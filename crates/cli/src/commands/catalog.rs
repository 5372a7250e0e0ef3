//! Product catalog.
//!
//! The catalog is a YAML file listing the products the storefront sells.
//! It stands in for the product cards on a real page: `add --sku` looks a
//! product up here and adds it exactly as an add-to-cart button would.
//!
//! ```yaml
//! products:
//!   - sku: trail-mix
//!     name: Trail Mix
//!     price: "4.50"
//!     image: products/trail-mix.jpg
//!     category: snacks
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tranquil_trails_core::ProductInput;

use super::CliError;

/// A parsed catalog file.
#[derive(Debug, Deserialize)]
pub struct Catalog {
    pub products: Vec<CatalogProduct>,
}

/// One product in the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogProduct {
    pub sku: String,
    pub name: String,
    /// Kept as text so it is validated the same way as page data.
    pub price: String,
    pub image: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl CatalogProduct {
    /// The fields an add-to-cart button for this product would carry.
    #[must_use]
    pub fn to_input(&self) -> ProductInput {
        ProductInput::new(&self.sku, &self.name, &self.price, &self.image)
    }

    fn in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(category))
    }
}

impl Catalog {
    /// Parse catalog YAML.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CatalogParse` if the YAML does not match the
    /// catalog layout.
    pub fn parse(yaml: &str) -> Result<Self, CliError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    #[must_use]
    pub fn find(&self, sku: &str) -> Option<&CatalogProduct> {
        self.products.iter().find(|p| p.sku == sku)
    }

    /// Products in `category`, or all of them. `"all"` also matches every
    /// product, like the storefront's "All" filter button.
    pub fn in_category<'a>(
        &'a self,
        category: Option<&'a str>,
    ) -> impl Iterator<Item = &'a CatalogProduct> + 'a {
        let category = category.filter(|c| !c.eq_ignore_ascii_case("all"));
        self.products
            .iter()
            .filter(move |p| category.is_none_or(|c| p.in_category(c)))
    }
}

/// Read and parse the catalog at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<Catalog, CliError> {
    let yaml = fs::read_to_string(path).map_err(|source| CliError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::parse(&yaml)?;
    tracing::debug!(path = %path.display(), products = catalog.products.len(), "Loaded catalog");
    Ok(catalog)
}

/// Look up a product by SKU.
///
/// # Errors
///
/// Returns `CliError::UnknownSku` if no product has that SKU, or an error if
/// the catalog cannot be loaded.
pub fn lookup(path: &Path, sku: &str) -> Result<ProductInput, CliError> {
    let catalog = load(path)?;
    catalog
        .find(sku)
        .map(CatalogProduct::to_input)
        .ok_or_else(|| CliError::UnknownSku(sku.to_string()))
}

/// Print the catalog, optionally limited to one category.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
#[allow(clippy::print_stdout)]
pub fn list(path: &Path, category: Option<&str>) -> Result<(), CliError> {
    let catalog = load(path)?;
    let mut shown = 0_usize;
    for product in catalog.in_category(category) {
        println!(
            "{:<20} {:<24} {:>10}  {}",
            product.sku,
            product.name,
            product.price,
            product.category.as_deref().unwrap_or("-")
        );
        shown += 1;
    }
    if shown == 0 {
        println!("No products found");
    }
    Ok(())
}
