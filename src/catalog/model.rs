use serde::{Deserialize, Serialize};

use crate::{
    assets::store::normalize_rel_path,
    foundation::error::{PrintmockError, PrintmockResult},
};

/// One sellable variant of a product (a color/size combination).
///
/// Variants without a photo fall back to the product-level photo.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Stable variant identifier.
    pub id: String,
    /// Color name, e.g. "Black Heather". Doubles as the blend hint for
    /// the color-name tier source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Size label, e.g. "M".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Store-relative photo path for this variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A printable garment product with its variant grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable product identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Optional display description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Store-relative feature photo path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Variants in catalog order.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Distinct variant colors in first-seen order. Variants without a
    /// color are skipped.
    pub fn color_options(&self) -> Vec<&str> {
        distinct_options(self.variants.iter().map(|v| v.color.as_deref()))
    }

    /// Distinct variant sizes in first-seen order. Variants without a
    /// size are skipped.
    pub fn size_options(&self) -> Vec<&str> {
        distinct_options(self.variants.iter().map(|v| v.size.as_deref()))
    }

    /// First variant matching every provided filter. A `None` filter
    /// matches all variants.
    pub fn resolve_variant(&self, color: Option<&str>, size: Option<&str>) -> Option<&Variant> {
        self.variants.iter().find(|v| {
            let color_ok = color.is_none_or(|c| v.color.as_deref() == Some(c));
            let size_ok = size.is_none_or(|s| v.size.as_deref() == Some(s));
            color_ok && size_ok
        })
    }

    /// Photo to composite on: the matched variant's photo when it has
    /// one, otherwise the product feature photo.
    pub fn garment_image(&self, color: Option<&str>, size: Option<&str>) -> Option<&str> {
        self.resolve_variant(color, size)
            .and_then(|v| v.image.as_deref())
            .or(self.image.as_deref())
    }
}

/// Catalog of garment products offered for printing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarmentCatalog {
    /// Products in display order.
    #[serde(default)]
    pub products: Vec<Product>,
}

impl GarmentCatalog {
    /// Parse and validate a catalog from JSON bytes.
    ///
    /// Unknown fields are tolerated so catalogs exported with extra
    /// commerce data (prices, inventory) load unchanged.
    pub fn from_json_slice(bytes: &[u8]) -> PrintmockResult<Self> {
        let catalog: Self = serde_json::from_slice(bytes)
            .map_err(|e| PrintmockError::serde(format!("catalog JSON: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate identifiers and image paths.
    pub fn validate(&self) -> PrintmockResult<()> {
        let mut seen_products = std::collections::HashSet::new();
        for product in &self.products {
            if product.id.is_empty() {
                return Err(PrintmockError::validation("product id must be non-empty"));
            }
            if product.title.is_empty() {
                return Err(PrintmockError::validation(format!(
                    "product '{}' must have a title",
                    product.id
                )));
            }
            if !seen_products.insert(product.id.as_str()) {
                return Err(PrintmockError::validation(format!(
                    "duplicate product id '{}'",
                    product.id
                )));
            }
            if let Some(image) = &product.image {
                normalize_rel_path(image)?;
            }

            let mut seen_variants = std::collections::HashSet::new();
            for variant in &product.variants {
                if variant.id.is_empty() {
                    return Err(PrintmockError::validation(format!(
                        "product '{}' has a variant without an id",
                        product.id
                    )));
                }
                if !seen_variants.insert(variant.id.as_str()) {
                    return Err(PrintmockError::validation(format!(
                        "duplicate variant id '{}' in product '{}'",
                        variant.id, product.id
                    )));
                }
                if let Some(image) = &variant.image {
                    normalize_rel_path(image)?;
                }
            }
        }
        Ok(())
    }

    /// Lookup a product by id.
    pub fn product(&self, id: &str) -> PrintmockResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| PrintmockError::validation(format!("unknown product '{id}'")))
    }
}

fn distinct_options<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<&'a str> {
    let mut out = Vec::new();
    for v in values.flatten() {
        if !v.is_empty() && !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;
