//! Product types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, ProductId};
use crate::money::{discount_percentage, format_price, Currency};
use crate::timestamp::Timestamp;

/// A product in the catalog snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Product description.
    #[serde(default)]
    pub description: String,
    /// Price in the smallest currency unit.
    pub price: u64,
    /// Price before discount, if the product has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
    /// Category display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Owning category.
    pub category_id: CategoryId,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Marketing bullet points.
    #[serde(default)]
    pub features: Vec<String>,
    /// Specification table.
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    pub in_stock: bool,
    #[serde(default)]
    pub stock_count: u64,
    /// Average rating in `[0, 5]`.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u64,
    /// Tags in display order.
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Product {
    /// Whether the product is discounted from an original price.
    pub fn is_on_sale(&self) -> bool {
        matches!(self.original_price, Some(original) if original > self.price)
    }

    /// Fraction taken off the original price, in `[0, 1]`.
    pub fn discount_fraction(&self) -> f64 {
        match self.original_price {
            Some(original) if original > self.price => {
                (original - self.price) as f64 / original as f64
            }
            _ => 0.0,
        }
    }

    /// Rounded discount percentage for badges.
    pub fn discount_percentage(&self) -> u32 {
        discount_percentage(self.price, self.original_price)
    }

    /// Popularity proxy used for featured listings.
    pub fn popularity(&self) -> f64 {
        self.rating * self.review_count as f64
    }

    /// Whether any tag equals `tag` exactly.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match over name, description and tags.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    /// Formatted price for display.
    pub fn display_price(&self, currency: Currency) -> String {
        format_price(self.price, currency)
    }
}
