//! Product Records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopease::products::{InvalidProduct, ProductSnapshot};
use smallvec::SmallVec;
use thiserror::Error;

use crate::documents::Document;

/// Body of a `product` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
    #[serde(default = "in_stock_by_default")]
    pub in_stock: bool,
    #[serde(default)]
    pub images: Vec<String>,
}

fn in_stock_by_default() -> bool {
    true
}

#[derive(Debug, Error)]
pub enum ProductRecordError {
    #[error("product body does not match the expected shape")]
    Shape(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] InvalidProduct),
}

/// Convert a `product` document into a validated snapshot.
///
/// # Errors
///
/// Returns an error if the body cannot be decoded or fails validation.
pub fn snapshot_from_document(document: &Document) -> Result<ProductSnapshot, ProductRecordError> {
    let body: ProductBody = document.decode()?;

    let snapshot = ProductSnapshot {
        id: document.id.to_string(),
        name: body.name,
        price: body.price,
        discount: body.discount,
        in_stock: body.in_stock,
        images: SmallVec::from_vec(body.images),
    };

    snapshot.validate()?;

    Ok(snapshot)
}
