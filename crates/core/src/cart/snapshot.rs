//! Persisted cart snapshots.
//!
//! A snapshot is a JSON array of line items. Decoding never trusts the
//! stored text: each entry is read into a lenient record, checked against the
//! rules a live cart enforces, and dropped on its own if it fails. Lines that
//! share a product id are merged by summing their quantities.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::warn;

use crate::{
    cart::LineItem,
    products::{InvalidProduct, ProductSnapshot},
};

/// Whole-snapshot decoding failures. Individual bad entries are not errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The stored text was not JSON.
    #[error("cart snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The stored JSON was not an array.
    #[error("cart snapshot is not a list of line items")]
    NotAList,
}

/// Why a single stored entry was dropped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RejectedEntry {
    /// The entry did not have the line item shape.
    #[error("entry is not a line item")]
    Shape,

    /// The product id or name was missing.
    #[error("entry is missing {0}")]
    MissingField(&'static str),

    /// The price was absent or not a number.
    #[error("price is not numeric")]
    Price,

    /// The discount was present but not a number.
    #[error("discount is not numeric")]
    Discount,

    /// The quantity was not a positive whole number.
    #[error("quantity is not a positive whole number")]
    Quantity,

    /// The product failed validation.
    #[error(transparent)]
    Product(#[from] InvalidProduct),
}

/// Result of decoding a snapshot.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Restored {
    /// Surviving lines in first-seen order.
    pub lines: Vec<LineItem>,

    /// Entries dropped because they failed validation.
    pub dropped: usize,

    /// Entries folded into an earlier line with the same product id.
    pub merged: usize,
}

impl Restored {
    /// Whether decoding changed anything relative to the stored text.
    pub fn was_repaired(&self) -> bool {
        self.dropped > 0 || self.merged > 0
    }
}

#[derive(Debug, Deserialize)]
struct StoredLine {
    product: StoredProduct,
    quantity: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProduct {
    id: Option<String>,
    name: Option<String>,
    price: Option<Value>,
    discount: Option<Value>,
    in_stock: Option<bool>,
    #[serde(default)]
    images: Vec<String>,
}

/// Serialize lines into snapshot text.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if the lines cannot be encoded.
pub fn encode(lines: &[LineItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(lines)
}

/// Decode snapshot text, dropping invalid entries and merging duplicates.
///
/// # Errors
///
/// Returns [`SnapshotError`] when the text as a whole is unusable.
pub fn decode(raw: &str) -> Result<Restored, SnapshotError> {
    let Value::Array(entries) = serde_json::from_str::<Value>(raw)? else {
        return Err(SnapshotError::NotAList);
    };

    let mut restored = Restored::default();

    for (index, entry) in entries.into_iter().enumerate() {
        let line = match decode_entry(entry) {
            Ok(line) => line,
            Err(reason) => {
                warn!(index, %reason, "dropping invalid cart snapshot entry");
                restored.dropped += 1;
                continue;
            }
        };

        let existing = restored
            .lines
            .iter_mut()
            .find(|existing| existing.product.id == line.product.id);

        match existing {
            Some(existing) => match existing.quantity.checked_add(line.quantity) {
                Some(quantity) => {
                    existing.quantity = quantity;
                    restored.merged += 1;
                }
                None => {
                    warn!(
                        index,
                        product_id = %line.product.id,
                        "dropping cart snapshot entry that overflows quantity"
                    );
                    restored.dropped += 1;
                }
            },
            None => restored.lines.push(line),
        }
    }

    Ok(restored)
}

fn decode_entry(entry: Value) -> Result<LineItem, RejectedEntry> {
    let stored: StoredLine =
        serde_json::from_value(entry).map_err(|_shape| RejectedEntry::Shape)?;

    let quantity = stored
        .quantity
        .as_u64()
        .and_then(|quantity| u32::try_from(quantity).ok())
        .filter(|quantity| *quantity >= 1)
        .ok_or(RejectedEntry::Quantity)?;

    let product = stored.product;

    let id = product
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or(RejectedEntry::MissingField("id"))?;

    let name = product
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or(RejectedEntry::MissingField("name"))?;

    let price = product
        .price
        .as_ref()
        .and_then(numeric)
        .ok_or(RejectedEntry::Price)?;

    let discount = match product.discount {
        None | Some(Value::Null) => None,
        Some(value) => Some(numeric(&value).ok_or(RejectedEntry::Discount)?),
    };

    let snapshot = ProductSnapshot {
        id,
        name,
        price,
        discount,
        in_stock: product.in_stock.unwrap_or(true),
        images: SmallVec::from_vec(product.images),
    };

    snapshot.validate()?;

    Ok(LineItem {
        product: snapshot,
        quantity,
    })
}

/// Read a decimal from a JSON number or a numeric string.
fn numeric(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => {
            let text = number.to_string();

            text.parse::<Decimal>()
                .or_else(|_plain| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(text) => text.trim().parse::<Decimal>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn entry(id: &str, price: Value, quantity: Value) -> Value {
        json!({ "product": { "id": id, "name": "Kurta", "price": price }, "quantity": quantity })
    }

    #[test]
    fn encoded_lines_decode_unchanged() -> TestResult {
        let lines = vec![LineItem {
            product: ProductSnapshot::new("p1", "Kurta", Decimal::new(99_950, 2))
                .with_discount(Decimal::from(15))
                .with_image("kurta.jpg"),
            quantity: 3,
        }];

        let restored = decode(&encode(&lines)?)?;

        assert_eq!(restored.lines, lines);
        assert!(!restored.was_repaired());

        Ok(())
    }

    #[test]
    fn numeric_strings_and_numbers_are_accepted() -> TestResult {
        let raw = json!([
            entry("a", json!(120.5), json!(1)),
            entry("b", json!("80.25"), json!(2)),
        ]);

        let restored = decode(&raw.to_string())?;

        assert_eq!(restored.lines.len(), 2);
        assert_eq!(
            restored.lines.first().map(|line| line.product.price),
            Some(Decimal::new(1_205, 1))
        );
        assert_eq!(
            restored.lines.get(1).map(|line| line.product.price),
            Some(Decimal::new(8_025, 2))
        );

        Ok(())
    }

    #[test]
    fn invalid_entries_are_dropped_individually() -> TestResult {
        let raw = json!([
            entry("good", json!(100), json!(1)),
            entry("", json!(100), json!(1)),
            entry("abc", json!("abc"), json!(1)),
            entry("neg", json!(-5), json!(1)),
            entry("zero", json!(100), json!(0)),
            entry("frac", json!(100), json!(1.5)),
            json!("not an object"),
            json!({ "product": { "id": "d", "name": "Kurta", "price": 10, "discount": 150 }, "quantity": 1 }),
        ]);

        let restored = decode(&raw.to_string())?;

        assert_eq!(restored.lines.len(), 1);
        assert_eq!(restored.dropped, 7);
        assert!(restored.was_repaired());

        Ok(())
    }

    #[test]
    fn duplicate_ids_are_merged_in_first_seen_order() -> TestResult {
        let raw = json!([
            entry("a", json!(10), json!(2)),
            entry("b", json!(20), json!(1)),
            entry("a", json!(10), json!(3)),
        ]);

        let restored = decode(&raw.to_string())?;

        let summary: Vec<(&str, u32)> = restored
            .lines
            .iter()
            .map(|line| (line.product_id(), line.quantity))
            .collect();

        assert_eq!(summary, vec![("a", 5), ("b", 1)]);
        assert_eq!(restored.merged, 1);

        Ok(())
    }

    #[test]
    fn entry_without_name_is_dropped_and_the_rest_survive() -> TestResult {
        let nameless = json!({ "product": { "id": "b", "price": 250 }, "quantity": 4 });

        assert_eq!(
            decode_entry(nameless.clone()),
            Err(RejectedEntry::MissingField("name"))
        );

        let raw = json!([entry("a", json!(100), json!(1)), nameless]);

        let restored = decode(&raw.to_string())?;

        assert_eq!(
            restored
                .lines
                .iter()
                .map(|line| (line.product_id(), line.quantity))
                .collect::<Vec<_>>(),
            vec![("a", 1)]
        );
        assert_eq!(restored.dropped, 1);

        Ok(())
    }

    #[test]
    fn non_array_snapshot_is_rejected() {
        assert!(matches!(decode(r#"{"items":[]}"#), Err(SnapshotError::NotAList)));
    }

    #[test]
    fn malformed_snapshot_is_rejected() {
        assert!(matches!(decode("[{"), Err(SnapshotError::Malformed(_))));
    }

    #[test]
    fn null_discount_is_treated_as_absent() -> TestResult {
        let raw = json!([{ "product": { "id": "a", "name": "Kurta", "price": 10, "discount": null }, "quantity": 1 }]);

        let restored = decode(&raw.to_string())?;

        assert_eq!(
            restored.lines.first().and_then(|line| line.product.discount),
            None
        );

        Ok(())
    }
}
