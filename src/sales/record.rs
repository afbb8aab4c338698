//! Sales record types
//!
//! Field names on the wire are kept as existing clients send them:
//! `namaPembeli`, `namaBarang`, `tanggalTransaksi`.

use serde::{Deserialize, Serialize};

/// Wire name of the buyer field
pub const BUYER_NAME: &str = "namaPembeli";
/// Wire name of the item field
pub const ITEM_NAME: &str = "namaBarang";
/// Wire name of the transaction date field
pub const TRANSACTION_DATE: &str = "tanggalTransaksi";

/// Record identifier, assigned by the store
pub type SalesId = u64;

/// A stored sales transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub id: SalesId,
    #[serde(rename = "namaPembeli")]
    pub buyer_name: String,
    #[serde(rename = "namaBarang")]
    pub item_name: String,
    #[serde(rename = "tanggalTransaksi")]
    pub transaction_date: String,
}

/// Validated values for create and full replace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesFields {
    pub buyer_name: String,
    pub item_name: String,
    pub transaction_date: String,
}

/// Validated values for partial update.
///
/// `None` means the field was absent from the request and stays untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesPatch {
    pub buyer_name: Option<String>,
    pub item_name: Option<String>,
    pub transaction_date: Option<String>,
}

impl SalesRecord {
    pub(crate) fn from_fields(id: SalesId, fields: SalesFields) -> Self {
        Self {
            id,
            buyer_name: fields.buyer_name,
            item_name: fields.item_name,
            transaction_date: fields.transaction_date,
        }
    }

    pub(crate) fn apply(&mut self, patch: SalesPatch) {
        if let Some(buyer_name) = patch.buyer_name {
            self.buyer_name = buyer_name;
        }
        if let Some(item_name) = patch.item_name {
            self.item_name = item_name;
        }
        if let Some(transaction_date) = patch.transaction_date {
            self.transaction_date = transaction_date;
        }
    }
}

impl SalesPatch {
    /// True when the patch carries no field at all
    pub fn is_empty(&self) -> bool {
        self.buyer_name.is_none() && self.item_name.is_none() && self.transaction_date.is_none()
    }
}
