use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic column identity, independent of the header text used by a given export
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    CustomerName,
    ManagerName,
    CustomerMobile,
    GuarantorName,
    GuarantorMobile,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 5] = [
        CanonicalField::CustomerName,
        CanonicalField::ManagerName,
        CanonicalField::CustomerMobile,
        CanonicalField::GuarantorName,
        CanonicalField::GuarantorMobile,
    ];

    /// Accepted header names, highest priority first
    pub fn variants(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::CustomerName => &["客户姓名", "客户名称", "借款人姓名", "借款人", "姓名"],
            CanonicalField::ManagerName => &["客户经理", "管户经理", "经办人", "经办客户经理"],
            CanonicalField::CustomerMobile => {
                &["手机号码", "客户手机号码", "客户手机", "借款人手机号码", "手机号"]
            }
            CanonicalField::GuarantorName => &["担保人姓名", "担保人", "保证人姓名", "保证人"],
            // The guarantor's number is the export's second 手机号码 column
            CanonicalField::GuarantorMobile => {
                &["手机号码.1", "担保人手机号码", "担保人手机", "保证人手机号码"]
            }
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CanonicalField::CustomerName => "customer name",
            CanonicalField::ManagerName => "manager name",
            CanonicalField::CustomerMobile => "customer mobile",
            CanonicalField::GuarantorName => "guarantor name",
            CanonicalField::GuarantorMobile => "guarantor mobile",
        };
        f.write_str(label)
    }
}

/// Canonical field → header actually present in the input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    columns: BTreeMap<CanonicalField, String>,
}

impl ColumnMap {
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.columns.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.columns.contains_key(&field)
    }

    /// Both fields resolved
    pub fn has_pair(&self, a: CanonicalField, b: CanonicalField) -> bool {
        self.contains(a) && self.contains(b)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.columns.iter().map(|(field, header)| (*field, header.as_str()))
    }

    pub fn missing(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| !self.contains(*field))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Bind each canonical field to the first of its variants found among `headers`.
///
/// Headers are compared after trimming. Unresolved fields are simply absent.
pub fn resolve_columns<S: AsRef<str>>(headers: &[S]) -> ColumnMap {
    let present: Vec<&str> = headers.iter().map(|h| h.as_ref().trim()).collect();

    let columns = CanonicalField::ALL
        .into_iter()
        .filter_map(|field| {
            field
                .variants()
                .iter()
                .find(|variant| present.contains(*variant))
                .map(|variant| (field, variant.to_string()))
        })
        .collect();

    ColumnMap { columns }
}
