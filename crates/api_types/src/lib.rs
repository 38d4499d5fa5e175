use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

pub mod operation {
    use super::*;

    /// Direction of an operation.
    ///
    /// The wire value is a plain string. Anything other than `income` reads
    /// back as [`OperationKind::Expense`], so a record with an unexpected type
    /// still loads.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(from = "String", into = "String")]
    pub enum OperationKind {
        Income,
        Expense,
    }

    impl OperationKind {
        pub const ALL: [OperationKind; 2] = [OperationKind::Income, OperationKind::Expense];

        /// Returns the canonical label used on the wire.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "income",
                Self::Expense => "expense",
            }
        }

        /// Strict lookup: `None` for anything but the two canonical labels.
        pub fn from_label(label: &str) -> Option<Self> {
            match label {
                "income" => Some(Self::Income),
                "expense" => Some(Self::Expense),
                _ => None,
            }
        }
    }

    impl From<String> for OperationKind {
        fn from(value: String) -> Self {
            match value.as_str() {
                "income" => Self::Income,
                _ => Self::Expense,
            }
        }
    }

    impl From<OperationKind> for String {
        fn from(value: OperationKind) -> Self {
            value.as_str().to_string()
        }
    }

    /// Operation body exchanged with `/operations`.
    ///
    /// `id` is only present on records returned by the server; request bodies
    /// never carry it.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Operation {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<i64>,
        #[serde(rename = "type")]
        pub kind: OperationKind,
        /// Serialized as a JSON number.
        #[serde(with = "amount_number")]
        pub amount: BigDecimal,
        pub category: String,
        /// Calendar date, `YYYY-MM-DD`.
        pub date: String,
        #[serde(default)]
        pub note: String,
    }

    /// Error body returned by the API on non-2xx responses.
    ///
    /// FastAPI reports `detail`, other backends `error`.
    #[derive(Debug, Deserialize)]
    pub struct ErrorBody {
        pub detail: Option<String>,
        pub error: Option<String>,
    }

    impl ErrorBody {
        pub fn message(self) -> Option<String> {
            self.detail.or(self.error)
        }
    }
}

/// `BigDecimal` as a JSON number.
///
/// The decimal goes through its shortest `f64` text form, which is what the
/// backend stores anyway.
mod amount_number {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Deserializer, Serializer, de, ser};

    pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let number = value
            .to_string()
            .parse::<f64>()
            .map_err(|err| ser::Error::custom(format!("amount {value}: {err}")))?;
        serializer.serialize_f64(number)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = f64::deserialize(deserializer)?;
        if !number.is_finite() {
            return Err(de::Error::custom("amount must be finite"));
        }
        BigDecimal::from_str(&number.to_string())
            .map_err(|err| de::Error::custom(format!("amount {number}: {err}")))
    }
}
