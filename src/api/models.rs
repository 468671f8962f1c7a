use crate::period::DateRange;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use time::Date;

/// Shown when the backend has nothing recorded for a date
pub(crate) const NO_DATA_MESSAGE: &str = "No data for this date.";

/// Reads a missing or `null` field as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of `GET /financial/date/{date}`
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct DateSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) income: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) expense: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) transactions: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) message: Option<String>,
}

impl DateSummary {
    /// A summary for a date with no recorded activity
    pub(crate) fn no_data() -> DateSummary {
        DateSummary {
            message: Some(String::from(NO_DATA_MESSAGE)),
            ..DateSummary::default()
        }
    }

    /// Decodes a date response.  `null` and `{}` mean the backend has no
    /// record of the date and give `None`; an object with explicit zeros is
    /// a real (quiet) day.
    pub(crate) fn from_json(value: Value) -> Result<Option<DateSummary>, serde_json::Error> {
        match value {
            Value::Null => Ok(None),
            Value::Object(ref fields) if fields.is_empty() => Ok(None),
            value => serde_json::from_value(value).map(Some),
        }
    }

    pub(crate) fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Response of `GET /financial/period`
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct PeriodTotals {
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) total_income: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) total_expense: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) total_transactions: u64,
}

impl PeriodTotals {
    pub(crate) fn net(&self) -> f64 {
        self.total_income - self.total_expense
    }
}

/// One element of the `GET /financial/categories` response
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct CategoryExpense {
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) percentage: f64,
}

/// Number of categories shown in a period report
pub(crate) const TOP_CATEGORIES: usize = 5;

/// Sorts `categories` by amount, largest first, and keeps the first
/// [`TOP_CATEGORIES`]
pub(crate) fn top_categories(mut categories: Vec<CategoryExpense>) -> Vec<CategoryExpense> {
    categories.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    categories.truncate(TOP_CATEGORIES);
    categories
}

/// Everything shown for a selected period
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PeriodReport {
    pub(crate) label: &'static str,
    pub(crate) range: DateRange,
    pub(crate) totals: PeriodTotals,
    pub(crate) categories: Vec<CategoryExpense>,
}

/// Everything shown for a selected date
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DateReport {
    pub(crate) date: Date,
    pub(crate) summary: DateSummary,
}
