use super::{ApiError, Cancellation, CategoryExpense, DateSummary, PeriodTotals, SummarySource};
use crate::period::DateRange;
use reqwest::StatusCode;
use time::Date;

/// Answers every request from memory.  Dates in 1999 fail, and the first
/// of a month has no record.
#[derive(Debug)]
pub(crate) struct FakeSource;

impl SummarySource for FakeSource {
    fn health(&self, _cancel: &Cancellation) -> Result<(), ApiError> {
        Ok(())
    }

    fn date_summary(
        &self,
        date: Date,
        _cancel: &Cancellation,
    ) -> Result<Option<DateSummary>, ApiError> {
        if date.year() == 1999 {
            Err(ApiError::Status {
                url: String::from("http://test/financial/date"),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            })
        } else if date.day() == 1 {
            Ok(None)
        } else {
            Ok(Some(DateSummary {
                income: 1000.0 * f64::from(date.day()),
                expense: 500.0,
                transactions: 2,
                message: None,
            }))
        }
    }

    fn period_totals(
        &self,
        _range: DateRange,
        _cancel: &Cancellation,
    ) -> Result<PeriodTotals, ApiError> {
        Ok(PeriodTotals {
            total_income: 3_000_000.0,
            total_expense: 1_250_000.0,
            total_transactions: 57,
        })
    }

    fn category_expenses(
        &self,
        _range: DateRange,
        _cancel: &Cancellation,
    ) -> Result<Vec<CategoryExpense>, ApiError> {
        Ok((1..=7)
            .map(|i| CategoryExpense {
                name: format!("Category {i}"),
                amount: 10_000.0 * f64::from(i),
                percentage: f64::from(i),
            })
            .collect())
    }
}
