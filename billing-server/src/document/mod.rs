//! Edge consumers of calculated totals
//!
//! Both builders take the unrounded [`Totals`](shared::billing::Totals) and
//! round every figure on the way out, independently.

pub mod payload;
pub mod print;

pub use payload::{PayloadLine, SubmissionPayload};
pub use print::{PrintDocument, PrintLine, SummaryRow, TaxBucket};
