pub mod affected_batch;
pub mod book;
pub mod book_edition;
pub mod defect_edition;

pub use book::{Book, BookPatch, EditionKey};
pub use book_edition::{BookEdition, BookEditionPatch};
pub use defect_edition::{AffectedBatchInput, DefectEdition, NewDefectEdition};
