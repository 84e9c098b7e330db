pub mod author;
pub mod book;
pub mod book_author;
pub mod book_details;
pub mod product;
pub mod review;
pub mod user;

pub use book::Book;
