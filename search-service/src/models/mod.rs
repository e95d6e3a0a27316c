pub mod book;
pub mod request;
pub mod responses;
