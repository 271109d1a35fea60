pub mod dto;
pub mod request;
pub mod response;
