pub mod response;
pub mod tenant;
