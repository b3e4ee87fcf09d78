pub mod short_link;
